use std::path::{Path, PathBuf};

use tracing::warn;
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::error::SheetError;
use crate::extract::PageRecord;
use crate::settings::Columns;

/// Row of the input sheet to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub row: u32,
    pub url: String,
}

/// Handle on the workbook being filled. Owns the in-memory spreadsheet and
/// writes it back to `path` on [`Workbook::save`].
pub struct Workbook {
    book: Spreadsheet,
    path: PathBuf,
    sheet: String,
    columns: Columns,
}

pub fn format_characteristic(name: &str, value: &str) -> String {
    format!(
        "Название характеристики = {} @@ Значение характеристики = {}",
        name, value
    )
}

impl Workbook {
    pub fn open(path: &Path, sheet: &str, columns: Columns) -> Result<Self, SheetError> {
        let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| SheetError::Open {
            path: path.to_path_buf(),
            message: format!("{:?}", e),
        })?;
        if book.get_sheet_by_name(sheet).is_none() {
            return Err(SheetError::MissingSheet {
                sheet: sheet.to_string(),
                path: path.to_path_buf(),
            });
        }
        Ok(Workbook {
            book,
            path: path.to_path_buf(),
            sheet: sheet.to_string(),
            columns,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn missing_sheet(&self) -> SheetError {
        SheetError::MissingSheet {
            sheet: self.sheet.clone(),
            path: self.path.clone(),
        }
    }

    fn worksheet(&self) -> Result<&Worksheet, SheetError> {
        self.book
            .get_sheet_by_name(&self.sheet)
            .ok_or_else(|| self.missing_sheet())
    }

    fn worksheet_mut(&mut self) -> Result<&mut Worksheet, SheetError> {
        let err = self.missing_sheet();
        self.book.get_sheet_by_name_mut(&self.sheet).ok_or(err)
    }

    /// URLs from `url_column`, rows `first_row..=last`, in row order.
    /// Blank cells are skipped.
    pub fn source_rows(&self, first_row: u32, url_column: u32) -> Result<Vec<SourceRow>, SheetError> {
        let ws = self.worksheet()?;
        let rows = (first_row..=ws.get_highest_row())
            .filter_map(|row| {
                let url = ws.get_value((url_column, row)).trim().to_string();
                if url.is_empty() {
                    None
                } else {
                    Some(SourceRow { row, url })
                }
            })
            .collect();
        Ok(rows)
    }

    /// Put `record` into `row`: fixed columns first, then one formatted cell
    /// per characteristic. Characteristic cells left from an earlier run past
    /// the new last pair are blanked.
    pub fn write_record(&mut self, record: &PageRecord, row: u32) -> Result<(), SheetError> {
        if record.has_ambiguous_code() {
            warn!(
                row,
                codes = ?record.ware_codes,
                "Two identifiers for one product? Keeping the first"
            );
        }
        let c = self.columns.clone();
        let ws = self.worksheet_mut()?;
        let first_stale = c.characteristics + record.characteristics.len() as u32;
        for col in first_stale..=ws.get_highest_column() {
            if ws.get_cell((col, row)).is_some() {
                ws.get_cell_mut((col, row)).set_value("");
            }
        }
        let mut set = |col: u32, value: &str| {
            ws.get_cell_mut((col, row)).set_value(value);
        };
        set(c.price, &record.price);
        set(c.old_price, &record.old_price);
        set(c.description, &record.description);
        set(c.category_path, &record.category_path);
        set(c.ware_code, record.ware_code());
        set(c.image_url, &record.image_url);
        set(c.image_local_path, &record.image_local_path);
        for (offset, ch) in record.characteristics.iter().enumerate() {
            set(
                c.characteristics + offset as u32,
                &format_characteristic(&ch.name, &ch.value),
            );
        }
        Ok(())
    }

    /// Rewrite the whole file.
    pub fn save(&self) -> Result<(), SheetError> {
        umya_spreadsheet::writer::xlsx::write(&self.book, &self.path).map_err(|e| {
            SheetError::Save {
                path: self.path.clone(),
                message: format!("{:?}", e),
            }
        })
    }

    #[cfg(test)]
    fn value(&self, col: u32, row: u32) -> String {
        self.worksheet().unwrap().get_value((col, row))
    }
}

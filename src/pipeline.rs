use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::extract::{Extractor, PageRecord};
use crate::fetch::{FetchedPage, Fetcher};
use crate::images::ImageStore;
use crate::sheet::{SourceRow, Workbook};

/// Counters reported after a run.
#[derive(Debug)]
pub struct RunStats {
    pub started_at: DateTime<Local>,
    pub total: usize,
    pub ok: usize,
    pub skipped: usize,
    pub ambiguous: usize,
    pub images: usize,
    pub image_errors: usize,
}

impl RunStats {
    fn new(total: usize) -> Self {
        RunStats {
            started_at: Local::now(),
            total,
            ok: 0,
            skipped: 0,
            ambiguous: 0,
            images: 0,
            image_errors: 0,
        }
    }

    pub fn print(&self) {
        println!(
            "Processed {} rows ({} ok, {} skipped, {} ambiguous codes); {} images saved, {} failed. Started {}.",
            self.total,
            self.ok,
            self.skipped,
            self.ambiguous,
            self.images,
            self.image_errors,
            self.started_at.format("%Y-%m-%d %H:%M:%S"),
        );
    }
}

/// Collaborators for one batch run.
pub struct Pipeline<'a> {
    pub fetcher: &'a Fetcher,
    pub extractor: &'a Extractor,
    pub images: Option<&'a ImageStore>,
}

impl Pipeline<'_> {
    /// Fetch, extract and write each row in order. A row whose page cannot be
    /// fetched is logged and skipped; workbook save failures abort the run.
    pub fn run(&self, workbook: &mut Workbook, rows: &[SourceRow]) -> Result<RunStats> {
        let mut stats = RunStats::new(rows.len());

        let pb = ProgressBar::new(rows.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
                .progress_chars("=> "),
        );

        for source in rows {
            let t_row = Instant::now();
            let page = match self.fetcher.get_page(&source.url) {
                Ok(page) => page,
                Err(e) => {
                    pb.suspend(|| warn!(row = source.row, "Skipping row: {}", e));
                    stats.skipped += 1;
                    pb.inc(1);
                    continue;
                }
            };

            let record = pb.suspend(|| self.apply(workbook, &page, source.row))?;
            stats.ok += 1;
            if record.has_ambiguous_code() {
                stats.ambiguous += 1;
            }

            if let Some(store) = self.images {
                if !record.image_url.is_empty() {
                    match store.download(self.fetcher, &record.image_url) {
                        Ok(path) => {
                            debug!("Saved image {:?}", path);
                            stats.images += 1;
                        }
                        Err(e) => {
                            pb.suspend(|| warn!(row = source.row, "Image download failed: {}", e));
                            stats.image_errors += 1;
                        }
                    }
                }
            }

            debug!(row = source.row, elapsed_ms = t_row.elapsed().as_millis() as u64, "Row done");
            pb.inc(1);
        }

        pb.finish_and_clear();
        info!(
            "Done: {} rows ({} ok, {} skipped)",
            stats.total, stats.ok, stats.skipped
        );
        Ok(stats)
    }

    /// Extract `page` into `row` and persist the workbook.
    pub fn apply(&self, workbook: &mut Workbook, page: &FetchedPage, row: u32) -> Result<PageRecord> {
        info!(row, "{}", page.url);
        let record = self.extractor.extract(&page.body, &page.url);
        debug!(
            record = %serde_json::to_string(&record).unwrap_or_default(),
            "Extracted"
        );
        workbook.write_record(&record, row)?;
        workbook
            .save()
            .with_context(|| format!("row {} not persisted", row))?;
        Ok(record)
    }
}

use scraper::{ElementRef, Html};
use serde::Serialize;

use super::selectors::{first_match, trimmed_text, Selectors};

/// One attribute row of the specifications table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Characteristic {
    pub name: String,
    pub value: String,
}

/// Rows with fewer than two `td` cells (headers, separators) are skipped.
/// Rows and cells of tables nested inside the attributes table are ignored.
pub fn extract(doc: &Html, sel: &Selectors) -> Option<Vec<Characteristic>> {
    let table = first_match(doc, &sel.characteristics_table)?;
    let rows = table
        .select(&sel.row)
        .filter(|tr| owning_table(*tr).map(|t| t.id()) == Some(table.id()))
        .filter_map(|tr| {
            let mut cells = tr
                .select(&sel.cell)
                .filter(|td| td.parent().map(|p| p.id()) == Some(tr.id()));
            let name = trimmed_text(cells.next()?);
            let value = trimmed_text(cells.next()?);
            Some(Characteristic { name, value })
        })
        .collect();
    Some(rows)
}

fn owning_table(tr: ElementRef<'_>) -> Option<ElementRef<'_>> {
    tr.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "table")
}

use scraper::Html;

use super::selectors::{first_match, trimmed_text, Selectors};
use crate::text::digit_runs;

/// Digit runs of the SKU label. A label without digits counts as missing.
pub fn extract(doc: &Html, sel: &Selectors) -> Option<Vec<String>> {
    let label = trimmed_text(first_match(doc, &sel.ware_code)?);
    let codes = digit_runs(&label);
    if codes.is_empty() {
        None
    } else {
        Some(codes)
    }
}

use scraper::Html;

use super::selectors::{first_match, trimmed_text, Selectors};

/// `"<amount> <currency>"`, where the currency is the last word of the price
/// container. Needs both elements.
pub fn extract(doc: &Html, sel: &Selectors) -> Option<String> {
    let container = trimmed_text(first_match(doc, &sel.price_container)?);
    let currency = container.split_whitespace().last()?;
    let amount = trimmed_text(first_match(doc, &sel.price_amount)?);
    Some(format!("{} {}", amount, currency))
}

pub fn extract_old(doc: &Html, sel: &Selectors) -> Option<String> {
    first_match(doc, &sel.old_price).map(trimmed_text)
}

use scraper::Html;
use url::Url;

use super::selectors::{first_match, Selectors};
use crate::text::last_segment;

/// Preview image URL. Absolute values are kept as written; relative ones
/// are joined onto the page URL.
pub fn extract(doc: &Html, sel: &Selectors, page_url: &str) -> Option<String> {
    let content = first_match(doc, &sel.image)?.value().attr("content")?.trim();
    if content.is_empty() {
        return None;
    }
    if Url::parse(content).is_ok() {
        return Some(content.to_string());
    }
    let base = Url::parse(page_url).ok()?;
    base.join(content).ok().map(|u| u.to_string())
}

/// `<prefix>/<last path segment>`.
pub fn local_path(prefix: &str, image_url: &str) -> String {
    format!("{}/{}", prefix, last_segment(image_url))
}

pub mod breadcrumbs;
pub mod characteristics;
pub mod description;
pub mod image;
pub mod price;
pub mod selectors;
pub mod ware_code;

use scraper::Html;
use serde::Serialize;

use crate::error::SettingsError;
pub use characteristics::Characteristic;
use selectors::{SelectorMap, Selectors};

/// Fields extracted from one product page. Every field is independent and
/// falls back to its empty value when the page lacks the markup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageRecord {
    pub url: String,
    pub price: String,
    pub old_price: String,
    pub description: String,
    pub category_path: String,
    pub ware_codes: Vec<String>,
    pub image_url: String,
    pub image_local_path: String,
    pub characteristics: Vec<Characteristic>,
}

impl PageRecord {
    /// Code persisted to the sheet: the first one found.
    pub fn ware_code(&self) -> &str {
        self.ware_codes.first().map(String::as_str).unwrap_or_default()
    }

    /// More than one digit run in the SKU label.
    pub fn has_ambiguous_code(&self) -> bool {
        self.ware_codes.len() > 1
    }
}

pub struct Extractor {
    selectors: Selectors,
    images_prefix: String,
}

impl Extractor {
    pub fn new(map: &SelectorMap, images_prefix: impl Into<String>) -> Result<Self, SettingsError> {
        Ok(Extractor {
            selectors: Selectors::compile(map)?,
            images_prefix: images_prefix.into(),
        })
    }

    /// Parse the page once and run every field lookup against it.
    pub fn extract(&self, html: &str, final_url: &str) -> PageRecord {
        let doc = Html::parse_document(html);
        let sel = &self.selectors;

        let image_url = image::extract(&doc, sel, final_url).unwrap_or_default();
        let image_local_path = if image_url.is_empty() {
            String::new()
        } else {
            image::local_path(&self.images_prefix, &image_url)
        };

        PageRecord {
            url: final_url.to_string(),
            price: price::extract(&doc, sel).unwrap_or_default(),
            old_price: price::extract_old(&doc, sel).unwrap_or_default(),
            description: description::extract(&doc, sel).unwrap_or_default(),
            category_path: breadcrumbs::extract(&doc, sel).unwrap_or_default(),
            ware_codes: ware_code::extract(&doc, sel).unwrap_or_default(),
            image_url,
            image_local_path,
            characteristics: characteristics::extract(&doc, sel).unwrap_or_default(),
        }
    }
}

// ── Tests ──

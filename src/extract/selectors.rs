//! Site markup, kept as data.
//!
//! Each field maps to CSS selectors tried in order; the first one that
//! matches wins. Changing the site layout should only touch this mapping
//! (or the `[selectors]` table of the config file).

use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;

use crate::error::SettingsError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorMap {
    /// Element whose last word is the currency.
    pub price_container: Vec<String>,
    /// Element holding the numeric price.
    pub price_amount: Vec<String>,
    pub old_price: Vec<String>,
    pub description: Vec<String>,
    pub ware_code: Vec<String>,
    /// `<meta>` carrying the preview image in its `content` attribute.
    pub image: Vec<String>,
    /// Breadcrumb items; every match of the winning selector is a segment.
    pub breadcrumb_item: Vec<String>,
    /// Attributes table; rows are `tr`, name and value the first two `td`.
    pub characteristics_table: Vec<String>,
}

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for SelectorMap {
    fn default() -> Self {
        SelectorMap {
            price_container: list(&["div.price"]),
            price_amount: list(&[r#"span[itemprop="price"]"#]),
            old_price: list(&["div.old-price"]),
            description: list(&["#tab-description .col-md-6", "div.col-md-6"]),
            ware_code: list(&["span.sku.cod"]),
            image: list(&[r#"meta[property="og:image"]"#]),
            breadcrumb_item: list(&["ul.breadcrumb li"]),
            characteristics_table: list(&["#tab-specification table", "table.attribute"]),
        }
    }
}

/// Compiled form of [`SelectorMap`].
#[derive(Debug)]
pub struct Selectors {
    pub price_container: Vec<Selector>,
    pub price_amount: Vec<Selector>,
    pub old_price: Vec<Selector>,
    pub description: Vec<Selector>,
    pub ware_code: Vec<Selector>,
    pub image: Vec<Selector>,
    pub breadcrumb_item: Vec<Selector>,
    pub characteristics_table: Vec<Selector>,
    pub row: Selector,
    pub cell: Selector,
}

impl Selectors {
    pub fn compile(map: &SelectorMap) -> Result<Self, SettingsError> {
        Ok(Selectors {
            price_container: compile_field("price_container", &map.price_container)?,
            price_amount: compile_field("price_amount", &map.price_amount)?,
            old_price: compile_field("old_price", &map.old_price)?,
            description: compile_field("description", &map.description)?,
            ware_code: compile_field("ware_code", &map.ware_code)?,
            image: compile_field("image", &map.image)?,
            breadcrumb_item: compile_field("breadcrumb_item", &map.breadcrumb_item)?,
            characteristics_table: compile_field(
                "characteristics_table",
                &map.characteristics_table,
            )?,
            row: compile_one("row", "tr")?,
            cell: compile_one("cell", "td")?,
        })
    }
}

fn compile_field(field: &'static str, selectors: &[String]) -> Result<Vec<Selector>, SettingsError> {
    if selectors.is_empty() {
        return Err(SettingsError::EmptySelectors(field));
    }
    selectors.iter().map(|s| compile_one(field, s)).collect()
}

fn compile_one(field: &'static str, selector: &str) -> Result<Selector, SettingsError> {
    Selector::parse(selector).map_err(|e| SettingsError::Selector {
        field,
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// First element matched by the first candidate that matches anything.
pub fn first_match<'a>(doc: &'a Html, candidates: &[Selector]) -> Option<ElementRef<'a>> {
    candidates.iter().find_map(|sel| doc.select(sel).next())
}

/// Every element matched by the first candidate that matches anything.
pub fn all_matches<'a>(doc: &'a Html, candidates: &[Selector]) -> Vec<ElementRef<'a>> {
    candidates
        .iter()
        .map(|sel| doc.select(sel).collect::<Vec<_>>())
        .find(|found| !found.is_empty())
        .unwrap_or_default()
}

/// Element text with surrounding whitespace trimmed.
pub fn trimmed_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_compile() {
        let s = Selectors::compile(&SelectorMap::default()).unwrap();
        assert_eq!(s.description.len(), 2);
    }

    #[test]
    fn invalid_selector_names_the_field() {
        let map = SelectorMap {
            old_price: vec!["div..broken[".to_string()],
            ..SelectorMap::default()
        };
        let err = Selectors::compile(&map).unwrap_err();
        match err {
            SettingsError::Selector { field, selector, .. } => {
                assert_eq!(field, "old_price");
                assert_eq!(selector, "div..broken[");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_candidate_list_is_rejected() {
        let map = SelectorMap {
            image: Vec::new(),
            ..SelectorMap::default()
        };
        assert!(matches!(
            Selectors::compile(&map),
            Err(SettingsError::EmptySelectors("image"))
        ));
    }

    #[test]
    fn first_matching_candidate_wins() {
        let doc = Html::parse_document(
            r#"<div class="col-md-6">generic</div>
               <div id="tab-description"><div class="col-md-6">scoped</div></div>"#,
        );
        let s = Selectors::compile(&SelectorMap::default()).unwrap();
        let el = first_match(&doc, &s.description).unwrap();
        assert_eq!(trimmed_text(el), "scoped");
    }
}

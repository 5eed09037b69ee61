use itertools::Itertools;
use scraper::Html;

use super::selectors::{all_matches, trimmed_text, Selectors};
use crate::text::normalize;

pub const SEPARATOR: &str = " > ";

/// Breadcrumb segments joined with `" > "`. Line breaks inside an item
/// split it into further segments.
pub fn extract(doc: &Html, sel: &Selectors) -> Option<String> {
    let path = all_matches(doc, &sel.breadcrumb_item)
        .into_iter()
        .flat_map(|item| {
            normalize(&trimmed_text(item))
                .split('\n')
                .map(|s| s.trim().to_string())
                .collect::<Vec<_>>()
        })
        .filter(|s| !s.is_empty())
        .join(SEPARATOR);
    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::selectors::SelectorMap;

    fn run(html: &str) -> Option<String> {
        let sel = Selectors::compile(&SelectorMap::default()).unwrap();
        extract(&Html::parse_document(html), &sel)
    }

    #[test]
    fn items_joined_in_order() {
        let html = r#"
            <ul class="breadcrumb">
              <li><a href="/">Главная</a></li>
              <li><a href="/kitchen">  Kitchen </a></li>
              <li>Kettles</li>
            </ul>"#;
        assert_eq!(run(html).as_deref(), Some("Главная > Kitchen > Kettles"));
    }

    #[test]
    fn embedded_breaks_become_separators() {
        let html = "<ul class=\"breadcrumb\"><li>Home\n  \n Tools</li><li><a> </a></li><li>Drills</li></ul>";
        assert_eq!(run(html).as_deref(), Some("Home > Tools > Drills"));
    }

    #[test]
    fn several_lists_are_concatenated() {
        let html = r#"<ul class="breadcrumb"><li>A</li></ul><ul class="breadcrumb"><li>B</li></ul>"#;
        assert_eq!(run(html).as_deref(), Some("A > B"));
    }

    #[test]
    fn no_breadcrumbs() {
        assert_eq!(run("<ul><li>menu</li></ul>"), None);
        assert_eq!(run(r#"<ul class="breadcrumb"><li> </li></ul>"#), None);
    }
}

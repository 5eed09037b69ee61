use scraper::Html;

use super::selectors::{first_match, trimmed_text, Selectors};
use crate::text::normalize;

pub fn extract(doc: &Html, sel: &Selectors) -> Option<String> {
    let raw = trimmed_text(first_match(doc, &sel.description)?);
    Some(normalize(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::selectors::SelectorMap;

    #[test]
    fn trimmed_then_normalized() {
        let doc = Html::parse_document(
            "<div id=\"tab-description\"><div class=\"col-md-6\">\n  Hello   world \n  Foo\n\n Bar\n</div></div>",
        );
        let sel = Selectors::compile(&SelectorMap::default()).unwrap();
        assert_eq!(extract(&doc, &sel).as_deref(), Some("Hello world\nFoo\nBar"));
    }

    #[test]
    fn nested_markup_contributes_text() {
        let doc = Html::parse_document(
            r#"<div class="col-md-6"><p>Steel   body</p>
<p> Weight: <b>2 kg</b></p></div>"#,
        );
        let sel = Selectors::compile(&SelectorMap::default()).unwrap();
        assert_eq!(
            extract(&doc, &sel).as_deref(),
            Some("Steel body\nWeight: 2 kg")
        );
    }
}

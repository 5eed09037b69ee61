//! Text cleanup shared by the field extractors and the image store.

use regex::Regex;
use std::sync::OnceLock;

/// Normalize extracted block text.
///
/// Steps run in a fixed order: collapse space runs, drop the space before a
/// line break, drop the space after one, then collapse line break runs.
/// Collapsing spaces first means the later steps never leave a double space.
pub fn normalize(text: &str) -> String {
    static CARRIAGE: OnceLock<Regex> = OnceLock::new();
    static SPACES: OnceLock<Regex> = OnceLock::new();
    static SPACE_BEFORE_BREAK: OnceLock<Regex> = OnceLock::new();
    static SPACE_AFTER_BREAK: OnceLock<Regex> = OnceLock::new();
    static BREAKS: OnceLock<Regex> = OnceLock::new();

    let carriage = CARRIAGE.get_or_init(|| Regex::new(r"\r\n?").unwrap());
    let spaces = SPACES.get_or_init(|| Regex::new(r" +").unwrap());
    let before = SPACE_BEFORE_BREAK.get_or_init(|| Regex::new(r" \n").unwrap());
    let after = SPACE_AFTER_BREAK.get_or_init(|| Regex::new(r"\n ").unwrap());
    let breaks = BREAKS.get_or_init(|| Regex::new(r"\n+").unwrap());

    let text = carriage.replace_all(text, "\n");
    let text = spaces.replace_all(&text, " ");
    let text = before.replace_all(&text, "\n");
    let text = after.replace_all(&text, "\n");
    breaks.replace_all(&text, "\n").into_owned()
}

/// All maximal ASCII digit runs, in order of appearance.
pub fn digit_runs(text: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"[0-9]+").unwrap());
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Substring after the last `/`, or the whole input when there is none.
pub fn last_segment(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normalize_collapses_spaces_and_breaks() {
        assert_eq!(
            normalize("Hello   world \n  Foo\n\n Bar"),
            "Hello world\nFoo\nBar"
        );
    }

    #[test]
    fn normalize_folds_carriage_returns() {
        assert_eq!(normalize("a \r\n\r\n b"), "a\nb");
        assert_eq!(normalize("a\rb"), "a\nb");
    }

    #[test]
    fn normalize_keeps_leading_and_trailing_text() {
        // trimming is the caller's job
        assert_eq!(normalize(" a  b "), " a b ");
    }

    #[test]
    fn digit_runs_split_on_non_digits() {
        assert_eq!(digit_runs("Art. 12-345"), vec!["12", "345"]);
        assert_eq!(digit_runs("Код: 100500"), vec!["100500"]);
        assert!(digit_runs("no code").is_empty());
        assert!(digit_runs("").is_empty());
    }

    #[test]
    fn last_segment_of_urls() {
        assert_eq!(last_segment("https://shop.example/img/p/1/photo.jpg"), "photo.jpg");
        assert_eq!(last_segment("photo.jpg"), "photo.jpg");
        assert_eq!(last_segment("https://shop.example/img/"), "");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(s in "[a-z \n\r]{0,48}") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once.clone());
        }

        #[test]
        fn normalize_leaves_no_double_spaces_or_breaks(s in "[a-z \n]{0,48}") {
            let out = normalize(&s);
            prop_assert!(!out.contains("  "));
            prop_assert!(!out.contains("\n\n"));
            prop_assert!(!out.contains(" \n"));
            prop_assert!(!out.contains("\n "));
        }
    }
}

use scraper::{Html, Selector};

/// Extracts the text of the first element matched by a CSS selector.
///
/// Returns `None` when the selector is invalid or matches nothing, so a page
/// whose markup drifted away from the expected shape degrades to missing
/// fields instead of an error.
pub fn select_value(document: &Html, css_selector: &str) -> Option<String> {
    match Selector::parse(css_selector) {
        Ok(s) => document
            .select(&s)
            .next()
            .map(|v| v.text().collect::<String>()),
        Err(_) => None,
    }
}

/// Like [`select_value`] but trims the text and yields an empty string when
/// the element is missing.
pub fn select_to_string(document: &Html, css_selector: &str) -> String {
    select_value(document, css_selector)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_value() {
        let html = r#"<div class="example"> Hello, world! </div>"#;
        let document = Html::parse_document(html);

        assert_eq!(
            select_value(&document, "div.example"),
            Some(" Hello, world! ".to_string())
        );
        assert_eq!(select_value(&document, "div.missing"), None);
        assert_eq!(select_value(&document, ":::not-a-selector"), None);
    }

    #[test]
    fn test_select_to_string() {
        let html = r#"<table><tr><td> 1.23 </td><td>-0.05</td></tr></table>"#;
        let document = Html::parse_document(html);

        assert_eq!(
            select_to_string(&document, "table > tbody > tr > td:first-child"),
            "1.23"
        );
        assert_eq!(
            select_to_string(&document, "table > tbody > tr > td:last-child"),
            "-0.05"
        );
        assert_eq!(select_to_string(&document, "table span"), "");
    }
}

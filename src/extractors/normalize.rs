// src/extractors/normalize.rs
//! Markup normalization and text cleaning shared by every extractor.

use once_cell::sync::Lazy;
use regex::Regex;

// --- Markup normalization ---
static IX_OPEN_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<ix:[^>]*>").expect("Failed to compile IX_OPEN_TAG_RE"));
static IX_CLOSE_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</ix:[^>]*>").expect("Failed to compile IX_CLOSE_TAG_RE"));
static CDATA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!\[CDATA\[.*?\]\]>").expect("Failed to compile CDATA_RE"));
static COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("Failed to compile COMMENT_RE"));

// --- Text cleaning ---
static IX_ELEMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<ix:.*?>.*?</ix:.*?>").expect("Failed to compile IX_ELEMENT_RE")
});
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("Failed to compile TAG_RE"));
static PAGE_NUMBER_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*\d+\s*$").expect("Failed to compile PAGE_NUMBER_LINE_RE"));
static SEPARATOR_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*\*+\s*$").expect("Failed to compile SEPARATOR_LINE_RE"));
static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RE"));

/// Collapses inline XBRL tags to `<div>`/`</div>` and drops CDATA and comment blocks.
///
/// The surrounding structure survives, so the result still parses as HTML.
/// Runs to a fixed point: removing a block can splice a new tag together.
pub fn normalize_markup(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_pass(raw: &str) -> String {
    let content = IX_OPEN_TAG_RE.replace_all(raw, "<div>");
    let content = IX_CLOSE_TAG_RE.replace_all(&content, "</div>");
    let content = CDATA_RE.replace_all(&content, "");
    let content = COMMENT_RE.replace_all(&content, "");
    content.into_owned()
}

/// Reduces a fragment to plain single-spaced text.
///
/// Strips inline XBRL elements with their content, every remaining tag,
/// lines holding only a page number or a row of asterisks, then collapses
/// whitespace. Tag stripping repeats until nothing changes, which keeps the
/// function idempotent on unbalanced markup.
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut current = IX_ELEMENT_RE.replace_all(text, "").into_owned();
    loop {
        let stripped = TAG_RE.replace_all(&current, "");
        if stripped.len() == current.len() {
            break;
        }
        current = stripped.into_owned();
    }

    let current = PAGE_NUMBER_LINE_RE.replace_all(&current, "");
    let current = SEPARATOR_LINE_RE.replace_all(&current, "");
    WHITESPACE_RE.replace_all(&current, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_collapses_inline_xbrl() {
        let raw = r#"<p>Revenue <ix:nonFraction name="us-gaap:Revenues" unitRef="usd">383,285</ix:nonFraction> million</p>"#;
        let normalized = normalize_markup(raw);
        assert_eq!(normalized, "<p>Revenue <div>383,285</div> million</p>");
    }

    #[test]
    fn test_normalize_drops_comments_and_cdata() {
        let raw = "<body><!-- generated\nby tool --><p>Keep</p><![CDATA[ var x = 1; ]]></body>";
        assert_eq!(normalize_markup(raw), "<body><p>Keep</p></body>");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = "<ix:header><!-- c --></ix:header><p>Text</p><![CDATA[x]]>";
        let once = normalize_markup(raw);
        assert_eq!(normalize_markup(&once), once);
    }

    #[test]
    fn test_normalize_catches_tags_spliced_by_removal() {
        let raw = "<i<![CDATA[junk]]>x:nonFraction>42</ix:nonFraction>";
        assert_eq!(normalize_markup(raw), "<div>42</div>");
    }

    #[test]
    fn test_clean_text_strips_tags_and_whitespace() {
        let raw = "<p>Item 1.\n   Business</p>\n<div>We design   products.</div>";
        assert_eq!(clean_text(raw), "Item 1. Business We design products.");
    }

    #[test]
    fn test_clean_text_removes_page_numbers_and_separators() {
        let raw = "First paragraph.\n  42  \n*****\nSecond paragraph.";
        assert_eq!(clean_text(raw), "First paragraph. Second paragraph.");
    }

    #[test]
    fn test_clean_text_removes_inline_xbrl_elements() {
        let raw = "Total <ix:nonFraction name=\"x\">100</ix:nonFraction> units";
        assert_eq!(clean_text(raw), "Total units");
    }

    #[test]
    fn test_clean_text_handles_nested_tag_soup() {
        assert_eq!(clean_text("a<<b>i>c"), "ai>c");
        assert_eq!(clean_text("a<b<i>>c"), "a>c");
        assert_eq!(clean_text("<"), "<");
        assert_eq!(clean_text("x > y < z"), "x > y < z");
    }

    #[test]
    fn test_clean_text_empty() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("   \n\t "), "");
    }

    proptest! {
        #[test]
        fn prop_clean_text_idempotent(input in ".{0,200}") {
            let once = clean_text(&input);
            prop_assert_eq!(clean_text(&once), once);
        }

        #[test]
        fn prop_clean_text_idempotent_on_tag_soup(input in "[<>a-z/ \n0-9*:]{0,120}") {
            let once = clean_text(&input);
            prop_assert_eq!(clean_text(&once), once);
        }

        #[test]
        fn prop_normalize_markup_idempotent(input in "[<>!\\[\\]CDATix:a-z\\- ]{0,120}") {
            let once = normalize_markup(&input);
            prop_assert_eq!(normalize_markup(&once), once);
        }
    }
}

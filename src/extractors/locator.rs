// src/extractors/locator.rs
//! Selects the primary content region of a full-submission container.
//!
//! A container holds an SGML header and one `<DOCUMENT>` block per filed
//! document (the form itself, exhibits, XBRL, graphics). Which part carries
//! the form body varies by issuer and year, so selection runs a tiered
//! strategy chosen per ticker through [`HandlerRegistry`].

use crate::extractors::normalize::normalize_markup;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

// --- Regex Patterns (Lazy Static) ---
static DOCUMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<DOCUMENT>(.*?)</DOCUMENT>").expect("Failed to compile DOCUMENT_RE")
});
// TYPE is an unterminated SGML field; it runs to end of line or the next tag.
static TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<TYPE>([^<\r\n]*)").expect("Failed to compile TYPE_RE"));
static TEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<TEXT>(.*?)</TEXT>").expect("Failed to compile TEXT_RE"));
static HTML_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<html[\s>]").expect("Failed to compile HTML_OPEN_RE"));

const HTML_CLOSE: &str = "</html>";

/// Issuers whose filings are large, single cohesive HTML documents.
pub const LARGE_CAP_TICKERS: &[&str] = &[
    "AAPL", "MSFT", "AMZN", "GOOGL", "GOOG", "META", "TSLA", "BRK.A", "BRK.B", "JPM", "V", "PG",
    "UNH", "HD", "MA", "BAC", "XOM", "DIS", "NVDA", "PYPL", "ADBE", "INTC", "CMCSA", "PFE", "WMT",
    "CRM", "NFLX", "VZ", "ABT", "KO",
];

/// Issuers that get the most defensive handler regardless of form type.
pub const SINGLE_ISSUER_TICKERS: &[&str] = &["TSLA"];

// --- Data Structures ---

/// How the content region was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// `<html>` … `</html>` span
    Html,
    /// Body of an embedded document's `<TEXT>` block
    Text,
    /// Whole normalized container, the enhanced handlers' last resort
    Cleaned,
}

/// The body used for section parsing. Exactly one per filing.
#[derive(Debug, Clone)]
pub struct ContentRegion {
    pub kind: RegionKind,
    pub body: String,
}

impl ContentRegion {
    fn new(kind: RegionKind, body: impl Into<String>) -> Self {
        Self { kind, body: body.into() }
    }

    /// True when the region carries HTML markup worth walking element by element.
    pub fn is_markup(&self) -> bool {
        self.kind == RegionKind::Html || HTML_OPEN_RE.is_match(&self.body)
    }
}

/// One `<DOCUMENT>` block of a container.
#[derive(Debug, Clone)]
pub struct EmbeddedDocument<'a> {
    /// Declared TYPE, trimmed (empty when missing)
    pub doc_type: &'a str,
    /// Entire block between the document markers
    pub raw: &'a str,
    /// `<TEXT>` body, if present
    pub text: Option<&'a str>,
}

/// Splits a container into its embedded documents, in order.
pub fn embedded_documents(container: &str) -> Vec<EmbeddedDocument<'_>> {
    DOCUMENT_RE
        .captures_iter(container)
        .filter_map(|caps| caps.get(1))
        .map(|block| {
            let raw = block.as_str();
            let doc_type = TYPE_RE
                .captures(raw)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim())
                .unwrap_or("");
            let text = TEXT_RE
                .captures(raw)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str());
            EmbeddedDocument { doc_type, raw, text }
        })
        .collect()
}

/// Finds the span from the first `<html` to the last `</html>`, inclusive.
pub fn html_root_span(content: &str) -> Option<&str> {
    let start = HTML_OPEN_RE.find(content)?.start();
    // ASCII lowercasing keeps byte offsets aligned with `content`.
    let end = content.to_ascii_lowercase().rfind(HTML_CLOSE)? + HTML_CLOSE.len();
    if end > start {
        Some(&content[start..end])
    } else {
        None
    }
}

// --- Handler routing ---

/// Selection strategy applied to one issuer's filings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerVariant {
    /// HTML root, then TEXT of the first document of the requested type
    Generic,
    /// Normalize, then HTML root, then typed TEXT, then cleaned container
    LargeCap,
    /// Normalize, then exact TYPE, section markers, HTML root, cleaned container
    SingleIssuer,
}

/// Ticker to handler lookup table.
#[derive(Debug, Clone)]
pub struct HandlerRegistry {
    routes: HashMap<String, HandlerVariant>,
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_lists(
            LARGE_CAP_TICKERS.iter().map(|t| t.to_string()).collect(),
            SINGLE_ISSUER_TICKERS.iter().map(|t| t.to_string()).collect(),
        )
    }
}

impl HandlerRegistry {
    pub fn with_lists(large_cap: Vec<String>, single_issuer: Vec<String>) -> Self {
        let mut registry = Self { routes: HashMap::new() };
        for ticker in large_cap {
            registry.register(&ticker, HandlerVariant::LargeCap);
        }
        // Single-issuer routes win over large-cap membership.
        for ticker in single_issuer {
            registry.register(&ticker, HandlerVariant::SingleIssuer);
        }
        registry
    }

    pub fn register(&mut self, ticker: &str, variant: HandlerVariant) {
        self.routes.insert(ticker.trim().to_uppercase(), variant);
    }

    pub fn variant_for(&self, ticker: &str) -> HandlerVariant {
        self.routes
            .get(&ticker.trim().to_uppercase())
            .copied()
            .unwrap_or(HandlerVariant::Generic)
    }

    pub fn large_cap_tickers(&self) -> Vec<String> {
        self.tickers_for(HandlerVariant::LargeCap)
    }

    pub fn single_issuer_tickers(&self) -> Vec<String> {
        self.tickers_for(HandlerVariant::SingleIssuer)
    }

    fn tickers_for(&self, variant: HandlerVariant) -> Vec<String> {
        let mut tickers: Vec<String> = self
            .routes
            .iter()
            .filter(|(_, v)| **v == variant)
            .map(|(t, _)| t.clone())
            .collect();
        tickers.sort();
        tickers
    }
}

/// Picks the content region of `container` for `form_type` using `variant`.
pub fn locate_region(container: &str, form_type: &str, variant: HandlerVariant) -> Option<ContentRegion> {
    match variant {
        HandlerVariant::Generic => locate_generic(container, form_type),
        HandlerVariant::LargeCap => Some(locate_large_cap(container, form_type)),
        HandlerVariant::SingleIssuer => Some(locate_single_issuer(container, form_type)),
    }
}

fn locate_generic(container: &str, form_type: &str) -> Option<ContentRegion> {
    if let Some(html) = html_root_span(container) {
        tracing::info!("Selected HTML root span ({} bytes)", html.len());
        return Some(ContentRegion::new(RegionKind::Html, html));
    }

    let text = embedded_documents(container)
        .into_iter()
        .filter(|doc| doc.doc_type.starts_with(form_type))
        .find_map(|doc| doc.text)?;
    tracing::info!("Selected TEXT body of {} document ({} bytes)", form_type, text.len());
    Some(ContentRegion::new(RegionKind::Text, text))
}

fn locate_large_cap(container: &str, form_type: &str) -> ContentRegion {
    let content = normalize_markup(container);

    if let Some(html) = html_root_span(&content) {
        tracing::info!("Large-cap handler selected HTML root span ({} bytes)", html.len());
        return ContentRegion::new(RegionKind::Html, html);
    }

    let typed_text = embedded_documents(&content)
        .into_iter()
        .filter(|doc| doc.doc_type.starts_with(form_type))
        .find_map(|doc| doc.text);
    if let Some(text) = typed_text {
        if let Some(html) = html_root_span(text) {
            return ContentRegion::new(RegionKind::Html, html);
        }
        return ContentRegion::new(RegionKind::Text, text);
    }

    tracing::warn!("Could not extract specific {} content, using cleaned container", form_type);
    ContentRegion::new(RegionKind::Cleaned, content)
}

fn locate_single_issuer(container: &str, form_type: &str) -> ContentRegion {
    let content = normalize_markup(container);
    let documents = embedded_documents(&content);

    let exact = documents
        .iter()
        .filter(|doc| doc.doc_type == form_type)
        .find_map(|doc| doc.text);
    if let Some(text) = exact {
        tracing::info!("Found exact {} document ({} bytes)", form_type, text.len());
        return ContentRegion::new(RegionKind::Text, text);
    }

    let marked = documents
        .iter()
        .filter(|doc| has_section_markers(doc.raw))
        .find_map(|doc| doc.text);
    if let Some(text) = marked {
        tracing::info!("Found likely {} content based on section markers", form_type);
        return ContentRegion::new(RegionKind::Text, text);
    }

    if let Some(html) = html_root_span(&content) {
        tracing::info!("Extracted HTML root span as fallback ({} bytes)", html.len());
        return ContentRegion::new(RegionKind::Html, html);
    }

    tracing::warn!("Could not find proper HTML/TEXT section, using cleaned container");
    ContentRegion::new(RegionKind::Cleaned, content)
}

// Business (10-K) or financial statement (10-Q) markers next to an Item 1 reference.
fn has_section_markers(raw: &str) -> bool {
    let lower = raw.to_lowercase();
    lower.contains("item 1") && (lower.contains("business") || lower.contains("financial statements"))
}

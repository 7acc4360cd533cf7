// src/extractors/metadata.rs
//! Recovers the registrant's CIK and company name.
//!
//! The SGML `<SEC-HEADER>` block is authoritative. When it is missing or
//! incomplete the parsed document body is searched instead: a numeric
//! token near the cover page for the CIK, the `<title>` (or a node naming
//! the company/registrant) for the name.

use crate::extractors::normalize::clean_text;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{node::Node, ElementRef, Html, Selector};
use serde::Serialize;

pub const NOT_FOUND: &str = "Not Found";

static SEC_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<SEC-HEADER>(.*?)</SEC-HEADER>").expect("Failed to compile SEC_HEADER_RE")
});
static IX_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)</?ix:.*?>").expect("Failed to compile IX_TAG_RE"));
static CIK_FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:CENTRAL INDEX KEY|CIK Number|CIK):\s*0*(\d{1,10})")
        .expect("Failed to compile CIK_FIELD_RE")
});
static COMPANY_FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)(?:COMPANY CONFORMED NAME|COMPANY NAME):[ \t]*(.*?)\r?$")
        .expect("Failed to compile COMPANY_FIELD_RE")
});
// Names ending in an accession-number style suffix are filer artifacts, not company names.
static ACCESSION_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-\d{8}$").expect("Failed to compile ACCESSION_SUFFIX_RE"));
static COVER_PAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Cover Page|Form 10-K Summary|Exact name of registrant")
        .expect("Failed to compile COVER_PAGE_RE")
});
static NUMERIC_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,10}$").expect("Failed to compile NUMERIC_TOKEN_RE"));
static COMPANY_MENTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:Company|Registrant)\b").expect("Failed to compile COMPANY_MENTION_RE")
});

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("Failed to compile TITLE_SELECTOR"));

const COVER_CONTAINERS: &[&str] = &["div", "p", "table", "section"];

/// Filing-level identification. Built once per extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    /// 10-digit zero-padded CIK, or [`NOT_FOUND`]
    pub cik: String,
    /// Conformed company name, or [`NOT_FOUND`]
    pub company: String,
    pub ticker: String,
    pub form: String,
}

impl Metadata {
    pub fn unresolved(ticker: &str, form_type: &str) -> Self {
        Self {
            cik: NOT_FOUND.to_string(),
            company: NOT_FOUND.to_string(),
            ticker: ticker.to_string(),
            form: form_type.to_string(),
        }
    }
}

/// Resolves metadata from the container header, then from `document` for
/// whatever the header did not provide.
pub fn extract_metadata(document: &Html, container: &str, ticker: &str, form_type: &str) -> Metadata {
    let mut metadata = Metadata::unresolved(ticker, form_type);

    if let Some(header) = SEC_HEADER_RE.captures(container).and_then(|c| c.get(1)) {
        let header_text = IX_TAG_RE.replace_all(header.as_str(), "");
        tracing::debug!("SEC-HEADER found ({} bytes)", header_text.len());

        if let Some(cik) = cik_from_header(&header_text) {
            metadata.cik = cik;
        }
        if let Some(company) = company_from_header(&header_text) {
            metadata.company = company;
        }
    } else {
        tracing::debug!("No SEC-HEADER block in container");
    }

    if metadata.cik == NOT_FOUND {
        match cik_from_cover_page(document) {
            Some(cik) => {
                tracing::info!("Recovered CIK {} from cover page", cik);
                metadata.cik = cik;
            }
            None => tracing::warn!("CIK not found for {} {}", ticker, form_type),
        }
    }

    if metadata.company == NOT_FOUND {
        match company_from_title(document) {
            Some(company) => {
                tracing::info!("Recovered company name '{}' from document title", company);
                metadata.company = company;
            }
            None => tracing::warn!("Company name not found for {} {}", ticker, form_type),
        }
    }

    metadata
}

/// Left-pads a run of digits to the 10-digit CIK form.
pub fn pad_cik(digits: &str) -> String {
    format!("{:0>10}", digits)
}

fn cik_from_header(header_text: &str) -> Option<String> {
    let digits = CIK_FIELD_RE.captures(header_text)?.get(1)?.as_str();
    Some(pad_cik(digits))
}

fn company_from_header(header_text: &str) -> Option<String> {
    let raw = COMPANY_FIELD_RE.captures(header_text)?.get(1)?.as_str();
    accept_company_name(clean_text(raw.trim()))
}

fn accept_company_name(name: String) -> Option<String> {
    if ACCESSION_SUFFIX_RE.is_match(&name) || name.chars().count() <= 3 {
        tracing::debug!("Rejected company name candidate '{}'", name);
        return None;
    }
    Some(name)
}

fn cik_from_cover_page(document: &Html) -> Option<String> {
    let cover = document.root_element().descendants().find(|node| match node.value() {
        Node::Text(text) => COVER_PAGE_RE.is_match(text),
        _ => false,
    })?;

    let container = cover
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| COVER_CONTAINERS.contains(&el.value().name()))?;

    container
        .text()
        .map(str::trim)
        .find(|token| NUMERIC_TOKEN_RE.is_match(token))
        .map(pad_cik)
}

fn company_from_title(document: &Html) -> Option<String> {
    let title_text = match document.select(&TITLE_SELECTOR).next() {
        Some(title) => title.text().collect::<String>(),
        None => document
            .root_element()
            .descendants()
            .find_map(|node| match node.value() {
                Node::Text(text) if COMPANY_MENTION_RE.is_match(text) => Some(text.to_string()),
                _ => None,
            })?,
    };

    let cleaned = clean_text(&title_text);
    let name = cleaned.split("Form").next().unwrap_or_default().trim().to_string();
    accept_company_name(name)
}

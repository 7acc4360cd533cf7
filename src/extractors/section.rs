// src/extractors/section.rs

// --- Imports ---
use crate::extractors::normalize::clean_text;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{node::Node, ElementRef, Html, Selector};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// --- CSS Selectors (Lazy Static) ---
// Elements whose own text may be a bare "TABLE OF CONTENTS" style heading
static TOC_HEADING_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1, h2, h3, h4, div, p, td").expect("Failed to compile TOC_HEADING_SELECTOR")
});

// Rows/cells/links inside a ToC container that may hold one "Item N. Title" line
static TOC_ITEM_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p, a, tr, li, div, td").expect("Failed to compile TOC_ITEM_SELECTOR")
});

// Ancestors that bound a ToC
const TOC_CONTAINERS: &[&str] = &["div", "p", "table", "section", "ul", "ol", "td", "tr"];

// Text inside these never contributes to sections
const SKIPPED_PARENTS: &[&str] = &["script", "style"];

// --- Regex Patterns for Text Matching (Lazy Static) ---
static TOC_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Table of Contents").expect("Failed to compile TOC_MARKER_RE"));

static TOC_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:TABLE OF CONTENTS|INDEX TO|INDEX|CONTENTS|Form 10-K)\s*$")
        .expect("Failed to compile TOC_HEADING_RE")
});

static TOC_ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^\s*ITEM\s+(\d+[A-Za-z]?)[.\s]+(.+)$").expect("Failed to compile TOC_ITEM_RE")
});

static SECTION_START_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^ITEM\s+(\d+[A-Z]?)\s*[.:]?\s*(.*)").expect("Failed to compile SECTION_START_RE")
});

// ToC titles at or beyond this length are body text, not titles
const MAX_TOC_TITLE_CHARS: usize = 100;

// --- Fallback tables keyed by form type ---
static DEFAULT_TOCS: &[(&str, &[(&str, &str)])] = &[
    (
        "10-Q",
        &[
            ("item_1", "Financial Statements"),
            ("item_2", "Management's Discussion and Analysis"),
            ("item_3", "Quantitative and Qualitative Disclosures About Market Risk"),
            ("item_4", "Controls and Procedures"),
        ],
    ),
    (
        "10-K",
        &[
            ("item_1", "Business"),
            ("item_1a", "Risk Factors"),
            ("item_7", "Management's Discussion and Analysis"),
            ("item_8", "Financial Statements and Supplementary Data"),
        ],
    ),
];

/// How a positional partition labels its slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionLabels {
    /// item_1, item_2, item_3, ...
    Numbered,
    /// item_1, item_1a, item_1b, ...
    Lettered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionScheme {
    pub slices: usize,
    pub labels: PartitionLabels,
}

static PARTITION_SCHEMES: &[(&str, PartitionScheme)] = &[(
    "10-Q",
    PartitionScheme { slices: 4, labels: PartitionLabels::Numbered },
)];

const DEFAULT_PARTITION: PartitionScheme =
    PartitionScheme { slices: 8, labels: PartitionLabels::Lettered };

// --- Data Structures ---

/// One recovered (or synthesized) table of contents line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub item: String,  // e.g., "item_1a"
    pub title: String, // e.g., "Risk Factors"
}

/// One section's cleaned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub key: String,
    pub text: String,
}

/// What to do when an item id starts a second section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateItemPolicy {
    /// Later text replaces the stored text; the key keeps its position.
    #[default]
    Replace,
    /// Later text is stored under `item_<id>#<n>`.
    KeepBoth,
}

impl FromStr for DuplicateItemPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "keep-both" | "keep_both" => Ok(Self::KeepBoth),
            other => Err(format!("Unknown duplicate item policy '{}'", other)),
        }
    }
}

impl fmt::Display for DuplicateItemPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace => write!(f, "replace"),
            Self::KeepBoth => write!(f, "keep-both"),
        }
    }
}

/// Insertion-ordered section map with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    sections: Vec<Section>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `text` under `key`, resolving a repeated key per `policy`.
    pub fn insert(&mut self, key: String, text: String, policy: DuplicateItemPolicy) {
        let Some(existing) = self.sections.iter().position(|s| s.key == key) else {
            self.sections.push(Section { key, text });
            return;
        };

        match policy {
            DuplicateItemPolicy::Replace => {
                tracing::warn!(
                    "Item '{}' seen again; replacing {} chars of earlier text",
                    key,
                    self.sections[existing].text.len()
                );
                self.sections[existing].text = text;
            }
            DuplicateItemPolicy::KeepBoth => {
                let mut n = 2;
                while self.get(&format!("{}#{}", key, n)).is_some() {
                    n += 1;
                }
                let alias = format!("{}#{}", key, n);
                tracing::warn!("Item '{}' seen again; keeping it as '{}'", key, alias);
                self.sections.push(Section { key: alias, text });
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.sections.iter().find(|s| s.key == key).map(|s| s.text.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl<'a> IntoIterator for &'a SectionMap {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Table of contents plus sections for one filing.
#[derive(Debug, Clone, Default)]
pub struct ParsedSections {
    pub toc: Vec<TocEntry>,
    pub sections: SectionMap,
}

/// Normalizes an item id ("1A") into its section key ("item_1a").
pub fn item_key(id: &str) -> String {
    format!("item_{}", id.to_lowercase())
}

// --- Main Extractor Structure ---
pub struct SectionExtractor {
    duplicate_policy: DuplicateItemPolicy,
    min_partition_chars: usize,
}

impl SectionExtractor {
    pub fn new(duplicate_policy: DuplicateItemPolicy, min_partition_chars: usize) -> Self {
        Self { duplicate_policy, min_partition_chars }
    }

    /// Recovers the ToC and the section bodies of `document`.
    ///
    /// `markup` selects how headers are spotted: per text node for HTML,
    /// per line of each text node for plain-text bodies.
    pub fn extract(&self, document: &Html, markup: bool, form_type: &str) -> ParsedSections {
        let toc = self.recover_toc(document, form_type);

        let mut sections = self.extract_bodies(document, markup);
        if sections.is_empty() {
            tracing::warn!("No sections parsed, creating generic structure for {}", form_type);
            sections = self.positional_partition(document, form_type);
        }

        tracing::info!("Parsed {} ToC entries and {} sections", toc.len(), sections.len());
        ParsedSections { toc, sections }
    }

    /// ToC entries in document order, or the form type's default list.
    pub fn recover_toc(&self, document: &Html, form_type: &str) -> Vec<TocEntry> {
        let mut entries: Vec<TocEntry> = Vec::new();

        for container in toc_containers(document) {
            for element in container.select(&TOC_ITEM_SELECTOR) {
                let text = element_text(element);
                let Some(caps) = TOC_ITEM_RE.captures(&text) else {
                    continue;
                };

                let item = item_key(&caps[1]);
                let title = clean_text(&caps[2]);
                if title.is_empty() || title.chars().count() >= MAX_TOC_TITLE_CHARS {
                    continue;
                }
                // Nested rows/cells repeat the same line; first one wins.
                if entries.iter().any(|e| e.item == item) {
                    continue;
                }
                tracing::trace!("ToC entry {} -> '{}'", item, title);
                entries.push(TocEntry { item, title });
            }
        }

        if entries.is_empty() {
            tracing::warn!("No TOC found, generating generic structure for {}", form_type);
            return default_toc(form_type);
        }
        entries
    }

    /// Splits the text of `document` at every `ITEM <id>` header.
    pub fn extract_bodies(&self, document: &Html, markup: bool) -> SectionMap {
        let mut sections = SectionMap::new();
        let mut current: Option<String> = None;
        let mut content: Vec<&str> = Vec::new();

        for node_text in text_nodes(document) {
            let units: Vec<&str> = if markup {
                vec![node_text]
            } else {
                node_text.lines().collect()
            };

            for unit in units.into_iter().map(str::trim).filter(|u| !u.is_empty()) {
                if let Some(caps) = SECTION_START_RE.captures(unit) {
                    self.flush(&mut sections, current.take(), &content);
                    content.clear();
                    current = caps.get(1).map(|id| item_key(id.as_str()));
                    content.push(unit);
                } else if current.is_some() {
                    content.push(unit);
                }
            }
        }
        self.flush(&mut sections, current, &content);

        sections
    }

    fn flush(&self, sections: &mut SectionMap, key: Option<String>, content: &[&str]) {
        let Some(key) = key else {
            return;
        };
        if content.is_empty() {
            return;
        }
        // One line per fragment so page-number fragments are dropped by cleaning.
        let cleaned = clean_text(&content.join("\n"));
        if cleaned.is_empty() {
            tracing::debug!("Section {} cleaned to nothing, skipping", key);
            return;
        }
        sections.insert(key, cleaned, self.duplicate_policy);
    }

    /// Slices the whole cleaned body into equal character ranges.
    pub fn positional_partition(&self, document: &Html, form_type: &str) -> SectionMap {
        let full_text = clean_text(&text_nodes(document).collect::<Vec<_>>().join(" "));
        let total_chars = full_text.chars().count();
        let scheme = partition_scheme(form_type);
        let mut sections = SectionMap::new();

        // Only bodies strictly longer than the threshold are sliced.
        if total_chars <= self.min_partition_chars || total_chars < scheme.slices {
            tracing::warn!(
                "Body has {} chars, not above partition threshold of {}; no sections produced",
                total_chars,
                self.min_partition_chars
            );
            return sections;
        }

        // Byte offset of every char boundary, plus the end of the string.
        let boundaries: Vec<usize> = full_text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(full_text.len()))
            .collect();
        let slice_chars = total_chars / scheme.slices;

        for i in 0..scheme.slices {
            let start = boundaries[i * slice_chars];
            let end = if i + 1 < scheme.slices {
                boundaries[(i + 1) * slice_chars]
            } else {
                full_text.len()
            };
            sections.insert(
                partition_label(scheme.labels, i),
                full_text[start..end].to_string(),
                DuplicateItemPolicy::Replace,
            );
        }
        sections
    }
}

/// Default ToC entries for `form_type`; empty for forms without a template.
pub fn default_toc(form_type: &str) -> Vec<TocEntry> {
    DEFAULT_TOCS
        .iter()
        .find(|(form, _)| *form == form_type)
        .map(|(_, entries)| {
            entries
                .iter()
                .map(|(item, title)| TocEntry { item: item.to_string(), title: title.to_string() })
                .collect()
        })
        .unwrap_or_default()
}

pub fn partition_scheme(form_type: &str) -> PartitionScheme {
    PARTITION_SCHEMES
        .iter()
        .find(|(form, _)| *form == form_type)
        .map(|(_, scheme)| *scheme)
        .unwrap_or(DEFAULT_PARTITION)
}

fn partition_label(labels: PartitionLabels, index: usize) -> String {
    match labels {
        PartitionLabels::Numbered => format!("item_{}", index + 1),
        PartitionLabels::Lettered if index == 0 => "item_1".to_string(),
        PartitionLabels::Lettered => format!("item_1{}", (b'a' + (index - 1) as u8) as char),
    }
}

/// Text nodes of `document` in order, skipping script/style bodies.
fn text_nodes(document: &Html) -> impl Iterator<Item = &str> {
    document.root_element().descendants().filter_map(|node| {
        let Node::Text(text) = node.value() else {
            return None;
        };
        let skipped = node
            .parent()
            .and_then(ElementRef::wrap)
            .map(|parent| SKIPPED_PARENTS.contains(&parent.value().name()))
            .unwrap_or(false);
        if skipped {
            None
        } else {
            Some(&**text)
        }
    })
}

/// An element's text with each fragment trimmed and glued together.
fn element_text(element: ElementRef) -> String {
    element.text().map(str::trim).filter(|t| !t.is_empty()).collect()
}

/// Containers of every ToC candidate, in document order.
///
/// Candidates are text mentioning "Table of Contents"; failing that,
/// elements whose whole text is a ToC-like heading.
fn toc_containers(document: &Html) -> Vec<ElementRef<'_>> {
    let mut containers: Vec<ElementRef> = document
        .root_element()
        .descendants()
        .filter(|node| matches!(node.value(), Node::Text(text) if TOC_MARKER_RE.is_match(text)))
        .filter_map(|node| {
            node.ancestors()
                .filter_map(ElementRef::wrap)
                .find(|el| TOC_CONTAINERS.contains(&el.value().name()))
        })
        .collect();

    if containers.is_empty() {
        containers = document
            .select(&TOC_HEADING_SELECTOR)
            .filter(|el| TOC_HEADING_RE.is_match(&el.text().collect::<String>()))
            .filter_map(|el| {
                el.ancestors()
                    .filter_map(ElementRef::wrap)
                    .find(|a| TOC_CONTAINERS.contains(&a.value().name()))
            })
            .collect();
    }

    // Several markers can share one container.
    let mut seen = Vec::new();
    containers.retain(|c| {
        if seen.contains(&c.id()) {
            false
        } else {
            seen.push(c.id());
            true
        }
    });
    tracing::debug!("Found {} ToC container(s)", containers.len());
    containers
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> SectionExtractor {
        SectionExtractor::new(DuplicateItemPolicy::Replace, 1000)
    }

    const TOC_HTML: &str = r##"
        <html><body>
        <div class="cover"><p>Apple Inc.</p></div>
        <div><font>TABLE OF CONTENTS</font>
        <table>
          <tr><td><a href="#i1">Item 1.</a></td><td><a href="#i1">Business</a></td><td>1</td></tr>
          <tr><td><a href="#i1a">Item 1A.</a></td><td>Risk Factors</td><td>5</td></tr>
          <tr><td><a href="#i7">Item 7.</a></td><td>Management's Discussion and Analysis</td><td>20</td></tr>
        </table>
        </div>
        </body></html>"##;

    #[test]
    fn test_recover_toc_from_table() {
        let doc = Html::parse_document(TOC_HTML);
        let toc = extractor().recover_toc(&doc, "10-K");
        let items: Vec<&str> = toc.iter().map(|e| e.item.as_str()).collect();
        assert_eq!(items, vec!["item_1", "item_1a", "item_7"]);
        assert!(toc[0].title.starts_with("Business"), "title was '{}'", toc[0].title);
        assert!(toc[1].title.starts_with("Risk Factors"));
    }

    #[test]
    fn test_recover_toc_from_heading_without_marker_text() {
        let html = r#"<html><body><div><h2>INDEX</h2>
            <p>Item 2. Properties</p><p>Item 3. Legal Proceedings</p></div></body></html>"#;
        let doc = Html::parse_document(html);
        let toc = extractor().recover_toc(&doc, "10-K");
        assert_eq!(
            toc,
            vec![
                TocEntry { item: "item_2".into(), title: "Properties".into() },
                TocEntry { item: "item_3".into(), title: "Legal Proceedings".into() },
            ]
        );
    }

    #[test]
    fn test_toc_skips_long_titles() {
        let long_title = "word ".repeat(30);
        let html = format!(
            "<html><body><div><b>Table of Contents</b><p>Item 9. {}</p><p>Item 9A. Controls</p></div></body></html>",
            long_title
        );
        let doc = Html::parse_document(&html);
        let toc = extractor().recover_toc(&doc, "10-K");
        assert_eq!(toc, vec![TocEntry { item: "item_9a".into(), title: "Controls".into() }]);
    }

    #[test]
    fn test_default_toc_per_form_type() {
        let doc = Html::parse_document("<html><body><p>No structure</p></body></html>");
        let toc_10q = extractor().recover_toc(&doc, "10-Q");
        assert_eq!(toc_10q.len(), 4);
        assert_eq!(toc_10q[3].item, "item_4");

        let toc_10k = extractor().recover_toc(&doc, "10-K");
        let items: Vec<&str> = toc_10k.iter().map(|e| e.item.as_str()).collect();
        assert_eq!(items, vec!["item_1", "item_1a", "item_7", "item_8"]);

        assert!(extractor().recover_toc(&doc, "8-K").is_empty());
    }

    #[test]
    fn test_sections_split_on_item_headers() {
        let html = r#"<html><body>
            <p>Cover page text that precedes any item.</p>
            <p>ITEM 1. Business</p>
            <p>We design smartphones.</p>
            <p>12</p>
            <p>ITEM 1A. Risk Factors</p>
            <p>Supply chains can fail.</p>
            </body></html>"#;
        let doc = Html::parse_document(html);
        let sections = extractor().extract_bodies(&doc, true);

        let keys: Vec<&str> = sections.keys().collect();
        assert_eq!(keys, vec!["item_1", "item_1a"]);
        assert_eq!(sections.get("item_1"), Some("ITEM 1. Business We design smartphones."));
        assert_eq!(sections.get("item_1a"), Some("ITEM 1A. Risk Factors Supply chains can fail."));
    }

    #[test]
    fn test_plain_text_regions_match_per_line() {
        let text = "ANNUAL REPORT\nITEM 1. BUSINESS\nThe company sells widgets.\n\
                    ITEM 7: MANAGEMENT'S DISCUSSION\nRevenue grew.\n";
        let doc = Html::parse_document(text);

        let sections = extractor().extract_bodies(&doc, false);
        assert_eq!(sections.keys().collect::<Vec<_>>(), vec!["item_1", "item_7"]);
        assert_eq!(sections.get("item_7"), Some("ITEM 7: MANAGEMENT'S DISCUSSION Revenue grew."));

        // Matched per node, the single text node yields one section.
        let sections = extractor().extract_bodies(&doc, true);
        assert!(sections.is_empty(), "node starts with ANNUAL REPORT, not ITEM");
    }

    #[test]
    fn test_duplicate_item_replaces_by_default() {
        let html = "<html><body><p>Item 1. Business</p><p>toc echo</p>\
                    <p>Item 2. Properties</p><p>Offices.</p>\
                    <p>Item 1. Business</p><p>The real business text.</p></body></html>";
        let doc = Html::parse_document(html);
        let sections = extractor().extract_bodies(&doc, true);
        assert_eq!(sections.keys().collect::<Vec<_>>(), vec!["item_1", "item_2"]);
        assert_eq!(sections.get("item_1"), Some("Item 1. Business The real business text."));
    }

    #[test]
    fn test_duplicate_item_keep_both() {
        let html = "<html><body><p>Item 1. Business</p><p>toc echo</p>\
                    <p>Item 1. Business</p><p>The real business text.</p></body></html>";
        let doc = Html::parse_document(html);
        let sections = SectionExtractor::new(DuplicateItemPolicy::KeepBoth, 1000).extract_bodies(&doc, true);
        assert_eq!(sections.keys().collect::<Vec<_>>(), vec!["item_1", "item_1#2"]);
        assert_eq!(sections.get("item_1"), Some("Item 1. Business toc echo"));
    }

    #[test]
    fn test_script_and_style_text_ignored() {
        let html = "<html><head><style>p { color: red }</style></head><body>\
                    <p>Item 5. Market</p><script>var item = 'Item 6. fake';</script><p>Shares trade.</p></body></html>";
        let doc = Html::parse_document(html);
        let sections = extractor().extract_bodies(&doc, true);
        assert_eq!(sections.get("item_5"), Some("Item 5. Market Shares trade."));
        assert!(sections.get("item_6").is_none());
    }

    #[test]
    fn test_section_keys_are_lowercase() {
        let html = "<html><body><p>ITEM 7A. Market Risk</p><p>Rates.</p></body></html>";
        let doc = Html::parse_document(html);
        let sections = extractor().extract_bodies(&doc, true);
        for key in sections.keys() {
            assert!(key.starts_with("item_"));
            assert_eq!(key, key.to_lowercase());
        }
    }

    #[test]
    fn test_positional_partition_10q_quarters() {
        let body = "Lorem ipsum dolor sit amet. ".repeat(60);
        let html = format!("<html><body><p>{}</p></body></html>", body);
        let doc = Html::parse_document(&html);

        let parsed = extractor().extract(&doc, true, "10-Q");
        let keys: Vec<&str> = parsed.sections.keys().collect();
        assert_eq!(keys, vec!["item_1", "item_2", "item_3", "item_4"]);

        let full = clean_text(&body);
        let rebuilt: String = parsed.sections.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(rebuilt, full, "slices must be contiguous");

        let quarter = full.chars().count() / 4;
        for section in parsed.sections.iter().take(3) {
            assert_eq!(section.text.chars().count(), quarter);
        }
    }

    #[test]
    fn test_positional_partition_10k_lettered() {
        let body = "Sustainability disclosure sentence. ".repeat(40);
        let html = format!("<html><body><div>{}</div></body></html>", body);
        let doc = Html::parse_document(&html);
        let sections = extractor().positional_partition(&doc, "10-K");
        let keys: Vec<&str> = sections.keys().collect();
        assert_eq!(
            keys,
            vec!["item_1", "item_1a", "item_1b", "item_1c", "item_1d", "item_1e", "item_1f", "item_1g"]
        );
    }

    #[test]
    fn test_positional_partition_respects_minimum() {
        let doc = Html::parse_document("<html><body><p>Too short to split.</p></body></html>");
        assert!(extractor().positional_partition(&doc, "10-Q").is_empty());
        let lenient = SectionExtractor::new(DuplicateItemPolicy::Replace, 4);
        assert_eq!(lenient.positional_partition(&doc, "10-Q").len(), 4);
    }

    #[test]
    fn test_partition_threshold_is_exclusive() {
        let at_threshold = format!("<html><body><p>{}</p></body></html>", "a".repeat(1000));
        let doc = Html::parse_document(&at_threshold);
        assert!(extractor().positional_partition(&doc, "10-Q").is_empty());

        let above = format!("<html><body><p>{}</p></body></html>", "a".repeat(1001));
        let doc = Html::parse_document(&above);
        assert_eq!(extractor().positional_partition(&doc, "10-Q").len(), 4);
    }

    #[test]
    fn test_partition_handles_multibyte_text() {
        let body = "Überblick über Geschäftsjahr — 収益 ".repeat(50);
        let html = format!("<html><body><p>{}</p></body></html>", body);
        let doc = Html::parse_document(&html);
        let sections = extractor().positional_partition(&doc, "10-Q");
        let rebuilt: String = sections.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(rebuilt, clean_text(&body));
    }

    #[test]
    fn test_duplicate_policy_parsing() {
        assert_eq!("replace".parse::<DuplicateItemPolicy>(), Ok(DuplicateItemPolicy::Replace));
        assert_eq!("Keep-Both".parse::<DuplicateItemPolicy>(), Ok(DuplicateItemPolicy::KeepBoth));
        assert!("merge".parse::<DuplicateItemPolicy>().is_err());
        assert_eq!(DuplicateItemPolicy::KeepBoth.to_string(), "keep-both");
    }
}

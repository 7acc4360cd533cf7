// src/pipeline.rs
//! Runs one filing through fetch, region selection, parsing and chunking,
//! and assembles the structured and chunked views.

use crate::config::ExtractorConfig;
use crate::edgar::{FilingFetcher, FilingQuery};
use crate::extractors::chunker::token_count;
use crate::extractors::{
    extract_metadata, locate_region, Chunker, HandlerRegistry, Metadata, SectionExtractor, SectionMap,
    TocEntry,
};
use crate::storage::{newest_of, FilingStore};
use crate::utils::error::ExtractError;
use scraper::Html;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::time::Duration;

/// Reported whenever no usable filing body could be obtained.
pub const UNPROCESSABLE_FILING: &str = "Filing could not be processed. Check ticker, form type, or year.";

/// Metadata, ToC and every section's text, flattened into one JSON object.
#[derive(Debug, Clone)]
pub struct StructuredView {
    pub metadata: Metadata,
    pub table_of_contents: Vec<TocEntry>,
    pub sections: SectionMap,
}

#[derive(Serialize)]
struct SectionBody<'a> {
    text: &'a str,
}

impl Serialize for StructuredView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5 + self.sections.len()))?;
        map.serialize_entry("cik", &self.metadata.cik)?;
        map.serialize_entry("company", &self.metadata.company)?;
        map.serialize_entry("ticker", &self.metadata.ticker)?;
        map.serialize_entry("form", &self.metadata.form)?;
        map.serialize_entry("table_of_contents", &self.table_of_contents)?;
        for section in &self.sections {
            map.serialize_entry(&section.key, &SectionBody { text: &section.text })?;
        }
        map.end()
    }
}

/// One indexable slice of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// `<section>_<ordinal>`, ordinal counted per section from zero
    pub id: String,
    pub text: String,
    pub ticker: String,
    pub section: String,
    /// `<ticker>_<form>_<year>`
    pub source: String,
    pub tokens: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChunkedView {
    pub metadata: Metadata,
    pub chunks: Vec<Chunk>,
}

/// Result of one extraction. Serializes as `{structured, chunked}` or `{error}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ExtractionOutcome {
    Success {
        structured: StructuredView,
        chunked: ChunkedView,
    },
    Failure {
        error: String,
    },
}

impl ExtractionOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure { error: message.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

pub struct Pipeline {
    fetcher: Box<dyn FilingFetcher>,
    store: FilingStore,
    handlers: HandlerRegistry,
    sections: SectionExtractor,
    chunker: Chunker,
    fetch_timeout: Duration,
    min_chunk_chars: usize,
}

impl Pipeline {
    pub fn new(config: &ExtractorConfig, fetcher: Box<dyn FilingFetcher>) -> Self {
        Self {
            fetcher,
            store: FilingStore::new(&config.download_root),
            handlers: config.handlers.clone(),
            sections: SectionExtractor::new(config.duplicate_items, config.min_partition_chars),
            chunker: Chunker::new(config.max_tokens, config.overlap),
            fetch_timeout: config.fetch_timeout,
            min_chunk_chars: config.min_chunk_chars,
        }
    }

    /// Extracts `form_type` for fiscal `year` of `ticker`. Never fails: every
    /// error is logged and reported as [`ExtractionOutcome::Failure`].
    pub async fn extract(&self, ticker: &str, form_type: &str, year: i32) -> ExtractionOutcome {
        let ticker = ticker.trim();
        let form_type = form_type.trim();
        tracing::info!("Starting extraction for {} {} {}", ticker, form_type, year);

        let query = match FilingQuery::for_fiscal_year(ticker, form_type, year) {
            Ok(query) => query,
            Err(e) => {
                tracing::error!("Error in extraction: {}", e);
                return ExtractionOutcome::failure(format!("Error processing SEC filing: {}", e));
            }
        };

        let container = match self.load_container(&query).await {
            Ok(container) => container,
            Err(e) => {
                tracing::error!("Error fetching filing for {} {} {}: {}", ticker, form_type, year, e);
                return ExtractionOutcome::failure(UNPROCESSABLE_FILING);
            }
        };

        match self.assemble(&container, ticker, form_type, year) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("No usable content for {} {} {}: {}", ticker, form_type, year, e);
                ExtractionOutcome::failure(UNPROCESSABLE_FILING)
            }
        }
    }

    /// Fetches (bounded by the configured timeout) and reads the newest
    /// container the fetch selected, or the newest stored one when it selected nothing.
    async fn load_container(&self, query: &FilingQuery) -> Result<String, ExtractError> {
        tracing::info!(
            "Fetching {} {} filed between {} and {}",
            query.ticker,
            query.form_type,
            query.after,
            query.before
        );
        let fetched = tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch(query, &self.store))
            .await
            .map_err(|_| ExtractError::FetchTimeout(self.fetch_timeout))??;
        let newest = if fetched.is_empty() {
            tracing::warn!("Fetch returned no filings, looking for previously downloaded ones");
            self.store.newest_submission(&query.ticker, &query.form_type)?
        } else {
            newest_of(fetched)?
        };

        let path = newest.ok_or_else(|| {
            ExtractError::FilingNotFound(format!(
                "{} {} between {} and {}",
                query.ticker, query.form_type, query.after, query.before
            ))
        })?;
        tracing::info!("Reading submission {}", path.display());
        Ok(self.store.read_submission(&path)?)
    }

    // Everything after the fetch is synchronous; the parsed DOM never crosses an await.
    fn assemble(
        &self,
        container: &str,
        ticker: &str,
        form_type: &str,
        year: i32,
    ) -> Result<ExtractionOutcome, ExtractError> {
        let variant = self.handlers.variant_for(ticker);
        tracing::debug!("Using {:?} handler for {}", variant, ticker);

        let region = locate_region(container, form_type, variant)
            .ok_or_else(|| ExtractError::NoContentRegion(format!("{} {} {}", ticker, form_type, year)))?;

        // One parse shared by metadata and sections.
        let document = Html::parse_document(&region.body);
        let metadata = extract_metadata(&document, container, ticker, form_type);
        let parsed = self.sections.extract(&document, region.is_markup(), form_type);

        let source = format!("{}_{}_{}", ticker, form_type, year);
        let chunks = self.chunk_sections(&parsed.sections, ticker, &source);
        tracing::info!(
            "Extracted {} sections and {} chunks for {}",
            parsed.sections.len(),
            chunks.len(),
            source
        );

        Ok(ExtractionOutcome::Success {
            structured: StructuredView {
                metadata: metadata.clone(),
                table_of_contents: parsed.toc,
                sections: parsed.sections,
            },
            chunked: ChunkedView { metadata, chunks },
        })
    }

    fn chunk_sections(&self, sections: &SectionMap, ticker: &str, source: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for section in sections {
            for (i, text) in self.chunker.chunk_text(&section.text).into_iter().enumerate() {
                if text.trim().chars().count() < self.min_chunk_chars {
                    tracing::warn!("Skipping empty or too-short chunk for {}: '{}'", section.key, text);
                    continue;
                }
                chunks.push(Chunk {
                    id: format!("{}_{}", section.key, i),
                    tokens: token_count(&text),
                    text,
                    ticker: ticker.to_string(),
                    section: section.key.clone(),
                    source: source.to_string(),
                });
            }
        }
        chunks
    }
}

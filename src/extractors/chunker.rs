// src/extractors/chunker.rs
//! Sentence-aligned chunking with whole-sentence overlap.

use crate::utils::error::ExtractError;
use unicode_segmentation::UnicodeSegmentation;

/// Turns text into an ordered list of sentences.
pub trait SentenceSplitter: Send + Sync {
    fn split(&self, text: &str) -> Result<Vec<String>, ExtractError>;
}

/// UAX #29 sentence boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSentenceSplitter;

impl SentenceSplitter for UnicodeSentenceSplitter {
    fn split(&self, text: &str) -> Result<Vec<String>, ExtractError> {
        Ok(text
            .unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Whitespace-delimited word count.
pub fn token_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Greedy sentence packer.
pub struct Chunker<S = UnicodeSentenceSplitter> {
    splitter: S,
    max_tokens: usize,
    overlap: usize,
}

impl Chunker<UnicodeSentenceSplitter> {
    pub fn new(max_tokens: usize, overlap: usize) -> Self {
        Self::with_splitter(UnicodeSentenceSplitter, max_tokens, overlap)
    }
}

impl<S: SentenceSplitter> Chunker<S> {
    pub fn with_splitter(splitter: S, max_tokens: usize, overlap: usize) -> Self {
        Self { splitter, max_tokens, overlap }
    }

    /// Packs sentences into chunks of at most `max_tokens` words.
    ///
    /// A chunk that would overflow is closed and the next one starts with
    /// its last `overlap` sentences. A single sentence longer than the bound
    /// is kept whole. If segmentation fails the whole input becomes one
    /// chunk (none when blank).
    pub fn chunk_text(&self, text: &str) -> Vec<String> {
        match self.try_chunk(text) {
            Ok(chunks) => chunks,
            Err(e) => {
                tracing::error!("Error chunking text: {}, input: {}", e, preview(text));
                if text.trim().is_empty() {
                    Vec::new()
                } else {
                    vec![text.to_string()]
                }
            }
        }
    }

    fn try_chunk(&self, text: &str) -> Result<Vec<String>, ExtractError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let mut sentences = self.splitter.split(text)?;
        if sentences.is_empty() {
            tracing::warn!("No sentences tokenized, falling back to simple split: {}", preview(text));
            sentences = naive_sentences(text);
        }

        let mut chunks = Vec::new();
        let mut current: Vec<String> = Vec::new();
        let mut current_tokens = 0;

        for sentence in sentences {
            let tokens = token_count(&sentence);
            if current_tokens + tokens > self.max_tokens && !current.is_empty() {
                chunks.push(current.join(" "));
                let keep = self.overlap.min(current.len());
                current.drain(..current.len() - keep);
                current_tokens = current.iter().map(|s| token_count(s)).sum();
            }
            current.push(sentence);
            current_tokens += tokens;
        }
        if !current.is_empty() {
            chunks.push(current.join(" "));
        }

        tracing::debug!("Chunked text into {} chunks", chunks.len());
        Ok(chunks)
    }
}

// Split on ". " and give each piece its period back.
fn naive_sentences(text: &str) -> Vec<String> {
    text.split(". ")
        .filter(|s| !s.is_empty())
        .map(|s| format!("{}.", s))
        .collect()
}

fn preview(text: &str) -> &str {
    match text.char_indices().nth(50) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

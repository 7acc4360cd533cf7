// src/config.rs
//! Runtime settings for the extractor.
//!
//! Every value has a default; `SEC_CHUNKER_*` environment variables
//! override the defaults and CLI flags override both.

use crate::extractors::locator::HandlerRegistry;
use crate::extractors::section::DuplicateItemPolicy;
use crate::utils::AppError;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

// EDGAR rejects requests without a contact User-Agent.
const DEFAULT_USER_AGENT: &str = "sec_chunker admin@example.com";
// SEC asks for 10 requests/second max. Be conservative. >100ms delay.
const DEFAULT_REQUEST_DELAY_MS: u64 = 150;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 120;
const DEFAULT_DOWNLOAD_ROOT: &str = "./sec-edgar/sec-edgar-filings";

pub const DEFAULT_MAX_TOKENS: usize = 200;
pub const DEFAULT_OVERLAP: usize = 1;
pub const DEFAULT_MIN_CHUNK_CHARS: usize = 10;
pub const DEFAULT_MIN_PARTITION_CHARS: usize = 1000;

#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Root of the `<TICKER>/<form>/<accession>/full-submission.txt` tree
    pub download_root: PathBuf,
    pub user_agent: String,
    pub request_delay_ms: u64,
    /// Upper bound on the network fetch step
    pub fetch_timeout: Duration,
    pub max_tokens: usize,
    /// Sentences carried over into the next chunk
    pub overlap: usize,
    /// Chunks shorter than this after trimming are dropped
    pub min_chunk_chars: usize,
    /// Bodies of at most this many chars are not positionally partitioned
    pub min_partition_chars: usize,
    pub duplicate_items: DuplicateItemPolicy,
    pub handlers: HandlerRegistry,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            download_root: PathBuf::from(DEFAULT_DOWNLOAD_ROOT),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            max_tokens: DEFAULT_MAX_TOKENS,
            overlap: DEFAULT_OVERLAP,
            min_chunk_chars: DEFAULT_MIN_CHUNK_CHARS,
            min_partition_chars: DEFAULT_MIN_PARTITION_CHARS,
            duplicate_items: DuplicateItemPolicy::default(),
            handlers: HandlerRegistry::default(),
        }
    }
}

impl ExtractorConfig {
    /// Builds a config from defaults plus any `SEC_CHUNKER_*` variables.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(root) = lookup("SEC_CHUNKER_DOWNLOAD_ROOT") {
            config.download_root = PathBuf::from(root);
        }
        if let Some(agent) = lookup("SEC_CHUNKER_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(delay) = lookup("SEC_CHUNKER_REQUEST_DELAY_MS") {
            config.request_delay_ms = parse_var("SEC_CHUNKER_REQUEST_DELAY_MS", &delay)?;
        }
        if let Some(secs) = lookup("SEC_CHUNKER_FETCH_TIMEOUT_SECS") {
            config.fetch_timeout =
                Duration::from_secs(parse_var("SEC_CHUNKER_FETCH_TIMEOUT_SECS", &secs)?);
        }
        if let Some(max) = lookup("SEC_CHUNKER_MAX_TOKENS") {
            config.max_tokens = parse_var("SEC_CHUNKER_MAX_TOKENS", &max)?;
        }
        if let Some(overlap) = lookup("SEC_CHUNKER_OVERLAP") {
            config.overlap = parse_var("SEC_CHUNKER_OVERLAP", &overlap)?;
        }
        if let Some(min) = lookup("SEC_CHUNKER_MIN_CHUNK_CHARS") {
            config.min_chunk_chars = parse_var("SEC_CHUNKER_MIN_CHUNK_CHARS", &min)?;
        }
        if let Some(min) = lookup("SEC_CHUNKER_MIN_PARTITION_CHARS") {
            config.min_partition_chars = parse_var("SEC_CHUNKER_MIN_PARTITION_CHARS", &min)?;
        }
        if let Some(policy) = lookup("SEC_CHUNKER_DUPLICATE_ITEMS") {
            config.duplicate_items = policy.parse().map_err(AppError::Config)?;
        }
        if let Some(list) = lookup("SEC_CHUNKER_LARGE_CAP_TICKERS") {
            config.handlers = HandlerRegistry::with_lists(
                split_tickers(&list),
                config.handlers.single_issuer_tickers(),
            );
        }
        if let Some(list) = lookup("SEC_CHUNKER_SINGLE_ISSUER_TICKERS") {
            config.handlers = HandlerRegistry::with_lists(
                config.handlers.large_cap_tickers(),
                split_tickers(&list),
            );
        }

        if config.max_tokens == 0 {
            return Err(AppError::Config("max_tokens must be greater than zero".to_string()));
        }

        tracing::debug!("Loaded extractor config: {:?}", config);
        Ok(config)
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Config(format!("Invalid value for {}: '{}'", key, raw)))
}

fn split_tickers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .collect()
}

// src/edgar/fetcher.rs
use crate::edgar::models::FilingQuery;
use crate::storage::FilingStore;
use crate::utils::error::EdgarError;
use async_trait::async_trait;
use std::path::PathBuf;

/// Retrieves raw filing containers into a [`FilingStore`].
///
/// Implementations persist at most `query.limit` submissions under the
/// store's layout and return the paths of the submissions the query
/// selected, whether freshly downloaded or already on disk.
#[async_trait]
pub trait FilingFetcher: Send + Sync {
    async fn fetch(&self, query: &FilingQuery, store: &FilingStore) -> Result<Vec<PathBuf>, EdgarError>;
}

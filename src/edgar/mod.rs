pub mod client;
pub mod fetcher;
pub mod models;

pub use client::EdgarClient;
pub use fetcher::FilingFetcher;
pub use models::FilingQuery;

// src/edgar/client.rs
use crate::config::ExtractorConfig;
use crate::edgar::fetcher::FilingFetcher;
use crate::edgar::models::{select_filings, CompanySubmission, FilingInfo, FilingQuery};
use crate::storage::FilingStore;
use crate::utils::error::EdgarError;
use async_trait::async_trait;
use reqwest::{header, StatusCode};
use std::path::PathBuf;
use std::time::Duration;

const COMPANY_TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";
const SUBMISSIONS_URL: &str = "https://data.sec.gov/submissions";

/// EDGAR HTTP client: ticker lookup, submission index, full-submission download.
#[derive(Debug, Clone)]
pub struct EdgarClient {
    http: reqwest::Client,
    user_agent: String,
    request_delay: Duration,
}

impl EdgarClient {
    /// Creates a reqwest client configured for EDGAR interaction.
    pub fn new(config: &ExtractorConfig) -> Result<Self, EdgarError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str()) // Set the required User-Agent
            .build()?;
        Ok(Self {
            http,
            user_agent: config.user_agent.clone(),
            request_delay: Duration::from_millis(config.request_delay_ms),
        })
    }

    /// GET with the politeness delay and EDGAR status mapping.
    async fn get(&self, url: &str) -> Result<reqwest::Response, EdgarError> {
        tracing::debug!("GET {} (User-Agent: {})", url, self.user_agent);

        // --- Basic Rate Limiting ---
        // Requests are sequential, so a fixed delay keeps us under SEC's 10 req/s.
        tokio::time::sleep(self.request_delay).await;

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json,text/html,text/plain,*/*")
            .send()
            .await?; // Propagates reqwest::Error as EdgarError::Network

        check_status(response.status(), url)?;
        Ok(response)
    }

    /// Gets the CIK (Central Index Key) for a ticker symbol
    pub async fn get_cik_from_ticker(&self, ticker: &str) -> Result<String, EdgarError> {
        let json: serde_json::Value = self.get(COMPANY_TICKERS_URL).await?.json().await?;
        cik_from_ticker_index(&json, ticker)
    }

    /// Fetches the company submission data for a given CIK
    pub async fn get_company_submissions(&self, cik: &str) -> Result<CompanySubmission, EdgarError> {
        let url = format!("{}/CIK{}.json", SUBMISSIONS_URL, cik);
        let submission: CompanySubmission = self.get(&url).await?.json().await?;
        tracing::debug!(
            "Loaded {} recent filings for {}",
            submission.filings.recent.accessionNumber.len(),
            submission.name
        );
        Ok(submission)
    }

    /// Finds the filings matching `query`, newest first.
    pub async fn find_filings(&self, query: &FilingQuery) -> Result<Vec<FilingInfo>, EdgarError> {
        let cik = self.get_cik_from_ticker(&query.ticker).await?;
        let submissions = self.get_company_submissions(&cik).await?;
        let filings = select_filings(&submissions, query, &cik);
        tracing::info!(
            "Found {} {} filings for {} between {} and {}",
            filings.len(),
            query.form_type,
            query.ticker,
            query.after,
            query.before
        );
        Ok(filings)
    }

    /// Downloads the complete submission text file for a filing.
    pub async fn download_full_submission(&self, filing: &FilingInfo) -> Result<Vec<u8>, EdgarError> {
        let url = filing.full_submission_url();
        tracing::info!("Downloading document from: {}", url);

        let body = self.get(&url).await?.bytes().await?;
        tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}

#[async_trait]
impl FilingFetcher for EdgarClient {
    async fn fetch(&self, query: &FilingQuery, store: &FilingStore) -> Result<Vec<PathBuf>, EdgarError> {
        let filings = self.find_filings(query).await?;

        let mut selected = Vec::with_capacity(filings.len());
        for filing in &filings {
            let path = store.submission_path(&query.ticker, &query.form_type, &filing.accession_number);
            tracing::debug!(
                "{} {} filed {} by {} (primary document {})",
                filing.form_type,
                filing.accession_number,
                filing.filing_date,
                filing.company_name,
                filing.primary_doc
            );
            if path.is_file() {
                tracing::info!("Reusing cached submission {}", path.display());
            } else {
                let body = self.download_full_submission(filing).await?;
                store.save_submission(&query.ticker, &query.form_type, &filing.accession_number, &body)?;
            }
            selected.push(path);
        }
        Ok(selected)
    }
}

/// Maps non-success statuses to the EDGAR error taxonomy.
fn check_status(status: StatusCode, url: &str) -> Result<(), EdgarError> {
    if status.is_success() {
        return Ok(());
    }

    tracing::error!("HTTP error status: {} for URL: {}", status, url);
    match status {
        StatusCode::FORBIDDEN => {
            tracing::warn!("Received 403 Forbidden - check User-Agent and rate limits.");
            Err(EdgarError::RateLimited)
        }
        StatusCode::NOT_FOUND => Err(EdgarError::FilingDocNotFound(url.to_string())),
        _ => Err(EdgarError::Http(status)),
    }
}

/// Looks `ticker` up in the `company_tickers.json` index and returns the 10-digit CIK.
fn cik_from_ticker_index(json: &serde_json::Value, ticker: &str) -> Result<String, EdgarError> {
    let ticker = ticker.trim().to_uppercase();
    let companies = json
        .as_object()
        .ok_or_else(|| EdgarError::Parse("Invalid JSON structure".to_string()))?;

    // Iterate through the company list to find the matching ticker
    for company in companies.values() {
        let matches = company
            .get("ticker")
            .and_then(|t| t.as_str())
            .map_or(false, |t| t.eq_ignore_ascii_case(&ticker));
        if !matches {
            continue;
        }
        let cik_num = company
            .get("cik_str")
            .and_then(|c| c.as_u64())
            .ok_or_else(|| EdgarError::Parse("Invalid CIK format".to_string()))?;
        // Format CIK with leading zeros to 10 digits
        return Ok(format!("{:010}", cik_num));
    }

    Err(EdgarError::TickerNotFound(ticker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn index() -> serde_json::Value {
        json!({
            "0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."},
            "1": {"cik_str": 1318605, "ticker": "TSLA", "title": "Tesla, Inc."},
            "2": {"cik_str": "bogus", "ticker": "BAD", "title": "Broken Row"}
        })
    }

    #[test]
    fn test_cik_lookup_pads_and_ignores_case() {
        assert_eq!(cik_from_ticker_index(&index(), "aapl").unwrap(), "0000320193");
        assert_eq!(cik_from_ticker_index(&index(), " TSLA ").unwrap(), "0001318605");
    }

    #[test]
    fn test_cik_lookup_errors() {
        assert!(matches!(
            cik_from_ticker_index(&index(), "ZZZZ"),
            Err(EdgarError::TickerNotFound(t)) if t == "ZZZZ"
        ));
        assert!(matches!(cik_from_ticker_index(&index(), "BAD"), Err(EdgarError::Parse(_))));
        assert!(matches!(cik_from_ticker_index(&json!([]), "AAPL"), Err(EdgarError::Parse(_))));
    }

    #[test]
    fn test_status_mapping() {
        let url = "https://www.sec.gov/x.txt";
        assert!(check_status(StatusCode::OK, url).is_ok());
        assert!(matches!(check_status(StatusCode::FORBIDDEN, url), Err(EdgarError::RateLimited)));
        assert!(matches!(
            check_status(StatusCode::NOT_FOUND, url),
            Err(EdgarError::FilingDocNotFound(u)) if u == url
        ));
        assert!(matches!(
            check_status(StatusCode::BAD_GATEWAY, url),
            Err(EdgarError::Http(StatusCode::BAD_GATEWAY))
        ));
    }

    #[test]
    fn test_client_uses_configured_delay() {
        let config = ExtractorConfig { request_delay_ms: 25, ..ExtractorConfig::default() };
        let client = EdgarClient::new(&config).unwrap();
        assert_eq!(client.request_delay, Duration::from_millis(25));
        assert_eq!(client.user_agent, config.user_agent);
    }
}

// src/edgar/models.rs
#![allow(non_snake_case)]
use crate::utils::error::ExtractError;
use chrono::NaiveDate;
use serde::Deserialize;

/// Structure representing the EDGAR company submission index
/// Example: https://data.sec.gov/submissions/CIK0000320193.json
#[derive(Debug, Deserialize)]
pub struct CompanySubmission {
    #[serde(default)]
    pub name: String,
    pub filings: Filings,
}

#[derive(Debug, Deserialize)]
pub struct Filings {
    pub recent: FilingsList,
}

/// Column-oriented list of recent filings: index `i` of every vector
/// describes the same filing.
#[derive(Debug, Default, Deserialize)]
pub struct FilingsList {
    #[serde(default)]
    pub accessionNumber: Vec<String>,
    #[serde(default)]
    pub filingDate: Vec<String>,
    #[serde(default)]
    pub form: Vec<String>,
    #[serde(default)]
    pub primaryDocument: Vec<String>,
}

/// What to download: one form type for one ticker, filed inside `[after, before]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingQuery {
    pub ticker: String,
    pub form_type: String,
    pub limit: usize,
    pub after: NaiveDate,
    pub before: NaiveDate,
}

impl FilingQuery {
    /// Query for the filing covering fiscal `year`.
    ///
    /// Filing dates drift from the nominal fiscal year (a FY2023 10-K is
    /// usually filed in early 2024), so the window runs from January 1st of
    /// the previous year to June 30th of the next.
    pub fn for_fiscal_year(ticker: &str, form_type: &str, year: i32) -> Result<Self, ExtractError> {
        let after = year
            .checked_sub(1)
            .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
            .ok_or(ExtractError::InvalidYear(year))?;
        let before = year
            .checked_add(1)
            .and_then(|y| NaiveDate::from_ymd_opt(y, 6, 30))
            .ok_or(ExtractError::InvalidYear(year))?;

        Ok(Self {
            ticker: ticker.trim().to_uppercase(),
            form_type: form_type.trim().to_string(),
            limit: 1,
            after,
            before,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.after <= date && date <= self.before
    }
}

/// Simple struct representing a specific filing we want to process
#[derive(Debug, Clone, PartialEq)]
pub struct FilingInfo {
    pub accession_number: String,
    pub filing_date: NaiveDate,
    pub form_type: String,
    pub company_name: String,
    pub cik: String,
    pub primary_doc: String,
}

impl FilingInfo {
    /// URL of the complete submission text file (every embedded document plus the SEC header)
    pub fn full_submission_url(&self) -> String {
        let acc_no_dashes = self.accession_number.replace('-', "");
        // The archive path wants the CIK without leading zeros.
        let cik = self.cik.trim_start_matches('0');
        format!(
            "https://www.sec.gov/Archives/edgar/data/{}/{}/{}.txt",
            cik, acc_no_dashes, self.accession_number
        )
    }
}

/// Picks the filings in `recent` matching `query`, newest first, at most `query.limit`.
pub fn select_filings(submission: &CompanySubmission, query: &FilingQuery, cik: &str) -> Vec<FilingInfo> {
    let recent = &submission.filings.recent;
    let rows = recent
        .accessionNumber
        .iter()
        .zip(&recent.filingDate)
        .zip(&recent.form)
        .enumerate();

    let mut filings = Vec::new();
    for (i, ((accession, filing_date), form)) in rows {
        if form != &query.form_type {
            continue;
        }
        let date = match NaiveDate::parse_from_str(filing_date, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                tracing::debug!("Skipping {} with unparseable filing date '{}': {}", accession, filing_date, e);
                continue;
            }
        };
        if !query.contains(date) {
            continue;
        }

        filings.push(FilingInfo {
            accession_number: accession.clone(),
            filing_date: date,
            form_type: form.clone(),
            company_name: submission.name.clone(),
            cik: cik.to_string(),
            primary_doc: recent.primaryDocument.get(i).cloned().unwrap_or_default(),
        });
    }

    // Sort by filing date (newest first)
    filings.sort_by(|a, b| b.filing_date.cmp(&a.filing_date));
    filings.truncate(query.limit);
    filings
}

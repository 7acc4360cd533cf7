// src/main.rs
mod config;
mod edgar;
mod extractors;
mod pipeline;
mod storage;
mod utils;

use clap::Parser;
use config::ExtractorConfig;
use edgar::EdgarClient;
use pipeline::{ExtractionOutcome, Pipeline};
use std::io::Write;
use std::path::PathBuf;
use utils::AppError;

/// Extracts sections and retrieval chunks from an SEC EDGAR filing
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Ticker symbol of the company
    ticker: String,

    /// Form type, e.g. 10-K or 10-Q
    form_type: String,

    /// Fiscal year of the report
    year: i32,

    /// Root of the local filing cache (overrides SEC_CHUNKER_DOWNLOAD_ROOT)
    #[arg(long)]
    download_dir: Option<PathBuf>,

    /// Maximum words per chunk (overrides SEC_CHUNKER_MAX_TOKENS)
    #[arg(long)]
    max_tokens: Option<usize>,

    /// Sentences repeated between consecutive chunks (overrides SEC_CHUNKER_OVERLAP)
    #[arg(long)]
    overlap: Option<usize>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,
}

impl Args {
    fn apply_to(&self, config: &mut ExtractorConfig) -> Result<(), AppError> {
        if let Some(dir) = &self.download_dir {
            config.download_root = dir.clone();
        }
        if let Some(max_tokens) = self.max_tokens {
            if max_tokens == 0 {
                return Err(AppError::Config("--max-tokens must be greater than zero".to_string()));
            }
            config.max_tokens = max_tokens;
        }
        if let Some(overlap) = self.overlap {
            config.overlap = overlap;
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var, writes to stderr)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Defaults, then environment, then flags
    let mut config = ExtractorConfig::from_env()?;
    args.apply_to(&mut config)?;

    // 4. Run the extraction; failures come back as an error object
    let outcome = match EdgarClient::new(&config) {
        Ok(client) => {
            let pipeline = Pipeline::new(&config, Box::new(client));
            pipeline.extract(&args.ticker, &args.form_type, args.year).await
        }
        Err(e) => {
            tracing::error!("Failed to build EDGAR client: {}", e);
            ExtractionOutcome::failure(format!("Error processing SEC filing: {}", e))
        }
    };

    // 5. Print the result on stdout
    write_outcome(&mut std::io::stdout().lock(), &outcome, args.pretty)?;

    tracing::info!("Processing finished. Success: {}", outcome.is_success());
    Ok(())
}

/// Writes the JSON result followed by a newline.
fn write_outcome<W: Write>(out: &mut W, outcome: &ExtractionOutcome, pretty: bool) -> Result<(), AppError> {
    let mut json = if pretty {
        serde_json::to_vec_pretty(outcome)?
    } else {
        serde_json::to_vec(outcome)?
    };
    json.push(b'\n');
    out.write_all(&json)?;
    out.flush()?;
    Ok(())
}

use clap::Parser;
use pizza_scraper::{vendors, ScraperError};
use std::io::{self, Write};
use std::path::PathBuf;
use std::slice;
use tracing::{info, warn};

/// Runs one vendor's rule against a saved page and prints the records.
#[derive(Debug, Parser)]
struct Args {
    vendor: String,
    page: PathBuf,
}

fn main() -> Result<(), ScraperError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL")
                .unwrap_or_else(|_| "info,html5ever=error,selectors=error".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let vendor = vendors::select(vendors::default_vendors(), slice::from_ref(&args.vendor))?
        .into_iter()
        .next()
        .ok_or_else(|| ScraperError::UnknownVendor(args.vendor.clone()))?;

    let html = std::fs::read_to_string(&args.page)?;
    let extraction = vendor.rule.parse(&html);

    for skip in &extraction.skipped {
        warn!("skipped row {}: {}", skip.row, skip.reason);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for record in &extraction.records {
        record.write_line(&mut out)?;
    }
    out.flush()?;

    info!(
        "{}: {} records, {} skipped",
        vendor.id,
        extraction.records.len(),
        extraction.skipped.len()
    );
    Ok(())
}

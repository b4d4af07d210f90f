use clap::Parser;
use pizza_scraper::{config::Config, vendors, HttpFetcher, Overwrite, Pipeline};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

/// Scrapes pizza prices from the known vendors into one comma-separated file.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Directory for the per-vendor files and the aggregate.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// What to do when an output file already exists.
    #[arg(long, value_enum, default_value_t = Overwrite::Ask)]
    overwrite: Overwrite,

    /// Overwrite without asking, same as `--overwrite always`.
    #[arg(short, long)]
    yes: bool,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Number of vendor pages fetched at the same time.
    #[arg(long, default_value_t = 1)]
    concurrency: usize,

    /// Only scrape these vendors.
    #[arg(long = "vendor")]
    vendors: Vec<String>,

    /// Also write the run report as JSON.
    #[arg(long)]
    report: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let args = Args::parse();
    info!(
        "Welcome to {} v{}.",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let config = Config {
        output_dir: args.output_dir,
        timeout: Duration::from_secs(args.timeout),
        concurrency: args.concurrency,
        ..Config::default()
    };
    let overwrite = if args.yes {
        Overwrite::Always
    } else {
        args.overwrite
    };
    let vendors = vendors::select(vendors::default_vendors(), &args.vendors)?;

    let fetcher = HttpFetcher::new(&config)?;
    let report = Pipeline::new(fetcher, overwrite, config)
        .run(&vendors)
        .await?;

    if let Some(path) = args.report {
        std::fs::write(&path, serde_json::to_string_pretty(&report)?)?;
        info!("Report written to {}.", path.display());
    }

    if report.has_failures() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

use futures::{stream, StreamExt};
use itertools::{Either, Itertools};
use scraper::Html;
use std::path::{Path, PathBuf};
use std::pin::pin;
use tracing::{error, info, warn};

pub mod config;
pub mod confirm;
pub mod fetch;
pub mod normalize;
pub mod output;
pub mod report;
pub mod vendors;

mod error;
mod record;

pub use config::Config;
pub use confirm::{ConfirmOverwrite, Overwrite};
pub use error::{FetchFailure, ScraperError, SkipReason};
pub use fetch::{HttpFetcher, RawPage};
pub use output::{FileSink, RecordSink};
pub use record::Record;
pub use report::{PipelineReport, Skip, VendorReport, VendorStatus};
pub use vendors::Vendor;

/// Records pulled from one page, plus the rows that could not become records.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<Record>,
    pub skipped: Vec<Skip>,
}

impl Extraction {
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = (usize, Result<Record, SkipReason>)>,
    {
        let (records, skipped) = results
            .into_iter()
            .partition_map(|(row, result)| match result {
                Ok(record) => Either::Left(record),
                Err(reason) => Either::Right(Skip { row, reason }),
            });
        Extraction { records, skipped }
    }
}

/// Page layout knowledge for one vendor.
pub trait Extractor {
    fn vendor_id(&self) -> &'static str;
    fn extract(&self, doc: &Html) -> Extraction;

    fn parse(&self, raw: &str) -> Extraction {
        let doc = Html::parse_document(raw);
        self.extract(&doc)
    }
}

#[async_trait::async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<RawPage, FetchFailure>;
}

pub struct Pipeline<F, C> {
    fetcher: F,
    confirm: C,
    config: Config,
}

impl<F, C> Pipeline<F, C>
where
    F: Fetcher,
    C: ConfirmOverwrite,
{
    pub fn new(fetcher: F, confirm: C, config: Config) -> Self {
        Pipeline {
            fetcher,
            confirm,
            config,
        }
    }

    /// Scrapes every vendor in order, then merges the outputs written in this
    /// run into the aggregate file. Only a failure on the aggregate is an
    /// `Err`; vendor failures end up in the report.
    pub async fn run(&self, vendors: &[Vendor]) -> Result<PipelineReport, ScraperError> {
        let mut report = PipelineReport::start();

        // Results come back in vendor order whatever the concurrency.
        let mut pages = pin!(stream::iter(vendors)
            .map(|vendor| async move {
                info!("Trying to scrape {}...", vendor.url);
                (vendor, self.fetcher.fetch(&vendor.url).await)
            })
            .buffered(self.config.concurrency.max(1)));

        while let Some((vendor, page)) = pages.next().await {
            report.vendors.push(self.handle(vendor, page).await);
        }

        let written = report
            .succeeded()
            .filter_map(|v| v.output.clone())
            .collect_vec();
        report.aggregate = self.aggregate(&written).await?;
        report.finish();

        info!("Done: {}", report.summary());
        Ok(report)
    }

    async fn handle(
        &self,
        vendor: &Vendor,
        page: Result<RawPage, FetchFailure>,
    ) -> VendorReport {
        let mut report = VendorReport {
            vendor: vendor.id.clone(),
            url: vendor.url.clone(),
            status: VendorStatus::Written,
            records: 0,
            skipped: vec![],
            output: None,
        };

        let page = match page {
            Ok(page) => page,
            Err(failure) => {
                error!("Failed to scrape {}: {}", vendor.id, failure);
                report.status = VendorStatus::FetchFailed(failure);
                return report;
            }
        };

        let Extraction { records, skipped } = vendor.rule.parse(&page.body);
        drop(page);

        for skip in &skipped {
            warn!("{}: skipped row {}: {}", vendor.id, skip.row, skip.reason);
        }
        report.records = records.len();
        report.skipped = skipped;

        if records.is_empty() {
            error!("Failed to scrape {}: no records in {}", vendor.id, vendor.url);
            report.status = VendorStatus::NoRecords;
            return report;
        }

        let path = output::vendor_path(&self.config.output_dir, vendor);
        if path.exists() && !self.confirm.confirm_overwrite(&path).await {
            warn!("Keeping old {}, {} records dropped", path.display(), records.len());
            report.status = VendorStatus::Declined;
            return report;
        }

        match write_records(&path, &records) {
            Ok(path) => {
                info!("{} written ({} records).", path.display(), records.len());
                report.output = Some(path);
            }
            Err(e) => {
                error!("Failed to write {} for {}: {}", path.display(), vendor.id, e);
                report.status = VendorStatus::WriteFailed(e.to_string());
            }
        }
        report
    }

    async fn aggregate(&self, parts: &[PathBuf]) -> Result<Option<PathBuf>, ScraperError> {
        let target = self.config.aggregate_path();
        if parts.is_empty() {
            warn!("No vendor output written, {} left as is", target.display());
            return Ok(None);
        }
        if target.exists() && !self.confirm.confirm_overwrite(&target).await {
            warn!("Keeping old {}", target.display());
            return Ok(None);
        }

        output::concat_files(parts, &target)?;
        info!("All outputs written to {}.", target.display());
        Ok(Some(target))
    }
}

fn write_records(path: &Path, records: &[Record]) -> Result<PathBuf, ScraperError> {
    let mut sink = FileSink::create(path)?;
    for record in records {
        sink.append_record(record)?;
    }
    sink.finish()
}

use crate::{FetchFailure, SkipReason};
use chrono::{DateTime, FixedOffset, Local};
use itertools::Itertools;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum VendorStatus {
    /// Output file rewritten with this run's records.
    Written,
    FetchFailed(FetchFailure),
    /// Page fetched but no item could be turned into a record.
    NoRecords,
    /// Overwrite refused; the previous output is kept.
    Declined,
    /// The vendor's output file could not be written.
    WriteFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skip {
    pub row: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Serialize)]
pub struct VendorReport {
    pub vendor: String,
    pub url: String,
    #[serde(flatten)]
    pub status: VendorStatus,
    pub records: usize,
    pub skipped: Vec<Skip>,
    pub output: Option<PathBuf>,
}

impl VendorReport {
    pub fn is_failure(&self) -> bool {
        matches!(
            self.status,
            VendorStatus::FetchFailed(_) | VendorStatus::NoRecords | VendorStatus::WriteFailed(_)
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub started_at: DateTime<FixedOffset>,
    pub finished_at: Option<DateTime<FixedOffset>>,
    pub vendors: Vec<VendorReport>,
    pub aggregate: Option<PathBuf>,
}

impl PipelineReport {
    pub(crate) fn start() -> Self {
        PipelineReport {
            started_at: now(),
            finished_at: None,
            vendors: vec![],
            aggregate: None,
        }
    }

    pub(crate) fn finish(&mut self) {
        self.finished_at = Some(now());
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &VendorReport> {
        self.vendors
            .iter()
            .filter(|v| v.status == VendorStatus::Written)
    }

    pub fn failed(&self) -> impl Iterator<Item = &VendorReport> {
        self.vendors.iter().filter(|v| v.is_failure())
    }

    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }

    pub fn summary(&self) -> String {
        format!(
            "written: [{}], failed: [{}], records: {}, skipped: {}",
            names(self.succeeded()),
            names(self.failed()),
            self.vendors.iter().map(|v| v.records).sum::<usize>(),
            self.vendors.iter().map(|v| v.skipped.len()).sum::<usize>()
        )
    }
}

fn names<'a>(vendors: impl Iterator<Item = &'a VendorReport>) -> String {
    vendors.map(|v| v.vendor.as_str()).join(", ")
}

fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

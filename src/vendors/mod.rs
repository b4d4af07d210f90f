mod gino;
mod kerekes;
mod pecsenye;

pub use gino::Gino;
pub use kerekes::Kerekes;
pub use pecsenye::Pecsenye;

use crate::{Extractor, ScraperError};
use scraper::ElementRef;
use std::{fmt, sync::Arc};

pub const GINO_URL: &str = "http://www.ginopizza.hu/index.php?option=com_content&view=article&id=13:vekony-tesztas-pizza&catid=8:menu";
pub const KEREKES_URL: &str = "http://www.kerekespizza.hu/index.php";
pub const PECSENYE_URL: &str = "http://pecsenyesarok.hu/pizzak";

/// A source page and the rule that reads it.
#[derive(Clone)]
pub struct Vendor {
    pub id: String,
    pub url: String,
    /// File name of this vendor's output, relative to the output directory.
    pub output: String,
    pub rule: Arc<dyn Extractor + Send + Sync>,
}

impl Vendor {
    pub fn new<R>(rule: R, url: &str, output: &str) -> Vendor
    where
        R: Extractor + Send + Sync + 'static,
    {
        Vendor {
            id: rule.vendor_id().to_string(),
            url: url.to_string(),
            output: output.to_string(),
            rule: Arc::new(rule),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Vendor {
        self.url = url.into();
        self
    }
}

impl fmt::Debug for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vendor")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

/// The vendors, in aggregate order.
pub fn default_vendors() -> Vec<Vendor> {
    vec![
        Vendor::new(Gino, GINO_URL, "gino.txt"),
        Vendor::new(Kerekes, KEREKES_URL, "kerekes.txt"),
        Vendor::new(Pecsenye, PECSENYE_URL, "pecsenye.txt"),
    ]
}

/// Keeps the vendors named in `ids` (case insensitive), in their original
/// order. An empty `ids` keeps everything.
pub fn select(vendors: Vec<Vendor>, ids: &[String]) -> Result<Vec<Vendor>, ScraperError> {
    if let Some(unknown) = ids
        .iter()
        .find(|id| !vendors.iter().any(|v| v.id.eq_ignore_ascii_case(id)))
    {
        return Err(ScraperError::UnknownVendor(unknown.clone()));
    }
    if ids.is_empty() {
        return Ok(vendors);
    }
    Ok(vendors
        .into_iter()
        .filter(|v| ids.iter().any(|id| v.id.eq_ignore_ascii_case(id)))
        .collect())
}

pub(crate) fn inner_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

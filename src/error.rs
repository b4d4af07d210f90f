use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("I/O error")]
    Io(#[from] std::io::Error),
    #[error("HTTP client error")]
    Http(#[from] reqwest::Error),
    #[error("Report serialization error")]
    Json(#[from] serde_json::Error),
    #[error("Unknown vendor: {0}")]
    UnknownVendor(String),
}

/// Why a vendor page could not be used. Only `Network` means the vendor was
/// not reached at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FetchFailure {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("unexpected content type {0:?}")]
    ContentType(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("missing element `{0}`")]
    MissingElement(&'static str),
    #[error("missing cell {0}")]
    MissingCell(usize),
    #[error("empty item name")]
    EmptyName,
    #[error("no price in {0:?}")]
    NoPrice(String),
}

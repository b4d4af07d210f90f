use crate::{config::Config, FetchFailure, Fetcher, ScraperError};
use reqwest::{header::CONTENT_TYPE, Client, Response, StatusCode};
use tracing::{debug, error};

/// Page body as served, kept only for the pass that parses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage {
    pub url: String,
    pub content_type: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<HttpFetcher, ScraperError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(HttpFetcher { client })
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<RawPage, FetchFailure> {
        debug!("Visit {}", url);
        let resp = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                error!("Error during request to {}: {}", url, e);
                return Err(FetchFailure::Network(e.to_string()));
            }
        };

        let content_type = check_response(&resp).map_err(|failure| {
            debug!("Unusable response from {}: {}", url, failure);
            failure
        })?;

        // Status and headers are checked first, the body is only read for usable pages.
        match resp.text().await {
            Ok(body) => Ok(RawPage {
                url: url.to_string(),
                content_type,
                body,
            }),
            Err(e) => {
                error!("Error while reading body of {}: {}", url, e);
                Err(FetchFailure::Network(e.to_string()))
            }
        }
    }
}

fn check_response(resp: &Response) -> Result<String, FetchFailure> {
    if resp.status() != StatusCode::OK {
        return Err(FetchFailure::Status(resp.status().as_u16()));
    }
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_lowercase);
    match content_type {
        Some(ct) if is_markup(&ct) => Ok(ct),
        other => Err(FetchFailure::ContentType(other)),
    }
}

/// Substring match, so `application/xhtml+xml` counts as markup too.
pub fn is_markup(content_type: &str) -> bool {
    content_type.to_lowercase().contains("html")
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use shared::protocol::{FormPayload, FORM_CONTENT_TYPE};
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid site url '{url}': {reason}")]
    InvalidSiteUrl { url: String, reason: String },
    #[error("form submission request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("form ingestion answered with HTTP {status}")]
    Status { status: u16 },
}

/// Delivers one encoded submission to the form-ingestion collaborator.
///
/// Implementations make exactly one attempt per call and never retry on their own.
#[async_trait]
pub trait FormTransport: Send + Sync {
    async fn submit(&self, payload: &FormPayload) -> Result<(), TransportError>;
}

/// Posts to the root path of the hosting site, where the platform intercepts form posts.
#[derive(Debug, Clone)]
pub struct HttpFormTransport {
    http: Client,
    endpoint: Url,
}

impl HttpFormTransport {
    pub fn new(site_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let http = Client::builder().timeout(timeout).build()?;
        Self::with_client(http, site_url)
    }

    pub fn with_client(http: Client, site_url: &str) -> Result<Self, TransportError> {
        Ok(Self {
            http,
            endpoint: form_endpoint(site_url)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl FormTransport for HttpFormTransport {
    async fn submit(&self, payload: &FormPayload) -> Result<(), TransportError> {
        debug!(endpoint = %self.endpoint, "posting form submission");
        let response = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(payload.encode())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(TransportError::Status {
                status: status.as_u16(),
            })
        }
    }
}

/// Resolves the site's own root path; any path or query on `site_url` is dropped.
pub fn form_endpoint(site_url: &str) -> Result<Url, TransportError> {
    let raw = site_url.trim();
    let invalid = |reason: String| TransportError::InvalidSiteUrl {
        url: raw.to_string(),
        reason,
    };

    let base = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
    }
    if base.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }

    let mut endpoint = base.join("/").map_err(|err| invalid(err.to_string()))?;
    endpoint.set_query(None);
    endpoint.set_fragment(None);
    Ok(endpoint)
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;

//! Blocking HTTP fetcher built on `reqwest`.

use std::time::Duration;

use pyseed_core::{
    application::{ApplicationError, ports::RemoteFetcher},
    error::{PyseedError, PyseedResult},
};
use tracing::{debug, instrument};

/// Connection settings for [`HttpFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    /// Whole-request deadline, body included.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("pyseed/{}", pyseed_core::VERSION),
        }
    }
}

/// Production fetcher: one GET per call, strict UTF-8 decoding.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Build a client with explicit timeouts.
    pub fn new(settings: &HttpSettings) -> PyseedResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout)
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|e| PyseedError::Configuration {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client })
    }
}

impl RemoteFetcher for HttpFetcher {
    #[instrument(skip(self))]
    fn fetch(&self, url: &str) -> PyseedResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| transport_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApplicationError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let bytes = response.bytes().map_err(|e| transport_error(url, &e))?;
        debug!(bytes = bytes.len(), "Response received");

        String::from_utf8(bytes.to_vec()).map_err(|e| {
            ApplicationError::DecodeFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

fn transport_error(url: &str, e: &reqwest::Error) -> PyseedError {
    ApplicationError::FetchFailed {
        url: url.to_string(),
        reason: e.to_string(),
        retryable: e.is_timeout() || e.is_connect(),
    }
    .into()
}

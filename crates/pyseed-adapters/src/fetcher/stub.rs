//! Canned-response fetcher for testing.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use pyseed_core::{
    application::{ApplicationError, ports::RemoteFetcher},
    domain::RemoteSource,
    error::{PyseedError, PyseedResult},
};

#[derive(Debug, Clone)]
enum Canned {
    Body(String),
    Status(u16),
    /// Fails `remaining` times with a connect error, then serves the body.
    Flaky { remaining: u32, body: String },
}

/// Serves fixed bodies per URL and records every request.
///
/// URLs without a canned response behave like an unreachable host.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    responses: Arc<Mutex<HashMap<String, Canned>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve both ignore lists from their canonical URLs.
    pub fn upstream(dockerignore: &str, gitignore: &str) -> Self {
        Self::new()
            .with_body(RemoteSource::DockerIgnore.default_url(), dockerignore)
            .with_body(RemoteSource::GitIgnore.default_url(), gitignore)
    }

    pub fn with_body(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(url.into(), Canned::Body(body.into()))
    }

    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.insert(url.into(), Canned::Status(status))
    }

    pub fn flaky(self, url: impl Into<String>, failures: u32, body: impl Into<String>) -> Self {
        self.insert(
            url.into(),
            Canned::Flaky {
                remaining: failures,
                body: body.into(),
            },
        )
    }

    /// Forget any canned response so the URL becomes unreachable.
    pub fn unreachable(self, url: &str) -> Self {
        if let Ok(mut responses) = self.responses.lock() {
            responses.remove(url);
        }
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.to_vec())
            .unwrap_or_default()
    }

    fn insert(self, url: String, canned: Canned) -> Self {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(url, canned);
        }
        self
    }
}

impl RemoteFetcher for StaticFetcher {
    fn fetch(&self, url: &str) -> PyseedResult<String> {
        self.requests
            .lock()
            .map_err(|_| lock_poisoned())?
            .push(url.to_string());

        let mut responses = self.responses.lock().map_err(|_| lock_poisoned())?;
        match responses.get_mut(url) {
            Some(Canned::Body(body)) => Ok(body.clone()),
            Some(Canned::Status(status)) => Err(ApplicationError::HttpStatus {
                url: url.to_string(),
                status: *status,
            }
            .into()),
            Some(Canned::Flaky { remaining, body }) => {
                if *remaining == 0 {
                    return Ok(body.clone());
                }
                *remaining -= 1;
                Err(connection_refused(url))
            }
            None => Err(connection_refused(url)),
        }
    }
}

fn connection_refused(url: &str) -> PyseedError {
    ApplicationError::FetchFailed {
        url: url.to_string(),
        reason: "connection refused (simulated)".into(),
        retryable: true,
    }
    .into()
}

fn lock_poisoned() -> PyseedError {
    PyseedError::Internal {
        message: "static fetcher lock poisoned".into(),
    }
}

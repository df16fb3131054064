// src/fetch.rs

//! Content fetching abstraction and the HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::FetchConfig;

/// Trait for retrieving raw bytes for a source address.
///
/// One blocking retrieval per call; retry policy, if any, belongs to the
/// implementation, not the callers.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetch the document at the given address.
    async fn fetch(&self, address: &str) -> Result<Vec<u8>>;
}

/// HTTP fetcher backed by a configured reqwest client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the configured user agent and timeout.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, address: &str) -> Result<Vec<u8>> {
        let response = self.client.get(address).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

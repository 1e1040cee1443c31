use async_compression::tokio::bufread::GzipDecoder;
use futures::TryStreamExt;
use log::{debug, warn};
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio_util::io::StreamReader;

use crate::ProviderError;

pub const DEFAULT_USER_AGENT: &str = concat!("clima/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for the bulk data endpoints.
///
/// Transient failures (connection errors, 5xx, 429) are retried with
/// exponential backoff up to `max_retries` times.
pub struct HttpFetcher {
    client: ClientWithMiddleware,
    request_timeout: Duration,
}

impl HttpFetcher {
    pub fn new(
        user_agent: &str,
        max_retries: u32,
        request_timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);
        let client = ClientBuilder::new(
            Client::builder()
                .user_agent(user_agent)
                .build()
                .map_err(ProviderError::ClientBuild)?,
        )
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build();

        Ok(Self {
            client,
            request_timeout,
        })
    }

    /// Downloads a gzip compressed resource and returns the decompressed bytes.
    pub async fn fetch_gzip(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        debug!("requesting: {}", url);
        let response = self
            .client
            .get(url)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkRequest(url.to_string(), e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP error for {}: {}", url, status);
            return Err(ProviderError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let stream = response
            .bytes_stream()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e));
        let mut decoder = GzipDecoder::new(StreamReader::new(stream));
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .await
            .map_err(|e| ProviderError::DownloadIo(url.to_string(), e))?;

        debug!("downloaded {} bytes from {}", decompressed.len(), url);
        Ok(decompressed)
    }
}

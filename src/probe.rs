//! Single-request HTTP probe
//!
//! One GET with a hard deadline and permissive TLS trust. The response body
//! is not read here; callers pull it only when a check needs it.

use crate::{Config, ScanError};
use reqwest::{Client, Response};
use std::time::Duration;

/// HTTP probe shared by all workers
///
/// Wraps a single `reqwest::Client` so connection pooling works across the
/// whole scan. Peer certificate verification is disabled: a self-signed or
/// misconfigured host exposing `.git/` is exactly the kind of finding this
/// tool exists for, and a verified-cert requirement would silently hide it.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(config: &Config) -> Result<Self, ScanError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| ScanError::ConfigurationError(e.to_string()))?;

        Ok(Self {
            client,
            timeout: config.request_timeout,
        })
    }

    /// Issue a single GET against `url`
    ///
    /// No retries: one failed attempt is a final negative for this call.
    pub async fn fetch(&self, url: &str) -> Result<Response, ScanError> {
        self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ScanError::Timeout(self.timeout)
            } else {
                ScanError::NetworkError(e.to_string())
            }
        })
    }
}

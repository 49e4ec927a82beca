use std::time::Duration;

use crate::error::SourceError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client abstraction so the HTML adapter can be exercised offline.
pub trait HttpClient {
    /// Perform a GET request and return the response body.
    fn get(&self, url: &str) -> Result<String, SourceError>;
}

/// Production HTTP client using reqwest's blocking API.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    timeout: Duration,
}

impl ReqwestClient {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<String, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| SourceError::Request {
                url: url.to_string(),
                message: format!("failed to create HTTP client: {e}"),
            })?;

        log::debug!("GET {url} (timeout {:?})", self.timeout);
        let response = client.get(url).send().map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout { url: url.to_string() }
            } else {
                SourceError::Request {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout { url: url.to_string() }
            } else {
                SourceError::Request {
                    url: url.to_string(),
                    message: format!("failed to read response body: {e}"),
                }
            }
        })
    }
}

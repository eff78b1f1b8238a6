//! Resolved client configuration.

use std::time::Duration;

use url::Url;

use crate::Error;

/// Timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Base URL, timeout and API version a [`Client`](crate::Client) is built
/// from. Loading these values is the caller's job; the client only reads
/// them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
    timeout: Duration,
    api_version: String,
}

impl ClientConfig {
    /// Fails if `base_url` does not parse, carries a query or fragment, or
    /// cannot take path segments.
    pub fn new(base_url: &str, timeout: Duration, api_version: &str) -> Result<Self, Error> {
        let url = Url::parse(base_url)?;
        if url.cannot_be_a_base() || url.query().is_some() || url.fragment().is_some() {
            return Err(Error::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url: url,
            timeout,
            api_version: api_version.to_string(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }
}

//! Client configuration.
//!
//! Everything a [`crate::ConversionClient`] needs is fixed up front in a
//! [`ClientConfig`], built via its [`ClientConfigBuilder`]. The config is
//! immutable once built, so a client constructed from it can be shared
//! freely across tasks.
//!
//! # Design choice: validate at build time
//! The base URL is parsed once in [`ClientConfigBuilder::build`] rather than
//! on every request. Call sites never re-check it, and a typo surfaces as a
//! [`ClientError::InvalidBaseUrl`] before any request is made.

use crate::error::ClientError;
use reqwest::Url;
use std::time::Duration;

/// Configuration for a [`crate::ConversionClient`].
///
/// Built via [`ClientConfig::builder()`].
///
/// # Example
/// ```rust
/// use pdfconv_sdk::ClientConfig;
///
/// let config = ClientConfig::builder("http://localhost:8080/")
///     .timeout(std::time::Duration::from_secs(30))
///     .build()
///     .unwrap();
/// assert_eq!(config.base_url, "http://localhost:8080");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service root the endpoint paths are appended to. Validated as an
    /// absolute `http`/`https` URL and stored without a trailing `/`.
    pub base_url: String,

    /// Total per-request deadline. Default: none.
    ///
    /// The service gives no latency guarantees and conversions of large
    /// documents can legitimately take minutes, so no deadline is imposed
    /// unless a caller opts in.
    pub timeout: Option<Duration>,

    /// Pre-constructed HTTP client. Default: none.
    ///
    /// Lets embedding applications supply their own transport (proxies,
    /// custom TLS roots). When set it is used as-is and `timeout` above is
    /// ignored; configure the deadline on the supplied client instead.
    pub http_client: Option<reqwest::Client>,
}

impl ClientConfig {
    /// Create a builder rooted at `base_url`.
    pub fn builder(base_url: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            base_url: base_url.into(),
            timeout: None,
            http_client: None,
        }
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    base_url: String,
    timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
}

impl ClientConfigBuilder {
    /// Total per-request deadline covering connect, send, and body read.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Supply a pre-constructed transport instead of the default one.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build the configuration, validating the base URL.
    pub fn build(self) -> Result<ClientConfig, ClientError> {
        let base_url = normalize_base_url(&self.base_url)?;
        Ok(ClientConfig {
            base_url,
            timeout: self.timeout,
            http_client: self.http_client,
        })
    }
}

/// Check that `raw` is an absolute http(s) URL and strip any trailing `/`.
fn normalize_base_url(raw: &str) -> Result<String, ClientError> {
    let parsed = Url::parse(raw).map_err(|e| ClientError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ClientError::InvalidBaseUrl {
                url: raw.to_owned(),
                reason: format!("unsupported scheme '{other}', expected http or https"),
            });
        }
    }
    Ok(raw.trim_end_matches('/').to_owned())
}

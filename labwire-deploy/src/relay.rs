//! Relay client over HTTP.

use async_trait::async_trait;
use labwire_types::{Relay, RelayRequest, RelayResponse, TransportError};

use crate::error::{map_reqwest_error, parse_relay_body};

/// Default relay base URL.
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the relay base URL.
pub const RELAY_URL_VAR: &str = "LABWIRE_RELAY_URL";

/// Client for the relay's `POST /relay` endpoint.
///
/// ```no_run
/// use labwire_deploy::HttpRelay;
///
/// let relay = HttpRelay::new().base_url("http://relay.lab:8000");
/// ```
#[derive(Debug, Clone)]
pub struct HttpRelay {
    pub(crate) base_url: String,
    pub(crate) client: reqwest::Client,
}

impl HttpRelay {
    /// A client for `http://localhost:8000`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            client: reqwest::Client::new(),
        }
    }

    /// A client for `$LABWIRE_RELAY_URL`, or the default when unset.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var(RELAY_URL_VAR) {
            Ok(url) if !url.is_empty() => Self::new().base_url(url),
            _ => Self::new(),
        }
    }

    /// Override the base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Use a preconfigured HTTP client. Deploys can take minutes; set the
    /// timeout accordingly.
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub(crate) fn relay_url(&self) -> String {
        format!("{}/relay", self.base_url)
    }
}

impl Default for HttpRelay {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Relay for HttpRelay {
    async fn forward(&self, request: RelayRequest) -> Result<RelayResponse, TransportError> {
        let url = self.relay_url();
        tracing::debug!(url = %url, target = %request.url, method = ?request.method, "relaying request");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;
        let answer = parse_relay_body(status, body)?;
        tracing::debug!(status = answer.status, "relay answered");
        Ok(answer)
    }
}

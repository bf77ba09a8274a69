//! The relay boundary: forwarding deploy and destroy calls to an orchestrator.
//!
//! The relay is an HTTP intermediary. It receives a description of the real
//! request (`url`, `method`, `headers`, `data`), performs it, and wraps the
//! orchestrator's answer in a [`RelayResponse`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::TransportError;

/// HTTP method the relay should use downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RelayMethod {
    /// Create / reconfigure.
    Post,
    /// Tear down.
    Delete,
}

/// Body of `POST /relay`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayRequest {
    /// Downstream orchestrator URL.
    pub url: String,
    /// Downstream method.
    pub method: RelayMethod,
    /// Headers for the downstream request.
    pub headers: BTreeMap<String, String>,
    /// Downstream JSON body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

// Headers carry the API credential; never print them.
impl fmt::Debug for RelayRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header_names: Vec<&str> = self.headers.keys().map(String::as_str).collect();
        f.debug_struct("RelayRequest")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("headers", &header_names)
            .field("data", &self.data.as_ref().map(|_| "..."))
            .finish()
    }
}

/// What the relay answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayResponse {
    /// Downstream HTTP status (or the relay's own failure status).
    pub status: u16,
    /// Downstream JSON body.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Relay-side error text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayResponse {
    /// Status in `[200, 300)`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Forwards requests to an orchestrator.
///
/// Implementations must be `Send + Sync`; the editor may issue a second
/// deploy while the first is still in flight.
#[async_trait]
pub trait Relay: Send + Sync {
    /// Forward one request and return the relay's answer.
    ///
    /// A non-2xx *downstream* status is a successful forward and comes back
    /// as a [`RelayResponse`]; only failing to talk to the relay itself is an
    /// error.
    async fn forward(&self, request: RelayRequest) -> Result<RelayResponse, TransportError>;
}

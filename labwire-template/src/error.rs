//! Internal helpers mapping HTTP/reqwest failures to [`TransportError`].

use labwire_types::TransportError;
use serde::Deserialize;

/// Error body the template service sends with non-2xx answers.
#[derive(Deserialize)]
struct Detail {
    detail: String,
}

/// Map a non-2xx answer to [`TransportError::Status`].
///
/// A JSON `{"detail": ...}` body is unwrapped; anything else is kept as-is.
pub(crate) fn map_http_status(status: reqwest::StatusCode, body: &str) -> TransportError {
    let body = serde_json::from_str::<Detail>(body)
        .map(|d| d.detail)
        .unwrap_or_else(|_| body.to_owned());
    TransportError::Status {
        status: status.as_u16(),
        body,
    }
}

/// Map a [`reqwest::Error`] to [`TransportError::Network`].
pub(crate) fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Network(format!("timed out: {err}"))
    } else {
        TransportError::Network(err.to_string())
    }
}

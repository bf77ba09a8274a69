//! Internal helpers mapping relay/reqwest failures to [`TransportError`].

use labwire_types::{RelayResponse, TransportError};

/// Map a [`reqwest::Error`] to [`TransportError::Network`].
pub(crate) fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Network(format!("timed out: {err}"))
    } else {
        TransportError::Network(err.to_string())
    }
}

/// Parse the relay's answer.
///
/// A body that is not a relay envelope is the relay's own failure when the
/// status is non-2xx, and a contract violation otherwise.
pub(crate) fn parse_relay_body(
    status: reqwest::StatusCode,
    body: String,
) -> Result<RelayResponse, TransportError> {
    match serde_json::from_str::<RelayResponse>(&body) {
        Ok(answer) => Ok(answer),
        Err(_) if !status.is_success() => Err(TransportError::Status {
            status: status.as_u16(),
            body,
        }),
        Err(e) => Err(TransportError::InvalidResponse(e.to_string())),
    }
}

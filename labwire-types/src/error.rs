//! Error types for each boundary.

use thiserror::Error;

use crate::id::NodeId;

/// Graph mutation errors.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// A node with this id already exists. The caller picks a fresh id.
    #[error("duplicate node id: {0}")]
    DuplicateNodeId(NodeId),
}

/// Manifest encode/decode errors.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The document is not a manifest: bad syntax, or no `topology.nodes`.
    #[error("malformed manifest: {0}")]
    MalformedManifest(String),

    /// A link endpoint is not of the form `node:interface`.
    #[error("malformed link endpoint: {0:?}")]
    MalformedEndpoint(String),

    /// The manifest could not be rendered as text.
    #[error("render failed: {0}")]
    Render(String),
}

/// Failures talking to a network collaborator (relay or template storage).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TransportError {
    /// The collaborator could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The collaborator answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or error detail.
        body: String,
    },

    /// The response body was not what the contract promises.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Template catalog errors. Each is scoped to one template id.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Neither a built-in nor known to storage.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Storage could not deliver the template.
    #[error("failed to fetch template {id}: {source}")]
    Fetch {
        /// The template that failed.
        id: String,
        /// Underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// The fetched manifest could not be decoded.
    #[error("template is not a valid manifest: {0}")]
    Decode(#[from] CodecError),

    /// Storage rejected an upload.
    #[error("upload failed: {0}")]
    Upload(String),
}

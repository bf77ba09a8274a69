//! The template storage boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TransportError;

/// A stored template: manifest text plus optional markdown notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDocument {
    /// Manifest YAML.
    pub content: String,
    /// Free-text documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

/// Storage's acknowledgement of an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Name the file was stored under.
    pub filename: String,
    /// Human-readable status.
    #[serde(default)]
    pub message: String,
}

/// External template catalog.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Filenames of every stored template.
    async fn list(&self) -> Result<Vec<String>, TransportError>;

    /// Fetch one template by filename.
    async fn fetch(&self, name: &str) -> Result<TemplateDocument, TransportError>;

    /// Store a file (a manifest or its documentation).
    async fn upload(
        &self,
        filename: &str,
        content: Vec<u8>,
    ) -> Result<UploadReceipt, TransportError>;
}

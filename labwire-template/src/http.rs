//! Template storage over HTTP.

use async_trait::async_trait;
use labwire_types::{TemplateDocument, TemplateStore, TransportError, UploadReceipt};
use reqwest::Url;
use reqwest::multipart::{Form, Part};

use crate::error::{map_http_status, map_reqwest_error};

/// Default template service base URL.
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the base URL.
pub const TEMPLATE_URL_VAR: &str = "LABWIRE_TEMPLATE_URL";

/// Client for the template service.
///
/// ```no_run
/// use labwire_template::HttpTemplateStore;
///
/// let store = HttpTemplateStore::new().base_url("http://relay.lab:8000");
/// ```
#[derive(Debug, Clone)]
pub struct HttpTemplateStore {
    pub(crate) base_url: String,
    pub(crate) client: reqwest::Client,
}

impl HttpTemplateStore {
    /// A client for `http://localhost:8000`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            client: reqwest::Client::new(),
        }
    }

    /// A client for `$LABWIRE_TEMPLATE_URL`, or the default when unset.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var(TEMPLATE_URL_VAR) {
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

    /// Use a preconfigured HTTP client (timeouts, proxies).
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// `{base}/templates`, plus `segment` as one escaped path segment.
    fn url(&self, segment: Option<&str>) -> Result<Url, TransportError> {
        let base = format!("{}/templates", self.base_url);
        let mut url = Url::parse(&base).map_err(|e| {
            TransportError::Network(format!("invalid template store url {base}: {e}"))
        })?;
        if let Some(segment) = segment {
            url.path_segments_mut()
                .map_err(|()| {
                    TransportError::Network(format!("template store url {base} has no path"))
                })?
                .push(segment);
        }
        Ok(url)
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TransportError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_http_status(status, &body));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))
    }
}

impl Default for HttpTemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TemplateStore for HttpTemplateStore {
    async fn list(&self) -> Result<Vec<String>, TransportError> {
        let url = self.url(None)?;
        tracing::debug!(url = %url, "listing templates");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::read_json(response).await
    }

    async fn fetch(&self, name: &str) -> Result<TemplateDocument, TransportError> {
        let url = self.url(Some(name))?;
        tracing::debug!(url = %url, "fetching template");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::read_json(response).await
    }

    async fn upload(
        &self,
        filename: &str,
        content: Vec<u8>,
    ) -> Result<UploadReceipt, TransportError> {
        let url = self.url(Some("upload"))?;
        tracing::debug!(url = %url, filename, bytes = content.len(), "uploading template");
        let form = Form::new().part("file", Part::bytes(content).file_name(filename.to_owned()));
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::read_json(response).await
    }
}

#![deny(missing_docs)]
//! Starter topologies: compiled-in templates plus an optional external store.
//!
//! [`TemplateLibrary::load`] never touches a graph. It produces a
//! [`LoadedTemplate`], and only [`LoadedTemplate::apply_to`] replaces the
//! graph's contents. Whatever confirmation the caller wants goes between the
//! two calls.
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use labwire_graph::GraphModel;
//! use labwire_template::{HttpTemplateStore, TemplateLibrary};
//!
//! let library = TemplateLibrary::new().with_store(Arc::new(HttpTemplateStore::from_env()));
//! let loaded = library.load("linux-bridge-vlan").await?;
//! let mut graph = GraphModel::new();
//! loaded.apply_to(&mut graph)?;
//! # Ok(())
//! # }
//! ```

pub mod builtin;
mod error;
mod http;

use std::sync::Arc;

use labwire_graph::GraphModel;
use labwire_types::{
    GraphError, Manifest, TemplateError, TemplateId, TemplateStore, Topology, TransportError,
    UploadReceipt,
};

pub use builtin::Template;
pub use http::{HttpTemplateStore, TEMPLATE_URL_VAR};

/// Where a catalog entry comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSource {
    /// Compiled into the crate.
    Builtin,
    /// Held by the template store.
    External,
}

/// One entry of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSummary {
    /// Identifier to pass to [`TemplateLibrary::load`].
    pub id: TemplateId,
    /// Display name. External templates use their filename.
    pub name: String,
    /// One-line summary, empty for external templates.
    pub description: String,
    /// Origin.
    pub source: TemplateSource,
}

/// The catalog as of one [`TemplateLibrary::list`] call.
#[derive(Debug)]
pub struct TemplateListing {
    /// Always present.
    pub builtin: Vec<TemplateSummary>,
    /// Whatever the store returned; empty when it failed.
    pub external: Vec<TemplateSummary>,
    /// Why the store could not be listed, if it could not.
    pub external_error: Option<TransportError>,
}

impl TemplateListing {
    /// Built-ins then external entries.
    pub fn iter(&self) -> impl Iterator<Item = &TemplateSummary> {
        self.builtin.iter().chain(&self.external)
    }
}

/// A template ready to replace the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTemplate {
    /// The id it was loaded by.
    pub id: TemplateId,
    /// The graph to install.
    pub topology: Topology,
    /// Markdown notes shipped with an external template.
    pub doc: Option<String>,
    /// Lab name derived from an external template's filename.
    pub lab_name: Option<String>,
}

impl LoadedTemplate {
    /// Replace everything in `graph` with this template. Never merges.
    pub fn apply_to(self, graph: &mut GraphModel) -> Result<(), GraphError> {
        tracing::info!(
            template = %self.id,
            nodes = self.topology.nodes.len(),
            links = self.topology.links.len(),
            "applying template"
        );
        graph.replace_all(self.topology)
    }
}

/// Built-in templates and, optionally, an external [`TemplateStore`].
#[derive(Clone)]
pub struct TemplateLibrary {
    builtins: Vec<Template>,
    store: Option<Arc<dyn TemplateStore>>,
}

impl TemplateLibrary {
    /// The built-ins only.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builtins: builtin::all(),
            store: None,
        }
    }

    /// Add an external store.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn TemplateStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// The compiled-in template with this id.
    pub fn builtin(&self, id: &str) -> Option<&Template> {
        self.builtins.iter().find(|t| t.id == id)
    }

    /// Built-ins plus whatever the store lists.
    ///
    /// A store failure leaves `external` empty and is reported in
    /// `external_error`; it never hides the built-ins.
    pub async fn list(&self) -> TemplateListing {
        let builtin = self
            .builtins
            .iter()
            .map(|t| TemplateSummary {
                id: t.id.clone(),
                name: t.name.clone(),
                description: t.description.clone(),
                source: TemplateSource::Builtin,
            })
            .collect();

        let (external, external_error) = match &self.store {
            None => (Vec::new(), None),
            Some(store) => match store.list().await {
                Ok(names) => (
                    names
                        .into_iter()
                        .map(|name| TemplateSummary {
                            id: TemplateId::new(name.clone()),
                            name,
                            description: String::new(),
                            source: TemplateSource::External,
                        })
                        .collect(),
                    None,
                ),
                Err(err) => {
                    tracing::warn!(error = %err, "template store listing failed");
                    (Vec::new(), Some(err))
                }
            },
        };

        TemplateListing {
            builtin,
            external,
            external_error,
        }
    }

    /// Resolve `id`, built-ins first.
    ///
    /// External templates are fetched and decoded; one that does not decode
    /// is an error rather than an empty graph, so a failed load never wipes
    /// the canvas.
    pub async fn load(&self, id: &str) -> Result<LoadedTemplate, TemplateError> {
        if let Some(template) = self.builtin(id) {
            tracing::debug!(template = id, "loading built-in template");
            return Ok(LoadedTemplate {
                id: template.id.clone(),
                topology: template.topology.clone(),
                doc: None,
                lab_name: None,
            });
        }

        let store = self
            .store
            .as_ref()
            .ok_or_else(|| TemplateError::NotFound(id.to_owned()))?;

        let document = store.fetch(id).await.map_err(|source| match source {
            TransportError::Status { status: 404, .. } => TemplateError::NotFound(id.to_owned()),
            source => TemplateError::Fetch {
                id: id.to_owned(),
                source,
            },
        })?;

        let topology = labwire_codec::try_decode(&document.content)?;
        tracing::debug!(template = id, nodes = topology.nodes.len(), "loaded stored template");
        Ok(LoadedTemplate {
            id: TemplateId::new(id),
            topology,
            doc: document.doc.filter(|doc| !doc.is_empty()),
            lab_name: Some(Manifest::lab_name_from_filename(id).to_owned()),
        })
    }

    /// Hand a file to the store.
    ///
    /// Uploading a manifest does not load it; see [`is_manifest_filename`].
    pub async fn upload(
        &self,
        filename: &str,
        content: Vec<u8>,
    ) -> Result<UploadReceipt, TemplateError> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| TemplateError::Upload("no template store configured".into()))?;
        let receipt = store
            .upload(filename, content)
            .await
            .map_err(|err| match err {
                TransportError::Status { body, .. } => TemplateError::Upload(body),
                other => TemplateError::Upload(other.to_string()),
            })?;
        tracing::info!(filename = %receipt.filename, "template uploaded");
        Ok(receipt)
    }
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TemplateLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateLibrary")
            .field("builtins", &self.builtins.len())
            .field("store", &self.store.is_some())
            .finish()
    }
}

/// Whether an uploaded file is a loadable manifest (as opposed to notes).
pub fn is_manifest_filename(filename: &str) -> bool {
    filename.ends_with(".yaml") || filename.ends_with(".yml")
}

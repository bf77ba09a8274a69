//! # labwire-types: shared vocabulary for container lab topologies
//!
//! This crate defines the data that every other labwire crate passes around:
//! node kinds and their vendor properties, interface naming, the in-memory
//! topology (nodes and links), the external manifest shape, and the two
//! collaborator boundaries the editor talks to over the network.
//!
//! ## Contents
//!
//! | Concern | Types | What it does |
//! |---------|-------|-------------|
//! | Kind registry | [`Kind`], [`KindSpec`], [`NamingRule`] | Vendor kind, manifest kind, default image |
//! | Interface naming | [`Ordinal`], [`interface_name`] | Name of the Nth link on a node |
//! | Topology | [`Node`], [`Link`], [`Topology`] | The graph the editor mutates |
//! | Manifest | [`Manifest`], [`Endpoint`] | The declarative interchange document |
//! | Relay | [`Relay`], [`RelayRequest`], [`RelayResponse`] | Deploy/destroy forwarding |
//! | Storage | [`TemplateStore`], [`TemplateDocument`] | External template catalog |
//!
//! ## Adding a vendor
//!
//! Add a variant to [`Kind`] and one row to its table in [`Kind::spec`].
//! Every match over [`Kind`] is exhaustive, so the compiler points at anything
//! else that needs to learn about the new vendor.

#![deny(missing_docs)]

pub mod error;
pub mod iface;
pub mod id;
pub mod kind;
pub mod manifest;
pub mod relay;
pub mod store;
pub mod topology;

// Re-exports for convenience
pub use error::{CodecError, GraphError, TemplateError, TransportError};
pub use iface::{Ordinal, interface_name};
pub use id::{LinkId, NodeId, TemplateId};
pub use kind::{Kind, KindSpec, NamingRule};
pub use manifest::{DEFAULT_LAB_NAME, Endpoint, Manifest, ManifestLink, ManifestNode, ManifestTopology};
pub use relay::{Relay, RelayMethod, RelayRequest, RelayResponse};
pub use store::{TemplateDocument, TemplateStore, UploadReceipt};
pub use topology::{Link, Node, NodePatch, Position, Topology};

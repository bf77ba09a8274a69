#![deny(missing_docs)]
//! # labwire: umbrella crate
//!
//! One import surface for the labwire crates, behind feature flags, plus a
//! `prelude` for the common editing and deploy flow.

#[cfg(feature = "core")]
pub use labwire_codec as codec;
#[cfg(feature = "deploy")]
pub use labwire_deploy as deploy;
#[cfg(feature = "core")]
pub use labwire_graph as graph;
#[cfg(feature = "templates")]
pub use labwire_template as template;
#[cfg(feature = "core")]
pub use labwire_types as types;

/// Happy-path imports for editing and deploying a lab.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use labwire_types::{
        CodecError, GraphError, Kind, Link, LinkId, Node, NodeId, NodePatch, Ordinal, Position,
        Relay, TemplateError, TemplateStore, Topology, TransportError, interface_name,
    };

    #[cfg(feature = "core")]
    pub use labwire_graph::{Connection, GraphModel};

    #[cfg(feature = "core")]
    pub use labwire_codec::{decode, encode, encode_yaml};

    #[cfg(feature = "templates")]
    pub use labwire_template::{HttpTemplateStore, LoadedTemplate, TemplateLibrary};

    #[cfg(feature = "deploy")]
    pub use labwire_deploy::{DeployConfig, DeployOutcome, DeploySession, HttpRelay};
}

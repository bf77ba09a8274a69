//! The declarative topology manifest exchanged with storage and the relay.
//!
//! ```yaml
//! name: <lab name>
//! topology:
//!   nodes:
//!     <nodeId>:
//!       kind: <external-kind>
//!       image: <image>            # optional
//!       exec: [<cmd>, ...]        # optional
//!       cmd: <cmd>                # optional
//!       mgmt-ipv4: <address>      # optional
//!   links:
//!     - endpoints: ["<nodeId>:<iface>", "<nodeId>:<iface>"]
//! ```
//!
//! Optional fields are omitted when unset, never written as empty values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lab name used when none is given.
pub const DEFAULT_LAB_NAME: &str = "clab-visual-lab";

/// A whole manifest document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Lab name.
    #[serde(default)]
    pub name: String,
    /// Nodes and links.
    pub topology: ManifestTopology,
}

impl Manifest {
    /// Lab name suggested by a template filename: `lab.clab.yml` -> `lab`.
    pub fn lab_name_from_filename(filename: &str) -> &str {
        [".clab.yaml", ".clab.yml"]
            .iter()
            .find_map(|suffix| filename.strip_suffix(suffix))
            .unwrap_or(filename)
    }
}

/// The `topology` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestTopology {
    /// Nodes keyed by id, in document order.
    pub nodes: IndexMap<String, ManifestNode>,
    /// Point-to-point links.
    #[serde(default)]
    pub links: Vec<ManifestLink>,
}

/// One entry of `topology.nodes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestNode {
    /// External (orchestrator) kind.
    #[serde(default)]
    pub kind: String,
    /// Container image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Post-start commands.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exec: Vec<String>,
    /// Start command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,
    /// Static management address.
    #[serde(
        rename = "mgmt-ipv4",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub mgmt_ipv4: Option<String>,
}

/// One entry of `topology.links`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestLink {
    /// Exactly two `"node:interface"` strings.
    pub endpoints: [String; 2],
}

impl ManifestLink {
    /// Link two endpoints.
    pub fn new(a: &Endpoint, b: &Endpoint) -> Self {
        Self {
            endpoints: [a.to_string(), b.to_string()],
        }
    }
}

/// A parsed `"node:interface"` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Node id.
    pub node: String,
    /// Interface name.
    pub interface: String,
}

impl Endpoint {
    /// Create an endpoint.
    pub fn new(node: impl Into<String>, interface: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            interface: interface.into(),
        }
    }

    /// Split on the last `:`. `None` when there is no separator or either
    /// side is empty.
    pub fn parse(text: &str) -> Option<Self> {
        let (node, interface) = text.rsplit_once(':')?;
        if node.is_empty() || interface.is_empty() {
            return None;
        }
        Some(Self::new(node, interface))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.node, self.interface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_splits_on_last_separator() {
        let ep = Endpoint::parse("leaf:1:ethernet-1/1").unwrap();
        assert_eq!(ep.node, "leaf:1");
        assert_eq!(ep.interface, "ethernet-1/1");
    }

    #[test]
    fn endpoint_without_separator_is_rejected() {
        assert!(Endpoint::parse("host1").is_none());
        assert!(Endpoint::parse("host1:").is_none());
        assert!(Endpoint::parse(":eth1").is_none());
    }

    #[test]
    fn lab_name_strips_manifest_suffix() {
        assert_eq!(Manifest::lab_name_from_filename("srl01.clab.yml"), "srl01");
        assert_eq!(Manifest::lab_name_from_filename("vlan.clab.yaml"), "vlan");
        assert_eq!(Manifest::lab_name_from_filename("notes.md"), "notes.md");
    }

    #[test]
    fn optional_node_fields_are_omitted() {
        let node = ManifestNode {
            kind: "linux".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "linux" }));
    }
}

//! Graph -> manifest.

use labwire_types::{
    CodecError, DEFAULT_LAB_NAME, Endpoint, Link, Manifest, ManifestLink, ManifestNode,
    ManifestTopology, Node, Topology,
};

/// Interface written for a link end whose name was never assigned.
const FALLBACK_INTERFACE: &str = "eth1";

// ─── Manifest mapping ────────────────────────────────────────────────────────

/// Build the manifest for `nodes` and `links`.
///
/// Nodes and links keep their order. Optional node fields are left out when
/// unset rather than written empty. A link without interface names gets
/// `eth1` on that end instead of failing the whole encode.
#[must_use]
pub fn encode(nodes: &[Node], links: &[Link], lab_name: &str) -> Manifest {
    let name = if lab_name.is_empty() {
        DEFAULT_LAB_NAME
    } else {
        lab_name
    };

    let mut topology = ManifestTopology::default();
    for node in nodes {
        topology
            .nodes
            .insert(node.id.to_string(), map_node(node));
    }
    topology.links = links.iter().map(map_link).collect();

    Manifest {
        name: name.to_owned(),
        topology,
    }
}

/// [`encode`] over an owned snapshot.
#[must_use]
pub fn encode_topology(topology: &Topology, lab_name: &str) -> Manifest {
    encode(&topology.nodes, &topology.links, lab_name)
}

fn map_node(node: &Node) -> ManifestNode {
    ManifestNode {
        kind: node.kind.external_kind().to_owned(),
        image: (!node.image.is_empty()).then(|| node.image.clone()),
        exec: node.exec.clone(),
        cmd: node.cmd.clone(),
        mgmt_ipv4: node.mgmt_ipv4.clone(),
    }
}

fn map_link(link: &Link) -> ManifestLink {
    let source = Endpoint::new(
        link.source.as_str(),
        link.source_interface.as_deref().unwrap_or(FALLBACK_INTERFACE),
    );
    let target = Endpoint::new(
        link.target.as_str(),
        link.target_interface.as_deref().unwrap_or(FALLBACK_INTERFACE),
    );
    ManifestLink::new(&source, &target)
}

// ─── Text rendering ──────────────────────────────────────────────────────────

/// Render a manifest as YAML.
pub fn render_yaml(manifest: &Manifest) -> Result<String, CodecError> {
    serde_yaml::to_string(manifest).map_err(|e| CodecError::Render(e.to_string()))
}

/// [`encode`] and render as YAML: the live preview and the uploadable file.
pub fn encode_yaml(nodes: &[Node], links: &[Link], lab_name: &str) -> Result<String, CodecError> {
    render_yaml(&encode(nodes, links, lab_name))
}

/// [`encode`] as a JSON value, the shape the relay forwards downstream.
pub fn encode_json(
    nodes: &[Node],
    links: &[Link],
    lab_name: &str,
) -> Result<serde_json::Value, CodecError> {
    serde_json::to_value(encode(nodes, links, lab_name)).map_err(|e| CodecError::Render(e.to_string()))
}

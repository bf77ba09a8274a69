//! Manifest -> graph.

use labwire_types::{
    CodecError, Endpoint, Kind, Link, LinkId, Manifest, ManifestNode, Node, Position, Topology,
};

/// Nodes per row of the decode layout.
pub const GRID_COLUMNS: usize = 3;
/// Horizontal distance between layout columns.
pub const COLUMN_PITCH: f64 = 250.0;
/// Vertical distance between layout rows.
pub const ROW_PITCH: f64 = 200.0;
/// Position of the first decoded node.
pub const GRID_ORIGIN: Position = Position { x: 100.0, y: 100.0 };

/// Canvas position of the `index`-th decoded node.
pub fn grid_position(index: usize) -> Position {
    let column = (index % GRID_COLUMNS) as f64;
    let row = (index / GRID_COLUMNS) as f64;
    Position::new(
        GRID_ORIGIN.x + column * COLUMN_PITCH,
        GRID_ORIGIN.y + row * ROW_PITCH,
    )
}

/// Parse manifest text into a graph.
///
/// Never fails: text without a `topology.nodes` section, invalid YAML, or a
/// malformed link endpoint all yield an empty graph and a logged warning.
pub fn decode(text: &str) -> Topology {
    match try_decode(text) {
        Ok(topology) => topology,
        Err(err) => {
            tracing::warn!(error = %err, "manifest not decodable, using an empty graph");
            Topology::default()
        }
    }
}

/// Parse manifest text into a graph, reporting why it is not a manifest.
pub fn try_decode(text: &str) -> Result<Topology, CodecError> {
    let manifest: Manifest =
        serde_yaml::from_str(text).map_err(|e| CodecError::MalformedManifest(e.to_string()))?;
    from_manifest(&manifest)
}

/// Map an already parsed manifest into a graph.
pub fn from_manifest(manifest: &Manifest) -> Result<Topology, CodecError> {
    let nodes = manifest
        .topology
        .nodes
        .iter()
        .enumerate()
        .map(|(index, (id, node))| map_node(id, node, grid_position(index)))
        .collect();

    let links = manifest
        .topology
        .links
        .iter()
        .enumerate()
        .map(|(index, link)| -> Result<Link, CodecError> {
            let [a, b] = &link.endpoints;
            let source = parse_endpoint(a)?;
            let target = parse_endpoint(b)?;
            let id = LinkId::new(format!("e-{}-{}-{index}", source.node, target.node));
            Ok(Link::new(
                id,
                source.node,
                source.interface,
                target.node,
                target.interface,
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        lab = %manifest.name,
        nodes = manifest.topology.nodes.len(),
        links = manifest.topology.links.len(),
        "manifest decoded"
    );
    Ok(Topology::new(nodes, links))
}

fn map_node(id: &str, node: &ManifestNode, position: Position) -> Node {
    let kind = Kind::from_external(&node.kind, node.image.as_deref());
    Node {
        id: id.into(),
        kind,
        image: node.image.clone().unwrap_or_default(),
        label: id.to_owned(),
        position,
        exec: node.exec.clone(),
        cmd: node.cmd.clone(),
        mgmt_ipv4: node.mgmt_ipv4.clone(),
    }
}

fn parse_endpoint(text: &str) -> Result<Endpoint, CodecError> {
    Endpoint::parse(text).ok_or_else(|| CodecError::MalformedEndpoint(text.to_owned()))
}

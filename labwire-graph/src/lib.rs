#![deny(missing_docs)]
//! The editable lab graph.
//!
//! [`GraphModel`] owns the live node and link sets and is the only place they
//! change. It is a plain value: the editor holds one and passes it by
//! reference, and every mutation is a single `&mut self` call, so no locking
//! is involved.
//!
//! Interface names are assigned when a link is created, from the number of
//! links the endpoint already has at that moment, and are never recomputed.

use std::collections::HashSet;

use labwire_types::{
    GraphError, Kind, Link, LinkId, Node, NodeId, NodePatch, Ordinal, Position, Topology,
    interface_name,
};
use uuid::Uuid;

/// A request to link two nodes, as produced by a canvas drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Source node.
    pub source: NodeId,
    /// Target node.
    pub target: NodeId,
    /// Canvas handle on the source node.
    pub source_handle: Option<String>,
    /// Canvas handle on the target node.
    pub target_handle: Option<String>,
}

impl Connection {
    /// Connect `source` to `target` without canvas handles.
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    /// Attach canvas handle ids.
    #[must_use]
    pub fn handles(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source_handle = Some(source.into());
        self.target_handle = Some(target.into());
        self
    }
}

/// The authoritative in-memory graph.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    nodes: Vec<Node>,
    links: Vec<Link>,
    id_counter: usize,
}

impl GraphModel {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph holding `topology`. Fails on duplicate node ids.
    pub fn from_topology(topology: Topology) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        graph.replace_all(topology)?;
        Ok(graph)
    }

    /// Nodes, in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Links, in insertion order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Look up a node.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Look up a link.
    pub fn link(&self, id: &LinkId) -> Option<&Link> {
        self.links.iter().find(|l| &l.id == id)
    }

    /// Number of live links touching `id`. A self-loop counts once.
    pub fn incident_count(&self, id: &NodeId) -> usize {
        self.links.iter().filter(|l| l.touches(id)).count()
    }

    /// Append a node. Never overwrites: a colliding id is rejected.
    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.node(&node.id).is_some() {
            return Err(GraphError::DuplicateNodeId(node.id));
        }
        tracing::debug!(node = %node.id, kind = %node.kind, "node added");
        self.nodes.push(node);
        Ok(())
    }

    /// A fresh `{kind}-{n}` id.
    ///
    /// `n` comes from a counter that only moves forward and skips ids already
    /// in the graph, so deleting and re-adding nodes never reuses an id.
    pub fn next_node_id(&mut self, kind: &Kind) -> NodeId {
        self.id_counter = self.id_counter.max(self.nodes.len());
        loop {
            self.id_counter += 1;
            let candidate = NodeId::new(format!("{kind}-{}", self.id_counter));
            if self.node(&candidate).is_none() {
                return candidate;
            }
        }
    }

    /// Palette drop: create a node of `kind` with its default image at
    /// `position` and return its id.
    pub fn place(&mut self, kind: Kind, position: Position) -> NodeId {
        let id = self.next_node_id(&kind);
        let mut node = Node::new(id.clone(), kind);
        node.position = position;
        tracing::debug!(node = %id, kind = %node.kind, "node placed");
        self.nodes.push(node);
        id
    }

    /// Merge `patch` into node `id`. Returns `false` (and changes nothing)
    /// when the node does not exist.
    pub fn update_node(&mut self, id: &NodeId, patch: NodePatch) -> bool {
        match self.nodes.iter_mut().find(|n| &n.id == id) {
            Some(node) => {
                node.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Link two nodes and assign interface names to both ends.
    ///
    /// Each end gets `interface_name(kind, 1 + links already on that node)`.
    /// Returns `None` without touching the graph when either node is unknown.
    pub fn connect(&mut self, connection: Connection) -> Option<LinkId> {
        let Connection {
            source,
            target,
            source_handle,
            target_handle,
        } = connection;

        let (Some(source_node), Some(target_node)) = (self.node(&source), self.node(&target))
        else {
            tracing::debug!(source = %source, target = %target, "connect ignored: unknown node");
            return None;
        };

        let source_interface = interface_name(
            &source_node.kind,
            Ordinal::after(self.incident_count(&source)),
        );
        let target_interface = interface_name(
            &target_node.kind,
            Ordinal::after(self.incident_count(&target)),
        );

        let id = LinkId::new(format!("e-{source}-{target}-{}", Uuid::new_v4().simple()));
        tracing::debug!(
            link = %id,
            source = %source,
            target = %target,
            source_interface = %source_interface,
            target_interface = %target_interface,
            "nodes connected"
        );
        let link = Link::new(id.clone(), source, source_interface, target, target_interface)
            .with_handles(source_handle, target_handle);
        self.links.push(link);
        Some(id)
    }

    /// Remove a node. Links touching it are left in place; see
    /// [`GraphModel::dangling_links`] and [`GraphModel::remove_node_cascade`].
    pub fn remove_node(&mut self, id: &NodeId) -> Option<Node> {
        let index = self.nodes.iter().position(|n| &n.id == id)?;
        Some(self.nodes.remove(index))
    }

    /// Remove a node together with every link touching it.
    pub fn remove_node_cascade(&mut self, id: &NodeId) -> Option<(Node, Vec<Link>)> {
        let node = self.remove_node(id)?;
        let (removed, kept): (Vec<Link>, Vec<Link>) =
            std::mem::take(&mut self.links).into_iter().partition(|l| l.touches(id));
        self.links = kept;
        Some((node, removed))
    }

    /// Remove a link. The other links keep their interface names.
    pub fn remove_link(&mut self, id: &LinkId) -> Option<Link> {
        let index = self.links.iter().position(|l| &l.id == id)?;
        Some(self.links.remove(index))
    }

    /// Links with an end on a node that is not in the graph.
    pub fn dangling_links(&self) -> impl Iterator<Item = &Link> {
        self.links
            .iter()
            .filter(|l| self.node(&l.source).is_none() || self.node(&l.target).is_none())
    }

    /// Replace the whole graph. On error the graph is left as it was.
    pub fn replace_all(&mut self, topology: Topology) -> Result<(), GraphError> {
        {
            let mut seen = HashSet::with_capacity(topology.nodes.len());
            if let Some(dup) = topology.nodes.iter().find(|n| !seen.insert(&n.id)) {
                return Err(GraphError::DuplicateNodeId(dup.id.clone()));
            }
        }
        tracing::debug!(
            nodes = topology.nodes.len(),
            links = topology.links.len(),
            "graph replaced"
        );
        self.nodes = topology.nodes;
        self.links = topology.links;
        Ok(())
    }

    /// Remove every node and link.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.links.clear();
    }

    /// An owned copy of the current graph.
    pub fn snapshot(&self) -> Topology {
        Topology::new(self.nodes.clone(), self.links.clone())
    }
}

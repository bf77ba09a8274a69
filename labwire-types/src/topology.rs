//! The editable graph: nodes, links, and partial node updates.

use serde::{Deserialize, Serialize};

use crate::id::{LinkId, NodeId};
use crate::kind::Kind;

/// Canvas position. Layout only; never written to a manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal canvas coordinate.
    pub x: f64,
    /// Vertical canvas coordinate.
    pub y: f64,
}

impl Position {
    /// Create a position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A lab node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique id, stable for the node's lifetime.
    pub id: NodeId,
    /// Internal kind.
    pub kind: Kind,
    /// Container image. Empty means "let the orchestrator decide".
    #[serde(default)]
    pub image: String,
    /// Display label.
    pub label: String,
    /// Canvas position.
    #[serde(default)]
    pub position: Position,
    /// Commands run inside the node after it starts (`exec`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exec: Vec<String>,
    /// Start command override (`cmd`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,
    /// Static management address (`mgmt-ipv4`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mgmt_ipv4: Option<String>,
}

impl Node {
    /// A node with the kind's default image, labelled with its id.
    pub fn new(id: impl Into<NodeId>, kind: Kind) -> Self {
        let id = id.into();
        Self {
            label: id.to_string(),
            image: kind.default_image().to_owned(),
            id,
            kind,
            position: Position::default(),
            exec: Vec::new(),
            cmd: None,
            mgmt_ipv4: None,
        }
    }

    /// Override the image.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Override the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Place the node on the canvas.
    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// Set the post-start commands.
    #[must_use]
    pub fn with_exec<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exec = commands.into_iter().map(Into::into).collect();
        self
    }

    /// Set the start command.
    #[must_use]
    pub fn with_cmd(mut self, cmd: impl Into<String>) -> Self {
        self.cmd = Some(cmd.into());
        self
    }

    /// Set the management address.
    #[must_use]
    pub fn with_mgmt_ipv4(mut self, addr: impl Into<String>) -> Self {
        self.mgmt_ipv4 = Some(addr.into());
        self
    }

    /// Merge the fields set in `patch`.
    pub fn apply(&mut self, patch: NodePatch) {
        let NodePatch {
            label,
            image,
            exec,
            cmd,
            mgmt_ipv4,
            position,
        } = patch;
        if let Some(label) = label {
            self.label = label;
        }
        if let Some(image) = image {
            self.image = image;
        }
        if let Some(exec) = exec {
            self.exec = exec;
        }
        if let Some(cmd) = cmd {
            self.cmd = cmd;
        }
        if let Some(mgmt_ipv4) = mgmt_ipv4 {
            self.mgmt_ipv4 = mgmt_ipv4;
        }
        if let Some(position) = position {
            self.position = position;
        }
    }
}

/// Partial update of a node's editable fields. `None` leaves a field alone.
///
/// The id and kind are not editable: changing either would invalidate the
/// interface names already assigned to the node's links.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    /// New label.
    pub label: Option<String>,
    /// New image.
    pub image: Option<String>,
    /// New post-start commands.
    pub exec: Option<Vec<String>>,
    /// New start command; `Some(None)` clears it.
    pub cmd: Option<Option<String>>,
    /// New management address; `Some(None)` clears it.
    pub mgmt_ipv4: Option<Option<String>>,
    /// New position.
    pub position: Option<Position>,
}

impl NodePatch {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the image.
    #[must_use]
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Replace the post-start commands.
    #[must_use]
    pub fn exec<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exec = Some(commands.into_iter().map(Into::into).collect());
        self
    }

    /// Set the start command.
    #[must_use]
    pub fn cmd(mut self, cmd: impl Into<String>) -> Self {
        self.cmd = Some(Some(cmd.into()));
        self
    }

    /// Remove the start command.
    #[must_use]
    pub fn clear_cmd(mut self) -> Self {
        self.cmd = Some(None);
        self
    }

    /// Set the management address.
    #[must_use]
    pub fn mgmt_ipv4(mut self, addr: impl Into<String>) -> Self {
        self.mgmt_ipv4 = Some(Some(addr.into()));
        self
    }

    /// Move the node.
    #[must_use]
    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Position::new(x, y));
        self
    }
}

/// A link between two node interfaces.
///
/// Interface names are assigned once, when the link is created, and carried
/// as data from then on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Unique id.
    pub id: LinkId,
    /// Source node.
    pub source: NodeId,
    /// Target node.
    pub target: NodeId,
    /// Canvas handle on the source node (UI only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    /// Canvas handle on the target node (UI only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
    /// Interface on the source node.
    #[serde(default)]
    pub source_interface: Option<String>,
    /// Interface on the target node.
    #[serde(default)]
    pub target_interface: Option<String>,
    /// Display label, `"{source_interface} : {target_interface}"`.
    #[serde(default)]
    pub label: String,
}

impl Link {
    /// A link with both interfaces assigned and the standard label.
    pub fn new(
        id: impl Into<LinkId>,
        source: impl Into<NodeId>,
        source_interface: impl Into<String>,
        target: impl Into<NodeId>,
        target_interface: impl Into<String>,
    ) -> Self {
        let source_interface = source_interface.into();
        let target_interface = target_interface.into();
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
            label: Link::label_for(&source_interface, &target_interface),
            source_interface: Some(source_interface),
            target_interface: Some(target_interface),
        }
    }

    /// Attach canvas handle ids.
    #[must_use]
    pub fn with_handles(mut self, source: Option<String>, target: Option<String>) -> Self {
        self.source_handle = source;
        self.target_handle = target;
        self
    }

    /// The display label for an interface pair.
    pub fn label_for(source_interface: &str, target_interface: &str) -> String {
        format!("{source_interface} : {target_interface}")
    }

    /// Whether either end of the link is on `node`.
    pub fn touches(&self, node: &NodeId) -> bool {
        &self.source == node || &self.target == node
    }
}

/// An owned set of nodes and links.
///
/// Used for codec output, template graphs, and the snapshots a deploy sends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    /// Nodes, in insertion order.
    pub nodes: Vec<Node>,
    /// Links, in insertion order.
    pub links: Vec<Link>,
}

impl Topology {
    /// Bundle nodes and links.
    pub fn new(nodes: Vec<Node>, links: Vec<Link>) -> Self {
        Self { nodes, links }
    }

    /// No nodes and no links.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }
}

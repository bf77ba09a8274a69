//! Remediation hints for well-known orchestrator failures.
//!
//! Matching is substring-based and additive: a hint is logged after the
//! error it explains, never instead of it.

use std::sync::LazyLock;

use regex::Regex;

static BRIDGE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"bridge "([^"]+)""#).expect("valid regex"));

/// A recognized failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hint {
    /// A lab with this name is already running.
    AlreadyDeployed,
    /// The remote host cannot pull a node's image.
    ImageUnavailable,
    /// A bridge the topology references is missing on the host.
    MissingBridge(String),
}

impl Hint {
    /// The line shown to the user.
    pub fn message(&self) -> String {
        match self {
            Hint::AlreadyDeployed => {
                "TIP: Try changing the Lab Name or click 'Destroy Lab' to clean up.".to_owned()
            }
            Hint::ImageUnavailable => "TIP: This node (e.g. Arista/Juniper) requires a local Docker image or specific registry login. Ensure the image is available on your remote host or click the node to edit its 'Image' property.".to_owned(),
            Hint::MissingBridge(bridge) => format!(
                "TIP: Bridge nodes must exist on your remote Linux host. Create it using: 'sudo ip link add name {bridge} type bridge && sudo ip link set {bridge} up'"
            ),
        }
    }
}

/// Every hint that applies to a failed response, in a fixed order.
pub fn classify(status: u16, error: &str) -> Vec<Hint> {
    let mut hints = Vec::new();
    if status == 500 && error.contains("already been deployed") {
        hints.push(Hint::AlreadyDeployed);
    }
    if error.contains("pull access denied") || error.contains("repository does not exist") {
        hints.push(Hint::ImageUnavailable);
    }
    if error.contains("referenced in topology but does not exist") {
        let bridge = BRIDGE_NAME
            .captures(error)
            .and_then(|c| c.get(1))
            .map_or("the bridge", |m| m.as_str());
        hints.push(Hint::MissingBridge(bridge.to_owned()));
    }
    hints
}

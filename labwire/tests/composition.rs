//! Composition tests: the editing flow through the umbrella crate.

use labwire::prelude::*;
use labwire::types::{RelayRequest, RelayResponse};
use std::sync::{Arc, Mutex};

// --- Mock relay ---

#[derive(Default)]
struct RecordingRelay {
    requests: Mutex<Vec<RelayRequest>>,
}

#[async_trait::async_trait]
impl Relay for RecordingRelay {
    async fn forward(&self, request: RelayRequest) -> Result<RelayResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        Ok(RelayResponse {
            status: 201,
            data: Some(serde_json::json!("deployed")),
            error: None,
        })
    }
}

// --- Tests ---

#[tokio::test]
async fn template_edit_encode_deploy() {
    let library = TemplateLibrary::new();
    let mut graph = GraphModel::new();
    library
        .load("linux-bridge-basic")
        .await
        .unwrap()
        .apply_to(&mut graph)
        .unwrap();
    assert_eq!(graph.nodes().len(), 3);

    // br already has two links, so its next interface is eth3.
    let router = graph.place(Kind::Frr, Position::new(250.0, 500.0));
    let link = graph
        .connect(Connection::new(NodeId::new("br"), router.clone()))
        .unwrap();
    let link = graph.link(&link).unwrap();
    assert_eq!(link.source_interface.as_deref(), Some("eth3"));
    assert_eq!(link.target_interface.as_deref(), Some("eth1"));

    graph.update_node(&router, NodePatch::new().label("core"));

    let yaml = encode_yaml(graph.nodes(), graph.links(), "bridge-lab").unwrap();
    assert!(yaml.contains("br:eth3"), "{yaml}");

    let decoded = decode(&yaml);
    assert_eq!(decoded.nodes.len(), 4);
    assert_eq!(decoded.links.len(), 3);
    assert_eq!(
        decoded.nodes.iter().find(|n| n.id == router).unwrap().kind,
        Kind::Frr
    );

    let relay = Arc::new(RecordingRelay::default());
    let session = DeploySession::with_relay(relay.clone());
    let outcome = session
        .deploy(graph.snapshot(), &DeployConfig::new().lab_name("bridge-lab"))
        .await;
    assert!(outcome.success);
    assert!(outcome.log.contains("Deployment successful!"));
    assert!(outcome.log.contains("deployed"));

    let requests = relay.requests.lock().unwrap();
    let manifest = &requests[0].data.as_ref().unwrap()["topologyContent"];
    assert_eq!(manifest["name"], "bridge-lab");
    assert_eq!(manifest["topology"]["links"].as_array().unwrap().len(), 3);
}

#[test]
fn kinds_name_interfaces_their_own_way() {
    let second = Ordinal::new(2).unwrap();
    assert_eq!(interface_name(&Kind::Linux, second), "eth2");
    assert_eq!(interface_name(&Kind::Nokia, second), "ethernet-1/2");
    assert_eq!(interface_name(&Kind::Juniper, second), "ge-0/0/1");
    assert_eq!(interface_name(&Kind::Mikrotik, second), "ether2");
}

#[test]
fn removing_a_node_leaves_its_links() {
    let mut graph = GraphModel::new();
    let a = graph.place(Kind::Linux, Position::default());
    let b = graph.place(Kind::Arista, Position::default());
    graph.connect(Connection::new(a.clone(), b)).unwrap();

    graph.remove_node(&a).unwrap();
    assert_eq!(graph.dangling_links().count(), 1);
    let manifest = encode(graph.nodes(), graph.links(), "lab");
    assert_eq!(manifest.topology.links.len(), 1);
}

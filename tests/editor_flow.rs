//! End-to-end editor flow against one mock backend serving both the template
//! store and the relay.

use std::sync::Arc;

use labwire_codec::{decode, encode_yaml};
use labwire_deploy::{DeployConfig, DeploySession, Hint, HttpRelay};
use labwire_graph::{Connection, GraphModel};
use labwire_template::{HttpTemplateStore, TemplateLibrary, is_manifest_filename};
use labwire_types::{Kind, NodePatch, Position};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn backend() -> MockServer {
    MockServer::start().await
}

#[tokio::test]
async fn draw_save_reload_deploy_destroy() {
    let server = backend().await;

    // Draw.
    let mut graph = GraphModel::new();
    let srl = graph.place(Kind::Nokia, Position::new(100.0, 100.0));
    let ceos = graph.place(Kind::Arista, Position::new(350.0, 100.0));
    let host = graph.place(Kind::Linux, Position::new(225.0, 300.0));
    graph.connect(Connection::new(srl.clone(), ceos.clone())).unwrap();
    graph.connect(Connection::new(srl.clone(), host.clone())).unwrap();
    graph.update_node(
        &host,
        NodePatch::new().exec(["ip addr add 10.0.0.2/24 dev eth1"]),
    );

    let yaml = encode_yaml(graph.nodes(), graph.links(), "dc1").unwrap();
    assert!(yaml.contains(&format!("{srl}:ethernet-1/2")), "{yaml}");

    // Save.
    Mock::given(method("POST"))
        .and(path("/templates/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "filename": "dc1.clab.yml",
            "message": "Successfully uploaded dc1.clab.yml"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/templates/dc1.clab.yml"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": yaml,
            "doc": "# DC1\nSpine and a host."
        })))
        .mount(&server)
        .await;

    let library =
        TemplateLibrary::new().with_store(Arc::new(HttpTemplateStore::new().base_url(server.uri())));
    let receipt = library
        .upload("dc1.clab.yml", yaml.clone().into_bytes())
        .await
        .unwrap();
    assert!(is_manifest_filename(&receipt.filename));

    // Reload into a fresh editor.
    let loaded = library.load(&receipt.filename).await.unwrap();
    assert_eq!(loaded.lab_name.as_deref(), Some("dc1"));
    assert!(loaded.doc.as_deref().unwrap().starts_with("# DC1"));

    let mut reloaded = GraphModel::new();
    loaded.clone().apply_to(&mut reloaded).unwrap();
    let before = decode(&yaml);
    assert_eq!(reloaded.snapshot().nodes, before.nodes);
    assert_eq!(reloaded.links().len(), 2);

    // The allocator continues from the reloaded links.
    let extra = reloaded.place(Kind::Linux, Position::default());
    assert_ne!(extra, srl);
    let id = reloaded.connect(Connection::new(srl.clone(), extra)).unwrap();
    assert_eq!(
        reloaded.link(&id).unwrap().source_interface.as_deref(),
        Some("ethernet-1/3")
    );

    // Deploy.
    Mock::given(method("POST"))
        .and(path("/relay"))
        .and(body_partial_json(json!({
            "method": "POST",
            "url": "http://clab:8080/api/v1/labs?reconfigure=true",
            "data": {"topologyContent": {"name": "dc1"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 500,
            "error": "Error response from daemon: pull access denied for ceos, repository does not exist"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = DeployConfig::new()
        .api_url("http://clab:8080/api/v1")
        .lab_name(loaded.lab_name.clone().unwrap_or_default());
    let session = DeploySession::new(HttpRelay::new().base_url(server.uri()));
    let outcome = session.deploy(reloaded.snapshot(), &config).await;
    assert!(!outcome.success);
    assert_eq!(outcome.hints, [Hint::ImageUnavailable]);
    assert!(outcome.log.contains("Error (500): Error response from daemon"));

    // Destroy.
    Mock::given(method("POST"))
        .and(path("/relay"))
        .and(body_partial_json(json!({
            "method": "DELETE",
            "url": "http://clab:8080/api/v1/labs/dc1?cleanup=true"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": 200, "data": null})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = session.destroy(&config).await;
    assert!(outcome.success, "{}", outcome.log);
    assert!(outcome.log.contains("Lab destroyed successfully."));
}

#[tokio::test]
async fn builtins_survive_a_dead_template_store() {
    let library = TemplateLibrary::new()
        .with_store(Arc::new(HttpTemplateStore::new().base_url("http://127.0.0.1:1")));
    let listing = library.list().await;
    assert_eq!(listing.builtin.len(), 4);
    assert!(listing.external_error.is_some());

    let mut graph = GraphModel::new();
    library
        .load("linux-bridge-intervlan")
        .await
        .unwrap()
        .apply_to(&mut graph)
        .unwrap();
    assert_eq!(graph.nodes().len(), 6);
    assert_eq!(graph.links().len(), 5);
}

//! Integration tests for the HTTP template store using wiremock.

use std::sync::Arc;

use labwire_graph::GraphModel;
use labwire_template::{HttpTemplateStore, TemplateLibrary};
use labwire_types::{Kind, TemplateError, TemplateStore, TransportError};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OSPF: &str = "name: ospf\ntopology:\n  nodes:\n    r1:\n      kind: linux\n      image: frrouting/frr:latest\n    srl:\n      kind: nokia_srlinux\n  links:\n    - endpoints: [\"r1:eth1\", \"srl:ethernet-1/1\"]\n";

fn store(server: &MockServer) -> HttpTemplateStore {
    HttpTemplateStore::new().base_url(server.uri())
}

#[tokio::test]
async fn list_returns_filenames() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/templates"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!(["ospf.clab.yml", "bgp.clab.yaml"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let names = store(&server).list().await.unwrap();
    assert_eq!(names, ["ospf.clab.yml", "bgp.clab.yaml"]);
}

#[tokio::test]
async fn fetch_returns_content_and_doc() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/templates/ospf.clab.yml"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"content": OSPF, "doc": "# OSPF"})),
        )
        .mount(&server)
        .await;

    let document = store(&server).fetch("ospf.clab.yml").await.unwrap();
    assert_eq!(document.content, OSPF);
    assert_eq!(document.doc.as_deref(), Some("# OSPF"));
}

#[tokio::test]
async fn fetch_without_doc() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/templates/bare.yml"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": OSPF})))
        .mount(&server)
        .await;

    let document = store(&server).fetch("bare.yml").await.unwrap();
    assert!(document.doc.is_none());
}

#[tokio::test]
async fn fetch_escapes_reserved_characters_in_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/templates/lab%232.clab.yml"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": OSPF})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/templates/a%3Fb.clab.yml"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": OSPF})))
        .expect(1)
        .mount(&server)
        .await;

    let library = TemplateLibrary::new().with_store(Arc::new(store(&server)));
    let loaded = library.load("lab#2.clab.yml").await.unwrap();
    assert_eq!(loaded.lab_name.as_deref(), Some("lab#2"));
    let document = store(&server).fetch("a?b.clab.yml").await.unwrap();
    assert_eq!(document.content, OSPF);
}

#[tokio::test]
async fn non_json_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/templates"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = store(&server).list().await.unwrap_err();
    assert!(matches!(err, TransportError::InvalidResponse(_)), "{err:?}");
}

#[tokio::test]
async fn upload_sends_multipart_file_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/templates/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "filename": "lab.clab.yml",
            "message": "Successfully uploaded lab.clab.yml"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = store(&server)
        .upload("lab.clab.yml", OSPF.as_bytes().to_vec())
        .await
        .unwrap();
    assert_eq!(receipt.filename, "lab.clab.yml");
    assert_eq!(receipt.message, "Successfully uploaded lab.clab.yml");

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\""), "{body}");
    assert!(body.contains("filename=\"lab.clab.yml\""), "{body}");
    assert!(body.contains("frrouting/frr:latest"), "{body}");
}

#[tokio::test]
async fn upload_rejection_surfaces_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/templates/upload"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"detail": "Only .yml, .yaml and .md files are allowed"})),
        )
        .mount(&server)
        .await;

    let library = TemplateLibrary::new().with_store(Arc::new(store(&server)));
    let err = library.upload("tool.exe", vec![0]).await.unwrap_err();
    assert!(
        matches!(&err, TemplateError::Upload(msg) if msg == "Only .yml, .yaml and .md files are allowed"),
        "{err:?}"
    );
}

#[tokio::test]
async fn library_loads_stored_template_into_graph() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/templates/ospf.clab.yml"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": OSPF})))
        .mount(&server)
        .await;

    let library = TemplateLibrary::new().with_store(Arc::new(store(&server)));
    let loaded = library.load("ospf.clab.yml").await.unwrap();
    assert_eq!(loaded.lab_name.as_deref(), Some("ospf"));

    let mut graph = GraphModel::new();
    loaded.apply_to(&mut graph).unwrap();
    assert_eq!(graph.nodes()[0].kind, Kind::Frr);
    assert_eq!(graph.nodes()[1].kind, Kind::Nokia);
    assert_eq!(
        graph.links()[0].target_interface.as_deref(),
        Some("ethernet-1/1")
    );
}

#[tokio::test]
async fn missing_stored_template_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/templates/gone.yml"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Template not found"})))
        .mount(&server)
        .await;

    let library = TemplateLibrary::new().with_store(Arc::new(store(&server)));
    let err = library.load("gone.yml").await.unwrap_err();
    assert!(matches!(err, TemplateError::NotFound(id) if id == "gone.yml"));
}

#[tokio::test]
async fn listing_survives_store_outage() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/templates"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let library = TemplateLibrary::new().with_store(Arc::new(store(&server)));
    let listing = library.list().await;
    assert_eq!(listing.builtin.len(), 4);
    assert!(listing.external.is_empty());
    assert!(matches!(
        listing.external_error,
        Some(TransportError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn unreachable_store_is_network_error() {
    let store = HttpTemplateStore::new().base_url("http://127.0.0.1:1");
    let err = store.list().await.unwrap_err();
    assert!(matches!(err, TransportError::Network(_)), "{err:?}");
}

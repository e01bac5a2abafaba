//! End-to-end reconciliation against a mocked Pi-hole.

use dropdock_client::PiholeClient;
use dropdock_core::{block_pattern, DropEntry, MANAGED_TAG};
use dropdock_sync::Reconciler;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SID: &str = "reconcile-test-sid";

async fn authenticated_client(server: &MockServer) -> PiholeClient {
    Mock::given(method("GET"))
        .and(path("/api/auth"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "session": { "valid": false, "sid": null, "message": "password required" }
        })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session": { "valid": true, "sid": SID, "validity": 1800 }
        })))
        .mount(server)
        .await;

    let mut client = PiholeClient::builder()
        .base_url(format!("{}/api", server.uri()))
        .password("secret")
        .build()
        .unwrap();
    client.authenticate().await.unwrap();
    client
}

fn entry(domain: &str, comment: Option<&str>, id: u32) -> serde_json::Value {
    json!({
        "domain": block_pattern(domain),
        "type": "deny",
        "kind": "regex",
        "comment": comment,
        "groups": [0],
        "enabled": true,
        "id": id
    })
}

async fn mount_state(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/groups"))
        .and(header("sid", SID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "groups": [
                { "name": "Default", "enabled": true, "id": 0 },
                { "name": "lab", "enabled": true, "id": 2 },
                { "name": "old", "enabled": false, "id": 3 }
            ]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/domains"))
        .and(header("sid", SID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "domains": [
                entry("a.com", Some(MANAGED_TAG), 1),
                entry("b.com", Some(MANAGED_TAG), 2),
                entry("a.com", None, 3),
                entry("keep.org", Some("manual"), 4)
            ]
        })))
        .mount(server)
        .await;
}

fn feed(domains: &[&str]) -> Vec<DropEntry> {
    domains.iter().map(|d| DropEntry::new(*d)).collect()
}

#[tokio::test]
async fn test_reconcile_against_pihole() {
    let server = MockServer::start().await;
    let client = authenticated_client(&server).await;
    mount_state(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/api/domains/deny/regex/%28%5C.%7C%5E%29a%5C.com%24"))
        .and(header("sid", SID))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/domains/deny/regex"))
        .and(header("sid", SID))
        .and(body_json(json!({
            "domain": [block_pattern("d.com")],
            "comment": MANAGED_TAG,
            "enabled": true,
            "groups": [0, 2]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "domains": [entry("d.com", Some(MANAGED_TAG), 5)],
            "processed": { "success": [{ "item": block_pattern("d.com") }], "errors": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let report = Reconciler::new(&client)
        .run(&feed(&["b.com", "d.com"]))
        .await
        .unwrap();
    assert_eq!(report.deleted, 1);
    assert_eq!(report.added, 1);
    assert_eq!(report.target_groups, vec!["Default", "lab"]);

    let requests = server.received_requests().await.unwrap();
    let mutations: Vec<String> = requests
        .iter()
        .filter(|r| r.method.as_str() != "GET" && r.url.path() != "/api/auth")
        .map(|r| r.method.to_string())
        .collect();
    assert_eq!(mutations, vec!["DELETE", "POST"]);
}

#[tokio::test]
async fn test_failed_delete_prevents_add() {
    let server = MockServer::start().await;
    let client = authenticated_client(&server).await;
    mount_state(&server).await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database is locked"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/domains/deny/regex"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = Reconciler::new(&client)
        .run(&feed(&["d.com"]))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(500));
}

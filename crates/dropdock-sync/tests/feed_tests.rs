use dropdock_core::DropdockError;
use dropdock_sync::{filter_valid, FeedClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FEED: &str = "{\"asn\":64496,\"rir\":\"ripencc\",\"domain\":\"ncryptd.net\",\"cc\":\"NL\",\"asname\":\"NCRYPTD\"}\n\
{\"asn\":64497,\"rir\":\"arin\",\"domain\":\"1.2.3\"}\n\
{\"type\":\"metadata\",\"timestamp\":1717000000,\"size\":2,\"records\":2}\n";

#[tokio::test]
async fn test_fetch_decodes_feed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/drop/asndrop.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
        .expect(1)
        .mount(&server)
        .await;

    let client = FeedClient::new(format!("{}/drop/asndrop.json", server.uri())).unwrap();
    let entries = client.fetch().await.unwrap();
    assert_eq!(entries.len(), 2);

    let valid = filter_valid(entries);
    assert_eq!(valid.len(), 1);
    assert_eq!(valid[0].domain, "ncryptd.net");
    assert_eq!(valid[0].asn, Some(64496));
}

#[tokio::test]
async fn test_fetch_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/drop/asndrop.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = FeedClient::new(format!("{}/drop/asndrop.json", server.uri())).unwrap();
    let err = client.fetch().await.unwrap_err();
    match err {
        DropdockError::Fetch(message) => assert!(message.contains("503")),
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_unreachable() {
    let client = FeedClient::new("http://127.0.0.1:9/drop/asndrop.json").unwrap();
    let err = client.fetch().await.unwrap_err();
    assert!(matches!(err, DropdockError::Fetch(_)));
}

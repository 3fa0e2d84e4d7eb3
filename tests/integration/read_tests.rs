//! Reads: field filtering, relationship resolution and store failures.

use resource_access::config::OrchestratorConfig;
use resource_access::{AttributeValue, ErrorKind, ResourceInstance};

use crate::common::{ALICE, BOB, PUBLIC_POST, TestFixture};

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}

#[tokio::test]
async fn test_invisible_fields_are_left_out_silently() {
    let fixture = TestFixture::new();

    let response = fixture.orchestrator.read("post", &BOB, PUBLIC_POST, Some(&names(&["text", "likedBy"]))).await.unwrap();

    assert_eq!(response.len(), 1);
    assert!(response.contains("text"));
    assert!(!response.contains("likedBy"));
}

#[tokio::test]
async fn test_unknown_requested_field_fails_whole_read() {
    let fixture = TestFixture::new();

    let err = fixture
        .orchestrator
        .read("post", &ALICE, PUBLIC_POST, Some(&names(&["text", "title"])))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnknownField);
    assert!(err.message().contains("title"));
}

#[tokio::test]
async fn test_empty_field_list_returns_nothing() {
    let fixture = TestFixture::new();

    let response = fixture.orchestrator.read("post", &ALICE, PUBLIC_POST, Some(&[])).await.unwrap();

    assert_eq!(response.id, PUBLIC_POST);
    assert!(response.is_empty());
}

#[tokio::test]
async fn test_relationships_skipped_unless_configured() {
    let fixture = TestFixture::with_config(OrchestratorConfig::builder().include_relationships(false).build());

    let response = fixture.orchestrator.read("post", &ALICE, PUBLIC_POST, None).await.unwrap();
    assert!(response.relationships.is_empty());
    assert_eq!(fixture.store.resolve_calls(), 0);

    // Explicitly requested relationships are still returned.
    let response = fixture.orchestrator.read("post", &ALICE, PUBLIC_POST, Some(&names(&["author"]))).await.unwrap();
    assert_eq!(response.relationships.get("author"), Some(&vec![1]));
    assert_eq!(fixture.store.resolve_calls(), 1);
}

#[tokio::test]
async fn test_missing_attribute_reads_as_null() {
    let fixture = TestFixture::new();
    fixture.store.insert(ResourceInstance::new("post", 30).with_relationship("author", vec![1]));

    let response = fixture.orchestrator.read("post", &ALICE, 30, Some(&names(&["text", "likedBy"]))).await.unwrap();

    assert_eq!(response.attributes.get("text"), Some(&AttributeValue::Null));
    assert_eq!(response.relationships.get("likedBy"), Some(&Vec::new()));
}

#[tokio::test]
async fn test_fetch_failure_is_not_reported_as_not_found() {
    let fixture = TestFixture::new();
    fixture.store.set_unavailable(true);

    let err = fixture.orchestrator.read("post", &ALICE, PUBLIC_POST, None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Persistence);
    assert_eq!(err.http_status_code(), 500);
    assert!(err.request_id().is_some());
}

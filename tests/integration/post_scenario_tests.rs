//! End-to-end walk through the post type: sessions, visibility, partial
//! reads, edit rules and the `like` function.

use resource_access::{AttributeValue, ErrorKind, FieldValue, Operation, Request, Response, WriteSet};
use serde_json::json;

use crate::common::{self, ALICE, ANONYMOUS, BOB, MISSING, PRIVATE_POST, PUBLIC_POST, TestFixture};

#[tokio::test]
async fn test_anonymous_principal_needs_session() {
    let fixture = TestFixture::new();

    let err = fixture.orchestrator.read("post", &ANONYMOUS, PUBLIC_POST, None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SessionRequired);
    assert_eq!(err.http_status_code(), 401);
    assert_eq!(fixture.store.fetch_calls(), 0);
}

#[tokio::test]
async fn test_private_post_is_indistinguishable_from_missing() {
    let fixture = TestFixture::new();

    let hidden = fixture.orchestrator.read("post", &BOB, PRIVATE_POST, None).await.unwrap_err();
    let missing = fixture.orchestrator.read("post", &BOB, MISSING, None).await.unwrap_err();

    assert_eq!(hidden.kind(), ErrorKind::NotFound);
    assert_eq!(missing.kind(), ErrorKind::NotFound);
    assert_eq!(hidden.http_status_code(), missing.http_status_code());

    let own = fixture.orchestrator.read("post", &ALICE, PRIVATE_POST, None).await.unwrap();
    assert_eq!(own.attributes.get("text"), Some(&AttributeValue::from("secret plans")));
}

#[tokio::test]
async fn test_partial_read_returns_only_requested_fields() {
    let fixture = TestFixture::new();
    let fields = vec!["text".to_owned()];

    let response = fixture.orchestrator.read("post", &BOB, PUBLIC_POST, Some(&fields)).await.unwrap();

    assert_eq!(response.id, PUBLIC_POST);
    assert_eq!(response.len(), 1);
    assert_eq!(response.attributes.get("text"), Some(&AttributeValue::from("hello world")));
}

#[tokio::test]
async fn test_full_read_leaves_out_hidden_like_count() {
    let policy = common::post_policy().attribute_visible_when(|_, _, name| name != "likeCount");
    let fixture = TestFixture::with_post_policy(policy);

    let response = fixture.orchestrator.read("post", &BOB, PUBLIC_POST, None).await.unwrap();

    assert_eq!(response.attributes.get("text"), Some(&AttributeValue::from("hello world")));
    assert!(!response.contains("likeCount"));

    // The function still sees the whole instance.
    let result = fixture.orchestrator.invoke("post", &BOB, PUBLIC_POST, "like", None).await.unwrap();
    assert_eq!(result.body(), Some(&json!({ "likeCount": 4 })));
}

#[tokio::test]
async fn test_full_read_hides_likers_from_non_authors() {
    let fixture = TestFixture::new();

    let bob_view = fixture.orchestrator.read("post", &BOB, PUBLIC_POST, None).await.unwrap();
    assert_eq!(bob_view.attributes.get("id"), Some(&AttributeValue::Integer(PUBLIC_POST)));
    assert_eq!(bob_view.attributes.get("likeCount"), Some(&AttributeValue::Integer(3)));
    assert_eq!(bob_view.relationships.get("author"), Some(&vec![1]));
    assert!(!bob_view.contains("likedBy"));

    let alice_view = fixture.orchestrator.read("post", &ALICE, PUBLIC_POST, None).await.unwrap();
    assert_eq!(alice_view.relationships.get("likedBy"), Some(&vec![3, 4, 5]));
}

#[tokio::test]
async fn test_like_returns_handler_result_verbatim() {
    let fixture = TestFixture::new();

    let result = fixture.orchestrator.invoke("post", &BOB, PUBLIC_POST, "like", None).await.unwrap();

    assert_eq!(result.status(), 200);
    assert_eq!(result.body(), Some(&json!({ "likeCount": 4 })));

    let stored = fixture.stored("post", PUBLIC_POST);
    assert_eq!(stored.attribute("likeCount"), Some(&AttributeValue::Integer(4)));
    assert!(stored.relates_to("likedBy", 2));
}

#[tokio::test]
async fn test_like_count_only_changes_through_function() {
    let fixture = TestFixture::new();
    let fields = WriteSet::from([("likeCount".to_owned(), FieldValue::attribute(1000))]);

    let err = fixture.orchestrator.update("post", &ALICE, PUBLIC_POST, fields).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Forbidden);
    assert_eq!(fixture.store.apply_write_calls(), 0);
    assert_eq!(fixture.stored("post", PUBLIC_POST).attribute("likeCount"), Some(&AttributeValue::Integer(3)));
}

#[tokio::test]
async fn test_author_edits_text_stranger_cannot() {
    let fixture = TestFixture::new();
    let fields = WriteSet::from([("text".to_owned(), FieldValue::attribute("edited"))]);

    let err = fixture.orchestrator.update("post", &BOB, PUBLIC_POST, fields.clone()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    fixture.orchestrator.update("post", &ALICE, PUBLIC_POST, fields).await.unwrap();
    assert_eq!(fixture.stored("post", PUBLIC_POST).attribute("text"), Some(&AttributeValue::from("edited")));
    assert_eq!(fixture.store.apply_write_calls(), 1);
}

#[tokio::test]
async fn test_create_then_delete_through_requests() {
    let fixture = TestFixture::new();
    let fields = WriteSet::from([
        ("text".to_owned(), FieldValue::attribute("fresh")),
        ("author".to_owned(), FieldValue::Targets(vec![2])),
    ]);

    let created = fixture
        .orchestrator
        .handle(Request::new("post", BOB, Operation::Create { fields }))
        .await
        .unwrap();
    assert!(matches!(created, Response::Created { .. }), "expected Created, got {created:?}");
    let Response::Created { id } = created else { return };
    assert!(fixture.stored("post", id).relates_to("author", 2));

    let err = fixture.orchestrator.delete("post", &ALICE, id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    let deleted = fixture.orchestrator.handle(Request::new("post", BOB, Operation::Delete { id })).await.unwrap();
    assert_eq!(deleted, Response::Deleted);
    assert!(fixture.store.get("post", id).is_none());
}

#[tokio::test]
async fn test_users_need_no_session() {
    let fixture = TestFixture::new();

    let response = fixture.orchestrator.read("user", &ANONYMOUS, 1, None).await.unwrap();

    assert_eq!(response.attributes.get("name"), Some(&AttributeValue::from("alice")));
    assert_eq!(response.attributes.get("userID"), Some(&AttributeValue::Integer(1)));
    assert!(!response.contains("email"));

    let own = fixture.orchestrator.read("user", &ALICE, 1, None).await.unwrap();
    assert_eq!(own.attributes.get("email"), Some(&AttributeValue::from("alice@example.com")));
}

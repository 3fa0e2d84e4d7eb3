//! Which error wins when a request is wrong in more than one way.

use resource_access::{ErrorKind, FieldValue, Operation, Principal, Request, ResourceId, WriteSet};
use test_case::test_case;

use crate::common::{ALICE, ANONYMOUS, BOB, DRAFT, MISSING, PRIVATE_POST, PUBLIC_POST, TestFixture};

fn bogus_write() -> WriteSet {
    WriteSet::from([("bogus".to_owned(), FieldValue::attribute(1))])
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Create,
    Read,
    Update,
    Delete,
    Invoke,
}

/// Builds `op` naming an undeclared field or function where it can.
fn operation(op: Op, id: ResourceId) -> Operation {
    match op {
        Op::Create => Operation::Create { fields: bogus_write() },
        Op::Read => Operation::Read { id, fields: Some(vec!["bogus".to_owned()]) },
        Op::Update => Operation::Update { id, fields: bogus_write() },
        Op::Delete => Operation::Delete { id },
        Op::Invoke => Operation::Invoke { id, function: "bogus".to_owned(), payload: None },
    }
}

async fn kind_of(fixture: &TestFixture, path: &str, principal: Principal, op: Operation) -> ErrorKind {
    let err = fixture.orchestrator.handle(Request::new(path, principal, op)).await.unwrap_err();
    assert!(err.request_id().is_some(), "every error carries the request id");
    err.kind()
}

#[test_case(Op::Create)]
#[test_case(Op::Read)]
#[test_case(Op::Update)]
#[test_case(Op::Delete)]
#[test_case(Op::Invoke)]
#[tokio::test]
async fn test_unknown_resource_beats_everything(op: Op) {
    let fixture = TestFixture::new();

    assert_eq!(kind_of(&fixture, "nope", ANONYMOUS, operation(op, MISSING)).await, ErrorKind::UnknownResource);
}

#[test_case(Op::Create)]
#[test_case(Op::Read)]
#[test_case(Op::Update)]
#[test_case(Op::Delete)]
#[test_case(Op::Invoke)]
#[tokio::test]
async fn test_session_required_beats_not_found(op: Op) {
    let fixture = TestFixture::new();

    assert_eq!(kind_of(&fixture, "post", ANONYMOUS, operation(op, MISSING)).await, ErrorKind::SessionRequired);
    assert_eq!(fixture.store.fetch_calls(), 0);
}

#[test_case(Op::Read)]
#[test_case(Op::Update)]
#[test_case(Op::Delete)]
#[test_case(Op::Invoke)]
#[tokio::test]
async fn test_not_found_beats_forbidden_and_unknown_names(op: Op) {
    let fixture = TestFixture::new();

    assert_eq!(kind_of(&fixture, "post", BOB, operation(op, MISSING)).await, ErrorKind::NotFound);
    assert_eq!(kind_of(&fixture, "post", BOB, operation(op, PRIVATE_POST)).await, ErrorKind::NotFound);
    assert_eq!(kind_of(&fixture, "draft", ALICE, operation(op, DRAFT)).await, ErrorKind::NotFound);
}

#[test_case(BOB, ErrorKind::Forbidden; "non-editor is forbidden first")]
#[test_case(ALICE, ErrorKind::UnknownField; "editor learns about the unknown field")]
#[tokio::test]
async fn test_forbidden_beats_unknown_field_on_update(principal: Principal, expected: ErrorKind) {
    let fixture = TestFixture::new();

    assert_eq!(kind_of(&fixture, "post", principal, operation(Op::Update, PUBLIC_POST)).await, expected);
    assert_eq!(fixture.store.apply_write_calls(), 0);
}

#[tokio::test]
async fn test_forbidden_beats_unknown_field_on_create() {
    let fixture = TestFixture::new();

    // Applications without a user may not create posts.
    let app = Principal::client_only(100);
    assert_eq!(kind_of(&fixture, "post", app, operation(Op::Create, 0)).await, ErrorKind::Forbidden);
    assert_eq!(kind_of(&fixture, "post", BOB, operation(Op::Create, 0)).await, ErrorKind::UnknownField);
    assert_eq!(fixture.store.create_calls(), 0);
}

#[tokio::test]
async fn test_visible_instance_with_undeclared_function() {
    let fixture = TestFixture::new();

    assert_eq!(kind_of(&fixture, "post", BOB, operation(Op::Invoke, PUBLIC_POST)).await, ErrorKind::UnknownFunction);
}

#[tokio::test]
async fn test_unknown_field_on_visible_read() {
    let fixture = TestFixture::new();

    assert_eq!(kind_of(&fixture, "post", BOB, operation(Op::Read, PUBLIC_POST)).await, ErrorKind::UnknownField);
}

//! Function invocation through the orchestrator.

use std::sync::Arc;

use resource_access::{ErrorKind, FunctionResult, Operation, Request, Response};
use serde_json::json;

use crate::common::{ALICE, ANONYMOUS, BOB, PRIVATE_POST, PUBLIC_POST, TestFixture};

#[tokio::test]
async fn test_undeclared_function_never_reaches_a_handler() {
    let fixture = TestFixture::new();

    let err = fixture.orchestrator.invoke("post", &BOB, PUBLIC_POST, "delete_all", None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnknownFunction);
    assert_eq!(fixture.report.calls(), 0);
}

#[tokio::test]
async fn test_declared_function_runs_exactly_once_with_payload() {
    let fixture = TestFixture::new();
    let payload = json!({ "reason": "spam", "details": ["link farm"] });

    let result = fixture.orchestrator.invoke("post", &BOB, PUBLIC_POST, "report", Some(&payload)).await.unwrap();

    assert_eq!(result, FunctionResult::new(202, Some(json!({ "queued": true }))));
    assert_eq!(fixture.report.calls(), 1);
    let recorded = fixture.report.recorded();
    assert_eq!(recorded[0].user_id, Some(2));
    assert_eq!(recorded[0].instance_id, PUBLIC_POST);
    assert_eq!(recorded[0].payload.as_ref(), Some(&payload));
}

#[tokio::test]
async fn test_invisible_instance_never_reaches_a_handler() {
    let fixture = TestFixture::new();

    let err = fixture.orchestrator.invoke("post", &BOB, PRIVATE_POST, "report", None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(fixture.report.calls(), 0);
}

#[tokio::test]
async fn test_session_checked_before_function_name() {
    let fixture = TestFixture::new();

    let err = fixture.orchestrator.invoke("post", &ANONYMOUS, PUBLIC_POST, "delete_all", None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SessionRequired);
}

#[tokio::test]
async fn test_failure_status_keeps_handler_result() {
    let fixture = TestFixture::new();

    let err = fixture.orchestrator.invoke("post", &ALICE, PUBLIC_POST, "pin", None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::HandlerFailure);
    assert_eq!(err.http_status_code(), 409);
    let result = err.function_result().expect("handler result attached");
    assert_eq!(result.body(), Some(&json!({ "error": "already pinned" })));
}

#[tokio::test]
async fn test_handler_error_becomes_handler_failure() {
    let fixture = TestFixture::new();

    let err = fixture.orchestrator.invoke("post", &ALICE, PUBLIC_POST, "purge", None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::HandlerFailure);
    assert_eq!(err.http_status_code(), 500);
    assert!(err.function_result().is_none());
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn test_handler_does_its_own_authorization() {
    let fixture = TestFixture::new();
    fixture.store.insert(
        resource_access::ResourceInstance::new("post", 40)
            .with_attribute("likeCount", 0)
            .with_attribute("visibility", "public"),
    );
    let app = resource_access::Principal::client_only(100);

    let err = fixture.orchestrator.invoke("post", &app, 40, "like", None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::HandlerFailure);
    assert_eq!(err.http_status_code(), 403);
}

#[tokio::test]
async fn test_invoke_request_returns_function_response() {
    let fixture = TestFixture::new();
    let request = Request::new(
        "post",
        BOB,
        Operation::Invoke { id: PUBLIC_POST, function: "like".to_owned(), payload: None },
    );

    let response = fixture.orchestrator.handle(request).await.unwrap();

    assert_eq!(response, Response::Function(FunctionResult::ok(json!({ "likeCount": 4 }))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_invocations_each_run_once() {
    let fixture = TestFixture::new();

    let tasks: Vec<_> = (0..32)
        .map(|n| {
            let orchestrator = Arc::clone(&fixture.orchestrator);
            tokio::spawn(async move {
                let payload = json!({ "n": n });
                orchestrator.invoke("post", &BOB, PUBLIC_POST, "report", Some(&payload)).await
            })
        })
        .collect();

    for task in tasks {
        let result = task.await.expect("task completed").expect("invocation succeeded");
        assert_eq!(result.status(), 202);
    }

    assert_eq!(fixture.report.calls(), 32);
    let mut seen: Vec<i64> =
        fixture.report.recorded().iter().filter_map(|call| call.payload.as_ref()?["n"].as_i64()).collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..32).collect::<Vec<_>>());
}

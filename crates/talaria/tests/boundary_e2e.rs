//! End-to-end tests driving real invocations through the boundary with the
//! demo handler and in-memory stores.

use std::sync::Arc;
use talaria::boundary;
use talaria::demo::DemoHandler;
use talaria::prelude::*;
use talaria::store::{FailingKeyValueStore, MemoryKeyValueStore, StaticRelationalStore};

fn function() -> FunctionContext {
    FunctionContext::new(RequestId::new("req-e2e"), "demo-function")
}

fn demo_handler() -> DemoHandler {
    DemoHandler::new(
        Arc::new(MemoryKeyValueStore::new("pk")),
        Arc::new(StaticRelationalStore::with_rows(Vec::new())),
        "demo-table",
    )
}

#[tokio::test]
async fn happy_path_returns_success_envelope() {
    let event = InvocationEvent::builder()
        .method("POST")
        .path("/demo")
        .body(r#"{"name":"Jane","email":"jane@example.com"}"#)
        .build();

    let response = boundary::run(&demo_handler(), event, &function()).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(
        response.headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
    assert_eq!(
        response
            .headers
            .get("Access-Control-Allow-Origin")
            .map(String::as_str),
        Some("*")
    );

    let body = response.body_json().expect("body should be JSON");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["message"], "Request processed successfully");
    assert!(!body["timestamp"].as_str().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn missing_email_renders_validation_envelope() {
    let event = InvocationEvent::builder()
        .method("POST")
        .body(r#"{"name":"Jane"}"#)
        .build();

    let response = boundary::run(&demo_handler(), event, &function()).await;

    assert_eq!(response.status_code, 400);
    let body = response.body_json().expect("body should be JSON");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "Request validation failed");
    assert_eq!(body["error"]["details"]["email"], "\"email\" is required");
    assert_eq!(body["error"]["requestId"], "req-e2e");
}

#[tokio::test]
async fn malformed_json_body_renders_internal_envelope() {
    let event = InvocationEvent::builder()
        .method("POST")
        .body("{not json")
        .build();

    let response = boundary::run(&demo_handler(), event, &function()).await;

    assert_eq!(response.status_code, 500);
    let body = response.body_json().expect("body should be JSON");
    assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
}

#[tokio::test]
async fn store_outage_does_not_fail_the_request() {
    let handler = DemoHandler::new(
        Arc::new(FailingKeyValueStore::new("connection refused")),
        Arc::new(StaticRelationalStore::failing("pool exhausted")),
        "demo-table",
    );

    let response = boundary::run(&handler, InvocationEvent::default(), &function()).await;

    assert_eq!(response.status_code, 200);
    let body = response.body_json().expect("body should be JSON");
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn untyped_error_renders_internal_envelope_with_request_id() {
    let handler = FnHandler::new(|_request: LambdaRequest| async move { anyhow::bail!("boom") });

    let response = boundary::run(&handler, InvocationEvent::default(), &function()).await;

    assert_eq!(response.status_code, 500);
    let body = response.body_json().expect("body should be JSON");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
    assert_eq!(body["error"]["message"], "boom");
    assert_eq!(body["error"]["requestId"], "req-e2e");
}

#[tokio::test]
async fn typed_errors_map_to_their_status_codes() {
    let cases = vec![
        (TalariaError::validation("bad input"), 400, "VALIDATION_ERROR"),
        (TalariaError::unauthorized("no token"), 401, "UNAUTHORIZED"),
        (TalariaError::not_found("no such user"), 404, "NOT_FOUND"),
        (TalariaError::database("query failed"), 500, "DATABASE_ERROR"),
        (TalariaError::internal("bug"), 500, "INTERNAL_SERVER_ERROR"),
    ];

    for (error, status, code) in cases {
        let handler = FnHandler::new(move |_request: LambdaRequest| {
            let error = error.clone();
            async move { Err(error.into()) }
        });

        let response = boundary::run(&handler, InvocationEvent::default(), &function()).await;

        assert_eq!(response.status_code, status, "status for {code}");
        let body = response.body_json().expect("body should be JSON");
        assert_eq!(body["error"]["code"], code);
    }
}

#[tokio::test]
async fn non_default_success_status_is_preserved() {
    let handler = FnHandler::new(|_request: LambdaRequest| async move {
        Ok(ResponseFormatter::success_with_status(
            &serde_json::json!({"created": true}),
            http::StatusCode::CREATED,
        )?)
    });

    let response = boundary::run(&handler, InvocationEvent::default(), &function()).await;

    assert_eq!(response.status_code, 201);
    let body = response.body_json().expect("body should be JSON");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["created"], true);
}

#[tokio::test]
async fn panicking_handler_is_contained() {
    let handler = FnHandler::new(|_request: LambdaRequest| async move {
        panic!("handler exploded");
        #[allow(unreachable_code)]
        Ok(ResponseFormatter::success(&serde_json::json!({}))?)
    });

    let response = boundary::run(&handler, InvocationEvent::default(), &function()).await;

    assert_eq!(response.status_code, 500);
    let body = response.body_json().expect("body should be JSON");
    assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
    assert_eq!(body["error"]["message"], "handler exploded");
}

#[tokio::test]
async fn error_envelope_has_no_success_fields_and_vice_versa() {
    let ok_handler = FnHandler::new(|_request: LambdaRequest| async move {
        Ok(ResponseFormatter::success(&serde_json::json!({"x": 1}))?)
    });
    let err_handler =
        FnHandler::new(|_request: LambdaRequest| async move { anyhow::bail!("nope") });

    let ok_body = boundary::run(&ok_handler, InvocationEvent::default(), &function())
        .await
        .body_json()
        .expect("body should be JSON");
    let err_body = boundary::run(&err_handler, InvocationEvent::default(), &function())
        .await
        .body_json()
        .expect("body should be JSON");

    assert!(ok_body.get("error").is_none());
    assert!(err_body.get("data").is_none());
    assert_eq!(ok_body["success"], true);
    assert_eq!(err_body["success"], false);
    assert!(ok_body["timestamp"].is_string());
    assert!(err_body["timestamp"].is_string());
}

//! The request boundary.
//!
//! [`run`] is the single chokepoint where execution outcomes are normalized
//! into envelopes. It builds the per-invocation [`RequestContext`], invokes
//! the handler, and guarantees that exactly one well-formed
//! [`LambdaResponse`] comes back for any input: a returned envelope is
//! forwarded unchanged (status code included), any error is rendered via
//! the response formatter, and even a panicking handler is folded into an
//! internal error envelope rather than escaping.
//!
//! There are no retries and no re-entry; one invocation flows
//! `Entered -> HandlerRunning -> Responded` exactly once.

use crate::context::{FunctionContext, RequestContext};
use crate::event::InvocationEvent;
use crate::handler::{Handler, LambdaRequest};
use crate::response::{LambdaResponse, ResponseFormatter};
use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;

/// Runs one invocation through the boundary.
///
/// Never fails and never panics outward; the return type is a plain
/// [`LambdaResponse`], not a `Result`.
///
/// # Example
///
/// ```rust,ignore
/// use talaria_core::{boundary, FnHandler, FunctionContext, InvocationEvent};
///
/// let handler = FnHandler::new(my_handler);
/// let response = boundary::run(&handler, event, &FunctionContext::new(id, name)).await;
/// ```
pub async fn run<H: Handler>(
    handler: &H,
    event: InvocationEvent,
    function: &FunctionContext,
) -> LambdaResponse {
    let context = RequestContext::from_invocation(function);
    let request_id = context.request_id().clone();

    tracing::info!(
        request_id = %request_id,
        function_name = context.function_name(),
        method = event.http_method.as_deref(),
        path = event.path.as_deref(),
        "Lambda invoked"
    );

    let request = LambdaRequest { event, context };
    let outcome = AssertUnwindSafe(handler.handle(request)).catch_unwind().await;

    match outcome {
        Ok(Ok(response)) => {
            tracing::info!(
                request_id = %request_id,
                status_code = response.status_code,
                "Lambda execution completed successfully"
            );
            response
        }
        Ok(Err(error)) => ResponseFormatter::error(&error, &request_id),
        Err(panic) => {
            let error = anyhow::anyhow!("{}", panic_message(panic.as_ref()));
            ResponseFormatter::error(&error, &request_id)
        }
    }
}

/// Extracts a human-readable message from a panic payload.
fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "Handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RequestId;
    use crate::error::TalariaError;
    use crate::handler::FnHandler;
    use http::StatusCode;
    use serde_json::json;

    fn function() -> FunctionContext {
        FunctionContext::new(RequestId::new("req-boundary"), "test-fn")
    }

    #[tokio::test]
    async fn test_success_envelope_forwarded_unchanged() {
        let handler = FnHandler::new(|_request| async move {
            Ok(ResponseFormatter::success_with_status(
                &json!({"created": true}),
                StatusCode::CREATED,
            )?)
        });

        let response = run(&handler, InvocationEvent::default(), &function()).await;

        // 201 stays 201, not coerced to 200.
        assert_eq!(response.status_code, 201);
        let body = response.body_json().expect("body should be JSON");
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_untyped_error_becomes_internal_envelope() {
        let handler = FnHandler::new(|_request| async move { anyhow::bail!("boom") });

        let response = run(&handler, InvocationEvent::default(), &function()).await;

        assert_eq!(response.status_code, 500);
        let body = response.body_json().expect("body should be JSON");
        assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
        assert_eq!(body["error"]["message"], "boom");
        assert_eq!(body["error"]["requestId"], "req-boundary");
    }

    #[tokio::test]
    async fn test_typed_error_keeps_its_kind() {
        let handler = FnHandler::new(|_request| async move {
            Err(TalariaError::not_found("User not found").into())
        });

        let response = run(&handler, InvocationEvent::default(), &function()).await;

        assert_eq!(response.status_code, 404);
        let body = response.body_json().expect("body should be JSON");
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_panic_is_contained() {
        let handler = FnHandler::new(|_request| async move {
            panic!("handler exploded");
            #[allow(unreachable_code)]
            Ok(ResponseFormatter::success(&json!({}))?)
        });

        let response = run(&handler, InvocationEvent::default(), &function()).await;

        assert_eq!(response.status_code, 500);
        let body = response.body_json().expect("body should be JSON");
        assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
        assert_eq!(body["error"]["message"], "handler exploded");
    }

    #[tokio::test]
    async fn test_request_context_reaches_handler() {
        let handler = FnHandler::new(|request: LambdaRequest| async move {
            Ok(ResponseFormatter::success(&json!({
                "requestId": request.context.request_id().as_str(),
                "functionName": request.context.function_name(),
            }))?)
        });

        let response = run(&handler, InvocationEvent::default(), &function()).await;

        let body = response.body_json().expect("body should be JSON");
        assert_eq!(body["data"]["requestId"], "req-boundary");
        assert_eq!(body["data"]["functionName"], "test-fn");
    }
}

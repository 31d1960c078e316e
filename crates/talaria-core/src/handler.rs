//! Handler trait for request processing.
//!
//! The [`Handler`] trait defines the contract between the request boundary
//! and business logic. A handler receives the invocation event and the
//! per-invocation [`RequestContext`](crate::RequestContext), and either
//! returns a complete [`LambdaResponse`] (which the boundary forwards
//! unchanged, status code included) or fails with any error. Typed
//! [`TalariaError`](crate::TalariaError)s keep their kind at the boundary;
//! everything else renders as an internal error.

use crate::context::RequestContext;
use crate::event::InvocationEvent;
use crate::response::LambdaResponse;
use std::future::Future;
use std::marker::PhantomData;

/// Everything a handler receives for one invocation.
#[derive(Debug, Clone)]
pub struct LambdaRequest {
    /// The inbound invocation event.
    pub event: InvocationEvent,
    /// The per-invocation request context.
    pub context: RequestContext,
}

/// A trait for per-invocation business logic.
///
/// # Example
///
/// ```rust,ignore
/// use talaria_core::{Handler, LambdaRequest, LambdaResponse, ResponseFormatter};
///
/// struct PingHandler;
///
/// impl Handler for PingHandler {
///     async fn handle(&self, request: LambdaRequest) -> anyhow::Result<LambdaResponse> {
///         Ok(ResponseFormatter::success(&serde_json::json!({
///             "pong": true,
///             "requestId": request.context.request_id().as_str(),
///         }))?)
///     }
/// }
/// ```
pub trait Handler: Send + Sync + 'static {
    /// Handles one invocation.
    ///
    /// # Errors
    ///
    /// May fail with any error; the boundary converts whatever comes back
    /// into an error envelope.
    fn handle(
        &self,
        request: LambdaRequest,
    ) -> impl Future<Output = anyhow::Result<LambdaResponse>> + Send;
}

/// A function-based handler wrapper.
///
/// Allows using plain async closures or functions as handlers.
///
/// # Example
///
/// ```rust,ignore
/// use talaria_core::{FnHandler, ResponseFormatter};
///
/// let handler = FnHandler::new(|request| async move {
///     Ok(ResponseFormatter::success(&serde_json::json!({"ok": true}))?)
/// });
/// ```
pub struct FnHandler<F, Fut>
where
    F: Fn(LambdaRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<LambdaResponse>> + Send,
{
    func: F,
    _phantom: PhantomData<fn() -> Fut>,
}

impl<F, Fut> FnHandler<F, Fut>
where
    F: Fn(LambdaRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<LambdaResponse>> + Send,
{
    /// Creates a new function-based handler.
    #[must_use]
    pub const fn new(func: F) -> Self {
        Self {
            func,
            _phantom: PhantomData,
        }
    }
}

impl<F, Fut> Handler for FnHandler<F, Fut>
where
    F: Fn(LambdaRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<LambdaResponse>> + Send + 'static,
{
    async fn handle(&self, request: LambdaRequest) -> anyhow::Result<LambdaResponse> {
        (self.func)(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ResponseFormatter;
    use serde_json::json;

    struct EchoHandler;

    impl Handler for EchoHandler {
        async fn handle(&self, request: LambdaRequest) -> anyhow::Result<LambdaResponse> {
            Ok(ResponseFormatter::success(&json!({
                "path": request.event.path,
            }))?)
        }
    }

    fn mock_request(event: InvocationEvent) -> LambdaRequest {
        LambdaRequest {
            event,
            context: RequestContext::mock(),
        }
    }

    #[tokio::test]
    async fn test_handler_impl() {
        let handler = EchoHandler;
        let request = mock_request(InvocationEvent::builder().path("/ping").build());

        let response = handler.handle(request).await.expect("handler should succeed");
        let body = response.body_json().expect("body should be JSON");
        assert_eq!(body["data"]["path"], "/ping");
    }

    #[tokio::test]
    async fn test_fn_handler() {
        let handler = FnHandler::new(|_request| async move {
            Ok(ResponseFormatter::success(&json!({"ok": true}))?)
        });

        let response = handler
            .handle(mock_request(InvocationEvent::default()))
            .await
            .expect("handler should succeed");
        assert_eq!(response.status_code, 200);
    }

    #[tokio::test]
    async fn test_handler_error_propagates() {
        let handler = FnHandler::new(|_request| async move { anyhow::bail!("boom") });

        let err = handler
            .handle(mock_request(InvocationEvent::default()))
            .await
            .expect_err("handler should fail");
        assert_eq!(err.to_string(), "boom");
    }
}

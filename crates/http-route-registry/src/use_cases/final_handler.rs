use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;

use crate::entities::{Body, Context, Endpoint, Middleware, Next};
use crate::error::HandlerError;

/// Adapts a value-returning endpoint to the middleware shape.
///
/// The endpoint settles first. A truthy result becomes the response body
/// unless one is already set, then the continuation runs. Errors and panics
/// go to the continuation instead of unwinding out of the adapter.
pub struct FinalHandler {
    endpoint: Arc<dyn Endpoint>,
}

pub fn wrap_final_handler(endpoint: Arc<dyn Endpoint>) -> FinalHandler {
    FinalHandler { endpoint }
}

#[async_trait]
impl Middleware for FinalHandler {
    async fn handle(&self, ctx: &mut Context, next: Next<'_>) {
        let settled = AssertUnwindSafe(self.endpoint.call(ctx)).catch_unwind().await;
        let outcome = settled
            .unwrap_or_else(|panic| Err(HandlerError::Panicked(panic_message(&*panic))));

        match outcome {
            Ok(value) => {
                if let Some(body) = value.filter(Body::is_truthy) {
                    if ctx.response.body_is_empty() {
                        ctx.response.set_body(body);
                    }
                }
                next.run(ctx).await;
            }
            Err(error) => {
                tracing::debug!(
                    method = %ctx.request.method,
                    path = %ctx.request.path,
                    error = %error,
                    "Final handler failed, forwarding error"
                );
                next.fail(error);
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

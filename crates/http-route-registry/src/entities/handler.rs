use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use super::{Body, Context, IntoBody, Next};
use crate::error::HandlerError;

/// A chain member that receives the context and decides whether to continue.
///
/// Implementations must eventually either call [`Next::run`] to hand control
/// to the rest of the chain, call [`Next::fail`] to forward an error, or drop
/// `next` to stop the chain after producing a response themselves.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, ctx: &mut Context, next: Next<'_>);
}

/// A terminal handler: produces a value instead of calling a continuation
#[async_trait]
pub trait Endpoint: Send + Sync {
    async fn call(&self, ctx: &mut Context) -> Result<Option<Body>, HandlerError>;
}

/// Anything that can be registered on a route
#[derive(Clone)]
pub enum Handler {
    /// Continuation-passing member, valid anywhere before the last position
    Middleware(Arc<dyn Middleware>),
    /// Value-returning member, valid only in the last position
    Endpoint(Arc<dyn Endpoint>),
    /// A plain value. It cannot be invoked, so registering it always fails.
    Value(Body),
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Handler::Middleware(_) => f.debug_tuple("Middleware").field(&"<fn>").finish(),
            Handler::Endpoint(_) => f.debug_tuple("Endpoint").field(&"<fn>").finish(),
            Handler::Value(body) => f.debug_tuple("Value").field(body).finish(),
        }
    }
}

impl Handler {
    /// Create a final handler that always answers with `body`
    pub fn new(body: impl Into<Body>) -> Self {
        Handler::Endpoint(Arc::new(StaticEndpoint(body.into())))
    }

    /// Create a final handler that always answers with `value` as JSON
    pub fn from_json<T: serde::Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Body::json(value).map(Handler::new)
    }

    /// Wrap a plain value; useful only to show it is not a handler
    pub fn value(body: impl Into<Body>) -> Self {
        Handler::Value(body.into())
    }

    pub fn middleware<M: Middleware + 'static>(middleware: M) -> Self {
        Handler::Middleware(Arc::new(middleware))
    }

    pub fn endpoint<E: Endpoint + 'static>(endpoint: E) -> Self {
        Handler::Endpoint(Arc::new(endpoint))
    }

    /// Create a middleware from a closure.
    ///
    /// ```rust
    /// use http_route_registry::prelude::*;
    ///
    /// let timing = Handler::from_fn(|ctx, next| {
    ///     Box::pin(async move {
    ///         ctx.response.headers.insert("x-seen".into(), "1".into());
    ///         next.run(ctx).await;
    ///     })
    /// });
    /// # let _ = timing;
    /// ```
    pub fn from_fn<F>(f: F) -> Self
    where
        F: for<'a> Fn(&'a mut Context, Next<'a>) -> BoxFuture<'a, ()> + Send + Sync + 'static,
    {
        Handler::Middleware(Arc::new(FnMiddleware(f)))
    }

    /// Create a synchronous terminal handler from a closure
    pub fn dynamic<F, R>(f: F) -> Self
    where
        F: Fn(&mut Context) -> Result<R, HandlerError> + Send + Sync + 'static,
        R: IntoBody + 'static,
    {
        Handler::Endpoint(Arc::new(FnEndpoint {
            f,
            _output: PhantomData,
        }))
    }

    /// Create an asynchronous terminal handler from a closure.
    ///
    /// The returned future may not borrow the context; copy what it needs first.
    pub fn from_async<F, Fut, R>(f: F) -> Self
    where
        F: Fn(&Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, HandlerError>> + Send + 'static,
        R: IntoBody + 'static,
    {
        Handler::Endpoint(Arc::new(AsyncFnEndpoint {
            f,
            _output: PhantomData,
        }))
    }

    pub fn is_middleware(&self) -> bool {
        matches!(self, Handler::Middleware(_))
    }
}

impl From<Body> for Handler {
    fn from(body: Body) -> Self {
        Handler::Value(body)
    }
}

struct FnMiddleware<F>(F);

#[async_trait]
impl<F> Middleware for FnMiddleware<F>
where
    F: for<'a> Fn(&'a mut Context, Next<'a>) -> BoxFuture<'a, ()> + Send + Sync,
{
    async fn handle(&self, ctx: &mut Context, next: Next<'_>) {
        (self.0)(ctx, next).await
    }
}

struct FnEndpoint<F, R> {
    f: F,
    _output: PhantomData<fn() -> R>,
}

#[async_trait]
impl<F, R> Endpoint for FnEndpoint<F, R>
where
    F: Fn(&mut Context) -> Result<R, HandlerError> + Send + Sync,
    R: IntoBody,
{
    async fn call(&self, ctx: &mut Context) -> Result<Option<Body>, HandlerError> {
        (self.f)(ctx).map(IntoBody::into_body)
    }
}

struct AsyncFnEndpoint<F, Fut, R> {
    f: F,
    _output: PhantomData<fn() -> (Fut, R)>,
}

#[async_trait]
impl<F, Fut, R> Endpoint for AsyncFnEndpoint<F, Fut, R>
where
    F: Fn(&Context) -> Fut + Send + Sync,
    Fut: Future<Output = Result<R, HandlerError>> + Send,
    R: IntoBody,
{
    async fn call(&self, ctx: &mut Context) -> Result<Option<Body>, HandlerError> {
        (self.f)(ctx).await.map(IntoBody::into_body)
    }
}

/// Endpoint behind [`Handler::new`]
struct StaticEndpoint(Body);

#[async_trait]
impl Endpoint for StaticEndpoint {
    async fn call(&self, _ctx: &mut Context) -> Result<Option<Body>, HandlerError> {
        Ok(Some(self.0.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Method, Request};

    fn create_test_context(method: Method, path: &str) -> Context {
        Context::new(Request::new(method, path))
    }

    #[tokio::test]
    async fn test_handler_new_answers_with_body() {
        let Handler::Endpoint(endpoint) = Handler::new("hello") else {
            panic!("expected an endpoint");
        };

        let mut ctx = create_test_context(Method::Get, "/");
        let body = endpoint.call(&mut ctx).await.unwrap();
        assert_eq!(body, Some(Body::Text("hello".to_string())));
    }

    #[tokio::test]
    async fn test_handler_from_json() {
        let handler = Handler::from_json(&serde_json::json!({"test": true})).unwrap();
        let Handler::Endpoint(endpoint) = handler else {
            panic!("expected an endpoint");
        };

        let mut ctx = create_test_context(Method::Get, "/");
        let body = endpoint.call(&mut ctx).await.unwrap();
        assert_eq!(body, Some(Body::Json(serde_json::json!({"test": true}))));
    }

    #[test]
    fn test_handler_from_json_reports_serialization_errors() {
        let mut map = std::collections::HashMap::new();
        map.insert(vec![1u8], "non-string keys cannot become JSON");
        assert!(Handler::from_json(&map).is_err());
    }

    #[test]
    fn test_handler_value_from_body() {
        let handler: Handler = Body::Json(serde_json::json!(42)).into();
        assert!(matches!(handler, Handler::Value(Body::Json(_))));
    }

    #[test]
    fn test_handler_debug_hides_functions() {
        let handler = Handler::dynamic(|_ctx| Ok("hi"));
        assert_eq!(format!("{:?}", handler), "Endpoint(\"<fn>\")");
    }

    #[tokio::test]
    async fn test_dynamic_handler() {
        let handler = Handler::dynamic(|ctx: &mut Context| {
            Ok(format!("You requested: {}", ctx.request.path))
        });
        let Handler::Endpoint(endpoint) = handler else {
            panic!("expected an endpoint");
        };

        let mut ctx = create_test_context(Method::Get, "/api/users");
        let body = endpoint.call(&mut ctx).await.unwrap();
        assert_eq!(body, Some(Body::Text("You requested: /api/users".to_string())));
    }

    #[tokio::test]
    async fn test_async_handler() {
        let handler = Handler::from_async(|ctx: &Context| {
            let method = ctx.request.method;
            async move {
                tokio::task::yield_now().await;
                Ok(serde_json::json!({ "method": method }))
            }
        });
        let Handler::Endpoint(endpoint) = handler else {
            panic!("expected an endpoint");
        };

        let mut ctx = create_test_context(Method::Post, "/");
        let body = endpoint.call(&mut ctx).await.unwrap();
        assert_eq!(body, Some(Body::Json(serde_json::json!({ "method": "POST" }))));
    }

    #[tokio::test]
    async fn test_dynamic_handler_error() {
        let handler = Handler::dynamic(|_ctx| Err::<(), _>(HandlerError::msg("nope")));
        let Handler::Endpoint(endpoint) = handler else {
            panic!("expected an endpoint");
        };

        let mut ctx = create_test_context(Method::Get, "/");
        let err = endpoint.call(&mut ctx).await.unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }

    #[test]
    fn test_from_fn_is_middleware() {
        let handler = Handler::from_fn(|ctx, next| Box::pin(next.run(ctx)));
        assert!(handler.is_middleware());
    }
}

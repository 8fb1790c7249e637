//! HTTP Route Registry
//!
//! Per-route registration of HTTP methods to middleware chains. A [`Route`]
//! holds a normalized path, an optional name and one chain per method. The
//! last handler of every chain is a value-returning final handler whose
//! result becomes the response body.
//!
//! # Example
//!
//! ```rust
//! use http_route_registry::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), RouteError> {
//! let mut route = Route::with_prefix("users/", "api");
//! route
//!     .named("users")
//!     .get([
//!         Handler::from_fn(|ctx, next| {
//!             Box::pin(async move {
//!                 ctx.response.headers.insert("x-powered-by".into(), "routes".into());
//!                 next.run(ctx).await;
//!             })
//!         }),
//!         Handler::dynamic(|_ctx| Ok(json!([{"id": 1}]))),
//!     ])?;
//!
//! assert_eq!(route.path(), "/api/users");
//!
//! for (method, chain) in route.handlers() {
//!     println!("{} {} -> {} members", method, route.path(), chain.len());
//! }
//!
//! let mut ctx = Context::new(Request::new(Method::Get, "/api/users"));
//! route.chain("GET").unwrap().run(&mut ctx).await.unwrap();
//! assert_eq!(ctx.response.body, Some(Body::Json(json!([{"id": 1}]))));
//! # Ok(())
//! # }
//! ```

mod adapters;
pub mod entities;
pub mod error;
pub mod use_cases;

pub use entities::Route;
pub use error::{HandlerError, RouteError, ServeError};

#[cfg(feature = "axum")]
pub use adapters::gateways::Axum;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::entities::{
        Body, Chain, Context, Endpoint, Flow, Handler, IntoBody, Method, Middleware, Next,
        Request, Response, Route,
    };
    pub use crate::error::{HandlerError, RouteError, ServeError};
    pub use crate::use_cases::{wrap_final_handler, FinalHandler};

    #[cfg(feature = "axum")]
    pub use crate::Axum;

    pub use serde_json::json;
}

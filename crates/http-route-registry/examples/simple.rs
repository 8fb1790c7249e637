//! Simple example demonstrating basic usage of http-route-registry
//!
//! This example shows how to:
//! - Register handler chains on routes with the fluent registration calls
//! - Return plain values from final handlers and let them become the body
//! - Mount the routes under a prefix and serve them with axum
//!
//! Press Ctrl+C to stop the server.

use http_route_registry::prelude::*;
use std::net::SocketAddr;
use std::time::Instant;

#[tokio::main]
async fn main() -> Result<(), ServeError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "http_route_registry=debug".into()),
        )
        .init();

    let timing = Handler::from_fn(|ctx, next| {
        Box::pin(async move {
            let started = Instant::now();
            next.run(ctx).await;
            ctx.response.headers.insert(
                "x-response-time".to_string(),
                format!("{}us", started.elapsed().as_micros()),
            );
        })
    });

    let mut users = Route::new("users");
    users.named("users").get([
        timing.clone(),
        Handler::new(json!([{"id": 1, "name": "Ada"}])),
    ])?;

    let mut greet = Route::new("greet/");
    greet.named("greet").post([
        timing,
        Handler::dynamic(|ctx: &mut Context| {
            let payload: serde_json::Value =
                serde_json::from_str(ctx.request.body_as_str().unwrap_or("{}"))?;
            let name = payload
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or("stranger");
            Ok(json!({ "message": format!("Hello, {}!", name) }))
        }),
    ])?;

    let mut health = Route::new("/health");
    health.all([Handler::new("ok")])?;

    for route in [&users, &greet, &health] {
        for (method, chain) in route.handlers() {
            println!("{:<8}{:<16}{} member(s)", method, route.path(), chain.len());
        }
    }

    let addr: SocketAddr = "127.0.0.1:3000".parse().expect("valid socket address");
    println!("\nListening on http://{}/api", addr);

    Axum::bind(addr)
        .prefix("/api")
        .routes([users, greet, health])
        .serve(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await
}

use axum::{
    body::Body as AxumBody,
    extract::Request as AxumRequest,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response as AxumResponse},
    routing::{MethodFilter, MethodRouter},
    Router,
};
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use crate::entities::{join_paths, Chain, Context, Method, Request, Response, Route};
use crate::error::{RouteError, ServeError};

/// Axum-based server that dispatches requests to route chains
pub struct Axum {
    addr: SocketAddr,
    prefix: Option<String>,
    routes: Vec<Route>,
}

impl Axum {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            prefix: None,
            routes: Vec::new(),
        }
    }

    pub fn bind(addr: impl Into<SocketAddr>) -> Self {
        Self::new(addr.into())
    }

    /// Mount every route under `prefix`, in front of the route's own prefix
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    pub fn routes(mut self, routes: impl IntoIterator<Item = Route>) -> Self {
        self.routes.extend(routes);
        self
    }

    /// Build the axum router.
    ///
    /// `:name` and `*name` segments become axum captures. Two chains claiming
    /// the same path and method fail with [`RouteError::DuplicateMethod`].
    pub fn into_router(self) -> Result<Router, RouteError> {
        let mut by_path: BTreeMap<String, (MethodRouter, Vec<Method>)> = BTreeMap::new();

        for mut route in self.routes {
            if let Some(prefix) = &self.prefix {
                let mounted = join_paths(prefix, route.prefix());
                route.set_prefix(mounted);
            }
            let path = axum_path(&route.path());

            for (key, chain) in route.handlers() {
                let method = Method::from_str(key)?;
                let (method_router, claimed) = by_path
                    .entry(path.clone())
                    .or_insert_with(|| (MethodRouter::new(), Vec::new()));

                if claimed.contains(&method) {
                    return Err(RouteError::DuplicateMethod(format!("{} {}", method, path)));
                }
                claimed.push(method);

                let chain = Arc::clone(chain);
                let handler = move |request: AxumRequest| {
                    let chain = Arc::clone(&chain);
                    async move { handle_request(chain, request).await }
                };
                *method_router = std::mem::replace(method_router, MethodRouter::new())
                    .on(method_filter(method), handler);

                tracing::debug!(method = %method, path = %path, name = %route.name(), "Mounted route");
            }
        }

        let router = by_path
            .into_iter()
            .fold(Router::new(), |router, (path, (method_router, _))| {
                router.route(&path, method_router)
            });

        Ok(router)
    }

    /// Serve the mounted routes until `shutdown` resolves
    pub async fn serve<F>(self, shutdown: F) -> Result<(), ServeError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.addr;
        let router = self.into_router()?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(addr = %local_addr, "Serving routes");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}

impl Default for Axum {
    fn default() -> Self {
        Self::new(([127, 0, 0, 1], 0).into())
    }
}

/// Rewrite `:name` and `*name` segments into axum's `{name}` and `{*name}`
fn axum_path(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if let Some(name) = segment.strip_prefix(':').filter(|name| !name.is_empty()) {
                format!("{{{}}}", name)
            } else if let Some(name) = segment.strip_prefix('*').filter(|name| !name.is_empty()) {
                format!("{{*{}}}", name)
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn method_filter(method: Method) -> MethodFilter {
    match method {
        Method::Head => MethodFilter::HEAD,
        Method::Get => MethodFilter::GET,
        Method::Patch => MethodFilter::PATCH,
        Method::Post => MethodFilter::POST,
        Method::Put => MethodFilter::PUT,
        Method::Delete => MethodFilter::DELETE,
        Method::Options => MethodFilter::OPTIONS,
    }
}

async fn handle_request(chain: Arc<Chain>, request: AxumRequest) -> AxumResponse {
    let Ok(method) = Method::from_str(request.method().as_str()) else {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    };

    let path = request.uri().path().to_string();
    let headers: HashMap<String, String> = request
        .headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
        .collect();

    let body = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .map(|b| b.to_vec())
        .unwrap_or_default();

    let mut ctx = Context::new(Request {
        method,
        path,
        headers,
        body,
    });

    match chain.run(&mut ctx).await {
        Ok(flow) => {
            tracing::debug!(
                method = %ctx.request.method,
                path = %ctx.request.path,
                status = ctx.response.status,
                flow = ?flow,
                "Handled request"
            );
            into_axum_response(ctx.response)
        }
        Err(error) => {
            tracing::error!(
                method = %ctx.request.method,
                path = %ctx.request.path,
                error = %error,
                "Handler chain failed"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

fn into_axum_response(response: Response) -> AxumResponse {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::OK);
    let mut builder = axum::http::Response::builder().status(status);

    for (key, value) in &response.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }

    let body = match response.body {
        Some(body) => {
            let has_content_type = response
                .headers
                .keys()
                .any(|key| key.eq_ignore_ascii_case(header::CONTENT_TYPE.as_str()));
            if !has_content_type {
                builder = builder.header(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(body.content_type()),
                );
            }
            AxumBody::from(body.into_bytes())
        }
        None => AxumBody::empty(),
    };

    builder.body(body).unwrap_or_else(|error| {
        tracing::warn!(error = %error, "Invalid response from handler chain");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })
}

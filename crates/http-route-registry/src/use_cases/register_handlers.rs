use std::str::FromStr;
use std::sync::Arc;

use crate::entities::{Chain, Handler, Method, Middleware, Route};
use crate::error::RouteError;
use crate::use_cases::final_handler::wrap_final_handler;

/// Turn the registered handlers into a chain whose last member is adapted
/// by [`wrap_final_handler`].
fn build_chain(handlers: Vec<Handler>) -> Result<Chain, RouteError> {
    let last = handlers
        .len()
        .checked_sub(1)
        .ok_or(RouteError::MissingHandler)?;

    let mut members: Vec<Arc<dyn Middleware>> = Vec::with_capacity(handlers.len());
    for (index, handler) in handlers.into_iter().enumerate() {
        let member: Arc<dyn Middleware> = match (handler, index == last) {
            (Handler::Middleware(middleware), false) => middleware,
            (Handler::Endpoint(endpoint), true) => Arc::new(wrap_final_handler(endpoint)),
            (Handler::Value(_), _) => {
                return Err(RouteError::InvalidHandler {
                    index,
                    reason: "a plain value is not callable",
                })
            }
            (Handler::Middleware(_), true) => {
                return Err(RouteError::InvalidHandler {
                    index,
                    reason: "the final handler must return a value",
                })
            }
            (Handler::Endpoint(_), false) => {
                return Err(RouteError::InvalidHandler {
                    index,
                    reason: "only middleware may precede the final handler",
                })
            }
        };
        members.push(member);
    }

    Ok(Chain::new(members))
}

impl Route {
    /// Register one chain for every method in `methods`.
    ///
    /// The last handler is the final handler: its return value becomes the
    /// response body. Method keys are stored as given but validated without
    /// regard to case. Methods listed before a failing one stay registered.
    ///
    /// ```rust
    /// use http_route_registry::prelude::*;
    ///
    /// let mut route = Route::new("/users");
    /// route
    ///     .any(["GET", "POST"], [Handler::dynamic(|_ctx| Ok("users"))])
    ///     .unwrap();
    /// assert_eq!(route.methods().collect::<Vec<_>>(), ["GET", "POST"]);
    /// ```
    pub fn any<I, M, H>(&mut self, methods: I, handlers: H) -> Result<&mut Self, RouteError>
    where
        I: IntoIterator<Item = M>,
        M: AsRef<str>,
        H: IntoIterator<Item = Handler>,
    {
        let chain = Arc::new(build_chain(handlers.into_iter().collect())?);

        for method in methods {
            let key = method.as_ref();
            if self.chain(key).is_some() {
                return Err(RouteError::DuplicateMethod(key.to_string()));
            }
            Method::from_str(key)?;

            tracing::debug!(method = %key, path = %self.path(), "Registered route handlers");
            self.handlers.push((key.to_string(), Arc::clone(&chain)));
        }

        Ok(self)
    }

    pub fn head<H>(&mut self, handlers: H) -> Result<&mut Self, RouteError>
    where
        H: IntoIterator<Item = Handler>,
    {
        self.any([Method::Head], handlers)
    }

    /// Registers both HEAD and GET with the same chain
    pub fn get<H>(&mut self, handlers: H) -> Result<&mut Self, RouteError>
    where
        H: IntoIterator<Item = Handler>,
    {
        self.any([Method::Head, Method::Get], handlers)
    }

    pub fn post<H>(&mut self, handlers: H) -> Result<&mut Self, RouteError>
    where
        H: IntoIterator<Item = Handler>,
    {
        self.any([Method::Post], handlers)
    }

    pub fn put<H>(&mut self, handlers: H) -> Result<&mut Self, RouteError>
    where
        H: IntoIterator<Item = Handler>,
    {
        self.any([Method::Put], handlers)
    }

    pub fn patch<H>(&mut self, handlers: H) -> Result<&mut Self, RouteError>
    where
        H: IntoIterator<Item = Handler>,
    {
        self.any([Method::Patch], handlers)
    }

    pub fn delete<H>(&mut self, handlers: H) -> Result<&mut Self, RouteError>
    where
        H: IntoIterator<Item = Handler>,
    {
        self.any([Method::Delete], handlers)
    }

    pub fn options<H>(&mut self, handlers: H) -> Result<&mut Self, RouteError>
    where
        H: IntoIterator<Item = Handler>,
    {
        self.any([Method::Options], handlers)
    }

    /// Registers every accepted method with the same chain
    pub fn all<H>(&mut self, handlers: H) -> Result<&mut Self, RouteError>
    where
        H: IntoIterator<Item = Handler>,
    {
        self.any(Method::ACCEPTED, handlers)
    }
}

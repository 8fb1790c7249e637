use thiserror::Error;

/// Errors raised while registering handlers on a route
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Missing handler: at least one handler is required")]
    MissingHandler,

    #[error("Invalid handler at position {index}: {reason}")]
    InvalidHandler { index: usize, reason: &'static str },

    #[error("Duplicate method: {0} is already registered on this route")]
    DuplicateMethod(String),

    #[error("Method not accepted: {0}")]
    MethodNotAccepted(String),
}

/// Errors produced while a handler chain processes a request.
///
/// These never escape a chain member directly; they travel through
/// [`Next::fail`](crate::entities::Next::fail) to whoever drives the chain.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("{0}")]
    Message(String),

    #[error("Handler panicked: {0}")]
    Panicked(String),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors raised while mounting routes on a server or serving them
#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HandlerError {
    pub fn msg(message: impl Into<String>) -> Self {
        HandlerError::Message(message.into())
    }

    pub fn other<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        HandlerError::Other(Box::new(error))
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(error: serde_json::Error) -> Self {
        HandlerError::other(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_error_display() {
        assert_eq!(
            RouteError::DuplicateMethod("GET".to_string()).to_string(),
            "Duplicate method: GET is already registered on this route"
        );
        assert_eq!(
            RouteError::MethodNotAccepted("PURGE".to_string()).to_string(),
            "Method not accepted: PURGE"
        );
    }

    #[test]
    fn test_handler_error_from_serde() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let handler_error: HandlerError = err.into();
        assert!(matches!(handler_error, HandlerError::Other(_)));
    }
}

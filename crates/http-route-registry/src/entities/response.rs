use std::collections::HashMap;

use super::Body;

/// The response a handler chain builds up
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Option<Body>,
}

impl Response {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn ok() -> Self {
        Self::new(200)
    }

    pub fn not_found() -> Self {
        Self::new(404)
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the body, promoting the untouched default 404 to 200
    pub fn set_body(&mut self, body: impl Into<Body>) {
        if self.status == 404 {
            self.status = 200;
        }
        self.body = Some(body.into());
    }

    /// True when no truthy body has been set yet
    pub fn body_is_empty(&self) -> bool {
        !self.body.as_ref().is_some_and(Body::is_truthy)
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::not_found()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_new() {
        let response = Response::new(200);
        assert_eq!(response.status, 200);
        assert!(response.headers.is_empty());
        assert!(response.body.is_none());
    }

    #[test]
    fn test_response_default_is_not_found() {
        assert_eq!(Response::default().status, 404);
    }

    #[test]
    fn test_response_with_body() {
        let response = Response::ok().with_body("Hello");
        assert_eq!(response.body, Some(Body::Text("Hello".to_string())));
        assert!(!response.body_is_empty());
    }

    #[test]
    fn test_response_empty_body() {
        assert!(Response::ok().body_is_empty());
        assert!(Response::ok().with_body("").body_is_empty());
    }

    #[test]
    fn test_response_set_body_promotes_default_status() {
        let mut response = Response::default();
        response.set_body("found");
        assert_eq!(response.status, 200);

        let mut created = Response::new(201);
        created.set_body("made");
        assert_eq!(created.status, 201);
    }

    #[test]
    fn test_response_with_header() {
        let response = Response::ok().with_header("X-Custom", "value");
        assert_eq!(response.headers.get("X-Custom").unwrap(), "value");
    }
}

use std::sync::Arc;

use super::path::{join_paths, normalize_path};
use super::Chain;

/// One endpoint: a normalized path under an optional prefix, an optional
/// name, and one handler chain per registered method.
///
/// Handlers are attached through the registration methods (`get`, `post`,
/// `any`, ...). The router reads the result through [`Route::path`],
/// [`Route::name`] and [`Route::handlers`].
#[derive(Debug, Clone)]
pub struct Route {
    pub(crate) prefix: String,
    pub(crate) path: String,
    pub(crate) name: String,
    pub(crate) handlers: Vec<(String, Arc<Chain>)>,
}

impl Route {
    pub fn new(path: impl AsRef<str>) -> Self {
        Self::with_prefix(path, "")
    }

    pub fn with_prefix(path: impl AsRef<str>, prefix: impl AsRef<str>) -> Self {
        Self {
            prefix: normalize_path(prefix.as_ref()),
            path: normalize_path(path.as_ref()),
            name: String::new(),
            handlers: Vec::new(),
        }
    }

    /// The full path, prefix joined with the route's own segment
    pub fn path(&self) -> String {
        join_paths(&self.prefix, &self.path)
    }

    /// The route's own segment, without the prefix
    pub fn own_path(&self) -> &str {
        &self.path
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Replace the prefix. The last call wins.
    pub fn set_prefix(&mut self, prefix: impl AsRef<str>) -> &mut Self {
        self.prefix = normalize_path(prefix.as_ref());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Label the route for reverse lookups
    pub fn named(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Registered `(method, chain)` pairs in registration order
    pub fn handlers(&self) -> impl Iterator<Item = (&str, &Arc<Chain>)> {
        self.handlers
            .iter()
            .map(|(method, chain)| (method.as_str(), chain))
    }

    /// The chain registered under exactly this method key
    pub fn chain(&self, method: &str) -> Option<&Arc<Chain>> {
        self.handlers
            .iter()
            .find(|(key, _)| key == method)
            .map(|(_, chain)| chain)
    }

    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.handlers.iter().map(|(method, _)| method.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_new() {
        let route = Route::new("users/");
        assert_eq!(route.path(), "/users");
        assert_eq!(route.own_path(), "/users");
        assert_eq!(route.prefix(), "/");
        assert_eq!(route.name(), "");
        assert_eq!(route.handlers().count(), 0);
    }

    #[test]
    fn test_route_with_prefix() {
        let route = Route::with_prefix("users/", "api");
        assert_eq!(route.path(), "/api/users");
    }

    #[test]
    fn test_route_root_under_root() {
        assert_eq!(Route::with_prefix("/", "/").path(), "/");
        assert_eq!(Route::new("").path(), "/");
    }

    #[test]
    fn test_route_set_prefix_last_write_wins() {
        let mut route = Route::new("/users");
        route.set_prefix("v1/").set_prefix("/v2");
        assert_eq!(route.prefix(), "/v2");
        assert_eq!(route.path(), "/v2/users");
        assert_eq!(route.own_path(), "/users");
    }

    #[test]
    fn test_route_named() {
        let mut route = Route::new("/users/me");
        route.named("profile");
        assert_eq!(route.name(), "profile");
    }
}

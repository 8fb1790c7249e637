use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RouteError;

/// HTTP methods a route accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Head,
    Get,
    Patch,
    Post,
    Put,
    Delete,
    Options,
}

impl Method {
    /// The closed set of verbs a route may register, in registration order for `all`
    pub const ACCEPTED: [Method; 7] = [
        Method::Head,
        Method::Get,
        Method::Patch,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Head => "HEAD",
            Method::Get => "GET",
            Method::Patch => "PATCH",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Method {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Case-insensitive; anything outside [`Method::ACCEPTED`] is rejected
impl FromStr for Method {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ACCEPTED
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RouteError::MethodNotAccepted(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_display() {
        assert_eq!(format!("{}", Method::Get), "GET");
        assert_eq!(format!("{}", Method::Options), "OPTIONS");
    }

    #[test]
    fn test_method_from_str_is_case_insensitive() {
        assert_eq!("get".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("Delete".parse::<Method>().unwrap(), Method::Delete);
        assert_eq!("PATCH".parse::<Method>().unwrap(), Method::Patch);
    }

    #[test]
    fn test_method_from_str_rejects_unknown_verbs() {
        assert_eq!(
            "PURGE".parse::<Method>().unwrap_err(),
            RouteError::MethodNotAccepted("PURGE".to_string())
        );
        assert!("CONNECT".parse::<Method>().is_err());
        assert!("".parse::<Method>().is_err());
    }

    #[test]
    fn test_method_serde() {
        assert_eq!(serde_json::to_string(&Method::Post).unwrap(), "\"POST\"");
        let method: Method = serde_json::from_str("\"HEAD\"").unwrap();
        assert_eq!(method, Method::Head);
    }
}

use serde_json::Value;

/// A response body produced by a handler
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Text(String),
    Bytes(Vec<u8>),
    Json(Value),
}

impl Body {
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Body::Json)
    }

    /// Whether the body counts as a value worth sending.
    ///
    /// Empty text, empty bytes, `null`, `false`, `0` and `""` do not.
    pub fn is_truthy(&self) -> bool {
        match self {
            Body::Text(text) => !text.is_empty(),
            Body::Bytes(bytes) => !bytes.is_empty(),
            Body::Json(value) => match value {
                Value::Null => false,
                Value::Bool(flag) => *flag,
                Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
                Value::String(text) => !text.is_empty(),
                Value::Array(_) | Value::Object(_) => true,
            },
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Body::Text(_) => "text/plain; charset=utf-8",
            Body::Bytes(_) => "application/octet-stream",
            Body::Json(_) => "application/json",
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Body::Text(text) => text.into_bytes(),
            Body::Bytes(bytes) => bytes,
            Body::Json(value) => serde_json::to_vec(&value).unwrap_or_default(),
        }
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Body::Json(value)
    }
}

/// Conversion for whatever a terminal handler returns
pub trait IntoBody {
    fn into_body(self) -> Option<Body>;
}

impl IntoBody for () {
    fn into_body(self) -> Option<Body> {
        None
    }
}

impl IntoBody for Body {
    fn into_body(self) -> Option<Body> {
        Some(self)
    }
}

impl IntoBody for String {
    fn into_body(self) -> Option<Body> {
        Some(Body::Text(self))
    }
}

impl IntoBody for &'static str {
    fn into_body(self) -> Option<Body> {
        Some(Body::from(self))
    }
}

impl IntoBody for Vec<u8> {
    fn into_body(self) -> Option<Body> {
        Some(Body::Bytes(self))
    }
}

impl IntoBody for Value {
    fn into_body(self) -> Option<Body> {
        Some(Body::Json(self))
    }
}

impl<T: IntoBody> IntoBody for Option<T> {
    fn into_body(self) -> Option<Body> {
        self.and_then(IntoBody::into_body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthy_values() {
        assert!(Body::from("hello").is_truthy());
        assert!(Body::from(vec![1u8]).is_truthy());
        assert!(Body::Json(json!({})).is_truthy());
        assert!(Body::Json(json!([])).is_truthy());
        assert!(Body::Json(json!(42)).is_truthy());
        assert!(Body::Json(json!(true)).is_truthy());
    }

    #[test]
    fn test_falsy_values() {
        assert!(!Body::from("").is_truthy());
        assert!(!Body::Bytes(Vec::new()).is_truthy());
        assert!(!Body::Json(json!(null)).is_truthy());
        assert!(!Body::Json(json!(false)).is_truthy());
        assert!(!Body::Json(json!(0)).is_truthy());
        assert!(!Body::Json(json!("")).is_truthy());
    }

    #[test]
    fn test_into_body() {
        assert_eq!(().into_body(), None);
        assert_eq!(None::<String>.into_body(), None);
        assert_eq!("hi".into_body(), Some(Body::Text("hi".to_string())));
        assert_eq!(json!({"a": 1}).into_body(), Some(Body::Json(json!({"a": 1}))));
    }

    #[test]
    fn test_into_bytes() {
        assert_eq!(Body::from("abc").into_bytes(), b"abc");
        assert_eq!(Body::Json(json!({"ok": true})).into_bytes(), b"{\"ok\":true}");
    }
}

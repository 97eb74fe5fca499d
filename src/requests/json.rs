use super::{Fuzzable, RequestKind};
use crate::containers::{Cookie, DataContainer, Headers};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use std::borrow::Cow;

/// key used in [`JsonRequest::parameters`] when the document is a bare scalar
pub const JSON_ROOT_KEY: &str = "$";

/// a request whose body is a JSON document
///
/// # Examples
///
/// ```
/// # use seedreq::prelude::*;
/// # use seedreq::requests::JsonRequest;
/// # use serde_json::json;
/// # use url::Url;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let url = Url::parse("http://localhost/api/users")?;
/// let request = JsonRequest::new(url, Headers::new(), json!({"name": "bob", "age": 42, "tags": ["a"]}));
///
/// let parameters = request.parameters();
/// assert_eq!(parameters.get_first("name"), Some("bob"));
/// assert_eq!(parameters.get_first("age"), Some("42"));
/// assert_eq!(parameters.get_first("tags"), Some(r#"["a"]"#));
/// assert_eq!(request.body().as_deref(), Some(r#"{"name":"bob","age":42,"tags":["a"]}"#));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JsonRequest {
    url: Url,
    method: String,
    headers: Headers,
    cookie: Cookie,
    document: Value,
}

impl JsonRequest {
    /// create a `POST` request carrying `document`
    #[must_use]
    pub fn new(url: Url, headers: Headers, document: Value) -> Self {
        Self {
            url,
            method: String::from("POST"),
            headers,
            cookie: Cookie::new(),
            document,
        }
    }

    /// use `method` instead of `POST`
    #[must_use]
    pub fn with_method(mut self, method: &str) -> Self {
        self.method = method.to_string();
        self
    }

    /// send `cookie` along with the request
    #[must_use]
    pub fn with_cookie(mut self, cookie: Cookie) -> Self {
        self.cookie = cookie;
        self
    }

    /// get the decoded JSON document
    #[must_use]
    pub const fn document(&self) -> &Value {
        &self.document
    }
}

/// strings are used as-is, other scalars in their JSON form, containers as compact JSON
fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

impl Fuzzable for JsonRequest {
    fn kind(&self) -> RequestKind {
        RequestKind::Json
    }

    fn url(&self) -> &Url {
        &self.url
    }

    fn method(&self) -> &str {
        &self.method
    }

    fn headers(&self) -> &Headers {
        &self.headers
    }

    fn cookie(&self) -> &Cookie {
        &self.cookie
    }

    /// top-level members of an object, positions of an array, or the
    /// [`JSON_ROOT_KEY`] for a scalar document
    fn parameters(&self) -> Cow<'_, DataContainer> {
        let container: DataContainer = match &self.document {
            Value::Object(members) => members
                .iter()
                .map(|(key, value)| (key.clone(), render(value)))
                .collect(),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, value)| (index.to_string(), render(value)))
                .collect(),
            scalar @ (Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)) => {
                std::iter::once((JSON_ROOT_KEY, render(scalar))).collect()
            }
        };

        Cow::Owned(container)
    }

    fn body(&self) -> Option<String> {
        Some(self.document.to_string())
    }
}

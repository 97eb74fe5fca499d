use super::{Fuzzable, RequestKind};
use crate::containers::{Cookie, DataContainer, Headers};

use lazy_static::lazy_static;
use regex::Regex;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use url::Url;

use std::borrow::Cow;

lazy_static! {
    /// `<methodName>user.login</methodName>`
    static ref METHOD_NAME_REGEX: Regex =
        Regex::new(r"(?is)<methodName>\s*([^<]*?)\s*</methodName>").unwrap();

    /// the scalar inside each `<param><value>...</value></param>`, typed or not
    ///
    /// `<value><string>bob</string></value>` and `<value>bob</value>` both yield `bob`
    static ref PARAM_VALUE_REGEX: Regex = Regex::new(
        r"(?is)<param>\s*<value>\s*(?:<[a-z0-9.]+>([^<]*)</[a-z0-9.]+>|([^<]*))\s*</value>\s*</param>"
    )
    .unwrap();
}

/// key under which [`XmlRpcRequest::parameters`] reports the called method
pub const XMLRPC_METHOD_KEY: &str = "methodName";

/// a request whose body is an XML-RPC `<methodCall>`
///
/// the body is kept exactly as it was received
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct XmlRpcRequest {
    url: Url,
    method: String,
    headers: Headers,
    cookie: Cookie,
    body: String,
}

impl XmlRpcRequest {
    /// create a `POST` request carrying the raw xml-rpc `body`
    #[must_use]
    pub fn new(url: Url, headers: Headers, body: String) -> Self {
        Self {
            url,
            method: String::from("POST"),
            headers,
            cookie: Cookie::new(),
            body,
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

    /// get the raw xml-rpc body
    #[must_use]
    pub fn raw_body(&self) -> &str {
        &self.body
    }
}

impl Fuzzable for XmlRpcRequest {
    fn kind(&self) -> RequestKind {
        RequestKind::XmlRpc
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

    /// the called method under [`XMLRPC_METHOD_KEY`], followed by each scalar
    /// `<param>` as `param1`, `param2`, ...
    ///
    /// struct and array params are not descended into
    fn parameters(&self) -> Cow<'_, DataContainer> {
        let mut container = DataContainer::new();

        if let Some(captures) = METHOD_NAME_REGEX.captures(&self.body) {
            container.append(XMLRPC_METHOD_KEY, &captures[1]);
        }

        for (position, captures) in PARAM_VALUE_REGEX.captures_iter(&self.body).enumerate() {
            let value = captures
                .get(1)
                .or_else(|| captures.get(2))
                .map_or("", |matched| matched.as_str());

            container.append(format!("param{}", position + 1), value);
        }

        Cow::Owned(container)
    }

    fn body(&self) -> Option<String> {
        Some(self.body.clone())
    }
}

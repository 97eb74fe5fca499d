use super::{Fuzzable, RequestKind};
use crate::containers::{Cookie, DataContainer, Headers};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use url::Url;

use std::borrow::Cow;

/// a request whose injectable parameters live in an
/// `application/x-www-form-urlencoded` body
///
/// multipart bodies are flattened into this shape as well; see
/// [`create_fuzzable_request`](crate::factory::create_fuzzable_request)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PostDataRequest {
    url: Url,
    method: String,
    headers: Headers,
    cookie: Cookie,
    data: DataContainer,
    file_fields: Vec<String>,
}

impl PostDataRequest {
    /// create a `POST` request carrying `data` as its body
    #[must_use]
    pub fn new(url: Url, headers: Headers, data: DataContainer) -> Self {
        Self {
            url,
            method: String::from("POST"),
            headers,
            cookie: Cookie::new(),
            data,
            file_fields: Vec::new(),
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

    /// mark the given fields as file uploads
    #[must_use]
    pub fn with_file_fields(mut self, file_fields: Vec<String>) -> Self {
        self.file_fields = file_fields;
        self
    }

    /// names of the fields that were file uploads in the originating form
    #[must_use]
    pub fn file_fields(&self) -> &[String] {
        &self.file_fields
    }

    /// get the body parameters
    #[must_use]
    pub const fn data_container(&self) -> &DataContainer {
        &self.data
    }
}

impl Fuzzable for PostDataRequest {
    fn kind(&self) -> RequestKind {
        RequestKind::PostData
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

    fn parameters(&self) -> Cow<'_, DataContainer> {
        Cow::Borrowed(&self.data)
    }

    fn body(&self) -> Option<String> {
        Some(self.data.to_urlencoded())
    }
}

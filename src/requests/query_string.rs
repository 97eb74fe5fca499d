use super::{Fuzzable, RequestKind};
use crate::containers::{Cookie, DataContainer, Headers};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use url::Url;

use std::borrow::Cow;

/// a request whose injectable parameters live in the url's query string
///
/// # Examples
///
/// ```
/// # use seedreq::prelude::*;
/// # use seedreq::requests::QueryStringRequest;
/// # use url::Url;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let url = Url::parse("http://localhost/search?q=shoes&page=2")?;
/// let request = QueryStringRequest::new(url, Headers::new(), Cookie::new());
///
/// assert_eq!(request.method(), "GET");
/// assert_eq!(request.parameters().get_first("q"), Some("shoes"));
/// assert!(request.body().is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QueryStringRequest {
    url: Url,
    method: String,
    headers: Headers,
    cookie: Cookie,
    data: DataContainer,
}

impl QueryStringRequest {
    /// create a `GET` request; the query parameters are taken from `url`
    #[must_use]
    pub fn new(url: Url, headers: Headers, cookie: Cookie) -> Self {
        let data = url.query().map_or_else(DataContainer::new, DataContainer::parse_urlencoded);

        Self {
            url,
            method: String::from("GET"),
            headers,
            cookie,
            data,
        }
    }

    /// use `method` instead of `GET`
    #[must_use]
    pub fn with_method(mut self, method: &str) -> Self {
        self.method = method.to_string();
        self
    }

    /// replace the query parameters, i.e. with the field values of a form
    #[must_use]
    pub fn with_data_container(mut self, data: DataContainer) -> Self {
        self.data = data;
        self
    }

    /// get the query parameters
    #[must_use]
    pub const fn data_container(&self) -> &DataContainer {
        &self.data
    }
}

impl Fuzzable for QueryStringRequest {
    fn kind(&self) -> RequestKind {
        RequestKind::QueryString
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
        None
    }

    /// the url with its query rebuilt from the current parameters
    fn uri(&self) -> Url {
        let mut uri = self.url.clone();

        if self.data.is_empty() {
            uri.set_query(None);
        } else {
            uri.set_query(Some(&self.data.to_urlencoded()));
        }

        uri
    }
}

//! the raw http request that was actually sent to a target
use crate::containers::Headers;
use crate::error::SeedError;

use derive_more::{Constructor, From, Into};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};
use url::Url;

use std::fmt::{self, Display, Formatter};

/// request identifier: uniqueness is the user's responsibility
#[derive(
    Copy, Clone, Default, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, From, Into, Constructor,
)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RequestId(usize);

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "RequestId<{}>", self.0)
    }
}

/// an already-issued http request: the exact url, method, headers and body
/// that went over the wire
///
/// it is the input to [`create_fuzzable_request`] when a fuzzer wants to
/// re-classify something it already sent, and the optional companion of a
/// response in [`create_fuzzable_requests`]
///
/// [`create_fuzzable_request`]: crate::factory::create_fuzzable_request
/// [`create_fuzzable_requests`]: crate::factory::create_fuzzable_requests
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct Request {
    pub(crate) id: RequestId,
    pub(crate) url: Url,
    pub(crate) method: String,
    pub(crate) headers: Headers,
    pub(crate) body: String,
}

impl Request {
    /// create a `GET` request for `url` with no headers and no body
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            id: RequestId::default(),
            url,
            method: String::from("GET"),
            headers: Headers::new(),
            body: String::new(),
        }
    }

    /// Return a new `Request`, as long as the given `url` is valid. Valid in this context means
    /// it is able to be parsed into a [`url::Url`](https://docs.rs/url/latest/url/struct.Url.html).
    ///
    /// # Examples
    ///
    /// ```
    /// # use seedreq::requests::Request;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let request = Request::from_url("http://localhost/login?next=%2F")?
    ///     .with_method("POST")
    ///     .with_header("Content-Type", "application/x-www-form-urlencoded")
    ///     .with_body("user=admin&pass=admin");
    ///
    /// assert_eq!(request.method(), "POST");
    /// assert_eq!(request.url().query(), Some("next=%2F"));
    /// assert_eq!(request.headers().get_first("content-type"), Some("application/x-www-form-urlencoded"));
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// This function will return an error if the given `url` is invalid
    #[instrument(level = "trace")]
    pub fn from_url(url: &str) -> Result<Self, SeedError> {
        let parsed = Url::parse(url).map_err(|source| {
            error!(%url, "Failed to parse URL: {}", source);
            SeedError::InvalidUrl {
                source,
                url: url.to_string(),
            }
        })?;

        Ok(Self::new(parsed))
    }

    /// set the http method
    #[must_use]
    pub fn with_method(mut self, method: &str) -> Self {
        self.method = method.to_string();
        self
    }

    /// append a header
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.append(name, value);
        self
    }

    /// replace all headers
    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// set the body
    #[must_use]
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    /// get the id
    #[must_use]
    #[inline]
    pub const fn id(&self) -> RequestId {
        self.id
    }

    /// get a mutable reference to the id
    ///
    /// use this as the id setter/manipulator, if necessary
    #[must_use]
    #[inline]
    pub fn id_mut(&mut self) -> &mut RequestId {
        &mut self.id
    }

    /// get the url
    #[must_use]
    #[inline]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// get the method
    #[must_use]
    #[inline]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// get the headers
    #[must_use]
    #[inline]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// get the body; empty when nothing was sent
    #[must_use]
    #[inline]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// consume the request, yielding its url, method, headers and body
    #[must_use]
    pub fn into_parts(self) -> (Url, String, Headers, String) {
        (self.url, self.method, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// a bad url is reported instead of panicking
    #[test]
    fn from_url_rejects_relative_url() {
        assert!(matches!(
            Request::from_url("/just/a/path"),
            Err(SeedError::InvalidUrl { .. })
        ));
    }

    /// defaults are GET, no headers, no body
    #[test]
    fn new_request_defaults() {
        let request = Request::from_url("http://localhost").unwrap();

        assert_eq!(request.method(), "GET");
        assert!(request.headers().is_empty());
        assert!(request.body().is_empty());
        assert_eq!(request.id(), RequestId::new(0));
    }

    /// ids can be changed after construction
    #[test]
    fn id_mut_sets_id() {
        let mut request = Request::from_url("http://localhost").unwrap();
        *request.id_mut() = RequestId::new(7);

        assert_eq!(request.id().to_string(), "RequestId<7>");
    }
}

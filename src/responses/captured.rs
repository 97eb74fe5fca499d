use super::Response;
use crate::containers::Headers;
use crate::error::SeedError;
use crate::requests::{Request, RequestId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};
use url::Url;

/// seedreq implementation of [`Response`]: a response that was already
/// received and is held entirely in memory
///
/// # Examples
///
/// ```
/// # use seedreq::responses::{HttpResponse, Response};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let response = HttpResponse::from_url("http://localhost/", 302)?
///     .with_header("Location", "/login")
///     .with_body("moved");
///
/// assert_eq!(response.status_code(), 302);
/// assert_eq!(response.headers().get_first("location"), Some("/login"));
/// assert_eq!(response.text(), "moved");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct HttpResponse {
    id: RequestId,
    url: Url,
    status_code: u16,
    headers: Headers,
    body: Vec<u8>,
}

impl HttpResponse {
    /// create an empty response for `url`
    #[must_use]
    pub fn new(url: Url, status_code: u16) -> Self {
        Self {
            id: RequestId::default(),
            url,
            status_code,
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    /// create an empty response, as long as `url` parses
    ///
    /// # Errors
    ///
    /// This function will return an error if the given `url` is invalid
    #[instrument(level = "trace")]
    pub fn from_url(url: &str, status_code: u16) -> Result<Self, SeedError> {
        let parsed = Url::parse(url).map_err(|source| {
            error!(%url, "Failed to parse URL: {}", source);
            SeedError::InvalidUrl {
                source,
                url: url.to_string(),
            }
        })?;

        Ok(Self::new(parsed, status_code))
    }

    /// create an empty response to `request`, inheriting its id and url
    #[must_use]
    pub fn for_request(request: &Request, status_code: u16) -> Self {
        Self {
            id: request.id(),
            ..Self::new(request.url().clone(), status_code)
        }
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
    pub fn with_body<B>(mut self, body: B) -> Self
    where
        B: Into<Vec<u8>>,
    {
        self.body = body.into();
        self
    }

    /// get a mutable reference to the id
    #[must_use]
    #[inline]
    pub fn id_mut(&mut self) -> &mut RequestId {
        &mut self.id
    }

    /// get a mutable reference to the headers
    #[must_use]
    #[inline]
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }
}

impl Response for HttpResponse {
    fn id(&self) -> RequestId {
        self.id
    }

    fn url(&self) -> &Url {
        &self.url
    }

    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn headers(&self) -> &Headers {
        &self.headers
    }

    fn body(&self) -> &[u8] {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// a response built for a request carries its id and url
    #[test]
    fn for_request_inherits_id_and_url() {
        let mut request = Request::from_url("http://localhost/a?b=c").unwrap();
        *request.id_mut() = RequestId::new(3);

        let response = HttpResponse::for_request(&request, 200);

        assert_eq!(response.id(), RequestId::new(3));
        assert_eq!(response.url().as_str(), "http://localhost/a?b=c");
    }

    /// content-type is read case-insensitively
    #[test]
    fn content_type_reads_first_header() {
        let response = HttpResponse::from_url("http://localhost", 200)
            .unwrap()
            .with_header("content-TYPE", "text/html")
            .with_header("Content-Type", "text/plain");

        assert_eq!(response.content_type(), Some("text/html"));
    }

    /// non-utf8 bodies are decoded lossily
    #[test]
    fn text_is_lossy() {
        let response = HttpResponse::from_url("http://localhost", 200)
            .unwrap()
            .with_body(vec![b'o', b'k', 0xff]);

        assert_eq!(response.text(), "ok\u{fffd}");
    }
}

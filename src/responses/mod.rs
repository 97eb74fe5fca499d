//! the captured http response that fuzzable requests are derived from
mod captured;

pub use self::captured::HttpResponse;

use crate::containers::Headers;
use crate::requests::RequestId;

use std::borrow::Cow;
use url::Url;

/// an opinionated trait to represent a server's response
pub trait Response {
    /// get the id of the request that produced this response
    #[must_use]
    fn id(&self) -> RequestId;

    /// get a reference to the url that was requested
    #[must_use]
    fn url(&self) -> &Url;

    /// get the status code
    #[must_use]
    fn status_code(&self) -> u16;

    /// get a reference to the headers
    #[must_use]
    fn headers(&self) -> &Headers;

    /// get a reference to the body
    #[must_use]
    fn body(&self) -> &[u8];

    /// try to get the full response body, as unicode
    ///
    /// # Note
    ///
    /// Conversion performed on call, cache results
    /// if you're into that sort of thing
    #[must_use]
    fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.body())
    }

    /// the first `Content-Type` header, if any
    #[must_use]
    fn content_type(&self) -> Option<&str> {
        self.headers().get_first("content-type")
    }
}

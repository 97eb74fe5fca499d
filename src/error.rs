//! Custom error-type definitions
use thiserror::Error;
use url::ParseError;

/// primary error-type for the seedreq library
///
/// none of these errors are fatal; the converters in [`factory`] treat every
/// one of them as "this strategy declines" and log it at the point where the
/// decision is made
///
/// [`factory`]: crate::factory
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SeedError {
    /// Represents a failure to parse or join the given string into a [`url::Url`](https://docs.rs/url/latest/url/struct.Url.html).
    #[error("The url `{url}` is invalid and couldn't be parsed.")]
    InvalidUrl {
        /// underlying source error-type
        source: ParseError,

        /// the url that couldn't be parsed
        url: String,
    },

    /// Represents a response for which no document parser is registered
    #[error("No document parser is available for content-type `{content_type}`")]
    NoDocumentParser {
        /// content-type of the response that couldn't be parsed
        content_type: String,
    },

    /// Represents a body that the wsdl detector rejected
    #[error("The given body is not a valid WSDL document: {reason}")]
    InvalidWsdl {
        /// why the detector rejected the body
        reason: String,
    },

    /// Represents a `multipart/form-data` body that couldn't be split into fields
    #[error("Multipart form data is invalid: {reason}")]
    MultipartParseError {
        /// underlying reason for the parsing error
        reason: String,
    },

    /// Represents a failure to parse a body as JSON
    #[error("Could not parse the given body as JSON")]
    JSONParseError {
        /// underlying source error-type
        #[from]
        source: serde_json::Error,
    },

    /// Represents an unknown form combination mode
    #[error("`{mode}` is not a known form combination mode")]
    InvalidCombinationMode {
        /// the mode that couldn't be parsed
        mode: String,
    },

    /// Represents a url-encoded body whose escapes don't decode to UTF-8
    #[error("The body `{body}` is not valid url-encoded UTF-8")]
    UrlEncodedParseError {
        /// the body that couldn't be decoded
        body: String,
    },
}

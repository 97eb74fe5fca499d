use super::multipart::parse_multipart;
use crate::containers::{Cookie, DataContainer, Headers};
use crate::error::SeedError;
use crate::requests::{
    FuzzableRequest, JsonRequest, PostDataRequest, QueryStringRequest, Request, XmlRpcRequest,
};

use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

/// every one of these must appear in a lower-cased body for it to be treated as xml-rpc
pub const XMLRPC_MARKERS: [&str; 6] = [
    "<methodcall>",
    "<methodname>",
    "<params>",
    "</methodcall>",
    "</methodname>",
    "</params>",
];

/// what [`create_fuzzable_request`] builds from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawTarget {
    /// a request that was already sent; its url, method, body and headers are used
    Issued(Request),

    /// loose pieces of a request
    Parts {
        /// target url
        url: Url,

        /// http method
        method: String,

        /// raw body; empty when there is none
        body: String,
    },
}

impl RawTarget {
    /// build a [`RawTarget::Parts`]
    #[must_use]
    pub fn parts(url: Url, method: &str, body: &str) -> Self {
        Self::Parts {
            url,
            method: method.to_string(),
            body: body.to_string(),
        }
    }
}

impl From<Request> for RawTarget {
    fn from(request: Request) -> Self {
        Self::Issued(request)
    }
}

/// decode `body` as JSON
fn decode_json(body: &str) -> Result<Value, SeedError> {
    Ok(serde_json::from_str(body)?)
}

/// whether a decoded document carries anything worth fuzzing: `null`, `false`,
/// `0`, `""`, `[]` and `{}` do not
fn has_content(document: &Value) -> bool {
    match document {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |value| value != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(members) => !members.is_empty(),
    }
}

/// whether `body` contains every [`XMLRPC_MARKERS`] entry
fn looks_like_xmlrpc(body: &str) -> bool {
    let lowered = body.to_lowercase();

    XMLRPC_MARKERS.iter().all(|marker| lowered.contains(marker))
}

/// decode `body` as `application/x-www-form-urlencoded`
///
/// a body without a single `=` pair still decodes, to an empty container. Escapes
/// that don't decode to UTF-8 (`%ff`) are an error, since the container could only
/// hold a lossy copy of them.
fn decode_urlencoded(body: &str) -> Result<DataContainer, SeedError> {
    let container = DataContainer::parse_urlencoded(body);

    let lossy = !body.contains(char::REPLACEMENT_CHARACTER)
        && container.pairs().any(|(key, value)| {
            key.contains(char::REPLACEMENT_CHARACTER) || value.contains(char::REPLACEMENT_CHARACTER)
        });

    if lossy {
        return Err(SeedError::UrlEncodedParseError {
            body: body.to_string(),
        });
    }

    Ok(container)
}

/// Creates a fuzzable request from raw request pieces, picking the variant that
/// matches the body's encoding.
///
/// When `target` is [`RawTarget::Issued`], the request's own headers are merged
/// with `extra_headers`, and `extra_headers` win on conflicts.
///
/// A request without a body is a [`QueryStringRequest`]. Otherwise the
/// `Content-Length` header is dropped (it is stale once the body is reinterpreted)
/// and the body is classified, first match wins:
///
/// 1. JSON that decodes to something non-empty: [`JsonRequest`]
/// 2. contains all of [`XMLRPC_MARKERS`]: [`XmlRpcRequest`]
/// 3. `multipart/form-data` content-type that parses: [`PostDataRequest`], with the
///    content-type rewritten to `application/x-www-form-urlencoded`. Multipart
///    encoding isn't preserved on replay; the fields are sent url-encoded.
/// 4. anything else that decodes as url-encoded, even to zero fields: [`PostDataRequest`]
///
/// # Examples
///
/// ```
/// # use seedreq::containers::Headers;
/// # use seedreq::factory::{create_fuzzable_request, RawTarget};
/// # use seedreq::prelude::*;
/// # use url::Url;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let url = Url::parse("http://localhost/login")?;
/// let headers: Headers = [("Content-Type", "application/x-www-form-urlencoded"), ("Content-Length", "7")]
///     .into_iter()
///     .collect();
///
/// let request = create_fuzzable_request(RawTarget::parts(url, "POST", "a=1&b=2"), headers)
///     .expect("url-encoded body");
///
/// assert_eq!(request.kind(), RequestKind::PostData);
/// assert_eq!(request.parameters().to_urlencoded(), "a=1&b=2");
/// assert!(!request.headers().contains("content-length"));
/// # Ok(())
/// # }
/// ```
///
/// Returns `None` only when every strategy declines, which takes a body whose
/// percent-escapes aren't valid UTF-8.
#[must_use]
#[instrument(skip_all, level = "trace")]
pub fn create_fuzzable_request(target: RawTarget, extra_headers: Headers) -> Option<FuzzableRequest> {
    let (url, method, body, mut headers) = match target {
        RawTarget::Issued(request) => {
            let (url, method, mut headers, body) = request.into_parts();
            headers.extend_overriding(&extra_headers);
            (url, method, body, headers)
        }
        RawTarget::Parts { url, method, body } => (url, method, body, extra_headers),
    };

    if body.is_empty() {
        return Some(
            QueryStringRequest::new(url, headers, Cookie::new())
                .with_method(&method)
                .into(),
        );
    }

    headers.remove("content-length");

    let content_type = headers.get_first("content-type").unwrap_or_default().to_string();
    let lowered_content_type = content_type.to_ascii_lowercase();

    match decode_json(&body) {
        Ok(document) if has_content(&document) => {
            return Some(
                JsonRequest::new(url, headers, document)
                    .with_method(&method)
                    .into(),
            );
        }
        Ok(_) => debug!(%url, "body is JSON without content, trying other encodings"),
        Err(error) => debug!(%url, %error, "body is not JSON, trying other encodings"),
    }

    if looks_like_xmlrpc(&body) {
        return Some(XmlRpcRequest::new(url, headers, body).with_method(&method).into());
    }

    if lowered_content_type.starts_with("multipart/form-data") {
        match parse_multipart(&body, &content_type) {
            Ok(data) => {
                headers.insert("content-type", "application/x-www-form-urlencoded");

                return Some(PostDataRequest::new(url, headers, data).with_method(&method).into());
            }
            Err(error) => debug!(
                %url,
                %error,
                "Multipart form data is invalid, the browser sent something weird"
            ),
        }
    }

    match decode_urlencoded(&body) {
        Ok(data) => Some(PostDataRequest::new(url, headers, data).with_method(&method).into()),
        Err(error) => {
            debug!(
                %url,
                %error,
                "Failed to create a data container that can store this data: {:?}",
                body
            );
            None
        }
    }
}

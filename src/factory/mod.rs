//! builds [`FuzzableRequest`]s, either from a response (and the request that
//! produced it) or from the raw pieces of a request
//!
//! [`FuzzableRequest`]: crate::requests::FuzzableRequest
mod cookie;
mod multipart;
mod raw;
mod response;

pub use self::cookie::cookie_from_headers;
pub use self::raw::{create_fuzzable_request, RawTarget, XMLRPC_MARKERS};
pub use self::response::{create_fuzzable_requests, ResponseConverter, URL_HEADERS};

//! ordered, multi-valued containers shared by every fuzzable request variant
//!
//! - [`DataContainer`] - query strings, form fields and JSON members
//! - [`Headers`] - case-insensitive http headers
//! - [`Cookie`] - cookies sanitized for replay
mod cookie;
mod data;
mod headers;

pub use self::cookie::{Cookie, BROWSER_ONLY_ATTRIBUTES};
pub use self::data::DataContainer;
pub use self::headers::Headers;

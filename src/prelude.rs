//! small collection of widely used core types and traits
//!
//! The goal in using the prelude is to reduce the number of imports
//! needed to (mostly) only those that have direct impact on turning
//! traffic into fuzzable requests.
//!
//! # Traits
//!
//! - [`Fuzzable`] - exposes the injectable surface of every [`FuzzableRequest`]
//! - [`Response`] - exposes the pieces of a response the converter reads
//!
//! # Structs & Enums
//!
//! - [`FuzzableRequest`] and [`RequestKind`] - what every factory produces
//! - [`Request`] - an already-issued request
//! - [`Headers`], [`Cookie`] and [`DataContainer`] - the containers requests are built from
//! - [`ConverterConfig`] - settings for [`ResponseConverter`]

use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(docsrs)] {
        // just bringing in types for easier intra-doc linking during doc build
        use crate::requests::Fuzzable;
        use crate::responses::Response;
    }
}

// traits that are likely to be used by anyone handling requests
pub use crate::requests::Fuzzable as _;
pub use crate::responses::Response as _;

// core structs needed by everyone
pub use crate::config::ConverterConfig;
pub use crate::containers::{Cookie, DataContainer, Headers};
pub use crate::factory::{create_fuzzable_request, create_fuzzable_requests, RawTarget, ResponseConverter};
pub use crate::requests::{FuzzableRequest, Request, RequestKind};

// crate's error type
pub use crate::error::SeedError;

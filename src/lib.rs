#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::perf,
    rustdoc::broken_intra_doc_links,
    missing_docs,
    clippy::missing_const_for_fn
)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)] // appears to be a false positive; cargo tree doesn't show what clippy yells about
//! turn http traffic into requests a scanner can mutate
//!
//! Given a response (and, optionally, the request that produced it), the
//! [`factory::ResponseConverter`] lists everything worth exploring next: the page
//! itself, the urls found in redirect-style headers, every same-host form (expanded
//! into concrete submissions), and web service operations. Given the raw pieces of a
//! request, [`factory::create_fuzzable_request`] works out how the body is encoded
//! and picks the matching [`requests::FuzzableRequest`] variant.
//!
//! HTML and WSDL parsing are not part of this crate; they are plugged in through the
//! [`parsers::DocumentParserLookup`] and [`parsers::WsdlDetector`] traits.

pub mod config;
pub mod containers;
pub mod error;
pub mod factory;
pub mod parsers;
pub mod prelude;
pub mod requests;
pub mod responses;

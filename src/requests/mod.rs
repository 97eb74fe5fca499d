//! provides the already-issued [`Request`] type and the [`FuzzableRequest`] family:
//! one variant per way an http request can carry injectable parameters, all
//! exposing the same [`Fuzzable`] capability surface
mod fuzzable;
mod json;
mod post_data;
mod query_string;
mod request;
mod web_service;
mod xmlrpc;

pub use self::fuzzable::{Fuzzable, FuzzableRequest, RequestKind};
pub use self::json::{JsonRequest, JSON_ROOT_KEY};
pub use self::post_data::PostDataRequest;
pub use self::query_string::QueryStringRequest;
pub use self::request::{Request, RequestId};
pub use self::web_service::WebServiceRequest;
pub use self::xmlrpc::{XmlRpcRequest, XMLRPC_METHOD_KEY};

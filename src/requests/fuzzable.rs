//! the capability surface shared by every fuzzable request variant
use super::{JsonRequest, PostDataRequest, QueryStringRequest, WebServiceRequest, XmlRpcRequest};
use crate::containers::{Cookie, DataContainer, Headers};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use url::Url;

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

/// tag identifying which shape a [`FuzzableRequest`] has
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub enum RequestKind {
    /// parameters travel in the url's query string
    QueryString,

    /// parameters travel in an `application/x-www-form-urlencoded` body
    PostData,

    /// parameters travel in a JSON body
    Json,

    /// parameters travel in an XML-RPC `<methodCall>` body
    XmlRpc,

    /// parameters travel in a SOAP envelope described by a WSDL document
    WebService,
}

impl Display for RequestKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::QueryString => "query-string",
            Self::PostData => "post-data",
            Self::Json => "json",
            Self::XmlRpc => "xml-rpc",
            Self::WebService => "web-service",
        };

        f.write_str(name)
    }
}

/// an opinionated trait to represent the injectable surface of an http request
///
/// everything a mutation engine needs in order to rebuild the request on the
/// wire is reachable through this trait, so consumers never have to match on
/// the concrete variant unless they want to.
pub trait Fuzzable {
    /// which variant this is
    #[must_use]
    fn kind(&self) -> RequestKind;

    /// get a reference to the target url
    #[must_use]
    fn url(&self) -> &Url;

    /// get the http method
    #[must_use]
    fn method(&self) -> &str;

    /// get a reference to the headers
    #[must_use]
    fn headers(&self) -> &Headers;

    /// get a reference to the cookie to send along
    #[must_use]
    fn cookie(&self) -> &Cookie;

    /// the injectable parameters of this request, as a [`DataContainer`]
    #[must_use]
    fn parameters(&self) -> Cow<'_, DataContainer>;

    /// the body to send on the wire; `None` when the request has no body
    #[must_use]
    fn body(&self) -> Option<String>;

    /// the url to send on the wire, which may differ from [`Fuzzable::url`] when
    /// the parameters live in the query string
    #[must_use]
    fn uri(&self) -> Url {
        self.url().clone()
    }
}

/// one fuzzable request, in one of the five supported shapes
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub enum FuzzableRequest {
    /// see [`QueryStringRequest`]
    QueryString(QueryStringRequest),

    /// see [`PostDataRequest`]
    PostData(PostDataRequest),

    /// see [`JsonRequest`]
    Json(JsonRequest),

    /// see [`XmlRpcRequest`]
    XmlRpc(XmlRpcRequest),

    /// see [`WebServiceRequest`]
    WebService(WebServiceRequest),
}

/// forward a [`Fuzzable`] method to whichever variant is held
macro_rules! delegate {
    ($self:ident, $inner:ident => $call:expr) => {
        match $self {
            FuzzableRequest::QueryString($inner) => $call,
            FuzzableRequest::PostData($inner) => $call,
            FuzzableRequest::Json($inner) => $call,
            FuzzableRequest::XmlRpc($inner) => $call,
            FuzzableRequest::WebService($inner) => $call,
        }
    };
}

impl Fuzzable for FuzzableRequest {
    fn kind(&self) -> RequestKind {
        delegate!(self, inner => inner.kind())
    }

    fn url(&self) -> &Url {
        delegate!(self, inner => inner.url())
    }

    fn method(&self) -> &str {
        delegate!(self, inner => inner.method())
    }

    fn headers(&self) -> &Headers {
        delegate!(self, inner => inner.headers())
    }

    fn cookie(&self) -> &Cookie {
        delegate!(self, inner => inner.cookie())
    }

    fn parameters(&self) -> Cow<'_, DataContainer> {
        delegate!(self, inner => inner.parameters())
    }

    fn body(&self) -> Option<String> {
        delegate!(self, inner => inner.body())
    }

    fn uri(&self) -> Url {
        delegate!(self, inner => inner.uri())
    }
}

impl Display for FuzzableRequest {
    /// `METHOD uri (kind)`, handy for log lines
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.method(), self.uri(), self.kind())
    }
}

impl From<QueryStringRequest> for FuzzableRequest {
    fn from(request: QueryStringRequest) -> Self {
        Self::QueryString(request)
    }
}

impl From<PostDataRequest> for FuzzableRequest {
    fn from(request: PostDataRequest) -> Self {
        Self::PostData(request)
    }
}

impl From<JsonRequest> for FuzzableRequest {
    fn from(request: JsonRequest) -> Self {
        Self::Json(request)
    }
}

impl From<XmlRpcRequest> for FuzzableRequest {
    fn from(request: XmlRpcRequest) -> Self {
        Self::XmlRpc(request)
    }
}

impl From<WebServiceRequest> for FuzzableRequest {
    fn from(request: WebServiceRequest) -> Self {
        Self::WebService(request)
    }
}

//! capabilities this crate consumes but does not implement: html form
//! extraction and wsdl discovery
//!
//! the [`Form`] model and its variant expansion live here as well, since the
//! converter needs them regardless of which document parser produced the form.
mod form;

pub use self::form::{CombinationMode, Form, FormField, FormVariant, DEFAULT_MAX_VARIANTS};

use crate::error::SeedError;
use crate::responses::Response;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use url::Url;

/// a parsed document that can report the forms it contains
pub trait DocumentParser {
    /// every form found in the document, in document order
    #[must_use]
    fn forms(&self) -> Vec<Form>;
}

/// picks a [`DocumentParser`] suitable for a response's content
pub trait DocumentParserLookup: Send + Sync {
    /// get a parser for `response`
    ///
    /// # Errors
    ///
    /// implementors should return [`SeedError::NoDocumentParser`] when no parser
    /// understands the response's content-type; the converter treats that as a
    /// document with zero forms
    fn parser_for<'a>(
        &self,
        response: &'a dyn Response,
    ) -> Result<Box<dyn DocumentParser + 'a>, SeedError>;
}

/// a [`DocumentParserLookup`] that never finds a parser
#[derive(Copy, Clone, Debug, Default)]
pub struct NoDocumentParsers;

impl DocumentParserLookup for NoDocumentParsers {
    fn parser_for<'a>(
        &self,
        response: &'a dyn Response,
    ) -> Result<Box<dyn DocumentParser + 'a>, SeedError> {
        Err(SeedError::NoDocumentParser {
            content_type: response.content_type().unwrap_or_default().to_string(),
        })
    }
}

/// a single typed parameter of a web service operation
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WsdlParameter {
    name: String,
    xsd_type: String,
}

impl WsdlParameter {
    /// create a parameter; `xsd_type` is the bare schema type, i.e. `string` or `int`
    #[must_use]
    pub fn new(name: &str, xsd_type: &str) -> Self {
        Self {
            name: name.to_string(),
            xsd_type: xsd_type.to_string(),
        }
    }

    /// get the parameter's name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// get the parameter's schema type
    #[must_use]
    pub fn xsd_type(&self) -> &str {
        &self.xsd_type
    }
}

/// one operation declared by a wsdl document
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RemoteMethod {
    location: Url,
    action: String,
    parameters: Vec<WsdlParameter>,
    namespace: String,
    name: String,
}

impl RemoteMethod {
    /// describe an operation exposed at `location`
    #[must_use]
    pub fn new(
        location: Url,
        action: &str,
        parameters: Vec<WsdlParameter>,
        namespace: &str,
        name: &str,
    ) -> Self {
        Self {
            location,
            action: action.to_string(),
            parameters,
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }

    /// endpoint the operation is posted to
    #[must_use]
    pub const fn location(&self) -> &Url {
        &self.location
    }

    /// the `SOAPAction` of the operation
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// the operation's parameters, in declaration order
    #[must_use]
    pub fn parameters(&self) -> &[WsdlParameter] {
        &self.parameters
    }

    /// target namespace of the operation
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// operation name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// extracts web service operations from a wsdl document
pub trait WsdlDetector: Send + Sync {
    /// every operation declared in `body`
    ///
    /// # Errors
    ///
    /// implementors should return [`SeedError::InvalidWsdl`] when `body` is not a
    /// wsdl document; the converter skips wsdl discovery in that case
    fn remote_methods(&self, body: &str) -> Result<Vec<RemoteMethod>, SeedError>;
}

/// a [`WsdlDetector`] that rejects every document
#[derive(Copy, Clone, Debug, Default)]
pub struct NoWsdl;

impl WsdlDetector for NoWsdl {
    fn remote_methods(&self, _body: &str) -> Result<Vec<RemoteMethod>, SeedError> {
        Err(SeedError::InvalidWsdl {
            reason: String::from("wsdl detection is disabled"),
        })
    }
}

use super::{Fuzzable, RequestKind};
use crate::containers::{Cookie, DataContainer, Headers};
use crate::parsers::{RemoteMethod, WsdlParameter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use url::Url;

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use std::fmt::{self, Write};

lazy_static! {
    /// anything that may not appear in an xml element or type name
    static ref XML_NAME_INVALID_REGEX: Regex = Regex::new(r"[^A-Za-z0-9_.:-]").unwrap();
}

const SOAP_ENVELOPE_OPEN: &str = concat!(
    r#"<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/" "#,
    r#"xmlns:SOAP-ENC="http://schemas.xmlsoap.org/soap/encoding/" "#,
    r#"xmlns:xsi="http://www.w3.org/1999/XMLSchema-instance" "#,
    r#"xmlns:xsd="http://www.w3.org/1999/XMLSchema">"#,
    "\n<SOAP-ENV:Body>\n"
);

const SOAP_ENVELOPE_CLOSE: &str = "</SOAP-ENV:Body>\n</SOAP-ENV:Envelope>\n";

/// escape the five xml special characters
fn escape_xml(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(raw);
    }

    let mut escaped = String::with_capacity(raw.len() + 16);

    for character in raw.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }

    Cow::Owned(escaped)
}

/// make `raw` usable as an element or `xsi:type` name; invalid characters become `_`
fn xml_name(raw: &str) -> Cow<'_, str> {
    XML_NAME_INVALID_REGEX.replace_all(raw, "_")
}

/// a SOAP operation discovered through a wsdl document
///
/// each declared parameter is an injection point; they start out empty and
/// are rendered positionally (`<v1>`, `<v2>`, ...) inside a SOAP 1.1 envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WebServiceRequest {
    url: Url,
    action: String,
    parameters: Vec<WsdlParameter>,
    namespace: String,
    operation: String,
    headers: Headers,
    cookie: Cookie,
    data: DataContainer,
}

impl WebServiceRequest {
    /// create a `POST` request for `operation`
    ///
    /// `headers` gain `Content-Type: text/xml` and a quoted `SOAPAction`
    #[must_use]
    pub fn new(
        url: Url,
        action: &str,
        parameters: Vec<WsdlParameter>,
        namespace: &str,
        operation: &str,
        headers: Headers,
    ) -> Self {
        let mut headers = headers;
        headers.insert("Content-Type", "text/xml");
        headers.insert("SOAPAction", format!("\"{action}\""));

        let data = parameters
            .iter()
            .map(|parameter| (parameter.name(), ""))
            .collect();

        Self {
            url,
            action: action.to_string(),
            parameters,
            namespace: namespace.to_string(),
            operation: operation.to_string(),
            headers,
            cookie: Cookie::new(),
            data,
        }
    }

    /// create the request for one operation reported by a [`WsdlDetector`](crate::parsers::WsdlDetector)
    #[must_use]
    pub fn from_remote_method(method: &RemoteMethod, headers: Headers) -> Self {
        Self::new(
            method.location().clone(),
            method.action(),
            method.parameters().to_vec(),
            method.namespace(),
            method.name(),
            headers,
        )
    }

    /// get the `SOAPAction`, unquoted
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// get the declared parameters
    #[must_use]
    pub fn wsdl_parameters(&self) -> &[WsdlParameter] {
        &self.parameters
    }

    /// get the target namespace
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// get the operation name
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// set the value sent for the parameter `name`; unknown names are ignored
    #[must_use]
    pub fn with_value(mut self, name: &str, value: &str) -> Self {
        if self.data.contains_key(name) {
            self.data.insert(name, [value]);
        }
        self
    }
}

impl Fuzzable for WebServiceRequest {
    fn kind(&self) -> RequestKind {
        RequestKind::WebService
    }

    fn url(&self) -> &Url {
        &self.url
    }

    fn method(&self) -> &str {
        "POST"
    }

    fn headers(&self) -> &Headers {
        &self.headers
    }

    fn cookie(&self) -> &Cookie {
        &self.cookie
    }

    fn parameters(&self) -> Cow<'_, DataContainer> {
        Cow::Borrowed(&self.data)
    }

    fn body(&self) -> Option<String> {
        let mut envelope = String::from(SOAP_ENVELOPE_OPEN);

        self.write_call(&mut envelope).ok()?;
        envelope.push_str(SOAP_ENVELOPE_CLOSE);

        Some(envelope)
    }
}

impl WebServiceRequest {
    /// write the `<ns1:operation>` element and its positional arguments
    fn write_call(&self, out: &mut String) -> fmt::Result {
        let operation = xml_name(&self.operation);

        writeln!(
            out,
            r#"<ns1:{operation} xmlns:ns1="{}" SOAP-ENC:root="1">"#,
            escape_xml(&self.namespace)
        )?;

        for (position, parameter) in self.parameters.iter().enumerate() {
            let value = self.data.get_first(parameter.name()).unwrap_or_default();

            writeln!(
                out,
                r#"<v{index} xsi:type="xsd:{kind}">{value}</v{index}>"#,
                index = position + 1,
                kind = xml_name(parameter.xsd_type()),
                value = escape_xml(value),
            )?;
        }

        writeln!(out, "</ns1:{operation}>")
    }
}

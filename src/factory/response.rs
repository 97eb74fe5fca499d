use super::cookie::cookie_from_headers;
use crate::config::ConverterConfig;
use crate::containers::{Cookie, Headers};
use crate::parsers::{DocumentParserLookup, Form, WsdlDetector};
use crate::requests::{
    FuzzableRequest, PostDataRequest, QueryStringRequest, Request, WebServiceRequest,
};
use crate::responses::Response;

use tracing::{debug, instrument, trace};

/// response headers whose value is a url worth visiting, checked in this order
pub const URL_HEADERS: [&str; 3] = ["location", "uri", "content-location"];

/// turns an http response into the requests a scanner should explore next
///
/// the converter borrows its configuration and the two document capabilities;
/// it keeps no state between calls.
///
/// # Examples
///
/// ```
/// # use seedreq::config::ConverterConfig;
/// # use seedreq::factory::ResponseConverter;
/// # use seedreq::parsers::{NoDocumentParsers, NoWsdl};
/// # use seedreq::prelude::*;
/// # use seedreq::responses::HttpResponse;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ConverterConfig::new();
/// let converter = ResponseConverter::new(&config, &NoDocumentParsers, &NoWsdl);
///
/// let response = HttpResponse::from_url("http://localhost/a/b", 302)?
///     .with_header("Location", "/next");
///
/// let requests = converter.convert(&response, None, true);
///
/// assert_eq!(requests.len(), 2);
/// assert_eq!(requests[0].url().as_str(), "http://localhost/a/b");
/// assert_eq!(requests[1].url().as_str(), "http://localhost/next");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy)]
pub struct ResponseConverter<'a> {
    config: &'a ConverterConfig,
    documents: &'a dyn DocumentParserLookup,
    wsdl: &'a dyn WsdlDetector,
}

impl std::fmt::Debug for ResponseConverter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseConverter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> ResponseConverter<'a> {
    /// create a converter
    #[must_use]
    pub fn new(
        config: &'a ConverterConfig,
        documents: &'a dyn DocumentParserLookup,
        wsdl: &'a dyn WsdlDetector,
    ) -> Self {
        Self {
            config,
            documents,
            wsdl,
        }
    }

    /// get the configuration in use
    #[must_use]
    pub const fn config(&self) -> &ConverterConfig {
        self.config
    }

    /// Every request worth exploring that can be derived from `response`.
    ///
    /// `request` is the request that produced `response`, if known; its headers
    /// are carried over into every derived request. Results come in this order:
    ///
    /// 1. when `add_self` is set, a `GET` of the response url
    /// 2. a `GET` of each url found in the [`URL_HEADERS`], resolved against the
    ///    response url; empty values and values that don't resolve are skipped
    /// 3. every variant of every same-host form in the document (`POST` forms as a
    ///    `POST`, every other form as a `GET`), or, when the document has no such
    ///    forms, one request per web service operation the [`WsdlDetector`] finds
    ///    in the body
    ///
    /// Nothing here fails: parser and detector errors only mean fewer results.
    #[must_use]
    #[instrument(skip_all, fields(url = %response.url()), level = "trace")]
    pub fn convert<R>(
        &self,
        response: &R,
        request: Option<&Request>,
        add_self: bool,
    ) -> Vec<FuzzableRequest>
    where
        R: Response,
    {
        let headers = self.header_template(request);
        let cookie = cookie_from_headers(response.headers());

        let mut requests = Vec::new();

        if add_self {
            requests.push(
                QueryStringRequest::new(response.url().clone(), headers.clone(), cookie.clone())
                    .into(),
            );
        }

        requests.extend(self.redirects(response, &headers, &cookie));

        let forms = self.same_host_forms(response);

        if forms.is_empty() {
            requests.extend(self.web_services(response, &headers));
        } else {
            requests.extend(self.form_requests(&forms, &headers, &cookie));
        }

        trace!(count = requests.len(), "derived requests from response");

        requests
    }

    /// the configured fuzzable headers with empty values, overridden by whatever
    /// the originating request sent
    fn header_template(&self, request: Option<&Request>) -> Headers {
        let mut headers: Headers = self
            .config
            .fuzzable_headers()
            .iter()
            .map(|name| (name.as_str(), ""))
            .collect();

        if let Some(request) = request {
            headers.extend_overriding(request.headers());
        }

        headers
    }

    /// one `GET` per resolvable url-carrying header
    fn redirects<R>(&self, response: &R, headers: &Headers, cookie: &Cookie) -> Vec<FuzzableRequest>
    where
        R: Response,
    {
        URL_HEADERS
            .iter()
            .filter_map(|name| response.headers().get_first(name).map(|value| (name, value)))
            .filter(|(_, value)| !value.is_empty())
            .filter_map(|(name, value)| match response.url().join(value) {
                Ok(target) => Some(target),
                Err(error) => {
                    debug!(header = %name, %value, %error, "Failed to resolve url header");
                    None
                }
            })
            .map(|target| QueryStringRequest::new(target, headers.clone(), cookie.clone()).into())
            .collect()
    }

    /// the forms of `response` whose action stays on the response's host
    fn same_host_forms<R>(&self, response: &R) -> Vec<Form>
    where
        R: Response,
    {
        let parser = match self.documents.parser_for(response) {
            Ok(parser) => parser,
            Err(error) => {
                debug!(%error, "no document parser, assuming no forms");
                return Vec::new();
            }
        };

        let host = response.url().host_str();

        parser
            .forms()
            .into_iter()
            .filter(|form| {
                let same_host = form.action().host_str() == host;

                if !same_host {
                    trace!(action = %form.action(), "skipping form that leaves the host");
                }

                same_host
            })
            .collect()
    }

    /// every variant of every form, as the request a browser would submit
    fn form_requests(&self, forms: &[Form], headers: &Headers, cookie: &Cookie) -> Vec<FuzzableRequest> {
        let mode = self.config.combination_mode();
        let max_variants = self.config.max_variants();

        forms
            .iter()
            .flat_map(|form| {
                form.variants(mode, max_variants)
                    .into_iter()
                    .map(move |variant| (form, variant))
            })
            .map(|(form, variant)| {
                let url = variant.action().clone();
                let data = variant.into_data_container();

                // the form's own spelling of the method (`get`, `Post`) never reaches the wire
                if form.is_post() {
                    PostDataRequest::new(url, headers.clone(), data)
                        .with_cookie(cookie.clone())
                        .with_file_fields(form.file_fields().to_vec())
                        .into()
                } else {
                    QueryStringRequest::new(url, headers.clone(), cookie.clone())
                        .with_data_container(data)
                        .into()
                }
            })
            .collect()
    }

    /// one request per web service operation described by the response body
    fn web_services<R>(&self, response: &R, headers: &Headers) -> Vec<FuzzableRequest>
    where
        R: Response,
    {
        match self.wsdl.remote_methods(&response.text()) {
            Ok(methods) => methods
                .iter()
                .map(|method| WebServiceRequest::from_remote_method(method, headers.clone()).into())
                .collect(),
            Err(error) => {
                trace!(%error, "response is not a wsdl document");
                Vec::new()
            }
        }
    }
}

/// shorthand for building a [`ResponseConverter`] and calling
/// [`ResponseConverter::convert`] once
#[must_use]
pub fn create_fuzzable_requests<R>(
    response: &R,
    request: Option<&Request>,
    add_self: bool,
    config: &ConverterConfig,
    documents: &dyn DocumentParserLookup,
    wsdl: &dyn WsdlDetector,
) -> Vec<FuzzableRequest>
where
    R: Response,
{
    ResponseConverter::new(config, documents, wsdl).convert(response, request, add_self)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SeedError;
    use crate::parsers::{
        CombinationMode, DocumentParser, NoDocumentParsers, NoWsdl, RemoteMethod, WsdlParameter,
    };
    use crate::requests::{Fuzzable, RequestKind};
    use crate::responses::HttpResponse;
    use url::Url;

    struct FixedForms(Vec<Form>);

    impl DocumentParser for FixedForms {
        fn forms(&self) -> Vec<Form> {
            self.0.clone()
        }
    }

    struct HtmlLookup(Vec<Form>);

    impl DocumentParserLookup for HtmlLookup {
        fn parser_for<'a>(
            &self,
            _response: &'a dyn Response,
        ) -> Result<Box<dyn DocumentParser + 'a>, SeedError> {
            Ok(Box::new(FixedForms(self.0.clone())))
        }
    }

    struct FixedWsdl(Vec<RemoteMethod>);

    impl WsdlDetector for FixedWsdl {
        fn remote_methods(&self, _body: &str) -> Result<Vec<RemoteMethod>, SeedError> {
            Ok(self.0.clone())
        }
    }

    fn url(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    fn response() -> HttpResponse {
        HttpResponse::from_url("http://h/a/b", 200).unwrap()
    }

    fn sizes_form() -> Form {
        Form::new(url("http://h/buy"), "POST").with_options("size", ["s", "m", "l"])
    }

    fn convert(
        response: &HttpResponse,
        config: &ConverterConfig,
        documents: &dyn DocumentParserLookup,
        wsdl: &dyn WsdlDetector,
    ) -> Vec<FuzzableRequest> {
        create_fuzzable_requests(response, None, true, config, documents, wsdl)
    }

    /// a plain response yields only itself
    #[test]
    fn plain_response_yields_self() {
        let requests = convert(&response(), &ConverterConfig::new(), &NoDocumentParsers, &NoWsdl);

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].kind(), RequestKind::QueryString);
        assert_eq!(requests[0].method(), "GET");
        assert_eq!(requests[0].url(), &url("http://h/a/b"));
    }

    /// without the self request and without anything else, the result is empty
    #[test]
    fn nothing_to_derive_is_empty() {
        let config = ConverterConfig::new();
        let requests =
            create_fuzzable_requests(&response(), None, false, &config, &NoDocumentParsers, &NoWsdl);

        assert!(requests.is_empty());
    }

    /// url headers resolve against the response url, broken ones are skipped
    #[test]
    fn url_headers_become_requests() {
        let response = response()
            .with_header("Location", "/next")
            .with_header("Content-Location", "http://")
            .with_header("URI", "c?d=1");

        let requests = convert(&response, &ConverterConfig::new(), &NoDocumentParsers, &NoWsdl);
        let urls: Vec<_> = requests.iter().map(|request| request.url().as_str()).collect();

        assert_eq!(urls, ["http://h/a/b", "http://h/next", "http://h/a/c?d=1"]);
        assert_eq!(requests[2].parameters().get_first("d"), Some("1"));
    }

    /// an empty url header is not a reference to the response itself
    #[test]
    fn empty_url_header_is_ignored() {
        let response = HttpResponse::from_url("http://h/a/b", 302)
            .unwrap()
            .with_header("Location", "")
            .with_header("Content-Location", "");
        let config = ConverterConfig::new();

        let requests =
            create_fuzzable_requests(&response, None, false, &config, &NoDocumentParsers, &NoWsdl);

        assert!(requests.is_empty());

        let response = response.with_header("URI", "/other");
        let requests =
            create_fuzzable_requests(&response, None, false, &config, &NoDocumentParsers, &NoWsdl);
        let urls: Vec<_> = requests.iter().map(|request| request.url().as_str()).collect();

        assert_eq!(urls, ["http://h/other"]);
    }

    /// every derived request replays the response's cookies without browser attributes
    #[test]
    fn cookies_are_carried_over() {
        let response = response()
            .with_header("Location", "/next")
            .with_header("Set-Cookie", "sid=abc; Path=/; HttpOnly");

        let requests = convert(&response, &ConverterConfig::new(), &NoDocumentParsers, &NoWsdl);

        assert_eq!(requests.len(), 2);
        for request in &requests {
            assert_eq!(request.cookie().to_string(), "sid=abc");
        }
    }

    /// fuzzable headers are present empty unless the originating request set them
    #[test]
    fn header_template_prefers_request_headers() {
        let config = ConverterConfig::new()
            .with_fuzzable_header("Referer")
            .with_fuzzable_header("X-Forwarded-For");
        let request = Request::new(url("http://h/a/b")).with_header("referer", "http://h/");

        let requests = create_fuzzable_requests(
            &response(),
            Some(&request),
            true,
            &config,
            &NoDocumentParsers,
            &NoWsdl,
        );

        let headers = requests[0].headers();
        assert_eq!(headers.get_first("Referer"), Some("http://h/"));
        assert_eq!(headers.get_first("X-Forwarded-For"), Some(""));
    }

    /// the combination mode decides how many variants a multi-valued field produces
    #[test]
    fn combination_mode_controls_variants() {
        let lookup = HtmlLookup(vec![sizes_form()]);

        let exhaustive = ConverterConfig::new().with_combination_mode(CombinationMode::All);
        let requests = convert(&response(), &exhaustive, &lookup, &NoWsdl);
        let posts: Vec<_> = requests
            .iter()
            .filter(|request| request.kind() == RequestKind::PostData)
            .collect();

        assert_eq!(posts.len(), 3);
        let sizes: Vec<_> = posts
            .iter()
            .map(|request| request.parameters().get_first("size").unwrap().to_string())
            .collect();
        assert_eq!(sizes, ["s", "m", "l"]);

        let representative = ConverterConfig::new().with_combination_mode(CombinationMode::Top);
        let requests = convert(&response(), &representative, &lookup, &NoWsdl);

        assert_eq!(
            requests
                .iter()
                .filter(|request| request.kind() == RequestKind::PostData)
                .count(),
            1
        );
    }

    /// post forms keep their method, cookie and file fields
    #[test]
    fn post_form_becomes_post_data() {
        let form = Form::new(url("http://h/upload"), "POST")
            .with_field("title", "x")
            .with_file_field("attachment");
        let response = response().with_header("Set-Cookie", "sid=1");

        let requests = convert(&response, &ConverterConfig::new(), &HtmlLookup(vec![form]), &NoWsdl);

        let FuzzableRequest::PostData(post) = &requests[1] else {
            panic!("expected post data, got {}", requests[1]);
        };
        assert_eq!(post.method(), "POST");
        assert_eq!(post.url(), &url("http://h/upload"));
        assert_eq!(post.file_fields(), ["attachment"]);
        assert_eq!(post.cookie().to_string(), "sid=1");
        assert_eq!(post.body().as_deref(), Some("title=x&attachment="));
    }

    /// get forms put their fields in the query string
    #[test]
    fn get_form_becomes_query_string() {
        let form = Form::new(url("http://h/search"), "get").with_field("q", "shoes");

        let requests = convert(&response(), &ConverterConfig::new(), &HtmlLookup(vec![form]), &NoWsdl);

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].kind(), RequestKind::QueryString);
        assert_eq!(requests[1].method(), "GET");
        assert_eq!(requests[1].uri().as_str(), "http://h/search?q=shoes");
    }

    /// the method sent is `GET` or `POST`, whatever casing the document used
    #[test]
    fn form_methods_are_normalized() {
        let forms = vec![
            Form::new(url("http://h/f"), "get").with_field("q", "x"),
            Form::new(url("http://h/f"), "post").with_field("q", "x"),
            Form::new(url("http://h/f"), "Put").with_field("q", "x"),
        ];

        let config = ConverterConfig::new();
        let requests =
            create_fuzzable_requests(&response(), None, false, &config, &HtmlLookup(forms), &NoWsdl);
        let methods: Vec<_> = requests.iter().map(|request| request.method()).collect();

        assert_eq!(methods, ["GET", "POST", "GET"]);
        assert_eq!(requests[1].kind(), RequestKind::PostData);
    }

    /// forms posting to another host are dropped
    #[test]
    fn cross_host_forms_are_excluded() {
        let forms = vec![
            Form::new(url("http://evil/collect"), "POST").with_field("a", "1"),
            Form::new(url("http://h/keep"), "POST").with_field("b", "2"),
        ];

        let requests = convert(&response(), &ConverterConfig::new(), &HtmlLookup(forms), &NoWsdl);

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].url(), &url("http://h/keep"));
    }

    /// a document with no forms is checked for web service operations
    #[test]
    fn wsdl_operations_become_web_service_requests() {
        let method = RemoteMethod::new(
            url("http://h/soap"),
            "urn:Add",
            vec![WsdlParameter::new("a", "int"), WsdlParameter::new("b", "int")],
            "urn:calc",
            "Add",
        );
        let wsdl = FixedWsdl(vec![method]);

        let requests = convert(&response(), &ConverterConfig::new(), &NoDocumentParsers, &wsdl);

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].kind(), RequestKind::WebService);
        assert_eq!(requests[1].method(), "POST");
        assert_eq!(requests[1].headers().get_first("soapaction"), Some("\"urn:Add\""));
        assert_eq!(requests[1].parameters().keys().collect::<Vec<_>>(), ["a", "b"]);
    }

    /// forms take precedence over wsdl discovery
    #[test]
    fn forms_suppress_wsdl_discovery() {
        let method = RemoteMethod::new(url("http://h/soap"), "urn:Add", Vec::new(), "urn:calc", "Add");
        let wsdl = FixedWsdl(vec![method]);
        let lookup = HtmlLookup(vec![Form::new(url("http://h/f"), "POST").with_field("a", "1")]);

        let requests = convert(&response(), &ConverterConfig::new(), &lookup, &wsdl);

        assert!(requests
            .iter()
            .all(|request| request.kind() != RequestKind::WebService));
    }
}

//! run the example with the following command
//! RUST_LOG="trace" cargo run --example with-logging
use seedreq::config::ConverterConfig;
use seedreq::factory::{create_fuzzable_request, RawTarget, ResponseConverter};
use seedreq::parsers::{CombinationMode, NoDocumentParsers, NoWsdl};
use seedreq::prelude::*;
use seedreq::responses::HttpResponse;

use tracing::subscriber::set_global_default;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // seedreq utilizes the tracing library to provide structured logging
    //
    // the `EnvFilter` reads the `RUST_LOG` environment variable, when provided
    let filter = EnvFilter::from_default_env();

    // construct a subscriber that prints formatted traces to stdout
    let subscriber = tracing_subscriber::fmt()
        .with_file(true)
        .with_line_number(true)
        .with_env_filter(filter)
        .finish();

    set_global_default(subscriber)?;

    let config = ConverterConfig::new()
        .with_fuzzable_header("Referer")
        .with_combination_mode(CombinationMode::TopBottom);

    // a redirect that also hands out a session cookie
    let response = HttpResponse::from_url("http://localhost/account/login", 302)?
        .with_header("Location", "/account/home")
        .with_header("Set-Cookie", "session=1f2e3d; Path=/; HttpOnly");

    let converter = ResponseConverter::new(&config, &NoDocumentParsers, &NoWsdl);

    for request in converter.convert(&response, None, true) {
        info!(%request, cookie = %request.cookie(), "derived from response");
    }

    // raw bodies, each classified by its encoding
    let url = Url::parse("http://localhost/api")?;
    let bodies = [
        ("application/json", r#"{"user": "bob", "admin": false}"#),
        ("application/x-www-form-urlencoded", "user=bob&admin=0"),
        ("application/x-www-form-urlencoded", "&&&"),
        ("application/x-www-form-urlencoded", "name=%ff"),
    ];

    for (content_type, body) in bodies {
        let headers: Headers = [("Content-Type", content_type)].into_iter().collect();

        match create_fuzzable_request(RawTarget::parts(url.clone(), "POST", body), headers) {
            Some(request) => info!(%request, parameters = %request.parameters(), "classified body"),
            None => info!(body, "body could not be classified"),
        }
    }

    Ok(())
}

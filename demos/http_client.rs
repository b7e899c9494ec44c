//! Builds an API client from a required token, options read from a TOML
//! document, and the constructor's own defaults.

use std::time::Duration;

use optparams::{apply, default, default_with, FailFast, Func};
use serde::Deserialize;

const DEFAULT_ENDPOINT: &str = "https://api.example.com/v1";

#[derive(Debug, Clone, Default, PartialEq)]
struct HttpClient {
    timeout: Duration,
    user_agent: String,
}

impl HttpClient {
    fn standard() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("optparams-demo/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

/// Some fields are required, others optional with or without defaults.
#[derive(Debug, Default)]
struct Client {
    http: Option<HttpClient>,
    endpoint: String,
    api_token: String,
    retries: u32,
}

fn new_client(
    api_token: impl Into<String>,
    mut opts: Vec<Func<'_, Client>>,
) -> optparams::Result<Client> {
    let mut client = Client {
        api_token: api_token.into(),
        ..Client::default()
    };

    opts.extend([
        default_with(|c: &mut Client| Some(&mut c.http), || Some(HttpClient::standard())),
        default(|c: &mut Client| Some(&mut c.endpoint), DEFAULT_ENDPOINT.to_owned()),
        default(|c: &mut Client| Some(&mut c.retries), 3),
    ]);

    apply(&mut client, opts)?;
    Ok(client)
}

fn with_http_client(http: Option<HttpClient>) -> Func<'static, Client> {
    Func::new(move |c: &mut Client| {
        let Some(http) = http else {
            return Err(FailFast::caused_by("http client is missing"));
        };
        c.http = Some(http);
        Ok(())
    })
}

fn with_endpoint(url: impl Into<String>) -> Func<'static, Client> {
    let url = url.into();
    Func::new(move |c: &mut Client| {
        if url.is_empty() {
            return Err("endpoint is empty");
        }
        c.endpoint = url;
        Ok(())
    })
}

fn with_retries(retries: u32) -> Func<'static, Client> {
    Func::new(move |c: &mut Client| {
        c.retries = retries;
        Ok::<(), optparams::BoxError>(())
    })
}

/// Optional client settings as they appear in a config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Settings {
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
    retries: Option<u32>,
}

impl Settings {
    fn into_options(self) -> Vec<Func<'static, Client>> {
        let mut opts = Vec::new();
        if let Some(endpoint) = self.endpoint {
            opts.push(with_endpoint(endpoint));
        }
        if let Some(secs) = self.timeout_secs {
            opts.push(with_http_client(Some(HttpClient {
                timeout: Duration::from_secs(secs),
                ..HttpClient::standard()
            })));
        }
        if let Some(retries) = self.retries {
            opts.push(with_retries(retries));
        }
        opts
    }
}

const SETTINGS: &str = r#"
endpoint = "https://staging.example.com/v1"
timeout_secs = 60
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_token = std::env::var("API_TOKEN").unwrap_or_else(|_| "demo-token".to_owned());

    let settings: Settings = toml::from_str(SETTINGS)?;
    let client = new_client(api_token, settings.into_options())?;

    println!("Endpoint: {}", client.endpoint);
    println!("HTTP: {:?}", client.http);
    println!("Retries: {}", client.retries);
    println!("Token set: {}", !client.api_token.is_empty());

    // The empty endpoint is collected, the missing client stops the sequence,
    // and the retry option never runs.
    let opts = vec![with_endpoint(""), with_http_client(None), with_retries(5)];
    if let Err(err) = new_client("demo-token", opts) {
        println!("Rejected (fail fast: {}):\n{err}", err.is_fail_fast());
    }

    Ok(())
}

//! Default transport over a pooled `reqwest` client.
//!
//! [`HttpRequestFactory`] is the stock [`RequestFactory`]: it executes the
//! frozen arguments against a shared connection pool and translates
//! transport failures into [`Error::Transport`] with `io::Error` sources,
//! so the default [`ExceptionClassifier`](crate::ExceptionClassifier) can
//! recognise the transient ones (a request timeout surfaces as
//! `io::ErrorKind::TimedOut`, a connect failure as `ConnectionRefused`).

use std::collections::BTreeMap;
use std::io;
use std::time::Duration;

use futures::future::FutureExt;
use tracing::{debug, warn};

use crate::error::Error;
use crate::plugin::ResponseFuture;
use crate::request::{RequestArguments, RequestFactory};
use crate::response::HttpResponse;

/// Transport configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Connect timeout per attempt.
    pub connect_timeout: Duration,
    /// Total per-request timeout, body read included.
    pub request_timeout: Duration,
    /// Idle connections kept per host.
    pub pool_max_idle_per_host: usize,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            pool_max_idle_per_host: 32,
            user_agent: concat!("riptide/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

/// [`RequestFactory`] backed by a pooled [`reqwest::Client`].
#[derive(Clone)]
pub struct HttpRequestFactory {
    client: reqwest::Client,
}

impl HttpRequestFactory {
    /// Factory with the default configuration.
    pub fn new() -> Result<Self, Error> {
        HttpRequestFactory::with_config(ClientConfig::default())
    }

    /// Factory with a custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|error| Error::InvalidRequest(format!("failed to build HTTP client: {error}")))?;
        Ok(HttpRequestFactory { client })
    }

    /// Factory wrapping an existing client, keeping its pool and defaults.
    pub fn with_client(client: reqwest::Client) -> Self {
        HttpRequestFactory { client }
    }

    async fn run(client: reqwest::Client, arguments: RequestArguments) -> Result<HttpResponse, Error> {
        let mut request = client.request(arguments.method().clone(), arguments.url().clone());
        for (name, value) in arguments.headers() {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = arguments.body() {
            request = request.body(body.clone());
        }

        debug!(method = %arguments.method(), url = %arguments.url(), "executing request");

        let response = request.send().await.map_err(|error| {
            warn!(url = %arguments.url(), %error, "request failed");
            translate(error)
        })?;

        let status = response.status();
        let mut headers = BTreeMap::new();
        for (name, value) in response.headers() {
            if let Ok(text) = value.to_str() {
                headers.insert(name.as_str().to_owned(), text.to_owned());
            }
        }

        let body = response.bytes().await.map_err(translate)?;

        Ok(HttpResponse::new(status)
            .with_headers(headers)
            .with_body(body))
    }
}

impl RequestFactory for HttpRequestFactory {
    fn execute(&self, arguments: RequestArguments) -> ResponseFuture {
        HttpRequestFactory::run(self.client.clone(), arguments).boxed()
    }
}

fn translate(error: reqwest::Error) -> Error {
    let kind = if error.is_timeout() {
        io::ErrorKind::TimedOut
    } else if error.is_connect() {
        io::ErrorKind::ConnectionRefused
    } else {
        io::ErrorKind::Other
    };
    Error::Transport(io::Error::new(kind, error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_identifies_the_crate() {
        let config = ClientConfig::default();
        assert!(config.user_agent.starts_with("riptide/"));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn factory_builds_with_defaults() {
        assert!(HttpRequestFactory::new().is_ok());
    }
}

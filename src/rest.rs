//! The request pipeline entry point.
//!
//! A [`Rest`] instance pairs a base URL with a [`RequestFactory`] and an
//! ordered plugin list. It is cheap to clone and safe to share; the plugin
//! list and factory are immutable after [`RestBuilder::build`].
//!
//! # Examples
//!
//! ```no_run
//! use riptide::{any_series, on, Rest, Route, Series, TemporaryExceptionPlugin};
//! # async fn demo() -> Result<(), riptide::Error> {
//! let rest = Rest::builder()
//!     .base_url("https://api.example.org/")
//!     .request_factory(riptide::HttpRequestFactory::new()?)
//!     .plugin(TemporaryExceptionPlugin::new())
//!     .build()?;
//!
//! rest.get("/health")
//!     .dispatch(riptide::series(), [
//!         on(Series::Successful).call(Route::pass()),
//!         any_series().call(Route::call(|response| {
//!             Err(format!("unexpected status {}", response.status_code()).into())
//!         })),
//!     ])
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use http::Method;
use url::Url;

use crate::error::Error;
use crate::plugin::Plugin;
use crate::request::{RequestBuilder, RequestFactory};

/// Client-side dispatch over a configured transport.
#[derive(Clone)]
pub struct Rest {
    base_url: Url,
    factory: Arc<dyn RequestFactory>,
    plugins: Arc<[Arc<dyn Plugin>]>,
}

impl std::fmt::Debug for Rest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rest")
            .field("base_url", &self.base_url)
            .field("plugins", &self.plugins.len())
            .finish_non_exhaustive()
    }
}

impl Rest {
    /// Start configuring a new instance.
    pub fn builder() -> RestBuilder {
        RestBuilder::default()
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// A GET request for `path`, resolved against the base URL.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    /// A HEAD request for `path`.
    pub fn head(&self, path: &str) -> RequestBuilder {
        self.request(Method::HEAD, path)
    }

    /// A POST request for `path`.
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    /// A PUT request for `path`.
    pub fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::PUT, path)
    }

    /// A PATCH request for `path`.
    pub fn patch(&self, path: &str) -> RequestBuilder {
        self.request(Method::PATCH, path)
    }

    /// A DELETE request for `path`.
    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    /// An arbitrary-method request for `path`.
    ///
    /// Paths are resolved with [`Url::join`] semantics: a leading `/` is
    /// absolute on the host, anything else is relative to the base URL.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        RequestBuilder::new(
            Arc::clone(&self.factory),
            Arc::clone(&self.plugins),
            method,
            self.base_url.clone(),
            path,
        )
    }
}

/// Builder for [`Rest`].
#[must_use]
#[derive(Default)]
pub struct RestBuilder {
    base_url: Option<String>,
    factory: Option<Arc<dyn RequestFactory>>,
    plugins: Vec<Arc<dyn Plugin>>,
}

impl RestBuilder {
    /// Set the base URL all request paths resolve against.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the transport.
    pub fn request_factory(mut self, factory: impl RequestFactory + 'static) -> Self {
        self.factory = Some(Arc::new(factory));
        self
    }

    /// Append one plugin. The first-added plugin is outermost; the
    /// last-added sits nearest the transport.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Arc::new(plugin));
        self
    }

    /// Append several plugins, preserving order.
    pub fn plugins<I, P>(mut self, plugins: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Plugin + 'static,
    {
        for plugin in plugins {
            self.plugins.push(Arc::new(plugin));
        }
        self
    }

    /// Finish, validating the base URL and the presence of a factory.
    pub fn build(self) -> Result<Rest, Error> {
        let raw = self
            .base_url
            .ok_or_else(|| Error::InvalidRequest("base URL is required".into()))?;
        let base_url = Url::parse(&raw)
            .map_err(|error| Error::InvalidRequest(format!("invalid base URL {raw:?}: {error}")))?;
        let factory = self
            .factory
            .ok_or_else(|| Error::InvalidRequest("request factory is required".into()))?;

        Ok(Rest {
            base_url,
            factory,
            plugins: self.plugins.into(),
        })
    }
}

//! Client-side HTTP response routing.
//!
//! Riptide turns a completed HTTP response into exactly one handler
//! invocation, selected by pattern matching on an observable attribute of
//! the response: status code, status series, content type, reason phrase,
//! or anything a custom [`Navigator`] can extract. It composes with an
//! asynchronous request pipeline, so request futures carry not just bytes
//! but a user-selected continuation.
//!
//! # Module Organization
//!
//! ```text
//! riptide
//! ├── route       - terminal handlers (pass, call, capture)
//! ├── binding     - (attribute-or-wildcard, route) pairs and conveniences
//! ├── tree        - immutable attribute→route map with wildcard
//! ├── navigator   - attribute extraction and branch selection
//! ├── dispatch    - glue: response + navigator + tree → route invocation
//! ├── request     - fluent builder, frozen arguments, transport seam
//! ├── rest        - the configured pipeline entry point
//! ├── plugin      - supplier-to-supplier decorators around the transport
//! ├── classify    - temporary-vs-permanent failure classification
//! └── client      - reqwest-backed transport (feature `client`)
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Rest`] | Configured pipeline: base URL, transport, plugins |
//! | [`Route`] | Terminal response handler |
//! | [`RoutingTree`] | Frozen attribute→route map |
//! | [`Navigator`] | Attribute extraction + branch selection |
//! | [`Plugin`] | Response-future decorator |
//! | [`ExceptionClassifier`] | Whitelist of transient-failure predicates |
//!
//! # Dispatching
//!
//! ```
//! use http::StatusCode;
//! use riptide::{any_series, dispatch_response, on, HttpResponse, Route, RoutingTree, Series};
//!
//! # futures::executor::block_on(async {
//! let tree = RoutingTree::of([
//!     on(Series::Successful).call(Route::pass()),
//!     any_series().call(Route::call(|response| {
//!         Err(format!("unexpected status {}", response.status_code()).into())
//!     })),
//! ])?;
//!
//! let response = HttpResponse::new(StatusCode::NO_CONTENT);
//! dispatch_response(response, &riptide::series(), &tree).await?;
//! # Ok::<_, riptide::Error>(())
//! # }).unwrap();
//! ```
//!
//! Routing is total only if a wildcard is bound: with no concrete match and
//! no wildcard the future fails with [`Error::NoRouteMatched`]. Trees are
//! validated once, at construction; duplicate keys and double wildcards
//! are rejected before anything is sent.

pub mod binding;
pub mod classify;
#[cfg(feature = "client")]
pub mod client;
pub mod convert;
pub mod dispatch;
pub mod error;
pub mod media_type;
pub mod navigator;
pub mod plugin;
pub mod request;
pub mod response;
pub mod rest;
pub mod route;
pub mod tree;

/// Qualified constructors for the shipped navigators.
///
/// Thin re-exports of the free functions in [`navigator`], for callers who
/// prefer `navigators::status_code()` over the crate-root paths.
pub mod navigators {
    pub use crate::navigator::{content_type, reason_phrase, series, status, status_code};
}

pub use binding::{
    any, any_content_type, any_series, any_status, any_status_code, on, Binding, Bindings,
    PartialBinding,
};
pub use classify::{ExceptionClassifier, TemporaryExceptionPlugin};
#[cfg(feature = "client")]
pub use client::{ClientConfig, HttpRequestFactory};
pub use convert::{FromBody, Json};
pub use dispatch::dispatch_response;
pub use error::{BoxError, Error, Result};
pub use media_type::MediaType;
pub use navigator::{
    content_type, reason_phrase, series, status, status_code, ContentTypeNavigator, Navigator,
    ReasonPhraseNavigator, Series, SeriesNavigator, StatusCodeNavigator, StatusNavigator,
};
pub use plugin::{Plugin, RequestExecution, ResponseFuture};
pub use request::{RequestArguments, RequestBuilder, RequestFactory};
pub use response::HttpResponse;
pub use rest::{Rest, RestBuilder};
pub use route::{Route, RouteFuture};
pub use tree::RoutingTree;

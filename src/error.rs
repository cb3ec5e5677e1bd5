//! Error types for response routing and the request pipeline.
//!
//! A single [`Error`] enum covers both construction-time failures (routing
//! tree invariants) and runtime failures travelling through request futures.
//! The [`Result`] alias is the crate-wide shorthand.
//!
//! # Error Categories
//!
//! | Category | Variants | When |
//! |----------|----------|------|
//! | Routing | `DuplicateAttributeValue`, `MultipleWildcards`, `NoBindings`, `NoRouteMatched` | tree construction / dispatch |
//! | Transport | `Transport` | network, I/O, protocol |
//! | Classification | `Temporary` | re-wrapped transient transport failures |
//! | Application | `Route` | failures raised inside route handlers |
//! | Decoding | `Decode`, `Json` | body conversion |
//! | Request | `InvalidRequest` | builder misuse, bad URLs |
//!
//! Construction-time errors are returned synchronously by
//! [`RoutingTree::of`](crate::RoutingTree::of) and resolve a `dispatch`
//! future immediately; everything else arrives as the failure value of the
//! returned future.

use std::io;

use thiserror::Error;

/// Result type for routing and pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed application error, as raised by route handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by the routing tree, the dispatcher, and the request
/// pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Two or more concrete bindings share the same attribute value.
    ///
    /// The message enumerates every duplicated key.
    #[error("duplicate attribute values: {0}")]
    DuplicateAttributeValue(String),

    /// More than one wildcard binding was supplied.
    #[error("multiple wildcard bindings")]
    MultipleWildcards,

    /// A routing tree was built from an empty binding sequence.
    #[error("routing tree requires at least one binding")]
    NoBindings,

    /// No concrete binding matched the extracted attribute and no wildcard
    /// was configured.
    #[error("no route matched attribute {0}")]
    NoRouteMatched(String),

    /// Transport-level failure (connect, read, DNS, protocol).
    ///
    /// The [`io::Error`] kind is what the default
    /// [`ExceptionClassifier`](crate::ExceptionClassifier) inspects.
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),

    /// A transient failure, re-wrapped by the
    /// [`TemporaryExceptionPlugin`](crate::TemporaryExceptionPlugin).
    ///
    /// The wrapping depth is exactly one: the inner error is never itself
    /// `Temporary`. Callers may retry the request.
    #[error("temporary failure: {0}")]
    Temporary(#[source] Box<Error>),

    /// An application error raised inside a route handler.
    #[error("route handler failed: {0}")]
    Route(#[source] BoxError),

    /// The response body could not be decoded into the requested type.
    #[error("body decode error: {0}")]
    Decode(String),

    /// JSON deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The request could not be constructed (bad URL, unresolved template
    /// variables, missing builder state).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    /// Wrap an application error raised by a route handler.
    pub fn route(error: impl Into<BoxError>) -> Self {
        Error::Route(error.into())
    }

    /// Whether this failure was classified as transient.
    ///
    /// ```
    /// use std::io;
    /// use riptide::Error;
    ///
    /// let cause = Error::Transport(io::Error::new(io::ErrorKind::TimedOut, "read timed out"));
    /// assert!(Error::Temporary(Box::new(cause)).is_temporary());
    /// assert!(!Error::MultipleWildcards.is_temporary());
    /// ```
    #[inline]
    #[must_use]
    pub fn is_temporary(&self) -> bool {
        matches!(self, Error::Temporary(_))
    }
}

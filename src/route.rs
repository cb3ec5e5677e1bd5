//! Terminal response handlers.
//!
//! A [`Route`] is a pure value: apply this handler to this response. The
//! routing layer never inspects what a route produces; it only guarantees
//! that exactly one route runs per successful dispatch and that handler
//! failures surface through the returned future rather than out of band.

use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};

use crate::error::{BoxError, Error};
use crate::response::HttpResponse;

/// The future produced by applying a route to a response.
pub type RouteFuture<T> = BoxFuture<'static, Result<T, Error>>;

/// A terminal handler: consumes a response, produces a `T`.
///
/// Routes are cheaply cloneable and stateless with respect to the routing
/// tree; any state a handler mutates is the caller's concern.
pub struct Route<T> {
    inner: Arc<dyn Fn(HttpResponse) -> RouteFuture<T> + Send + Sync>,
}

impl<T> Clone for Route<T> {
    fn clone(&self) -> Self {
        Route {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send + 'static> Route<T> {
    /// A route from an asynchronous handler.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(HttpResponse) -> RouteFuture<T> + Send + Sync + 'static,
    {
        Route {
            inner: Arc::new(handler),
        }
    }

    /// A route from a synchronous handler; its result is captured into the
    /// returned future.
    pub fn sync<F>(handler: F) -> Self
    where
        F: Fn(HttpResponse) -> Result<T, Error> + Send + Sync + 'static,
    {
        Route::new(move |response| future::ready(handler(response)).boxed())
    }

    /// Apply this route to a response.
    pub fn apply(&self, response: HttpResponse) -> RouteFuture<T> {
        (self.inner)(response)
    }
}

impl Route<()> {
    /// No-op success.
    pub fn pass() -> Self {
        Route::sync(|_| Ok(()))
    }

    /// A side-effecting consumer. Errors it returns are wrapped as
    /// [`Error::Route`].
    pub fn call<F>(handler: F) -> Self
    where
        F: Fn(HttpResponse) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Route::sync(move |response| handler(response).map_err(Error::route))
    }
}

impl Route<HttpResponse> {
    /// Yields the raw response wrapper.
    pub fn capture() -> Self {
        Route::sync(Ok)
    }
}

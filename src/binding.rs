//! Bindings: (attribute key or wildcard, route) pairs.
//!
//! A [`Binding`] pairs a routing key with the [`Route`] to run when that key
//! matches. Bindings are built through [`on`] (concrete key) or [`any`] and
//! its typed conveniences (wildcard), followed by one of the
//! [`PartialBinding`] finishers:
//!
//! - [`call`](PartialBinding::call) attaches a raw route;
//! - [`consume`](PartialBinding::consume) decodes the body and feeds it to a
//!   handler, yielding unit;
//! - [`map`](PartialBinding::map) decodes the body and yields the handler's
//!   result as the route output.
//!
//! The same factories exist as associated functions on [`Bindings`] for
//! callers who prefer qualified paths.
//!
//! ```
//! use riptide::{any_series, on, Bindings, Route, Series};
//!
//! let bindings = [
//!     on(Series::Successful).call(Route::pass()),
//!     any_series().call(Route::pass()),
//! ];
//! assert!(bindings[0].key().is_some());
//! assert!(bindings[1].key().is_none());
//!
//! let qualified = Bindings::on(Series::ClientError).call(Route::pass());
//! assert!(qualified.key().is_some());
//! ```

use http::StatusCode;

use crate::convert::FromBody;
use crate::media_type::MediaType;
use crate::navigator::Series;
use crate::route::Route;

/// A routing key (or wildcard) paired with a route.
pub struct Binding<A, T> {
    key: Option<A>,
    route: Route<T>,
}

impl<A, T> Binding<A, T> {
    /// The concrete key, or `None` for the wildcard binding.
    pub fn key(&self) -> Option<&A> {
        self.key.as_ref()
    }

    pub(crate) fn into_parts(self) -> (Option<A>, Route<T>) {
        (self.key, self.route)
    }
}

/// Start a binding on a concrete attribute value.
pub fn on<A>(attribute: A) -> PartialBinding<A> {
    PartialBinding {
        key: Some(attribute),
    }
}

/// Start a wildcard binding for an attribute type.
///
/// Meant as the base for the typed conveniences below; use it directly when
/// routing on a custom attribute type.
pub fn any<A>() -> PartialBinding<A> {
    PartialBinding { key: None }
}

/// Wildcard binding for status attributes.
pub fn any_status() -> PartialBinding<StatusCode> {
    any()
}

/// Wildcard binding for integer status-code attributes.
pub fn any_status_code() -> PartialBinding<u16> {
    any()
}

/// Wildcard binding for status-series attributes.
pub fn any_series() -> PartialBinding<Series> {
    any()
}

/// Wildcard binding for content-type attributes.
pub fn any_content_type() -> PartialBinding<MediaType> {
    any()
}

/// The binding factories, namespaced.
///
/// Associated-function form of [`on`], [`any`], and the typed wildcard
/// conveniences, for callers who prefer qualified paths
/// (`Bindings::on(attr)`) over the free functions.
pub struct Bindings;

impl Bindings {
    /// See [`on`].
    pub fn on<A>(attribute: A) -> PartialBinding<A> {
        on(attribute)
    }

    /// See [`any`].
    pub fn any<A>() -> PartialBinding<A> {
        any()
    }

    /// See [`any_status`].
    pub fn any_status() -> PartialBinding<StatusCode> {
        any_status()
    }

    /// See [`any_status_code`].
    pub fn any_status_code() -> PartialBinding<u16> {
        any_status_code()
    }

    /// See [`any_series`].
    pub fn any_series() -> PartialBinding<Series> {
        any_series()
    }

    /// See [`any_content_type`].
    pub fn any_content_type() -> PartialBinding<MediaType> {
        any_content_type()
    }
}

/// A binding waiting for its route.
#[must_use]
pub struct PartialBinding<A> {
    key: Option<A>,
}

impl<A> PartialBinding<A> {
    /// Attach a route.
    pub fn call<T>(self, route: Route<T>) -> Binding<A, T> {
        Binding {
            key: self.key,
            route,
        }
    }

    /// Decode the body to `B` and hand it to a consumer; the route yields
    /// unit.
    pub fn consume<B, F>(self, handler: F) -> Binding<A, ()>
    where
        B: FromBody,
        F: Fn(B) + Send + Sync + 'static,
    {
        self.call(Route::sync(move |response| {
            handler(B::from_body(&response)?);
            Ok(())
        }))
    }

    /// Decode the body to `B` and yield the mapper's result as the route
    /// output.
    pub fn map<B, T, F>(self, mapper: F) -> Binding<A, T>
    where
        B: FromBody,
        T: Send + 'static,
        F: Fn(B) -> T + Send + Sync + 'static,
    {
        self.call(Route::sync(move |response| {
            Ok(mapper(B::from_body(&response)?))
        }))
    }
}

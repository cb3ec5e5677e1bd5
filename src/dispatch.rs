//! Dispatcher glue: feed one response to the route its navigator selects.
//!
//! The dispatcher is transparent. It extracts the attribute, asks the
//! navigator to select a route, and invokes that route, exactly once per
//! successful dispatch. It never introspects the route's output; on a
//! selection miss with no wildcard configured, the returned future fails
//! with [`Error::NoRouteMatched`].

use std::fmt::Debug;
use std::hash::Hash;

use futures::future::{self, FutureExt};
use tracing::{debug, warn};

use crate::error::Error;
use crate::navigator::Navigator;
use crate::response::HttpResponse;
use crate::route::RouteFuture;
use crate::tree::RoutingTree;

/// Route a completed response through the tree.
pub fn dispatch_response<A, T, N>(
    response: HttpResponse,
    navigator: &N,
    tree: &RoutingTree<A, T>,
) -> RouteFuture<T>
where
    A: Eq + Hash + Debug,
    T: Send + 'static,
    N: Navigator<A> + ?Sized,
{
    let attribute = navigator.extract(&response);
    match navigator.select(attribute.as_ref(), tree) {
        Some(route) => {
            debug!(status = response.status_code(), attribute = ?attribute, "dispatching response");
            route.apply(response)
        }
        None => {
            warn!(status = response.status_code(), attribute = ?attribute, "no route matched");
            let rendered = match attribute {
                Some(attribute) => format!("{attribute:?}"),
                None => "<none>".to_owned(),
            };
            future::ready(Err(Error::NoRouteMatched(rendered))).boxed()
        }
    }
}

//! Plugins: supplier-to-supplier decorators around the transport call.
//!
//! A [`Plugin`] receives the frozen [`RequestArguments`] and the *next*
//! [`RequestExecution`] in the chain, and returns a new execution. The chain
//! is a right fold over the configured plugin list with the raw transport
//! execution as the seed, so the last-listed plugin sits innermost, nearest
//! the transport. There is no priority system; order is defined solely by
//! the caller's list.
//!
//! Plugins may short-circuit (return an execution that never calls `next`),
//! observe completion (await `next()` and inspect the result), or
//! substitute the response or failure. Wrapping happens at dispatch time;
//! *invocation* is lazy: the innermost transport call only happens when
//! the outermost execution is resolved. Dropping the returned future drops
//! the chain inner-first, which is how cancellation propagates.

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::Error;
use crate::request::RequestArguments;
use crate::response::HttpResponse;

/// The future of a completed exchange, prior to dispatch.
pub type ResponseFuture = BoxFuture<'static, Result<HttpResponse, Error>>;

/// A deferred, single-shot transport invocation.
pub type RequestExecution = Box<dyn FnOnce() -> ResponseFuture + Send>;

/// Decorates the response future of each outbound request.
pub trait Plugin: Send + Sync {
    /// Wrap `next`, returning the execution the caller will see.
    fn prepare(&self, arguments: &RequestArguments, next: RequestExecution) -> RequestExecution;
}

impl<F> Plugin for F
where
    F: Fn(&RequestArguments, RequestExecution) -> RequestExecution + Send + Sync,
{
    fn prepare(&self, arguments: &RequestArguments, next: RequestExecution) -> RequestExecution {
        self(arguments, next)
    }
}

/// Fold the plugin list around the transport execution, outer-to-inner.
pub(crate) fn compose(
    plugins: &[Arc<dyn Plugin>],
    arguments: &RequestArguments,
    transport: RequestExecution,
) -> RequestExecution {
    plugins
        .iter()
        .rev()
        .fold(transport, |next, plugin| plugin.prepare(arguments, next))
}

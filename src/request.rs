//! Request construction and the transport seam.
//!
//! [`RequestArguments`] is the frozen description of one outbound request,
//! what plugins observe and what a [`RequestFactory`] turns into a response
//! future. [`RequestBuilder`] is the fluent surface returned by
//! [`Rest::get`](crate::Rest::get) and friends: it accumulates the URI
//! template, path variables, query parameters, headers, and body, and
//! terminates in [`dispatch`](RequestBuilder::dispatch).

use std::fmt::Debug;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;

use bytes::Bytes;
use futures::future::{self, FutureExt};
use http::Method;
use tracing::debug;
use url::Url;

use crate::binding::Binding;
use crate::dispatch::dispatch_response;
use crate::error::Error;
use crate::navigator::Navigator;
use crate::plugin::{self, Plugin, RequestExecution, ResponseFuture};
use crate::route::RouteFuture;
use crate::tree::RoutingTree;

/// Produces a response future for a frozen request.
///
/// This is the transport seam: the pipeline owns no HTTP semantics of its
/// own. Implementations wrap a connection-pooled client; tests substitute
/// scripted doubles.
pub trait RequestFactory: Send + Sync {
    /// Execute the request, yielding the eventual response.
    fn execute(&self, arguments: RequestArguments) -> ResponseFuture;
}

impl<F> RequestFactory for Arc<F>
where
    F: RequestFactory + ?Sized,
{
    fn execute(&self, arguments: RequestArguments) -> ResponseFuture {
        (**self).execute(arguments)
    }
}

/// The frozen description of one outbound request.
#[derive(Clone, Debug)]
pub struct RequestArguments {
    method: Method,
    url: Url,
    headers: Vec<(String, String)>,
    body: Option<Bytes>,
}

impl RequestArguments {
    /// Assemble arguments directly, bypassing the builder.
    pub fn new(
        method: Method,
        url: Url,
        headers: Vec<(String, String)>,
        body: Option<Bytes>,
    ) -> Self {
        RequestArguments {
            method,
            url,
            headers,
            body,
        }
    }

    /// The request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The fully-resolved request URL, query included.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Headers in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The request body, if any.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }
}

/// Fluent builder for one request, ending in `dispatch`.
#[must_use]
pub struct RequestBuilder {
    factory: Arc<dyn RequestFactory>,
    plugins: Arc<[Arc<dyn Plugin>]>,
    method: Method,
    base_url: Url,
    path: String,
    path_variables: Vec<(String, String)>,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<Bytes>,
}

impl RequestBuilder {
    pub(crate) fn new(
        factory: Arc<dyn RequestFactory>,
        plugins: Arc<[Arc<dyn Plugin>]>,
        method: Method,
        base_url: Url,
        path: impl Into<String>,
    ) -> Self {
        RequestBuilder {
            factory,
            plugins,
            method,
            base_url,
            path: path.into(),
            path_variables: Vec::new(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Bind a `{name}` template variable in the path.
    pub fn path_var(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.path_variables.push((name.into(), value.to_string()));
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Send the request and route the response.
    ///
    /// Freezes the arguments, wraps the transport execution in the
    /// configured plugins (outer-to-inner), and chains the dispatcher onto
    /// the response future. The transport is only invoked once the returned
    /// future is polled. A routing-tree construction error resolves the
    /// future immediately; nothing is sent.
    pub fn dispatch<A, T, N>(
        self,
        navigator: N,
        bindings: impl IntoIterator<Item = Binding<A, T>>,
    ) -> RouteFuture<T>
    where
        A: Eq + Hash + Debug + Send + 'static,
        T: Send + 'static,
        N: Navigator<A> + 'static,
    {
        let tree = match RoutingTree::of(bindings) {
            Ok(tree) => tree,
            Err(error) => return future::ready(Err(error)).boxed(),
        };

        let RequestBuilder {
            factory,
            plugins,
            method,
            base_url,
            path,
            path_variables,
            query,
            headers,
            body,
        } = self;

        let arguments = match freeze(method, &base_url, &path, &path_variables, &query, headers, body)
        {
            Ok(arguments) => arguments,
            Err(error) => return future::ready(Err(error)).boxed(),
        };

        debug!(method = %arguments.method(), url = %arguments.url(), "dispatching request");

        let transport_arguments = arguments.clone();
        let transport: RequestExecution =
            Box::new(move || factory.execute(transport_arguments));
        let execution = plugin::compose(&plugins, &arguments, transport);

        async move {
            let response = execution().await?;
            dispatch_response(response, &navigator, &tree).await
        }
        .boxed()
    }
}

fn freeze(
    method: Method,
    base_url: &Url,
    path: &str,
    path_variables: &[(String, String)],
    query: &[(String, String)],
    headers: Vec<(String, String)>,
    body: Option<Bytes>,
) -> Result<RequestArguments, Error> {
    let mut expanded = path.to_owned();
    for (name, value) in path_variables {
        expanded = expanded.replace(&format!("{{{name}}}"), value);
    }
    if expanded.contains('{') {
        return Err(Error::InvalidRequest(format!(
            "unresolved template variables in {expanded:?}"
        )));
    }

    let mut url = base_url
        .join(&expanded)
        .map_err(|error| Error::InvalidRequest(format!("invalid request path {expanded:?}: {error}")))?;
    for (name, value) in query {
        url.query_pairs_mut().append_pair(name, value);
    }

    Ok(RequestArguments::new(method, url, headers, body))
}

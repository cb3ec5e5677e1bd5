//! Failure classification: temporary vs permanent.
//!
//! [`ExceptionClassifier`] is a whitelist of predicates over [`Error`],
//! OR-combined. [`TemporaryExceptionPlugin`] attaches the classifier to the
//! request pipeline: when the transport future fails and any predicate
//! matches, the failure is re-wrapped as [`Error::Temporary`] with the
//! original preserved as its cause, signalling callers that a retry may
//! succeed. The classifier never generates failures of its own; a
//! non-matching error propagates unchanged.
//!
//! The wrapping depth is exactly one. If an inner plugin already wrapped
//! the failure, this plugin is a no-op, so stacking it is harmless.
//!
//! # Examples
//!
//! ```
//! use std::io;
//! use riptide::{Error, ExceptionClassifier};
//!
//! let classifier = ExceptionClassifier::default();
//! let timeout = Error::Transport(io::Error::new(io::ErrorKind::TimedOut, "read timed out"));
//! assert!(classifier.classify(&timeout));
//! assert!(!classifier.classify(&Error::MultipleWildcards));
//!
//! // Additive: extend the whitelist with custom rules.
//! let extended = ExceptionClassifier::default().rule(|error| matches!(error, Error::Decode(_)));
//! assert!(extended.classify(&Error::Decode("truncated".into())));
//! ```
//!
//! Ready-made predicates can be collected up front and handed to
//! [`ExceptionClassifier::create`]:
//!
//! ```
//! use std::sync::Arc;
//! use riptide::classify::Predicate;
//! use riptide::{Error, ExceptionClassifier};
//!
//! let decode_failures: Predicate = Arc::new(|error: &Error| matches!(error, Error::Decode(_)));
//! let classifier = ExceptionClassifier::create([decode_failures]);
//! assert!(classifier.classify(&Error::Decode("truncated".into())));
//! ```

use std::io;
use std::sync::Arc;

use tracing::debug;

use crate::error::Error;
use crate::plugin::{Plugin, RequestExecution};
use crate::request::RequestArguments;

/// A boxed failure predicate, as stored by the classifier.
pub type Predicate = Arc<dyn Fn(&Error) -> bool + Send + Sync>;

/// An immutable, OR-combined list of failure predicates.
#[derive(Clone)]
pub struct ExceptionClassifier {
    predicates: Vec<Predicate>,
}

impl ExceptionClassifier {
    /// A classifier that matches nothing.
    pub fn new() -> Self {
        ExceptionClassifier {
            predicates: Vec::new(),
        }
    }

    /// Build a classifier from ready-made predicates.
    ///
    /// `create(Vec::new())` matches nothing, like [`new`](Self::new).
    /// Closures are usually easier to attach with [`rule`](Self::rule),
    /// which boxes them for you.
    pub fn create<I>(predicates: I) -> Self
    where
        I: IntoIterator<Item = Predicate>,
    {
        ExceptionClassifier {
            predicates: predicates.into_iter().collect(),
        }
    }

    /// Add a predicate to the whitelist.
    #[must_use]
    pub fn rule<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Error) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Arc::new(predicate));
        self
    }

    /// Whether any predicate matches. Order-independent; first match wins.
    pub fn classify(&self, error: &Error) -> bool {
        self.predicates.iter().any(|predicate| predicate(error))
    }

    /// Re-wrap `error` as [`Error::Temporary`] if it matches, preserving it
    /// as the cause. An already-classified error is returned as is, keeping
    /// the wrapping depth at one; so is a non-matching error, untouched.
    pub fn apply(&self, error: Error) -> Error {
        if error.is_temporary() {
            return error;
        }
        if self.classify(&error) {
            debug!(%error, "classified failure as temporary");
            Error::Temporary(Box::new(error))
        } else {
            error
        }
    }
}

impl Default for ExceptionClassifier {
    /// The default whitelist: transport failures that signal transient
    /// conditions, such as timeouts, connection refused / reset / aborted,
    /// broken pipes, truncated reads, and DNS resolution failures.
    fn default() -> Self {
        ExceptionClassifier::new().rule(is_transient_transport)
    }
}

fn is_transient_transport(error: &Error) -> bool {
    let Error::Transport(source) = error else {
        return false;
    };
    use io::ErrorKind::*;
    match source.kind() {
        TimedOut | WouldBlock | ConnectionRefused | ConnectionReset | ConnectionAborted
        | NotConnected | BrokenPipe | UnexpectedEof => true,
        // DNS failures come through without a dedicated kind.
        Other => {
            let text = source.to_string().to_ascii_lowercase();
            text.contains("dns") || text.contains("resolve")
        }
        _ => false,
    }
}

/// Pipeline plugin that labels transient transport failures.
pub struct TemporaryExceptionPlugin {
    classifier: ExceptionClassifier,
}

impl TemporaryExceptionPlugin {
    /// Plugin with the default classifier.
    pub fn new() -> Self {
        TemporaryExceptionPlugin::with_classifier(ExceptionClassifier::default())
    }

    /// Plugin with a caller-supplied classifier.
    pub fn with_classifier(classifier: ExceptionClassifier) -> Self {
        TemporaryExceptionPlugin { classifier }
    }
}

impl Default for TemporaryExceptionPlugin {
    fn default() -> Self {
        TemporaryExceptionPlugin::new()
    }
}

impl Plugin for TemporaryExceptionPlugin {
    fn prepare(&self, _arguments: &RequestArguments, next: RequestExecution) -> RequestExecution {
        let classifier = self.classifier.clone();
        Box::new(move || {
            Box::pin(async move {
                match next().await {
                    Ok(response) => Ok(response),
                    Err(error) => Err(classifier.apply(error)),
                }
            })
        })
    }
}

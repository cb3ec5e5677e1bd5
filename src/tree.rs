//! The routing tree: an immutable attribute→route map with one optional
//! wildcard.
//!
//! [`RoutingTree::of`] validates the binding set once, at construction:
//! concrete keys must be pairwise distinct and at most one wildcard may
//! appear. After that the tree is frozen; lookups are read-only and safe
//! for concurrent use.
//!
//! ```
//! use riptide::{on, any_status_code, Route, RoutingTree};
//!
//! let tree = RoutingTree::of([
//!     on(200u16).call(Route::pass()),
//!     any_status_code().call(Route::pass()),
//! ])
//! .unwrap();
//!
//! assert!(tree.lookup(&200).is_some());
//! assert!(tree.lookup(&503).is_some()); // wildcard
//! ```

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::binding::Binding;
use crate::error::Error;
use crate::route::Route;

/// Immutable attribute→route map plus optional wildcard.
pub struct RoutingTree<A, T> {
    routes: HashMap<A, Route<T>>,
    wildcard: Option<Route<T>>,
}

impl<A, T> Debug for RoutingTree<A, T>
where
    A: Eq + Hash,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingTree")
            .field("routes", &self.routes.len())
            .field("has_wildcard", &self.wildcard.is_some())
            .finish()
    }
}

impl<A, T> RoutingTree<A, T>
where
    A: Eq + Hash,
{
    /// Build a tree from a non-empty binding sequence.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateAttributeValue`] if any concrete key repeats;
    ///   the message enumerates the offending keys.
    /// - [`Error::MultipleWildcards`] if more than one wildcard binding
    ///   appears.
    /// - [`Error::NoBindings`] for an empty sequence.
    pub fn of<I>(bindings: I) -> Result<Self, Error>
    where
        A: Debug,
        I: IntoIterator<Item = Binding<A, T>>,
    {
        let mut routes = HashMap::new();
        let mut wildcard = None;
        let mut extra_wildcards = false;
        let mut duplicates: Vec<String> = Vec::new();
        let mut empty = true;

        for binding in bindings {
            empty = false;
            let (key, route) = binding.into_parts();
            match key {
                Some(attribute) => {
                    if routes.contains_key(&attribute) {
                        let rendered = format!("{attribute:?}");
                        if !duplicates.contains(&rendered) {
                            duplicates.push(rendered);
                        }
                    } else {
                        routes.insert(attribute, route);
                    }
                }
                None if wildcard.is_none() => wildcard = Some(route),
                None => extra_wildcards = true,
            }
        }

        if empty {
            return Err(Error::NoBindings);
        }
        if !duplicates.is_empty() {
            return Err(Error::DuplicateAttributeValue(duplicates.join(", ")));
        }
        if extra_wildcards {
            return Err(Error::MultipleWildcards);
        }

        Ok(RoutingTree { routes, wildcard })
    }

    /// The route bound to `attribute`, falling back to the wildcard.
    pub fn lookup(&self, attribute: &A) -> Option<&Route<T>> {
        self.get(attribute).or_else(|| self.wildcard())
    }

    /// The route bound to exactly `attribute`, without wildcard fallback.
    pub fn get(&self, attribute: &A) -> Option<&Route<T>> {
        self.routes.get(attribute)
    }

    /// The wildcard route, if one was bound.
    pub fn wildcard(&self) -> Option<&Route<T>> {
        self.wildcard.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{any, on};
    use crate::media_type::MediaType;

    fn unit() -> Route<()> {
        Route::pass()
    }

    #[test]
    fn builds_from_distinct_keys() {
        let tree = RoutingTree::of([
            on(MediaType::text_plain()).call(unit()),
            on(MediaType::application_json()).call(unit()),
        ])
        .unwrap();

        assert!(tree.get(&MediaType::text_plain()).is_some());
        assert!(tree.get(&MediaType::application_xml()).is_none());
    }

    #[test]
    fn rejects_duplicate_keys_naming_each_once() {
        let error = RoutingTree::of([
            on(MediaType::application_json()).call(unit()),
            on(MediaType::application_json()).call(unit()),
            on(MediaType::application_xml()).call(unit()),
            on(MediaType::application_xml()).call(unit()),
            on(MediaType::text_plain()).call(unit()),
        ])
        .unwrap_err();

        match error {
            Error::DuplicateAttributeValue(keys) => {
                assert!(keys.contains("application/json"));
                assert!(keys.contains("application/xml"));
                assert!(!keys.contains("text/plain"));
                assert_eq!(keys.matches("application/json").count(), 1);
            }
            other => panic!("expected duplicate rejection, got {other:?}"),
        }
    }

    #[test]
    fn rejects_multiple_wildcards() {
        let error = RoutingTree::of([
            any::<u16>().call(unit()),
            any::<u16>().call(unit()),
        ])
        .unwrap_err();
        assert!(matches!(error, Error::MultipleWildcards));
    }

    #[test]
    fn rejects_empty_binding_sets() {
        let error = RoutingTree::<u16, ()>::of([]).unwrap_err();
        assert!(matches!(error, Error::NoBindings));
    }

    #[test]
    fn lookup_falls_back_to_wildcard() {
        let tree = RoutingTree::of([
            on(200u16).call(unit()),
            any::<u16>().call(unit()),
        ])
        .unwrap();

        assert!(tree.get(&404).is_none());
        assert!(tree.lookup(&404).is_some());
    }

    #[test]
    fn lookup_without_wildcard_is_absent() {
        let tree = RoutingTree::of([on(200u16).call(unit())]).unwrap();
        assert!(tree.lookup(&404).is_none());
    }
}

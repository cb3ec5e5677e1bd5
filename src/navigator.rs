//! Navigators: strategies that extract a routing attribute from a response
//! and select a branch of the tree.
//!
//! A [`Navigator`] does two things: [`extract`](Navigator::extract) computes
//! the attribute (which may be absent: missing header, unparseable value),
//! and [`select`](Navigator::select) picks a route from the tree. The
//! provided `select` maps an absent attribute to the wildcard and otherwise
//! performs an equality lookup; navigators with richer selection rules
//! override it.
//!
//! # Shipped navigators
//!
//! | Constructor | Attribute | Extraction |
//! |-------------|-----------|------------|
//! | [`status_code`] | `u16` | status as integer |
//! | [`status`] | [`http::StatusCode`] | status |
//! | [`series`] | [`Series`] | status class (`status / 100`) |
//! | [`content_type`] | [`MediaType`] | `Content-Type` header, parameters retained |
//! | [`reason_phrase`] | `String` | reason phrase |

use std::hash::Hash;

use http::StatusCode;

use crate::media_type::MediaType;
use crate::response::HttpResponse;
use crate::route::Route;
use crate::tree::RoutingTree;

/// Extracts an attribute from a response and selects a route.
pub trait Navigator<A: Eq + Hash>: Send + Sync {
    /// Compute the routing attribute for this response, if any.
    fn extract(&self, response: &HttpResponse) -> Option<A>;

    /// Select a route for the extracted attribute.
    ///
    /// The default maps an absent attribute to the wildcard and otherwise
    /// delegates to [`RoutingTree::lookup`].
    fn select<'t, T>(
        &self,
        attribute: Option<&A>,
        tree: &'t RoutingTree<A, T>,
    ) -> Option<&'t Route<T>> {
        match attribute {
            Some(attribute) => tree.lookup(attribute),
            None => tree.wildcard(),
        }
    }
}

/// HTTP status classes, `1xx` through `5xx`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Series {
    Informational,
    Successful,
    Redirection,
    ClientError,
    ServerError,
}

impl Series {
    /// The series for a status code, `None` outside `100..=599`.
    ///
    /// ```
    /// use riptide::Series;
    ///
    /// assert_eq!(Series::of(204), Some(Series::Successful));
    /// assert_eq!(Series::of(503), Some(Series::ServerError));
    /// assert_eq!(Series::of(99), None);
    /// ```
    pub fn of(code: u16) -> Option<Series> {
        match code / 100 {
            1 => Some(Series::Informational),
            2 => Some(Series::Successful),
            3 => Some(Series::Redirection),
            4 => Some(Series::ClientError),
            5 => Some(Series::ServerError),
            _ => None,
        }
    }
}

/// Routes on the integer status code. See [`status_code`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StatusCodeNavigator;

impl Navigator<u16> for StatusCodeNavigator {
    fn extract(&self, response: &HttpResponse) -> Option<u16> {
        Some(response.status_code())
    }
}

/// Routes on [`http::StatusCode`]. See [`status`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StatusNavigator;

impl Navigator<StatusCode> for StatusNavigator {
    fn extract(&self, response: &HttpResponse) -> Option<StatusCode> {
        Some(response.status())
    }
}

/// Routes on the status [`Series`]. See [`series`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SeriesNavigator;

impl Navigator<Series> for SeriesNavigator {
    fn extract(&self, response: &HttpResponse) -> Option<Series> {
        Series::of(response.status_code())
    }
}

/// Routes on the `Content-Type` header. See [`content_type`].
///
/// Matching is exact on type, subtype, and parameters; responses whose
/// header is missing or unparseable fall to the wildcard.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContentTypeNavigator;

impl Navigator<MediaType> for ContentTypeNavigator {
    fn extract(&self, response: &HttpResponse) -> Option<MediaType> {
        response.content_type()
    }
}

/// Routes on the reason phrase. See [`reason_phrase`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ReasonPhraseNavigator;

impl Navigator<String> for ReasonPhraseNavigator {
    fn extract(&self, response: &HttpResponse) -> Option<String> {
        response.reason_phrase().map(str::to_owned)
    }
}

/// Navigator over integer status codes.
pub fn status_code() -> StatusCodeNavigator {
    StatusCodeNavigator
}

/// Navigator over [`http::StatusCode`] values.
pub fn status() -> StatusNavigator {
    StatusNavigator
}

/// Navigator over status series.
pub fn series() -> SeriesNavigator {
    SeriesNavigator
}

/// Navigator over media types, parameters retained.
pub fn content_type() -> ContentTypeNavigator {
    ContentTypeNavigator
}

/// Navigator over reason phrases.
pub fn reason_phrase() -> ReasonPhraseNavigator {
    ReasonPhraseNavigator
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{any, on};

    #[test]
    fn series_covers_all_classes() {
        assert_eq!(Series::of(100), Some(Series::Informational));
        assert_eq!(Series::of(201), Some(Series::Successful));
        assert_eq!(Series::of(307), Some(Series::Redirection));
        assert_eq!(Series::of(404), Some(Series::ClientError));
        assert_eq!(Series::of(599), Some(Series::ServerError));
        assert_eq!(Series::of(600), None);
    }

    #[test]
    fn content_type_extraction_keeps_parameters() {
        let response = HttpResponse::new(StatusCode::OK)
            .with_header("Content-Type", "text/plain; charset=utf-8");

        let extracted = content_type().extract(&response).unwrap();
        assert_eq!(extracted.parameter("charset"), Some("utf-8"));
    }

    #[test]
    fn unparseable_content_type_extracts_nothing() {
        let response = HttpResponse::new(StatusCode::OK).with_header("Content-Type", "garbage");
        assert!(content_type().extract(&response).is_none());
    }

    #[test]
    fn absent_attribute_selects_the_wildcard() {
        let tree = RoutingTree::of([
            on(MediaType::text_plain()).call(Route::pass()),
            any::<MediaType>().call(Route::pass()),
        ])
        .unwrap();

        let selected = content_type().select(None, &tree);
        assert!(selected.is_some());
    }

    #[test]
    fn absent_attribute_without_wildcard_selects_nothing() {
        let tree = RoutingTree::of([on(MediaType::text_plain()).call(Route::pass())]).unwrap();
        assert!(content_type().select(None, &tree).is_none());
    }

    #[test]
    fn reason_phrase_uses_canonical_fallback() {
        let response = HttpResponse::new(StatusCode::NOT_FOUND);
        assert_eq!(
            reason_phrase().extract(&response).as_deref(),
            Some("Not Found")
        );
    }
}

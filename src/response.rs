//! The response wrapper consumed by routes.
//!
//! [`HttpResponse`] carries what the routing layer needs from a completed
//! HTTP exchange: status, optional reason phrase, headers, and the body
//! bytes. Request factories build one per exchange; the dispatcher hands it
//! to exactly one route *by value*, so the single-consumption rule for
//! bodies is enforced by ownership.
//!
//! # Examples
//!
//! ```
//! use http::StatusCode;
//! use riptide::HttpResponse;
//!
//! let response = HttpResponse::new(StatusCode::OK)
//!     .with_header("Content-Type", "text/plain")
//!     .with_body("It works!");
//!
//! assert_eq!(response.status_code(), 200);
//! assert_eq!(response.header("content-type"), Some("text/plain"));
//! assert_eq!(response.body_str(), Some("It works!"));
//! ```

use std::collections::BTreeMap;

use bytes::Bytes;
use http::StatusCode;

use crate::media_type::MediaType;

/// A completed HTTP response, as seen by navigators and routes.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    status: StatusCode,
    reason: Option<String>,
    headers: BTreeMap<String, String>,
    body: Bytes,
}

impl HttpResponse {
    /// Create an empty response with the given status.
    pub fn new(status: StatusCode) -> Self {
        HttpResponse {
            status,
            reason: None,
            headers: BTreeMap::new(),
            body: Bytes::new(),
        }
    }

    /// Set the reason phrase from the status line.
    ///
    /// Transports that do not surface one (HTTP/2 has none) leave this
    /// unset and [`reason_phrase`](Self::reason_phrase) falls back to the
    /// canonical text for the status.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replace the full header map.
    #[must_use]
    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Set the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// The response status.
    #[inline]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The status as a bare integer.
    #[inline]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// The reason phrase: the transport-supplied one if present, else the
    /// canonical phrase for the status.
    pub fn reason_phrase(&self) -> Option<&str> {
        self.reason
            .as_deref()
            .or_else(|| self.status.canonical_reason())
    }

    /// Look up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// All headers.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// The parsed `Content-Type` header, if present and well-formed.
    pub fn content_type(&self) -> Option<MediaType> {
        self.header("content-type")
            .and_then(|value| MediaType::parse(value).ok())
    }

    /// The response body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The body as UTF-8, if valid.
    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Consume the response, yielding the body.
    pub fn into_body(self) -> Bytes {
        self.body
    }
}

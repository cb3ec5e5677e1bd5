//! Media type parsing and comparison.
//!
//! [`MediaType`] is the attribute type used by the content-type navigator.
//! Equality is exact on `(type, subtype, parameters)`: two media types that
//! differ only in a `charset` parameter are *different* routing keys.
//! Callers that want parameter-insensitive routing can bind on
//! [`MediaType::without_parameters`] with their own navigator.
//!
//! Type, subtype, and parameter names are compared case-insensitively
//! (stored lowercased); parameter values keep their case except `charset`,
//! which RFC 2046 defines as case-insensitive.
//!
//! # Examples
//!
//! ```
//! use riptide::MediaType;
//!
//! let parsed = MediaType::parse("Text/Plain; Charset=UTF-8").unwrap();
//! assert_eq!(parsed, MediaType::text_plain().with_parameter("charset", "utf-8"));
//! assert_ne!(parsed, MediaType::text_plain());
//! assert_eq!(parsed.without_parameters(), MediaType::text_plain());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A parsed media type: `type/subtype` plus parameters.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MediaType {
    kind: String,
    subtype: String,
    parameters: BTreeMap<String, String>,
}

impl MediaType {
    /// Create a media type with no parameters.
    pub fn new(kind: impl Into<String>, subtype: impl Into<String>) -> Self {
        MediaType {
            kind: kind.into().to_ascii_lowercase(),
            subtype: subtype.into().to_ascii_lowercase(),
            parameters: BTreeMap::new(),
        }
    }

    /// `application/json`
    pub fn application_json() -> Self {
        MediaType::new("application", "json")
    }

    /// `application/xml`
    pub fn application_xml() -> Self {
        MediaType::new("application", "xml")
    }

    /// `text/plain`
    pub fn text_plain() -> Self {
        MediaType::new("text", "plain")
    }

    /// Parse a `Content-Type` header value.
    ///
    /// Accepts `type/subtype` optionally followed by `;`-separated
    /// `name=value` parameters. Values may be quoted.
    pub fn parse(value: &str) -> Result<Self, Error> {
        let mut sections = value.split(';');
        let essence = sections.next().unwrap_or_default().trim();

        let (kind, subtype) = essence
            .split_once('/')
            .ok_or_else(|| Error::Decode(format!("invalid media type: {value:?}")))?;
        let kind = kind.trim();
        let subtype = subtype.trim();
        if kind.is_empty() || subtype.is_empty() {
            return Err(Error::Decode(format!("invalid media type: {value:?}")));
        }

        let mut media_type = MediaType::new(kind, subtype);
        for section in sections {
            let section = section.trim();
            if section.is_empty() {
                continue;
            }
            let (name, parameter) = section
                .split_once('=')
                .ok_or_else(|| Error::Decode(format!("invalid media type parameter: {section:?}")))?;
            media_type = media_type.with_parameter(name.trim(), parameter.trim().trim_matches('"'));
        }
        Ok(media_type)
    }

    /// Add a parameter, returning the extended media type.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into().to_ascii_lowercase();
        let mut value = value.into();
        if name == "charset" {
            value = value.to_ascii_lowercase();
        }
        self.parameters.insert(name, value);
        self
    }

    /// This media type with all parameters stripped.
    #[must_use]
    pub fn without_parameters(&self) -> Self {
        MediaType {
            kind: self.kind.clone(),
            subtype: self.subtype.clone(),
            parameters: BTreeMap::new(),
        }
    }

    /// Primary type, e.g. `application`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Subtype, e.g. `json`.
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Parameter value by (case-insensitive) name.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.subtype)?;
        for (name, value) in &self.parameters {
            write!(f, "; {name}={value}")?;
        }
        Ok(())
    }
}

// Debug renders the canonical header form so routing errors can name keys
// the way callers wrote them.
impl fmt::Debug for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for MediaType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        MediaType::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_essence() {
        let media_type = MediaType::parse("application/json").unwrap();
        assert_eq!(media_type.kind(), "application");
        assert_eq!(media_type.subtype(), "json");
        assert_eq!(media_type, MediaType::application_json());
    }

    #[test]
    fn parses_parameters() {
        let media_type = MediaType::parse("text/plain; charset=utf-8; format=flowed").unwrap();
        assert_eq!(media_type.parameter("charset"), Some("utf-8"));
        assert_eq!(media_type.parameter("format"), Some("flowed"));
    }

    #[test]
    fn type_and_parameter_names_are_case_insensitive() {
        let upper = MediaType::parse("Text/Plain; Charset=UTF-8").unwrap();
        let lower = MediaType::parse("text/plain; charset=utf-8").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn parameters_distinguish_media_types() {
        let plain = MediaType::text_plain();
        let with_charset = MediaType::text_plain().with_parameter("charset", "utf-8");
        assert_ne!(plain, with_charset);
        assert_eq!(with_charset.without_parameters(), plain);
    }

    #[test]
    fn quoted_parameter_values() {
        let media_type = MediaType::parse(r#"text/plain; charset="utf-8""#).unwrap();
        assert_eq!(media_type.parameter("charset"), Some("utf-8"));
    }

    #[test]
    fn display_round_trips() {
        let media_type = MediaType::parse("text/plain; charset=utf-8").unwrap();
        assert_eq!(media_type.to_string(), "text/plain; charset=utf-8");
        assert_eq!(MediaType::parse(&media_type.to_string()).unwrap(), media_type);
    }

    #[test]
    fn debug_renders_header_form() {
        assert_eq!(
            format!("{:?}", MediaType::application_json()),
            "application/json"
        );
    }

    #[test]
    fn rejects_missing_slash() {
        assert!(MediaType::parse("nonsense").is_err());
        assert!(MediaType::parse("/json").is_err());
        assert!(MediaType::parse("application/").is_err());
    }
}

//! The pagination route segment and address helpers.
//!
//! A paginated address is a canonical page address followed by the route
//! segment and a page number: `/blog/` + `page/` + `3` gives `/blog/page/3`.
//! The segment is configured once per process and injected wherever addresses
//! are built or matched.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Route segment used when none is configured.
pub const DEFAULT_ROUTE_SEGMENT: &str = "page/";

/// The literal token separating a canonical address from its page number.
///
/// Never empty: blank input falls back to [`DEFAULT_ROUTE_SEGMENT`]. Non-blank
/// input is kept verbatim, including the absence of a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RouteSegment(String);

impl RouteSegment {
    /// Creates a segment, falling back to the default for blank values.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Self::default()
        } else {
            Self(value)
        }
    }

    /// Creates a segment from an optional configuration value.
    pub fn from_setting(value: Option<&str>) -> Self {
        value.map(Self::new).unwrap_or_default()
    }

    /// Returns the segment text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the address of page `number` under `base`.
    ///
    /// No trailing slash is appended; callers normalize.
    #[must_use]
    pub fn page_address(&self, base: &str, number: u32) -> String {
        format!("{base}{}{number}", self.0)
    }
}

impl Default for RouteSegment {
    fn default() -> Self {
        Self(DEFAULT_ROUTE_SEGMENT.to_string())
    }
}

impl fmt::Display for RouteSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RouteSegment {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<RouteSegment> for String {
    fn from(segment: RouteSegment) -> Self {
        segment.0
    }
}

/// Normalizes an incoming address the way the host store does before lookup.
///
/// Surrounding whitespace is trimmed, the address is wrapped in leading and
/// trailing slashes, and runs of slashes collapse to one.
pub fn clean_address(address: &str) -> String {
    let wrapped = format!("/{}/", address.trim());
    let mut cleaned = String::with_capacity(wrapped.len());
    let mut previous_slash = false;
    for c in wrapped.chars() {
        if c == '/' {
            if !previous_slash {
                cleaned.push(c);
            }
            previous_slash = true;
        } else {
            cleaned.push(c);
            previous_slash = false;
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_segment_falls_back_to_default() {
        assert_eq!(RouteSegment::new("").as_str(), "page/");
        assert_eq!(RouteSegment::new("   ").as_str(), "page/");
        assert_eq!(RouteSegment::from_setting(None).as_str(), "page/");
        assert_eq!(RouteSegment::from_setting(Some("p/")).as_str(), "p/");
    }

    #[test]
    fn segment_is_used_verbatim() {
        assert_eq!(RouteSegment::new("seite").as_str(), "seite");
    }

    #[test]
    fn page_address_has_no_trailing_slash() {
        let seg = RouteSegment::default();
        assert_eq!(seg.page_address("/blog/", 3), "/blog/page/3");
        assert_eq!(seg.page_address("/", 1), "/page/1");
    }

    #[test]
    fn deserializing_blank_segment_uses_default() {
        let seg: RouteSegment = serde_json::from_str("\"\"").unwrap();
        assert_eq!(seg, RouteSegment::default());
        let json = serde_json::to_string(&RouteSegment::new("p/")).unwrap();
        assert_eq!(json, "\"p/\"");
    }

    #[test]
    fn clean_address_normalizes_slashes() {
        assert_eq!(clean_address("blog"), "/blog/");
        assert_eq!(clean_address(" /blog//page/2 "), "/blog/page/2/");
        assert_eq!(clean_address(""), "/");
        assert_eq!(clean_address("/"), "/");
        assert_eq!(clean_address("//a///b//"), "/a/b/");
    }
}

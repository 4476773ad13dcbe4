//! Classification of incoming addresses against a page's canonical address.
//!
//! An address can refer to a page directly (canonical), to a numbered window
//! of that page's children (`<page><segment><n>/`), or to a numbered window of
//! a date-archive view nested under the page
//! (`<page><yyyy>/<mm>/<dd><segment><n>/`, month and day digits optional).
//!
//! The matcher is pure: it never consults the store. Callers decide which
//! page to classify against and what to do with the result.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::route::RouteSegment;

/// Date captured from a paginated archive address.
///
/// Reported for information only; it does not narrow the candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveDate {
    pub year: u16,
    pub month: Option<u8>,
    pub day: Option<u8>,
}

/// Result of classifying an address against a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AddressMatch {
    /// Not a synthetic address of this page; resolve it normally.
    Canonical,
    /// `<page><segment><n>/`
    PaginatedSelf { page_number: u32 },
    /// `<page><archive date><segment><n>/`
    PaginatedArchive { page_number: u32, archive: ArchiveDate },
}

impl AddressMatch {
    /// The page number carried by a paginated match.
    #[must_use]
    pub const fn page_number(&self) -> Option<u32> {
        match self {
            Self::Canonical => None,
            Self::PaginatedSelf { page_number } | Self::PaginatedArchive { page_number, .. } => {
                Some(*page_number)
            }
        }
    }

    /// Whether the address is synthetic.
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        !matches!(self, Self::Canonical)
    }
}

/// Which of the two canonical address forms a lookup is made by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressForm {
    /// Flat url. Only the paginated-self pattern applies.
    Url,
    /// Hierarchical path. Paginated-self, then paginated-archive.
    Path,
}

/// Classifies addresses using an injected route segment.
///
/// The patterns only depend on the segment, so they are compiled once here
/// and applied to whatever follows the literal page address.
#[derive(Debug, Clone)]
pub struct AddressMatcher {
    segment: RouteSegment,
    patterns: Option<SuffixPatterns>,
}

/// Anchored patterns for the part of an address after the page address.
#[derive(Debug, Clone)]
struct SuffixPatterns {
    /// `{segment}(\d+)/`
    paginated: Regex,
    /// `{segment}(\d+)` with an optional trailing slash.
    request: Regex,
    /// `(\d{4})(?:/(\d{2})?)(?:/(\d{2})?){segment}(\d+)/`
    archive: Regex,
}

impl SuffixPatterns {
    fn compile(segment: &RouteSegment) -> Result<Self, regex::Error> {
        let seg = regex::escape(segment.as_str());
        Ok(Self {
            paginated: Regex::new(&format!(r"^{seg}([0-9]+)/$"))?,
            request: Regex::new(&format!(r"^{seg}([0-9]+)/?$"))?,
            archive: Regex::new(&format!(
                r"^([0-9]{{4}})(?:/([0-9]{{2}})?)(?:/([0-9]{{2}})?){seg}([0-9]+)/$"
            ))?,
        })
    }
}

impl Default for AddressMatcher {
    fn default() -> Self {
        Self::new(RouteSegment::default())
    }
}

impl AddressMatcher {
    /// Builds a matcher for `segment`.
    ///
    /// If the patterns cannot be compiled the failure is logged and every
    /// address classifies as canonical.
    pub fn new(segment: RouteSegment) -> Self {
        match Self::try_new(segment.clone()) {
            Ok(matcher) => matcher,
            Err(error) => {
                tracing::warn!(
                    segment = %segment,
                    %error,
                    "Route segment pattern rejected; paginated addresses will not match"
                );
                Self {
                    segment,
                    patterns: None,
                }
            }
        }
    }

    /// Builds a matcher for `segment`, reporting a pattern that fails to compile.
    pub fn try_new(segment: RouteSegment) -> Result<Self, regex::Error> {
        let patterns = SuffixPatterns::compile(&segment)?;
        Ok(Self {
            segment,
            patterns: Some(patterns),
        })
    }

    /// The route segment this matcher was built with.
    pub fn segment(&self) -> &RouteSegment {
        &self.segment
    }

    /// Classifies `candidate` against `page_address`, trying the
    /// paginated-self pattern first and the archive pattern second.
    pub fn classify(&self, candidate: &str, page_address: &str) -> AddressMatch {
        self.classify_as(candidate, page_address, AddressForm::Path)
    }

    /// Classifies `candidate` using the patterns that apply to `form`.
    pub fn classify_as(&self, candidate: &str, page_address: &str, form: AddressForm) -> AddressMatch {
        if let Some(page_number) = self.match_self(candidate, page_address) {
            return AddressMatch::PaginatedSelf { page_number };
        }
        if form == AddressForm::Path {
            if let Some((page_number, archive)) = self.match_archive(candidate, page_address) {
                return AddressMatch::PaginatedArchive {
                    page_number,
                    archive,
                };
            }
        }
        AddressMatch::Canonical
    }

    /// Matches `^{page_address}{segment}(\d+)/$`.
    pub fn match_self(&self, candidate: &str, page_address: &str) -> Option<u32> {
        let rest = candidate.strip_prefix(page_address)?;
        let caps = self.patterns.as_ref()?.paginated.captures(rest)?;
        Some(parse_page_number(caps.get(1)?.as_str()))
    }

    /// Matches `^{page_address}(\d{4})(?:/(\d{2})?)(?:/(\d{2})?){segment}(\d+)/$`.
    ///
    /// The slashes before month and day are required; only their digits are
    /// optional.
    pub fn match_archive(&self, candidate: &str, page_address: &str) -> Option<(u32, ArchiveDate)> {
        let rest = candidate.strip_prefix(page_address)?;
        let caps = self.patterns.as_ref()?.archive.captures(rest)?;
        let archive = ArchiveDate {
            year: caps.get(1)?.as_str().parse().ok()?,
            month: caps.get(2).and_then(|m| m.as_str().parse().ok()),
            day: caps.get(3).and_then(|d| d.as_str().parse().ok()),
        };
        Some((parse_page_number(caps.get(4)?.as_str()), archive))
    }

    /// Extracts the page number a request address asks of `page_address`.
    ///
    /// Unlike the lookup patterns the trailing slash is optional here, so a
    /// page can render its own window from `/blog/page/2` as well as
    /// `/blog/page/2/`.
    pub fn page_number_in_request(&self, request_path: &str, page_address: &str) -> Option<u32> {
        let rest = request_path.strip_prefix(page_address)?;
        let caps = self.patterns.as_ref()?.request.captures(rest)?;
        Some(parse_page_number(caps.get(1)?.as_str()))
    }
}

/// Every `/`-terminated proper prefix of `address`, shortest first.
///
/// These are the canonical addresses that could own a synthetic address.
pub fn base_prefixes(address: &str) -> Vec<&str> {
    address
        .match_indices('/')
        .map(|(i, _)| &address[..=i])
        .filter(|prefix| prefix.len() < address.len())
        .collect()
}

/// Digits that overflow saturate, so absurd page numbers land out of range.
fn parse_page_number(digits: &str) -> u32 {
    digits.parse().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> AddressMatcher {
        AddressMatcher::new(RouteSegment::default())
    }

    #[test]
    fn paginated_self_requires_trailing_slash() {
        let m = matcher();
        assert_eq!(
            m.classify("/blog/page/2/", "/blog/"),
            AddressMatch::PaginatedSelf { page_number: 2 }
        );
        assert_eq!(m.classify("/blog/page/2", "/blog/"), AddressMatch::Canonical);
        assert_eq!(m.classify("/blog/", "/blog/"), AddressMatch::Canonical);
        assert_eq!(m.classify("/blog/page/x/", "/blog/"), AddressMatch::Canonical);
    }

    #[test]
    fn paginated_self_is_anchored() {
        let m = matcher();
        assert_eq!(m.classify("/x/blog/page/2/", "/blog/"), AddressMatch::Canonical);
        assert_eq!(m.classify("/blog/page/2/more/", "/blog/"), AddressMatch::Canonical);
        assert_eq!(
            m.classify("/page/10/", "/"),
            AddressMatch::PaginatedSelf { page_number: 10 }
        );
    }

    #[test]
    fn page_address_is_matched_literally() {
        let m = matcher();
        // A regex metacharacter in the address must not act as a wildcard.
        assert_eq!(m.classify("/aXb/page/1/", "/a.b/"), AddressMatch::Canonical);
        assert_eq!(
            m.classify("/a.b/page/1/", "/a.b/"),
            AddressMatch::PaginatedSelf { page_number: 1 }
        );
    }

    #[test]
    fn custom_segment() {
        let m = AddressMatcher::new(RouteSegment::new("p-"));
        assert_eq!(
            m.classify("/news/p-4/", "/news/"),
            AddressMatch::PaginatedSelf { page_number: 4 }
        );
        assert_eq!(m.classify("/news/page/4/", "/news/"), AddressMatch::Canonical);
    }

    #[test]
    fn archive_year_month() {
        let m = matcher();
        assert_eq!(
            m.classify("/blog/2008/01/page/2/", "/blog/"),
            AddressMatch::PaginatedArchive {
                page_number: 2,
                archive: ArchiveDate {
                    year: 2008,
                    month: Some(1),
                    day: None,
                },
            }
        );
    }

    #[test]
    fn archive_shapes_follow_the_pattern_literally() {
        let m = matcher();
        let day = m.classify("/blog/2008/01/02page/3/", "/blog/");
        assert_eq!(day.page_number(), Some(3));
        assert!(matches!(
            day,
            AddressMatch::PaginatedArchive {
                archive: ArchiveDate {
                    day: Some(2),
                    ..
                },
                ..
            }
        ));
        assert_eq!(
            m.classify("/blog/2008//page/1/", "/blog/").page_number(),
            Some(1)
        );
        // The slash before the month is mandatory.
        assert_eq!(m.classify("/blog/2008/page/2/", "/blog/"), AddressMatch::Canonical);
        assert_eq!(
            m.classify("/blog/2008/01/02/page/2/", "/blog/"),
            AddressMatch::Canonical
        );
    }

    #[test]
    fn url_form_ignores_archive_pattern() {
        let m = matcher();
        assert_eq!(
            m.classify_as("/blog/2008/01/page/2/", "/blog/", AddressForm::Url),
            AddressMatch::Canonical
        );
        assert_eq!(
            m.classify_as("/blog/page/2/", "/blog/", AddressForm::Url),
            AddressMatch::PaginatedSelf { page_number: 2 }
        );
    }

    #[test]
    fn overflowing_page_number_saturates() {
        let m = matcher();
        assert_eq!(
            m.classify("/blog/page/99999999999999/", "/blog/").page_number(),
            Some(u32::MAX)
        );
    }

    #[test]
    fn non_ascii_digits_are_not_page_numbers() {
        let m = matcher();
        assert_eq!(m.classify("/blog/page/٣/", "/blog/"), AddressMatch::Canonical);
    }

    #[test]
    fn request_page_number_accepts_optional_slash() {
        let m = matcher();
        assert_eq!(m.page_number_in_request("/blog/page/3", "/blog/"), Some(3));
        assert_eq!(m.page_number_in_request("/blog/page/3/", "/blog/"), Some(3));
        assert_eq!(m.page_number_in_request("/blog/", "/blog/"), None);
        assert_eq!(m.page_number_in_request("/other/page/3/", "/blog/"), None);
    }

    #[test]
    fn one_matcher_serves_every_base() {
        let m = matcher();
        for (base, address) in [
            ("/", "/page/3/"),
            ("/blog/", "/blog/page/3/"),
            ("/blog/page/", "/blog/page/page/3/"),
        ] {
            assert_eq!(m.classify(address, base).page_number(), Some(3), "{base}");
        }
        // The page address is a literal prefix, not a pattern.
        assert_eq!(m.classify("/blog/page/3/", "/b.og/"), AddressMatch::Canonical);
        assert_eq!(m.page_number_in_request("/blog/page/3", "/blog/page"), None);
    }

    #[test]
    fn metacharacter_segment_compiles_and_matches_literally() {
        let m = AddressMatcher::try_new(RouteSegment::new("(p)+?/")).unwrap();
        assert_eq!(
            m.classify("/news/(p)+?/4/", "/news/"),
            AddressMatch::PaginatedSelf { page_number: 4 }
        );
        assert_eq!(m.classify("/news/ppp/4/", "/news/"), AddressMatch::Canonical);
        assert_eq!(m.page_number_in_request("/news/(p)+?/4", "/news/"), Some(4));
    }

    #[test]
    fn base_prefixes_shortest_first() {
        assert_eq!(
            base_prefixes("/blog/page/2/"),
            vec!["/", "/blog/", "/blog/page/"]
        );
        assert!(base_prefixes("/").is_empty());
    }

    #[test]
    fn match_accessors() {
        assert!(!AddressMatch::Canonical.is_paginated());
        assert_eq!(AddressMatch::Canonical.page_number(), None);
        let json = serde_json::to_value(AddressMatch::PaginatedSelf { page_number: 2 }).unwrap();
        assert_eq!(json["kind"], "paginated_self");
        assert_eq!(json["page_number"], 2);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn page_address() -> impl Strategy<Value = String> {
            proptest::collection::vec("[a-z0-9.+*?()-]{1,8}", 0..4)
                .prop_map(|slugs| {
                    let mut address = String::from("/");
                    for slug in slugs {
                        address.push_str(&slug);
                        address.push('/');
                    }
                    address
                })
        }

        proptest! {
            #[test]
            fn synthetic_address_classifies_to_its_number(
                base in page_address(),
                n in 1u32..100_000,
            ) {
                let m = AddressMatcher::default();
                let address = format!("{}/", m.segment().page_address(&base, n));
                prop_assert_eq!(
                    m.classify(&address, &base),
                    AddressMatch::PaginatedSelf { page_number: n }
                );
                prop_assert_eq!(m.page_number_in_request(&address, &base), Some(n));
            }

            #[test]
            fn canonical_address_never_paginated(base in page_address()) {
                let m = AddressMatcher::default();
                prop_assert_eq!(m.classify(&base, &base), AddressMatch::Canonical);
            }
        }
    }
}

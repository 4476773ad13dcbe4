//! Core data types for the Folio page store.
//!
//! A [`Page`] is a node in the host's page tree. It has a canonical address in
//! two forms (the flat `url` and the hierarchical `path`), a publication
//! status, a `virtual` flag, a set of named typed fields usable for ordering,
//! and named content parts. The pagination core only ever reads pages; the
//! host store owns and mutates them.
//!
//! All types derive `Debug`, `Clone`, `Serialize`, and `Deserialize` for
//! inspection, copying, and JSON serialization.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for a page in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub i64);

impl PageId {
    /// Creates a PageId from a raw database id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PageId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<i64> for PageId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

// ============================================================================
// Status
// ============================================================================

/// Publication status of a page.
///
/// The numeric ids are the ones persisted by the host store. Only
/// [`PageStatus::Published`] pages are pagination candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Draft,
    Reviewed,
    #[default]
    Published,
    Hidden,
}

impl PageStatus {
    /// Persisted status id.
    #[must_use]
    pub const fn id(self) -> i32 {
        match self {
            Self::Draft => 1,
            Self::Reviewed => 50,
            Self::Published => 100,
            Self::Hidden => 101,
        }
    }

    /// Looks up a status by its persisted id.
    #[must_use]
    pub const fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(Self::Draft),
            50 => Some(Self::Reviewed),
            100 => Some(Self::Published),
            101 => Some(Self::Hidden),
            _ => None,
        }
    }

    /// Whether the page is visible to live (public) lookups.
    #[must_use]
    pub const fn is_published(self) -> bool {
        matches!(self, Self::Published)
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Draft => "draft",
            Self::Reviewed => "reviewed",
            Self::Published => "published",
            Self::Hidden => "hidden",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Fields and Parts
// ============================================================================

/// A typed value stored in one of a page's named fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Rank used to order values of different kinds against each other.
    const fn kind_rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Integer(_) => 1,
            Self::Timestamp(_) => 2,
            Self::Text(_) => 3,
        }
    }

    /// Total order over field values.
    ///
    /// Values of the same kind compare naturally; mixed kinds compare by kind.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
        }
    }
}

/// A named content part of a page (body, sidebar, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagePart {
    pub name: String,
    pub content: String,
}

impl PagePart {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Column names every page carries, in addition to its custom fields.
pub const STANDARD_FIELDS: &[&str] = &[
    "id",
    "title",
    "slug",
    "breadcrumb",
    "parent_id",
    "status_id",
    "virtual",
    "published_at",
    "created_at",
    "updated_at",
];

/// Default ordering field for pagination queries.
pub const DEFAULT_ORDER_FIELD: &str = "published_at";

// ============================================================================
// Page
// ============================================================================

/// A page in the host's page tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    /// `None` for the root page.
    pub parent_id: Option<PageId>,
    pub title: String,
    pub slug: String,
    pub breadcrumb: String,
    /// Flat canonical address, always `/`-terminated.
    pub url: String,
    /// Hierarchical canonical address, always `/`-terminated.
    pub path: String,
    pub status: PageStatus,
    /// Virtual pages are never pagination candidates.
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
    #[serde(default)]
    pub parts: Vec<PagePart>,
}

impl Page {
    /// Returns a builder for a page with the given id and canonical url.
    pub fn builder(id: impl Into<PageId>, url: impl Into<String>) -> PageBuilder {
        PageBuilder::new(id.into(), url.into())
    }

    /// Whether this page is the root of the tree.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether the page carries a content part with the given name.
    #[must_use]
    pub fn has_part(&self, name: &str) -> bool {
        self.parts.iter().any(|p| p.name == name)
    }

    /// Looks up a content part by name.
    pub fn part(&self, name: &str) -> Option<&PagePart> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Whether `name` is a field of this page (standard column or custom field).
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        STANDARD_FIELDS.contains(&name) || self.fields.contains_key(name)
    }

    /// All field names known on this page, standard columns first.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        STANDARD_FIELDS
            .iter()
            .copied()
            .chain(self.fields.keys().map(String::as_str))
    }

    /// Reads a field value by name.
    ///
    /// Standard columns are exposed as typed values; `None` means the field is
    /// unknown or null on this page.
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Integer(self.id.get())),
            "title" => Some(FieldValue::Text(self.title.clone())),
            "slug" => Some(FieldValue::Text(self.slug.clone())),
            "breadcrumb" => Some(FieldValue::Text(self.breadcrumb.clone())),
            "parent_id" => self.parent_id.map(|p| FieldValue::Integer(p.get())),
            "status_id" => Some(FieldValue::Integer(i64::from(self.status.id()))),
            "virtual" => Some(FieldValue::Bool(self.is_virtual)),
            "published_at" => self.published_at.map(FieldValue::Timestamp),
            "created_at" => Some(FieldValue::Timestamp(self.created_at)),
            "updated_at" => Some(FieldValue::Timestamp(self.updated_at)),
            other => self.fields.get(other).cloned(),
        }
    }
}

/// Builder for constructing Page instances.
///
/// Status defaults to published, timestamps to now, `path` to the url.
#[derive(Debug)]
pub struct PageBuilder {
    page: Page,
    path: Option<String>,
}

impl PageBuilder {
    fn new(id: PageId, url: String) -> Self {
        let now = Utc::now();
        Self {
            page: Page {
                id,
                parent_id: None,
                title: String::new(),
                slug: String::new(),
                breadcrumb: String::new(),
                url,
                path: String::new(),
                status: PageStatus::Published,
                is_virtual: false,
                published_at: Some(now),
                created_at: now,
                updated_at: now,
                fields: BTreeMap::new(),
                parts: Vec::new(),
            },
            path: None,
        }
    }

    #[must_use]
    pub fn parent(mut self, parent: impl Into<PageId>) -> Self {
        self.page.parent_id = Some(parent.into());
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.page.title = title.into();
        self
    }

    #[must_use]
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.page.slug = slug.into();
        self
    }

    #[must_use]
    pub fn breadcrumb(mut self, breadcrumb: impl Into<String>) -> Self {
        self.page.breadcrumb = breadcrumb.into();
        self
    }

    /// Sets the hierarchical path when it differs from the url.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: PageStatus) -> Self {
        self.page.status = status;
        self
    }

    #[must_use]
    pub fn is_virtual(mut self, is_virtual: bool) -> Self {
        self.page.is_virtual = is_virtual;
        self
    }

    #[must_use]
    pub fn published_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.page.published_at = at;
        self
    }

    #[must_use]
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.page.created_at = at;
        self.page.updated_at = at;
        self
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.page.fields.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn part(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.page.parts.push(PagePart::new(name, content));
        self
    }

    pub fn build(mut self) -> Page {
        self.page.path = self.path.unwrap_or_else(|| self.page.url.clone());
        if self.page.breadcrumb.is_empty() {
            self.page.breadcrumb = self.page.title.clone();
        }
        self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn page_id_display_fromstr() {
        let id = PageId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(" 42 ".parse::<PageId>().unwrap(), id);
        assert!("abc".parse::<PageId>().is_err());
    }

    #[test]
    fn page_id_serializes_transparently() {
        let json = serde_json::to_string(&PageId::new(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn status_ids_roundtrip() {
        for status in [
            PageStatus::Draft,
            PageStatus::Reviewed,
            PageStatus::Published,
            PageStatus::Hidden,
        ] {
            assert_eq!(PageStatus::from_id(status.id()), Some(status));
        }
        assert_eq!(PageStatus::Published.id(), 100);
        assert_eq!(PageStatus::from_id(7), None);
    }

    #[test]
    fn only_published_is_live() {
        assert!(PageStatus::Published.is_published());
        assert!(!PageStatus::Draft.is_published());
        assert!(!PageStatus::Hidden.is_published());
    }

    #[test]
    fn builder_defaults_path_and_breadcrumb() {
        let page = Page::builder(3, "/blog/").title("Blog").slug("blog").build();
        assert_eq!(page.path, "/blog/");
        assert_eq!(page.breadcrumb, "Blog");
        assert_eq!(page.status, PageStatus::Published);
        assert!(page.is_root());
    }

    #[test]
    fn standard_and_custom_fields() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let page = Page::builder(9, "/a/")
            .parent(1)
            .title("A")
            .published_at(Some(at))
            .field("rank", FieldValue::Integer(3))
            .build();

        assert!(page.has_field("published_at"));
        assert!(page.has_field("rank"));
        assert!(!page.has_field("nope"));
        assert_eq!(page.field("published_at"), Some(FieldValue::Timestamp(at)));
        assert_eq!(page.field("parent_id"), Some(FieldValue::Integer(1)));
        assert_eq!(page.field("rank"), Some(FieldValue::Integer(3)));
        assert_eq!(page.field("nope"), None);
        assert!(page.field_names().any(|n| n == "rank"));
    }

    #[test]
    fn parts_lookup() {
        let page = Page::builder(1, "/")
            .part("body", "hello")
            .part("sidebar", "")
            .build();
        assert!(page.has_part("sidebar"));
        assert!(!page.has_part("extended"));
        assert_eq!(page.part("body").map(|p| p.content.as_str()), Some("hello"));
    }

    #[test]
    fn field_value_ordering() {
        let a = FieldValue::Integer(1);
        let b = FieldValue::Integer(2);
        assert_eq!(a.total_cmp(&b), Ordering::Less);
        let t = FieldValue::Text("z".into());
        assert_eq!(b.total_cmp(&t), Ordering::Less);
    }

    #[test]
    fn virtual_flag_serializes_as_virtual() {
        let page = Page::builder(1, "/").is_virtual(true).build();
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["virtual"], serde_json::Value::Bool(true));
        assert_eq!(json["status"], "published");
    }
}

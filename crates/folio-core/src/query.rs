//! Query parameters for a pagination candidate set.
//!
//! A [`QuerySpec`] describes one scoped, filtered, ordered and paged read of
//! the children collection. Store implementations translate it into their own
//! query language; [`QuerySpec::admits`] and [`QuerySpec::compare`] are the
//! reference semantics that every implementation must agree with.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{DEFAULT_ORDER_FIELD, Page, PageId, PageStatus};

/// Page size used when `per_page` is not given.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Status a page must have to be a candidate.
pub const CANDIDATE_STATUS: PageStatus = PageStatus::Published;

/// Sort direction for the ordering field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    /// SQL keyword for this direction.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for OrderDirection {
    type Err = ValidationError;

    /// Accepts `asc` or `desc` in any case, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(ValidationError::InvalidOrderDirection {
                value: s.to_string(),
            })
        }
    }
}

/// Single-field ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSpec {
    pub field: String,
    pub direction: OrderDirection,
}

impl OrderSpec {
    /// Validates `field` against the names `page` knows and parses `direction`.
    pub fn validated(page: &Page, field: &str, direction: &str) -> Result<Self, ValidationError> {
        let field = field.trim();
        if !page.has_field(field) {
            return Err(ValidationError::UnknownOrderField {
                field: field.to_string(),
            });
        }
        Ok(Self {
            field: field.to_string(),
            direction: direction.parse()?,
        })
    }
}

impl Default for OrderSpec {
    fn default() -> Self {
        Self {
            field: DEFAULT_ORDER_FIELD.to_string(),
            direction: OrderDirection::Asc,
        }
    }
}

/// Parameters for the candidate-set query of one pagination block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Candidates must have one of these parents.
    pub parent_ids: BTreeSet<PageId>,
    /// Candidates must not be any of these pages.
    pub excluded_ids: BTreeSet<PageId>,
    pub order: OrderSpec,
    pub per_page: u32,
    /// Requested window; `None` means page 1.
    pub page: Option<u32>,
}

impl QuerySpec {
    /// A query scoped to `parent_ids` with default ordering and page size.
    pub fn scoped(parent_ids: impl IntoIterator<Item = PageId>) -> Self {
        Self {
            parent_ids: parent_ids.into_iter().collect(),
            excluded_ids: BTreeSet::new(),
            order: OrderSpec::default(),
            per_page: DEFAULT_PER_PAGE,
            page: None,
        }
    }

    /// The page number to fetch: the requested one, or 1 when absent or zero.
    #[must_use]
    pub fn effective_page(&self) -> u32 {
        self.page.filter(|&n| n >= 1).unwrap_or(1)
    }

    /// Zero-based offset of the first row of the effective page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.effective_page() - 1) * u64::from(self.per_page)
    }

    /// Whether `page` belongs to the candidate set.
    ///
    /// Parent in scope, not excluded, not virtual, published.
    #[must_use]
    pub fn admits(&self, page: &Page) -> bool {
        page.parent_id.is_some_and(|p| self.parent_ids.contains(&p))
            && !self.excluded_ids.contains(&page.id)
            && !page.is_virtual
            && page.status == CANDIDATE_STATUS
    }

    /// Ordering between two candidates.
    ///
    /// Pages lacking the ordering field sort last in either direction; ties
    /// break on id ascending so the order is total.
    pub fn compare(&self, a: &Page, b: &Page) -> Ordering {
        let by_field = match (a.field(&self.order.field), b.field(&self.order.field)) {
            (Some(x), Some(y)) => {
                let ord = x.total_cmp(&y);
                match self.order.direction {
                    OrderDirection::Asc => ord,
                    OrderDirection::Desc => ord.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_field.then_with(|| a.id.cmp(&b.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldValue;
    use chrono::{Duration, TimeZone, Utc};

    fn child(id: i64, parent: i64) -> Page {
        Page::builder(id, format!("/p{parent}/c{id}/"))
            .parent(parent)
            .title(format!("c{id}"))
            .build()
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("asc".parse::<OrderDirection>().unwrap(), OrderDirection::Asc);
        assert_eq!("DESC".parse::<OrderDirection>().unwrap(), OrderDirection::Desc);
        assert_eq!(" Desc ".parse::<OrderDirection>().unwrap(), OrderDirection::Desc);
        let err = "up".parse::<OrderDirection>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidOrderDirection { .. }));
    }

    #[test]
    fn order_field_must_be_known() {
        let page = Page::builder(1, "/").field("rank", FieldValue::Integer(1)).build();
        assert!(OrderSpec::validated(&page, "title", "asc").is_ok());
        assert!(OrderSpec::validated(&page, " rank ", "desc").is_ok());
        assert_eq!(
            OrderSpec::validated(&page, "bogus", "asc"),
            Err(ValidationError::UnknownOrderField {
                field: "bogus".into()
            })
        );
        assert!(OrderSpec::validated(&page, "title", "sideways").is_err());
    }

    #[test]
    fn default_order_is_published_at_ascending() {
        let order = OrderSpec::default();
        assert_eq!(order.field, "published_at");
        assert_eq!(order.direction, OrderDirection::Asc);
    }

    #[test]
    fn exclusion_scenario() {
        let mut spec = QuerySpec::scoped([5, 6, 7].map(PageId::new));
        spec.excluded_ids.insert(PageId::new(6));

        let pages = vec![
            child(10, 5),
            child(6, 1),
            child(11, 6),
            child(12, 7),
            child(13, 8),
            Page::builder(14, "/v/").parent(5).is_virtual(true).build(),
            Page::builder(15, "/d/").parent(5).status(PageStatus::Draft).build(),
            Page::builder(6, "/six/").parent(5).build(),
        ];

        let admitted: Vec<i64> = pages
            .iter()
            .filter(|p| spec.admits(p))
            .map(|p| p.id.get())
            .collect();
        assert_eq!(admitted, vec![10, 11, 12]);
    }

    #[test]
    fn root_is_never_a_candidate() {
        let spec = QuerySpec::scoped([PageId::new(1)]);
        assert!(!spec.admits(&Page::builder(1, "/").build()));
    }

    #[test]
    fn effective_page_and_offset() {
        let mut spec = QuerySpec::scoped([PageId::new(1)]);
        assert_eq!(spec.effective_page(), 1);
        spec.page = Some(0);
        assert_eq!(spec.effective_page(), 1);
        spec.page = Some(3);
        spec.per_page = 5;
        assert_eq!(spec.offset(), 10);
    }

    #[test]
    fn compare_orders_missing_values_last() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let early = Page::builder(2, "/a/").parent(1).published_at(Some(base)).build();
        let late = Page::builder(3, "/b/")
            .parent(1)
            .published_at(Some(base + Duration::days(1)))
            .build();
        let never = Page::builder(1, "/c/").parent(1).published_at(None).build();

        let mut spec = QuerySpec::scoped([PageId::new(1)]);
        let mut pages = vec![never.clone(), late.clone(), early.clone()];
        pages.sort_by(|a, b| spec.compare(a, b));
        assert_eq!(pages.iter().map(|p| p.id.get()).collect::<Vec<_>>(), vec![2, 3, 1]);

        spec.order.direction = OrderDirection::Desc;
        pages.sort_by(|a, b| spec.compare(a, b));
        assert_eq!(pages.iter().map(|p| p.id.get()).collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[test]
    fn compare_breaks_ties_by_id() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let a = Page::builder(9, "/a/").parent(1).published_at(Some(at)).build();
        let b = Page::builder(4, "/b/").parent(1).published_at(Some(at)).build();
        let spec = QuerySpec::scoped([PageId::new(1)]);
        assert_eq!(spec.compare(&a, &b), Ordering::Greater);
    }
}

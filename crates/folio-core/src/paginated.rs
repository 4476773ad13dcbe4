//! A window of items plus the metadata needed to render page controls.

use serde::{Deserialize, Serialize};

/// One window of a paginated candidate set.
///
/// `current_page` is 1-based and clamped to `[1, total_pages]` when there is
/// at least one page. A request past the last page keeps its number in
/// `requested_page` and carries an empty window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub requested_page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub previous_page: Option<u32>,
    pub next_page: Option<u32>,
}

impl<T> PaginatedResult<T> {
    /// Builds the result for `items` fetched at `requested_page`.
    ///
    /// `requested_page` of zero is read as 1; `per_page` of zero as 1.
    pub fn new(items: Vec<T>, requested_page: u32, per_page: u32, total_items: u64) -> Self {
        let requested_page = requested_page.max(1);
        let per_page = per_page.max(1);
        let total_pages = u32::try_from(total_items.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX);
        let current_page = requested_page.min(total_pages.max(1));

        let previous_page = (current_page > 1).then(|| current_page - 1);
        let next_page = (current_page < total_pages).then(|| current_page + 1);

        let items = if requested_page > total_pages.max(1) {
            Vec::new()
        } else {
            items
        };

        Self {
            items,
            current_page,
            requested_page,
            per_page,
            total_pages,
            total_items,
            previous_page,
            next_page,
        }
    }

    /// An empty result with no pages.
    pub fn empty(per_page: u32) -> Self {
        Self::new(Vec::new(), 1, per_page, 0)
    }

    /// Whether the requested page lies beyond the last page.
    ///
    /// Page 1 of an empty set is in range.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        self.requested_page > self.total_pages.max(1)
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.previous_page.is_none()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.next_page.is_none()
    }

    /// 1-based position of the first item of this window in the full set.
    #[must_use]
    pub fn first_item_position(&self) -> u64 {
        u64::from(self.current_page - 1) * u64::from(self.per_page) + 1
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Replaces the items, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            requested_page: self.requested_page,
            per_page: self.per_page,
            total_pages: self.total_pages,
            total_items: self.total_items,
            previous_page: self.previous_page,
            next_page: self.next_page,
        }
    }
}

impl<'a, T> IntoIterator for &'a PaginatedResult<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

//! The locals a pagination block passes down to its nested tags.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use folio_core::{Page, PageId, PaginatedResult};

/// Attributes of one tag invocation.
pub type TagAttrs = BTreeMap<String, String>;

/// Evaluation context of a tag.
///
/// Each nested call receives its own derived copy, so sibling and nested
/// blocks never observe each other's state.
#[derive(Debug, Clone)]
pub struct TagContext {
    /// The contextual page. Inside `paginate:each` this is the current item.
    pub page: Page,
    /// Address of the request being rendered.
    pub request_path: String,
    /// Parent scope preset by an enclosing block.
    pub parent_ids: Option<BTreeSet<PageId>>,
    /// The window resolved by the nearest enclosing `paginate`.
    pub paginated: Option<Arc<PaginatedResult<Page>>>,
    /// Current item of `paginate:each`.
    pub child: Option<Page>,
    /// Zero-based position of `child` in the window.
    pub index: Option<usize>,
}

impl TagContext {
    pub fn new(page: Page, request_path: impl Into<String>) -> Self {
        Self {
            page,
            request_path: request_path.into(),
            parent_ids: None,
            paginated: None,
            child: None,
            index: None,
        }
    }

    /// Presets the parent scope for blocks evaluated in this context.
    pub fn with_parent_ids(mut self, ids: impl IntoIterator<Item = PageId>) -> Self {
        self.parent_ids = Some(ids.into_iter().collect());
        self
    }

    pub(crate) fn with_paginated(&self, result: PaginatedResult<Page>) -> Self {
        Self {
            paginated: Some(Arc::new(result)),
            child: None,
            index: None,
            ..self.clone()
        }
    }

    pub(crate) fn with_item(&self, item: &Page, index: usize) -> Self {
        Self {
            page: item.clone(),
            child: Some(item.clone()),
            index: Some(index),
            ..self.clone()
        }
    }

    /// Whether this is the first item of a `paginate:each` loop.
    pub fn is_first(&self) -> Option<bool> {
        self.index.map(|i| i == 0)
    }
}

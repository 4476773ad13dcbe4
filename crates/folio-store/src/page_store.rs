//! The page store interface.
//!
//! The store owns the page tree. Pagination only reads from it: two
//! address lookups, id lookups for scoping and exclusions, and one windowed
//! query per pagination block.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use folio_core::{Page, PageId, QuerySpec};
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

/// Flags accepted by both address lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupOptions {
    /// Only published pages are found.
    pub live: bool,
    /// The address is normalized before matching.
    pub clean: bool,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            live: true,
            clean: true,
        }
    }
}

impl LookupOptions {
    /// Finds pages of any status.
    pub fn any_status() -> Self {
        Self {
            live: false,
            ..Self::default()
        }
    }
}

/// One window of the candidate set plus the size of the whole set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageWindow {
    pub pages: Vec<Page>,
    pub total: u64,
}

/// Read access to a page tree.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Finds the page whose flat url is `url`.
    async fn find_by_url(&self, url: &str, options: LookupOptions) -> StoreResult<Option<Page>>;

    /// Finds the page whose hierarchical path is `path`.
    async fn find_by_path(&self, path: &str, options: LookupOptions) -> StoreResult<Option<Page>>;

    async fn get_page(&self, id: PageId) -> StoreResult<Option<Page>>;

    /// Ids of the direct children of `parent`, any status.
    async fn child_ids(&self, parent: PageId) -> StoreResult<Vec<PageId>>;

    /// Ids of pages under `parent_ids` carrying a part named in `names`.
    async fn ids_with_parts(
        &self,
        parent_ids: &BTreeSet<PageId>,
        names: &[String],
    ) -> StoreResult<BTreeSet<PageId>>;

    /// Runs the scoped, filtered, ordered and paged candidate query.
    async fn fetch_window(&self, spec: &QuerySpec) -> StoreResult<PageWindow>;
}

#[async_trait]
impl<S: PageStore + ?Sized> PageStore for Arc<S> {
    async fn find_by_url(&self, url: &str, options: LookupOptions) -> StoreResult<Option<Page>> {
        (**self).find_by_url(url, options).await
    }

    async fn find_by_path(&self, path: &str, options: LookupOptions) -> StoreResult<Option<Page>> {
        (**self).find_by_path(path, options).await
    }

    async fn get_page(&self, id: PageId) -> StoreResult<Option<Page>> {
        (**self).get_page(id).await
    }

    async fn child_ids(&self, parent: PageId) -> StoreResult<Vec<PageId>> {
        (**self).child_ids(parent).await
    }

    async fn ids_with_parts(
        &self,
        parent_ids: &BTreeSet<PageId>,
        names: &[String],
    ) -> StoreResult<BTreeSet<PageId>> {
        (**self).ids_with_parts(parent_ids, names).await
    }

    async fn fetch_window(&self, spec: &QuerySpec) -> StoreResult<PageWindow> {
        (**self).fetch_window(spec).await
    }
}

//! In-memory page store.
//!
//! Evaluates [`QuerySpec::admits`] and [`QuerySpec::compare`] directly, so
//! its windows are the reference the PostgreSQL store is checked against.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use folio_core::{Page, PageId, QuerySpec, clean_address};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::page_store::{LookupOptions, PageStore, PageWindow};

/// A page tree held in memory.
#[derive(Debug, Default)]
pub struct MemoryPageStore {
    pages: RwLock<BTreeMap<PageId, Page>>,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `pages` as given.
    pub fn from_pages(pages: impl IntoIterator<Item = Page>) -> Self {
        Self {
            pages: RwLock::new(pages.into_iter().map(|p| (p.id, p)).collect()),
        }
    }

    /// Loads a JSON array of pages.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let pages: Vec<Page> = serde_json::from_str(json)?;
        Ok(Self::from_pages(pages))
    }

    /// Stores `page`, replacing any page with the same id.
    pub async fn insert(&self, page: Page) -> Option<Page> {
        self.pages.write().await.insert(page.id, page)
    }

    /// Stores `page` under `parent`, deriving its url and path from the
    /// parent's and its own slug.
    pub async fn insert_child(&self, parent: PageId, mut page: Page) -> StoreResult<Page> {
        let mut pages = self.pages.write().await;
        let parent_page = pages.get(&parent).ok_or(StoreError::PageNotFound(parent))?;
        page.parent_id = Some(parent);
        page.url = clean_address(&format!("{}{}", parent_page.url, page.slug));
        page.path = clean_address(&format!("{}{}", parent_page.path, page.slug));
        pages.insert(page.id, page.clone());
        Ok(page)
    }

    pub async fn len(&self) -> usize {
        self.pages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pages.read().await.is_empty()
    }

    async fn find_by(
        &self,
        address: &str,
        options: LookupOptions,
        key: impl Fn(&Page) -> &str,
    ) -> Option<Page> {
        let address = if options.clean {
            clean_address(address)
        } else {
            address.to_string()
        };
        self.pages
            .read()
            .await
            .values()
            .find(|p| key(p) == address && (!options.live || p.status.is_published()))
            .cloned()
    }
}

#[async_trait]
impl PageStore for MemoryPageStore {
    async fn find_by_url(&self, url: &str, options: LookupOptions) -> StoreResult<Option<Page>> {
        Ok(self.find_by(url, options, |p| p.url.as_str()).await)
    }

    async fn find_by_path(&self, path: &str, options: LookupOptions) -> StoreResult<Option<Page>> {
        Ok(self.find_by(path, options, |p| p.path.as_str()).await)
    }

    async fn get_page(&self, id: PageId) -> StoreResult<Option<Page>> {
        Ok(self.pages.read().await.get(&id).cloned())
    }

    async fn child_ids(&self, parent: PageId) -> StoreResult<Vec<PageId>> {
        Ok(self
            .pages
            .read()
            .await
            .values()
            .filter(|p| p.parent_id == Some(parent))
            .map(|p| p.id)
            .collect())
    }

    async fn ids_with_parts(
        &self,
        parent_ids: &BTreeSet<PageId>,
        names: &[String],
    ) -> StoreResult<BTreeSet<PageId>> {
        Ok(self
            .pages
            .read()
            .await
            .values()
            .filter(|p| p.parent_id.is_some_and(|id| parent_ids.contains(&id)))
            .filter(|p| names.iter().any(|name| p.has_part(name)))
            .map(|p| p.id)
            .collect())
    }

    async fn fetch_window(&self, spec: &QuerySpec) -> StoreResult<PageWindow> {
        let pages = self.pages.read().await;
        let mut candidates: Vec<&Page> = pages.values().filter(|p| spec.admits(p)).collect();
        candidates.sort_by(|a, b| spec.compare(a, b));

        let total = candidates.len() as u64;
        let offset = usize::try_from(spec.offset()).unwrap_or(usize::MAX);
        let window = candidates
            .into_iter()
            .skip(offset)
            .take(spec.per_page.max(1) as usize)
            .cloned()
            .collect();

        Ok(PageWindow {
            pages: window,
            total,
        })
    }
}

//! Executing a candidate query into a paginated result.

use folio_core::{Page, PaginatedResult, QuerySpec};

use crate::error::StoreResult;
use crate::page_store::PageStore;

/// Runs [`QuerySpec`]s against a store.
///
/// One query per call; store errors propagate unchanged and are never retried.
pub struct PaginatedResultResolver<'s, S: ?Sized> {
    store: &'s S,
}

impl<'s, S: PageStore + ?Sized> PaginatedResultResolver<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Fetches the window `spec` asks for. A missing or zero page number
    /// reads as 1; a page past the end gives an empty window.
    pub async fn resolve(&self, spec: &QuerySpec) -> StoreResult<PaginatedResult<Page>> {
        let window = self.store.fetch_window(spec).await?;
        let result = PaginatedResult::new(window.pages, spec.effective_page(), spec.per_page, window.total);

        tracing::debug!(
            current_page = result.current_page,
            total_pages = result.total_pages,
            total_items = result.total_items,
            out_of_range = result.is_out_of_range(),
            "Resolved paginated window"
        );

        Ok(result)
    }
}

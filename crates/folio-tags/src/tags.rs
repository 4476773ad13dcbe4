//! The pagination tags.
//!
//! A template engine calls [`PaginateTags::paginate`] for the block tag and
//! evaluates the block body with the context it returns. Nested tags read
//! the window from that context:
//!
//! ```text
//! paginate            resolves the window
//! ├── paginate:each   one expansion per page in the window
//! │   ├── if_first
//! │   └── unless_first
//! └── paginate:pages  pagination controls
//! ```

use folio_core::{
    AddressMatcher, LinkRenderOptions, Page, PaginatedResult, PaginationLinkRenderer, RouteSegment,
};
use folio_store::{PageSetQueryBuilder, PageStore, PaginatedResultResolver, QueryAttrs, QueryContext};

use crate::context::{TagAttrs, TagContext};
use crate::error::{TagError, TagResult};

/// Pagination tags bound to a page store and route segment.
#[derive(Debug, Clone)]
pub struct PaginateTags<S> {
    store: S,
    matcher: AddressMatcher,
}

impl<S: PageStore> PaginateTags<S> {
    /// `store` should be the paginating resolver so `url` attributes may use
    /// synthetic addresses.
    pub fn new(store: S, segment: RouteSegment) -> Self {
        Self {
            store,
            matcher: AddressMatcher::new(segment),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn segment(&self) -> &RouteSegment {
        self.matcher.segment()
    }

    /// `paginate`: resolves the window for `ctx` and returns the context the
    /// block body is evaluated in.
    pub async fn paginate(&self, ctx: &TagContext, attrs: &TagAttrs) -> TagResult<TagContext> {
        let query_ctx = QueryContext {
            page: &ctx.page,
            request_path: &ctx.request_path,
            parent_ids: ctx.parent_ids.as_ref(),
        };
        let spec = PageSetQueryBuilder::with_matcher(&self.store, self.matcher.clone())
            .build(&query_ctx, &QueryAttrs::from_map(attrs))
            .await?;
        let result = PaginatedResultResolver::new(&self.store).resolve(&spec).await?;

        tracing::debug!(
            page_id = %ctx.page.id,
            request_path = %ctx.request_path,
            current_page = result.current_page,
            total_pages = result.total_pages,
            "Paginated block"
        );

        Ok(ctx.with_paginated(result))
    }

    /// `paginate:pages`: renders the controls for the enclosing window.
    ///
    /// Links hang off the contextual page's url.
    pub fn pages(&self, ctx: &TagContext, attrs: &TagAttrs) -> TagResult<String> {
        let result = window(ctx, "paginate:pages")?;
        let options = LinkRenderOptions::from_attrs(attrs)?;
        let renderer = PaginationLinkRenderer::new(ctx.page.url.clone(), self.segment().clone(), options);
        Ok(renderer.render(result))
    }
}

/// `paginate:each`: expands `body` once per page of the window.
pub fn each<F>(ctx: &TagContext, mut body: F) -> TagResult<String>
where
    F: FnMut(&TagContext) -> TagResult<String>,
{
    let result = window(ctx, "paginate:each")?;
    let mut out = String::new();
    for (index, item) in result.iter().enumerate() {
        out.push_str(&body(&ctx.with_item(item, index))?);
    }
    Ok(out)
}

/// `paginate:each:if_first`: expands only for the first item.
pub fn if_first<F>(ctx: &TagContext, body: F) -> TagResult<String>
where
    F: FnOnce(&TagContext) -> TagResult<String>,
{
    match ctx.is_first() {
        Some(true) => body(ctx),
        Some(false) => Ok(String::new()),
        None => Err(misplaced_in_each("paginate:each:if_first")),
    }
}

/// `paginate:each:unless_first`: expands for every item but the first.
pub fn unless_first<F>(ctx: &TagContext, body: F) -> TagResult<String>
where
    F: FnOnce(&TagContext) -> TagResult<String>,
{
    match ctx.is_first() {
        Some(false) => body(ctx),
        Some(true) => Ok(String::new()),
        None => Err(misplaced_in_each("paginate:each:unless_first")),
    }
}

fn window<'a>(ctx: &'a TagContext, tag: &'static str) -> TagResult<&'a PaginatedResult<Page>> {
    ctx.paginated.as_deref().ok_or(TagError::Misplaced {
        tag,
        ancestor: "paginate",
    })
}

fn misplaced_in_each(tag: &'static str) -> TagError {
    TagError::Misplaced {
        tag,
        ancestor: "paginate:each",
    }
}

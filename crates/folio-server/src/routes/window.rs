//! Paginated window endpoint.
//!
//! Resolves a path through the paginating resolver, runs the `paginate`
//! block with the query's attributes and returns the window as JSON,
//! together with the rendered controls.
//!
//! Endpoint: GET /api/window?path={address}[&per_page&by&order&excludes&level&url&page]

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use folio_core::{AddressMatch, Page, PageId};
use folio_store::LookupOptions;
use folio_tags::{TagAttrs, TagContext};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for the window endpoint.
///
/// Everything but `path` is passed to the `paginate` block as an attribute.
#[derive(Debug, Default, Deserialize)]
pub struct WindowParams {
    /// Address being rendered; synthetic paginated addresses are accepted.
    pub path: String,
    #[serde(default)]
    pub per_page: Option<String>,
    #[serde(default)]
    pub by: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub excludes: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
}

impl WindowParams {
    /// The block attributes present in the query.
    pub fn attrs(&self) -> TagAttrs {
        [
            ("per_page", &self.per_page),
            ("by", &self.by),
            ("order", &self.order),
            ("excludes", &self.excludes),
            ("level", &self.level),
            ("url", &self.url),
            ("page", &self.page),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.clone().map(|v| (name.to_string(), v)))
        .collect()
    }
}

/// Short form of a page in responses.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PageSummary {
    pub id: PageId,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl From<&Page> for PageSummary {
    fn from(page: &Page) -> Self {
        Self {
            id: page.id,
            title: page.title.clone(),
            url: page.url.clone(),
            published_at: page.published_at,
        }
    }
}

/// Response for the window endpoint.
#[derive(Debug, Serialize)]
pub struct WindowResponse {
    /// The page owning the address.
    pub page: PageSummary,
    /// How the address related to the page.
    pub address_match: AddressMatch,
    pub current_page: u32,
    pub requested_page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub previous_page: Option<u32>,
    pub next_page: Option<u32>,
    /// Pages in the window, in order.
    pub items: Vec<PageSummary>,
    /// Pagination controls with default options.
    pub pagination_html: String,
}

// ============================================================================
// Handler
// ============================================================================

/// GET /api/window - Paginated window of a page's children.
async fn get_window(
    State(state): State<AppState>,
    Query(params): Query<WindowParams>,
) -> ApiResult<Json<WindowResponse>> {
    let resolution = state
        .resolver()
        .resolve_path(&params.path, LookupOptions::default())
        .await?;
    let page = resolution
        .page
        .ok_or_else(|| ApiError::NotFound(format!("no page at {}", params.path)))?;

    let ctx = TagContext::new(page, params.path.clone());
    let block = state.tags().paginate(&ctx, &params.attrs()).await?;
    let pagination_html = state.tags().pages(&block, &TagAttrs::new())?;
    let result = block
        .paginated
        .as_deref()
        .ok_or_else(|| ApiError::Internal("paginate returned no window".to_string()))?;

    Ok(Json(WindowResponse {
        page: PageSummary::from(&ctx.page),
        address_match: resolution.matched,
        current_page: result.current_page,
        requested_page: result.requested_page,
        per_page: result.per_page,
        total_pages: result.total_pages,
        total_items: result.total_items,
        previous_page: result.previous_page,
        next_page: result.next_page,
        items: result.iter().map(PageSummary::from).collect(),
        pagination_html,
    }))
}

/// Build window routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/window", get(get_window))
}

//! HTML view of a page and a window of its children.
//!
//! Any address not claimed by another route lands here. Synthetic
//! addresses such as `/blog/page/3/` resolve to their owning page, whose
//! children are listed with the window that address asks for.

use axum::{
    Router,
    extract::State,
    http::Uri,
    response::Html,
    routing::get,
};

use folio_core::escape_attr;
use folio_store::LookupOptions;
use folio_tags::{TagAttrs, TagContext, each, if_first};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /{*address} - Render a page with the requested window of children.
async fn show_page(State(state): State<AppState>, uri: Uri) -> ApiResult<Html<String>> {
    let path = uri.path();
    let resolution = state
        .resolver()
        .resolve_path(path, LookupOptions::default())
        .await?;
    let page = resolution
        .page
        .ok_or_else(|| ApiError::NotFound(format!("no page at {path}")))?;

    let mut attrs = TagAttrs::new();
    attrs.insert("per_page".to_string(), state.config().per_page.to_string());

    let ctx = TagContext::new(page, path);
    let block = state.tags().paginate(&ctx, &attrs).await?;

    let list = each(&block, |item| {
        let opening = if_first(item, |_| Ok("<ul>\n".to_string()))?;
        Ok(format!(
            "{opening}<li><a href=\"{}\">{}</a></li>\n",
            escape_attr(&item.page.url),
            escape_attr(&item.page.title)
        ))
    })?;
    let list = if list.is_empty() {
        "<p>Nothing here.</p>\n".to_string()
    } else {
        format!("{list}</ul>\n")
    };
    let controls = state.tags().pages(&block, &TagAttrs::new())?;

    let title = escape_attr(&ctx.page.title);
    Ok(Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{title}</title></head>\n<body>\n<h1>{title}</h1>\n{list}<nav class=\"pagination\">{controls}</nav>\n</body>\n</html>\n"
    )))
}

/// Build page view routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(show_page))
        .route("/{*address}", get(show_page))
}

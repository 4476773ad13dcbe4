//! Route definitions for the HTTP server.

pub mod health;
pub mod pages;
pub mod window;

use axum::Router;

use crate::state::AppState;

/// Build the complete router with all routes.
///
/// The page view is a catch-all, so it is merged last.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(window::routes())
        .merge(pages::routes())
        .with_state(state)
}

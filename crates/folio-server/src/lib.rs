//! folio-server: HTTP front end for paginated page trees
//!
//! This crate provides:
//! - An HTML page view that lists a window of a page's children and follows
//!   synthetic addresses such as `/blog/page/3/`
//! - `GET /api/window`, the same window as JSON for any pagination attributes
//! - `GET /health`
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for:
//! - Request tracing and logging
//! - CORS handling
//! - Request ID generation
//! - JSON error responses
//!
//! Pages are read from PostgreSQL or, for local work, from a JSON seed file
//! held in memory.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use folio_server::{AppState, ServerConfig, build_app};
//! use folio_store::MemoryPageStore;
//!
//! let config = ServerConfig::from_env()?;
//! let state = AppState::new(Arc::new(MemoryPageStore::new()), config);
//! axum::serve(listener, build_app(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

#[cfg(test)]
mod test_support;

use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id::{make_request_span, propagate_request_id_layer, set_request_id_layer};

// Re-exports for convenience
pub use config::{ConfigError, PageSource, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// Re-export dependent crates
pub use folio_core;
pub use folio_store;
pub use folio_tags;

/// The router with its middleware stack.
///
/// The request id is assigned outermost so the trace span can record it.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config().cors_allowed_origins);

    routes::build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(propagate_request_id_layer())
        .layer(set_request_id_layer())
}

/// Build CORS layer from configuration.
///
/// Origins that are not valid header values are skipped.
pub fn build_cors_layer(allowed_origins: &str) -> CorsLayer {
    if allowed_origins.trim() == "*" {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<_> = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

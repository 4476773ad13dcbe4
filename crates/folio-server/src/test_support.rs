//! Shared fixtures for handler tests.

use std::sync::Arc;

use axum::Router;
use chrono::{Duration, TimeZone, Utc};
use folio_core::Page;
use folio_store::MemoryPageStore;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Number of posts under `/blog/`.
pub const POSTS: u64 = 12;

/// `/` with `/blog/` holding `Post 1..=POSTS`, a day apart, plus a draft.
pub fn pages() -> Vec<Page> {
    let base = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    let mut pages = vec![
        Page::builder(1, "/").title("Home").build(),
        Page::builder(2, "/blog/").parent(1).title("Blog").build(),
    ];
    for n in 1..=POSTS as i64 {
        pages.push(
            Page::builder(100 + n, format!("/blog/post-{n}/"))
                .parent(2)
                .title(format!("Post {n}"))
                .published_at(Some(base + Duration::days(n)))
                .build(),
        );
    }
    pages.push(
        Page::builder(300, "/blog/draft/")
            .parent(2)
            .title("Draft")
            .status(folio_core::PageStatus::Draft)
            .build(),
    );
    pages
}

/// The full application over an in-memory store, five items per page view.
pub fn app() -> Router {
    let config = ServerConfig::from_lookup(|key| match key {
        "FOLIO_SEED_FILE" => Some("pages.json".to_string()),
        "PAGINATION_PER_PAGE" => Some("5".to_string()),
        _ => None,
    })
    .unwrap();
    let store = MemoryPageStore::from_pages(pages());
    crate::build_app(AppState::new(Arc::new(store), config))
}

//! Application state shared across handlers.

use std::sync::Arc;

use folio_store::{PageStore, PaginatingResolver};
use folio_tags::PaginateTags;

use crate::config::ServerConfig;

/// The page store behind the resolver.
pub type SharedStore = Arc<dyn PageStore>;

/// The store every handler reads through.
pub type Resolver = PaginatingResolver<SharedStore>;

/// Application state shared across all handlers.
///
/// This is cloneable and can be extracted in handlers using `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Pagination tags over the paginating resolver.
    tags: Arc<PaginateTags<Resolver>>,
    /// Server configuration.
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Create new application state.
    ///
    /// The configured route segment is shared by the resolver and the tags.
    pub fn new(store: SharedStore, config: ServerConfig) -> Self {
        let segment = config.route_segment.clone();
        let resolver = PaginatingResolver::new(store, segment.clone());
        Self {
            tags: Arc::new(PaginateTags::new(resolver, segment)),
            config: Arc::new(config),
        }
    }

    /// Get a reference to the paginating resolver.
    pub fn resolver(&self) -> &Resolver {
        self.tags.store()
    }

    /// Get a reference to the pagination tags.
    pub fn tags(&self) -> &PaginateTags<Resolver> {
        &self.tags
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

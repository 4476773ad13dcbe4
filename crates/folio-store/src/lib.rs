//! folio-store: Page storage and paginated lookups for Folio
//!
//! This crate provides:
//! - The [`PageStore`] interface over a page tree
//! - PostgreSQL storage ([`PgPageStore`]) and an in-memory store ([`MemoryPageStore`])
//! - [`PaginatingResolver`], a store decorator that resolves synthetic
//!   paginated addresses to the page owning them
//! - [`PageSetQueryBuilder`] and [`PaginatedResultResolver`], which turn
//!   pagination block attributes into a window of child pages
//!
//! # Usage
//!
//! ```rust,ignore
//! use folio_store::{LookupOptions, PaginatingResolver, PgPageStore, StoreConfig};
//! use folio_core::RouteSegment;
//!
//! let config = StoreConfig::from_env()?;
//! let store = PgPageStore::connect(config).await?;
//! let resolver = PaginatingResolver::new(store, RouteSegment::default());
//!
//! // "/blog/page/2/" resolves to the page at "/blog/"
//! let resolution = resolver.resolve_url("/blog/page/2/", LookupOptions::default()).await?;
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod page_store;
pub mod paginated;
pub mod query;
pub mod resolver;
pub mod schema;
pub mod store;

#[cfg(test)]
mod fixtures;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryPageStore;
pub use page_store::{LookupOptions, PageStore, PageWindow};
pub use paginated::PaginatedResultResolver;
pub use query::{PageSetQueryBuilder, QueryAttrs, QueryContext};
pub use resolver::{PaginatingResolver, Resolution};
pub use store::{PgPageStore, StoreConfig};

// Re-export folio-core for downstream crates
pub use folio_core;

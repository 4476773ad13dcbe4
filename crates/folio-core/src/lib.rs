//! folio-core: page model and pagination primitives for the Folio page store
//!
//! This crate provides:
//! - The page data model read by every other crate ([`Page`], [`PageId`], [`FieldValue`])
//! - Address classification for synthetic paginated addresses ([`AddressMatcher`])
//! - Candidate-set query parameters and their reference semantics ([`QuerySpec`])
//! - Paginated windows with clamped page metadata ([`PaginatedResult`])
//! - Windowed pagination controls ([`PaginationLinkRenderer`])
//!
//! Nothing here performs I/O. The route segment is passed in explicitly so
//! several segments can coexist in one process.
//!
//! # Usage
//!
//! ```rust
//! use folio_core::{AddressMatch, AddressMatcher, LinkRenderOptions, PaginatedResult,
//!                  PaginationLinkRenderer, RouteSegment};
//!
//! let matcher = AddressMatcher::new(RouteSegment::default());
//! assert_eq!(
//!     matcher.classify("/blog/page/2/", "/blog/"),
//!     AddressMatch::PaginatedSelf { page_number: 2 }
//! );
//!
//! let result: PaginatedResult<()> = PaginatedResult::new(Vec::new(), 2, 10, 30);
//! let renderer = PaginationLinkRenderer::new("/blog/", RouteSegment::default(),
//!                                            LinkRenderOptions::default());
//! assert!(renderer.render(&result).contains(r#"<span class="current">2</span>"#));
//! ```

pub mod address;
pub mod error;
pub mod links;
pub mod paginated;
pub mod query;
pub mod route;
pub mod types;

pub use address::{AddressForm, AddressMatch, AddressMatcher, ArchiveDate, base_prefixes};
pub use error::{ValidationError, ValidationResult};
pub use links::{
    LinkElement, LinkRenderOptions, PaginationLinkRenderer, WindowEntry, escape_attr, to_markup,
    windowed_page_numbers,
};
pub use paginated::PaginatedResult;
pub use query::{CANDIDATE_STATUS, DEFAULT_PER_PAGE, OrderDirection, OrderSpec, QuerySpec};
pub use route::{DEFAULT_ROUTE_SEGMENT, RouteSegment, clean_address};
pub use types::{
    DEFAULT_ORDER_FIELD, FieldValue, Page, PageBuilder, PageId, PagePart, PageStatus,
    STANDARD_FIELDS,
};

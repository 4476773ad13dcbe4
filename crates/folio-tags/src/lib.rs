//! folio-tags: pagination tags for rendering Folio pages
//!
//! A template engine maps its tag invocations onto these functions:
//!
//! | Tag | Function |
//! |---|---|
//! | `paginate` | [`PaginateTags::paginate`] |
//! | `paginate:each` | [`each`] |
//! | `paginate:each:if_first` | [`if_first`] |
//! | `paginate:each:unless_first` | [`unless_first`] |
//! | `paginate:pages` | [`PaginateTags::pages`] |
//!
//! Tag locals are an explicit [`TagContext`] value. Each nested call gets a
//! derived copy instead of mutating shared state.

pub mod context;
pub mod docs;
pub mod error;
pub mod tags;

pub use context::{TagAttrs, TagContext};
pub use docs::{TAGS, TagDoc, describe};
pub use error::{TagError, TagResult};
pub use tags::{PaginateTags, each, if_first, unless_first};

//! Database models for the storage layer.
//!
//! These types map directly to rows of `pages`, `page_parts` and
//! `page_fields`. They are turned into [`Page`] values once a page's parts
//! and fields have been loaded alongside it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use folio_core::{FieldValue, Page, PageId, PagePart, PageStatus};
use sqlx::FromRow;
use sqlx::types::Json;

use crate::error::{StoreError, StoreResult};

/// Columns selected for every page query.
pub const PAGE_COLUMNS: &str = "p.id, p.parent_id, p.title, p.slug, p.breadcrumb, p.url, p.path, \
     p.status_id, p.virtual, p.published_at, p.created_at, p.updated_at";

/// Database row for the `pages` table.
#[derive(Debug, Clone, FromRow)]
pub struct PageRow {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub title: String,
    pub slug: String,
    pub breadcrumb: String,
    pub url: String,
    pub path: String,
    pub status_id: i32,
    #[sqlx(rename = "virtual")]
    pub is_virtual: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A page row from the window query, with the size of the whole set.
#[derive(Debug, Clone, FromRow)]
pub struct WindowRow {
    #[sqlx(flatten)]
    pub page: PageRow,
    pub total: i64,
}

/// Database row for the `page_parts` table.
#[derive(Debug, Clone, FromRow)]
pub struct PagePartRow {
    pub page_id: i64,
    pub name: String,
    pub content: String,
}

/// Database row for the `page_fields` table.
#[derive(Debug, Clone, FromRow)]
pub struct FieldRow {
    pub page_id: i64,
    pub name: String,
    pub value: Json<FieldValue>,
}

impl PageRow {
    /// Builds the domain page from this row and its loaded parts and fields.
    pub fn into_page(self, parts: Vec<PagePart>, fields: BTreeMap<String, FieldValue>) -> StoreResult<Page> {
        let id = PageId::new(self.id);
        let status = PageStatus::from_id(self.status_id).ok_or_else(|| StoreError::InvalidRow {
            page_id: id,
            reason: format!("unknown status_id {}", self.status_id),
        })?;

        Ok(Page {
            id,
            parent_id: self.parent_id.map(PageId::new),
            title: self.title,
            slug: self.slug,
            breadcrumb: self.breadcrumb,
            url: self.url,
            path: self.path,
            status,
            is_virtual: self.is_virtual,
            published_at: self.published_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
            fields,
            parts,
        })
    }
}

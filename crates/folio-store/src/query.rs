//! Building the candidate query for a pagination block.
//!
//! [`PageSetQueryBuilder`] turns the string attributes of a pagination block
//! into a [`QuerySpec`]. Attribute validation happens first and never touches
//! the store; only a valid request goes on to resolve its parent scope and
//! exclusions.

use std::collections::{BTreeMap, BTreeSet};

use folio_core::{
    AddressMatcher, DEFAULT_ORDER_FIELD, DEFAULT_PER_PAGE, OrderSpec, Page, PageId, QuerySpec,
    RouteSegment, ValidationError, ValidationResult,
};
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;
use crate::page_store::{LookupOptions, PageStore};

/// Attributes recognized on a pagination block. Values are kept raw.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryAttrs {
    /// `2` scopes to the grandchildren of the resolved page.
    pub level: Option<String>,
    /// Address of the page to paginate instead of the contextual one.
    pub url: Option<String>,
    /// Comma-separated part names; pages carrying any of them are excluded.
    pub excludes: Option<String>,
    pub by: Option<String>,
    pub order: Option<String>,
    pub per_page: Option<String>,
    /// Explicit page number, taking precedence over the request address.
    pub page: Option<String>,
}

impl QueryAttrs {
    /// Picks the recognized attributes out of a tag's attribute map.
    pub fn from_map(attrs: &BTreeMap<String, String>) -> Self {
        let get = |name: &str| attrs.get(name).cloned();
        Self {
            level: get("level"),
            url: get("url"),
            excludes: get("excludes"),
            by: get("by"),
            order: get("order"),
            per_page: get("per_page"),
            page: get("page"),
        }
    }

    /// Part names listed in `excludes`, trimmed, blanks dropped.
    pub fn exclude_names(&self) -> Vec<String> {
        self.excludes
            .as_deref()
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// What the builder knows about where the block is being evaluated.
#[derive(Debug, Clone, Copy)]
pub struct QueryContext<'a> {
    /// The contextual page. Its fields validate `by`.
    pub page: &'a Page,
    /// Address of the current request.
    pub request_path: &'a str,
    /// Parent scope preset by an enclosing block.
    pub parent_ids: Option<&'a BTreeSet<PageId>>,
}

impl<'a> QueryContext<'a> {
    pub fn new(page: &'a Page, request_path: &'a str) -> Self {
        Self {
            page,
            request_path,
            parent_ids: None,
        }
    }
}

/// Derives [`QuerySpec`]s from block attributes.
pub struct PageSetQueryBuilder<'s, S: ?Sized> {
    store: &'s S,
    matcher: AddressMatcher,
}

impl<'s, S: PageStore + ?Sized> PageSetQueryBuilder<'s, S> {
    /// `store` should be the paginating resolver so that a `url` attribute
    /// naming a synthetic address still finds its page.
    pub fn new(store: &'s S, segment: RouteSegment) -> Self {
        Self::with_matcher(store, AddressMatcher::new(segment))
    }

    /// Reuses an already built matcher.
    pub fn with_matcher(store: &'s S, matcher: AddressMatcher) -> Self {
        Self { store, matcher }
    }

    pub async fn build(&self, ctx: &QueryContext<'_>, attrs: &QueryAttrs) -> StoreResult<QuerySpec> {
        let order = OrderSpec::validated(
            ctx.page,
            attrs.by.as_deref().unwrap_or(DEFAULT_ORDER_FIELD),
            attrs.order.as_deref().unwrap_or("asc"),
        )?;
        let per_page = parse_per_page(attrs.per_page.as_deref())?;
        let page = match attrs.page.as_deref().filter(|v| !v.trim().is_empty()) {
            Some(value) => Some(parse_page_attr(value)?),
            None => self
                .matcher
                .page_number_in_request(ctx.request_path, &ctx.page.url),
        };

        let parent_ids = match ctx.parent_ids {
            Some(preset) => preset.clone(),
            None => self.parent_scope(ctx.page, attrs).await?,
        };

        let names = attrs.exclude_names();
        let excluded_ids = if names.is_empty() {
            BTreeSet::new()
        } else {
            self.store.ids_with_parts(&parent_ids, &names).await?
        };

        tracing::debug!(
            page_id = %ctx.page.id,
            parents = parent_ids.len(),
            excluded = excluded_ids.len(),
            order = %order.field,
            direction = %order.direction,
            per_page,
            page,
            "Built candidate query"
        );

        Ok(QuerySpec {
            parent_ids,
            excluded_ids,
            order,
            per_page,
            page,
        })
    }

    /// The resolved page itself, or its children at level 2.
    async fn parent_scope(&self, page: &Page, attrs: &QueryAttrs) -> StoreResult<BTreeSet<PageId>> {
        let target = match attrs.url.as_deref().filter(|u| !u.trim().is_empty()) {
            Some(url) => self.store.find_by_url(url, LookupOptions::default()).await?,
            None => None,
        };
        let scope_id = target.as_ref().map_or(page.id, |p| p.id);

        if parse_level(attrs.level.as_deref()) == 2 {
            Ok(self.store.child_ids(scope_id).await?.into_iter().collect())
        } else {
            Ok(BTreeSet::from([scope_id]))
        }
    }
}

/// Leading digits of `value`; anything else reads as level 1.
fn parse_level(value: Option<&str>) -> u32 {
    value
        .map(str::trim_start)
        .map(|v| {
            let end = v.find(|c: char| !c.is_ascii_digit()).unwrap_or(v.len());
            &v[..end]
        })
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(1)
}

fn parse_per_page(value: Option<&str>) -> ValidationResult<u32> {
    let Some(raw) = value else {
        return Ok(DEFAULT_PER_PAGE);
    };
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ValidationError::invalid_attribute(
            "per_page",
            raw,
            "expected a positive integer",
        )),
    }
}

fn parse_page_attr(raw: &str) -> ValidationResult<u32> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::invalid_attribute(
            "page",
            raw,
            "expected a page number",
        ));
    }
    Ok(digits.parse().unwrap_or(u32::MAX))
}

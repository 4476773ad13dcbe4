//! Paginated address resolution.
//!
//! [`PaginatingResolver`] wraps any [`PageStore`] and intercepts both address
//! lookups. Before delegating, it walks the `/`-terminated prefixes of the
//! address from the root down and asks the [`AddressMatcher`] whether the
//! address is a paginated form of that prefix. The first prefix that is both
//! matched and an existing page owns the address, and its page is returned
//! unchanged: the synthetic address only contributes a page number.

use std::collections::BTreeSet;

use async_trait::async_trait;
use folio_core::{
    AddressForm, AddressMatch, AddressMatcher, Page, PageId, QuerySpec, RouteSegment,
    base_prefixes, clean_address,
};
use serde::Serialize;

use crate::error::StoreResult;
use crate::page_store::{LookupOptions, PageStore, PageWindow};

/// Outcome of resolving an address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// The owning page, or `None` for a miss.
    pub page: Option<Page>,
    /// How the address related to the page.
    pub matched: AddressMatch,
}

impl Resolution {
    fn canonical(page: Option<Page>) -> Self {
        Self {
            page,
            matched: AddressMatch::Canonical,
        }
    }

    /// Page number carried by the address, if it was synthetic.
    pub fn page_number(&self) -> Option<u32> {
        self.matched.page_number()
    }
}

/// Store decorator resolving synthetic paginated addresses to their pages.
#[derive(Debug, Clone)]
pub struct PaginatingResolver<S> {
    inner: S,
    matcher: AddressMatcher,
}

impl<S: PageStore> PaginatingResolver<S> {
    pub fn new(inner: S, segment: RouteSegment) -> Self {
        Self {
            inner,
            matcher: AddressMatcher::new(segment),
        }
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn matcher(&self) -> &AddressMatcher {
        &self.matcher
    }

    pub fn segment(&self) -> &RouteSegment {
        self.matcher.segment()
    }

    /// Resolves a flat url. Only the paginated-self form is recognized.
    pub async fn resolve_url(&self, url: &str, options: LookupOptions) -> StoreResult<Resolution> {
        self.resolve(url, options, AddressForm::Url).await
    }

    /// Resolves a hierarchical path, including paginated archive forms.
    pub async fn resolve_path(&self, path: &str, options: LookupOptions) -> StoreResult<Resolution> {
        self.resolve(path, options, AddressForm::Path).await
    }

    async fn resolve(
        &self,
        address: &str,
        options: LookupOptions,
        form: AddressForm,
    ) -> StoreResult<Resolution> {
        let address = if options.clean {
            clean_address(address)
        } else {
            address.to_string()
        };

        for base in base_prefixes(&address) {
            let matched = self.matcher.classify_as(&address, base, form);
            if !matched.is_paginated() {
                continue;
            }
            if let Some(page) = self.lookup(base, options, form).await? {
                tracing::debug!(
                    address = %address,
                    page_id = %page.id,
                    page_number = matched.page_number(),
                    "Resolved paginated address"
                );
                return Ok(Resolution {
                    page: Some(page),
                    matched,
                });
            }
        }

        let page = self.lookup(&address, options, form).await?;
        if page.is_none() {
            tracing::debug!(address = %address, "No page at address");
        }
        Ok(Resolution::canonical(page))
    }

    async fn lookup(
        &self,
        address: &str,
        options: LookupOptions,
        form: AddressForm,
    ) -> StoreResult<Option<Page>> {
        match form {
            AddressForm::Url => self.inner.find_by_url(address, options).await,
            AddressForm::Path => self.inner.find_by_path(address, options).await,
        }
    }
}

#[async_trait]
impl<S: PageStore> PageStore for PaginatingResolver<S> {
    async fn find_by_url(&self, url: &str, options: LookupOptions) -> StoreResult<Option<Page>> {
        Ok(self.resolve_url(url, options).await?.page)
    }

    async fn find_by_path(&self, path: &str, options: LookupOptions) -> StoreResult<Option<Page>> {
        Ok(self.resolve_path(path, options).await?.page)
    }

    async fn get_page(&self, id: PageId) -> StoreResult<Option<Page>> {
        self.inner.get_page(id).await
    }

    async fn child_ids(&self, parent: PageId) -> StoreResult<Vec<PageId>> {
        self.inner.child_ids(parent).await
    }

    async fn ids_with_parts(
        &self,
        parent_ids: &BTreeSet<PageId>,
        names: &[String],
    ) -> StoreResult<BTreeSet<PageId>> {
        self.inner.ids_with_parts(parent_ids, names).await
    }

    async fn fetch_window(&self, spec: &QuerySpec) -> StoreResult<PageWindow> {
        self.inner.fetch_window(spec).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::memory::MemoryPageStore;
    use folio_core::ArchiveDate;

    fn resolver() -> PaginatingResolver<MemoryPageStore> {
        PaginatingResolver::new(fixtures::blog(), RouteSegment::default())
    }

    #[tokio::test]
    async fn synthetic_url_resolves_to_owner() {
        let r = resolver();
        let res = r.resolve_url("/blog/page/3/", LookupOptions::default()).await.unwrap();
        assert_eq!(res.page.map(|p| p.id), Some(fixtures::BLOG));
        assert_eq!(res.matched, AddressMatch::PaginatedSelf { page_number: 3 });
    }

    #[tokio::test]
    async fn cleaning_adds_the_trailing_slash() {
        let r = resolver();
        let res = r.resolve_url("blog/page/2", LookupOptions::default()).await.unwrap();
        assert_eq!(res.page_number(), Some(2));

        let raw = LookupOptions {
            clean: false,
            ..Default::default()
        };
        let res = r.resolve_url("/blog/page/2", raw).await.unwrap();
        assert_eq!(res.page, None);
        assert_eq!(res.matched, AddressMatch::Canonical);
    }

    #[tokio::test]
    async fn root_owns_its_own_windows() {
        let r = resolver();
        let res = r.resolve_path("/page/4/", LookupOptions::default()).await.unwrap();
        assert_eq!(res.page.as_ref().map(|p| p.id), Some(fixtures::ROOT));
        assert_eq!(res.page_number(), Some(4));
    }

    #[tokio::test]
    async fn archive_form_only_on_path() {
        let r = resolver();
        let res = r
            .resolve_path("/blog/2024/01/page/2/", LookupOptions::default())
            .await
            .unwrap();
        assert_eq!(res.page.map(|p| p.id), Some(fixtures::BLOG));
        assert_eq!(
            res.matched,
            AddressMatch::PaginatedArchive {
                page_number: 2,
                archive: ArchiveDate {
                    year: 2024,
                    month: Some(1),
                    day: None,
                },
            }
        );

        let res = r
            .resolve_url("/blog/2024/01/page/2/", LookupOptions::default())
            .await
            .unwrap();
        assert_eq!(res.page, None);
    }

    #[tokio::test]
    async fn canonical_and_missing_addresses_fall_through() {
        let r = resolver();
        let res = r.resolve_url("/about/", LookupOptions::default()).await.unwrap();
        assert_eq!(res.page.map(|p| p.id), Some(fixtures::ABOUT));
        assert_eq!(res.matched, AddressMatch::Canonical);

        let res = r.resolve_url("/nowhere/", LookupOptions::default()).await.unwrap();
        assert_eq!(res, Resolution::canonical(None));

        // Matches the pattern but no page owns the base.
        let res = r.resolve_url("/nowhere/page/2/", LookupOptions::default()).await.unwrap();
        assert_eq!(res.page, None);
    }

    #[tokio::test]
    async fn custom_segment_is_honoured() {
        let r = PaginatingResolver::new(fixtures::blog(), RouteSegment::new("p-"));
        let res = r.resolve_url("/blog/p-5/", LookupOptions::default()).await.unwrap();
        assert_eq!(res.page_number(), Some(5));
        let res = r.resolve_url("/blog/page/5/", LookupOptions::default()).await.unwrap();
        assert_eq!(res.page, None);
    }

    #[tokio::test]
    async fn decorator_is_a_page_store() {
        let r = resolver();
        let store: &dyn PageStore = &r;
        let page = store
            .find_by_path("/blog/page/9/", LookupOptions::default())
            .await
            .unwrap();
        assert_eq!(page.map(|p| p.id), Some(fixtures::BLOG));
        assert!(!store.child_ids(fixtures::BLOG).await.unwrap().is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn runtime() -> tokio::runtime::Runtime {
            tokio::runtime::Builder::new_current_thread()
                .build()
                .expect("runtime")
        }

        proptest! {
            #[test]
            fn synthetic_address_resolves_like_canonical(
                which in 0usize..3,
                n in 1u32..1_000_000,
                by_path in any::<bool>(),
            ) {
                let address = ["/", "/blog/", "/about/"][which];
                let r = resolver();
                let options = LookupOptions::default();
                let synthetic = format!("{}/", r.segment().page_address(address, n));

                let (canonical, paginated) = runtime().block_on(async {
                    if by_path {
                        (
                            r.resolve_path(address, options).await.unwrap(),
                            r.resolve_path(&synthetic, options).await.unwrap(),
                        )
                    } else {
                        (
                            r.resolve_url(address, options).await.unwrap(),
                            r.resolve_url(&synthetic, options).await.unwrap(),
                        )
                    }
                });

                prop_assert!(canonical.page.is_some());
                prop_assert_eq!(&canonical.page, &paginated.page);
                prop_assert_eq!(paginated.page_number(), Some(n));
            }
        }
    }
}

//! Caching wrapper around the page client, plus whole-collection fetches.

use auxkit_api::types::PageResponse;
use auxkit_api::{parse_page, Client, PageQuery, Query};
use serde::de::DeserializeOwned;

use crate::cache::MemoryCache;
use crate::config::Config;
use crate::error::AuxkitError;
use crate::paging::PageLoop;

/// Page client that memoizes response bodies by request URL.
///
/// Cache hits bypass the network entirely. A failed request is never
/// cached and never retried.
pub struct CachedClient {
    inner: Client,
    cache: MemoryCache,
    page_loop: PageLoop,
}

impl CachedClient {
    pub fn new(inner: Client, cache: MemoryCache) -> Self {
        Self {
            inner,
            cache,
            page_loop: PageLoop::default(),
        }
    }

    /// Creates a cached client rooted at `base_url`. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, cache: MemoryCache) -> Self {
        Self::new(Client::with_base_url(base_url), cache)
    }

    /// Builds a client from the configured base URL, TTL, and page bound.
    pub fn from_config(config: &Config) -> Result<Self, AuxkitError> {
        let base_url = config.require_base_url()?;
        let mut client = Self::with_base_url(base_url, MemoryCache::new(config.cache_ttl()));
        if let Some(max_pages) = config.max_pages {
            client = client.with_page_loop(PageLoop::new().with_max_pages(max_pages));
        }
        Ok(client)
    }

    pub fn with_page_loop(mut self, page_loop: PageLoop) -> Self {
        self.page_loop = page_loop;
        self
    }

    pub fn page_loop(&self) -> PageLoop {
        self.page_loop
    }

    /// Fetches the page `query` points at, returning a cached body when available.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &PageQuery,
    ) -> Result<Option<PageResponse<T>>, AuxkitError> {
        let url = self.inner.page_url(path, query)?;
        let cache_key = url.to_string();

        if let Some(cached) = self.cache.get(&cache_key) {
            tracing::debug!("cache hit for {}", cache_key);
            return parse_page(&cached).map_err(|e| AuxkitError::Cache(e.to_string()));
        }

        tracing::debug!("GET {}", url);
        let body = self.inner.get_body(url).await?;
        let page = parse_page(&body)?;
        if !self.cache.ttl().is_zero() {
            self.cache.set(cache_key, body);
        }
        Ok(page)
    }

    /// Fetches every page starting at `query`'s cursor and concatenates the items.
    ///
    /// Filters, sort, and parameter style of `query` are kept for every page;
    /// only the offset advances.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &PageQuery,
    ) -> Result<Vec<T>, AuxkitError> {
        let items = self
            .page_loop
            .run(
                |request| {
                    let page_query = query.clone().with_page_request(request);
                    async move { self.get_page::<T>(path, &page_query).await }
                },
                Some(query.page_request()),
            )
            .await?;
        tracing::info!("fetched {} items from {}", items.len(), path);
        Ok(items)
    }

    /// Removes all entries from the cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

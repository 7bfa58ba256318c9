//! HTTP catalog client.
//!
//! Fetches a `products.json` document with `reqwest` and caches the parsed
//! index using `moka`, so repeated add-to-cart clicks do not refetch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use basket_core::{Product, ProductId};
use moka::future::Cache;
use tracing::{debug, instrument};
use url::Url;

use super::{Catalog, CatalogError, index_products};

/// Catalog fetched from a URL.
///
/// Cheaply cloneable; clones share the HTTP client and cache.
#[derive(Clone)]
pub struct HttpCatalog {
    inner: Arc<HttpCatalogInner>,
}

struct HttpCatalogInner {
    client: reqwest::Client,
    url: Url,
    cache: Cache<String, Arc<HashMap<ProductId, Product>>>,
}

impl HttpCatalog {
    /// Create a client for the catalog document at `url`.
    #[must_use]
    pub fn new(url: Url, ttl: Duration) -> Self {
        let cache = Cache::builder().max_capacity(1).time_to_live(ttl).build();

        Self {
            inner: Arc::new(HttpCatalogInner {
                client: reqwest::Client::new(),
                url,
                cache,
            }),
        }
    }

    /// The catalog document URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.inner.url
    }

    /// Drop the cached document so the next lookup refetches.
    pub async fn invalidate(&self) {
        self.inner.cache.invalidate(self.inner.url.as_str()).await;
    }

    /// Fetch (or reuse) the indexed catalog document.
    #[instrument(skip(self), fields(url = %self.inner.url))]
    async fn products(&self) -> Result<Arc<HashMap<ProductId, Product>>, CatalogError> {
        let cache_key = self.inner.url.to_string();

        // Check cache
        if let Some(products) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for catalog");
            return Ok(products);
        }

        let response = self
            .inner
            .client
            .get(self.inner.url.clone())
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?;
        let document = response.text().await?;

        let products = Arc::new(index_products(&document)?);
        debug!(products = products.len(), "Fetched catalog");

        // Cache the result
        self.inner
            .cache
            .insert(cache_key, Arc::clone(&products))
            .await;

        Ok(products)
    }
}

impl std::fmt::Debug for HttpCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalog")
            .field("url", &self.inner.url.as_str())
            .finish_non_exhaustive()
    }
}

impl Catalog for HttpCatalog {
    async fn find(&self, id: &ProductId) -> Result<Product, CatalogError> {
        let products = self.products().await?;
        products
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }
}

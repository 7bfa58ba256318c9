//! Product catalog lookup.
//!
//! The cart never invents product data: a product is resolved by id through a
//! [`Catalog`] first, and only a successful lookup reaches
//! [`CartStore::add`](crate::store::CartStore::add). While a lookup is pending
//! the store is untouched.
//!
//! - [`StaticCatalog`] - Products parsed from a JSON document held in memory
//! - [`HttpCatalog`] - `products.json` fetched over HTTP and cached with `moka`

mod http;
mod static_catalog;

pub use http::HttpCatalog;
pub use static_catalog::StaticCatalog;

use std::collections::HashMap;
use std::future::Future;

use basket_core::{Product, ProductError, ProductId};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::error::CartError;
use crate::events::CartChange;
use crate::storage::StorageArea;
use crate::store::CartStore;

/// Errors that can occur when resolving products.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product with this id.
    #[error("Not found: {0}")]
    NotFound(ProductId),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog document could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The catalog file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog holds an unusable product.
    #[error("Invalid product: {0}")]
    InvalidProduct(#[from] ProductError),
}

/// Resolves product ids to product descriptors.
pub trait Catalog {
    /// Look up one product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown ids, or a transport or
    /// parse error if the catalog itself is unavailable.
    fn find(&self, id: &ProductId) -> impl Future<Output = Result<Product, CatalogError>>;
}

/// Index a catalog document by product id.
///
/// Every product is validated. When an id repeats, the first entry wins.
///
/// # Errors
///
/// Returns an error if the document is not a JSON array of products or a
/// product fails validation.
pub fn index_products(document: &str) -> Result<HashMap<ProductId, Product>, CatalogError> {
    let products: Vec<Product> = serde_json::from_str(document)?;
    let mut index = HashMap::with_capacity(products.len());
    for product in products {
        product.validate()?;
        index.entry(product.id.clone()).or_insert(product);
    }
    Ok(index)
}

/// Resolve `id` through `catalog`, then add it to `store`.
///
/// A zero quantity is rejected before any lookup. A failed lookup leaves the
/// cart unchanged and is returned to the caller; there is no retry.
///
/// # Errors
///
/// Returns [`CartError::InvalidQuantity`] or [`CartError::Catalog`].
#[instrument(skip(store, catalog))]
pub async fn add_from_catalog<S, C>(
    store: &mut CartStore<S>,
    catalog: &C,
    id: &ProductId,
    quantity: u32,
) -> Result<CartChange, CartError>
where
    S: StorageArea,
    C: Catalog,
{
    if quantity == 0 {
        return Err(CartError::InvalidQuantity(quantity));
    }

    let product = catalog.find(id).await?;
    debug!(name = %product.name, "Resolved product");
    Ok(store.add(&product, quantity))
}

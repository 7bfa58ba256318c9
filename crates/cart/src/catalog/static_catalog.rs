//! In-memory catalog.

use std::collections::HashMap;
use std::path::Path;

use basket_core::{Product, ProductId};
use tracing::{debug, instrument};

use super::{Catalog, CatalogError, index_products};

/// Catalog backed by a product list held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: HashMap<ProductId, Product>,
}

impl StaticCatalog {
    /// Build a catalog from already-parsed products.
    ///
    /// # Errors
    ///
    /// Returns an error if a product fails validation.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::new();
        for product in products {
            product.validate()?;
            index.entry(product.id.clone()).or_insert(product);
        }
        Ok(Self { products: index })
    }

    /// Parse a JSON catalog document (an array of products).
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed or holds an invalid
    /// product.
    pub fn from_json(document: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            products: index_products(document)?,
        })
    }

    /// Read and parse a JSON catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument]
    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        let document = tokio::fs::read_to_string(path).await?;
        let catalog = Self::from_json(&document)?;
        debug!(products = catalog.len(), "Loaded catalog file");
        Ok(catalog)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Catalog for StaticCatalog {
    async fn find(&self, id: &ProductId) -> Result<Product, CatalogError> {
        self.products
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }
}

//! Page session setup.
//!
//! Opens the file-backed cart and picks the catalog named by configuration.

use basket_cart::{
    CartConfig, CartPage, Catalog, CatalogError, CatalogSource, FileStorage, HttpCatalog,
    StaticCatalog, StorageError,
};
use basket_core::{Product, ProductId};
use tracing::debug;

/// Catalog chosen at runtime from [`CatalogSource`].
#[derive(Debug)]
pub enum ProductCatalog {
    File(StaticCatalog),
    Remote(HttpCatalog),
}

impl ProductCatalog {
    /// Load the configured catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if a catalog file cannot be read or parsed. Remote
    /// catalogs are fetched lazily on first lookup.
    pub async fn load(config: &CartConfig) -> Result<Self, CatalogError> {
        match &config.catalog {
            CatalogSource::Url(url) => {
                let catalog = HttpCatalog::new(url.clone(), config.catalog_ttl);
                debug!(url = %catalog.url(), "Using remote catalog");
                Ok(Self::Remote(catalog))
            }
            CatalogSource::Path(path) => Ok(Self::File(StaticCatalog::load(path).await?)),
        }
    }
}

impl Catalog for ProductCatalog {
    async fn find(&self, id: &ProductId) -> Result<Product, CatalogError> {
        match self {
            Self::File(catalog) => catalog.find(id).await,
            Self::Remote(catalog) => catalog.find(id).await,
        }
    }
}

/// A CLI page session.
pub type Session = CartPage<FileStorage, ProductCatalog>;

/// Open the cart without a catalog, for commands that never look products up.
///
/// # Errors
///
/// Returns an error if the storage directory cannot be created.
pub fn open(config: &CartConfig) -> Result<Session, StorageError> {
    let storage = FileStorage::open(config.storage_dir.clone())?;
    Ok(CartPage::from_config(
        storage,
        ProductCatalog::File(StaticCatalog::default()),
        config,
    ))
}

/// Open the cart together with the configured catalog.
///
/// # Errors
///
/// Returns an error if the storage directory cannot be created or the
/// catalog cannot be loaded.
pub async fn open_with_catalog(
    config: &CartConfig,
) -> Result<Session, Box<dyn std::error::Error>> {
    let storage = FileStorage::open(config.storage_dir.clone())?;
    let catalog = ProductCatalog::load(config).await?;
    Ok(CartPage::from_config(storage, catalog, config))
}

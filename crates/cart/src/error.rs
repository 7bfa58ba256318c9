//! Unified error handling.
//!
//! Most cart operations never fail: unknown ids are no-ops and storage
//! trouble degrades to an empty or memory-only cart. [`CartError`] covers the
//! operations that do report failure to the caller, such as catalog lookups,
//! checkout, configuration and rendering.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Error type for fallible cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Product lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Quantity must be at least one.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Checkout requested with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The product modal was confirmed with no product open.
    #[error("No product selected")]
    NoProductSelected,

    /// Storage area could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A view failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

/// Result type alias for cart operations.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use basket_core::ProductId;

    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(CartError::EmptyCart.to_string(), "Cart is empty");
        assert_eq!(
            CartError::InvalidQuantity(0).to_string(),
            "Invalid quantity: 0"
        );
        let err = CartError::from(CatalogError::NotFound(ProductId::from(42)));
        assert_eq!(err.to_string(), "Catalog error: Not found: 42");
    }
}

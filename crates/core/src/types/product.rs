//! Catalog product descriptors.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::is_negative_amount;

/// Errors found when validating a [`Product`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// The product id is empty.
    #[error("product id cannot be empty")]
    EmptyId,
    /// The product price is below zero.
    #[error("product {id} has a negative price ({price})")]
    NegativePrice {
        /// Offending product.
        id: ProductId,
        /// The price found.
        price: Decimal,
    },
}

/// A product as returned by a catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Image URL.
    pub image: String,
    #[serde(default, alias = "altText", skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

impl Product {
    /// Check the descriptor is usable as a cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or the price is negative.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.id.as_str().is_empty() {
            return Err(ProductError::EmptyId);
        }
        if is_negative_amount(self.price) {
            return Err(ProductError::NegativePrice {
                id: self.id.clone(),
                price: self.price,
            });
        }
        Ok(())
    }
}

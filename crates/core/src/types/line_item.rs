//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::product::Product;
use crate::types::quantity::Quantity;

/// One product entry in the cart together with its quantity.
///
/// The serialized form is the persisted cart record:
/// `{id, name, price, image, quantity}` plus an optional `alt_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    /// Unit price, never negative.
    pub price: Decimal,
    /// Image URL.
    pub image: String,
    pub quantity: Quantity,
    #[serde(default, alias = "altText", skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

impl LineItem {
    /// Build a new line from a catalog product.
    #[must_use]
    pub fn from_product(product: &Product, quantity: Quantity) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity,
            alt_text: product.alt_text.clone(),
        }
    }

    /// Unit price times quantity, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * self.quantity.as_decimal()
    }

    /// Text for the image alt attribute, falling back to the name.
    #[must_use]
    pub fn alt(&self) -> &str {
        self.alt_text.as_deref().unwrap_or(&self.name)
    }
}

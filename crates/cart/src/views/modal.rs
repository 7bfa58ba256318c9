//! Product detail modal.

use askama::Template;
use basket_core::{CurrencyCode, Product, ProductId, Quantity};

use super::format_price;
use crate::error::{CartError, Result};

/// Product modal template.
#[derive(Template)]
#[template(path = "partials/product_modal.html")]
struct ProductModalTemplate<'a> {
    product: &'a Product,
    alt: &'a str,
    price: String,
    quantity: u32,
}

/// A confirmed "add to cart" from the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    pub id: ProductId,
    pub quantity: Quantity,
}

/// Quantity stepper shown in the product detail modal.
///
/// The quantity never drops below one.
#[derive(Debug, Clone, Default)]
pub struct ProductModal {
    product: Option<Product>,
    quantity: Quantity,
}

impl ProductModal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `product` with the stepper reset to one.
    pub fn open(&mut self, product: Product) {
        self.product = Some(product);
        self.quantity = Quantity::ONE;
    }

    pub fn close(&mut self) {
        self.product = None;
        self.quantity = Quantity::ONE;
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.product.is_some()
    }

    #[must_use]
    pub const fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn increase(&mut self) -> Quantity {
        self.quantity = self.quantity.saturating_add(1);
        self.quantity
    }

    pub fn decrease(&mut self) -> Quantity {
        if let Some(quantity) = self.quantity.decremented() {
            self.quantity = quantity;
        }
        self.quantity
    }

    /// The add request for the open product.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NoProductSelected`] if the modal is closed.
    pub fn request(&self) -> Result<AddRequest> {
        let product = self.product.as_ref().ok_or(CartError::NoProductSelected)?;
        Ok(AddRequest {
            id: product.id.clone(),
            quantity: self.quantity,
        })
    }

    /// Render the open product.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NoProductSelected`] if the modal is closed, or a
    /// render error.
    pub fn render(&self, currency: CurrencyCode) -> Result<String> {
        let product = self.product.as_ref().ok_or(CartError::NoProductSelected)?;
        let html = ProductModalTemplate {
            product,
            alt: product.alt_text.as_deref().unwrap_or(&product.name),
            price: format_price(product.price, currency),
            quantity: self.quantity.get(),
        }
        .render()?;
        Ok(html)
    }
}

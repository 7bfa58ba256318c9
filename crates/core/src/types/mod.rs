//! Core types for Basket.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod id;
pub mod line_item;
pub mod price;
pub mod product;
pub mod quantity;

pub use id::ProductId;
pub use line_item::LineItem;
pub use price::{CurrencyCode, Price, PriceError, is_negative_amount, round_currency};
pub use product::{Product, ProductError};
pub use quantity::Quantity;

//! Integration tests for Basket.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p basket-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_sync` - Several page sessions sharing one storage area
//! - `persistence` - Stored state across reopen, corruption and file storage
//! - `page_flow` - End-to-end page events through the adapters
//! - `properties` - Property-based checks of store invariants
//!
//! This crate also provides the shared fixtures and proptest strategies.

use basket_cart::{CartPage, CartStore, MemoryStorage, StaticCatalog, StorageArea};
use basket_core::{CurrencyCode, Product, ProductId};
use proptest::prelude::*;
use rust_decimal::Decimal;

pub use basket_cart::BadgeMode;

/// Catalog document used across the tests.
pub const PRODUCTS_JSON: &str = r#"[
    {"id": 1, "name": "Dried Mango", "price": "4.50", "image": "img/mango.jpg"},
    {"id": 2, "name": "Pineapple Rings", "price": "5.25", "image": "img/pineapple.jpg", "alt_text": "Bag of pineapple rings"},
    {"id": 3, "name": "Banana Chips", "price": 3.99, "image": "img/banana.jpg"},
    {"id": "gift-box", "name": "Gift Box", "price": "24.00", "image": "img/gift.jpg"}
]"#;

/// Build a product directly, bypassing the catalog.
#[must_use]
pub fn product(id: impl Into<ProductId>, name: &str, cents: i64) -> Product {
    Product {
        id: id.into(),
        name: name.to_string(),
        price: Decimal::new(cents, 2),
        image: format!("img/{name}.jpg"),
        alt_text: None,
    }
}

/// The catalog parsed from [`PRODUCTS_JSON`].
///
/// # Panics
///
/// Panics if the fixture document is invalid.
#[must_use]
#[allow(clippy::expect_used)]
pub fn catalog() -> StaticCatalog {
    StaticCatalog::from_json(PRODUCTS_JSON).expect("fixture catalog parses")
}

/// A page session over `storage` using the fixture catalog.
#[must_use]
pub fn page<S: StorageArea>(storage: S) -> CartPage<S, StaticCatalog> {
    CartPage::new(
        CartStore::open(storage),
        catalog(),
        CurrencyCode::USD,
        BadgeMode::DistinctProducts,
    )
}

/// Two page sessions ("tabs") sharing one in-memory storage area.
#[must_use]
pub fn two_tabs() -> (
    MemoryStorage,
    CartPage<MemoryStorage, StaticCatalog>,
    CartPage<MemoryStorage, StaticCatalog>,
) {
    let storage = MemoryStorage::new();
    let tab_a = page(storage.clone());
    let tab_b = page(storage.clone());
    (storage, tab_a, tab_b)
}

// =============================================================================
// Proptest strategies
// =============================================================================

/// A store operation for property tests.
#[derive(Debug, Clone)]
pub enum Op {
    Add { id: u8, quantity: u32 },
    Increase(u8),
    Decrease(u8),
    Remove(u8),
    Clear,
}

/// Product ids drawn from a small pool so operations collide.
pub fn small_id() -> impl Strategy<Value = u8> {
    0u8..6
}

/// Quantities including zero, which the store treats as one.
pub fn quantity() -> impl Strategy<Value = u32> {
    0u32..=20
}

/// Generate a store operation.
pub fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (small_id(), quantity()).prop_map(|(id, quantity)| Op::Add { id, quantity }),
        2 => small_id().prop_map(Op::Increase),
        2 => small_id().prop_map(Op::Decrease),
        1 => small_id().prop_map(Op::Remove),
        1 => Just(Op::Clear),
    ]
}

/// Unit price for a pooled id, in cents.
#[must_use]
pub fn price_cents(id: u8) -> i64 {
    199 + i64::from(id) * 137
}

/// Apply `op` to `store`, using pooled products.
pub fn apply<S: StorageArea>(store: &mut CartStore<S>, op: &Op) {
    match op {
        Op::Add { id, quantity } => {
            store.add(
                &product(i64::from(*id), &format!("p{id}"), price_cents(*id)),
                *quantity,
            );
        }
        Op::Increase(id) => {
            store.increase(&ProductId::from(i64::from(*id)));
        }
        Op::Decrease(id) => {
            store.decrease(&ProductId::from(i64::from(*id)));
        }
        Op::Remove(id) => {
            store.remove(&ProductId::from(i64::from(*id)));
        }
        Op::Clear => {
            store.clear();
        }
    }
}

//! End-to-end page events through the renderer adapters.

#![allow(clippy::unwrap_used)]

use basket_cart::{
    BadgeMode, CartCommand, CartConfig, CartError, CartPage, CatalogError, MemoryStorage,
    StorageArea,
};
use basket_core::{CurrencyCode, ProductId};
use basket_integration_tests::{catalog, page};
use rust_decimal::Decimal;

#[tokio::test]
async fn test_shopping_session() {
    let mut page = page(MemoryStorage::new());

    page.add_to_cart(&ProductId::from(1), 1).await.unwrap();
    page.add_to_cart(&ProductId::from(1), 2).await.unwrap();
    page.add_to_cart(&ProductId::from("gift-box"), 1).await.unwrap();

    assert_eq!(page.store().item_count(), 2);
    assert_eq!(page.badge().count(), 2);
    assert_eq!(page.store().get(&ProductId::from(1)).unwrap().quantity.get(), 3);

    page.command(&CartCommand::Decrease(ProductId::from("gift-box")));
    assert_eq!(page.store().item_count(), 1);

    let summary = page.checkout().unwrap();
    assert_eq!(summary.total_quantity, 3);
    assert_eq!(summary.subtotal, Decimal::new(1350, 2));
}

#[tokio::test]
async fn test_popup_renders_every_line() {
    let mut page = page(MemoryStorage::new());
    page.add_to_cart(&ProductId::from(2), 2).await.unwrap();
    page.add_to_cart(&ProductId::from(3), 1).await.unwrap();

    let popup = page.popup();
    let html = popup.html();
    assert!(html.contains("Pineapple Rings"));
    assert!(html.contains("Bag of pineapple rings"));
    assert!(html.contains("$10.50"));
    assert!(html.contains("$3.99"));
    assert!(html.contains("$14.49"));
}

#[tokio::test]
async fn test_unknown_product_is_reported() {
    let mut page = page(MemoryStorage::new());
    let err = page
        .add_to_cart(&ProductId::from(999), 1)
        .await
        .unwrap_err();
    assert!(matches!(err, CartError::Catalog(CatalogError::NotFound(_))));
    assert!(page.store().is_empty());
}

#[tokio::test]
async fn test_config_drives_key_and_badge() {
    let config = CartConfig {
        storage_key: "basket-v2".to_string(),
        badge_mode: BadgeMode::TotalUnits,
        currency: CurrencyCode::EUR,
        ..CartConfig::default()
    };
    let storage = MemoryStorage::new();
    let mut page = CartPage::from_config(storage.clone(), catalog(), &config);

    page.add_to_cart(&ProductId::from(1), 4).await.unwrap();
    assert_eq!(page.badge().count(), 4);
    assert!(page.popup().html().contains("€18.00"));
    assert!(storage.get_item("basket-v2").unwrap().is_some());
    assert!(storage.get_item("cart").unwrap().is_none());
}

#[tokio::test]
async fn test_empty_checkout_after_clearing() {
    let mut page = page(MemoryStorage::new());
    page.add_to_cart(&ProductId::from(1), 1).await.unwrap();
    page.command(&CartCommand::Clear);
    assert!(matches!(page.checkout(), Err(CartError::EmptyCart)));
}

//! Several page sessions sharing one storage area.
//!
//! Sessions do not see each other's writes until they reload, and the last
//! write wins.

#![allow(clippy::unwrap_used)]

use basket_cart::{CartChange, CartCommand, CartStore, MemoryStorage, StorageArea, codec};
use basket_core::ProductId;
use basket_integration_tests::{product, two_tabs};

#[tokio::test]
async fn test_write_visible_only_after_reload() {
    let (_storage, mut tab_a, mut tab_b) = two_tabs();

    tab_a.add_to_cart(&ProductId::from(1), 2).await.unwrap();
    assert!(tab_b.store().is_empty());

    tab_b.external_update();
    let line = tab_b.store().get(&ProductId::from(1)).unwrap();
    assert_eq!(line.quantity.get(), 2);
    assert_eq!(tab_b.badge().count(), 1);
}

#[test]
fn test_last_write_wins() {
    let storage = MemoryStorage::new();
    let mut tab_a = CartStore::open(storage.clone());
    let mut tab_b = CartStore::open(storage.clone());

    tab_a.add(&product(1, "Mango", 450), 1);
    // tab_b never reloaded, so its write drops tab_a's line
    tab_b.add(&product(2, "Rings", 525), 1);

    let stored = codec::decode(&storage.get_item("cart").unwrap().unwrap()).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, ProductId::from(2));

    tab_a.reload();
    assert_eq!(tab_a.items(), tab_b.items());
}

#[tokio::test]
async fn test_reload_after_clear_elsewhere() {
    let (_storage, mut tab_a, mut tab_b) = two_tabs();
    tab_a.add_to_cart(&ProductId::from(3), 1).await.unwrap();
    tab_b.external_update();
    assert_eq!(tab_b.store().item_count(), 1);

    tab_a.command(&CartCommand::Clear);
    assert_eq!(tab_b.store().item_count(), 1);
    assert_eq!(tab_b.visibility_changed(true), CartChange::Reloaded);
    assert!(tab_b.store().is_empty());
    assert!(tab_b.popup().html().contains("Your cart is empty"));
}

#[tokio::test]
async fn test_stale_tab_command_on_missing_line_is_noop() {
    let (storage, mut tab_a, mut tab_b) = two_tabs();
    tab_a.add_to_cart(&ProductId::from(1), 1).await.unwrap();
    let before = storage.get_item("cart").unwrap();

    // tab_b has not reloaded and does not know about product 1
    assert_eq!(
        tab_b.command(&CartCommand::Increase(ProductId::from(1))),
        CartChange::Unchanged
    );
    assert_eq!(storage.get_item("cart").unwrap(), before);
}

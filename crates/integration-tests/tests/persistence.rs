//! Stored cart state across sessions.

#![allow(clippy::unwrap_used)]

use basket_cart::{CartStore, FileStorage, MemoryStorage, StorageArea, codec};
use basket_core::ProductId;
use basket_integration_tests::product;
use rust_decimal::Decimal;

#[test]
fn test_reopen_yields_identical_sequence() {
    let storage = MemoryStorage::new();
    let mut store = CartStore::open(storage.clone());
    store.add(&product(3, "Chips", 399), 1);
    store.add(&product(1, "Mango", 450), 4);
    store.add(&product("gift-box", "Gift", 2400), 1);
    store.decrease(&ProductId::from(1));

    let reopened = CartStore::open(storage);
    assert_eq!(reopened.items(), store.items());
    assert_eq!(reopened.subtotal(), store.subtotal());
}

#[test]
fn test_file_storage_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = CartStore::open(FileStorage::open(dir.path()).unwrap());
        store.add(&product(1, "Mango", 450), 2);
        store.add(&product(2, "Rings", 525), 1);
    }

    let store = CartStore::open(FileStorage::open(dir.path()).unwrap());
    assert_eq!(store.item_count(), 2);
    assert_eq!(store.subtotal(), Decimal::new(1425, 2));
    assert!(dir.path().join("cart.json").exists());
}

#[test]
fn test_corrupt_file_reads_as_empty_and_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cart.json"), "{\"oops\":").unwrap();

    let mut store = CartStore::open(FileStorage::open(dir.path()).unwrap());
    assert_eq!(store.item_count(), 0);

    store.add(&product(1, "Mango", 450), 1);
    let raw = std::fs::read_to_string(dir.path().join("cart.json")).unwrap();
    assert_eq!(codec::decode(&raw).unwrap(), store.items());
}

#[test]
fn test_hand_written_blob_with_numeric_fields() {
    let storage = MemoryStorage::new();
    storage
        .set_item(
            "cart",
            r#"[{"id":5,"name":"Tea","price":2.5,"image":"tea.jpg","quantity":1}]"#,
        )
        .unwrap();

    let mut store = CartStore::open(storage);
    store.decrease(&ProductId::from("5"));
    assert_eq!(store.item_count(), 0);
}

#[test]
fn test_blob_with_negative_price_is_discarded() {
    let storage = MemoryStorage::new();
    storage
        .set_item(
            "cart",
            r#"[{"id":1,"name":"Tea","price":"-2.50","image":"tea.jpg","quantity":1}]"#,
        )
        .unwrap();
    assert!(CartStore::open(storage).is_empty());
}

#[test]
fn test_removing_stored_key_empties_next_session() {
    let storage = MemoryStorage::new();
    let mut store = CartStore::open(storage.clone());
    store.add(&product(1, "Mango", 450), 1);

    storage.remove_item("cart").unwrap();
    store.reload();
    assert!(store.is_empty());
}

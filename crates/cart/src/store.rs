//! The authoritative cart store.
//!
//! A [`CartStore`] owns the ordered line items of one page session. It is
//! rehydrated from a [`StorageArea`] when opened and written back after every
//! effective mutation (write-through, no batching). Observers are notified
//! synchronously after each write.
//!
//! Nothing here fails loudly: corrupt stored state reads as an empty cart,
//! unknown ids are no-ops, and storage write failures are logged while the
//! in-memory state stays authoritative for the session.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use basket_core::{LineItem, Product, ProductId, Quantity};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use crate::codec;
use crate::config::{DEFAULT_NOTICE_DURATION, DEFAULT_STORAGE_KEY};
use crate::events::{
    CartChange, CartEvent, CartObserver, CartSnapshot, Notice, Observers, SubscriptionId,
};
use crate::storage::StorageArea;

/// A user-interface request targeting an existing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    Increase(ProductId),
    Decrease(ProductId),
    Remove(ProductId),
    Clear,
}

/// Cart contents plus persistence and notification.
pub struct CartStore<S: StorageArea> {
    storage: S,
    key: String,
    items: Vec<LineItem>,
    observers: Observers,
    notice_duration: Duration,
}

impl<S: StorageArea> CartStore<S> {
    /// Open the cart stored under the default key.
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Open the cart stored under `key`, starting empty if the stored value
    /// is missing or unreadable.
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let items = read_items(&storage, &key);
        debug!(key = %key, lines = items.len(), "Opened cart");

        Self {
            storage,
            key,
            items,
            observers: Observers::default(),
            notice_duration: DEFAULT_NOTICE_DURATION,
        }
    }

    /// Set how long the added-item notice stays visible.
    #[must_use]
    pub const fn with_notice_duration(mut self, duration: Duration) -> Self {
        self.notice_duration = duration;
        self
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Find the line for `id`.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.snapshot().total_quantity()
    }

    /// Sum of unit price times quantity, rounded to 2 fractional digits.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.snapshot().subtotal()
    }

    /// Read-only view handed to observers.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot<'_> {
        CartSnapshot::new(&self.items)
    }

    /// Storage key this cart is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backing storage area.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register an observer; it is called after every effective mutation.
    pub fn subscribe<O: CartObserver + 'static>(
        &mut self,
        observer: Rc<RefCell<O>>,
    ) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    /// Stop notifying an observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` units of `product`.
    ///
    /// Merges into the existing line for the product if there is one,
    /// otherwise appends a new line. A quantity of zero is treated as one.
    /// Products with a negative price are ignored.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub fn add(&mut self, product: &Product, quantity: u32) -> CartChange {
        if let Err(e) = product.validate() {
            warn!(error = %e, "Ignoring invalid product");
            return CartChange::Unchanged;
        }

        let quantity = Quantity::clamped(quantity);
        let change = match self.items.iter_mut().find(|item| item.id == product.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(quantity.get());
                CartChange::QuantityChanged {
                    id: existing.id.clone(),
                    quantity: existing.quantity,
                }
            }
            None => {
                self.items.push(LineItem::from_product(product, quantity));
                CartChange::Added {
                    id: product.id.clone(),
                    quantity,
                }
            }
        };

        self.commit(&change);
        let notice = Notice::item_added(&product.name, Utc::now(), self.notice_duration);
        self.observers
            .dispatch(&CartEvent::ItemAdded(notice), &CartSnapshot::new(&self.items));
        change
    }

    /// Add one unit to the line for `id`. No-op if absent.
    #[instrument(skip(self))]
    pub fn increase(&mut self, id: &ProductId) -> CartChange {
        let change = match self.items.iter_mut().find(|item| &item.id == id) {
            Some(item) => {
                item.quantity = item.quantity.saturating_add(1);
                CartChange::QuantityChanged {
                    id: item.id.clone(),
                    quantity: item.quantity,
                }
            }
            None => CartChange::Unchanged,
        };
        self.commit(&change);
        change
    }

    /// Remove one unit from the line for `id`, dropping the line at zero.
    /// No-op if absent.
    #[instrument(skip(self))]
    pub fn decrease(&mut self, id: &ProductId) -> CartChange {
        let change = match self.items.iter().position(|item| &item.id == id) {
            Some(index) => self.decrement_at(index),
            None => CartChange::Unchanged,
        };
        self.commit(&change);
        change
    }

    /// Remove the line for `id` regardless of quantity. No-op if absent.
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: &ProductId) -> CartChange {
        let change = match self.items.iter().position(|item| &item.id == id) {
            Some(index) => CartChange::Removed {
                id: self.items.remove(index).id,
            },
            None => CartChange::Unchanged,
        };
        self.commit(&change);
        change
    }

    /// Remove every line.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> CartChange {
        let change = if self.items.is_empty() {
            CartChange::Unchanged
        } else {
            self.items.clear();
            CartChange::Cleared
        };
        self.commit(&change);
        change
    }

    /// Run a UI command against its target line.
    pub fn apply(&mut self, command: &CartCommand) -> CartChange {
        match command {
            CartCommand::Increase(id) => self.increase(id),
            CartCommand::Decrease(id) => self.decrease(id),
            CartCommand::Remove(id) => self.remove(id),
            CartCommand::Clear => self.clear(),
        }
    }

    /// Re-read the stored cart, replacing in-memory state, and notify.
    ///
    /// Used when another page may have written the cart, or when a view
    /// becomes visible again.
    #[instrument(skip(self))]
    pub fn reload(&mut self) -> CartChange {
        self.items = read_items(&self.storage, &self.key);
        debug!(lines = self.items.len(), "Reloaded cart");
        self.notify(&CartChange::Reloaded);
        CartChange::Reloaded
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn decrement_at(&mut self, index: usize) -> CartChange {
        let Some(item) = self.items.get_mut(index) else {
            return CartChange::Unchanged;
        };
        if let Some(quantity) = item.quantity.decremented() {
            item.quantity = quantity;
            return CartChange::QuantityChanged {
                id: item.id.clone(),
                quantity,
            };
        }
        CartChange::Removed {
            id: self.items.remove(index).id,
        }
    }

    /// Persist and notify for an effective change.
    fn commit(&self, change: &CartChange) {
        if !change.is_effective() {
            debug!("No matching line; cart unchanged");
            return;
        }
        self.persist();
        self.notify(change);
    }

    fn persist(&self) {
        let encoded = match codec::encode(&self.items) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(error = %e, "Failed to encode cart");
                return;
            }
        };
        if let Err(e) = self.storage.set_item(&self.key, &encoded) {
            warn!(key = %self.key, error = %e, "Failed to persist cart");
        }
    }

    fn notify(&self, change: &CartChange) {
        debug!(?change, observers = self.observers.len(), "Cart changed");
        if self.observers.is_empty() {
            return;
        }
        self.observers.dispatch(
            &CartEvent::Changed(change.clone()),
            &CartSnapshot::new(&self.items),
        );
    }
}

impl<S: StorageArea + std::fmt::Debug> std::fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("storage", &self.storage)
            .field("key", &self.key)
            .field("items", &self.items)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}

/// Read and decode the stored cart, degrading to empty on any failure.
fn read_items<S: StorageArea>(storage: &S, key: &str) -> Vec<LineItem> {
    match storage.get_item(key) {
        Ok(raw) => codec::decode_or_empty(raw.as_deref()),
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to read cart; starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, StorageError};

    fn product(id: i64, cents: i64) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Product {id}"),
            price: Decimal::new(cents, 2),
            image: format!("img/{id}.jpg"),
            alt_text: None,
        }
    }

    fn recorder<S: StorageArea>(store: &mut CartStore<S>) -> Rc<RefCell<Vec<CartEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        store.subscribe(Rc::new(RefCell::new(
            move |event: &CartEvent, _: &CartSnapshot<'_>| sink.borrow_mut().push(event.clone()),
        )));
        events
    }

    #[test]
    fn test_add_same_product_merges_quantities() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(&product(1, 500), 1);
        store.add(&product(1, 500), 2);

        assert_eq!(store.item_count(), 1);
        assert_eq!(store.get(&ProductId::from(1)).unwrap().quantity.get(), 3);
    }

    #[test]
    fn test_add_zero_quantity_counts_as_one() {
        let mut store = CartStore::open(MemoryStorage::new());
        let change = store.add(&product(1, 500), 0);
        assert_eq!(
            change,
            CartChange::Added {
                id: ProductId::from(1),
                quantity: Quantity::ONE
            }
        );
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(&product(3, 100), 1);
        store.add(&product(1, 100), 1);
        store.add(&product(3, 100), 1);

        let ids: Vec<_> = store.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["3", "1"]);
    }

    #[test]
    fn test_add_rejects_negative_price() {
        let mut store = CartStore::open(MemoryStorage::new());
        assert_eq!(store.add(&product(1, -100), 1), CartChange::Unchanged);
        assert!(store.is_empty());
    }

    #[test]
    fn test_decrease_at_one_removes_line() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(&product(5, 100), 1);
        store.add(&product(6, 100), 2);

        let change = store.decrease(&ProductId::from(5));
        assert_eq!(change, CartChange::Removed { id: ProductId::from(5) });
        assert_eq!(store.item_count(), 1);

        store.decrease(&ProductId::from(6));
        assert_eq!(store.get(&ProductId::from(6)).unwrap().quantity, Quantity::ONE);
    }

    #[test]
    fn test_increase_unknown_id_is_noop() {
        let mut store = CartStore::open(MemoryStorage::new());
        let events = recorder(&mut store);
        assert_eq!(store.increase(&ProductId::from(9)), CartChange::Unchanged);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_remove_on_empty_cart_is_noop() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage.clone());
        assert_eq!(store.remove(&ProductId::from(99)), CartChange::Unchanged);
        assert!(store.is_empty());
        assert!(storage.get_item("cart").unwrap().is_none());
    }

    #[test]
    fn test_subtotal_rounds_to_cents() {
        let mut store = CartStore::open(MemoryStorage::new());
        assert_eq!(store.subtotal(), Decimal::ZERO);

        store.add(&product(1, 1999), 3);
        store.add(
            &Product {
                price: Decimal::new(3335, 3),
                ..product(2, 0)
            },
            1,
        );
        // 59.97 + 3.335 = 63.305
        assert_eq!(store.subtotal(), Decimal::new(6331, 2));
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage.clone());

        store.add(&product(1, 100), 2);
        let persisted = codec::decode(&storage.get_item("cart").unwrap().unwrap()).unwrap();
        assert_eq!(persisted, store.items());

        store.clear();
        assert_eq!(storage.get_item("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_open_rehydrates_from_storage() {
        let storage = MemoryStorage::new();
        {
            let mut store = CartStore::open(storage.clone());
            store.add(&product(1, 100), 1);
            store.add(&product(2, 200), 4);
        }

        let reopened = CartStore::open(storage);
        assert_eq!(reopened.item_count(), 2);
        assert_eq!(reopened.total_quantity(), 5);
    }

    #[test]
    fn test_open_with_corrupt_state_starts_empty() {
        let storage = MemoryStorage::new();
        storage.set_item("cart", "definitely not json").unwrap();
        let store = CartStore::open(storage);
        assert_eq!(store.item_count(), 0);
    }

    #[test]
    fn test_custom_key_is_isolated() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open_with_key(storage.clone(), "wishlist");
        store.add(&product(1, 100), 1);

        assert!(storage.get_item("cart").unwrap().is_none());
        assert!(storage.get_item("wishlist").unwrap().is_some());
        assert_eq!(store.key(), "wishlist");
    }

    #[test]
    fn test_add_notifies_change_then_notice() {
        let mut store =
            CartStore::open(MemoryStorage::new()).with_notice_duration(Duration::from_secs(1));
        let events = recorder(&mut store);

        store.add(&product(1, 100), 1);

        let events = events.borrow();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], CartEvent::Changed(CartChange::Added { .. })));
        match &events[1] {
            CartEvent::ItemAdded(notice) => {
                assert_eq!(notice.message, "Product 1 added to cart!");
                assert_eq!(
                    notice.expires_at - notice.shown_at,
                    chrono::Duration::seconds(1)
                );
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_unsubscribed_observer_not_called() {
        let mut store = CartStore::open(MemoryStorage::new());
        let calls = Rc::new(RefCell::new(0_u32));
        let counter = Rc::clone(&calls);
        let id = store.subscribe(Rc::new(RefCell::new(
            move |_: &CartEvent, _: &CartSnapshot<'_>| *counter.borrow_mut() += 1,
        )));

        store.add(&product(1, 100), 1);
        assert_eq!(*calls.borrow(), 2);

        assert!(store.unsubscribe(id));
        store.increase(&ProductId::from(1));
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn test_reload_picks_up_external_writes() {
        let storage = MemoryStorage::new();
        let mut tab_a = CartStore::open(storage.clone());
        let mut tab_b = CartStore::open(storage);
        let events = recorder(&mut tab_b);

        tab_a.add(&product(7, 100), 2);
        assert!(tab_b.is_empty());

        assert_eq!(tab_b.reload(), CartChange::Reloaded);
        assert_eq!(tab_b.get(&ProductId::from(7)).unwrap().quantity.get(), 2);
        assert_eq!(
            *events.borrow(),
            vec![CartEvent::Changed(CartChange::Reloaded)]
        );
    }

    #[test]
    fn test_apply_dispatches_commands() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(&product(1, 100), 1);

        store.apply(&CartCommand::Increase(ProductId::from("1")));
        assert_eq!(store.total_quantity(), 2);
        store.apply(&CartCommand::Remove(ProductId::from(1)));
        assert!(store.is_empty());
        assert_eq!(store.apply(&CartCommand::Clear), CartChange::Unchanged);
    }

    /// Storage whose writes always fail.
    struct ReadOnlyStorage;

    impl StorageArea for ReadOnlyStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }

        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut store = CartStore::open(ReadOnlyStorage);
        store.add(&product(1, 100), 1);
        assert_eq!(store.item_count(), 1);
    }
}

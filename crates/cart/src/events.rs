//! Change notifications from the cart store to its renderers.
//!
//! Observers subscribe to a [`CartStore`](crate::store::CartStore) and are
//! called synchronously, in subscription order, after every effective
//! mutation. Each call carries the event and a read-only snapshot of the
//! whole cart, so an observer can redraw from scratch.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use basket_core::{LineItem, ProductId, Quantity, round_currency};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::warn;

/// What a mutation did to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended.
    Added { id: ProductId, quantity: Quantity },
    /// An existing line's quantity changed.
    QuantityChanged { id: ProductId, quantity: Quantity },
    /// A line was removed.
    Removed { id: ProductId },
    /// Every line was removed.
    Cleared,
    /// State was re-read from storage.
    Reloaded,
    /// Nothing happened (unknown id, already empty).
    Unchanged,
}

impl CartChange {
    /// Whether the cart contents may differ after this change.
    #[must_use]
    pub const fn is_effective(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// A transient user-facing message with a fixed display window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub shown_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    /// Create a notice shown at `shown_at` for `duration`.
    #[must_use]
    pub fn new(message: impl Into<String>, shown_at: DateTime<Utc>, duration: Duration) -> Self {
        let expires_at = chrono::Duration::from_std(duration)
            .ok()
            .and_then(|d| shown_at.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            message: message.into(),
            shown_at,
            expires_at,
        }
    }

    /// The notice raised when a product lands in the cart.
    #[must_use]
    pub fn item_added(name: &str, shown_at: DateTime<Utc>, duration: Duration) -> Self {
        Self::new(format!("{name} added to cart!"), shown_at, duration)
    }

    /// Whether the notice is still on screen at `now`.
    #[must_use]
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.shown_at && now < self.expires_at
    }
}

/// Events broadcast by the cart store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// Cart contents changed; redraw.
    Changed(CartChange),
    /// A product was added; show the notice.
    ItemAdded(Notice),
}

/// Read-only view of the cart handed to observers.
#[derive(Debug, Clone, Copy)]
pub struct CartSnapshot<'a> {
    pub items: &'a [LineItem],
}

impl<'a> CartSnapshot<'a> {
    /// Wrap a slice of line items.
    #[must_use]
    pub const fn new(items: &'a [LineItem]) -> Self {
        Self { items }
    }

    /// Sum of unit price times quantity, rounded to currency precision.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        round_currency(self.items.iter().map(LineItem::line_total).sum())
    }

    /// Number of distinct products.
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Anything that wants to hear about cart changes.
pub trait CartObserver {
    /// Called after every effective mutation.
    fn notify(&mut self, event: &CartEvent, cart: &CartSnapshot<'_>);
}

impl<F> CartObserver for F
where
    F: FnMut(&CartEvent, &CartSnapshot<'_>),
{
    fn notify(&mut self, event: &CartEvent, cart: &CartSnapshot<'_>) {
        self(event, cart);
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Shared handle to an observer.
pub type SharedObserver = Rc<RefCell<dyn CartObserver>>;

/// Ordered list of subscribed observers.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, SharedObserver)>,
}

impl Observers {
    /// Register an observer.
    pub fn subscribe(&mut self, observer: SharedObserver) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    /// Remove an observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Call every observer with `event`.
    ///
    /// An observer that is already borrowed (it triggered this dispatch from
    /// inside its own callback) is skipped.
    pub fn dispatch(&self, event: &CartEvent, cart: &CartSnapshot<'_>) {
        for (id, observer) in &self.entries {
            match observer.try_borrow_mut() {
                Ok(mut observer) => observer.notify(event, cart),
                Err(_) => warn!(subscription = ?id, "Skipping re-entrant observer"),
            }
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}

//! Page session wiring.
//!
//! A [`CartPage`] is one page's worth of cart UI: the store, the catalog it
//! resolves products through, and the adapters subscribed to it. UI events
//! are routed through its methods; the adapters redraw themselves from the
//! notifications that follow.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use basket_core::{CurrencyCode, ProductId, Quantity};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, instrument};

use crate::catalog::{Catalog, add_from_catalog};
use crate::config::CartConfig;
use crate::error::{CartError, Result};
use crate::events::CartChange;
use crate::storage::StorageArea;
use crate::store::{CartCommand, CartStore};
use crate::views::{BadgeMode, CountBadge, NoticeBanner, PopupView, ProductModal};

/// Totals handed to checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSummary {
    /// Distinct products.
    pub item_count: usize,
    /// Units across all lines.
    pub total_quantity: u64,
    pub subtotal: Decimal,
}

/// One page session: store, catalog and renderer adapters.
pub struct CartPage<S: StorageArea, C: Catalog> {
    store: CartStore<S>,
    catalog: C,
    currency: CurrencyCode,
    popup: Rc<RefCell<PopupView>>,
    badge: Rc<RefCell<CountBadge>>,
    notice: Rc<RefCell<NoticeBanner>>,
    modal: ProductModal,
}

impl<S: StorageArea, C: Catalog> CartPage<S, C> {
    /// Subscribe the adapters to `store` and draw the initial state.
    pub fn new(
        mut store: CartStore<S>,
        catalog: C,
        currency: CurrencyCode,
        badge_mode: BadgeMode,
    ) -> Self {
        let popup = Rc::new(RefCell::new(PopupView::new(currency)));
        let badge = Rc::new(RefCell::new(CountBadge::new(badge_mode)));
        let notice = Rc::new(RefCell::new(NoticeBanner::new()));

        store.subscribe(Rc::clone(&popup));
        store.subscribe(Rc::clone(&badge));
        store.subscribe(Rc::clone(&notice));
        store.reload();

        Self {
            store,
            catalog,
            currency,
            popup,
            badge,
            notice,
            modal: ProductModal::new(),
        }
    }

    /// Open the configured cart in `storage` and build a page around it.
    pub fn from_config(storage: S, catalog: C, config: &CartConfig) -> Self {
        let store = CartStore::open_with_key(storage, config.storage_key.clone())
            .with_notice_duration(config.notice_duration);
        Self::new(store, catalog, config.currency, config.badge_mode)
    }

    // =========================================================================
    // Cart events
    // =========================================================================

    /// "Add to cart" button: resolve the product, then add it.
    ///
    /// # Errors
    ///
    /// Returns an error if `quantity` is zero or the lookup fails; the cart is
    /// unchanged in both cases.
    pub async fn add_to_cart(&mut self, id: &ProductId, quantity: u32) -> Result<CartChange> {
        add_from_catalog(&mut self.store, &self.catalog, id, quantity).await
    }

    /// Quantity control or remove button on a rendered line.
    pub fn command(&mut self, command: &CartCommand) -> CartChange {
        self.store.apply(command)
    }

    /// Cart icon click. Opening the popup re-reads the stored cart.
    pub fn toggle_popup(&mut self) -> bool {
        let open = self.popup.borrow_mut().toggle();
        if open {
            self.store.reload();
        }
        open
    }

    /// Click outside the popup.
    pub fn close_popup(&mut self) {
        self.popup.borrow_mut().close();
    }

    /// Another page wrote the cart.
    pub fn external_update(&mut self) -> CartChange {
        self.store.reload()
    }

    /// The page was shown or hidden. Showing it re-reads the stored cart.
    pub fn visibility_changed(&mut self, visible: bool) -> CartChange {
        if visible {
            self.store.reload()
        } else {
            CartChange::Unchanged
        }
    }

    /// Checkout link.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyCart`] when there is nothing to check out.
    #[instrument(skip(self))]
    pub fn checkout(&self) -> Result<CheckoutSummary> {
        if self.store.is_empty() {
            return Err(CartError::EmptyCart);
        }

        let summary = CheckoutSummary {
            item_count: self.store.item_count(),
            total_quantity: self.store.total_quantity(),
            subtotal: self.store.subtotal(),
        };
        info!(
            items = summary.item_count,
            units = summary.total_quantity,
            subtotal = %summary.subtotal,
            "Proceeding to checkout"
        );
        Ok(summary)
    }

    // =========================================================================
    // Product modal
    // =========================================================================

    /// Open the product modal for `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub async fn show_product(&mut self, id: &ProductId) -> Result<()> {
        let product = self.catalog.find(id).await?;
        self.modal.open(product);
        Ok(())
    }

    pub fn modal_increase(&mut self) -> Quantity {
        self.modal.increase()
    }

    pub fn modal_decrease(&mut self) -> Quantity {
        self.modal.decrease()
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    /// Add the modal's product at the stepper quantity and close the modal.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NoProductSelected`] if the modal is closed, or
    /// the lookup error; the modal stays open on failure.
    pub async fn confirm_modal(&mut self) -> Result<CartChange> {
        let request = self.modal.request()?;
        let change = self
            .add_to_cart(&request.id, request.quantity.get())
            .await?;
        self.modal.close();
        Ok(change)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn store(&self) -> &CartStore<S> {
        &self.store
    }

    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    #[must_use]
    pub fn popup(&self) -> Ref<'_, PopupView> {
        self.popup.borrow()
    }

    #[must_use]
    pub fn badge(&self) -> Ref<'_, CountBadge> {
        self.badge.borrow()
    }

    /// Notice text to show at `now`, if any.
    #[must_use]
    pub fn notice_at(&self, now: DateTime<Utc>) -> Option<String> {
        self.notice.borrow().visible_at(now).map(str::to_owned)
    }

    #[must_use]
    pub const fn modal(&self) -> &ProductModal {
        &self.modal
    }
}

impl<S, C> std::fmt::Debug for CartPage<S, C>
where
    S: StorageArea + std::fmt::Debug,
    C: Catalog + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartPage")
            .field("store", &self.store)
            .field("catalog", &self.catalog)
            .field("currency", &self.currency)
            .finish_non_exhaustive()
    }
}

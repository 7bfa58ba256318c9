//! Cart popup.

use askama::Template;
use basket_core::{CurrencyCode, LineItem};
use rust_decimal::Decimal;
use tracing::warn;

use super::format_price;
use crate::events::{CartEvent, CartObserver, CartSnapshot};

/// Cart item display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub alt: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl CartItemView {
    fn new(item: &LineItem, currency: CurrencyCode) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            image: item.image.clone(),
            alt: item.alt().to_owned(),
            quantity: item.quantity.get(),
            price: format_price(item.price, currency),
            line_price: format_price(item.line_total(), currency),
        }
    }
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: usize,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self {
            items: Vec::new(),
            subtotal: format_price(Decimal::ZERO, currency),
            item_count: 0,
        }
    }

    /// Build display data from a cart snapshot.
    #[must_use]
    pub fn from_snapshot(cart: &CartSnapshot<'_>, currency: CurrencyCode) -> Self {
        Self {
            items: cart
                .items
                .iter()
                .map(|item| CartItemView::new(item, currency))
                .collect(),
            subtotal: format_price(cart.subtotal(), currency),
            item_count: cart.item_count(),
        }
    }
}

/// Cart popup template.
#[derive(Template)]
#[template(path = "cart/popup.html")]
struct PopupTemplate<'a> {
    cart: &'a CartView,
    visible: bool,
}

/// The cart popup: item list with quantity controls, and the subtotal.
#[derive(Debug, Clone)]
pub struct PopupView {
    currency: CurrencyCode,
    cart: CartView,
    visible: bool,
    html: String,
}

impl PopupView {
    /// Create a closed, empty popup.
    #[must_use]
    pub fn new(currency: CurrencyCode) -> Self {
        let mut view = Self {
            currency,
            cart: CartView::empty(currency),
            visible: false,
            html: String::new(),
        };
        view.redraw();
        view
    }

    /// Render the popup.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render(&self) -> Result<String, askama::Error> {
        PopupTemplate {
            cart: &self.cart,
            visible: self.visible,
        }
        .render()
    }

    /// Last rendered markup.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Display data from the last notification.
    #[must_use]
    pub const fn cart(&self) -> &CartView {
        &self.cart
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Open or close the popup. Returns the new visibility.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.redraw();
        self.visible
    }

    /// Close the popup (outside click).
    pub fn close(&mut self) {
        if self.visible {
            self.visible = false;
            self.redraw();
        }
    }

    fn redraw(&mut self) {
        match self.render() {
            Ok(html) => self.html = html,
            Err(e) => warn!(error = %e, "Failed to render cart popup"),
        }
    }
}

impl CartObserver for PopupView {
    fn notify(&mut self, event: &CartEvent, cart: &CartSnapshot<'_>) {
        if let CartEvent::Changed(_) = event {
            self.cart = CartView::from_snapshot(cart, self.currency);
            self.redraw();
        }
    }
}

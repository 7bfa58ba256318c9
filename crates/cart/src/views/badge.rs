//! Header cart count badge.

use askama::Template;
use tracing::warn;

use super::BadgeMode;
use crate::events::{CartEvent, CartObserver, CartSnapshot};

/// Cart count badge fragment template.
#[derive(Template)]
#[template(path = "partials/cart_count.html")]
struct CartCountTemplate {
    count: u64,
}

/// Shows the number of products (or units) in the cart.
#[derive(Debug, Clone)]
pub struct CountBadge {
    mode: BadgeMode,
    count: u64,
    html: String,
}

impl CountBadge {
    #[must_use]
    pub fn new(mode: BadgeMode) -> Self {
        let mut badge = Self {
            mode,
            count: 0,
            html: String::new(),
        };
        badge.redraw();
        badge
    }

    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub const fn mode(&self) -> BadgeMode {
        self.mode
    }

    /// Last rendered markup.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    fn redraw(&mut self) {
        match (CartCountTemplate { count: self.count }).render() {
            Ok(html) => self.html = html,
            Err(e) => warn!(error = %e, "Failed to render cart count"),
        }
    }
}

impl CartObserver for CountBadge {
    fn notify(&mut self, event: &CartEvent, cart: &CartSnapshot<'_>) {
        if let CartEvent::Changed(_) = event {
            self.count = self.mode.count(cart);
            self.redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use basket_core::{LineItem, ProductId, Quantity};
    use rust_decimal::Decimal;

    use super::*;
    use crate::events::CartChange;

    fn line(id: i64, qty: u32) -> LineItem {
        LineItem {
            id: ProductId::from(id),
            name: format!("Item {id}"),
            price: Decimal::ONE,
            image: String::new(),
            quantity: Quantity::clamped(qty),
            alt_text: None,
        }
    }

    #[test]
    fn test_empty_badge_is_hidden() {
        let badge = CountBadge::new(BadgeMode::default());
        assert_eq!(badge.count(), 0);
        assert!(badge.html().contains("hidden"));
    }

    #[test]
    fn test_counts_by_mode() {
        let items = vec![line(1, 3), line(2, 2)];
        let event = CartEvent::Changed(CartChange::Reloaded);

        let mut distinct = CountBadge::new(BadgeMode::DistinctProducts);
        distinct.notify(&event, &CartSnapshot::new(&items));
        assert_eq!(distinct.count(), 2);
        assert!(distinct.html().contains(">2<"));

        let mut units = CountBadge::new(BadgeMode::TotalUnits);
        units.notify(&event, &CartSnapshot::new(&items));
        assert_eq!(units.count(), 5);
        assert!(!units.html().contains("hidden"));
    }
}

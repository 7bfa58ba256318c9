//! Renderer adapters.
//!
//! Each cart adapter subscribes to the store as a
//! [`CartObserver`](crate::events::CartObserver) and redraws itself from the
//! snapshot it is handed. Adapters never touch the store; user input comes
//! back as [`CartCommand`](crate::store::CartCommand)s.
//!
//! - [`PopupView`] - Item list, quantity controls and subtotal
//! - [`CountBadge`] - Header cart count
//! - [`NoticeBanner`] - "added to cart" notice with auto-dismissal
//! - [`ProductModal`] - Product detail quantity stepper

mod badge;
mod modal;
mod notice;
mod popup;

pub use badge::CountBadge;
pub use modal::{AddRequest, ProductModal};
pub use notice::NoticeBanner;
pub use popup::{CartItemView, CartView, PopupView};

use basket_core::{CurrencyCode, Price};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::events::CartSnapshot;

/// What the header badge counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeMode {
    /// Number of distinct products.
    #[default]
    DistinctProducts,
    /// Sum of quantities.
    TotalUnits,
}

impl BadgeMode {
    /// The badge number for a cart.
    #[must_use]
    pub fn count(self, cart: &CartSnapshot<'_>) -> u64 {
        match self {
            Self::DistinctProducts => u64::try_from(cart.item_count()).unwrap_or(u64::MAX),
            Self::TotalUnits => cart.total_quantity(),
        }
    }
}

/// Unrecognized badge mode name.
#[derive(Debug, Error)]
#[error("unknown badge mode {0:?} (expected \"distinct\" or \"units\")")]
pub struct ParseBadgeModeError(String);

impl std::str::FromStr for BadgeMode {
    type Err = ParseBadgeModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distinct" | "products" => Ok(Self::DistinctProducts),
            "units" | "quantity" => Ok(Self::TotalUnits),
            _ => Err(ParseBadgeModeError(s.to_owned())),
        }
    }
}

/// Format an amount for display (e.g., "$19.99").
pub(crate) fn format_price(amount: Decimal, currency: CurrencyCode) -> String {
    Price::new(amount, currency).display()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use basket_core::{LineItem, ProductId, Quantity};

    use super::*;

    #[test]
    fn test_badge_mode_parse() {
        assert_eq!("units".parse::<BadgeMode>().unwrap(), BadgeMode::TotalUnits);
        assert_eq!(
            " Distinct ".parse::<BadgeMode>().unwrap(),
            BadgeMode::DistinctProducts
        );
        assert!("lines".parse::<BadgeMode>().is_err());
    }

    #[test]
    fn test_badge_mode_count() {
        let items = vec![LineItem {
            id: ProductId::from(1),
            name: "Tea".to_string(),
            price: Decimal::ONE,
            image: String::new(),
            quantity: Quantity::clamped(4),
            alt_text: None,
        }];
        let snapshot = CartSnapshot::new(&items);
        assert_eq!(BadgeMode::DistinctProducts.count(&snapshot), 1);
        assert_eq!(BadgeMode::TotalUnits.count(&snapshot), 4);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Decimal::ZERO, CurrencyCode::USD), "$0.00");
        assert_eq!(format_price(Decimal::new(1999, 2), CurrencyCode::GBP), "£19.99");
    }
}

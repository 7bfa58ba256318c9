//! Positive line-item quantities.

use core::fmt;
use core::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of units of one product in the cart.
///
/// A quantity is always at least one; a line whose quantity would drop to
/// zero is removed instead. Deserializing `0` fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity, returning `None` for zero.
    #[must_use]
    pub const fn new(n: u32) -> Option<Self> {
        match NonZeroU32::new(n) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// Create a quantity, raising zero to one.
    #[must_use]
    pub const fn clamped(n: u32) -> Self {
        match NonZeroU32::new(n) {
            Some(n) => Self(n),
            None => Self::ONE,
        }
    }

    /// Get the underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Add `n` units, saturating at `u32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, n: u32) -> Self {
        Self(self.0.saturating_add(n))
    }

    /// One unit fewer, or `None` when this is the last unit.
    #[must_use]
    pub const fn decremented(self) -> Option<Self> {
        Self::new(self.0.get() - 1)
    }

    /// The count as a decimal, for price arithmetic.
    #[must_use]
    pub fn as_decimal(self) -> Decimal {
        Decimal::from(self.0.get())
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> Self {
        q.get()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_raises_zero() {
        assert_eq!(Quantity::clamped(0), Quantity::ONE);
        assert_eq!(Quantity::clamped(4).get(), 4);
    }

    #[test]
    fn test_decremented_stops_at_one() {
        assert_eq!(Quantity::clamped(2).decremented(), Some(Quantity::ONE));
        assert_eq!(Quantity::ONE.decremented(), None);
    }

    #[test]
    fn test_saturating_add() {
        let q = Quantity::clamped(u32::MAX - 1).saturating_add(5);
        assert_eq!(q.get(), u32::MAX);
    }

    #[test]
    fn test_deserialize_rejects_zero() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert!(serde_json::from_str::<Quantity>("-2").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("3").unwrap().get(), 3);
    }
}

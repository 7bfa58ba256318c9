//! Persisted cart format.
//!
//! The cart is stored as a JSON array of line records
//! `{id, name, price, image, quantity}`. Reading is strict: anything that is
//! not a well-formed array of valid records is a [`DecodeError`], which the
//! store turns into an empty cart.

use basket_core::{LineItem, is_negative_amount};
use thiserror::Error;
use tracing::warn;

/// Errors found while decoding a persisted cart.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The blob is not a JSON array of line records.
    #[error("malformed cart blob: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A record carries a negative unit price.
    #[error("line {id} has a negative price")]
    NegativePrice {
        /// Product id of the offending line.
        id: String,
    },
}

/// Serialize line items into the persisted form.
///
/// # Errors
///
/// Returns an error only if serialization itself fails, which does not happen
/// for well-formed line items.
pub fn encode(items: &[LineItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

/// Parse the persisted form back into ordered line items.
///
/// Records sharing an id are merged into the first occurrence by summing
/// quantities, so the one-line-per-product invariant holds after a read.
///
/// # Errors
///
/// Returns [`DecodeError`] if the blob is unparseable, a record is missing a
/// field, a quantity is zero, or a price is negative.
pub fn decode(raw: &str) -> Result<Vec<LineItem>, DecodeError> {
    let records: Vec<LineItem> = serde_json::from_str(raw)?;

    let mut items: Vec<LineItem> = Vec::with_capacity(records.len());
    for record in records {
        if is_negative_amount(record.price) {
            return Err(DecodeError::NegativePrice {
                id: record.id.into_inner(),
            });
        }

        match items.iter_mut().find(|item| item.id == record.id) {
            Some(existing) => {
                warn!(id = %record.id, "Merging duplicate cart record");
                existing.quantity = existing.quantity.saturating_add(record.quantity.get());
            }
            None => items.push(record),
        }
    }

    Ok(items)
}

/// Decode a stored value, treating absence or corruption as an empty cart.
#[must_use]
pub fn decode_or_empty(raw: Option<&str>) -> Vec<LineItem> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    decode(raw).unwrap_or_else(|e| {
        warn!(error = %e, "Discarding unreadable cart state");
        Vec::new()
    })
}

//! Opaque product identifiers.
//!
//! Catalog documents carry numeric ids while UI controls carry the same id as
//! an attribute string, so a [`ProductId`] accepts either form and compares
//! by its textual value.

use core::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// An opaque product identifier.
///
/// Deserializes from a JSON string or integer and always serializes as a
/// string. Surrounding whitespace is trimmed on construction.
///
/// # Example
///
/// ```rust
/// use basket_core::ProductId;
///
/// assert_eq!(ProductId::from(5), ProductId::from("5"));
/// assert_eq!(ProductId::from(" sku-9 ").as_str(), "sku-9");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "RawProductId")]
pub struct ProductId(String);

/// Wire forms accepted for a product id.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawProductId {
    Text(String),
    Integer(i64),
}

impl ProductId {
    /// Create a new ID from any string-like value.
    #[must_use]
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_owned())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<RawProductId> for ProductId {
    fn from(raw: RawProductId) -> Self {
        match raw {
            RawProductId::Text(s) => Self::new(s),
            RawProductId::Integer(n) => Self(n.to_string()),
        }
    }
}

impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<i32> for ProductId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

impl std::str::FromStr for ProductId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

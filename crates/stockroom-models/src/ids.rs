//! Type-safe ID wrapper for products.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a product.
///
/// Fresh IDs carry a full random UUID v4; IDs read back from disk are kept
/// verbatim, whatever their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new random ID.
    pub fn new() -> Self {
        Self(format!("prod-{}", Uuid::new_v4()))
    }

    /// Creates an ID from an existing string (for deserialization/testing).
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_product_id_prefix() {
        let id = ProductId::new();
        assert!(id.as_str().starts_with("prod-"));
        // prefix + hyphenated uuid
        assert_eq!(id.as_str().len(), 5 + 36);
    }

    #[test]
    fn test_new_ids_are_distinct() {
        let ids: HashSet<ProductId> = (0..1000).map(|_| ProductId::new()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_id_serialization() {
        let id = ProductId::from_string("a1b2c3d4");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"a1b2c3d4\"");

        let parsed: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_display() {
        let id = ProductId::from("prod-123");
        assert_eq!(format!("{}", id), "prod-123");
    }
}

//! Error types for inventory operations.

use stockroom_models::{ModelError, ProductId};
use stockroom_persistence::PersistenceError;
use thiserror::Error;

/// Errors that can occur during inventory operations.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// No product with this ID.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// A product with this ID is already in the inventory.
    #[error("product already exists: {0}")]
    DuplicateId(ProductId),

    /// Product validation, stock or field error.
    #[error(transparent)]
    Product(#[from] ModelError),

    /// Loading or saving the inventory file failed.
    #[error("storage error: {0}")]
    Storage(#[from] PersistenceError),

    /// The change was applied in memory but could not be saved.
    #[error("change applied but not saved: {0}")]
    Unsaved(#[source] PersistenceError),
}

impl InventoryError {
    /// Returns true if the in-memory inventory diverges from the file.
    pub fn is_unsaved(&self) -> bool {
        matches!(self, Self::Unsaved(_))
    }
}

/// Result type alias for inventory operations.
pub type Result<T> = std::result::Result<T, InventoryError>;

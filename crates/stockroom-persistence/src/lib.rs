//! Persistence layer for Stockroom.
//!
//! This crate stores the product catalog as a single JSON array of
//! type-tagged records. Writes are crash-safe: data goes to a temp file in
//! the target directory which is then renamed over the old file.
//!
//! # Example
//!
//! ```no_run
//! use stockroom_persistence::InventoryFile;
//! use stockroom_models::ProductBuilder;
//!
//! let file = InventoryFile::new("/home/user/.stockroom/inventory.json");
//!
//! let product = ProductBuilder::physical("Widget", "Tools")
//!     .price(9.99)
//!     .quantity(10)
//!     .build()
//!     .unwrap();
//! file.save([&product]).unwrap();
//!
//! let loaded = file.load().unwrap();
//! assert_eq!(loaded.products.len(), 1);
//! ```

pub mod atomic;
pub mod error;
pub mod inventory_file;

pub use error::{PersistenceError, Result};
pub use inventory_file::{InventoryFile, LoadedProducts};

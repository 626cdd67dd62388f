//! Inventory store and persistence manager for Stockroom.
//!
//! This crate provides:
//! - [`Inventory`]: an in-memory catalog keyed by product ID that enforces
//!   ID uniqueness and answers search and reporting queries
//! - [`ProductFilter`] / [`ProductSort`]: listing criteria
//! - [`InventoryManager`]: an inventory bound to a file, saving the whole
//!   catalog after every mutation
//!
//! # Example
//!
//! ```no_run
//! use stockroom_inventory::InventoryManager;
//! use stockroom_models::ProductBuilder;
//!
//! let mut manager = InventoryManager::new("/tmp/stockroom/inventory.json");
//! manager.load().unwrap();
//!
//! let widget = ProductBuilder::physical("Widget", "Tools")
//!     .price(9.99)
//!     .quantity(10)
//!     .build()
//!     .unwrap();
//! let id = manager.add_product(widget).unwrap();
//!
//! manager.remove_stock(&id, 3).unwrap();
//! assert_eq!(manager.inventory().get(&id).unwrap().quantity(), 7);
//! ```

pub mod error;
pub mod filter;
pub mod manager;
pub mod store;

pub use error::{InventoryError, Result};
pub use filter::{ProductFilter, ProductSort};
pub use manager::{InventoryManager, LoadReport};
pub use store::{Inventory, DEFAULT_LOW_STOCK_THRESHOLD};

//! Product data models for Stockroom.
//!
//! This crate provides the product hierarchy used throughout the Stockroom
//! system: a shared base record (name, price, quantity, category and
//! timestamps) plus one variant per product kind. Every mutation goes
//! through a validating setter, so a `Product` always satisfies its field
//! invariants.

pub mod builders;
pub mod error;
pub mod ids;
pub mod product;

mod timestamp;

// Re-export main types
pub use builders::ProductBuilder;
pub use error::{ModelError, Result};
pub use ids::ProductId;
pub use product::{
    DigitalDetails, Dimensions, DisplayDetails, PhysicalDetails, Product, ProductKind,
    ProductType, ServiceDetails,
};

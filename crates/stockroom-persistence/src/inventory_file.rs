//! Inventory file for catalog persistence.

use std::path::{Path, PathBuf};

use serde_json::Value;
use stockroom_models::{ModelError, Product};
use tracing::{debug, warn};

use crate::atomic::{atomic_write_json, read_json_optional};
use crate::error::{PersistenceError, Result};

/// Products decoded from an inventory file.
#[derive(Debug, Default)]
pub struct LoadedProducts {
    /// Decoded products, in file order.
    pub products: Vec<Product>,
    /// Records skipped because their `type` tag names no known variant.
    pub skipped: usize,
}

/// A catalog stored as one JSON array of product records.
///
/// ```text
/// [
///   { "id": "...", "name": "Widget", ..., "type": "PhysicalProduct", ... },
///   { "id": "...", "name": "E-book", ..., "type": "DigitalProduct", ... }
/// ]
/// ```
///
/// Every save rewrites the whole file.
#[derive(Debug, Clone)]
pub struct InventoryFile {
    path: PathBuf,
}

impl InventoryFile {
    /// Creates an InventoryFile bound to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the backing file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads every product from the file.
    ///
    /// A missing file yields an empty result. Records with an unrecognized
    /// `type` tag are skipped and counted.
    ///
    /// # Errors
    /// - [`PersistenceError::ReadError`] if the file cannot be read
    /// - [`PersistenceError::ParseError`] if it is not a JSON array
    /// - [`PersistenceError::MalformedRecord`] if a record with a known tag
    ///   cannot be decoded
    pub fn load(&self) -> Result<LoadedProducts> {
        let Some(records) = read_json_optional::<Vec<Value>>(&self.path)? else {
            debug!(path = %self.path.display(), "Inventory file not found");
            return Ok(LoadedProducts::default());
        };

        let mut loaded = LoadedProducts::default();
        for (index, record) in records.iter().enumerate() {
            match Product::from_record(record) {
                Ok(product) => loaded.products.push(product),
                Err(ModelError::UnknownProductType(tag)) => {
                    warn!(
                        path = %self.path.display(),
                        index,
                        tag = %tag,
                        "Skipping record with unknown product type"
                    );
                    loaded.skipped += 1;
                }
                Err(source) => {
                    return Err(PersistenceError::MalformedRecord {
                        path: self.path.clone(),
                        index,
                        source,
                    })
                }
            }
        }

        Ok(loaded)
    }

    /// Writes the given products to the file, replacing its contents.
    ///
    /// Returns the number of records written.
    pub fn save<'a, I>(&self, products: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a Product>,
    {
        let records = products
            .into_iter()
            .map(Product::to_record)
            .collect::<serde_json::Result<Vec<_>>>()?;

        atomic_write_json(&self.path, &records)?;
        debug!(path = %self.path.display(), count = records.len(), "Saved inventory file");
        Ok(records.len())
    }
}

//! InventoryManager - an inventory bound to its backing file.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use stockroom_models::{Product, ProductId};
use stockroom_persistence::{InventoryFile, PersistenceError};
use tracing::{debug, info, warn};

use crate::error::{InventoryError, Result};
use crate::store::Inventory;

/// Outcome of loading or importing a catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Products now in the inventory.
    pub loaded: usize,
    /// Records skipped because of an unrecognized `type` tag.
    pub skipped: usize,
}

/// Persistence manager over an [`Inventory`].
///
/// # Persistence
///
/// Every mutating call first changes the in-memory inventory, then
/// rewrites the whole file. If that save fails the call returns
/// [`InventoryError::Unsaved`]: the change is visible in memory but not on
/// disk, and a later successful save will persist it.
///
/// Access is single-writer; nothing guards the file against a second
/// process.
#[derive(Debug)]
pub struct InventoryManager {
    /// Backing file.
    file: InventoryFile,
    /// The catalog.
    inventory: Inventory,
}

impl InventoryManager {
    /// Creates a manager with an empty inventory. Call [`load`](Self::load)
    /// to read the file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: InventoryFile::new(path),
            inventory: Inventory::new(),
        }
    }

    /// Creates a manager and loads the file.
    pub fn open(path: impl Into<PathBuf>) -> Result<(Self, LoadReport)> {
        let mut manager = Self::new(path);
        let report = manager.load()?;
        Ok((manager, report))
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Read access to the inventory for queries.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Replaces the inventory with the contents of the backing file.
    ///
    /// A missing file leaves the inventory empty. On any error the
    /// inventory keeps its previous contents.
    pub fn load(&mut self) -> Result<LoadReport> {
        let report = Self::replace_from(&mut self.inventory, &self.file)?;
        info!(
            path = %self.path().display(),
            loaded = report.loaded,
            skipped = report.skipped,
            "Loaded inventory"
        );
        Ok(report)
    }

    /// Writes the whole inventory to the backing file.
    pub fn save(&self) -> Result<()> {
        let count = self.file.save(self.inventory.iter())?;
        debug!(path = %self.path().display(), count, "Saved inventory");
        Ok(())
    }

    /// Adds a product and saves. Returns the product's ID.
    pub fn add_product(&mut self, product: Product) -> Result<ProductId> {
        let id = product.id().clone();
        self.inventory.add(product)?;
        self.persist()?;
        Ok(id)
    }

    /// Removes a product and saves. Returns the removed product.
    pub fn remove_product(&mut self, id: &ProductId) -> Result<Product> {
        let product = self.inventory.remove(id)?;
        self.persist()?;
        Ok(product)
    }

    /// Updates fields of a product (all-or-nothing) and saves.
    pub fn update_product(&mut self, id: &ProductId, fields: &Map<String, Value>) -> Result<()> {
        self.inventory.update(id, fields)?;
        self.persist()
    }

    /// Adds stock to a product and saves.
    pub fn add_stock(&mut self, id: &ProductId, amount: i64) -> Result<()> {
        self.inventory.get_mut(id)?.add_stock(amount)?;
        self.persist()
    }

    /// Removes stock from a product and saves.
    pub fn remove_stock(&mut self, id: &ProductId, amount: i64) -> Result<()> {
        self.inventory.get_mut(id)?.remove_stock(amount)?;
        self.persist()
    }

    /// Removes every product and saves.
    pub fn clear(&mut self) -> Result<()> {
        self.inventory.clear();
        self.persist()
    }

    /// Writes the current catalog to another file in the same format.
    ///
    /// Returns the number of records written.
    pub fn export_to(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let count = InventoryFile::new(path).save(self.inventory.iter())?;
        info!(path = %path.display(), count, "Exported inventory");
        Ok(count)
    }

    /// Replaces the catalog with the records of another file, then saves.
    ///
    /// Unlike [`load`](Self::load), a missing source file is an error.
    pub fn import_from(&mut self, path: impl AsRef<Path>) -> Result<LoadReport> {
        let source = InventoryFile::new(path.as_ref());
        if !source.exists() {
            return Err(InventoryError::Storage(PersistenceError::ReadError {
                path: source.path().to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }));
        }

        let report = Self::replace_from(&mut self.inventory, &source)?;
        info!(
            path = %source.path().display(),
            loaded = report.loaded,
            skipped = report.skipped,
            "Imported inventory"
        );
        self.persist()?;
        Ok(report)
    }

    /// Decodes `file` fully before touching `inventory`.
    fn replace_from(inventory: &mut Inventory, file: &InventoryFile) -> Result<LoadReport> {
        let loaded = file.load()?;
        let skipped = loaded.skipped;
        let replacement = Inventory::from_products(loaded.products)?;

        if skipped > 0 {
            warn!(
                path = %file.path().display(),
                skipped,
                "Records with unknown product types were skipped"
            );
        }

        *inventory = replacement;
        Ok(LoadReport {
            loaded: inventory.len(),
            skipped,
        })
    }

    fn persist(&self) -> Result<()> {
        self.file
            .save(self.inventory.iter())
            .map(|_| ())
            .map_err(|e| {
                warn!(path = %self.path().display(), error = %e, "Failed to save inventory");
                InventoryError::Unsaved(e)
            })
    }
}

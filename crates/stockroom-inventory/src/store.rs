//! Inventory - in-memory product catalog keyed by ID.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde_json::{Map, Value};
use stockroom_models::{Product, ProductId, ProductType};
use tracing::debug;

use crate::error::{InventoryError, Result};
use crate::filter::{ProductFilter, ProductSort};

/// Default quantity at or below which a product counts as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

/// In-memory product catalog.
///
/// Keys are unique and always equal the `id` of the product they map to.
/// Insertion order is kept so listings and saved files are stable.
///
/// The inventory is plain single-owner state: wrap it yourself if it must
/// be shared between threads.
#[derive(Debug, Default, Clone)]
pub struct Inventory {
    /// All products by ID.
    products: HashMap<ProductId, Product>,
    /// IDs in insertion order.
    order: Vec<ProductId>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an inventory from products, rejecting duplicate IDs.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Result<Self> {
        let mut inventory = Self::new();
        for product in products {
            inventory.add(product)?;
        }
        Ok(inventory)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.products.contains_key(id)
    }

    /// Iterates over products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.order.iter().filter_map(|id| self.products.get(id))
    }

    /// Adds a product.
    ///
    /// # Errors
    /// Returns [`InventoryError::DuplicateId`] if a product with the same ID
    /// exists; the inventory is unchanged.
    pub fn add(&mut self, product: Product) -> Result<()> {
        let id = product.id().clone();
        if self.products.contains_key(&id) {
            return Err(InventoryError::DuplicateId(id));
        }

        debug!(product_id = %id, name = %product.name(), "Adding product");
        self.order.push(id.clone());
        self.products.insert(id, product);
        Ok(())
    }

    /// Removes a product and returns it.
    pub fn remove(&mut self, id: &ProductId) -> Result<Product> {
        let product = self
            .products
            .remove(id)
            .ok_or_else(|| InventoryError::NotFound(id.clone()))?;
        self.order.retain(|existing| existing != id);

        debug!(product_id = %id, "Removed product");
        Ok(product)
    }

    /// Gets a product by ID.
    pub fn get(&self, id: &ProductId) -> Result<&Product> {
        self.products
            .get(id)
            .ok_or_else(|| InventoryError::NotFound(id.clone()))
    }

    /// Gets a product by ID for in-place mutation.
    pub fn get_mut(&mut self, id: &ProductId) -> Result<&mut Product> {
        self.products
            .get_mut(id)
            .ok_or_else(|| InventoryError::NotFound(id.clone()))
    }

    /// Updates several fields of a product at once.
    ///
    /// The update is all-or-nothing: fields are applied to a copy through
    /// their setters and the copy replaces the stored product only if every
    /// field succeeds.
    ///
    /// # Errors
    /// - [`InventoryError::NotFound`] if no product has this ID
    /// - [`InventoryError::Product`] wrapping `UnknownField` or `Validation`
    ///   for the first failing field; the product is unchanged
    pub fn update(&mut self, id: &ProductId, fields: &Map<String, Value>) -> Result<()> {
        let current = self.get_mut(id)?;
        let mut updated = current.clone();
        for (field, value) in fields {
            updated.set_field(field, value)?;
        }

        debug!(product_id = %id, fields = fields.len(), "Updated product");
        *current = updated;
        Ok(())
    }

    /// Case-insensitive substring search on product names.
    pub fn search_by_name(&self, query: &str) -> Vec<&Product> {
        let query = query.to_lowercase();
        self.iter()
            .filter(|p| p.name().to_lowercase().contains(&query))
            .collect()
    }

    /// Case-insensitive substring search on categories.
    pub fn search_by_category(&self, query: &str) -> Vec<&Product> {
        let query = query.to_lowercase();
        self.iter()
            .filter(|p| p.category().to_lowercase().contains(&query))
            .collect()
    }

    /// Returns products whose quantity is at or below `threshold`.
    pub fn low_stock(&self, threshold: u32) -> Vec<&Product> {
        self.iter().filter(|p| p.quantity() <= threshold).collect()
    }

    /// Sum of every product's stock value.
    pub fn total_value(&self) -> f64 {
        self.iter().map(Product::value).sum()
    }

    /// Number of products per variant. Variants with no products are absent.
    pub fn count_by_type(&self) -> BTreeMap<ProductType, usize> {
        let mut counts = BTreeMap::new();
        for product in self.iter() {
            *counts.entry(product.product_type()).or_insert(0) += 1;
        }
        counts
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> BTreeSet<&str> {
        self.iter().map(Product::category).collect()
    }

    /// Lists products matching `filter`, ordered by `sort`.
    pub fn list(&self, filter: &ProductFilter, sort: ProductSort) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.iter().filter(|p| filter.matches(p)).collect();
        sort.apply(&mut products);
        products
    }

    /// Removes all products.
    pub fn clear(&mut self) {
        self.products.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stockroom_models::{ModelError, ProductBuilder};

    fn physical(name: &str, category: &str, price: f64, quantity: i64) -> Product {
        ProductBuilder::physical(name, category)
            .price(price)
            .quantity(quantity)
            .build()
            .unwrap()
    }

    fn create_test_inventory() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.add(physical("Claw Hammer", "Tools", 12.0, 4)).unwrap();
        inventory.add(physical("Screwdriver Set", "Tools", 20.0, 15)).unwrap();
        inventory
            .add(
                ProductBuilder::digital("Hammer Time (Album)", "Music")
                    .price(9.0)
                    .quantity(0)
                    .build()
                    .unwrap(),
            )
            .unwrap();
        inventory
            .add(
                ProductBuilder::service("Tool Sharpening", "Services")
                    .price(15.0)
                    .quantity(5)
                    .build()
                    .unwrap(),
            )
            .unwrap();
        inventory
    }

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_add_and_get() {
        let mut inventory = Inventory::new();
        let product = physical("Widget", "Tools", 1.0, 1);
        let id = product.id().clone();

        inventory.add(product.clone()).unwrap();

        assert_eq!(inventory.get(&id).unwrap(), &product);
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_add_duplicate_id() {
        let mut inventory = create_test_inventory();
        let product = physical("Widget", "Tools", 1.0, 1);
        inventory.add(product.clone()).unwrap();
        let before = inventory.clone();

        let mut twin = product.clone();
        twin.set_name("Twin").unwrap();
        let err = inventory.add(twin).unwrap_err();

        assert!(matches!(err, InventoryError::DuplicateId(ref id) if id == product.id()));
        assert_eq!(inventory.len(), before.len());
        assert_eq!(inventory.get(product.id()).unwrap().name(), "Widget");
    }

    #[test]
    fn test_from_products_rejects_duplicates() {
        let product = physical("Widget", "Tools", 1.0, 1);
        let result = Inventory::from_products(vec![product.clone(), product]);
        assert!(matches!(result, Err(InventoryError::DuplicateId(_))));
    }

    #[test]
    fn test_remove() {
        let mut inventory = create_test_inventory();
        let id = inventory.iter().next().unwrap().id().clone();

        let removed = inventory.remove(&id).unwrap();

        assert_eq!(removed.id(), &id);
        assert!(!inventory.contains(&id));
        assert_eq!(inventory.len(), 3);
        assert!(matches!(
            inventory.remove(&id),
            Err(InventoryError::NotFound(_))
        ));
    }

    #[test]
    fn test_get_not_found() {
        let inventory = create_test_inventory();
        let missing = ProductId::from("nope");
        assert!(matches!(
            inventory.get(&missing),
            Err(InventoryError::NotFound(ref id)) if id == &missing
        ));
    }

    #[test]
    fn test_get_mut_mutates_in_place() {
        let mut inventory = create_test_inventory();
        let id = inventory.iter().next().unwrap().id().clone();

        inventory.get_mut(&id).unwrap().add_stock(6).unwrap();

        assert_eq!(inventory.get(&id).unwrap().quantity(), 10);
    }

    #[test]
    fn test_update_applies_all_fields() {
        let mut inventory = create_test_inventory();
        let id = inventory.iter().next().unwrap().id().clone();

        inventory
            .update(
                &id,
                &fields(json!({"name": "Ball-peen Hammer", "price": 14.5, "weight": 0.8})),
            )
            .unwrap();

        let product = inventory.get(&id).unwrap();
        assert_eq!(product.name(), "Ball-peen Hammer");
        assert_eq!(product.price(), 14.5);
    }

    #[test]
    fn test_update_negative_price_rejected() {
        let mut inventory = create_test_inventory();
        let id = inventory.iter().next().unwrap().id().clone();

        let err = inventory
            .update(&id, &fields(json!({"price": -1})))
            .unwrap_err();

        assert!(matches!(
            err,
            InventoryError::Product(ModelError::Validation { field: "price", .. })
        ));
        assert_eq!(inventory.get(&id).unwrap().price(), 12.0);
    }

    #[test]
    fn test_update_is_all_or_nothing() {
        let mut inventory = create_test_inventory();
        let id = inventory.iter().next().unwrap().id().clone();
        let before = inventory.get(&id).unwrap().clone();

        // "name" sorts before "quantity" and would succeed on its own
        let err = inventory
            .update(&id, &fields(json!({"name": "Renamed", "quantity": -4})))
            .unwrap_err();

        assert!(matches!(err, InventoryError::Product(ModelError::Validation { .. })));
        assert_eq!(inventory.get(&id).unwrap(), &before);
    }

    #[test]
    fn test_update_unknown_field() {
        let mut inventory = create_test_inventory();
        let id = inventory.iter().next().unwrap().id().clone();

        let err = inventory
            .update(&id, &fields(json!({"download_link": "x"})))
            .unwrap_err();
        assert!(matches!(
            err,
            InventoryError::Product(ModelError::UnknownField { .. })
        ));

        let err = inventory
            .update(&ProductId::from("nope"), &fields(json!({"name": "x"})))
            .unwrap_err();
        assert!(matches!(err, InventoryError::NotFound(_)));
    }

    #[test]
    fn test_search_by_name_case_insensitive() {
        let inventory = create_test_inventory();

        let names: Vec<_> = inventory
            .search_by_name("HAMMER")
            .iter()
            .map(|p| p.name())
            .collect();
        assert_eq!(names, ["Claw Hammer", "Hammer Time (Album)"]);

        assert!(inventory.search_by_name("wrench").is_empty());
    }

    #[test]
    fn test_search_by_category_substring() {
        let inventory = create_test_inventory();

        assert_eq!(inventory.search_by_category("tool").len(), 2);
        assert_eq!(inventory.search_by_category("SERV").len(), 1);
        assert!(inventory.search_by_category("garden").is_empty());
    }

    #[test]
    fn test_low_stock_thresholds() {
        let inventory = create_test_inventory();

        let at = |threshold| {
            let mut q: Vec<u32> = inventory
                .low_stock(threshold)
                .iter()
                .map(|p| p.quantity())
                .collect();
            q.sort();
            q
        };

        assert_eq!(at(0), vec![0]);
        assert_eq!(at(DEFAULT_LOW_STOCK_THRESHOLD), vec![0, 4, 5]);
        assert_eq!(at(u32::MAX), vec![0, 4, 5, 15]);
    }

    #[test]
    fn test_total_value() {
        let inventory = create_test_inventory();
        // 12*4 + 20*15 + 9*0 + 15*5
        assert_eq!(inventory.total_value(), 423.0);
        assert_eq!(Inventory::new().total_value(), 0.0);
    }

    #[test]
    fn test_count_by_type() {
        let inventory = create_test_inventory();
        let counts = inventory.count_by_type();

        assert_eq!(counts.get(&ProductType::Physical), Some(&2));
        assert_eq!(counts.get(&ProductType::Digital), Some(&1));
        assert_eq!(counts.get(&ProductType::Service), Some(&1));
    }

    #[test]
    fn test_categories() {
        let inventory = create_test_inventory();
        let categories: Vec<_> = inventory.categories().into_iter().collect();
        assert_eq!(categories, ["Music", "Services", "Tools"]);
    }

    #[test]
    fn test_list_with_filter_and_sort() {
        let inventory = create_test_inventory();
        let filter = ProductFilter::new().with_category("Tools");

        let listed: Vec<_> = inventory
            .list(&filter, ProductSort::PriceDesc)
            .iter()
            .map(|p| p.name())
            .collect();
        assert_eq!(listed, ["Screwdriver Set", "Claw Hammer"]);
    }

    #[test]
    fn test_iteration_keeps_insertion_order_after_remove() {
        let mut inventory = create_test_inventory();
        let second = inventory.iter().nth(1).unwrap().id().clone();
        inventory.remove(&second).unwrap();

        let names: Vec<_> = inventory.iter().map(|p| p.name()).collect();
        assert_eq!(names, ["Claw Hammer", "Hammer Time (Album)", "Tool Sharpening"]);
    }

    #[test]
    fn test_clear() {
        let mut inventory = create_test_inventory();
        inventory.clear();
        assert!(inventory.is_empty());
        assert_eq!(inventory.iter().count(), 0);
    }
}

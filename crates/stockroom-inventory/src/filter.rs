//! Product filtering and ordering for listings.

use std::cmp::Ordering;

use stockroom_models::{Product, ProductType};

/// Filter criteria for listing products.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Exact category match.
    pub category: Option<String>,
    /// Product variant.
    pub product_type: Option<ProductType>,
}

impl ProductFilter {
    /// Creates a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the category filter.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the product type filter.
    pub fn with_product_type(mut self, product_type: ProductType) -> Self {
        self.product_type = Some(product_type);
        self
    }

    /// Returns true if the product matches this filter.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(ref category) = self.category {
            if product.category() != category {
                return false;
            }
        }

        if let Some(product_type) = self.product_type {
            if product.product_type() != product_type {
                return false;
            }
        }

        true
    }
}

/// Listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// Insertion order.
    #[default]
    Unsorted,
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    QuantityAsc,
    QuantityDesc,
}

impl ProductSort {
    /// Sorts products in place. The sort is stable.
    pub fn apply(&self, products: &mut [&Product]) {
        match self {
            Self::Unsorted => {}
            Self::NameAsc => products.sort_by(|a, b| a.name().cmp(b.name())),
            Self::NameDesc => products.sort_by(|a, b| b.name().cmp(a.name())),
            Self::PriceAsc => products.sort_by(|a, b| cmp_f64(a.price(), b.price())),
            Self::PriceDesc => products.sort_by(|a, b| cmp_f64(b.price(), a.price())),
            Self::QuantityAsc => products.sort_by_key(|p| p.quantity()),
            Self::QuantityDesc => products.sort_by(|a, b| b.quantity().cmp(&a.quantity())),
        }
    }
}

// Prices are validated finite, so partial_cmp never fails.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

//! Builder for products.

use crate::error::Result;
use crate::product::{Dimensions, Product, ProductKind};

/// Builder for creating Product instances with a fluent API.
///
/// Validation is deferred to [`ProductBuilder::build`], which applies the
/// same checks as [`Product::new`].
#[derive(Debug, Clone)]
pub struct ProductBuilder {
    name: String,
    category: String,
    price: f64,
    quantity: i64,
    kind: ProductKind,
}

impl ProductBuilder {
    /// Creates a builder for a physical product with zero weight and size.
    pub fn physical(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self::with_kind(name, category, ProductKind::physical(0.0, Dimensions::default()))
    }

    /// Creates a builder for a digital product with no download link.
    pub fn digital(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self::with_kind(name, category, ProductKind::digital(0.0, ""))
    }

    /// Creates a builder for a service product of unspecified type.
    pub fn service(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self::with_kind(name, category, ProductKind::service(0, ""))
    }

    fn with_kind(name: impl Into<String>, category: impl Into<String>, kind: ProductKind) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price: 0.0,
            quantity: 0,
            kind,
        }
    }

    /// Sets the unit price.
    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Sets the quantity on hand.
    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the weight. Ignored unless the product is physical.
    pub fn weight(mut self, weight: f64) -> Self {
        if let ProductKind::Physical(p) = &mut self.kind {
            p.weight = weight;
        }
        self
    }

    /// Sets the dimensions. Ignored unless the product is physical.
    pub fn dimensions(mut self, dimensions: Dimensions) -> Self {
        if let ProductKind::Physical(p) = &mut self.kind {
            p.dimensions = dimensions;
        }
        self
    }

    /// Sets the file size. Ignored unless the product is digital.
    pub fn file_size(mut self, file_size: f64) -> Self {
        if let ProductKind::Digital(d) = &mut self.kind {
            d.file_size = file_size;
        }
        self
    }

    /// Sets the download link. Ignored unless the product is digital.
    pub fn download_link(mut self, link: impl Into<String>) -> Self {
        if let ProductKind::Digital(d) = &mut self.kind {
            d.download_link = link.into();
        }
        self
    }

    /// Sets the duration in minutes. Ignored unless the product is a service.
    pub fn duration(mut self, duration: u32) -> Self {
        if let ProductKind::Service(s) = &mut self.kind {
            s.duration = duration;
        }
        self
    }

    /// Sets the service type. Ignored unless the product is a service.
    pub fn service_type(mut self, service_type: impl Into<String>) -> Self {
        if let ProductKind::Service(s) = &mut self.kind {
            s.service_type = service_type.into();
        }
        self
    }

    /// Builds the product, assigning a fresh ID and timestamps.
    pub fn build(self) -> Result<Product> {
        Product::new(self.name, self.price, self.quantity, self.category, self.kind)
    }
}

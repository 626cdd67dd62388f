//! Product types for Stockroom.
//!
//! A product is a shared base record plus a variant-specific payload
//! ([`ProductKind`]). Fields are private; every change goes through a
//! validating setter which refreshes `updated_at` on success and leaves the
//! product untouched on failure.
//!
//! # Persisted shape
//!
//! Products serialize to a flat JSON object whose `type` key selects the
//! variant:
//!
//! ```text
//! { "id": "...", "name": "Widget", "price": 9.99, "quantity": 10,
//!   "category": "Tools", "created_at": "...", "updated_at": "...",
//!   "type": "PhysicalProduct", "weight": 1.5,
//!   "dimensions": { "length": 2.0, "width": 2.0, "height": 2.0 } }
//! ```

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{ModelError, Result};
use crate::ids::ProductId;
use crate::timestamp;

/// Fields every product variant can update.
const BASE_FIELDS: [&str; 4] = ["name", "price", "quantity", "category"];

/// Discriminant identifying a product variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductType {
    /// Tangible goods with weight and dimensions.
    #[serde(rename = "PhysicalProduct")]
    Physical,
    /// Downloadable goods.
    #[serde(rename = "DigitalProduct")]
    Digital,
    /// Services sold by duration.
    #[serde(rename = "ServiceProduct")]
    Service,
}

impl ProductType {
    /// All variants, in display order.
    pub const ALL: [ProductType; 3] = [Self::Physical, Self::Digital, Self::Service];

    /// Returns the tag stored in the `type` field of persisted records.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Physical => "PhysicalProduct",
            Self::Digital => "DigitalProduct",
            Self::Service => "ServiceProduct",
        }
    }

    /// Looks up a variant by its persisted tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    /// Returns the human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Physical => "Physical Product",
            Self::Digital => "Digital Product",
            Self::Service => "Service Product",
        }
    }

    /// Returns the variant-specific settable fields.
    pub fn variant_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Physical => &["weight", "dimensions"],
            Self::Digital => &["file_size", "download_link"],
            Self::Service => &["duration", "service_type"],
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ProductType {
    type Err = ModelError;

    /// Accepts the persisted tag or a short lowercase name ("physical").
    fn from_str(s: &str) -> Result<Self> {
        if let Some(t) = Self::from_tag(s) {
            return Ok(t);
        }
        match s.to_ascii_lowercase().as_str() {
            "physical" => Ok(Self::Physical),
            "digital" => Ok(Self::Digital),
            "service" => Ok(Self::Service),
            _ => Err(ModelError::UnknownProductType(s.to_string())),
        }
    }
}

/// Box dimensions of a physical product, in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    /// Creates dimensions from length, width and height.
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    fn validate(&self) -> Result<()> {
        for side in [self.length, self.width, self.height] {
            non_negative("dimensions", side)?;
        }
        Ok(())
    }
}

/// Payload of a physical product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalDetails {
    /// Weight in kilograms.
    pub weight: f64,
    pub dimensions: Dimensions,
}

/// Payload of a digital product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DigitalDetails {
    /// File size in megabytes.
    pub file_size: f64,
    /// May be empty.
    pub download_link: String,
}

/// Payload of a service product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceDetails {
    /// Duration in minutes.
    pub duration: u32,
    /// May be empty.
    pub service_type: String,
}

/// Variant-specific part of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProductKind {
    #[serde(rename = "PhysicalProduct")]
    Physical(PhysicalDetails),
    #[serde(rename = "DigitalProduct")]
    Digital(DigitalDetails),
    #[serde(rename = "ServiceProduct")]
    Service(ServiceDetails),
}

impl ProductKind {
    /// Creates a physical payload.
    pub fn physical(weight: f64, dimensions: Dimensions) -> Self {
        Self::Physical(PhysicalDetails { weight, dimensions })
    }

    /// Creates a digital payload.
    pub fn digital(file_size: f64, download_link: impl Into<String>) -> Self {
        Self::Digital(DigitalDetails {
            file_size,
            download_link: download_link.into(),
        })
    }

    /// Creates a service payload.
    pub fn service(duration: u32, service_type: impl Into<String>) -> Self {
        Self::Service(ServiceDetails {
            duration,
            service_type: service_type.into(),
        })
    }

    /// Returns the discriminant of this payload.
    pub fn product_type(&self) -> ProductType {
        match self {
            Self::Physical(_) => ProductType::Physical,
            Self::Digital(_) => ProductType::Digital,
            Self::Service(_) => ProductType::Service,
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Self::Physical(p) => {
                non_negative("weight", p.weight)?;
                p.dimensions.validate()
            }
            Self::Digital(d) => non_negative("file_size", d.file_size).map(|_| ()),
            Self::Service(_) => Ok(()),
        }
    }
}

/// Labeled, human-readable fields of a product, in display order.
pub type DisplayDetails = Vec<(&'static str, String)>;

/// A product held in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: f64,
    quantity: u32,
    category: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(flatten)]
    kind: ProductKind,
}

/// Unvalidated wire form of [`Product`].
#[derive(Deserialize)]
struct ProductRecord {
    id: ProductId,
    name: String,
    price: f64,
    quantity: u32,
    category: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    created_at: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    updated_at: DateTime<Utc>,
    #[serde(flatten)]
    kind: ProductKind,
}

impl ProductRecord {
    fn into_product(self) -> Result<Product> {
        if self.id.as_str().trim().is_empty() {
            return Err(ModelError::validation("id", "cannot be empty"));
        }
        non_blank("name", &self.name)?;
        non_blank("category", &self.category)?;
        non_negative("price", self.price)?;
        self.kind.validate()?;

        Ok(Product {
            id: self.id,
            name: self.name,
            price: self.price,
            quantity: self.quantity,
            category: self.category,
            created_at: self.created_at,
            updated_at: self.updated_at,
            kind: self.kind,
        })
    }
}

impl<'de> Deserialize<'de> for Product {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        ProductRecord::deserialize(deserializer)?
            .into_product()
            .map_err(de::Error::custom)
    }
}

impl Product {
    /// Creates a new product with a fresh ID.
    ///
    /// # Errors
    /// Returns [`ModelError::Validation`] if the name or category is blank or
    /// any numeric field is negative or not finite.
    pub fn new(
        name: impl Into<String>,
        price: f64,
        quantity: i64,
        category: impl Into<String>,
        kind: ProductKind,
    ) -> Result<Self> {
        let name = name.into();
        let category = category.into();
        non_blank("name", &name)?;
        non_blank("category", &category)?;
        let price = non_negative("price", price)?;
        let quantity = count("quantity", quantity)?;
        kind.validate()?;

        let now = Utc::now();
        Ok(Self {
            id: ProductId::new(),
            name,
            price,
            quantity,
            category,
            created_at: now,
            updated_at: now,
            kind,
        })
    }

    /// Rebuilds a product from a persisted record, keeping its ID and
    /// timestamps.
    ///
    /// # Errors
    /// - [`ModelError::UnknownProductType`] if the `type` tag is missing, not
    ///   a string, or names no variant
    /// - [`ModelError::MalformedRecord`] if fields are missing or invalid
    pub fn from_record(record: &Value) -> Result<Self> {
        match record.get("type") {
            Some(Value::String(tag)) if ProductType::from_tag(tag).is_some() => {}
            Some(Value::String(tag)) => return Err(ModelError::UnknownProductType(tag.clone())),
            None | Some(Value::Null) => {
                return Err(ModelError::UnknownProductType("<missing>".to_string()))
            }
            Some(other) => return Err(ModelError::UnknownProductType(other.to_string())),
        }

        Product::deserialize(record).map_err(|e| ModelError::MalformedRecord(e.to_string()))
    }

    /// Serializes the product to its persisted record.
    pub fn to_record(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    pub fn product_type(&self) -> ProductType {
        self.kind.product_type()
    }

    /// Stock value: price × quantity.
    pub fn value(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Returns every field name accepted by [`Product::set_field`].
    pub fn settable_fields(&self) -> Vec<&'static str> {
        BASE_FIELDS
            .iter()
            .chain(self.product_type().variant_fields())
            .copied()
            .collect()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        non_blank("name", &name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    pub fn set_price(&mut self, price: f64) -> Result<()> {
        self.price = non_negative("price", price)?;
        self.touch();
        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: i64) -> Result<()> {
        self.quantity = count("quantity", quantity)?;
        self.touch();
        Ok(())
    }

    pub fn set_category(&mut self, category: impl Into<String>) -> Result<()> {
        let category = category.into();
        non_blank("category", &category)?;
        self.category = category;
        self.touch();
        Ok(())
    }

    /// Sets the weight of a physical product.
    pub fn set_weight(&mut self, weight: f64) -> Result<()> {
        let weight = non_negative("weight", weight)?;
        self.physical_mut("weight")?.weight = weight;
        self.touch();
        Ok(())
    }

    /// Sets the dimensions of a physical product.
    pub fn set_dimensions(&mut self, dimensions: Dimensions) -> Result<()> {
        dimensions.validate()?;
        self.physical_mut("dimensions")?.dimensions = dimensions;
        self.touch();
        Ok(())
    }

    /// Sets the file size of a digital product.
    pub fn set_file_size(&mut self, file_size: f64) -> Result<()> {
        let file_size = non_negative("file_size", file_size)?;
        self.digital_mut("file_size")?.file_size = file_size;
        self.touch();
        Ok(())
    }

    /// Sets the download link of a digital product. Empty is allowed.
    pub fn set_download_link(&mut self, link: impl Into<String>) -> Result<()> {
        self.digital_mut("download_link")?.download_link = link.into();
        self.touch();
        Ok(())
    }

    /// Sets the duration of a service product, in minutes.
    pub fn set_duration(&mut self, duration: i64) -> Result<()> {
        let duration = count("duration", duration)?;
        self.service_mut("duration")?.duration = duration;
        self.touch();
        Ok(())
    }

    /// Sets the service type of a service product. Empty is allowed.
    pub fn set_service_type(&mut self, service_type: impl Into<String>) -> Result<()> {
        self.service_mut("service_type")?.service_type = service_type.into();
        self.touch();
        Ok(())
    }

    /// Sets a field by name from a JSON value.
    ///
    /// # Errors
    /// - [`ModelError::UnknownField`] if this product has no such field
    /// - [`ModelError::Validation`] if the value has the wrong JSON type or
    ///   violates the field invariant
    pub fn set_field(&mut self, field: &str, value: &Value) -> Result<()> {
        match field {
            "name" => self.set_name(expect_text("name", value)?),
            "price" => self.set_price(expect_f64("price", value)?),
            "quantity" => self.set_quantity(expect_i64("quantity", value)?),
            "category" => self.set_category(expect_text("category", value)?),
            "weight" => {
                self.physical_mut("weight")?;
                self.set_weight(expect_f64("weight", value)?)
            }
            "dimensions" => {
                self.physical_mut("dimensions")?;
                let dimensions = Dimensions::deserialize(value).map_err(|_| {
                    ModelError::validation(
                        "dimensions",
                        "must be an object with numeric length, width and height",
                    )
                })?;
                self.set_dimensions(dimensions)
            }
            "file_size" => {
                self.digital_mut("file_size")?;
                self.set_file_size(expect_f64("file_size", value)?)
            }
            "download_link" => self.set_download_link(expect_text("download_link", value)?),
            "duration" => {
                self.service_mut("duration")?;
                self.set_duration(expect_i64("duration", value)?)
            }
            "service_type" => self.set_service_type(expect_text("service_type", value)?),
            _ => Err(self.unknown_field(field)),
        }
    }

    /// Adds stock.
    pub fn add_stock(&mut self, amount: i64) -> Result<()> {
        let amount = count("amount", amount)?;
        self.quantity = self
            .quantity
            .checked_add(amount)
            .ok_or_else(|| ModelError::validation("quantity", "would overflow"))?;
        self.touch();
        Ok(())
    }

    /// Removes stock.
    ///
    /// # Errors
    /// Returns [`ModelError::InsufficientStock`] if `amount` exceeds the
    /// current quantity; the quantity is left unchanged.
    pub fn remove_stock(&mut self, amount: i64) -> Result<()> {
        let amount = count("amount", amount)?;
        if amount > self.quantity {
            return Err(ModelError::InsufficientStock {
                available: self.quantity,
                requested: amount,
            });
        }
        self.quantity -= amount;
        self.touch();
        Ok(())
    }

    /// Returns labeled, human-readable fields for display.
    pub fn display_details(&self) -> DisplayDetails {
        let mut details = vec![
            ("id", self.id.to_string()),
            ("name", self.name.clone()),
            ("price", format!("${:.2}", self.price)),
            ("quantity", self.quantity.to_string()),
            ("category", self.category.clone()),
            ("value", format!("${:.2}", self.value())),
            ("type", self.product_type().label().to_string()),
        ];

        match &self.kind {
            ProductKind::Physical(p) => {
                details.push(("weight", format!("{:?} kg", p.weight)));
                let d = p.dimensions;
                details.push((
                    "dimensions",
                    format!("{:?}×{:?}×{:?} cm", d.length, d.width, d.height),
                ));
            }
            ProductKind::Digital(d) => {
                details.push(("file_size", format!("{:?} MB", d.file_size)));
                let link = if d.download_link.is_empty() {
                    "No link provided".to_string()
                } else {
                    d.download_link.clone()
                };
                details.push(("download_link", link));
            }
            ProductKind::Service(s) => {
                details.push(("duration", format!("{} minutes", s.duration)));
                let service_type = if s.service_type.is_empty() {
                    "Standard".to_string()
                } else {
                    s.service_type.clone()
                };
                details.push(("service_type", service_type));
            }
        }

        details
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn unknown_field(&self, field: &str) -> ModelError {
        ModelError::UnknownField {
            field: field.to_string(),
            product_type: self.product_type().tag().to_string(),
        }
    }

    fn physical_mut(&mut self, field: &str) -> Result<&mut PhysicalDetails> {
        let err = self.unknown_field(field);
        match &mut self.kind {
            ProductKind::Physical(p) => Ok(p),
            _ => Err(err),
        }
    }

    fn digital_mut(&mut self, field: &str) -> Result<&mut DigitalDetails> {
        let err = self.unknown_field(field);
        match &mut self.kind {
            ProductKind::Digital(d) => Ok(d),
            _ => Err(err),
        }
    }

    fn service_mut(&mut self, field: &str) -> Result<&mut ServiceDetails> {
        let err = self.unknown_field(field);
        match &mut self.kind {
            ProductKind::Service(s) => Ok(s),
            _ => Err(err),
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (ID: {}) - ${:.2} - Qty: {}",
            self.name, self.id, self.price, self.quantity
        )
    }
}

fn non_blank(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ModelError::validation(field, "cannot be empty"));
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(ModelError::validation(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(ModelError::validation(field, "cannot be negative"));
    }
    Ok(value)
}

fn count(field: &'static str, value: i64) -> Result<u32> {
    if value < 0 {
        return Err(ModelError::validation(field, "cannot be negative"));
    }
    u32::try_from(value)
        .map_err(|_| ModelError::validation(field, format!("cannot exceed {}", u32::MAX)))
}

/// Text fields also take numbers and booleans, stored as their literal text.
fn expect_text(field: &'static str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ModelError::validation(field, "expected a string")),
    }
}

fn expect_f64(field: &'static str, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| ModelError::validation(field, "expected a number"))
}

fn expect_i64(field: &'static str, value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| ModelError::validation(field, "expected an integer"))
}

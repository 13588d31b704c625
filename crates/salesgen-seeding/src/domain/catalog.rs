//! Product catalog and store locations.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use salesgen_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// One sellable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductEntry {
    /// Product name.
    pub name: String,
    /// Category the product belongs to.
    pub category: String,
    /// List price; generated unit prices vary up to 20% either side of it.
    pub base_price: Decimal,
}

impl ProductEntry {
    /// Creates a new product entry.
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>, base_price: Decimal) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            base_price,
        }
    }

    /// Whole-cent bounds of the unit price, `[ceil(base * 0.8), floor(base * 1.2)]`.
    pub(crate) fn price_band(&self) -> Option<PriceBand> {
        let min_cents = (self.base_price * Decimal::from(80)).ceil().to_u32()?;
        let max_cents = (self.base_price * Decimal::from(120)).floor().to_u32()?;
        (min_cents <= max_cents).then_some(PriceBand {
            min_cents,
            max_cents,
        })
    }
}

/// Unit price range of a product, in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PriceBand {
    pub min_cents: u32,
    pub max_cents: u32,
}

/// Immutable product and location data the generator draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<ProductEntry>,
    locations: Vec<String>,
}

impl Catalog {
    /// Creates a validated catalog.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if there are no products or no
    /// locations, or if a base price is not positive or cannot be priced in
    /// whole cents.
    pub fn new(products: Vec<ProductEntry>, locations: Vec<String>) -> Result<Self, DomainError> {
        if products.is_empty() {
            return Err(DomainError::Validation(
                "catalog must contain at least one product".to_owned(),
            ));
        }
        if locations.is_empty() {
            return Err(DomainError::Validation(
                "catalog must contain at least one location".to_owned(),
            ));
        }
        for product in &products {
            if product.base_price <= Decimal::ZERO {
                return Err(DomainError::Validation(format!(
                    "base price of {} must be positive",
                    product.name
                )));
            }
            if product.price_band().is_none() {
                return Err(DomainError::Validation(format!(
                    "base price of {} cannot be priced in whole cents",
                    product.name
                )));
            }
        }

        Ok(Self {
            products,
            locations,
        })
    }

    /// The products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[ProductEntry] {
        &self.products
    }

    /// The location names, in catalog order.
    #[must_use]
    pub fn locations(&self) -> &[String] {
        &self.locations
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let products = vec![
            ProductEntry::new("Laptop", "Electronics", Decimal::from(999)),
            ProductEntry::new("Smartphone", "Electronics", Decimal::from(699)),
            ProductEntry::new("Headphones", "Electronics", Decimal::from(199)),
            ProductEntry::new("T-Shirt", "Clothing", Decimal::from(29)),
            ProductEntry::new("Jeans", "Clothing", Decimal::from(79)),
            ProductEntry::new("Sneakers", "Footwear", Decimal::from(89)),
        ];
        let locations = ["New York", "Los Angeles", "Chicago", "Houston", "Phoenix"]
            .into_iter()
            .map(str::to_owned)
            .collect();

        Self {
            products,
            locations,
        }
    }
}

//! # In-Memory Stores
//!
//! `CatalogLookup` and `PromotionLookup` backed by a `HashMap`.
//!
//! Used by tests, demos, and any deployment that loads its catalog at
//! startup. Inserts are validated the same way the SQLite repositories
//! validate them.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::error::{LookupError, ValidationError};
use crate::lookup::{CatalogLookup, PromotionLookup};
use crate::money::Money;
use crate::types::{Coupon, Dimensions, Product};
use crate::validation::{self, ValidationResult};

fn poisoned(store: &str) -> LookupError {
    LookupError::unavailable(store, "lock poisoned")
}

// =============================================================================
// Catalog
// =============================================================================

/// Products keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<String, Product>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a list of products.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> ValidationResult<Self> {
        let catalog = Self::new();
        for product in products {
            catalog.insert(product)?;
        }
        Ok(catalog)
    }

    /// Adds a product. Fails if it is malformed or its id is taken.
    pub fn insert(&self, product: Product) -> ValidationResult<()> {
        validation::validate_product(&product)?;

        let mut products = self.products.write().map_err(|_| ValidationError::InvalidFormat {
            field: "catalog".to_string(),
            reason: "lock poisoned".to_string(),
        })?;

        if products.contains_key(&product.id) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: product.id,
            });
        }

        products.insert(product.id.clone(), product);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.products.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CatalogLookup for InMemoryCatalog {
    async fn get_by_id(&self, id: &str) -> Result<Option<Product>, LookupError> {
        let products = self.products.read().map_err(|_| poisoned("catalog"))?;
        Ok(products.get(id).cloned())
    }
}

// =============================================================================
// Promotions
// =============================================================================

/// Coupons keyed by code.
#[derive(Debug, Default)]
pub struct InMemoryPromotions {
    coupons: RwLock<HashMap<String, Coupon>>,
}

impl InMemoryPromotions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a promotion store from a list of coupons.
    pub fn with_coupons(coupons: impl IntoIterator<Item = Coupon>) -> ValidationResult<Self> {
        let promotions = Self::new();
        for coupon in coupons {
            promotions.insert(coupon)?;
        }
        Ok(promotions)
    }

    /// Adds a coupon. Fails if it is malformed or its code is taken.
    pub fn insert(&self, coupon: Coupon) -> ValidationResult<()> {
        validation::validate_coupon(&coupon)?;

        let mut coupons = self.coupons.write().map_err(|_| ValidationError::InvalidFormat {
            field: "promotions".to_string(),
            reason: "lock poisoned".to_string(),
        })?;

        if coupons.contains_key(&coupon.code) {
            return Err(ValidationError::Duplicate {
                field: "coupon code".to_string(),
                value: coupon.code,
            });
        }

        coupons.insert(coupon.code.clone(), coupon);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.coupons.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PromotionLookup for InMemoryPromotions {
    async fn get_by_code(&self, code: &str) -> Result<Option<Coupon>, LookupError> {
        let coupons = self.coupons.read().map_err(|_| poisoned("promotions"))?;
        Ok(coupons.get(code).cloned())
    }
}

// =============================================================================
// Demo Data
// =============================================================================

/// The two-product demo catalog loaded by `till-seed` and the test suites.
pub fn demo_products() -> Vec<Product> {
    vec![
        Product {
            id: "product_1".to_string(),
            description: "Product A".to_string(),
            unit_price: Money::new(10.0),
            dimensions: Dimensions::new(20.0, 15.0, 10.0),
            weight: 1.0,
        },
        Product {
            id: "product_2".to_string(),
            description: "Product B".to_string(),
            unit_price: Money::new(15.0),
            dimensions: Dimensions::new(100.0, 30.0, 10.0),
            weight: 3.0,
        },
    ]
}

/// Demo coupons: `10OFF` (valid until 2024-04-11) and `expired_coupon`.
pub fn demo_coupons() -> Vec<Coupon> {
    vec![
        Coupon {
            code: "10OFF".to_string(),
            percentage: 10,
            expires_at: Utc.with_ymd_and_hms(2024, 4, 11, 0, 0, 0).single().unwrap_or_default(),
        },
        Coupon {
            code: "expired_coupon".to_string(),
            percentage: 1,
            expires_at: Utc.with_ymd_and_hms(2023, 11, 10, 0, 0, 0).single().unwrap_or_default(),
        },
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            description: "Product A".to_string(),
            unit_price: Money::new(10.0),
            dimensions: Dimensions::new(20.0, 15.0, 10.0),
            weight: 1.0,
        }
    }

    #[tokio::test]
    async fn test_catalog_lookup() {
        let catalog = InMemoryCatalog::with_products([product("product_1")]).unwrap();
        assert_eq!(catalog.len(), 1);

        let found = catalog.get_by_id("product_1").await.unwrap();
        assert_eq!(found.map(|p| p.id), Some("product_1".to_string()));
        assert!(catalog.get_by_id("missing").await.unwrap().is_none());
    }

    #[test]
    fn test_catalog_rejects_duplicates_and_bad_products() {
        let catalog = InMemoryCatalog::new();
        assert!(catalog.is_empty());
        catalog.insert(product("product_1")).unwrap();
        assert!(matches!(
            catalog.insert(product("product_1")),
            Err(ValidationError::Duplicate { .. })
        ));

        let mut flat = product("flat");
        flat.dimensions.depth = 0.0;
        assert!(catalog.insert(flat).is_err());
    }

    #[tokio::test]
    async fn test_promotions_lookup() {
        let coupon = Coupon {
            code: "10OFF".to_string(),
            percentage: 10,
            expires_at: Utc.with_ymd_and_hms(2024, 4, 11, 0, 0, 0).unwrap(),
        };
        let promotions = InMemoryPromotions::with_coupons([coupon.clone()]).unwrap();

        assert_eq!(promotions.get_by_code("10OFF").await.unwrap(), Some(coupon));
        assert!(promotions.get_by_code("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_demo_data_loads() {
        let catalog = InMemoryCatalog::with_products(demo_products()).unwrap();
        let promotions = InMemoryPromotions::with_coupons(demo_coupons()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(promotions.len(), 2);

        let product_2 = catalog.get_by_id("product_2").await.unwrap().unwrap();
        assert_eq!(product_2.unit_price, Money::new(15.0));
    }

    #[test]
    fn test_promotions_reject_out_of_range_percentage() {
        let promotions = InMemoryPromotions::new();
        let coupon = Coupon {
            code: "TOOMUCH".to_string(),
            percentage: 101,
            expires_at: Utc::now(),
        };
        assert!(promotions.insert(coupon).is_err());
        assert!(promotions.is_empty());
    }
}

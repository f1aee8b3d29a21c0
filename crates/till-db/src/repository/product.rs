//! # Product Repository
//!
//! Database operations for catalog products.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use till_core::validation::validate_product;
use till_core::{CatalogLookup, Dimensions, LookupError, Money, Product};

use crate::error::{DbError, DbResult};

/// One row of the `products` table.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: String,
    description: String,
    unit_price: f64,
    height: f64,
    width: f64,
    depth: f64,
    weight: f64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            description: row.description,
            unit_price: Money::new(row.unit_price),
            dimensions: Dimensions::new(row.height, row.width, row.depth),
            weight: row.weight,
        }
    }
}

const SELECT_PRODUCT: &str = r#"
    SELECT id, description, unit_price, height, width, depth, weight
    FROM products
"#;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
/// let product = repo.get_by_id("product_1").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_PRODUCT} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(())` - Inserted
    /// * `Err(DbError::Validation)` - Product failed validation
    /// * `Err(DbError::UniqueViolation)` - ID already exists
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        validate_product(product)?;

        debug!(id = %product.id, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, description, unit_price,
                height, width, depth, weight, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&product.id)
        .bind(&product.description)
        .bind(product.unit_price.amount())
        .bind(product.dimensions.height)
        .bind(product.dimensions.width)
        .bind(product.dimensions.depth)
        .bind(product.weight)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("product id", &product.id),
            other => other,
        })?;

        Ok(())
    }

    /// Lists every product, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_PRODUCT} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl CatalogLookup for ProductRepository {
    async fn get_by_id(&self, id: &str) -> Result<Option<Product>, LookupError> {
        Ok(ProductRepository::get_by_id(self, id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use till_core::memory::demo_products;

    async fn repo() -> ProductRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.products()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = repo().await;
        for product in demo_products() {
            repo.insert(&product).await.unwrap();
        }

        let product = repo.get_by_id("product_2").await.unwrap().unwrap();
        assert_eq!(product, demo_products()[1]);
        assert!(repo.get_by_id("product_9").await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_fractional_values_round_trip_exactly() {
        let repo = repo().await;
        let product = Product {
            id: "loose".to_string(),
            description: "Sold by weight".to_string(),
            unit_price: Money::new(0.15),
            dimensions: Dimensions::new(12.5, 3.3, 9.1),
            weight: 0.12345,
        };
        repo.insert(&product).await.unwrap();

        let stored = repo.get_by_id("loose").await.unwrap().unwrap();
        assert_eq!(stored.unit_price.amount().to_bits(), 0.15f64.to_bits());
        assert_eq!(stored, product);
    }

    #[tokio::test]
    async fn test_duplicate_insert() {
        let repo = repo().await;
        let product = &demo_products()[0];
        repo.insert(product).await.unwrap();

        let err = repo.insert(product).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref value, .. } if value == "product_1"));
    }

    #[tokio::test]
    async fn test_invalid_product_is_rejected() {
        let repo = repo().await;
        let mut product = demo_products()[0].clone();
        product.dimensions.width = 0.0;

        let err = repo.insert(&product).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_is_ordered() {
        let repo = repo().await;
        for product in demo_products().into_iter().rev() {
            repo.insert(&product).await.unwrap();
        }

        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["product_1", "product_2"]);
    }

    #[tokio::test]
    async fn test_catalog_lookup_trait() {
        let repo = repo().await;
        repo.insert(&demo_products()[0]).await.unwrap();

        let catalog: &dyn CatalogLookup = &repo;
        assert!(catalog.get_by_id("product_1").await.unwrap().is_some());
        assert!(catalog.get_by_id("nope").await.unwrap().is_none());
    }
}

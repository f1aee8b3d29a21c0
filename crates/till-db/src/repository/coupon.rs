//! # Coupon Repository
//!
//! Database operations for discount coupons.
//!
//! `percentage` is stored as INTEGER; a value outside 0-100 that slipped
//! past the CHECK constraint surfaces as `DbError::Corrupt`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use till_core::validation::validate_coupon;
use till_core::{Coupon, LookupError, PromotionLookup};

use crate::error::{DbError, DbResult};

#[derive(Debug, FromRow)]
struct CouponRow {
    code: String,
    percentage: i64,
    expires_at: DateTime<Utc>,
}

impl TryFrom<CouponRow> for Coupon {
    type Error = DbError;

    fn try_from(row: CouponRow) -> DbResult<Self> {
        let percentage = u32::try_from(row.percentage)
            .ok()
            .filter(|p| *p <= 100)
            .ok_or_else(|| {
                DbError::corrupt(
                    "coupon",
                    &row.code,
                    format!("percentage {} out of range", row.percentage),
                )
            })?;

        Ok(Coupon {
            code: row.code,
            percentage,
            expires_at: row.expires_at,
        })
    }
}

/// Repository for coupon database operations.
#[derive(Debug, Clone)]
pub struct CouponRepository {
    pool: SqlitePool,
}

impl CouponRepository {
    /// Creates a new CouponRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CouponRepository { pool }
    }

    /// Gets a coupon by its code. Codes are case-sensitive.
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Coupon>> {
        let row = sqlx::query_as::<_, CouponRow>(
            "SELECT code, percentage, expires_at FROM coupons WHERE code = ?1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Coupon::try_from).transpose()
    }

    /// Inserts a new coupon.
    ///
    /// ## Returns
    /// * `Err(DbError::Validation)` - Coupon failed validation
    /// * `Err(DbError::UniqueViolation)` - Code already exists
    pub async fn insert(&self, coupon: &Coupon) -> DbResult<()> {
        validate_coupon(coupon)?;

        debug!(code = %coupon.code, "Inserting coupon");

        sqlx::query(
            r#"
            INSERT INTO coupons (code, percentage, expires_at, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&coupon.code)
        .bind(i64::from(coupon.percentage))
        .bind(coupon.expires_at)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("coupon code", &coupon.code),
            other => other,
        })?;

        Ok(())
    }

    /// Counts total coupons (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM coupons")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl PromotionLookup for CouponRepository {
    async fn get_by_code(&self, code: &str) -> Result<Option<Coupon>, LookupError> {
        Ok(CouponRepository::get_by_code(self, code).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

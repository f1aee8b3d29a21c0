//! # Collaborator Traits
//!
//! Everything the checkout engine needs from the outside world.
//!
//! ## Seams
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CheckoutEngine                                  │
//! │                                                                         │
//! │   CatalogLookup        PromotionLookup      Clock       OrderCodeGen    │
//! │   get_by_id(id)        get_by_code(code)    now()       next_code(now)  │
//! │        │                     │                │              │          │
//! └────────┼─────────────────────┼────────────────┼──────────────┼──────────┘
//!          ▼                     ▼                ▼              ▼
//!   ProductRepository     CouponRepository    SystemClock   YearSequenceCodes
//!   InMemoryCatalog       InMemoryPromotions  FixedClock    UuidOrderCodes
//! ```
//!
//! Lookups return `Ok(None)` for "not found"; `Err` is reserved for a store
//! that could not answer at all.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

use crate::error::LookupError;
use crate::types::{Coupon, Product};

// =============================================================================
// Store Lookups
// =============================================================================

/// Resolves product ids to catalog entries.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn get_by_id(&self, id: &str) -> Result<Option<Product>, LookupError>;
}

/// Resolves coupon codes to their discount terms.
#[async_trait]
pub trait PromotionLookup: Send + Sync {
    async fn get_by_code(&self, code: &str) -> Result<Option<Coupon>, LookupError>;
}

// =============================================================================
// Clock
// =============================================================================

/// Source of "now" for coupon expiry and order codes.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one instant. Used by tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// =============================================================================
// Order Codes
// =============================================================================

/// Hands out the `order_code` of a checkout result.
pub trait OrderCodeGenerator: Send + Sync {
    fn next_code(&self, now: DateTime<Utc>) -> String;
}

/// Fixed suffix appended to the year by [`YearSequenceCodes`].
pub const YEAR_SEQUENCE_SUFFIX: &str = "0000001";

/// `<year>0000001` for every order placed in a given year.
///
/// This is not a real sequence: two orders in the same year get the same
/// code. It is the default because existing clients expect the format.
#[derive(Debug, Clone, Copy, Default)]
pub struct YearSequenceCodes;

impl OrderCodeGenerator for YearSequenceCodes {
    fn next_code(&self, now: DateTime<Utc>) -> String {
        format!("{}{}", now.year(), YEAR_SEQUENCE_SUFFIX)
    }
}

/// A random UUID v4 per order.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidOrderCodes;

impl OrderCodeGenerator for UuidOrderCodes {
    fn next_code(&self, _now: DateTime<Utc>) -> String {
        Uuid::new_v4().to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_year_sequence_code() {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(YearSequenceCodes.next_code(now), "20240000001");
        assert_eq!(YearSequenceCodes.next_code(now), "20240000001");
    }

    #[test]
    fn test_uuid_codes_are_unique() {
        let now = Utc::now();
        let a = UuidOrderCodes.next_code(now);
        let b = UuidOrderCodes.next_code(now);
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn test_fixed_clock() {
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 12, 30, 0).unwrap();
        assert_eq!(FixedClock(at).now(), at);
    }
}

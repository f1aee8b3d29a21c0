//! # Money Module
//!
//! Provides the `Money` type for prices, freight and totals.
//!
//! ## Why f64?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FIGURES ALREADY QUOTED TO CUSTOMERS                                    │
//! │                                                                         │
//! │  Existing totals were produced with IEEE-754 doubles and no rounding:  │
//! │    freight  = 1000 × volume × (density / 100) × qty                     │
//! │    discount = subtotal × (percentage / 100)                             │
//! │                                                                         │
//! │  Cents would round 10.135 to 10.13 and 123.45000000000002 to 123.45.    │
//! │  Money therefore carries the exact double, in whole currency units,    │
//! │  and every operation below is a single f64 operation in that order.    │
//! │  Presentation (2 decimals, currency symbol) is the caller's business.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::money::Money;
//!
//! let price = Money::new(10.0);
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.amount(), 30.0);
//! ```

use serde::{Deserialize, Serialize, Serializer};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in whole currency units (`10.0` is ten units).
///
/// ## Design Decisions
/// - **f64**: matches the arithmetic of the figures the engine must reproduce
/// - **Single field tuple struct**: zero-cost wrapper, no accidental mixing
///   with weights or dimensions
/// - **Serializes as a bare number**: whole amounts without a fraction
///   (`{"total": 240}`), anything else as the full double (`10.135`)
///
/// ## Where Money Flows
/// ```text
/// Product.unit_price ──► × quantity ──► subtotal ──► − subtotal × (pct / 100)
///                                                         │
/// freight (per item, floored) ───────────────────────────►+──► total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, TS)]
#[ts(export)]
pub struct Money(f64);

impl Money {
    /// Creates a Money value from an amount in currency units.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let price = Money::new(10.99);
    /// assert_eq!(price.amount(), 10.99);
    /// ```
    #[inline]
    pub const fn new(amount: f64) -> Self {
        Money(amount)
    }

    /// Returns the amount in currency units.
    #[inline]
    pub const fn amount(&self) -> f64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0.0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// Checks that the amount is neither NaN nor infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Multiplies money by a quantity.
    ///
    /// Large quantities lose precision instead of overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let unit_price = Money::new(15.0);
    /// assert_eq!(unit_price.multiply_quantity(4).amount(), 60.0);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty as f64)
    }

    /// `percentage` percent of this amount: `amount × (percentage / 100)`.
    #[inline]
    pub fn percentage_of(&self, percentage: u32) -> Money {
        Money(self.0 * (f64::from(percentage) / 100.0))
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let subtotal = Money::new(90.0);
    /// let discounted = subtotal.apply_percentage_discount(10); // 10% off
    /// assert_eq!(discounted.amount(), 81.0);
    /// ```
    #[inline]
    pub fn apply_percentage_discount(&self, percentage: u32) -> Money {
        *self - self.percentage_of(percentage)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Largest magnitude below which every whole f64 is an exact integer (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0.abs() < MAX_EXACT_INTEGER {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

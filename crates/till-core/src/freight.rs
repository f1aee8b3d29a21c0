//! # Freight Policy
//!
//! Per-item shipping surcharge.
//!
//! ## Formula
//! ```text
//! volume       = height × width × depth
//! density      = weight / volume
//! item_freight = distance × volume × (density / 100) × quantity
//! item_freight = max(item_freight, minimum)
//! ```
//!
//! Algebraically the dimensions cancel and this is
//! `distance × weight × quantity / 100`. The calculation still walks the
//! long path above: its f64 result differs from the short form in the last
//! bits for some dimensions, and those bits are part of the quoted figures.
//! No rounding is applied.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Product;

/// Fixed shipping distance used by the formula.
pub const DEFAULT_DISTANCE: f64 = 1000.0;

/// Smallest freight charged for any line item.
pub const DEFAULT_MINIMUM_FREIGHT: Money = Money::new(10.0);

/// Parameters of the freight formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreightPolicy {
    /// Distance multiplier.
    #[serde(default = "default_distance")]
    pub distance: f64,

    /// Floor applied to each line item.
    #[serde(default = "default_minimum")]
    pub minimum: Money,
}

fn default_distance() -> f64 {
    DEFAULT_DISTANCE
}

fn default_minimum() -> Money {
    DEFAULT_MINIMUM_FREIGHT
}

impl Default for FreightPolicy {
    fn default() -> Self {
        FreightPolicy {
            distance: DEFAULT_DISTANCE,
            minimum: DEFAULT_MINIMUM_FREIGHT,
        }
    }
}

impl FreightPolicy {
    pub fn new(distance: f64, minimum: Money) -> Self {
        FreightPolicy { distance, minimum }
    }

    /// Freight for `quantity` units of `product`, never below the minimum.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::freight::FreightPolicy;
    /// use till_core::{Dimensions, Money, Product};
    ///
    /// let product = Product {
    ///     id: "product_1".to_string(),
    ///     description: "Product A".to_string(),
    ///     unit_price: Money::new(10.0),
    ///     dimensions: Dimensions::new(20.0, 15.0, 10.0),
    ///     weight: 1.0,
    /// };
    ///
    /// let policy = FreightPolicy::default();
    /// assert_eq!(policy.item_freight(&product, 3), Money::new(30.0));
    /// assert_eq!(policy.item_freight(&product, 1), Money::new(10.0));
    /// ```
    pub fn item_freight(&self, product: &Product, quantity: i64) -> Money {
        let volume = product.dimensions.volume();
        let density = product.weight / volume;
        let raw = self.distance * volume * (density / 100.0) * quantity as f64;

        // f64::max ignores NaN, so a zero-volume product falls back to the floor
        Money::new(raw.max(self.minimum.amount()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dimensions;

    fn product(weight: f64, dimensions: Dimensions) -> Product {
        Product {
            id: "p".to_string(),
            description: "test".to_string(),
            unit_price: Money::new(10.0),
            dimensions,
            weight,
        }
    }

    /// The formula written out the long way, floored at 10.
    fn literal(weight: f64, d: Dimensions, quantity: i64) -> f64 {
        let volume = d.height * d.width * d.depth;
        let density = weight / volume;
        let freight = 1000.0 * volume * (density / 100.0) * quantity as f64;
        if freight < 10.0 {
            10.0
        } else {
            freight
        }
    }

    #[test]
    fn test_above_floor_is_kept() {
        let p = product(1.0, Dimensions::new(20.0, 15.0, 10.0));
        assert_eq!(FreightPolicy::default().item_freight(&p, 3).amount(), 30.0);
    }

    #[test]
    fn test_exactly_floor() {
        let p = product(1.0, Dimensions::new(20.0, 15.0, 10.0));
        assert_eq!(FreightPolicy::default().item_freight(&p, 1).amount(), 10.0);
    }

    #[test]
    fn test_below_floor_is_clamped() {
        let p = product(0.2, Dimensions::new(10.0, 10.0, 10.0));
        // 1000 × 0.2 / 100 = 2 → clamped to 10
        assert_eq!(FreightPolicy::default().item_freight(&p, 1).amount(), 10.0);
    }

    #[test]
    fn test_heavier_product() {
        let p = product(3.0, Dimensions::new(100.0, 30.0, 10.0));
        // 1000 × 3 × 4 / 100 = 120
        assert_eq!(FreightPolicy::default().item_freight(&p, 4).amount(), 120.0);
    }

    #[test]
    fn test_fractional_weight_is_not_rounded() {
        let p = product(0.12345, Dimensions::new(20.0, 15.0, 10.0));
        let freight = FreightPolicy::default().item_freight(&p, 100);
        assert_eq!(freight.amount(), 123.45000000000002);
    }

    #[test]
    fn test_long_path_bits_depend_on_dimensions() {
        let policy = FreightPolicy::default();
        let small = product(2.5, Dimensions::new(1.0, 2.0, 3.0));
        let large = product(2.5, Dimensions::new(300.0, 70.0, 45.5));

        assert_eq!(policy.item_freight(&small, 2).amount(), 50.0);
        assert_eq!(policy.item_freight(&large, 2).amount(), 50.00000000000001);
    }

    #[test]
    fn test_matches_formula_for_fractional_weights() {
        let policy = FreightPolicy::default();
        let cases = [
            (0.3, Dimensions::new(20.0, 15.0, 10.0), 7),
            (0.07, Dimensions::new(12.5, 3.3, 9.1), 13),
            (1.75, Dimensions::new(100.0, 30.0, 10.0), 1),
            (0.01, Dimensions::new(1.0, 1.0, 1.0), 999),
            (4.2, Dimensions::new(0.5, 0.25, 0.125), 3),
        ];

        for (weight, dimensions, quantity) in cases {
            let p = product(weight, dimensions);
            assert_eq!(
                policy.item_freight(&p, quantity).amount(),
                literal(weight, dimensions, quantity),
                "weight {weight}, quantity {quantity}"
            );
        }
    }

    #[test]
    fn test_huge_quantity_stays_finite() {
        let p = product(1.0, Dimensions::new(20.0, 15.0, 10.0));
        let freight = FreightPolicy::default().item_freight(&p, 100_000_000_000_000_000);
        assert!(freight.is_finite());
        assert_eq!(
            freight.amount(),
            literal(1.0, Dimensions::new(20.0, 15.0, 10.0), 100_000_000_000_000_000)
        );
    }

    #[test]
    fn test_zero_volume_falls_back_to_floor() {
        let p = product(1.0, Dimensions::new(0.0, 15.0, 10.0));
        assert_eq!(FreightPolicy::default().item_freight(&p, 5).amount(), 10.0);
    }

    #[test]
    fn test_custom_policy() {
        let policy = FreightPolicy::new(500.0, Money::new(5.0));
        let p = product(1.0, Dimensions::new(20.0, 15.0, 10.0));
        // 500 × 1 × 1 / 100 = 5 → exactly the custom floor
        assert_eq!(policy.item_freight(&p, 1).amount(), 5.0);
        assert_eq!(policy.item_freight(&p, 4).amount(), 20.0);
    }
}

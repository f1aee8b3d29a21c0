//! # Domain Types
//!
//! Core domain types used throughout Till Checkout.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Owned by stores (read-only to the engine)                             │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   Dimensions    │   │     Coupon      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  height         │   │  code           │       │
//! │  │  description    │──►│  width          │   │  percentage     │       │
//! │  │  unit_price     │   │  depth          │   │  expires_at     │       │
//! │  │  weight         │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  Per request (transient)                                               │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ CheckoutRequest │──►│    LineItem     │   │ CheckoutResult  │       │
//! │  │  document       │   │  product_id     │   │  total          │       │
//! │  │  items          │   │  quantity       │   │  freight        │       │
//! │  │  coupon_code    │   └─────────────────┘   │  order_code     │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Wire names are camelCase. The request also accepts the legacy keys `id`
//! (for `productId`) and `coupon` (for `couponCode`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// Package dimensions of a product. Units are whatever the catalog uses;
/// the freight formula only needs them to be consistent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Dimensions {
    pub height: f64,
    pub width: f64,
    pub depth: f64,
}

impl Dimensions {
    pub const fn new(height: f64, width: f64, depth: f64) -> Self {
        Dimensions {
            height,
            width,
            depth,
        }
    }

    /// `height * width * depth`, in that order.
    #[inline]
    pub fn volume(&self) -> f64 {
        self.height * self.width * self.depth
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Catalog identifier (e.g. "product_1").
    pub id: String,

    /// Display text.
    pub description: String,

    /// Price of one unit, in currency units.
    pub unit_price: Money,

    /// Package dimensions.
    pub dimensions: Dimensions,

    /// Package weight.
    pub weight: f64,
}

impl Product {
    /// Weight per unit of volume.
    #[inline]
    pub fn density(&self) -> f64 {
        self.weight / self.dimensions.volume()
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// A percentage-off coupon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Coupon {
    /// Code typed by the customer (e.g. "10OFF").
    pub code: String,

    /// Whole percent taken off the subtotal, 0-100.
    pub percentage: u32,

    /// Last instant at which the coupon still applies.
    #[ts(as = "String")]
    pub expires_at: DateTime<Utc>,
}

impl Coupon {
    /// A coupon applies while `expires_at` is at or after `now`.
    #[inline]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at >= now
    }
}

// =============================================================================
// Checkout Request
// =============================================================================

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    #[serde(alias = "id")]
    pub product_id: String,
    pub quantity: i64,
}

impl LineItem {
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        LineItem {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Input of a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutRequest {
    /// Customer CPF, with or without `.`/`-` separators.
    pub customer_document: String,

    /// Lines in the order they were entered.
    pub items: Vec<LineItem>,

    /// Optional coupon code.
    #[serde(default, alias = "coupon", skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub coupon_code: Option<String>,
}

impl CheckoutRequest {
    pub fn new(customer_document: impl Into<String>, items: Vec<LineItem>) -> Self {
        CheckoutRequest {
            customer_document: customer_document.into(),
            items,
            coupon_code: None,
        }
    }

    /// Attaches a coupon code.
    pub fn with_coupon(mut self, code: impl Into<String>) -> Self {
        self.coupon_code = Some(code.into());
        self
    }

    /// The coupon code to look up, if any. An empty code means no coupon.
    pub fn coupon(&self) -> Option<&str> {
        self.coupon_code.as_deref().filter(|code| !code.is_empty())
    }
}

// =============================================================================
// Checkout Result
// =============================================================================

/// Output of a successful checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutResult {
    /// Subtotal − discount + freight.
    pub total: Money,

    /// Sum of the per-item freight.
    pub freight: Money,

    /// Identifier handed out by the configured `OrderCodeGenerator`.
    pub order_code: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

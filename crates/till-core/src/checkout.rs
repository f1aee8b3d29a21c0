//! # Checkout Engine
//!
//! Prices a `CheckoutRequest` against a catalog and a promotion store.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CheckoutEngine::execute                          │
//! │                                                                         │
//! │  1. validate_document(customer_document)    ✗ → InvalidDocument        │
//! │                                                                         │
//! │  2. for each line (in order):                                          │
//! │       quantity <= 0?                        ✗ → InvalidQuantity        │
//! │       catalog.get_by_id(product_id)         ✗ → InvalidProduct         │
//! │       product_id already seen?              ✗ → DuplicateProduct       │
//! │       subtotal += unit_price × quantity                                │
//! │       freight  += policy.item_freight(product, quantity)               │
//! │                                                                         │
//! │  3. if coupon code present and non-empty:                              │
//! │       promotions.get_by_code(code)          ✗ → InvalidCoupon          │
//! │       if coupon.is_active_at(now):                                     │
//! │           subtotal -= subtotal × (percentage / 100)                    │
//! │                                                                         │
//! │  4. total = subtotal + freight                                         │
//! │     order_code = order_codes.next_code(now)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first failing check wins. Nothing is written anywhere; the engine
//! can be called any number of times with the same request.
//!
//! The discount applies to the item subtotal only, never to freight.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::document::validate_document;
use crate::error::{CheckoutError, CoreResult};
use crate::freight::FreightPolicy;
use crate::lookup::{
    CatalogLookup, Clock, OrderCodeGenerator, PromotionLookup, SystemClock, YearSequenceCodes,
};
use crate::money::Money;
use crate::types::{CheckoutRequest, CheckoutResult};
use crate::validation::validate_quantity;

/// Computes order totals. Cheap to clone; collaborators are shared.
#[derive(Clone)]
pub struct CheckoutEngine {
    catalog: Arc<dyn CatalogLookup>,
    promotions: Arc<dyn PromotionLookup>,
    clock: Arc<dyn Clock>,
    order_codes: Arc<dyn OrderCodeGenerator>,
    policy: FreightPolicy,
}

impl std::fmt::Debug for CheckoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutEngine")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl CheckoutEngine {
    /// Creates an engine with the system clock, year-based order codes and
    /// the default freight policy.
    pub fn new(catalog: Arc<dyn CatalogLookup>, promotions: Arc<dyn PromotionLookup>) -> Self {
        CheckoutEngine {
            catalog,
            promotions,
            clock: Arc::new(SystemClock),
            order_codes: Arc::new(YearSequenceCodes),
            policy: FreightPolicy::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_order_codes(mut self, order_codes: Arc<dyn OrderCodeGenerator>) -> Self {
        self.order_codes = order_codes;
        self
    }

    pub fn with_policy(mut self, policy: FreightPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &FreightPolicy {
        &self.policy
    }

    /// Prices `request`.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::Arc;
    /// use till_core::memory::{demo_coupons, demo_products, InMemoryCatalog, InMemoryPromotions};
    /// use till_core::{CheckoutEngine, CheckoutRequest, LineItem, Money};
    ///
    /// # tokio_test_block(async {
    /// let engine = CheckoutEngine::new(
    ///     Arc::new(InMemoryCatalog::with_products(demo_products()).unwrap()),
    ///     Arc::new(InMemoryPromotions::with_coupons(demo_coupons()).unwrap()),
    /// );
    ///
    /// let request = CheckoutRequest::new("347.867.458-12", vec![LineItem::new("product_1", 1)]);
    /// let result = engine.execute(&request).await.unwrap();
    /// assert_eq!(result.total, Money::new(20.0));
    /// # });
    /// # fn tokio_test_block<F: std::future::Future>(f: F) {
    /// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f);
    /// # }
    /// ```
    pub async fn execute(&self, request: &CheckoutRequest) -> CoreResult<CheckoutResult> {
        if !validate_document(&request.customer_document) {
            warn!("Checkout rejected: invalid customer document");
            return Err(CheckoutError::InvalidDocument);
        }

        let mut subtotal = Money::zero();
        let mut freight = Money::zero();
        let mut seen: HashSet<&str> = HashSet::with_capacity(request.items.len());

        for item in &request.items {
            if validate_quantity(item.quantity).is_err() {
                warn!(
                    product_id = %item.product_id,
                    quantity = item.quantity,
                    "Checkout rejected: invalid quantity"
                );
                return Err(CheckoutError::InvalidQuantity {
                    product_id: item.product_id.clone(),
                    quantity: item.quantity,
                });
            }

            let Some(product) = self.catalog.get_by_id(&item.product_id).await? else {
                warn!(product_id = %item.product_id, "Checkout rejected: unknown product");
                return Err(CheckoutError::InvalidProduct {
                    product_id: item.product_id.clone(),
                });
            };

            if !seen.insert(item.product_id.as_str()) {
                warn!(product_id = %item.product_id, "Checkout rejected: duplicate product");
                return Err(CheckoutError::DuplicateProduct {
                    product_id: item.product_id.clone(),
                });
            }

            let line_price = product.unit_price.multiply_quantity(item.quantity);
            let line_freight = self.policy.item_freight(&product, item.quantity);
            debug!(
                product_id = %product.id,
                quantity = item.quantity,
                line_price = %line_price,
                line_freight = %line_freight,
                "Priced line item"
            );

            subtotal += line_price;
            freight += line_freight;
        }

        let now = self.clock.now();

        if let Some(code) = request.coupon() {
            let Some(coupon) = self.promotions.get_by_code(code).await? else {
                warn!(code, "Checkout rejected: unknown coupon");
                return Err(CheckoutError::InvalidCoupon {
                    code: code.to_string(),
                });
            };

            if coupon.is_active_at(now) {
                let discount = subtotal.percentage_of(coupon.percentage);
                debug!(
                    code,
                    percentage = coupon.percentage,
                    discount = %discount,
                    "Applied coupon"
                );
                subtotal -= discount;
            } else {
                debug!(code, expires_at = %coupon.expires_at, "Coupon expired, ignoring");
            }
        }

        let result = CheckoutResult {
            total: subtotal + freight,
            freight,
            order_code: self.order_codes.next_code(now),
        };

        info!(
            order_code = %result.order_code,
            total = %result.total,
            freight = %result.freight,
            items = request.items.len(),
            "Checkout priced"
        );

        Ok(result)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

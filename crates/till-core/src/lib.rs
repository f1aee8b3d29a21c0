//! # till-core: Pure Business Logic for Till Checkout
//!
//! This crate is the **heart** of Till Checkout. It prices an order: it
//! validates the customer's CPF, accumulates item prices and freight, and
//! applies an optional coupon.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Till Checkout Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/api (axum, POST /checkout)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ document  │  │  freight  │  │ checkout  │  │  lookup   │  │   │
//! │  │   │   CPF     │  │  policy   │  │  engine   │  │  traits   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └─────┬─────┘  │   │
//! │  │                                                      │        │   │
//! │  └──────────────────────────────────────────────────────┼────────┘   │
//! │                                                         │              │
//! │  ┌──────────────────────────────────────────────────────▼──────────┐   │
//! │  │       till-db (SQLite)  or  memory (InMemoryCatalog, ...)       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`checkout`] - The checkout engine
//! - [`document`] - CPF checksum validation
//! - [`freight`] - Per-item freight arithmetic
//! - [`lookup`] - Collaborator traits (catalog, promotions, clock, order codes)
//! - [`memory`] - In-memory catalog and promotion stores
//! - [`money`] - Money amounts and their arithmetic
//! - [`types`] - Domain types (Product, Coupon, CheckoutRequest, ...)
//! - [`validation`] - Catalog and coupon data validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::document::validate_document;
//!
//! assert!(validate_document("347.867.458-12"));
//! assert!(!validate_document("111.111.111-11"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod document;
pub mod error;
pub mod freight;
pub mod lookup;
pub mod memory;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::CheckoutEngine;
pub use error::{CheckoutError, CoreResult, LookupError, ValidationError};
pub use freight::FreightPolicy;
pub use lookup::{CatalogLookup, Clock, OrderCodeGenerator, PromotionLookup};
pub use money::Money;
pub use types::*;

//! # Repository Module
//!
//! Database repositories for the catalog and coupons.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CheckoutEngine                      till-seed / admin code            │
//! │       │                                    │                            │
//! │       │ CatalogLookup::get_by_id           │ insert / list / count      │
//! │       ▼                                    ▼                            │
//! │  ProductRepository ──────────────────── CouponRepository               │
//! │  ├── get_by_id(&self, id)               ├── get_by_code(&self, code)   │
//! │  ├── insert(&self, product)             ├── insert(&self, coupon)      │
//! │  ├── list(&self)                        └── count(&self)               │
//! │  └── count(&self)                                                       │
//! │       │                                                                 │
//! │       │  SQL (rows mapped through FromRow structs)                     │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine only sees the lookup traits; errors cross that boundary as
//! `LookupError`.

pub mod coupon;
pub mod product;

//! # Repository Module
//!
//! Database repository implementations for the register.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Catalog / Directory / Ledger                                          │
//! │       │                                                                 │
//! │       │  db.products().insert("Vanilla Cone", Some("Cones"), price)    │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── insert(&self, name, category, unit_price)                         │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── update(&self, product)                                            │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories take already-validated values. Every statement is its own
//! unit of work, except `patch` and `record_sale`, which read and write
//! inside one transaction.
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`](customer::CustomerRepository) - Customer CRUD
//! - [`ProductRepository`](product::ProductRepository) - Catalog CRUD
//! - [`SaleRepository`](sale::SaleRepository) - Recording sales and daily totals

pub mod customer;
pub mod product;
pub mod sale;

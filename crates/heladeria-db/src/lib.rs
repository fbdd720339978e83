//! # heladeria-db: Database Layer for the Shop Register
//!
//! SQLite storage for customers, the product catalog, and the sales ledger.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Register Data Flow                               │
//! │                                                                         │
//! │  SalesLedger::sell(product_id, quantity)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   heladeria-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │    Schema    │  │   │
//! │  │   │   (pool.rs)   │    │                │    │ (schema.rs)  │  │   │
//! │  │   │               │    │ CustomerRepo   │    │              │  │   │
//! │  │   │ 1 connection  │◄───│ ProductRepo    │    │  Customers   │  │   │
//! │  │   │ for the whole │    │ SaleRepo       │    │  Products    │  │   │
//! │  │   │ process       │    │                │    │  Sales       │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/heladeria/heladeria.db                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Store handle creation and configuration
//! - [`schema`] - Idempotent table creation
//! - [`error`] - Database error types
//! - [`repository`] - Customer, product, and sale repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use heladeria_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("heladeria.db")).await?;
//! let cones = db.products().list().await?;
//! ```

pub mod error;
pub mod pool;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, SqlValue};

pub use repository::customer::CustomerRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::{NewSale, SaleRepository};

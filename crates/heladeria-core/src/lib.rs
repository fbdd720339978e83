//! # heladeria-core: Pure Domain Logic for the Shop Register
//!
//! Records, money arithmetic, and input validation with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Heladería Register Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (forms, menus)                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │   heladeria (Application facade)                                │   │
//! │  │   CustomerDirectory · Catalog · SalesLedger                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ heladeria-core (THIS CRATE) ★                      │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌──────────────┐               │   │
//! │  │   │   types   │  │   money   │  │  validation  │               │   │
//! │  │   │ Customer  │  │   Money   │  │ name / price │               │   │
//! │  │   │ Product   │  │  × qty    │  │   quantity   │               │   │
//! │  │   │ Sale      │  │           │  │              │               │   │
//! │  │   └───────────┘  └───────────┘  └──────────────┘               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              heladeria-db (SQLite store, repositories)          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Customer, Product, Sale and the value objects built from them
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Validation error type
//! - [`validation`] - Input rules shared by every write path
//!
//! ## Example Usage
//!
//! ```rust
//! use heladeria_core::money::Money;
//!
//! let cone = Money::from_cents(250); // $2.50
//! let total = cone.checked_mul_quantity(3).unwrap();
//! assert_eq!(total.to_string(), "$7.50");
//! ```

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

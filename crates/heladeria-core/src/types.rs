//! # Domain Types
//!
//! Records for the three tables, plus the value objects the register builds
//! from them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │    Product      │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │◄──│  product_id     │       │
//! │  │  name           │   │  name           │   │  quantity       │       │
//! │  │  address?       │   │  category?      │   │  total_price    │       │
//! │  │  phone?         │   │  unit_price     │   │  date           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Quote       │   │    Receipt      │   │ RegisterReport  │       │
//! │  │  (before sale)  │   │  (after sale)   │   │ (end of day)    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fields are declared in table column order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_name, validate_price, ValidationResult};

// =============================================================================
// Customer
// =============================================================================

/// A shop customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    /// Store-assigned identity.
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Partial update for a customer.
///
/// Only fields that were explicitly set change; everything else keeps its
/// stored value.
///
/// ## Example
/// ```rust
/// use heladeria_core::CustomerPatch;
///
/// let patch = CustomerPatch::new().phone("555-0101");
/// assert!(patch.name.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPatch {
    pub name: Option<String>,
    /// `Some(None)` clears the stored address.
    pub address: Option<Option<String>>,
    /// `Some(None)` clears the stored phone.
    pub phone: Option<Option<String>>,
}

impl CustomerPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(Some(address.into()));
        self
    }

    pub fn clear_address(mut self) -> Self {
        self.address = Some(None);
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(Some(phone.into()));
        self
    }

    pub fn clear_phone(mut self) -> Self {
        self.phone = Some(None);
        self
    }

    /// True when applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.address.is_none() && self.phone.is_none()
    }

    /// Merges the patch over a stored customer.
    ///
    /// ## Errors
    /// `ValidationError::Required` if the patch sets a blank name.
    pub fn apply_to(&self, current: &Customer) -> ValidationResult<Customer> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }

        Ok(Customer {
            id: current.id,
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            address: self.address.clone().unwrap_or_else(|| current.address.clone()),
            phone: self.phone.clone().unwrap_or_else(|| current.phone.clone()),
        })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Store-assigned identity.
    pub id: i64,

    /// Display name shown at the register.
    pub name: String,

    /// Free-form grouping ("Cones", "Cups", ...).
    pub category: Option<String>,

    /// Current catalog price. Sales copy it; they never read it back.
    pub unit_price: Money,
}

/// Partial update for a product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    /// `Some(None)` clears the stored category.
    pub category: Option<Option<String>>,
    /// Raw price input; validated when the patch is applied.
    pub unit_price: Option<f64>,
}

impl ProductPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(Some(category.into()));
        self
    }

    pub fn clear_category(mut self) -> Self {
        self.category = Some(None);
        self
    }

    pub fn unit_price(mut self, unit_price: f64) -> Self {
        self.unit_price = Some(unit_price);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.unit_price.is_none()
    }

    /// Merges the patch over a stored product.
    ///
    /// ## Errors
    /// Blank name, or a price that is NaN, negative, or unrepresentable.
    pub fn apply_to(&self, current: &Product) -> ValidationResult<Product> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }

        let unit_price = match self.unit_price {
            Some(raw) => validate_price(raw)?,
            None => current.unit_price,
        };

        Ok(Product {
            id: current.id,
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            category: self
                .category
                .clone()
                .unwrap_or_else(|| current.category.clone()),
            unit_price,
        })
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A completed sale. Immutable once written.
///
/// Uses the snapshot pattern: `total_price` is computed from the catalog
/// price read inside the sale transaction and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// unit price at sale time × quantity.
    pub total_price: Money,
    pub date: NaiveDate,
}

// =============================================================================
// Register Value Objects
// =============================================================================

/// What the register shows before the sale is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub product: Product,
    pub quantity: i64,
    pub total: Money,
}

impl Quote {
    /// Change owed for the given payment.
    ///
    /// ## Errors
    /// `InsufficientPayment` when `tendered` is below the total.
    pub fn change_for(&self, tendered: Money) -> Result<Money, ValidationError> {
        change_due(self.total, tendered)
    }
}

/// Outcome of a paid checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub sale: Sale,
    pub tendered: Money,
    pub change: Money,
}

/// The close-register report for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterReport {
    pub date: NaiveDate,
    pub sale_count: i64,
    /// Zero, never absent, when the day had no sales.
    pub total: Money,
}

impl RegisterReport {
    /// The report line with the total in the given currency symbol.
    pub fn format_with(&self, symbol: &str) -> String {
        format!(
            "Daily sales total for {}: {} ({} {})",
            self.date.format("%Y-%m-%d"),
            self.total.format_with(symbol),
            self.sale_count,
            if self.sale_count == 1 { "sale" } else { "sales" }
        )
    }
}

impl fmt::Display for RegisterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
    }
}

/// Computes change, rejecting payments that don't cover the total.
pub fn change_due(total: Money, tendered: Money) -> Result<Money, ValidationError> {
    if tendered < total {
        return Err(ValidationError::InsufficientPayment {
            required: total,
            tendered,
        });
    }

    Ok(tendered - total)
}

// =============================================================================
// Unit Tests
// =============================================================================

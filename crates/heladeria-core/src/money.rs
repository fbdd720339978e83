//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Micro-Units (millionths of the currency)         │
//! │    Catalog price 2.50   → 2_500_000                                     │
//! │    Catalog price 0.125  →   125_000   (kept as entered)                 │
//! │    125_000 × 8          → 1_000_000 = 1.00 (exact)                      │
//! │                                                                         │
//! │  The store keeps REAL columns (existing data files), so conversion     │
//! │  happens exactly once, at the store boundary: from_decimal/to_decimal. │
//! │  Two-decimal rounding only happens when an amount is displayed.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Storable Range
//! Every amount stays within ±2^50 micro-units (about 1.1 billion). Inside
//! that range an f64 column round-trips to the same `Money`, so anything the
//! register writes it can read back. `checked_*` arithmetic and
//! `from_decimal` refuse to leave it.
//!
//! ## Usage
//! ```rust
//! use heladeria_core::money::Money;
//!
//! let price = Money::from_decimal(2.50).unwrap();
//! assert_eq!(price.cents(), 250);
//!
//! let total = price.checked_mul_quantity(3).unwrap();
//! assert_eq!(total.to_decimal(), 7.5);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// Micro-units in one cent.
pub const MICROS_PER_CENT: i64 = 10_000;

/// Micro-units in one whole currency unit.
pub const MICROS_PER_UNIT: i64 = 1_000_000;

/// Largest magnitude that survives a REAL column round trip (2^50).
const MAX_EXACT_MICROS: i64 = 1 << 50;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in millionths of the currency unit.
///
/// ## Where Money is Used
/// ```text
/// Product.unit_price ──► × quantity ──► Sale.total_price ──► daily total
///                                              │
///                                              └──► tendered − total = change
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// The largest storable amount.
    pub const MAX: Money = Money(MAX_EXACT_MICROS);

    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use heladeria_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents.saturating_mul(MICROS_PER_CENT))
    }

    /// Creates a Money value from micro-units.
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        Money(micros)
    }

    /// Converts a decimal amount (as stored in REAL columns) to Money.
    ///
    /// Keeps six decimal places, so catalog prices like `0.125` stay exact.
    /// Returns `None` for NaN, infinities, and amounts outside the storable
    /// range.
    ///
    /// ## Example
    /// ```rust
    /// use heladeria_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(0.29).unwrap().cents(), 29);
    /// assert_eq!(Money::from_decimal(0.125).unwrap().micros(), 125_000);
    /// assert!(Money::from_decimal(f64::NAN).is_none());
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }

        let micros = (amount * MICROS_PER_UNIT as f64).round();
        if micros.abs() > MAX_EXACT_MICROS as f64 {
            return None;
        }

        Some(Money(micros as i64))
    }

    /// Returns the amount as a decimal, for writing to REAL columns.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / MICROS_PER_UNIT as f64
    }

    /// Returns the value in micro-units.
    #[inline]
    pub const fn micros(&self) -> i64 {
        self.0
    }

    /// Returns the value in cents, rounded half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use heladeria_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(0.125).unwrap().cents(), 13);
    /// assert_eq!(Money::from_decimal(-0.125).unwrap().cents(), -13);
    /// ```
    #[inline]
    pub const fn cents(&self) -> i64 {
        let half = MICROS_PER_CENT / 2;
        if self.0 >= 0 {
            self.0.saturating_add(half) / MICROS_PER_CENT
        } else {
            self.0.saturating_sub(half) / MICROS_PER_CENT
        }
    }

    /// Returns the major unit (dollars) portion of the rounded amount.
    ///
    /// ## Example
    /// ```rust
    /// use heladeria_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).dollars(), 10);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.cents() / 100
    }

    /// Returns the minor unit (cents) portion of the rounded amount (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.cents() % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// True when the amount can be written to the store and read back.
    #[inline]
    pub const fn is_storable(&self) -> bool {
        self.0 >= -MAX_EXACT_MICROS && self.0 <= MAX_EXACT_MICROS
    }

    /// Multiplies money by a quantity.
    ///
    /// Returns `None` when the product leaves the storable range.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Vanilla Cone $2.50
    /// Quantity: 3
    ///      │
    ///      ▼
    /// checked_mul_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Sale total: $7.50
    /// ```
    #[inline]
    pub const fn checked_mul_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(micros) => Money(micros).storable(),
            None => None,
        }
    }

    /// Adds two amounts. `None` when the sum leaves the storable range.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(micros) => Money(micros).storable(),
            None => None,
        }
    }

    /// Subtracts `other`. `None` when the difference leaves the storable range.
    #[inline]
    pub const fn checked_sub(&self, other: Money) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(micros) => Money(micros).storable(),
            None => None,
        }
    }

    #[inline]
    const fn storable(self) -> Option<Self> {
        if self.is_storable() {
            Some(self)
        } else {
            None
        }
    }

    /// Formats with two decimals and the given currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use heladeria_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(750).format_with("€"), "€7.50");
    /// assert_eq!(Money::from_cents(-5).format_with("$"), "-$0.05");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.cents() < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two decimals with a dollar sign, the register's display format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// The operators saturate at the i64 limits instead of panicking. They don't
// check the storable range; use `checked_add`/`checked_sub` for that.

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// SQLite Mapping
// =============================================================================
// Prices and totals live in REAL columns. Money encodes as a decimal and
// decodes back to micro-units so record types can derive FromRow directly.

#[cfg(feature = "sqlx")]
mod sqlite {
    use super::Money;
    use sqlx::encode::IsNull;
    use sqlx::error::BoxDynError;
    use sqlx::sqlite::{Sqlite, SqliteTypeInfo, SqliteValueRef};
    use sqlx::{Decode, Encode, Type};

    impl Type<Sqlite> for Money {
        fn type_info() -> SqliteTypeInfo {
            <f64 as Type<Sqlite>>::type_info()
        }

        fn compatible(ty: &SqliteTypeInfo) -> bool {
            // Rows written by other tools may hold whole prices as INTEGER
            <f64 as Type<Sqlite>>::compatible(ty) || <i64 as Type<Sqlite>>::compatible(ty)
        }
    }

    impl<'q> Encode<'q, Sqlite> for Money {
        fn encode_by_ref(
            &self,
            buf: &mut <Sqlite as sqlx::Database>::ArgumentBuffer<'q>,
        ) -> Result<IsNull, BoxDynError> {
            <f64 as Encode<'q, Sqlite>>::encode(self.to_decimal(), buf)
        }
    }

    impl<'r> Decode<'r, Sqlite> for Money {
        fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
            let amount = <f64 as Decode<'r, Sqlite>>::decode(value)?;
            Money::from_decimal(amount)
                .ok_or_else(|| format!("stored amount {amount} is out of range").into())
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

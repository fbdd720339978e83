//! # Validation Module
//!
//! Input rules shared by every write path.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation                                                 │
//! │  └── Form-level checks, immediate feedback                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Directory / Catalog / Ledger                                 │
//! │  └── THIS MODULE: names, prices, quantities, payments                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite                                                       │
//! │  └── NOT NULL constraints                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use heladeria_core::validation::{parse_price, validate_quantity};
//!
//! assert_eq!(parse_price("2.50").unwrap().cents(), 250);
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer or product name.
///
/// ## Rules
/// - Must not be empty or whitespace only
///
/// ## Example
/// ```rust
/// use heladeria_core::validation::validate_name;
///
/// assert!(validate_name("Vanilla Cone").is_ok());
/// assert!(validate_name("").is_err());
/// assert!(validate_name("   ").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::required("name"));
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a catalog price and converts it to [`Money`].
///
/// ## Rules
/// - NaN is rejected
/// - Negative prices are rejected (zero is allowed: free items)
/// - Infinite or unrepresentable amounts are rejected
/// - Sub-cent prices are kept (`0.125` stays `0.125`)
///
/// ## Example
/// ```rust
/// use heladeria_core::validation::validate_price;
///
/// assert_eq!(validate_price(2.5).unwrap().cents(), 250);
/// assert!(validate_price(0.0).is_ok());
/// assert!(validate_price(-0.5).is_err());
/// assert!(validate_price(f64::NAN).is_err());
/// ```
pub fn validate_price(unit_price: f64) -> ValidationResult<Money> {
    validate_amount("unit_price", unit_price)
}

/// Validates a sale quantity.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// ## User Workflow
/// ```text
/// Cashier enters quantity: 3
///      │
///      ▼
/// validate_quantity(3) ← THIS FUNCTION
///      │
///      ├── qty <= 0? → Error: "quantity must be positive"
///      │
///      └── OK → price snapshot × quantity
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

fn validate_amount(field: &str, amount: f64) -> ValidationResult<Money> {
    if amount.is_nan() {
        return Err(ValidationError::NotANumber {
            field: field.to_string(),
        });
    }

    if amount < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Money::from_decimal(amount).ok_or_else(|| ValidationError::OutOfRange {
        field: field.to_string(),
    })
}

// =============================================================================
// Text Parsers
// =============================================================================
// Presentation hands over raw entry text; these turn it into checked values.

/// Parses a price typed into the catalog form.
///
/// ## Example
/// ```rust
/// use heladeria_core::validation::parse_price;
///
/// assert_eq!(parse_price(" 3 ").unwrap().cents(), 300);
/// assert!(parse_price("abc").is_err());
/// assert!(parse_price("").is_err());
/// ```
pub fn parse_price(text: &str) -> ValidationResult<Money> {
    let value = parse_number("unit_price", text)?;
    validate_price(value)
}

/// Parses a quantity typed at the register.
pub fn parse_quantity(text: &str) -> ValidationResult<i64> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::required("quantity"));
    }

    let qty: i64 = text
        .parse()
        .map_err(|_| ValidationError::invalid_format("quantity", "must be a whole number"))?;

    validate_quantity(qty)?;
    Ok(qty)
}

/// Parses the amount a customer hands over.
///
/// ## Rules
/// - Non-negative number
/// - At most two decimal places
///
/// ## Example
/// ```rust
/// use heladeria_core::validation::parse_tendered;
///
/// assert_eq!(parse_tendered("10").unwrap().cents(), 1000);
/// assert_eq!(parse_tendered("7.5").unwrap().cents(), 750);
/// assert!(parse_tendered("7.505").is_err());
/// ```
pub fn parse_tendered(text: &str) -> ValidationResult<Money> {
    let value = parse_number("tendered", text)?;

    let decimals = text
        .trim()
        .split_once('.')
        .map(|(_, frac)| frac.len())
        .unwrap_or(0);
    if decimals > 2 {
        return Err(ValidationError::invalid_format(
            "tendered",
            "at most two decimal places",
        ));
    }

    validate_amount("tendered", value)
}

fn parse_number(field: &str, text: &str) -> ValidationResult<f64> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::required(field));
    }

    text.parse::<f64>()
        .map_err(|_| ValidationError::invalid_format(field, "must be a number"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Ana").is_ok());
        assert!(validate_name(" Ana ").is_ok());
        assert_eq!(validate_name(""), Err(ValidationError::required("name")));
        assert!(validate_name("\t\n").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert_eq!(validate_price(0.0).unwrap(), Money::zero());
        assert_eq!(validate_price(2.5).unwrap().cents(), 250);
        assert_eq!(validate_price(0.125).unwrap(), Money::from_micros(125_000));
        assert!(matches!(
            validate_price(5e9),
            Err(ValidationError::OutOfRange { .. })
        ));

        assert!(matches!(
            validate_price(f64::NAN),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            validate_price(-0.01),
            Err(ValidationError::MustNotBeNegative { .. })
        ));
        assert!(matches!(
            validate_price(f64::INFINITY),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(1000).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("2.50").unwrap().cents(), 250);
        assert_eq!(parse_price("0").unwrap(), Money::zero());

        assert!(matches!(parse_price(""), Err(ValidationError::Required { .. })));
        assert!(matches!(
            parse_price("2,50"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_price("NaN"),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(parse_price("-3").is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3").unwrap(), 3);
        assert!(parse_quantity("").is_err());
        assert!(parse_quantity("1.5").is_err());
        assert!(parse_quantity("0").is_err());
    }

    #[test]
    fn test_parse_tendered() {
        assert_eq!(parse_tendered("20.00").unwrap().cents(), 2000);
        assert!(parse_tendered("-1").is_err());
        assert!(parse_tendered("1.999").is_err());
        assert!(parse_tendered("cash").is_err());
    }
}

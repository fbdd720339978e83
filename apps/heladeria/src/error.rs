//! # Application Error Type
//!
//! The one error type callers of the register see.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Register                           │
//! │                                                                         │
//! │  Directory / Catalog / Ledger                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ValidationError (core) ──────────────────────┐                        │
//! │  DbError::Validation ─────────────────────────┤──► ErrorKind::Validation│
//! │  DbError::NotFound ───────────────────────────┼──► ErrorKind::NotFound  │
//! │  DbError::{Connection,Schema,Query,...} ──────┴──► ErrorKind::Store     │
//! │                                                                         │
//! │  Validation, NotFound: shown to the user, register keeps running        │
//! │  Store at startup: process exits with code 1                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use heladeria_core::ValidationError;
use heladeria_db::DbError;
use thiserror::Error;

/// Error returned by every register operation.
///
/// `message` is ready to show to the cashier:
/// ```text
/// [NotFound] Product not found: 7
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{kind:?}] {message}")]
pub struct AppError {
    /// Machine-readable category for programmatic handling
    pub kind: ErrorKind,

    /// Human-readable error message for display
    pub message: String,
}

/// The closed set of failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input rejected before anything was written.
    Validation,

    /// The referenced customer or product doesn't exist.
    NotFound,

    /// The store failed to open, initialize, or commit.
    Store,
}

impl AppError {
    /// Creates a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        AppError {
            kind,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        AppError::new(
            ErrorKind::NotFound,
            format!("{} not found: {}", entity, id.to_string()),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorKind::Validation, message)
    }

    /// Creates a store error.
    pub fn store(message: impl Into<String>) -> Self {
        AppError::new(ErrorKind::Store, message)
    }

    /// Validation and NotFound errors leave the register usable.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation | ErrorKind::NotFound)
    }
}

/// Converts database errors to application errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => AppError::not_found(&entity, id),
            DbError::Validation(e) => AppError::from(e),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Store connection failed: {}", e);
                AppError::store(format!("Could not open the store: {}", e))
            }
            DbError::SchemaFailed(e) => {
                tracing::error!("Schema initialization failed: {}", e);
                AppError::store(format!("Could not initialize the store: {}", e))
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Store query failed: {}", e);
                AppError::store("Store operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                AppError::store("Store transaction failed")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal store error: {}", e);
                AppError::store("Store operation failed")
            }
        }
    }
}

/// Converts validation errors to application errors.
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Result type for register operations.
pub type AppResult<T> = Result<T, AppError>;

//! # Database Schema
//!
//! Table definitions for the register, applied idempotently at startup.
//!
//! ## How Initialization Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Schema Initialization                              │
//! │                                                                         │
//! │  App Startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                 │
//! │       ├── CREATE TABLE IF NOT EXISTS Customers                         │
//! │       ├── CREATE TABLE IF NOT EXISTS Products                          │
//! │       ├── CREATE TABLE IF NOT EXISTS Sales                             │
//! │       └── CREATE INDEX IF NOT EXISTS idx_sales_date                    │
//! │  COMMIT                                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Existing file? Tables and rows untouched.                             │
//! │  New file? Three empty tables.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no migration history: the layout below is the whole contract, and
//! existing data files written with it open as-is.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// The three tables, in dependency order.
pub const TABLES: [&str; 3] = ["Customers", "Products", "Sales"];

const CREATE_CUSTOMERS: &str = r#"
    CREATE TABLE IF NOT EXISTS Customers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        address TEXT,
        phone TEXT
    )
"#;

const CREATE_PRODUCTS: &str = r#"
    CREATE TABLE IF NOT EXISTS Products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        category TEXT,
        unit_price REAL NOT NULL
    )
"#;

// The REFERENCES clause documents the relation; enforcement stays off on the
// connection so deleting a product never touches or blocks its sales.
const CREATE_SALES: &str = r#"
    CREATE TABLE IF NOT EXISTS Sales (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        product_id INTEGER NOT NULL,
        quantity INTEGER NOT NULL,
        total_price REAL NOT NULL,
        date TEXT NOT NULL,
        FOREIGN KEY (product_id) REFERENCES Products (id)
    )
"#;

const CREATE_SALES_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_sales_date ON Sales (date)";

const STATEMENTS: [&str; 4] = [
    CREATE_CUSTOMERS,
    CREATE_PRODUCTS,
    CREATE_SALES,
    CREATE_SALES_DATE_INDEX,
];

/// Creates any missing tables.
///
/// ## Safety
/// - Idempotent: safe to run on every startup
/// - Non-destructive: never drops or rewrites existing tables
/// - Transactional: either every statement applies or none does
pub async fn initialize(pool: &SqlitePool) -> DbResult<()> {
    info!("Ensuring register schema");

    let mut tx = pool.begin().await.map_err(schema_failed)?;

    for statement in STATEMENTS {
        sqlx::query(statement)
            .execute(&mut *tx)
            .await
            .map_err(schema_failed)?;
    }

    tx.commit().await.map_err(schema_failed)?;

    debug!(tables = ?TABLES, "Schema ready");
    Ok(())
}

/// Returns the register tables that don't exist yet.
///
/// ## Usage
/// For diagnostics and health checks. Empty after `initialize`.
pub async fn missing_tables(pool: &SqlitePool) -> DbResult<Vec<&'static str>> {
    let mut missing = Vec::new();

    for table in TABLES {
        let found: Option<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1")
                .bind(table)
                .fetch_optional(pool)
                .await?;

        if found.is_none() {
            missing.push(table);
        }
    }

    Ok(missing)
}

fn schema_failed(err: sqlx::Error) -> DbError {
    DbError::SchemaFailed(err.to_string())
}

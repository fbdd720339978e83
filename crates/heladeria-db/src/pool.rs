//! # Store Handle
//!
//! Opens the SQLite file and owns the single connection the register uses.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Store Connection                                 │
//! │                                                                         │
//! │  App Startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure store                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Open connection + initialize schema     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool (size 1)          │                           │
//! │  │  ┌──────┐                               │                           │
//! │  │  │ Conn │  opened once, held until close │                           │
//! │  │  └──────┘                               │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Directory / Catalog / Ledger share clones of the same handle          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Journal Mode
//! Rollback journal (DELETE), not WAL: the store stays a single file on disk
//! that other SQLite tools can open directly.

use sqlx::query::Query;
use sqlx::sqlite::{
    Sqlite, SqliteArguments, SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions,
    SqliteRow, SqliteSynchronous,
};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use heladeria_core::Money;

use crate::error::{DbError, DbResult};
use crate::repository::customer::CustomerRepository;
use crate::repository::product::ProductRepository;
use crate::repository::sale::SaleRepository;
use crate::schema;

const IN_MEMORY: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/heladeria.db")
///     .connect_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file. Created if missing.
    pub database_path: PathBuf,

    /// How long to wait for the connection.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Whether to create missing tables on connect.
    /// Default: true
    pub initialize_schema: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            connect_timeout: Duration::from_secs(30),
            initialize_schema: true,
        }
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to create missing tables on connect.
    pub fn initialize_schema(mut self, initialize: bool) -> Self {
        self.initialize_schema = initialize;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let db = Database::new(DbConfig::in_memory()).await?;
    /// // Isolated store that disappears with the handle
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY),
            connect_timeout: Duration::from_secs(5),
            initialize_schema: true,
        }
    }

    /// True when this config points at a private in-memory store.
    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY)
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                // Create file if it doesn't exist
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Delete)
                .synchronous(SqliteSynchronous::Full)
        };

        // Deleting a product must not be blocked by its sales history
        Ok(options.foreign_keys(false))
    }
}

// =============================================================================
// Bound Values
// =============================================================================

/// A value bound to a `?` placeholder by [`Database::execute`] and
/// [`Database::fetch_all`].
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Real(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<Money> for SqlValue {
    fn from(value: Money) -> Self {
        SqlValue::Real(value.to_decimal())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}

fn bind_values<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    binds: &'q [SqlValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in binds {
        query = match value {
            SqlValue::Null => query.bind(None::<i64>),
            SqlValue::Integer(v) => query.bind(*v),
            SqlValue::Real(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.as_str()),
        };
    }
    query
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cloning is cheap and every clone shares the same connection; this is how
/// the directory, catalog, and ledger all see each other's writes at once.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the store.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Opens exactly one connection, kept for the process lifetime
    /// 3. Creates missing tables (if enabled)
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use handle
    /// * `Err(DbError::ConnectionFailed)` - File can't be opened or created
    /// * `Err(DbError::SchemaFailed)` - Tables couldn't be created
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening register store"
        );

        let connect_options = config.connect_options()?;

        // One connection, never recycled: an in-memory store lives exactly as
        // long as that connection does.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!("Store connection established");

        let db = Database { pool };

        if config.initialize_schema {
            db.initialize().await?;
        }

        Ok(db)
    }

    /// Creates any missing tables. Idempotent.
    pub async fn initialize(&self) -> DbResult<()> {
        schema::initialize(&self.pool).await?;
        info!("Register schema ready");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    ///
    /// ## Usage
    /// For queries not covered by repositories.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Runs one statement with bound parameters and commits it.
    ///
    /// ## Returns
    /// Number of rows affected.
    pub async fn execute(&self, sql: &str, binds: &[SqlValue]) -> DbResult<u64> {
        debug!(sql = %sql, binds = binds.len(), "Executing statement");

        let result = bind_values(sqlx::query(sql), binds)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Runs a read query and returns every matching row.
    pub async fn fetch_all(&self, sql: &str, binds: &[SqlValue]) -> DbResult<Vec<SqliteRow>> {
        debug!(sql = %sql, binds = binds.len(), "Fetching rows");

        let rows = bind_values(sqlx::query(sql), binds)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Lists the user tables in the store, sorted by name.
    pub async fn table_names(&self) -> DbResult<Vec<String>> {
        use sqlx::Row;

        let rows = self
            .fetch_all(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
                &[],
            )
            .await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("name").map_err(DbError::from))
            .collect()
    }

    /// Register tables not yet present. Empty once `initialize` has run.
    pub async fn missing_tables(&self) -> DbResult<Vec<&'static str>> {
        schema::missing_tables(&self.pool).await
    }

    /// Returns the customer repository.
    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.pool.clone())
    }

    /// Returns the product repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let products = db.products().list().await?;
    /// ```
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Returns the sale repository.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.pool.clone())
    }

    /// Closes the store connection.
    ///
    /// ## Note
    /// After calling close, all repository operations fail with
    /// `DbError::ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing register store");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("heladeria-{}.db", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
        assert_eq!(
            db.table_names().await.unwrap(),
            vec!["Customers", "Products", "Sales"]
        );
        assert!(db.missing_tables().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_schema_can_be_deferred() {
        let db = Database::new(DbConfig::in_memory().initialize_schema(false))
            .await
            .unwrap();

        assert_eq!(db.missing_tables().await.unwrap(), schema::TABLES.to_vec());
        db.initialize().await.unwrap();
        assert!(db.missing_tables().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .connect_timeout(Duration::from_secs(2))
            .initialize_schema(false);

        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert!(!config.initialize_schema);
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.execute(
            "INSERT INTO Customers (name, address, phone) VALUES (?, ?, ?)",
            &["Ana".into(), SqlValue::Null, "555".into()],
        )
        .await
        .unwrap();

        db.initialize().await.unwrap();
        db.initialize().await.unwrap();

        assert_eq!(db.table_names().await.unwrap().len(), 3);
        let rows = db.fetch_all("SELECT name FROM Customers", &[]).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get::<String, _>("name"), "Ana");
    }

    #[tokio::test]
    async fn test_reopen_file_keeps_data() {
        let path = scratch_path();

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.execute(
            "INSERT INTO Products (name, category, unit_price) VALUES (?, ?, ?)",
            &["Vanilla Cone".into(), "Cones".into(), 2.5_f64.into()],
        )
        .await
        .unwrap();
        db.close().await;

        let reopened = Database::new(DbConfig::new(&path)).await.unwrap();
        let products = reopened.products().list().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].unit_price.cents(), 250);
        reopened.close().await;

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_execute_reports_rows_affected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let affected = db
            .execute("DELETE FROM Customers WHERE id = ?", &[99_i64.into()])
            .await
            .unwrap();
        assert_eq!(affected, 0);
    }

    #[tokio::test]
    async fn test_unopenable_path_is_connection_failure() {
        let path = std::env::temp_dir()
            .join(format!("missing-{}", uuid::Uuid::new_v4()))
            .join("nested")
            .join("heladeria.db");

        let err = Database::new(DbConfig::new(path).connect_timeout(Duration::from_secs(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
    }

    #[tokio::test]
    async fn test_closed_store_fails_operations() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        assert!(!db.health_check().await);
        let err = db.customers().list().await.unwrap_err();
        assert!(err.is_store_failure());
    }

    #[test]
    fn test_sql_value_conversions() {
        assert_eq!(SqlValue::from(Some(3_i64)), SqlValue::Integer(3));
        assert_eq!(SqlValue::from(None::<String>), SqlValue::Null);
        assert_eq!(SqlValue::from(Money::from_cents(250)), SqlValue::Real(2.5));
    }
}

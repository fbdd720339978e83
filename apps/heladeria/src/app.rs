//! # Application
//!
//! Owns the store and hands out the three register components.
//!
//! ## Ownership
//! ```text
//! Application
//! ├── Database          (the one connection)
//! ├── CustomerDirectory ─┐
//! ├── Catalog           ─┼── each holds repositories over the same connection
//! └── SalesLedger       ─┘
//! ```

use tracing::info;

use crate::catalog::Catalog;
use crate::config::{AppConfig, DateBasis};
use crate::directory::CustomerDirectory;
use crate::error::{AppError, AppResult};
use crate::ledger::SalesLedger;
use heladeria_db::{Database, DbConfig};

/// The register, ready to use.
#[derive(Debug, Clone)]
pub struct Application {
    db: Database,
    customers: CustomerDirectory,
    catalog: Catalog,
    ledger: SalesLedger,
}

impl Application {
    /// Opens the configured store and builds the register over it.
    ///
    /// ## Errors
    /// * `Store` - The store file can't be resolved, opened, or initialized
    pub async fn open(config: &AppConfig) -> AppResult<Self> {
        let path = config
            .database_path()
            .map_err(|e| AppError::store(e.to_string()))?;

        let db = Database::new(DbConfig::new(path)).await?;
        Ok(Application::with_database(db, config.register.date_basis))
    }

    /// Builds the register over an already-open store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let db = Database::new(DbConfig::in_memory()).await?;
    /// let app = Application::with_database(db, DateBasis::Utc);
    /// ```
    pub fn with_database(db: Database, date_basis: DateBasis) -> Self {
        let customers = CustomerDirectory::new(&db);
        let catalog = Catalog::new(&db);
        let ledger = SalesLedger::new(&db, date_basis);

        info!(?date_basis, "Register ready");
        Application {
            db,
            customers,
            catalog,
            ledger,
        }
    }

    pub fn customers(&self) -> &CustomerDirectory {
        &self.customers
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &SalesLedger {
        &self.ledger
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Closes the store. Further operations fail with a `Store` error.
    pub async fn close(self) {
        self.db.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::path::PathBuf;

    fn scratch_config() -> (AppConfig, PathBuf) {
        let path = std::env::temp_dir().join(format!("heladeria-app-{}.db", uuid::Uuid::new_v4()));
        let mut config = AppConfig::default();
        config.store.path = Some(path.clone());
        (config, path)
    }

    #[tokio::test]
    async fn test_open_creates_schema() {
        let (config, path) = scratch_config();

        let app = Application::open(&config).await.unwrap();
        assert!(app.database().missing_tables().await.unwrap().is_empty());
        app.close().await;

        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_data_survives_reopen() {
        let (config, path) = scratch_config();

        let app = Application::open(&config).await.unwrap();
        let cone = app.catalog().add("Vanilla Cone", Some("Cones"), 2.5).await.unwrap();
        app.ledger().sell(cone.id, 2).await.unwrap();
        app.close().await;

        let app = Application::open(&config).await.unwrap();
        assert_eq!(app.catalog().list().await.unwrap(), vec![cone]);
        assert_eq!(app.ledger().daily_total_today().await.unwrap().cents(), 500);
        app.close().await;

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_unopenable_store_is_store_error() {
        let mut config = AppConfig::default();
        config.store.path = Some(
            std::env::temp_dir()
                .join(format!("no-such-dir-{}", uuid::Uuid::new_v4()))
                .join("heladeria.db"),
        );

        let err = Application::open(&config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Store);
        assert!(!err.is_recoverable());
    }

    #[tokio::test]
    async fn test_components_share_one_store() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let app = Application::with_database(db, DateBasis::Local);

        let cone = app.catalog().add("Cone", None, 1.0).await.unwrap();
        app.ledger().sell(cone.id, 1).await.unwrap();

        assert_eq!(app.database().sales().count().await.unwrap(), 1);
        assert_eq!(app.ledger().today(), DateBasis::Local.today());
    }
}

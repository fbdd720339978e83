//! # Heladería Register
//!
//! Customers, catalog, and daily sales for a single ice-cream shop.
//!
//! ## Module Organization
//! ```text
//! heladeria/
//! ├── lib.rs        ◄─── You are here (startup & logging)
//! ├── app.rs        ◄─── Application facade
//! ├── directory.rs  ◄─── Customer directory
//! ├── catalog.rs    ◄─── Product catalog
//! ├── ledger.rs     ◄─── Sales ledger & register close
//! ├── config.rs     ◄─── heladeria.toml
//! └── error.rs      ◄─── AppError for every operation
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use heladeria::{AppConfig, Application};
//!
//! let app = Application::open(&AppConfig::default()).await?;
//! let cone = app.catalog().add("Vanilla Cone", Some("Cones"), 2.50).await?;
//! let sale = app.ledger().sell(cone.id, 3).await?;
//! assert_eq!(sale.total_price.to_string(), "$7.50");
//! ```

pub mod app;
pub mod catalog;
pub mod config;
pub mod directory;
pub mod error;
pub mod ledger;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub use app::Application;
pub use catalog::Catalog;
pub use config::{AppConfig, ConfigError, DateBasis, DEFAULT_LOG_FILTER};
pub use directory::CustomerDirectory;
pub use error::{AppError, AppResult, ErrorKind};
pub use ledger::SalesLedger;

pub use heladeria_core::{
    Customer, CustomerPatch, Money, Product, ProductPatch, Quote, Receipt, RegisterReport, Sale,
    ValidationError,
};

/// Reads the platform config file, falling back to defaults.
///
/// Runs before [`init_tracing`], so warnings about a broken file go through
/// a temporary subscriber on the default filter.
pub fn load_config() -> AppConfig {
    let startup = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .finish();

    tracing::subscriber::with_default(startup, || match config::default_config_path() {
        Ok(path) => AppConfig::load_or_default(&path),
        Err(e) => {
            warn!(error = %e, "No config directory, using defaults");
            AppConfig::default()
        }
    })
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=heladeria=trace` - Show trace for the register only
/// - Default: the `[logging] filter` from the config file
pub fn init_tracing(logging: &config::LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Opens the register, logs what is on file, and closes today's register.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Register Startup                                  │
/// │                                                                         │
/// │  1. Resolve store path ([store] path or <data_dir>/heladeria.db)       │
/// │  2. Open the store (single connection) and create missing tables       │
/// │  3. Build Directory, Catalog, Ledger                                   │
/// │  4. Log counts, report today's total                                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Errors
/// `Store` when the store can't be opened or initialized.
pub async fn run(config: &AppConfig) -> AppResult<RegisterReport> {
    info!("Starting Heladería register");

    let app = Application::open(config).await?;

    let customers = app.customers().count().await?;
    let products = app.catalog().count().await?;
    let sales = app.ledger().count().await?;
    info!(customers, products, sales, "Store loaded");

    let report = app.ledger().close_register(app.ledger().today()).await?;

    app.close().await;
    Ok(report)
}

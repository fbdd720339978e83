//! # Sales Ledger
//!
//! Selling, quoting, and the end-of-day register close.
//!
//! ## Register Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         At the Counter                                  │
//! │                                                                         │
//! │  Pick product + quantity                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  quote(product_id, qty) ──► "Total: $7.50"      (nothing written)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  checkout(product_id, qty, tendered)                                   │
//! │       ├── tendered < total → Validation, nothing written               │
//! │       └── OK → Sale committed, change returned                         │
//! │                                                                         │
//! │  End of day                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  close_register(today) ──► "Daily sales total for ...: $X.XX (N sales)"│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::DateBasis;
use crate::error::{AppError, AppResult};
use heladeria_core::validation::validate_quantity;
use heladeria_core::{change_due, Money, Quote, Receipt, RegisterReport, Sale, ValidationError};
use heladeria_db::{Database, NewSale, ProductRepository, SaleRepository};

/// Records sales and reports daily totals.
#[derive(Debug, Clone)]
pub struct SalesLedger {
    sales: SaleRepository,
    products: ProductRepository,
    date_basis: DateBasis,
}

impl SalesLedger {
    pub fn new(db: &Database, date_basis: DateBasis) -> Self {
        SalesLedger {
            sales: db.sales(),
            products: db.products(),
            date_basis,
        }
    }

    /// The day new sales are booked under.
    pub fn today(&self) -> NaiveDate {
        self.date_basis.today()
    }

    /// Sells `quantity` units at the product's current price, booked today.
    ///
    /// ## Errors
    /// * `NotFound` - No product with this id
    /// * `Validation` - Quantity is zero or negative, or the total is out of range
    pub async fn sell(&self, product_id: i64, quantity: i64) -> AppResult<Sale> {
        self.sell_on(product_id, quantity, self.today()).await
    }

    /// Sells and books the sale under `date`.
    pub async fn sell_on(&self, product_id: i64, quantity: i64, date: NaiveDate) -> AppResult<Sale> {
        let sale = self
            .sales
            .record_sale(&NewSale::new(product_id, quantity, date))
            .await?;
        Ok(sale)
    }

    /// What `sell` would charge, without writing anything.
    ///
    /// ## Errors
    /// Same as [`SalesLedger::sell`].
    pub async fn quote(&self, product_id: i64, quantity: i64) -> AppResult<Quote> {
        let product = self
            .products
            .get_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::not_found("Product", product_id))?;

        validate_quantity(quantity)?;

        let total = product
            .unit_price
            .checked_mul_quantity(quantity)
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "total_price".to_string(),
            })?;

        debug!(product_id = product_id, quantity = quantity, total = %total, "Quoted sale");
        Ok(Quote {
            product,
            quantity,
            total,
        })
    }

    /// Sells against a cash payment and returns the change.
    ///
    /// The payment is checked against the price read inside the sale
    /// transaction; a short payment writes nothing.
    ///
    /// ## Errors
    /// * `Validation` - Short payment, or any `sell` validation error
    /// * `NotFound` - No product with this id
    pub async fn checkout(
        &self,
        product_id: i64,
        quantity: i64,
        tendered: Money,
    ) -> AppResult<Receipt> {
        let sale = self
            .sales
            .record_sale(&NewSale::new(product_id, quantity, self.today()).paid_with(tendered))
            .await?;

        let change = change_due(sale.total_price, tendered)?;

        info!(sale_id = sale.id, tendered = %tendered, change = %change, "Checkout complete");
        Ok(Receipt {
            sale,
            tendered,
            change,
        })
    }

    /// Every sale, in id order.
    pub async fn list(&self) -> AppResult<Vec<Sale>> {
        Ok(self.sales.list().await?)
    }

    /// Sales booked under `date`.
    pub async fn list_for(&self, date: NaiveDate) -> AppResult<Vec<Sale>> {
        Ok(self.sales.list_by_date(date).await?)
    }

    /// Sum of sale totals on `date`. Zero when there were none.
    pub async fn daily_total(&self, date: NaiveDate) -> AppResult<Money> {
        Ok(self.sales.daily_total(date).await?)
    }

    /// [`SalesLedger::daily_total`] for today.
    pub async fn daily_total_today(&self) -> AppResult<Money> {
        self.daily_total(self.today()).await
    }

    /// The close-register report for `date`.
    pub async fn close_register(&self, date: NaiveDate) -> AppResult<RegisterReport> {
        let (sale_count, total) = self.sales.daily_summary(date).await?;

        let report = RegisterReport {
            date,
            sale_count,
            total,
        };
        info!(%date, sale_count, total = %total, "Register closed");
        Ok(report)
    }

    /// Number of sales ever recorded.
    pub async fn count(&self) -> AppResult<i64> {
        Ok(self.sales.count().await?)
    }
}

//! # Sale Repository
//!
//! Database operations for the sales ledger.
//!
//! ## Recording a Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       One Sale, One Transaction                         │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │     ├── SELECT unit_price FROM Products WHERE id = ?                   │
//! │     │      └── no row? → NotFound, rollback                            │
//! │     ├── validate quantity                                              │
//! │     ├── total = unit_price × quantity (price snapshot, storable)       │
//! │     ├── tendered given? → must cover total                             │
//! │     └── INSERT INTO Sales (product_id, quantity, total_price, date)    │
//! │  COMMIT                                                                │
//! │                                                                         │
//! │  Any error before COMMIT drops the transaction: nothing is written.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use heladeria_core::validation::validate_quantity;
use heladeria_core::{change_due, Money, Sale, ValidationError};

/// Input for [`SaleRepository::record_sale`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSale {
    pub product_id: i64,
    pub quantity: i64,
    /// Calendar day the sale is booked under.
    pub date: NaiveDate,
    /// Cash handed over, when the register takes payment.
    pub tendered: Option<Money>,
}

impl NewSale {
    /// A sale without payment tracking.
    pub fn new(product_id: i64, quantity: i64, date: NaiveDate) -> Self {
        NewSale {
            product_id,
            quantity,
            date,
            tendered: None,
        }
    }

    /// Requires `tendered` to cover the total before anything is written.
    pub fn paid_with(mut self, tendered: Money) -> Self {
        self.tendered = Some(tendered);
        self
    }
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a sale at the product's current catalog price.
    ///
    /// ## Returns
    /// * `Ok(Sale)` - The committed sale
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    /// * `Err(DbError::Validation)` - Bad quantity, total out of range, or short payment
    pub async fn record_sale(&self, new_sale: &NewSale) -> DbResult<Sale> {
        debug!(
            product_id = new_sale.product_id,
            quantity = new_sale.quantity,
            date = %new_sale.date,
            "Recording sale"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let unit_price = sqlx::query_scalar::<_, Money>("SELECT unit_price FROM Products WHERE id = ?1")
            .bind(new_sale.product_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("Product", new_sale.product_id))?;

        validate_quantity(new_sale.quantity)?;

        let total_price = unit_price
            .checked_mul_quantity(new_sale.quantity)
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "total_price".to_string(),
            })?;

        if let Some(tendered) = new_sale.tendered {
            change_due(total_price, tendered)?;
        }

        let result = sqlx::query(
            "INSERT INTO Sales (product_id, quantity, total_price, date) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(new_sale.product_id)
        .bind(new_sale.quantity)
        .bind(total_price)
        .bind(new_sale.date)
        .execute(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let sale = Sale {
            id: result.last_insert_rowid(),
            product_id: new_sale.product_id,
            quantity: new_sale.quantity,
            total_price,
            date: new_sale.date,
        };

        info!(sale_id = sale.id, total = %sale.total_price, "Sale recorded");
        Ok(sale)
    }

    /// Lists every sale in the order it was recorded.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            "SELECT id, product_id, quantity, total_price, date FROM Sales ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Lists the sales booked under one day.
    pub async fn list_by_date(&self, date: NaiveDate) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            "SELECT id, product_id, quantity, total_price, date FROM Sales \
             WHERE date = ?1 ORDER BY id",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Sum of `total_price` over one day. Zero when the day has no sales.
    ///
    /// ## Returns
    /// * `Err(DbError::Validation)` - The sum is past the storable range
    pub async fn daily_total(&self, date: NaiveDate) -> DbResult<Money> {
        let sum: f64 = sqlx::query_scalar(
            "SELECT CAST(COALESCE(SUM(total_price), 0.0) AS REAL) FROM Sales WHERE date = ?1",
        )
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(day_total(sum)?)
    }

    /// Sale count and total for one day, read in a single query.
    pub async fn daily_summary(&self, date: NaiveDate) -> DbResult<(i64, Money)> {
        let (count, sum): (i64, f64) = sqlx::query_as(
            "SELECT COUNT(*), CAST(COALESCE(SUM(total_price), 0.0) AS REAL) \
             FROM Sales WHERE date = ?1",
        )
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok((count, day_total(sum)?))
    }

    /// Counts all recorded sales (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Every sale fits the storable range, but a day's sum of them may not.
fn day_total(sum: f64) -> Result<Money, ValidationError> {
    Money::from_decimal(sum).ok_or_else(|| ValidationError::OutOfRange {
        field: "daily_total".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    async fn setup() -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let cone = db
            .products()
            .insert("Vanilla Cone", Some("Cones"), Money::from_cents(250))
            .await
            .unwrap();
        (db, cone.id)
    }

    #[tokio::test]
    async fn test_record_sale_computes_total() {
        let (db, cone) = setup().await;

        let sale = db.sales().record_sale(&NewSale::new(cone, 3, day(1))).await.unwrap();

        assert_eq!(sale.total_price.cents(), 750);
        assert_eq!(sale.date, day(1));
        assert_eq!(db.sales().list().await.unwrap(), vec![sale]);
    }

    #[tokio::test]
    async fn test_unknown_product_writes_nothing() {
        let (db, _) = setup().await;

        let err = db
            .sales()
            .record_sale(&NewSale::new(404, 1, day(1)))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { .. }));
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bad_quantity_writes_nothing() {
        let (db, cone) = setup().await;

        for qty in [0, -2] {
            let err = db
                .sales()
                .record_sale(&NewSale::new(cone, qty, day(1)))
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                DbError::Validation(ValidationError::MustBePositive { .. })
            ));
        }
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_total_writes_nothing() {
        let (db, cone) = setup().await;

        // i64::MAX overflows outright; 10^9 cones fit i64 but not the storable range
        for qty in [i64::MAX, 1_000_000_000] {
            let err = db
                .sales()
                .record_sale(&NewSale::new(cone, qty, day(1)))
                .await
                .unwrap_err();

            assert!(matches!(
                err,
                DbError::Validation(ValidationError::OutOfRange { .. })
            ));
        }

        assert_eq!(db.sales().count().await.unwrap(), 0);
        assert!(db.sales().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_largest_total_reads_back() {
        let (db, cone) = setup().await;
        let sales = db.sales();

        let big = sales
            .record_sale(&NewSale::new(cone, 400_000_000, day(1)))
            .await
            .unwrap();

        assert_eq!(big.total_price.cents(), 100_000_000_000);
        assert_eq!(sales.list().await.unwrap(), vec![big.clone()]);
        assert_eq!(sales.daily_total(day(1)).await.unwrap(), big.total_price);
    }

    #[tokio::test]
    async fn test_day_sum_past_range_is_validation() {
        let (db, cone) = setup().await;
        let sales = db.sales();

        for _ in 0..3 {
            sales
                .record_sale(&NewSale::new(cone, 400_000_000, day(1)))
                .await
                .unwrap();
        }

        assert!(matches!(
            sales.daily_total(day(1)).await.unwrap_err(),
            DbError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            sales.daily_summary(day(1)).await.unwrap_err(),
            DbError::Validation(ValidationError::OutOfRange { .. })
        ));
        // Each row is still readable on its own
        assert_eq!(sales.list().await.unwrap().len(), 3);
        assert!(sales.daily_total(day(2)).await.unwrap().is_zero());
    }

    #[tokio::test]
    async fn test_short_payment_writes_nothing() {
        let (db, cone) = setup().await;

        let err = db
            .sales()
            .record_sale(&NewSale::new(cone, 3, day(1)).paid_with(Money::from_cents(500)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DbError::Validation(ValidationError::InsufficientPayment { .. })
        ));
        assert_eq!(db.sales().count().await.unwrap(), 0);

        let exact = db
            .sales()
            .record_sale(&NewSale::new(cone, 3, day(1)).paid_with(Money::from_cents(750)))
            .await
            .unwrap();
        assert_eq!(exact.total_price.cents(), 750);
    }

    #[tokio::test]
    async fn test_total_is_a_price_snapshot() {
        let (db, cone) = setup().await;
        let sale = db.sales().record_sale(&NewSale::new(cone, 2, day(1))).await.unwrap();

        let mut product = db.products().get_by_id(cone).await.unwrap().unwrap();
        product.unit_price = Money::from_cents(400);
        db.products().update(&product).await.unwrap();

        let stored = db.sales().list().await.unwrap();
        assert_eq!(stored[0].total_price, sale.total_price);
        assert_eq!(stored[0].total_price.cents(), 500);
    }

    #[tokio::test]
    async fn test_deleting_product_keeps_its_sales() {
        let (db, cone) = setup().await;
        db.sales().record_sale(&NewSale::new(cone, 2, day(1))).await.unwrap();

        db.products().delete(cone).await.unwrap();

        let sales = db.sales().list().await.unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].product_id, cone);
        assert_eq!(db.sales().daily_total(day(1)).await.unwrap().cents(), 500);
    }

    #[tokio::test]
    async fn test_daily_total_and_summary() {
        let (db, cone) = setup().await;
        let sales = db.sales();

        assert_eq!(sales.daily_total(day(1)).await.unwrap(), Money::zero());
        assert_eq!(sales.daily_summary(day(1)).await.unwrap(), (0, Money::zero()));

        sales.record_sale(&NewSale::new(cone, 3, day(1))).await.unwrap();
        sales.record_sale(&NewSale::new(cone, 1, day(1))).await.unwrap();
        sales.record_sale(&NewSale::new(cone, 5, day(2))).await.unwrap();

        assert_eq!(sales.daily_total(day(1)).await.unwrap().cents(), 1000);
        assert_eq!(
            sales.daily_summary(day(2)).await.unwrap(),
            (1, Money::from_cents(1250))
        );
        assert_eq!(sales.list_by_date(day(1)).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_totals_add_up_exactly() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let dime = db
            .products()
            .insert("Topping", None, Money::from_cents(10))
            .await
            .unwrap();

        for _ in 0..3 {
            db.sales()
                .record_sale(&NewSale::new(dime.id, 1, day(3)))
                .await
                .unwrap();
        }

        // 0.1 + 0.1 + 0.1 in REAL arithmetic is not 0.3; the micro-unit sum is
        assert_eq!(db.sales().daily_total(day(3)).await.unwrap(), Money::from_cents(30));
    }

    #[tokio::test]
    async fn test_sub_cent_price_multiplies_exactly() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let topping = db
            .products()
            .insert("Topping", None, Money::from_micros(125_000))
            .await
            .unwrap();

        let sale = db
            .sales()
            .record_sale(&NewSale::new(topping.id, 8, day(4)))
            .await
            .unwrap();

        assert_eq!(sale.total_price, Money::from_cents(100));
        assert_eq!(db.sales().list().await.unwrap()[0].total_price, Money::from_cents(100));
    }
}

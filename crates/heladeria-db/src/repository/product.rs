//! # Product Repository
//!
//! Database operations for the catalog.
//!
//! ## Price Storage
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Price Round Trip                                   │
//! │                                                                         │
//! │  Catalog form: "2.50"                                                  │
//! │       │  validate_price                                                 │
//! │       ▼                                                                 │
//! │  Money(2_500_000) ─ encode ─► Products.unit_price REAL = 2.5           │
//! │                                       │                                 │
//! │  Money(2_500_000) ◄ decode ───────────┘ (six decimals kept)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deleting a product never touches Sales. Past sales keep their
//! `product_id` and their recorded total.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use heladeria_core::{Money, Product, ProductPatch};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let cone = repo.insert("Vanilla Cone", Some("Cones"), Money::from_cents(250)).await?;
/// let product = repo.get_by_id(cone.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product.
    ///
    /// ## Arguments
    /// * `name` - Display name (validated by the caller)
    /// * `category` - Optional grouping
    /// * `unit_price` - Catalog price
    ///
    /// ## Returns
    /// The stored product with its assigned id.
    pub async fn insert(
        &self,
        name: &str,
        category: Option<&str>,
        unit_price: Money,
    ) -> DbResult<Product> {
        debug!(name = %name, unit_price = %unit_price, "Inserting product");

        let result =
            sqlx::query("INSERT INTO Products (name, category, unit_price) VALUES (?1, ?2, ?3)")
                .bind(name)
                .bind(category)
                .bind(unit_price)
                .execute(&self.pool)
                .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            category: category.map(str::to_string),
            unit_price,
        })
    }

    /// Lists the whole catalog in insertion order.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, category, unit_price FROM Products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, category, unit_price FROM Products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Updates an existing product.
    ///
    /// Sales already recorded keep the price they were sold at.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = product.id, "Updating product");

        let result = sqlx::query(
            "UPDATE Products SET name = ?2, category = ?3, unit_price = ?4 WHERE id = ?1",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.unit_price)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product.id));
        }

        Ok(())
    }

    /// Applies a partial update inside one transaction.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The product as now stored
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    /// * `Err(DbError::Validation)` - Blank name or bad price in the patch
    pub async fn patch(&self, id: i64, patch: &ProductPatch) -> DbResult<Product> {
        debug!(id = id, "Patching product");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let current = sqlx::query_as::<_, Product>(
            "SELECT id, name, category, unit_price FROM Products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Product", id))?;

        let merged = patch.apply_to(&current)?;

        if merged != current {
            sqlx::query(
                "UPDATE Products SET name = ?2, category = ?3, unit_price = ?4 WHERE id = ?1",
            )
            .bind(merged.id)
            .bind(&merged.name)
            .bind(&merged.category)
            .bind(merged.unit_price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(merged)
    }

    /// Deletes a product from the catalog.
    ///
    /// ## Returns
    /// * `Ok(())` - Row removed (its sales stay)
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "Deleting product");

        let result = sqlx::query("DELETE FROM Products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts catalog entries (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

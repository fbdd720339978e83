//! # Customer Repository
//!
//! Database operations for the customer directory.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use heladeria_core::{Customer, CustomerPatch};

/// Repository for customer database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CustomerRepository::new(pool);
///
/// let ana = repo.insert("Ana", Some("Calle 1"), None).await?;
/// let found = repo.get_by_id(ana.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Inserts a new customer and returns it with its assigned id.
    pub async fn insert(
        &self,
        name: &str,
        address: Option<&str>,
        phone: Option<&str>,
    ) -> DbResult<Customer> {
        debug!(name = %name, "Inserting customer");

        let result = sqlx::query("INSERT INTO Customers (name, address, phone) VALUES (?1, ?2, ?3)")
            .bind(name)
            .bind(address)
            .bind(phone)
            .execute(&self.pool)
            .await?;

        Ok(Customer {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            address: address.map(str::to_string),
            phone: phone.map(str::to_string),
        })
    }

    /// Lists every customer in insertion order.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT id, name, address, phone FROM Customers ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Gets a customer by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - Customer not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, address, phone FROM Customers WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Overwrites every field of an existing customer.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Customer doesn't exist
    pub async fn update(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = customer.id, "Updating customer");

        let result =
            sqlx::query("UPDATE Customers SET name = ?2, address = ?3, phone = ?4 WHERE id = ?1")
                .bind(customer.id)
                .bind(&customer.name)
                .bind(&customer.address)
                .bind(&customer.phone)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", customer.id));
        }

        Ok(())
    }

    /// Applies a partial update.
    ///
    /// Reads the stored row, merges the patch over it, and writes it back in
    /// one transaction, so a concurrent writer can't slip between the read
    /// and the write.
    ///
    /// ## Returns
    /// * `Ok(Customer)` - The customer as now stored
    /// * `Err(DbError::NotFound)` - Customer doesn't exist
    /// * `Err(DbError::Validation)` - Patch sets a blank name
    pub async fn patch(&self, id: i64, patch: &CustomerPatch) -> DbResult<Customer> {
        debug!(id = id, "Patching customer");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let current = sqlx::query_as::<_, Customer>(
            "SELECT id, name, address, phone FROM Customers WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Customer", id))?;

        let merged = patch.apply_to(&current)?;

        if merged != current {
            sqlx::query("UPDATE Customers SET name = ?2, address = ?3, phone = ?4 WHERE id = ?1")
                .bind(merged.id)
                .bind(&merged.name)
                .bind(&merged.address)
                .bind(&merged.phone)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(merged)
    }

    /// Deletes a customer.
    ///
    /// ## Returns
    /// * `Ok(())` - Row removed
    /// * `Err(DbError::NotFound)` - Customer doesn't exist
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "Deleting customer");

        let result = sqlx::query("DELETE FROM Customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    /// Counts customers (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

//! # Customer Directory
//!
//! Validated customer operations over the store.

use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use heladeria_core::validation::validate_name;
use heladeria_core::{Customer, CustomerPatch};
use heladeria_db::{CustomerRepository, Database};

/// Customer add/list/update/delete for the register.
#[derive(Debug, Clone)]
pub struct CustomerDirectory {
    repo: CustomerRepository,
}

impl CustomerDirectory {
    pub fn new(db: &Database) -> Self {
        CustomerDirectory {
            repo: db.customers(),
        }
    }

    /// Adds a customer.
    ///
    /// ## Errors
    /// * `Validation` - Name is empty or whitespace
    pub async fn add(
        &self,
        name: &str,
        address: Option<&str>,
        phone: Option<&str>,
    ) -> AppResult<Customer> {
        validate_name(name)?;

        let customer = self.repo.insert(name, address, phone).await?;
        info!(id = customer.id, "Customer added");
        Ok(customer)
    }

    /// Every customer, in id order.
    pub async fn list(&self) -> AppResult<Vec<Customer>> {
        Ok(self.repo.list().await?)
    }

    /// Looks up one customer.
    ///
    /// ## Errors
    /// * `NotFound` - No customer with this id
    pub async fn get(&self, id: i64) -> AppResult<Customer> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer", id))
    }

    /// Replaces name, address, and phone.
    ///
    /// ## Errors
    /// * `Validation` - Name is empty or whitespace
    /// * `NotFound` - No customer with this id
    pub async fn update(
        &self,
        id: i64,
        name: &str,
        address: Option<&str>,
        phone: Option<&str>,
    ) -> AppResult<Customer> {
        validate_name(name)?;

        let customer = Customer {
            id,
            name: name.to_string(),
            address: address.map(str::to_string),
            phone: phone.map(str::to_string),
        };
        self.repo.update(&customer).await?;

        debug!(id = id, "Customer updated");
        Ok(customer)
    }

    /// Changes only the fields set on `patch`.
    ///
    /// ## Example
    /// ```rust,ignore
    /// directory.patch(ana.id, CustomerPatch::new().phone("555-0199")).await?;
    /// ```
    pub async fn patch(&self, id: i64, patch: CustomerPatch) -> AppResult<Customer> {
        let customer = self.repo.patch(id, &patch).await?;
        debug!(id = id, "Customer patched");
        Ok(customer)
    }

    /// Removes a customer.
    ///
    /// ## Errors
    /// * `NotFound` - No customer with this id
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repo.delete(id).await?;
        info!(id = id, "Customer deleted");
        Ok(())
    }

    /// Number of customers on file.
    pub async fn count(&self) -> AppResult<i64> {
        Ok(self.repo.count().await?)
    }
}

//! # Catalog
//!
//! Validated product operations over the store.
//!
//! ## Price Rules
//! ```text
//! unit_price input
//!      │
//!      ├── NaN            → Validation: "unit_price must be a number"
//!      ├── < 0            → Validation: "unit_price must not be negative"
//!      ├── ±inf / too big → Validation: "unit_price is out of range"
//!      │
//!      └── OK → stored as entered (display rounds to cents)
//! ```

use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use heladeria_core::validation::{parse_price, validate_name, validate_price};
use heladeria_core::{Money, Product, ProductPatch};
use heladeria_db::{Database, ProductRepository};

/// Product add/list/update/delete for the register.
#[derive(Debug, Clone)]
pub struct Catalog {
    repo: ProductRepository,
}

impl Catalog {
    pub fn new(db: &Database) -> Self {
        Catalog {
            repo: db.products(),
        }
    }

    /// Adds a product.
    ///
    /// ## Errors
    /// * `Validation` - Blank name or bad price
    pub async fn add(
        &self,
        name: &str,
        category: Option<&str>,
        unit_price: f64,
    ) -> AppResult<Product> {
        validate_name(name)?;
        let unit_price = validate_price(unit_price)?;

        self.insert(name, category, unit_price).await
    }

    /// Adds a product from the text typed in the price field (`"2.50"`, `"3"`).
    ///
    /// ## Errors
    /// * `Validation` - Blank name, empty or unparsable price text, bad price
    pub async fn add_from_text(
        &self,
        name: &str,
        category: Option<&str>,
        price_text: &str,
    ) -> AppResult<Product> {
        validate_name(name)?;
        let unit_price = parse_price(price_text)?;

        self.insert(name, category, unit_price).await
    }

    async fn insert(
        &self,
        name: &str,
        category: Option<&str>,
        unit_price: Money,
    ) -> AppResult<Product> {
        let product = self.repo.insert(name, category, unit_price).await?;
        info!(id = product.id, unit_price = %product.unit_price, "Product added");
        Ok(product)
    }

    /// The whole catalog, in id order.
    pub async fn list(&self) -> AppResult<Vec<Product>> {
        Ok(self.repo.list().await?)
    }

    /// Looks up one product.
    ///
    /// ## Errors
    /// * `NotFound` - No product with this id
    pub async fn get(&self, id: i64) -> AppResult<Product> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product", id))
    }

    /// Replaces name, category, and price. Recorded sales are unaffected.
    ///
    /// ## Errors
    /// * `Validation` - Blank name or bad price
    /// * `NotFound` - No product with this id
    pub async fn update(
        &self,
        id: i64,
        name: &str,
        category: Option<&str>,
        unit_price: f64,
    ) -> AppResult<Product> {
        validate_name(name)?;
        let unit_price = validate_price(unit_price)?;

        let product = Product {
            id,
            name: name.to_string(),
            category: category.map(str::to_string),
            unit_price,
        };
        self.repo.update(&product).await?;

        debug!(id = id, "Product updated");
        Ok(product)
    }

    /// Changes only the fields set on `patch`.
    pub async fn patch(&self, id: i64, patch: ProductPatch) -> AppResult<Product> {
        let product = self.repo.patch(id, &patch).await?;
        debug!(id = id, "Product patched");
        Ok(product)
    }

    /// Removes a product. Its past sales stay in the ledger.
    ///
    /// ## Errors
    /// * `NotFound` - No product with this id
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repo.delete(id).await?;
        info!(id = id, "Product deleted");
        Ok(())
    }

    /// Number of products in the catalog.
    pub async fn count(&self) -> AppResult<i64> {
        Ok(self.repo.count().await?)
    }
}

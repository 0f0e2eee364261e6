//! Catalog service - Categories and their products.
//!
//! A product's category must exist in the store; a dangling reference is
//! reported exactly like a missing one.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    Category, NewCategory, NewProduct, Product, UpdateProduct, Validatable, ValidationErrors,
    FIELD_BASE, FIELD_CATEGORY, MSG_BLANK, MSG_DEPENDENT_PRODUCTS,
};

use crate::repository::{CategoryRepository, ProductRepository};

/// Catalog service trait for dependency injection.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Validate and persist a new category
    async fn create_category(&self, category: NewCategory) -> AppResult<Category>;

    /// Get category by ID
    async fn get_category(&self, id: Uuid) -> AppResult<Category>;

    /// Find category by name ignoring case
    async fn find_category_by_name(&self, name: &str) -> AppResult<Option<Category>>;

    /// List all categories
    async fn list_categories(&self) -> AppResult<Vec<Category>>;

    /// Validate and apply a new category name
    async fn rename_category(&self, id: Uuid, category: NewCategory) -> AppResult<Category>;

    /// Delete a category that owns no products
    async fn delete_category(&self, id: Uuid) -> AppResult<()>;

    /// Validate and persist a new product
    async fn create_product(&self, product: NewProduct) -> AppResult<Product>;

    /// Get product by ID
    async fn get_product(&self, id: Uuid) -> AppResult<Product>;

    /// List all products
    async fn list_products(&self) -> AppResult<Vec<Product>>;

    /// List the products of an existing category
    async fn list_products_in_category(&self, category_id: Uuid) -> AppResult<Vec<Product>>;

    /// Validate and apply product changes
    async fn update_product(&self, id: Uuid, changes: UpdateProduct) -> AppResult<Product>;

    /// Delete product
    async fn delete_product(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of CatalogService using repositories.
pub struct CatalogManager {
    categories: Arc<dyn CategoryRepository>,
    products: Arc<dyn ProductRepository>,
}

impl CatalogManager {
    /// Create new catalog service instance with repositories
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            categories,
            products,
        }
    }

    /// Record a blank category when `category_id` names no stored category.
    async fn check_category_exists(
        &self,
        category_id: Option<Uuid>,
        errors: &mut ValidationErrors,
    ) -> AppResult<()> {
        let Some(category_id) = category_id else {
            return Ok(());
        };
        if self.categories.find_by_id(category_id).await?.is_none() {
            errors.add(FIELD_CATEGORY, MSG_BLANK);
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogService for CatalogManager {
    async fn create_category(&self, category: NewCategory) -> AppResult<Category> {
        let name = category.validated()?;
        let category = self.categories.create(name).await?;

        tracing::info!(category_id = %category.id, "Category created");
        Ok(category)
    }

    async fn get_category(&self, id: Uuid) -> AppResult<Category> {
        self.categories.find_by_id(id).await?.ok_or_not_found()
    }

    async fn find_category_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        self.categories.find_by_name(name).await
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.categories.list().await
    }

    async fn rename_category(&self, id: Uuid, category: NewCategory) -> AppResult<Category> {
        let name = category.validated()?;
        self.categories.update(id, name).await
    }

    async fn delete_category(&self, id: Uuid) -> AppResult<()> {
        if self.products.count_by_category(id).await? > 0 {
            return Err(AppError::validation(FIELD_BASE, MSG_DEPENDENT_PRODUCTS));
        }
        self.categories.delete(id).await
    }

    async fn create_product(&self, product: NewProduct) -> AppResult<Product> {
        let mut errors = ValidationErrors::new();
        self.check_category_exists(product.category_id, &mut errors)
            .await?;

        let attributes = product.validated(errors)?;
        let product = self.products.create(attributes).await?;

        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    async fn get_product(&self, id: Uuid) -> AppResult<Product> {
        self.products.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_products(&self) -> AppResult<Vec<Product>> {
        self.products.list().await
    }

    async fn list_products_in_category(&self, category_id: Uuid) -> AppResult<Vec<Product>> {
        self.get_category(category_id).await?;
        self.products.list_by_category(category_id).await
    }

    async fn update_product(&self, id: Uuid, changes: UpdateProduct) -> AppResult<Product> {
        let mut errors = ValidationErrors::new();
        self.check_category_exists(changes.category_id, &mut errors)
            .await?;
        changes.validate_into(&mut errors);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        self.products.update(id, changes).await
    }

    async fn delete_product(&self, id: Uuid) -> AppResult<()> {
        self.products.delete(id).await
    }
}

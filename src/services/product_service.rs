//! Product service - catalog queries, admin CRUD and embedded reviews.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{MAX_RATING, MIN_RATING, RESULTS_PER_PAGE};
use crate::domain::{CreateProduct, Product, Review, UpdateProduct};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::ProductRepository;
use crate::query::{ProductQuery, RawParams};

/// One page of catalog results plus the counts the storefront paginates by.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListing {
    pub products: Vec<Product>,
    /// Total catalog size, ignoring filters
    pub product_count: u64,
    /// Matches for the active filters across all pages
    pub filtered_count: u64,
    pub results_per_page: i64,
}

/// Product service trait for dependency injection.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Query the catalog with keyword search, field filters and pagination.
    async fn list_products(&self, params: RawParams) -> AppResult<ProductListing>;

    /// Load a single product.
    async fn get_product(&self, id: Uuid) -> AppResult<Product>;

    /// Add a product to the catalog (admin).
    async fn create_product(&self, input: CreateProduct, created_by: Uuid) -> AppResult<Product>;

    /// Apply a partial product update (admin).
    async fn update_product(&self, id: Uuid, changes: UpdateProduct) -> AppResult<Product>;

    /// Remove a product from the catalog (admin).
    async fn delete_product(&self, id: Uuid) -> AppResult<()>;

    /// Record a review, replacing the caller's earlier review if present.
    async fn submit_review(
        &self,
        product_id: Uuid,
        user_id: Uuid,
        user_name: String,
        rating: f64,
        comment: String,
    ) -> AppResult<()>;

    /// Reviews of a single product.
    async fn get_reviews(&self, product_id: Uuid) -> AppResult<Vec<Review>>;

    /// Remove a review and refresh the product's rating aggregates (admin).
    async fn delete_review(&self, product_id: Uuid, review_id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of ProductService.
pub struct ProductManager {
    products: Arc<dyn ProductRepository>,
}

impl ProductManager {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductService for ProductManager {
    async fn list_products(&self, params: RawParams) -> AppResult<ProductListing> {
        let query = ProductQuery::from_params(&params);
        let filter = query.filter_doc();

        // The count uses the same filter as the fetch but never the window,
        // so it stays identical across pages of one search.
        let product_count = self.products.count_all().await?;
        let filtered_count = self.products.count(filter.clone()).await?;
        let products = self
            .products
            .find_filtered(filter, query.skip(), query.limit())
            .await?;

        Ok(ProductListing {
            products,
            product_count,
            filtered_count,
            results_per_page: RESULTS_PER_PAGE,
        })
    }

    async fn get_product(&self, id: Uuid) -> AppResult<Product> {
        self.products.find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_product(&self, input: CreateProduct, created_by: Uuid) -> AppResult<Product> {
        let product = Product::new(input, created_by);
        self.products.insert(&product).await?;
        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    async fn update_product(&self, id: Uuid, changes: UpdateProduct) -> AppResult<Product> {
        self.products.update(id, changes).await?.ok_or_not_found()
    }

    async fn delete_product(&self, id: Uuid) -> AppResult<()> {
        if !self.products.delete(id).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }

    async fn submit_review(
        &self,
        product_id: Uuid,
        user_id: Uuid,
        user_name: String,
        rating: f64,
        comment: String,
    ) -> AppResult<()> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::validation("Rating must be between 1 and 5"));
        }

        let mut product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_not_found()?;

        product.upsert_review(user_id, user_name, rating, comment);
        self.products.save_reviews(&product).await
    }

    async fn get_reviews(&self, product_id: Uuid) -> AppResult<Vec<Review>> {
        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_not_found()?;
        Ok(product.reviews)
    }

    async fn delete_review(&self, product_id: Uuid, review_id: Uuid) -> AppResult<()> {
        let mut product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_not_found()?;

        if !product.remove_review(review_id) {
            return Err(AppError::NotFound);
        }

        self.products.save_reviews(&product).await
    }
}

//! Product repository - MongoDB persistence for the catalog.

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::Collection;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::domain::{Product, UpdateProduct};
use crate::errors::AppResult;
use crate::infra::db::Database;
use crate::infra::repositories::{bson_value, id_filter};

/// Persistence operations for catalog products.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert(&self, product: &Product) -> AppResult<()>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>>;

    /// Page of products matching `filter`.
    async fn find_filtered(
        &self,
        filter: Document,
        skip: u64,
        limit: Option<i64>,
    ) -> AppResult<Vec<Product>>;

    /// Number of products matching `filter`, ignoring pagination.
    async fn count(&self, filter: Document) -> AppResult<u64>;

    /// Catalog size.
    async fn count_all(&self) -> AppResult<u64>;

    /// Apply a partial update and return the updated product.
    async fn update(&self, id: Uuid, changes: UpdateProduct) -> AppResult<Option<Product>>;

    /// Persist the embedded reviews plus their derived aggregates.
    async fn save_reviews(&self, product: &Product) -> AppResult<()>;

    /// Atomically subtract fulfilled quantity from stock.
    async fn decrement_stock(&self, id: Uuid, quantity: i64) -> AppResult<()>;

    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// MongoDB-backed product repository.
#[derive(Clone)]
pub struct ProductStore {
    collection: Collection<Product>,
}

impl ProductStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.products(),
        }
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn insert(&self, product: &Product) -> AppResult<()> {
        self.collection.insert_one(product).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    async fn find_filtered(
        &self,
        filter: Document,
        skip: u64,
        limit: Option<i64>,
    ) -> AppResult<Vec<Product>> {
        let options = FindOptions::builder().skip(skip).limit(limit).build();
        let cursor = self.collection.find(filter).with_options(options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn count(&self, filter: Document) -> AppResult<u64> {
        Ok(self.collection.count_documents(filter).await?)
    }

    async fn count_all(&self) -> AppResult<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    async fn update(&self, id: Uuid, changes: UpdateProduct) -> AppResult<Option<Product>> {
        let mut fields = Document::new();
        if let Some(name) = changes.name {
            fields.insert("name", name);
        }
        if let Some(description) = changes.description {
            fields.insert("description", description);
        }
        if let Some(price) = changes.price {
            fields.insert("price", price);
        }
        if let Some(category) = changes.category {
            fields.insert("category", category);
        }
        if let Some(stock) = changes.stock {
            fields.insert("stock", stock);
        }
        if let Some(images) = changes.images {
            fields.insert("images", bson_value(&images));
        }

        if fields.is_empty() {
            return self.find_by_id(id).await;
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self
            .collection
            .find_one_and_update(id_filter(id), doc! { "$set": fields })
            .with_options(options)
            .await?)
    }

    async fn save_reviews(&self, product: &Product) -> AppResult<()> {
        self.collection
            .update_one(
                id_filter(product.id),
                doc! {
                    "$set": {
                        "reviews": bson_value(&product.reviews),
                        "num_of_reviews": product.num_of_reviews as i64,
                        "ratings": product.ratings,
                    },
                },
            )
            .await?;
        Ok(())
    }

    async fn decrement_stock(&self, id: Uuid, quantity: i64) -> AppResult<()> {
        self.collection
            .update_one(id_filter(id), doc! { "$inc": { "stock": -quantity } })
            .await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }
}

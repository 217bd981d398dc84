//! Order repository - MongoDB persistence for orders.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::Collection;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::domain::{Order, OrderStatus};
use crate::errors::AppResult;
use crate::infra::db::Database;
use crate::infra::repositories::{bson_value, id_filter};

/// Persistence operations for orders.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn insert(&self, order: &Order) -> AppResult<()>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>>;

    /// All orders placed by one user.
    async fn find_by_user(&self, user: Uuid) -> AppResult<Vec<Order>>;

    async fn find_all(&self) -> AppResult<Vec<Order>>;

    /// Move an order to `status`, stamping delivery time when given.
    async fn set_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        delivered_at: Option<DateTime<Utc>>,
    ) -> AppResult<()>;

    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// MongoDB-backed order repository.
#[derive(Clone)]
pub struct OrderStore {
    collection: Collection<Order>,
}

impl OrderStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.orders(),
        }
    }
}

#[async_trait]
impl OrderRepository for OrderStore {
    async fn insert(&self, order: &Order) -> AppResult<()> {
        self.collection.insert_one(order).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    async fn find_by_user(&self, user: Uuid) -> AppResult<Vec<Order>> {
        let cursor = self
            .collection
            .find(doc! { "user": bson_value(&user) })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_all(&self) -> AppResult<Vec<Order>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        delivered_at: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        let mut fields = Document::new();
        fields.insert("status", bson_value(&status));
        if let Some(delivered_at) = delivered_at {
            fields.insert("delivered_at", bson_value(&delivered_at));
        }

        self.collection
            .update_one(id_filter(id), doc! { "$set": fields })
            .await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }
}

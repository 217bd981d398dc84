//! User repository - MongoDB persistence for user accounts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::Collection;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::domain::{UpdateUser, User};
use crate::errors::{AppError, AppResult};
use crate::infra::db::{is_duplicate_key, Database};
use crate::infra::repositories::{bson_value, id_filter};

/// Persistence operations for user accounts.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Duplicate emails surface as a conflict.
    async fn insert(&self, user: &User) -> AppResult<()>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Look up the account holding the given reset token digest.
    async fn find_by_reset_digest(&self, digest: &str) -> AppResult<Option<User>>;

    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Apply a partial update and return the updated account.
    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<Option<User>>;

    /// Replace the credential hash and drop any outstanding reset token.
    async fn set_password(&self, id: Uuid, password_hash: &str) -> AppResult<()>;

    /// Record a reset token digest with its expiry.
    async fn set_reset_token(
        &self,
        id: Uuid,
        digest: &str,
        expires: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Remove the reset token fields (redeemed, or rolled back).
    async fn clear_reset_token(&self, id: Uuid) -> AppResult<()>;

    /// Delete an account. Returns false when it did not exist.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// MongoDB-backed user repository.
#[derive(Clone)]
pub struct UserStore {
    collection: Collection<User>,
}

impl UserStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.users(),
        }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn insert(&self, user: &User) -> AppResult<()> {
        self.collection.insert_one(user).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::conflict("Email")
            } else {
                AppError::from(e)
            }
        })?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    async fn find_by_reset_digest(&self, digest: &str) -> AppResult<Option<User>> {
        Ok(self
            .collection
            .find_one(doc! { "reset_password_token": digest })
            .await?)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<Option<User>> {
        let mut fields = Document::new();
        if let Some(name) = changes.name {
            fields.insert("name", name);
        }
        if let Some(email) = changes.email {
            fields.insert("email", email);
        }
        if let Some(role) = changes.role {
            fields.insert("role", bson_value(&role));
        }

        if fields.is_empty() {
            return self.find_by_id(id).await;
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection
            .find_one_and_update(id_filter(id), doc! { "$set": fields })
            .with_options(options)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::conflict("Email")
                } else {
                    AppError::from(e)
                }
            })
    }

    async fn set_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        self.collection
            .update_one(
                id_filter(id),
                doc! {
                    "$set": { "password_hash": password_hash },
                    "$unset": { "reset_password_token": "", "reset_password_expire": "" },
                },
            )
            .await?;
        Ok(())
    }

    async fn set_reset_token(
        &self,
        id: Uuid,
        digest: &str,
        expires: DateTime<Utc>,
    ) -> AppResult<()> {
        self.collection
            .update_one(
                id_filter(id),
                doc! {
                    "$set": {
                        "reset_password_token": digest,
                        "reset_password_expire": bson_value(&expires),
                    },
                },
            )
            .await?;
        Ok(())
    }

    async fn clear_reset_token(&self, id: Uuid) -> AppResult<()> {
        self.collection
            .update_one(
                id_filter(id),
                doc! {
                    "$unset": { "reset_password_token": "", "reset_password_expire": "" },
                },
            )
            .await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }
}

//! User service - profile management and admin account administration.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{UpdateUser, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::media::ImageStore;
use crate::infra::repositories::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Load a single account.
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// List every account (admin).
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Apply a self-service profile edit. Never touches the role.
    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<String>,
        email: Option<String>,
    ) -> AppResult<User>;

    /// Apply an admin edit, which may also change the role.
    async fn update_user(&self, id: Uuid, input: UpdateUser) -> AppResult<User>;

    /// Delete an account and its stored avatar (admin).
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
    images: Arc<dyn ImageStore>,
}

impl UserManager {
    pub fn new(users: Arc<dyn UserRepository>, images: Arc<dyn ImageStore>) -> Self {
        Self { users, images }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.find_all().await
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<String>,
        email: Option<String>,
    ) -> AppResult<User> {
        self.update_user(
            id,
            UpdateUser {
                name,
                email,
                role: None,
            },
        )
        .await
    }

    async fn update_user(&self, id: Uuid, input: UpdateUser) -> AppResult<User> {
        self.users.update(id, input).await?.ok_or_not_found()
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        let user = self.users.find_by_id(id).await?.ok_or_not_found()?;

        // A dangling avatar is tolerable; a half-deleted account is not.
        if let Err(e) = self.images.destroy(user.avatar.public_id.clone()).await {
            tracing::warn!(user_id = %id, error = %e, "Failed to remove avatar, continuing");
        }

        if !self.users.delete(id).await? {
            return Err(AppError::NotFound);
        }

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}

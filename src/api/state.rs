//! Application state - dependency injection container.
//!
//! Provides centralized access to all application services.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::db::Database;
use crate::infra::email::{LogMailer, Mailer, SmtpMailer};
use crate::infra::media::{CloudinaryStore, DisabledImageStore, ImageStore};
use crate::infra::repositories::{OrderStore, ProductStore, UserStore};
use crate::services::{
    AuthService, Authenticator, OrderManager, OrderService, ProductManager, ProductService,
    UserManager, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Product service
    pub product_service: Arc<dyn ProductService>,
    /// Order service
    pub order_service: Arc<dyn OrderService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the full service graph over live infrastructure.
    ///
    /// Image storage and email fall back to inert implementations when their
    /// settings are absent, so local development needs neither vendor.
    pub fn from_config(database: Arc<Database>, config: Config) -> AppResult<Self> {
        let users = Arc::new(UserStore::new(&database));
        let products = Arc::new(ProductStore::new(&database));
        let orders = Arc::new(OrderStore::new(&database));

        let images: Arc<dyn ImageStore> = match config.cloudinary.clone() {
            Some(settings) => Arc::new(CloudinaryStore::new(settings)),
            None => {
                tracing::warn!("Image storage not configured, avatar uploads will fail");
                Arc::new(DisabledImageStore)
            }
        };

        let mailer: Arc<dyn Mailer> = match &config.smtp {
            Some(settings) => Arc::new(SmtpMailer::new(settings)?),
            None => {
                tracing::warn!("SMTP not configured, emails will be logged instead of sent");
                Arc::new(LogMailer)
            }
        };

        let auth_service = Arc::new(Authenticator::new(
            users.clone(),
            images.clone(),
            mailer,
            config,
        ));
        let user_service = Arc::new(UserManager::new(users.clone(), images));
        let product_service = Arc::new(ProductManager::new(products.clone()));
        let order_service = Arc::new(OrderManager::new(orders, products, users));

        Ok(Self {
            auth_service,
            user_service,
            product_service,
            order_service,
            database,
        })
    }

    /// Create application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        product_service: Arc<dyn ProductService>,
        order_service: Arc<dyn OrderService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            product_service,
            order_service,
            database,
        }
    }
}

//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Outbound email delivery
//! - Hosted image storage

pub mod db;
pub mod email;
pub mod media;
pub mod repositories;

pub use db::{is_duplicate_key, Database};
pub use email::{EmailMessage, LogMailer, Mailer, SmtpMailer};
pub use media::{CloudinaryStore, DisabledImageStore, ImageStore, ImageUpload};
pub use repositories::{
    OrderRepository, OrderStore, ProductRepository, ProductStore, UserRepository, UserStore,
};

//! Domain layer - Core business entities and logic
//!
//! Entities, value objects and the validation helpers that guard writes.
//! Nothing in here touches the database or the network.

pub mod image;
pub mod order;
pub mod password;
pub mod product;
pub mod reset_token;
pub mod user;
pub mod validation;

pub use image::StoredImage;
pub use order::{CreateOrder, Order, OrderItem, OrderStatus, PaymentInfo, ShippingInfo};
pub use password::Password;
pub use product::{CreateProduct, Product, Review, UpdateProduct};
pub use reset_token::ResetToken;
pub use user::{CreateUser, UpdateUser, User, UserResponse, UserRole};

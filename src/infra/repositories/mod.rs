//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod order_repository;
mod product_repository;
mod user_repository;

use mongodb::bson::{doc, to_bson, Bson, Document};
use serde::Serialize;
use uuid::Uuid;

pub use order_repository::{OrderRepository, OrderStore};
pub use product_repository::{ProductRepository, ProductStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for unit tests
#[cfg(test)]
pub use order_repository::MockOrderRepository;
#[cfg(test)]
pub use product_repository::MockProductRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;

/// Primary key filter for a document stored under a UUID `_id`.
pub(crate) fn id_filter(id: Uuid) -> Document {
    doc! { "_id": bson_value(&id) }
}

/// Serialize any value to BSON the same way the stored structs are, so
/// filters always agree with document fields.
pub(crate) fn bson_value<T: Serialize>(value: &T) -> Bson {
    to_bson(value).unwrap_or(Bson::Null)
}

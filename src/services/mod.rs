//! Application services layer - use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;
mod order_service;
mod product_service;
mod user_service;

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, SessionToken};
pub use order_service::{OrderCustomer, OrderDetail, OrderManager, OrderService, OrdersSummary};
pub use product_service::{ProductListing, ProductManager, ProductService};
pub use user_service::{UserManager, UserService};

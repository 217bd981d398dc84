//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, order_handler, product_handler, user_handler};
use crate::config::SESSION_COOKIE;
use crate::domain::{
    Order, OrderItem, OrderStatus, PaymentInfo, Product, Review, ShippingInfo, StoredImage,
    UserResponse, UserRole,
};
use crate::services::{OrderCustomer, OrderDetail, OrdersSummary, ProductListing};
use crate::types::MessageResponse;

/// OpenAPI documentation for the TruGoods API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "TruGoods API",
        version = "0.1.0",
        description = "E-commerce REST backend: cookie sessions, product catalog with reviews, order management",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "API Support", email = "support@trugoods.example")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::logout,
        auth_handler::forgot_password,
        auth_handler::reset_password,
        auth_handler::update_password,
        // User endpoints
        user_handler::profile,
        user_handler::update_profile,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
        // Product and review endpoints
        product_handler::list_products,
        product_handler::get_product,
        product_handler::create_product,
        product_handler::update_product,
        product_handler::delete_product,
        product_handler::submit_review,
        product_handler::get_reviews,
        product_handler::delete_review,
        // Order endpoints
        order_handler::create_order,
        order_handler::get_order,
        order_handler::my_orders,
        order_handler::list_orders,
        order_handler::update_order,
        order_handler::delete_order,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            StoredImage,
            Product,
            Review,
            Order,
            OrderItem,
            OrderStatus,
            PaymentInfo,
            ShippingInfo,
            // Service response types
            ProductListing,
            OrderDetail,
            OrderCustomer,
            OrdersSummary,
            // Handler request/response types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::ForgotPasswordRequest,
            auth_handler::ResetPasswordRequest,
            auth_handler::UpdatePasswordRequest,
            auth_handler::AuthResponse,
            user_handler::UpdateProfileRequest,
            user_handler::UpdateUserRequest,
            product_handler::CreateProductRequest,
            product_handler::UpdateProductRequest,
            product_handler::ReviewRequest,
            order_handler::CreateOrderRequest,
            order_handler::UpdateOrderRequest,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, sessions and password recovery"),
        (name = "Users", description = "Profile and account administration"),
        (name = "Products", description = "Catalog browsing and administration"),
        (name = "Reviews", description = "Product reviews"),
        (name = "Orders", description = "Checkout and fulfillment")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for the session cookie
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    SESSION_COOKIE,
                    "HTTP-only session cookie set by login and registration",
                ))),
            );
        }
    }
}

//! Application route configuration.

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{auth_handler, order_handler, product_handler, user_handler};
use super::middleware::{authenticate, require_admin};
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    // Public routes, no session required
    let public = Router::new()
        .route("/register", post(auth_handler::register))
        .route("/login", post(auth_handler::login))
        .route("/logout", get(auth_handler::logout))
        .route("/password/forgot", post(auth_handler::forgot_password))
        .route("/password/reset/:token", put(auth_handler::reset_password))
        .route("/products", get(product_handler::list_products))
        .route("/product/:id", get(product_handler::get_product))
        .route("/reviews", get(product_handler::get_reviews));

    // Routes requiring a valid session
    let session = Router::new()
        .route("/profile", get(user_handler::profile))
        .route("/profile/update", put(user_handler::update_profile))
        .route("/password/update", put(auth_handler::update_password))
        .route("/review", put(product_handler::submit_review))
        .route("/reviews", delete(product_handler::delete_review))
        .route("/order/new", post(order_handler::create_order))
        .route("/order/:id", get(order_handler::get_order))
        .route("/orders/me", get(order_handler::my_orders))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    // Admin routes require a session and then the admin role.
    // Layers run outside-in, so authenticate is added last to run first.
    let admin = Router::new()
        .route("/admin/users", get(user_handler::list_users))
        .route(
            "/admin/user/:id",
            get(user_handler::get_user)
                .put(user_handler::update_user)
                .delete(user_handler::delete_user),
        )
        .route("/admin/product/new", post(product_handler::create_product))
        .route(
            "/admin/product/:id",
            put(product_handler::update_product).delete(product_handler::delete_product),
        )
        .route("/admin/orders", get(order_handler::list_orders))
        .route(
            "/admin/order/:id",
            put(order_handler::update_order).delete(order_handler::delete_order),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    Router::new()
        // Health check endpoints
        .route("/", get(root))
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Versioned API surface
        .nest("/api/v1", public.merge(session).merge(admin))
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Welcome to the TruGoods API"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: ServiceStatus,
}

/// Individual service health status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match state.database.ping().await {
        Ok(_) => ServiceStatus {
            status: "healthy",
            error: None,
        },
        Err(e) => ServiceStatus {
            status: "unhealthy",
            error: Some(e.to_string()),
        },
    };

    let healthy = database.status == "healthy";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        database,
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}

//! Order handlers - checkout, own orders and admin fulfillment.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateOrder, Order, OrderItem, PaymentInfo, ShippingInfo};
use crate::errors::AppResult;
use crate::services::{OrderDetail, OrdersSummary};
use crate::types::MessageResponse;

/// Checkout request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    pub shipping_info: ShippingInfo,
    /// Purchased line items
    #[validate(length(min = 1, message = "Order must contain at least one item"))]
    pub order_items: Vec<OrderItem>,
    pub payment_info: PaymentInfo,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    #[schema(example = 100.0)]
    pub items_price: f64,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    #[schema(example = 20.0)]
    pub tax_price: f64,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    #[schema(example = 5.0)]
    pub shipping_price: f64,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    #[schema(example = 125.0)]
    pub total_price: f64,
}

/// Fulfillment status update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderRequest {
    /// Target status: Processing, Shipped or Delivered
    #[schema(example = "Shipped")]
    pub status: String,
}

/// Place an order for the logged-in user
#[utoipa::path(
    post,
    path = "/api/v1/order/new",
    tag = "Orders",
    request_body = CreateOrderRequest,
    security(("session_cookie" = [])),
    responses(
        (status = 201, description = "Order placed", body = Order),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_order(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = state
        .order_service
        .create_order(
            current.id,
            CreateOrder {
                shipping_info: payload.shipping_info,
                order_items: payload.order_items,
                payment_info: payload.payment_info,
                items_price: payload.items_price,
                tax_price: payload.tax_price,
                shipping_price: payload.shipping_price,
                total_price: payload.total_price,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// Get a single order with its customer resolved
#[utoipa::path(
    get,
    path = "/api/v1/order/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Order found", body = OrderDetail),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<OrderDetail>> {
    let detail = state.order_service.get_order(id).await?;
    Ok(Json(detail))
}

/// List the logged-in user's orders
#[utoipa::path(
    get,
    path = "/api/v1/orders/me",
    tag = "Orders",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Caller's orders", body = [Order]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_orders(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.order_service.my_orders(current.id).await?;
    Ok(Json(orders))
}

/// List every order with the summed revenue (admin)
#[utoipa::path(
    get,
    path = "/api/v1/admin/orders",
    tag = "Orders",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "All orders plus revenue total", body = OrdersSummary),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_orders(State(state): State<AppState>) -> AppResult<Json<OrdersSummary>> {
    let summary = state.order_service.list_orders().await?;
    Ok(Json(summary))
}

/// Advance an order's fulfillment status (admin)
#[utoipa::path(
    put,
    path = "/api/v1/admin/order/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderRequest,
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Status updated", body = Order),
        (status = 400, description = "Unknown status label"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order already delivered")
    )
)]
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateOrderRequest>,
) -> AppResult<Json<Order>> {
    let status = payload.status.parse()?;
    let order = state.order_service.update_status(id, status).await?;
    Ok(Json(order))
}

/// Delete an order (admin)
#[utoipa::path(
    delete,
    path = "/api/v1/admin/order/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Order deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.order_service.delete_order(id).await?;
    Ok(Json(MessageResponse::new("Order deleted successfully")))
}

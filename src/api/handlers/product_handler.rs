//! Product handlers - public catalog access, admin CRUD and reviews.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateProduct, Product, Review, StoredImage, UpdateProduct};
use crate::errors::AppResult;
use crate::query::RawParams;
use crate::services::ProductListing;
use crate::types::MessageResponse;

/// Product creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    /// Product name
    #[validate(length(min = 1, message = "Product name is required"))]
    #[schema(example = "Mechanical Keyboard")]
    pub name: String,
    /// Product description
    #[validate(length(min = 1, message = "Product description is required"))]
    #[schema(example = "Tenkeyless, hot-swappable switches")]
    pub description: String,
    /// Unit price
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    #[schema(example = 89.0)]
    pub price: f64,
    /// Catalog category
    #[validate(length(min = 1, message = "Product category is required"))]
    #[schema(example = "Electronics")]
    pub category: String,
    /// Units in stock
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[schema(example = 25)]
    pub stock: i64,
    /// Previously uploaded image references
    #[serde(default)]
    pub images: Vec<StoredImage>,
}

/// Product update request (all fields optional)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, message = "Product name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Product description cannot be empty"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
    #[validate(length(min = 1, message = "Product category cannot be empty"))]
    pub category: Option<String>,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i64>,
    pub images: Option<Vec<StoredImage>>,
}

/// Review submission request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReviewRequest {
    /// Product being reviewed
    pub product_id: Uuid,
    /// Rating between 1 and 5
    #[validate(range(min = 1.0, max = 5.0, message = "Rating must be between 1 and 5"))]
    #[schema(example = 4.5, minimum = 1.0, maximum = 5.0)]
    pub rating: f64,
    /// Review text
    #[schema(example = "Solid build, keys feel great")]
    pub comment: String,
}

/// Review listing query
#[derive(Debug, Deserialize, IntoParams)]
pub struct ReviewsQuery {
    /// Product whose reviews to list
    pub id: Uuid,
}

/// Review deletion query
#[derive(Debug, Deserialize, IntoParams)]
pub struct DeleteReviewQuery {
    /// Product the review belongs to
    pub product_id: Uuid,
    /// Review to delete
    pub id: Uuid,
}

/// Browse the catalog with search, filters and pagination
#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "Products",
    params(
        ("keyword" = Option<String>, Query, description = "Case-insensitive match on product names"),
        ("page" = Option<u64>, Query, description = "1-indexed page, 9 products per page"),
        ("category" = Option<String>, Query, description = "Exact category match; other fields filter the same way"),
        ("price[gte]" = Option<f64>, Query, description = "Comparison filters: gt, gte, lt, lte")
    ),
    responses(
        (status = 200, description = "One page of matching products", body = ProductListing)
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<RawParams>,
) -> AppResult<Json<ProductListing>> {
    let listing = state.product_service.list_products(params).await?;
    Ok(Json(listing))
}

/// Get a single product
#[utoipa::path(
    get,
    path = "/api/v1/product/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let product = state.product_service.get_product(id).await?;
    Ok(Json(product))
}

/// Add a product to the catalog (admin)
#[utoipa::path(
    post,
    path = "/api/v1/admin/product/new",
    tag = "Products",
    request_body = CreateProductRequest,
    security(("session_cookie" = [])),
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let product = state
        .product_service
        .create_product(
            CreateProduct {
                name: payload.name,
                description: payload.description,
                price: payload.price,
                category: payload.category,
                stock: payload.stock,
                images: payload.images,
            },
            current.id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product (admin)
#[utoipa::path(
    put,
    path = "/api/v1/admin/product/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> AppResult<Json<Product>> {
    let product = state
        .product_service
        .update_product(
            id,
            UpdateProduct {
                name: payload.name,
                description: payload.description,
                price: payload.price,
                category: payload.category,
                stock: payload.stock,
                images: payload.images,
            },
        )
        .await?;

    Ok(Json(product))
}

/// Remove a product from the catalog (admin)
#[utoipa::path(
    delete,
    path = "/api/v1/admin/product/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.product_service.delete_product(id).await?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

/// Submit or overwrite the caller's review of a product
#[utoipa::path(
    put,
    path = "/api/v1/review",
    tag = "Reviews",
    request_body = ReviewRequest,
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Review recorded", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn submit_review(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<ReviewRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .product_service
        .submit_review(
            payload.product_id,
            current.id,
            current.name,
            payload.rating,
            payload.comment,
        )
        .await?;

    Ok(Json(MessageResponse::new("Review saved")))
}

/// List the reviews of a product
#[utoipa::path(
    get,
    path = "/api/v1/reviews",
    tag = "Reviews",
    params(ReviewsQuery),
    responses(
        (status = 200, description = "Reviews of the product", body = [Review]),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_reviews(
    State(state): State<AppState>,
    Query(query): Query<ReviewsQuery>,
) -> AppResult<Json<Vec<Review>>> {
    let reviews = state.product_service.get_reviews(query.id).await?;
    Ok(Json(reviews))
}

/// Delete a review
#[utoipa::path(
    delete,
    path = "/api/v1/reviews",
    tag = "Reviews",
    params(DeleteReviewQuery),
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Review removed, aggregates refreshed", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Product or review not found")
    )
)]
pub async fn delete_review(
    State(state): State<AppState>,
    Query(query): Query<DeleteReviewQuery>,
) -> AppResult<Json<MessageResponse>> {
    state
        .product_service
        .delete_review(query.product_id, query.id)
        .await?;

    Ok(Json(MessageResponse::new("Review deleted successfully")))
}

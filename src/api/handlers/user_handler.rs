//! User handlers - own profile plus admin account management.

use axum::{
    extract::{Path, State},
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
use crate::domain::{UpdateUser, UserResponse, UserRole};
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Self-service profile update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    /// New display name
    #[validate(length(min = 4, max = 30, message = "Name must be between 4 and 30 characters"))]
    #[schema(example = "John Doe")]
    pub name: Option<String>,
    /// New email address
    #[validate(email(message = "Please enter a valid email"))]
    #[schema(example = "user@example.com")]
    pub email: Option<String>,
}

/// Admin account update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// New display name
    #[validate(length(min = 4, max = 30, message = "Name must be between 4 and 30 characters"))]
    #[schema(example = "John Doe")]
    pub name: Option<String>,
    /// New email address
    #[validate(email(message = "Please enter a valid email"))]
    #[schema(example = "user@example.com")]
    pub email: Option<String>,
    /// New role
    pub role: Option<UserRole>,
}

/// Get the logged-in user's profile
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    tag = "Users",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(current.id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update the logged-in user's profile
#[utoipa::path(
    put,
    path = "/api/v1/profile/update",
    tag = "Users",
    request_body = UpdateProfileRequest,
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .update_profile(current.id, payload.name, payload.email)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// List all users (admin)
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    tag = "Users",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "All user accounts", body = [UserResponse]),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get a single user (admin)
#[utoipa::path(
    get,
    path = "/api/v1/admin/user/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update a user's name, email or role (admin)
#[utoipa::path(
    put,
    path = "/api/v1/admin/user/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .update_user(
            id,
            UpdateUser {
                name: payload.name,
                email: payload.email,
                role: payload.role,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Delete a user (admin)
#[utoipa::path(
    delete,
    path = "/api/v1/admin/user/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.user_service.delete_user(id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

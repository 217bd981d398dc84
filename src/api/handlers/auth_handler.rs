//! Authentication handlers - registration, sessions and password flows.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::SESSION_COOKIE;
use crate::domain::{CreateUser, User, UserResponse};
use crate::errors::AppResult;
use crate::services::SessionToken;
use crate::types::MessageResponse;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// User display name
    #[validate(length(min = 4, max = 30, message = "Name must be between 4 and 30 characters"))]
    #[schema(example = "John Doe")]
    pub name: String,
    /// User email address
    #[validate(email(message = "Please enter a valid email"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password should be greater than 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// Avatar image as a base64 data URI
    #[validate(length(min = 1, message = "Avatar is required"))]
    #[schema(example = "data:image/png;base64,iVBORw0KGgo...")]
    pub avatar: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Please enter a valid email"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Password recovery request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequest {
    /// Email of the account to recover
    #[validate(email(message = "Please enter a valid email"))]
    #[schema(example = "user@example.com")]
    pub email: String,
}

/// Password reset redemption request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    /// New password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password should be greater than 8 characters"))]
    #[schema(min_length = 8)]
    pub password: String,
    /// Must match `password`
    pub confirm_password: String,
}

/// Logged-in password change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePasswordRequest {
    /// Current password
    pub old_password: String,
    /// New password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password should be greater than 8 characters"))]
    #[schema(min_length = 8)]
    pub new_password: String,
    /// Must match `new_password`
    pub confirm_password: String,
}

/// Session response: the account plus its freshly signed token.
///
/// The same token is also set as the HTTP-only session cookie.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserResponse,
    /// Signed session token (JWT)
    pub token: String,
    /// Token lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

impl AuthResponse {
    fn new(user: User, session: &SessionToken) -> Self {
        Self {
            user: UserResponse::from(user),
            token: session.token.clone(),
            expires_in: session.expires_in,
        }
    }
}

/// Build the HTTP-only session cookie carrying `session`.
fn session_cookie(session: &SessionToken) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session.token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(session.expires_in))
        .build()
}

/// Build an immediately expiring session cookie for logout.
fn expired_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .build()
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered, session opened", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered"),
        (status = 502, description = "Avatar upload failed")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, CookieJar, Json<AuthResponse>)> {
    let (user, session) = state
        .auth_service
        .register(CreateUser {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            avatar: payload.avatar,
        })
        .await?;

    let jar = jar.add(session_cookie(&session));
    Ok((StatusCode::CREATED, jar, Json(AuthResponse::new(user, &session))))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/v1/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    let (user, session) = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    let jar = jar.add(session_cookie(&session));
    Ok((jar, Json(AuthResponse::new(user, &session))))
}

/// Logout and clear the session cookie
#[utoipa::path(
    get,
    path = "/api/v1/logout",
    tag = "Authentication",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResponse)
    )
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.add(expired_cookie());
    (jar, Json(MessageResponse::new("Logged out")))
}

/// Request a password reset email
#[utoipa::path(
    post,
    path = "/api/v1/password/forgot",
    tag = "Authentication",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset email dispatched", body = MessageResponse),
        (status = 404, description = "No account with that email"),
        (status = 502, description = "Email delivery failed")
    )
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let email = state.auth_service.forgot_password(payload.email).await?;

    Ok(Json(MessageResponse::new(format!(
        "Email sent to {} successfully",
        email
    ))))
}

/// Redeem a password reset token
#[utoipa::path(
    put,
    path = "/api/v1/password/reset/{token}",
    tag = "Authentication",
    params(("token" = String, Path, description = "Reset token from the email link")),
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset, session opened", body = AuthResponse),
        (status = 400, description = "Invalid or expired token, or passwords do not match")
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<ResetPasswordRequest>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    let (user, session) = state
        .auth_service
        .reset_password(token, payload.password, payload.confirm_password)
        .await?;

    let jar = jar.add(session_cookie(&session));
    Ok((jar, Json(AuthResponse::new(user, &session))))
}

/// Change the password of the logged-in user
#[utoipa::path(
    put,
    path = "/api/v1/password/update",
    tag = "Authentication",
    request_body = UpdatePasswordRequest,
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Password changed, session re-issued", body = AuthResponse),
        (status = 400, description = "Old password incorrect or passwords do not match"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn update_password(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<UpdatePasswordRequest>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    let (user, session) = state
        .auth_service
        .update_password(
            current.id,
            payload.old_password,
            payload.new_password,
            payload.confirm_password,
        )
        .await?;

    let jar = jar.add(session_cookie(&session));
    Ok((jar, Json(AuthResponse::new(user, &session))))
}

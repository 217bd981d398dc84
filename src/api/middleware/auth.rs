//! Session authentication and role authorization middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::api::AppState;
use crate::config::SESSION_COOKIE;
use crate::domain::UserRole;
use crate::errors::AppError;

/// Authenticated user extracted from the session cookie
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl CurrentUser {
    /// Check if user has admin role.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Session authentication middleware.
///
/// Reads the session cookie, verifies the token and resolves the account,
/// then injects the CurrentUser into the request extensions. Requests
/// without a valid session never reach the handler.
pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar.get(SESSION_COOKIE).ok_or(AppError::Unauthorized)?;

    let user = state.auth_service.authenticate(token.value()).await?;

    let current_user = CurrentUser {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Admin authorization middleware.
///
/// Must run after [`authenticate`]: a missing CurrentUser means the route
/// was wired without authentication and is treated as unauthenticated, never
/// as an open door.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::Unauthorized)?;

    if !user.is_admin() {
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}

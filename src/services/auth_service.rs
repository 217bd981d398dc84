//! Authentication service - credentials, session tokens and password recovery.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{Config, AVATAR_FOLDER, AVATAR_WIDTH, SECONDS_PER_HOUR};
use crate::domain::validation::ensure_passwords_match;
use crate::domain::{CreateUser, Password, ResetToken, User};
use crate::errors::{AppError, AppResult};
use crate::infra::email::{EmailMessage, Mailer};
use crate::infra::media::{ImageStore, ImageUpload};
use crate::infra::repositories::UserRepository;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
}

/// Signed session token plus its lifetime in seconds.
///
/// Handlers put the token into the session cookie and echo it in the body.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account and open a session for it.
    async fn register(&self, input: CreateUser) -> AppResult<(User, SessionToken)>;

    /// Verify credentials and open a session.
    async fn login(&self, email: String, password: String) -> AppResult<(User, SessionToken)>;

    /// Verify a session token and load the account it refers to.
    async fn authenticate(&self, token: &str) -> AppResult<User>;

    /// Verify a session token and extract the account id.
    fn verify_session(&self, token: &str) -> AppResult<Uuid>;

    /// Issue a reset token and email its link. Returns the recipient address.
    async fn forgot_password(&self, email: String) -> AppResult<String>;

    /// Redeem a reset token and set a new password.
    async fn reset_password(
        &self,
        token: String,
        password: String,
        confirm: String,
    ) -> AppResult<(User, SessionToken)>;

    /// Change the password of a logged-in account.
    async fn update_password(
        &self,
        user_id: Uuid,
        old_password: String,
        new_password: String,
        confirm: String,
    ) -> AppResult<(User, SessionToken)>;
}

/// Sign a session token for a user (shared helper to avoid duplication)
fn issue_token(user: &User, config: &Config) -> AppResult<SessionToken> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(SessionToken {
        token,
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Verify a session token and extract the account id (shared helper)
fn verify_token(token: &str, config: &Config) -> AppResult<Uuid> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims.sub)
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    images: Arc<dyn ImageStore>,
    mailer: Arc<dyn Mailer>,
    config: Config,
}

impl Authenticator {
    pub fn new(
        users: Arc<dyn UserRepository>,
        images: Arc<dyn ImageStore>,
        mailer: Arc<dyn Mailer>,
        config: Config,
    ) -> Self {
        Self {
            users,
            images,
            mailer,
            config,
        }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, input: CreateUser) -> AppResult<(User, SessionToken)> {
        // Cheap duplicate check first; the unique email index still covers
        // the race between check and insert.
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }

        let password_hash = Password::new(&input.password)?.into_string();

        let avatar = self
            .images
            .upload(ImageUpload {
                data: input.avatar,
                folder: AVATAR_FOLDER.to_string(),
                width: Some(AVATAR_WIDTH),
            })
            .await?;

        let user = User::new(input.name, input.email, password_hash, avatar);
        self.users.insert(&user).await?;

        tracing::info!(user_id = %user.id, "User registered");
        let token = issue_token(&user, &self.config)?;
        Ok((user, token))
    }

    async fn login(&self, email: String, password: String) -> AppResult<(User, SessionToken)> {
        let user_result = self.users.find_by_email(&email).await?;

        // SECURITY: Perform password verification even if user doesn't exist
        // to prevent timing attacks that could enumerate valid emails.
        // We use a dummy hash that will always fail verification.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let user = user_result.ok_or(AppError::InvalidCredentials)?;
        let token = issue_token(&user, &self.config)?;
        Ok((user, token))
    }

    async fn authenticate(&self, token: &str) -> AppResult<User> {
        let user_id = self.verify_session(token)?;

        // A token for a since-deleted account must not authenticate
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    fn verify_session(&self, token: &str) -> AppResult<Uuid> {
        verify_token(token, &self.config)
    }

    async fn forgot_password(&self, email: String) -> AppResult<String> {
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AppError::NotFound)?;

        let reset = ResetToken::issue();
        self.users
            .set_reset_token(user.id, &reset.digest, reset.expires_at)
            .await?;

        let reset_url = format!(
            "{}/api/v1/password/reset/{}",
            self.config.public_url, reset.plain
        );
        let message = EmailMessage::password_reset(&user.email, &reset_url);

        if let Err(e) = self.mailer.send(message).await {
            // Roll back the stored token when the email never went out
            self.users.clear_reset_token(user.id).await?;
            return Err(e);
        }

        tracing::info!(user_id = %user.id, "Password reset email dispatched");
        Ok(user.email)
    }

    async fn reset_password(
        &self,
        token: String,
        password: String,
        confirm: String,
    ) -> AppResult<(User, SessionToken)> {
        let digest = ResetToken::digest_of(&token);

        let user = self
            .users
            .find_by_reset_digest(&digest)
            .await?
            .filter(|user| user.has_valid_reset_token(Utc::now()))
            .ok_or_else(|| {
                AppError::BadRequest("Reset password token is invalid or has expired".to_string())
            })?;

        ensure_passwords_match(&password, &confirm)?;

        let password_hash = Password::new(&password)?.into_string();
        self.users.set_password(user.id, &password_hash).await?;

        let mut user = user;
        user.password_hash = password_hash;
        user.reset_password_token = None;
        user.reset_password_expire = None;

        tracing::info!(user_id = %user.id, "Password reset redeemed");
        let token = issue_token(&user, &self.config)?;
        Ok((user, token))
    }

    async fn update_password(
        &self,
        user_id: Uuid,
        old_password: String,
        new_password: String,
        confirm: String,
    ) -> AppResult<(User, SessionToken)> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let stored_password = Password::from_hash(user.password_hash.clone());
        if !stored_password.verify(&old_password) {
            return Err(AppError::BadRequest("Old password is incorrect".to_string()));
        }

        ensure_passwords_match(&new_password, &confirm)?;

        let password_hash = Password::new(&new_password)?.into_string();
        self.users.set_password(user.id, &password_hash).await?;

        let mut user = user;
        user.password_hash = password_hash;

        let token = issue_token(&user, &self.config)?;
        Ok((user, token))
    }
}

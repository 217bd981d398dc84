//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_NAME, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_MONGO_URI, DEFAULT_PUBLIC_URL,
    MIN_JWT_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub mongo_uri: String,
    pub mongo_database: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    /// Base URL embedded in password reset links.
    pub public_url: String,
    /// SMTP relay settings; `None` falls back to log-only email delivery.
    pub smtp: Option<SmtpSettings>,
    /// Image storage settings; `None` disables avatar/product image uploads.
    pub cloudinary: Option<CloudinarySettings>,
}

/// Outbound SMTP relay settings.
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    password: String,
    pub from: String,
}

/// Cloudinary-compatible image storage settings.
#[derive(Clone)]
pub struct CloudinarySettings {
    pub cloud_name: String,
    pub api_key: String,
    api_secret: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("mongo_uri", &"[REDACTED]")
            .field("mongo_database", &self.mongo_database)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("public_url", &self.public_url)
            .field("smtp", &self.smtp.as_ref().map(|s| s.host.as_str()))
            .field(
                "cloudinary",
                &self.cloudinary.as_ref().map(|c| c.cloud_name.as_str()),
            )
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is not set or is too short (security requirement).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                // Development mode: use default but warn
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                // Production mode: panic
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        // Validate JWT secret length
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        Self {
            mongo_uri: env::var("MONGO_URI").unwrap_or_else(|_| DEFAULT_MONGO_URI.to_string()),
            mongo_database: env::var("MONGO_DATABASE")
                .unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string()),
            jwt_secret,
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            public_url: env::var("PUBLIC_URL").unwrap_or_else(|_| DEFAULT_PUBLIC_URL.to_string()),
            smtp: SmtpSettings::from_env(),
            cloudinary: CloudinarySettings::from_env(),
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }
}

impl SmtpSettings {
    fn from_env() -> Option<Self> {
        let host = env::var("SMTP_HOST").ok()?;
        let username = env::var("SMTP_USERNAME").ok()?;
        let password = env::var("SMTP_PASSWORD").ok()?;
        let from = env::var("SMTP_FROM").ok()?;
        let port = env::var("SMTP_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(465);

        Some(Self {
            host,
            port,
            username,
            password,
            from,
        })
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from", &self.from)
            .finish()
    }
}

impl CloudinarySettings {
    fn from_env() -> Option<Self> {
        Some(Self {
            cloud_name: env::var("CLOUDINARY_CLOUD_NAME").ok()?,
            api_key: env::var("CLOUDINARY_API_KEY").ok()?,
            api_secret: env::var("CLOUDINARY_API_SECRET").ok()?,
        })
    }

    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

#[cfg(test)]
impl Config {
    /// Fixed configuration for unit tests, no environment involved.
    pub fn for_tests() -> Self {
        Self {
            mongo_uri: DEFAULT_MONGO_URI.to_string(),
            mongo_database: "trugoods_test".to_string(),
            jwt_secret: "test-secret-key-for-testing-only-32chars".to_string(),
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            public_url: DEFAULT_PUBLIC_URL.to_string(),
            smtp: None,
            cloudinary: None,
        }
    }
}

#[cfg(test)]
impl CloudinarySettings {
    pub fn for_tests(cloud_name: &str, api_key: &str, api_secret: &str) -> Self {
        Self {
            cloud_name: cloud_name.to_string(),
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
        }
    }
}

impl std::fmt::Debug for CloudinarySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinarySettings")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

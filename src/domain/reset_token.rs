//! Password reset token value object.
//!
//! The plain token travels to the user by email; only its SHA-256 digest is
//! persisted, so a database leak cannot be replayed as a reset link.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

use crate::config::{RESET_TOKEN_BYTES, RESET_TOKEN_TTL_MINUTES};

/// Freshly issued reset token.
#[derive(Clone)]
pub struct ResetToken {
    /// Hex token embedded in the emailed reset link. Never stored.
    pub plain: String,
    /// SHA-256 hex digest persisted on the account.
    pub digest: String,
    /// Instant after which the token no longer redeems.
    pub expires_at: DateTime<Utc>,
}

impl ResetToken {
    /// Draw a new random token with the configured lifetime.
    pub fn issue() -> Self {
        let mut bytes = [0u8; RESET_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let plain = hex::encode(bytes);
        let digest = Self::digest_of(&plain);
        let expires_at = Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES);

        Self {
            plain,
            digest,
            expires_at,
        }
    }

    /// Digest of a plain token, for lookup on redemption.
    pub fn digest_of(plain: &str) -> String {
        hex::encode(Sha256::digest(plain.as_bytes()))
    }
}

// Keep the plain token out of debug output
impl std::fmt::Debug for ResetToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetToken")
            .field("plain", &"[REDACTED]")
            .field("digest", &self.digest)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

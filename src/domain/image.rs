//! Stored image reference shared by avatars and product galleries.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Handle to an image held by the external image store.
///
/// The `public_id` is the store's identifier (needed for later deletion),
/// the `url` is the CDN address clients render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StoredImage {
    /// Identifier within the image store
    #[schema(example = "avatars/h2s8xk1v")]
    pub public_id: String,
    /// Publicly reachable URL
    #[schema(example = "https://res.example.com/avatars/h2s8xk1v.png")]
    pub url: String,
}

impl StoredImage {
    pub fn new(public_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            url: url.into(),
        }
    }
}

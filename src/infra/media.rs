//! External image storage.
//!
//! Uploads go to a Cloudinary-compatible HTTP API; requests are authenticated
//! by signing the sorted parameter string with the account secret.

use async_trait::async_trait;
use chrono::Utc;
#[cfg(test)]
use mockall::automock;
use reqwest::multipart::Form;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::config::CloudinarySettings;
use crate::domain::StoredImage;
use crate::errors::{AppError, AppResult};

/// Upload parameters for a single image.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Image payload, typically a base64 data URI
    pub data: String,
    /// Target folder within the store
    pub folder: String,
    /// Optional scale-to width in pixels
    pub width: Option<u32>,
}

/// Image storage abstraction.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Push an image and return its stored handle.
    async fn upload(&self, upload: ImageUpload) -> AppResult<StoredImage>;

    /// Remove a previously uploaded image.
    async fn destroy(&self, public_id: String) -> AppResult<()>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

/// Cloudinary-backed image store.
pub struct CloudinaryStore {
    client: reqwest::Client,
    settings: CloudinarySettings,
}

impl CloudinaryStore {
    pub fn new(settings: CloudinarySettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/{}",
            self.settings.cloud_name, action
        )
    }

    /// Hex SHA-256 over the sorted `key=value` pairs plus the API secret.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted: Vec<&(&str, &str)> = params.iter().collect();
        sorted.sort_by_key(|(name, _)| *name);

        let joined = sorted
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(joined.as_bytes());
        hasher.update(self.settings.api_secret().as_bytes());
        hex::encode(hasher.finalize())
    }

    async fn post(&self, action: &str, form: Form) -> AppResult<reqwest::Response> {
        let response = self
            .client
            .post(self.endpoint(action))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::ImageUpload(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ImageUpload(format!(
                "image store returned {}: {}",
                status, body
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl ImageStore for CloudinaryStore {
    async fn upload(&self, upload: ImageUpload) -> AppResult<StoredImage> {
        let timestamp = Utc::now().timestamp().to_string();
        let transformation = upload.width.map(|w| format!("c_scale,w_{}", w));

        let mut signed: Vec<(&str, &str)> = vec![
            ("folder", upload.folder.as_str()),
            ("timestamp", timestamp.as_str()),
        ];
        if let Some(transformation) = transformation.as_deref() {
            signed.push(("transformation", transformation));
        }
        let signature = self.sign(&signed);

        let mut form = Form::new()
            .text("file", upload.data)
            .text("folder", upload.folder)
            .text("timestamp", timestamp)
            .text("api_key", self.settings.api_key.clone())
            .text("signature", signature);
        if let Some(transformation) = transformation {
            form = form.text("transformation", transformation);
        }

        let response = self.post("upload", form).await?;
        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::ImageUpload(format!("invalid upload response: {}", e)))?;

        Ok(StoredImage::new(uploaded.public_id, uploaded.secure_url))
    }

    async fn destroy(&self, public_id: String) -> AppResult<()> {
        let timestamp = Utc::now().timestamp().to_string();
        let signed = [
            ("public_id", public_id.as_str()),
            ("timestamp", timestamp.as_str()),
        ];
        let signature = self.sign(&signed);

        let form = Form::new()
            .text("public_id", public_id)
            .text("timestamp", timestamp)
            .text("api_key", self.settings.api_key.clone())
            .text("signature", signature);

        self.post("destroy", form).await?;
        Ok(())
    }
}

/// Stand-in used when no image storage is configured; every call fails with
/// a clear upstream error instead of a panic.
pub struct DisabledImageStore;

#[async_trait]
impl ImageStore for DisabledImageStore {
    async fn upload(&self, _upload: ImageUpload) -> AppResult<StoredImage> {
        Err(AppError::ImageUpload(
            "image storage is not configured".to_string(),
        ))
    }

    async fn destroy(&self, _public_id: String) -> AppResult<()> {
        Err(AppError::ImageUpload(
            "image storage is not configured".to_string(),
        ))
    }
}

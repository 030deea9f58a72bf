//! Media upload to the hosted image service
//!
//! Images are uploaded one at a time as unsigned multipart posts; the
//! service answers with the hosted URL, which is what the listing
//! record stores.

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::info;

use crate::error::ClientError;

/// An image picked into the form but not yet uploaded
#[derive(Debug, Clone)]
pub struct StagedImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// Uploads staged images to the hosted image service
#[derive(Clone)]
pub struct MediaUploader {
    http: Client,
    endpoint: String,
    upload_preset: String,
}

impl MediaUploader {
    /// Create an uploader against the named cloud
    pub fn new(cloud_name: &str, upload_preset: impl Into<String>) -> Self {
        MediaUploader {
            http: Client::new(),
            endpoint: format!("https://api.cloudinary.com/v1_1/{cloud_name}/image/upload"),
            upload_preset: upload_preset.into(),
        }
    }

    /// Create an uploader against an explicit endpoint URL
    pub fn with_endpoint(endpoint: impl Into<String>, upload_preset: impl Into<String>) -> Self {
        MediaUploader {
            http: Client::new(),
            endpoint: endpoint.into(),
            upload_preset: upload_preset.into(),
        }
    }

    /// Create an uploader from `CLOUDINARY_CLOUD_NAME` and
    /// `CLOUDINARY_UPLOAD_PRESET`
    pub fn from_env() -> Result<Self, ClientError> {
        let cloud_name = std::env::var("CLOUDINARY_CLOUD_NAME").map_err(|_| {
            ClientError::Configuration("CLOUDINARY_CLOUD_NAME must be set".to_string())
        })?;
        let upload_preset = std::env::var("CLOUDINARY_UPLOAD_PRESET").map_err(|_| {
            ClientError::Configuration("CLOUDINARY_UPLOAD_PRESET must be set".to_string())
        })?;
        Ok(Self::new(&cloud_name, upload_preset))
    }

    /// Upload one image, returning its hosted URL
    pub async fn upload(&self, image: &StagedImage) -> Result<String, ClientError> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| ClientError::Upload(e.to_string()))?;
        let form = Form::new()
            .text("upload_preset", self.upload_preset.clone())
            .part("file", part);

        let res = self.http.post(&self.endpoint).multipart(form).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(ClientError::Upload(format!(
                "Upload of {} failed with status {}",
                image.file_name, status
            )));
        }
        let body: UploadResponse = res
            .json()
            .await
            .map_err(|e| ClientError::Upload(e.to_string()))?;
        info!(file_name = %image.file_name, url = %body.secure_url, "Image uploaded");
        Ok(body.secure_url)
    }
}

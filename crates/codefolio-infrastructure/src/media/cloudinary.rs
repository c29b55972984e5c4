use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::http::HttpClient;
use codefolio_domain::media::{ImageStore, ImageUpload, StoredImage};
use codefolio_domain::shared::DomainError;

const API_BASE: &str = "https://api.cloudinary.com/v1_1";
const PROFILE_FOLDER: &str = "programmer-profile-pfp";
const PROFILE_TRANSFORMATION: &str = "c_fill,h_500,w_500,q_auto:low";

#[derive(Debug, Clone)]
pub struct CloudinaryCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

/// Signed uploads to Cloudinary
pub struct CloudinaryImageStore {
    http: HttpClient,
    credentials: CloudinaryCredentials,
}

impl CloudinaryImageStore {
    pub fn new(http: HttpClient, credentials: CloudinaryCredentials) -> Self {
        Self { http, credentials }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/{}/image/{}",
            API_BASE, self.credentials.cloud_name, action
        )
    }

    /// SHA-256 over the sorted `key=value` pairs joined by `&`, followed by the API secret
    fn sign(&self, params: &[(&str, String)]) -> String {
        let mut sorted: Vec<&(&str, String)> = params.iter().collect();
        sorted.sort_by_key(|(key, _)| *key);

        let joined = sorted
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");

        hex::encode(Sha256::digest(format!("{}{}", joined, self.credentials.api_secret)))
    }

    fn signed_form(&self, params: &[(&str, String)]) -> Form {
        let signature = self.sign(params);
        let mut form = Form::new()
            .text("api_key", self.credentials.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        for (key, value) in params {
            form = form.text(key.to_string(), value.clone());
        }
        form
    }
}

#[async_trait]
impl ImageStore for CloudinaryImageStore {
    async fn upload_profile_picture(&self, image: &ImageUpload) -> Result<StoredImage, DomainError> {
        let url = self.endpoint("upload");
        let params = [
            ("folder", PROFILE_FOLDER.to_string()),
            ("format", "jpg".to_string()),
            ("timestamp", Utc::now().timestamp().to_string()),
            ("transformation", PROFILE_TRANSFORMATION.to_string()),
        ];

        let response: UploadResponse = self
            .http
            .execute_with_retry("Cloudinary upload", || {
                let file = Part::bytes(image.bytes.clone())
                    .file_name(image.file_name.clone())
                    .mime_str(&image.content_type);
                let form = file.map(|part| self.signed_form(&params).part("file", part));
                let request = self.http.inner().post(&url);
                async move {
                    let form = form.context("Invalid image content type")?;
                    let response = request.multipart(form).send().await?.error_for_status()?;
                    Ok(response.json::<UploadResponse>().await?)
                }
            })
            .await
            .map_err(|e| DomainError::Infrastructure(format!("Image upload failed: {:#}", e)))?;

        info!("🖼️  Uploaded profile picture {}", response.public_id);
        Ok(StoredImage {
            url: response.secure_url,
            public_id: response.public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), DomainError> {
        let url = self.endpoint("destroy");
        let params = [
            ("public_id", public_id.to_string()),
            ("timestamp", Utc::now().timestamp().to_string()),
        ];

        let response: DestroyResponse = self
            .http
            .execute_with_retry("Cloudinary destroy", || {
                let request = self.http.inner().post(&url).multipart(self.signed_form(&params));
                async move {
                    let response = request.send().await?.error_for_status()?;
                    Ok(response.json::<DestroyResponse>().await?)
                }
            })
            .await
            .map_err(|e| DomainError::Infrastructure(format!("Image delete failed: {:#}", e)))?;

        if response.result != "ok" {
            warn!("Cloudinary destroy for {} returned {}", public_id, response.result);
        }
        Ok(())
    }
}

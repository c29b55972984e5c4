use async_trait::async_trait;

use crate::shared::DomainError;

/// An image stored by the media host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub url: String,
    pub public_id: String,
}

#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub const MAX_BYTES: usize = 10 * 1024 * 1024;

    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, DomainError> {
        let content_type = content_type.into();
        if !content_type.starts_with("image/") {
            return Err(DomainError::Validation("File must be an image".to_string()));
        }
        if bytes.is_empty() {
            return Err(DomainError::Validation("File is empty".to_string()));
        }
        if bytes.len() > Self::MAX_BYTES {
            return Err(DomainError::Validation(
                "File must be at most 10 MB".to_string(),
            ));
        }
        Ok(Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        })
    }
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Upload a profile picture, returning its hosted location
    async fn upload_profile_picture(&self, image: &ImageUpload) -> Result<StoredImage, DomainError>;

    async fn delete(&self, public_id: &str) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_images_accepted() {
        assert!(ImageUpload::new("a.png", "image/png", vec![1, 2, 3]).is_ok());
        assert!(ImageUpload::new("a.txt", "text/plain", vec![1]).is_err());
        assert!(ImageUpload::new("a.png", "image/png", vec![]).is_err());
    }
}

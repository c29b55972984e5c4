use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::Json;
use tracing::debug;

use super::RouterState;
use crate::application::dtos::UserDto;
use crate::presentation::error::ApiError;
use crate::presentation::graphql::BearerToken;
use codefolio_domain::media::ImageUpload;

/// Multipart form field carrying the picture
const FILE_FIELD: &str = "file";

/// Request body ceiling for uploads: the image limit plus multipart framing
pub const UPLOAD_BODY_LIMIT: usize = ImageUpload::MAX_BYTES + 64 * 1024;

pub async fn upload_profile_picture(
    State(state): State<RouterState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UserDto>, ApiError> {
    let token = BearerToken::from_headers(&headers);
    let user = state.app.services.auth.authenticate(token.0.as_deref()).await?;

    let upload = read_image(&mut multipart).await?;
    debug!(
        "Profile picture upload: {} ({} bytes, {})",
        upload.file_name,
        upload.bytes.len(),
        upload.content_type
    );

    let user = state
        .app
        .services
        .profile
        .upload_profile_picture(user, upload)
        .await?;
    Ok(Json(UserDto::from(&user)))
}

async fn read_image(multipart: &mut Multipart) -> Result<ImageUpload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::validation(e.body_text()))?;
        return Ok(ImageUpload::new(file_name, content_type, bytes.to_vec())?);
    }
    Err(ApiError::validation("No file uploaded"))
}

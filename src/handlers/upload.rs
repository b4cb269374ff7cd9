use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::image;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::OptionalAuthUser;
use crate::models::upload::UploadResponse;
use crate::state::AppState;
use crate::utils::filename::stored_image_name;

/// MIME types accepted for fridge image uploads.
const ALLOWED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

pub fn upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(10 * 1024 * 1024) // 10 MB
}

#[utoipa::path(
    post,
    path = "/fridge-image",
    tag = "Upload",
    operation_id = "uploadFridgeImage",
    summary = "Upload a fridge photo",
    description = "Accepts a multipart form with an `image` field (jpeg/png/webp, max 10 MB). \
        The file is stored under a generated name and served at the returned `file_path`. \
        Anonymous uploads are allowed; with a bearer token the image is recorded for the caller.",
    request_body(content_type = "multipart/form-data", description = "Image upload"),
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Missing file, bad type, or oversize (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Invalid token (TOKEN_INVALID)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth_user, multipart))]
pub async fn upload_fridge_image(
    OptionalAuthUser(auth_user): OptionalAuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut stored: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("image") => {
                let original = field
                    .file_name()
                    .ok_or_else(|| {
                        AppError::Validation("Image field must have a filename".into())
                    })?
                    .to_string();

                if let Some(content_type) = field.content_type()
                    && !ALLOWED_CONTENT_TYPES.contains(&content_type)
                {
                    return Err(AppError::Validation(
                        "Only .jpg, .jpeg, .png, and .webp files are allowed".into(),
                    ));
                }

                let filename = stored_image_name(&original)
                    .map_err(|e| AppError::Validation(e.message().into()))?;

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

                stored = Some((filename, data.to_vec()));
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let (filename, data) =
        stored.ok_or_else(|| AppError::Validation("No file uploaded".into()))?;

    if data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".into()));
    }

    tokio::fs::create_dir_all(&state.config.upload.dir)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create uploads dir: {e}")))?;
    tokio::fs::write(state.config.upload.dir.join(&filename), &data)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to store upload: {e}")))?;

    // Attribute the upload when the caller is authenticated; anonymous
    // uploads still succeed but leave no image row behind.
    if let Some(user) = &auth_user {
        let new_image = image::ActiveModel {
            file_path: Set(filename.clone()),
            user_id: Set(Some(user.user_id)),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        new_image.insert(&state.db).await?;
    }

    Ok(Json(UploadResponse {
        file_path: format!("/uploads/{filename}"),
        filename,
    }))
}

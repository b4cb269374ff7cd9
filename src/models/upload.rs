use serde::Serialize;

/// Response for `POST /api/upload/fridge-image`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    /// Public path the stored image is served at.
    #[schema(example = "/uploads/fridge-0192e6a2-....jpg")]
    pub file_path: String,
    /// Stored filename (use this as `image_path` for `/api/ai/scan`).
    #[schema(example = "fridge-0192e6a2-....jpg")]
    pub filename: String,
}

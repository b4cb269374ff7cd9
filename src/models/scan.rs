use serde::{Deserialize, Serialize};

use crate::detector::DetectedIngredient;

/// Request body for `POST /api/ai/scan`.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ScanRequest {
    /// Stored filename (or `/uploads/...` path) of a previously uploaded image.
    #[schema(example = "fridge-0192e6a2-....jpg")]
    pub image_path: String,
}

/// Response for `POST /api/ai/scan`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ScanResponse {
    /// Ingredients the detector claims are present, with confidences.
    pub ingredients: Vec<DetectedIngredient>,
}

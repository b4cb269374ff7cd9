use chrono::{DateTime, Utc};
use serde::Serialize;

/// A user row in the admin listing, with ownership counts.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AdminUserResponse {
    pub id: i32,
    #[schema(example = "alice_wonder")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "user")]
    pub role: String,
    pub created_at: DateTime<Utc>,
    /// Number of images the user has uploaded.
    pub image_count: u64,
    /// Number of recipes the user has saved.
    pub saved_recipe_count: u64,
}

/// Response for `GET /api/admin/users`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AdminUsersResponse {
    /// All users, newest first.
    pub users: Vec<AdminUserResponse>,
}

/// A recently uploaded image with its uploader, if any.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RecentImageResponse {
    pub id: i32,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
    /// Uploader's username; `null` for anonymous uploads.
    pub username: Option<String>,
    /// Uploader's email; `null` for anonymous uploads.
    pub email: Option<String>,
}

/// Response for `GET /api/admin/stats`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct StatsResponse {
    pub total_users: u64,
    pub total_images: u64,
    pub total_recipes: u64,
    pub total_ingredients: u64,
    /// The 10 most recent uploads.
    pub recent_images: Vec<RecentImageResponse>,
}

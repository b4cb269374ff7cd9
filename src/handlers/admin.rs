use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{image, image_ingredient, ingredient, recipe, saved_recipe, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::admin::{
    AdminUserResponse, AdminUsersResponse, RecentImageResponse, StatsResponse,
};
use crate::state::AppState;

#[derive(FromQueryResult)]
struct OwnerCount {
    user_id: i32,
    count: i64,
}

/// Count rows per owning user for the admin listing.
async fn counts_by_user<E>(
    db: &DatabaseConnection,
    user_id_col: E::Column,
) -> Result<HashMap<i32, u64>, DbErr>
where
    E: EntityTrait,
{
    let rows = E::find()
        .select_only()
        .column_as(user_id_col, "user_id")
        .column_as(user_id_col.count(), "count")
        .filter(user_id_col.is_not_null())
        .group_by(user_id_col)
        .into_model::<OwnerCount>()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| (row.user_id, std::cmp::Ord::max(row.count, 0) as u64))
        .collect())
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Admin",
    operation_id = "listUsers",
    summary = "List all users with ownership counts",
    responses(
        (status = 200, description = "Users, newest first", body = AdminUsersResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn list_users(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<AdminUsersResponse>, AppError> {
    auth_user.require_admin()?;

    let users = user::Entity::find()
        .order_by_desc(user::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let image_counts =
        counts_by_user::<image::Entity>(&state.db, image::Column::UserId).await?;
    let saved_counts =
        counts_by_user::<saved_recipe::Entity>(&state.db, saved_recipe::Column::UserId).await?;

    let users = users
        .into_iter()
        .map(|u| AdminUserResponse {
            image_count: image_counts.get(&u.id).copied().unwrap_or(0),
            saved_recipe_count: saved_counts.get(&u.id).copied().unwrap_or(0),
            id: u.id,
            username: u.username,
            email: u.email,
            role: u.role,
            created_at: u.created_at,
        })
        .collect();

    Ok(Json(AdminUsersResponse { users }))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Admin",
    operation_id = "deleteUser",
    summary = "Delete a user and their owned rows",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = serde_json::Value),
        (status = 400, description = "Attempted self-delete (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_user(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth_user.require_admin()?;

    if id == auth_user.user_id {
        return Err(AppError::Validation("Cannot delete your own account".into()));
    }

    let txn = state.db.begin().await?;

    user::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    // Cascade owned rows by hand: ingredient links of the user's images,
    // the images themselves, then bookmarks, then the account.
    let image_ids: Vec<i32> = image::Entity::find()
        .filter(image::Column::UserId.eq(id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|img| img.id)
        .collect();

    if !image_ids.is_empty() {
        image_ingredient::Entity::delete_many()
            .filter(image_ingredient::Column::ImageId.is_in(image_ids))
            .exec(&txn)
            .await?;
        image::Entity::delete_many()
            .filter(image::Column::UserId.eq(id))
            .exec(&txn)
            .await?;
    }

    saved_recipe::Entity::delete_many()
        .filter(saved_recipe::Column::UserId.eq(id))
        .exec(&txn)
        .await?;

    user::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    Ok(Json(serde_json::json!({
        "message": "User deleted successfully"
    })))
}

#[utoipa::path(
    get,
    path = "/stats",
    tag = "Admin",
    operation_id = "getStats",
    summary = "Aggregate usage statistics",
    responses(
        (status = 200, description = "Totals and recent uploads", body = StatsResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn get_stats(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    auth_user.require_admin()?;

    let total_users = user::Entity::find().count(&state.db).await?;
    let total_images = image::Entity::find().count(&state.db).await?;
    let total_recipes = recipe::Entity::find().count(&state.db).await?;
    let total_ingredients = ingredient::Entity::find().count(&state.db).await?;

    let recent_images = image::Entity::find()
        .order_by_desc(image::Column::CreatedAt)
        .limit(10)
        .find_also_related(user::Entity)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|(img, uploader)| RecentImageResponse {
            id: img.id,
            file_path: img.file_path,
            created_at: img.created_at,
            username: uploader.as_ref().map(|u| u.username.clone()),
            email: uploader.map(|u| u.email),
        })
        .collect();

    Ok(Json(StatsResponse {
        total_users,
        total_images,
        total_recipes,
        total_ingredients,
        recent_images,
    }))
}

use axum::{Json, extract::State};
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::instrument;

use crate::detector::DetectedIngredient;
use crate::entity::{image, image_ingredient, ingredient};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::OptionalAuthUser;
use crate::extractors::json::AppJson;
use crate::models::scan::{ScanRequest, ScanResponse};
use crate::state::AppState;
use crate::utils::filename::image_basename;

#[utoipa::path(
    post,
    path = "/scan",
    tag = "AI",
    operation_id = "scanImage",
    summary = "Detect ingredients in an uploaded fridge photo",
    description = "Runs the ingredient detector against a previously uploaded image and \
        returns the detected ingredients with confidence scores. When the caller is \
        authenticated and owns the image, the detections replace the image's stored \
        ingredient links.",
    request_body = ScanRequest,
    responses(
        (status = 200, description = "Detected ingredients", body = ScanResponse),
        (status = 400, description = "Missing image_path (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Invalid token (TOKEN_INVALID)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn scan_image(
    OptionalAuthUser(auth_user): OptionalAuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<ScanRequest>,
) -> Result<Json<ScanResponse>, AppError> {
    let basename = image_basename(payload.image_path.trim());
    if basename.is_empty() {
        return Err(AppError::Validation("image_path is required".into()));
    }

    let full_path = state.config.upload.dir.join(basename);
    let detected = state.detector.detect(&full_path).await?;

    if let Some(user) = &auth_user {
        let owned_image = image::Entity::find()
            .filter(image::Column::FilePath.eq(basename))
            .filter(image::Column::UserId.eq(user.user_id))
            .one(&state.db)
            .await?;

        if let Some(owned_image) = owned_image {
            relink_image_ingredients(&state.db, owned_image.id, &detected).await?;
        }
    }

    Ok(Json(ScanResponse {
        ingredients: detected,
    }))
}

/// Replace an image's ingredient links with a fresh detection result.
///
/// Delete-then-insert plus ingredient find-or-create runs in one
/// transaction so a failure mid-sequence cannot leave a half-relinked
/// image behind.
async fn relink_image_ingredients(
    db: &DatabaseConnection,
    image_id: i32,
    detected: &[DetectedIngredient],
) -> Result<(), AppError> {
    let txn = db.begin().await?;

    image_ingredient::Entity::delete_many()
        .filter(image_ingredient::Column::ImageId.eq(image_id))
        .exec(&txn)
        .await?;

    for item in detected {
        let name = item.name.trim().to_lowercase();
        if name.is_empty() {
            continue;
        }

        let ingredient_id = find_or_create_ingredient(&txn, &name).await?;

        let link = image_ingredient::ActiveModel {
            image_id: Set(image_id),
            ingredient_id: Set(ingredient_id),
            confidence: Set(item.confidence),
        };
        link.insert(&txn).await?;
    }

    txn.commit().await?;
    Ok(())
}

/// Insert an ingredient name if it is new, then return its id.
async fn find_or_create_ingredient(
    txn: &DatabaseTransaction,
    name: &str,
) -> Result<i32, AppError> {
    let new_ingredient = ingredient::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };

    let result = ingredient::Entity::insert(new_ingredient)
        .on_conflict(
            OnConflict::column(ingredient::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(txn)
        .await;

    match result {
        Ok(_) | Err(DbErr::RecordNotInserted) => {}
        Err(e) => return Err(e.into()),
    }

    let model = ingredient::Entity::find()
        .filter(ingredient::Column::Name.eq(name))
        .one(txn)
        .await?
        .ok_or_else(|| AppError::Internal(format!("Ingredient '{name}' vanished after insert")))?;

    Ok(model.id)
}

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::prelude::Expr;
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{ingredient, recipe, recipe_ingredient, saved_recipe};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::matcher::{CandidateRecipe, normalize_requested, rank_recipes};
use crate::models::recipe::{
    MatchedRecipeResponse, RecipeResponse, SaveRecipeRequest, SaveRecipeResponse,
    SavedRecipeResponse, SavedRecipesResponse, SuggestionsQuery, SuggestionsResponse,
};
use crate::state::AppState;

/// Load recipes (with their ingredient lists) that share at least one
/// required ingredient with the requested set.
async fn find_candidate_recipes(
    db: &DatabaseConnection,
    requested: &[String],
) -> Result<Vec<(recipe::Model, Vec<ingredient::Model>)>, DbErr> {
    let matching_recipe_ids = SeaQuery::select()
        .column(recipe_ingredient::Column::RecipeId)
        .from(recipe_ingredient::Entity)
        .inner_join(
            ingredient::Entity,
            Expr::col((ingredient::Entity, ingredient::Column::Id)).equals((
                recipe_ingredient::Entity,
                recipe_ingredient::Column::IngredientId,
            )),
        )
        .and_where(
            Expr::col((ingredient::Entity, ingredient::Column::Name)).is_in(requested.to_vec()),
        )
        .to_owned();

    recipe::Entity::find()
        .filter(recipe::Column::Id.in_subquery(matching_recipe_ids))
        .find_with_related(ingredient::Entity)
        .all(db)
        .await
}

#[utoipa::path(
    get,
    path = "/suggestions",
    tag = "Recipes",
    operation_id = "getRecipeSuggestions",
    summary = "Rank recipes against an ingredient list",
    description = "Returns every recipe sharing at least one required ingredient with the \
        comma-separated `ingredients` parameter, ordered by match count descending \
        (recipe name ascending on ties).",
    params(SuggestionsQuery),
    responses(
        (status = 200, description = "Ranked suggestions", body = SuggestionsResponse),
        (status = 400, description = "Missing or blank ingredients parameter (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn get_suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestionsQuery>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let raw = query.ingredients.unwrap_or_default();
    let requested = normalize_requested(&raw);
    if requested.is_empty() {
        return Err(AppError::Validation(
            "ingredients query parameter is required".into(),
        ));
    }

    let pairs = find_candidate_recipes(&state.db, &requested).await?;

    let candidates = pairs
        .iter()
        .map(|(recipe, ingredients)| CandidateRecipe {
            id: recipe.id,
            name: recipe.name.clone(),
            ingredients: ingredients.iter().map(|i| i.name.clone()).collect(),
        })
        .collect();

    let ranked = rank_recipes(candidates, &requested);

    let mut by_id: HashMap<i32, (recipe::Model, Vec<ingredient::Model>)> =
        pairs.into_iter().map(|(r, i)| (r.id, (r, i))).collect();

    let recipes = ranked
        .into_iter()
        .filter_map(|r| {
            let (recipe, ingredients) = by_id.remove(&r.id)?;
            Some(MatchedRecipeResponse {
                recipe: RecipeResponse::from_parts(recipe, ingredients),
                match_count: r.match_count,
                matching_ingredients: r.matching_ingredients,
            })
        })
        .collect();

    Ok(Json(SuggestionsResponse {
        recipes,
        requested_ingredients: requested,
    }))
}

#[utoipa::path(
    post,
    path = "/save",
    tag = "Recipes",
    operation_id = "saveRecipe",
    summary = "Bookmark a recipe for the current user",
    request_body = SaveRecipeRequest,
    responses(
        (status = 201, description = "Recipe saved", body = SaveRecipeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Recipe already saved (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id, recipe_id = payload.recipe_id))]
pub async fn save_recipe(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<SaveRecipeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = recipe::Entity::find_by_id(payload.recipe_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".into()))?;

    let new_saved = saved_recipe::ActiveModel {
        user_id: Set(auth_user.user_id),
        recipe_id: Set(recipe.id),
        saved_at: Set(chrono::Utc::now()),
    };

    // The composite primary key turns a duplicate save into a unique
    // violation rather than a silent second insert.
    let saved = match new_saved.insert(&state.db).await {
        Ok(model) => model,
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            return Err(AppError::Conflict("Recipe already saved".into()));
        }
        Err(e) => return Err(e.into()),
    };

    let ingredients = recipe.find_related(ingredient::Entity).all(&state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(SaveRecipeResponse {
            saved_recipe: SavedRecipeResponse {
                user_id: saved.user_id,
                recipe_id: saved.recipe_id,
                saved_at: saved.saved_at,
                recipe: RecipeResponse::from_parts(recipe, ingredients),
            },
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/saved",
    tag = "Recipes",
    operation_id = "getSavedRecipes",
    summary = "List the current user's saved recipes",
    responses(
        (status = 200, description = "Saved recipes, most recently saved first", body = SavedRecipesResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_saved_recipes(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<SavedRecipesResponse>, AppError> {
    let saved = saved_recipe::Entity::find()
        .filter(saved_recipe::Column::UserId.eq(auth_user.user_id))
        .order_by_desc(saved_recipe::Column::SavedAt)
        .all(&state.db)
        .await?;

    let recipe_ids: Vec<i32> = saved.iter().map(|s| s.recipe_id).collect();

    let mut by_id: HashMap<i32, RecipeResponse> = recipe::Entity::find()
        .filter(recipe::Column::Id.is_in(recipe_ids.clone()))
        .find_with_related(ingredient::Entity)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|(recipe, ingredients)| {
            (recipe.id, RecipeResponse::from_parts(recipe, ingredients))
        })
        .collect();

    // Preserve the saved_at ordering from the bookmark query.
    let saved_recipes = recipe_ids
        .into_iter()
        .filter_map(|id| by_id.remove(&id))
        .collect();

    Ok(Json(SavedRecipesResponse { saved_recipes }))
}

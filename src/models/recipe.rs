use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{ingredient, recipe};

/// Query parameters for `GET /api/recipes/suggestions`.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct SuggestionsQuery {
    /// Comma-separated ingredient names, e.g. `eggs,milk,cheese`.
    pub ingredients: Option<String>,
}

/// A recipe with its required-ingredient names resolved.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RecipeResponse {
    /// Recipe ID.
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = "Omelette")]
    pub name: String,
    pub instructions: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Lower-cased required-ingredient names.
    #[schema(example = json!(["eggs", "milk", "butter", "cheese"]))]
    pub ingredients: Vec<String>,
}

impl RecipeResponse {
    pub fn from_parts(recipe: recipe::Model, ingredients: Vec<ingredient::Model>) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            instructions: recipe.instructions,
            image_url: recipe.image_url,
            created_at: recipe.created_at,
            ingredients: ingredients.into_iter().map(|i| i.name).collect(),
        }
    }
}

/// A suggested recipe annotated with its match score.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MatchedRecipeResponse {
    #[serde(flatten)]
    pub recipe: RecipeResponse,
    /// Number of the recipe's required ingredients present in the request.
    #[schema(example = 3)]
    pub match_count: usize,
    /// The ingredient names that matched.
    #[schema(example = json!(["eggs", "milk", "cheese"]))]
    pub matching_ingredients: Vec<String>,
}

/// Response for `GET /api/recipes/suggestions`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SuggestionsResponse {
    /// Recipes ordered by match count descending, name ascending on ties.
    pub recipes: Vec<MatchedRecipeResponse>,
    /// The normalized requested ingredient set, echoed back.
    #[schema(example = json!(["eggs", "milk", "cheese"]))]
    pub requested_ingredients: Vec<String>,
}

/// Request body for `POST /api/recipes/save`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SaveRecipeRequest {
    /// ID of the recipe to bookmark.
    #[schema(example = 3)]
    pub recipe_id: i32,
}

/// A saved-recipe bookmark with the full recipe attached.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SavedRecipeResponse {
    pub user_id: i32,
    pub recipe_id: i32,
    pub saved_at: DateTime<Utc>,
    pub recipe: RecipeResponse,
}

/// Response for `POST /api/recipes/save`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SaveRecipeResponse {
    pub saved_recipe: SavedRecipeResponse,
}

/// Response for `GET /api/recipes/saved`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SavedRecipesResponse {
    /// The caller's bookmarked recipes, most recently saved first.
    pub saved_recipes: Vec<RecipeResponse>,
}

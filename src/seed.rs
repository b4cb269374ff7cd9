use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::info;

use crate::config::AuthConfig;
use crate::entity::{ingredient, recipe, recipe_ingredient, user};
use crate::utils::hash;

struct SampleRecipe {
    name: &'static str,
    instructions: &'static str,
    ingredients: &'static [&'static str],
}

/// Starter recipes seeded on first startup.
const SAMPLE_RECIPES: &[SampleRecipe] = &[
    SampleRecipe {
        name: "Scrambled Eggs",
        instructions: "1. Crack 2-3 eggs into a bowl\n\
            2. Add a splash of milk and whisk\n\
            3. Heat butter in a pan over medium heat\n\
            4. Pour in eggs and stir gently\n\
            5. Cook until eggs are set but still creamy\n\
            6. Season with salt and pepper",
        ingredients: &["eggs", "milk", "butter"],
    },
    SampleRecipe {
        name: "Pancakes",
        instructions: "1. Mix 1 cup flour, 2 tbsp sugar, 2 tsp baking powder, and 1/2 tsp salt\n\
            2. In another bowl, whisk 1 cup milk, 1 egg, and 2 tbsp melted butter\n\
            3. Combine wet and dry ingredients\n\
            4. Cook on a griddle over medium heat\n\
            5. Flip when bubbles form on top\n\
            6. Serve with syrup or fruit",
        ingredients: &["milk", "eggs", "butter", "flour"],
    },
    SampleRecipe {
        name: "Grilled Cheese Sandwich",
        instructions: "1. Butter one side of each bread slice\n\
            2. Place cheese between bread slices\n\
            3. Cook in a pan over medium heat\n\
            4. Flip when golden brown\n\
            5. Cook until cheese is melted",
        ingredients: &["cheese", "butter", "bread"],
    },
    SampleRecipe {
        name: "Mac and Cheese",
        instructions: "1. Cook pasta according to package directions\n\
            2. Melt butter in a saucepan\n\
            3. Add flour and whisk to make a roux\n\
            4. Gradually add milk, stirring constantly\n\
            5. Add shredded cheese and stir until melted\n\
            6. Mix with cooked pasta\n\
            7. Season with salt and pepper",
        ingredients: &["cheese", "milk", "butter", "pasta"],
    },
    SampleRecipe {
        name: "French Toast",
        instructions: "1. Whisk 2 eggs, 1/2 cup milk, and 1 tsp vanilla\n\
            2. Dip bread slices in the mixture\n\
            3. Cook in a buttered pan over medium heat\n\
            4. Flip when golden brown\n\
            5. Serve with syrup or powdered sugar",
        ingredients: &["eggs", "milk", "butter", "bread"],
    },
    SampleRecipe {
        name: "Omelette",
        instructions: "1. Beat 2-3 eggs with a splash of milk\n\
            2. Heat butter in a non-stick pan\n\
            3. Pour in eggs and let set slightly\n\
            4. Add fillings (cheese, vegetables)\n\
            5. Fold in half when eggs are set\n\
            6. Serve hot",
        ingredients: &["eggs", "milk", "butter", "cheese"],
    },
];

/// Insert an ingredient name if it is new, then return its id.
async fn find_or_create_ingredient<C: ConnectionTrait>(db: &C, name: &str) -> Result<i32, DbErr> {
    let model = ingredient::ActiveModel {
        name: Set(name.to_lowercase()),
        ..Default::default()
    };

    let result = ingredient::Entity::insert(model)
        .on_conflict(
            OnConflict::column(ingredient::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(_) | Err(DbErr::RecordNotInserted) => {}
        Err(e) => return Err(e),
    }

    let found = ingredient::Entity::find()
        .filter(ingredient::Column::Name.eq(name.to_lowercase()))
        .one(db)
        .await?
        .ok_or_else(|| DbErr::Custom(format!("Ingredient '{name}' missing after insert")))?;

    Ok(found.id)
}

/// Seed the starter recipes. Recipes already present by name are skipped.
pub async fn seed_recipes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut inserted = 0u32;

    for sample in SAMPLE_RECIPES {
        let existing = recipe::Entity::find()
            .filter(recipe::Column::Name.eq(sample.name))
            .one(db)
            .await?;
        if existing.is_some() {
            continue;
        }

        let new_recipe = recipe::ActiveModel {
            name: Set(sample.name.to_string()),
            instructions: Set(sample.instructions.to_string()),
            image_url: Set(None),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        let created = new_recipe.insert(db).await?;

        for name in sample.ingredients {
            let ingredient_id = find_or_create_ingredient(db, name).await?;

            let link = recipe_ingredient::ActiveModel {
                recipe_id: Set(created.id),
                ingredient_id: Set(ingredient_id),
            };
            let result = recipe_ingredient::Entity::insert(link)
                .on_conflict(
                    OnConflict::columns([
                        recipe_ingredient::Column::RecipeId,
                        recipe_ingredient::Column::IngredientId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(db)
                .await;

            match result {
                Ok(_) | Err(DbErr::RecordNotInserted) => {}
                Err(e) => return Err(e),
            }
        }

        inserted += 1;
    }

    if inserted > 0 {
        info!("Seeded {} new recipes", inserted);
    }

    Ok(())
}

/// Create the default admin account if it does not exist yet.
pub async fn seed_admin(db: &DatabaseConnection, auth: &AuthConfig) -> Result<(), DbErr> {
    let existing = user::Entity::find()
        .filter(user::Column::Username.eq(&auth.admin_username))
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let password = hash::hash_password(&auth.admin_password)
        .map_err(|e| DbErr::Custom(format!("Admin password hash error: {e}")))?;

    let admin = user::ActiveModel {
        username: Set(auth.admin_username.clone()),
        email: Set(auth.admin_email.clone()),
        password: Set(password),
        role: Set(user::ADMIN_ROLE.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = user::Entity::insert(admin)
        .on_conflict(
            OnConflict::column(user::Column::Username)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(_) => info!("Seeded admin user '{}'", auth.admin_username),
        Err(DbErr::RecordNotInserted) => {}
        Err(e) => return Err(e),
    }

    Ok(())
}

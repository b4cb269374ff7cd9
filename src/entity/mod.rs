pub mod image;
pub mod image_ingredient;
pub mod ingredient;
pub mod recipe;
pub mod recipe_ingredient;
pub mod saved_recipe;
pub mod user;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub instructions: String,
    pub image_url: Option<String>,

    #[sea_orm(has_many, via = "recipe_ingredient")]
    pub ingredients: HasMany<super::ingredient::Entity>,

    #[sea_orm(has_many, via = "saved_recipe")]
    pub saved_by: HasMany<super::user::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A canonical ingredient name. Names are lower-cased at every write site
/// and never deleted in normal flow.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ingredient")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,

    #[sea_orm(has_many, via = "recipe_ingredient")]
    pub recipes: HasMany<super::recipe::Entity>,

    #[sea_orm(has_many, via = "image_ingredient")]
    pub images: HasMany<super::image::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}

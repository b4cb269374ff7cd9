use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Links a detected ingredient to a scanned image. The full set for an
/// image is deleted and re-inserted on every rescan.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "image_ingredient")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub image_id: i32,
    #[sea_orm(primary_key)]
    pub ingredient_id: i32,
    #[sea_orm(belongs_to, from = "image_id", to = "id")]
    pub image: Option<super::image::Entity>,
    #[sea_orm(belongs_to, from = "ingredient_id", to = "id")]
    pub ingredient: Option<super::ingredient::Entity>,

    /// Detector confidence in [0, 1].
    pub confidence: f64,
}

impl ActiveModelBehavior for ActiveModel {}

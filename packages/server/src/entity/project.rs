use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub project_title: String,
    pub owner: String,

    #[sea_orm(has_many)]
    pub risks: HasMany<super::project_risk::Entity>,

    #[sea_orm(has_many)]
    pub vendor_risks: HasMany<super::vendor_risk::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

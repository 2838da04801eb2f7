use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subtopic")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    pub topic_id: i32,
    #[sea_orm(belongs_to, from = "topic_id", to = "id")]
    pub topic: HasOne<super::topic::Entity>,

    #[sea_orm(has_many)]
    pub questions: HasMany<super::question::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

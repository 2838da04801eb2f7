use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored content of an uploaded evidence file. Rows are written by the
/// upload pipeline and referenced from `question.evidence_files`
/// descriptors; they are removed when the owning question is deleted or
/// the descriptor is detached.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "file")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub filename: String,
    pub content: Vec<u8>,

    pub project_id: Option<i32>,
    pub uploaded_by: Option<i32>,
    pub uploaded_time: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

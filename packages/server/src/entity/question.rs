use sea_orm::entity::prelude::*;
use sea_orm::prelude::StringLen;
use serde::{Deserialize, Serialize};

/// Priority assigned to an assessment question.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema, EnumIter,
    DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum PriorityLevel {
    #[sea_orm(string_value = "high priority")]
    #[serde(rename = "high priority")]
    High,
    #[sea_orm(string_value = "medium priority")]
    #[serde(rename = "medium priority")]
    Medium,
    #[sea_orm(string_value = "low priority")]
    #[serde(rename = "low priority")]
    Low,
}

/// Answering progress of a question. NULL until the first status change.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema, EnumIter,
    DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum QuestionStatus {
    #[sea_orm(string_value = "Not started")]
    #[serde(rename = "Not started")]
    NotStarted,
    #[sea_orm(string_value = "In progress")]
    #[serde(rename = "In progress")]
    InProgress,
    #[sea_orm(string_value = "Done")]
    Done,
}

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "question")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display position within the subtopic questionnaire.
    pub order_no: Option<i32>,

    #[sea_orm(column_type = "Text")]
    pub question: String,
    pub hint: String,
    pub priority_level: PriorityLevel,
    pub answer_type: String,
    pub input_type: Option<String>,
    pub evidence_required: bool,
    pub is_required: bool,

    /// Choices for dropdown-type questions, stored as a JSON array of strings.
    pub dropdown_options: Option<Json>,

    /// Evidence file descriptors stored as a JSON array of
    /// {id, filename, project_id, uploaded_by, uploaded_time} objects.
    /// The `id` references a row in the `file` table.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub evidence_files: Option<Json>,

    /// Filled in by the user; NULL until answered.
    #[sea_orm(column_type = "Text", nullable)]
    pub answer: Option<String>,

    pub subtopic_id: i32,
    #[sea_orm(belongs_to, from = "subtopic_id", to = "id")]
    pub subtopic: HasOne<super::subtopic::Entity>,

    pub is_demo: bool,
    pub created_at: DateTimeUtc,
    pub status: Option<QuestionStatus>,
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;
use sea_orm::prelude::StringLen;
use serde::{Deserialize, Serialize};

/// How probable the risk scenario is.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema, EnumIter,
    DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Likelihood {
    #[sea_orm(string_value = "Rare")]
    Rare,
    #[sea_orm(string_value = "Possible")]
    Possible,
    #[sea_orm(string_value = "Likely")]
    Likely,
    #[sea_orm(string_value = "Almost certain")]
    #[serde(rename = "Almost certain")]
    AlmostCertain,
}

/// How damaging the risk scenario is if it materializes.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema, EnumIter,
    DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Severity {
    #[sea_orm(string_value = "Negligible")]
    Negligible,
    #[sea_orm(string_value = "Minor")]
    Minor,
    #[sea_orm(string_value = "Moderate")]
    Moderate,
    #[sea_orm(string_value = "Major")]
    Major,
    #[sea_orm(string_value = "Critical")]
    Critical,
}

/// Overall risk classification, assigned by the caller.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema, EnumIter,
    DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum RiskLevel {
    #[sea_orm(string_value = "Low")]
    Low,
    #[sea_orm(string_value = "Medium")]
    Medium,
    #[sea_orm(string_value = "High")]
    High,
}

/// Mitigation progress. Caller-driven; no server-enforced transition graph.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema, EnumIter,
    DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum MitigationStatus {
    #[sea_orm(string_value = "Not started")]
    #[serde(rename = "Not started")]
    NotStarted,
    #[sea_orm(string_value = "In progress")]
    #[serde(rename = "In progress")]
    InProgress,
    #[sea_orm(string_value = "Completed")]
    Completed,
}

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project_risk")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub project_id: i32,
    #[sea_orm(belongs_to, from = "project_id", to = "id")]
    pub project: HasOne<super::project::Entity>,

    pub risk_name: String,
    pub risk_owner: String,
    #[sea_orm(column_type = "Text")]
    pub risk_description: String,
    pub risk_category: String,
    #[sea_orm(column_type = "Text")]
    pub impact: String,

    pub likelihood: Likelihood,
    pub severity: Severity,
    pub risk_level: RiskLevel,

    pub mitigation_status: MitigationStatus,
    #[sea_orm(column_type = "Text")]
    pub mitigation_plan: String,
    pub deadline: Option<DateTimeUtc>,

    pub date_of_assessment: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

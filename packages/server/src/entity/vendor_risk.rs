use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::project_risk::{Likelihood, RiskLevel, Severity};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vendor_risk")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub project_id: i32,
    #[sea_orm(belongs_to, from = "project_id", to = "id")]
    pub project: HasOne<super::project::Entity>,

    pub vendor_name: String,
    #[sea_orm(column_type = "Text")]
    pub risk_description: String,
    #[sea_orm(column_type = "Text")]
    pub impact_description: String,

    pub likelihood: Likelihood,
    pub risk_severity: Severity,
    pub risk_level: RiskLevel,

    pub action_owner: String,
    #[sea_orm(column_type = "Text")]
    pub action_plan: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

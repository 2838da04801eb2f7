use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::project_risk::{self, Likelihood, MitigationStatus, RiskLevel, Severity};
use crate::error::AppError;

use super::shared::double_option;
use super::shared::{validate_optional_text, validate_text};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateProjectRiskRequest {
    pub project_id: i32,
    pub risk_name: String,
    pub risk_owner: String,
    pub risk_description: String,
    pub risk_category: String,
    #[serde(default)]
    pub impact: String,
    pub likelihood: Likelihood,
    pub severity: Severity,
    pub risk_level: RiskLevel,
    pub mitigation_status: MitigationStatus,
    #[serde(default)]
    pub mitigation_plan: String,
    pub deadline: Option<DateTime<Utc>>,
    pub date_of_assessment: DateTime<Utc>,
}

/// PATCH payload; every field is optional. `deadline` is three-state:
/// omit to keep, null to clear, value to set.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateProjectRiskRequest {
    pub risk_name: Option<String>,
    pub risk_owner: Option<String>,
    pub risk_description: Option<String>,
    pub risk_category: Option<String>,
    pub impact: Option<String>,
    pub likelihood: Option<Likelihood>,
    pub severity: Option<Severity>,
    pub risk_level: Option<RiskLevel>,
    pub mitigation_status: Option<MitigationStatus>,
    pub mitigation_plan: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub deadline: Option<Option<DateTime<Utc>>>,
    pub date_of_assessment: Option<DateTime<Utc>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProjectRiskResponse {
    pub id: i32,
    pub project_id: i32,
    pub risk_name: String,
    pub risk_owner: String,
    pub risk_description: String,
    pub risk_category: String,
    pub impact: String,
    pub likelihood: Likelihood,
    pub severity: Severity,
    pub risk_level: RiskLevel,
    pub mitigation_status: MitigationStatus,
    pub mitigation_plan: String,
    pub deadline: Option<DateTime<Utc>>,
    pub date_of_assessment: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<project_risk::Model> for ProjectRiskResponse {
    fn from(m: project_risk::Model) -> Self {
        Self {
            id: m.id,
            project_id: m.project_id,
            risk_name: m.risk_name,
            risk_owner: m.risk_owner,
            risk_description: m.risk_description,
            risk_category: m.risk_category,
            impact: m.impact,
            likelihood: m.likelihood,
            severity: m.severity,
            risk_level: m.risk_level,
            mitigation_status: m.mitigation_status,
            mitigation_plan: m.mitigation_plan,
            deadline: m.deadline,
            date_of_assessment: m.date_of_assessment,
            created_at: m.created_at,
        }
    }
}

pub fn validate_create_project_risk(req: &CreateProjectRiskRequest) -> Result<(), AppError> {
    validate_text(&req.risk_name, "Risk name", 256)?;
    validate_text(&req.risk_owner, "Risk owner", 256)?;
    validate_text(&req.risk_description, "Risk description", 8192)?;
    validate_text(&req.risk_category, "Risk category", 128)?;
    validate_long_text(&req.impact, "Impact")?;
    validate_long_text(&req.mitigation_plan, "Mitigation plan")
}

pub fn validate_update_project_risk(req: &UpdateProjectRiskRequest) -> Result<(), AppError> {
    validate_optional_text(req.risk_name.as_deref(), "Risk name", 256)?;
    validate_optional_text(req.risk_owner.as_deref(), "Risk owner", 256)?;
    validate_optional_text(req.risk_description.as_deref(), "Risk description", 8192)?;
    validate_optional_text(req.risk_category.as_deref(), "Risk category", 128)?;
    if let Some(ref impact) = req.impact {
        validate_long_text(impact, "Impact")?;
    }
    if let Some(ref plan) = req.mitigation_plan {
        validate_long_text(plan, "Mitigation plan")?;
    }
    Ok(())
}

// Free-text narrative fields may be empty but are still bounded.
pub(crate) fn validate_long_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.chars().count() > 8192 {
        return Err(AppError::Validation(format!(
            "{field} must be at most 8192 characters"
        )));
    }
    Ok(())
}

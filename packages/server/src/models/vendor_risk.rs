use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::project_risk::{Likelihood, RiskLevel, Severity};
use crate::entity::vendor_risk;
use crate::error::AppError;

use super::project_risk::validate_long_text;
use super::shared::{validate_optional_text, validate_text};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateVendorRiskRequest {
    pub project_id: i32,
    pub vendor_name: String,
    pub risk_description: String,
    #[serde(default)]
    pub impact_description: String,
    pub likelihood: Likelihood,
    pub risk_severity: Severity,
    pub risk_level: RiskLevel,
    pub action_owner: String,
    #[serde(default)]
    pub action_plan: String,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateVendorRiskRequest {
    pub vendor_name: Option<String>,
    pub risk_description: Option<String>,
    pub impact_description: Option<String>,
    pub likelihood: Option<Likelihood>,
    pub risk_severity: Option<Severity>,
    pub risk_level: Option<RiskLevel>,
    pub action_owner: Option<String>,
    pub action_plan: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct VendorRiskResponse {
    pub id: i32,
    pub project_id: i32,
    pub vendor_name: String,
    pub risk_description: String,
    pub impact_description: String,
    pub likelihood: Likelihood,
    pub risk_severity: Severity,
    pub risk_level: RiskLevel,
    pub action_owner: String,
    pub action_plan: String,
    pub created_at: DateTime<Utc>,
}

impl From<vendor_risk::Model> for VendorRiskResponse {
    fn from(m: vendor_risk::Model) -> Self {
        Self {
            id: m.id,
            project_id: m.project_id,
            vendor_name: m.vendor_name,
            risk_description: m.risk_description,
            impact_description: m.impact_description,
            likelihood: m.likelihood,
            risk_severity: m.risk_severity,
            risk_level: m.risk_level,
            action_owner: m.action_owner,
            action_plan: m.action_plan,
            created_at: m.created_at,
        }
    }
}

pub fn validate_create_vendor_risk(req: &CreateVendorRiskRequest) -> Result<(), AppError> {
    validate_text(&req.vendor_name, "Vendor name", 256)?;
    validate_text(&req.risk_description, "Risk description", 8192)?;
    validate_long_text(&req.impact_description, "Impact description")?;
    validate_text(&req.action_owner, "Action owner", 256)?;
    validate_long_text(&req.action_plan, "Action plan")
}

pub fn validate_update_vendor_risk(req: &UpdateVendorRiskRequest) -> Result<(), AppError> {
    validate_optional_text(req.vendor_name.as_deref(), "Vendor name", 256)?;
    validate_optional_text(req.risk_description.as_deref(), "Risk description", 8192)?;
    if let Some(ref impact) = req.impact_description {
        validate_long_text(impact, "Impact description")?;
    }
    validate_optional_text(req.action_owner.as_deref(), "Action owner", 256)?;
    if let Some(ref plan) = req.action_plan {
        validate_long_text(plan, "Action plan")?;
    }
    Ok(())
}

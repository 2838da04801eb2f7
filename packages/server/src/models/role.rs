use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::role;
use crate::error::AppError;

use super::shared::{validate_optional_text, validate_text};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateRoleRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RoleResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<role::Model> for RoleResponse {
    fn from(m: role::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            created_at: m.created_at,
        }
    }
}

pub fn validate_create_role(req: &CreateRoleRequest) -> Result<(), AppError> {
    validate_text(&req.name, "Name", 128)?;
    validate_description(&req.description)
}

pub fn validate_update_role(req: &UpdateRoleRequest) -> Result<(), AppError> {
    validate_optional_text(req.name.as_deref(), "Name", 128)?;
    if let Some(ref description) = req.description {
        validate_description(description)?;
    }
    Ok(())
}

// Descriptions may be empty, unlike names.
fn validate_description(description: &str) -> Result<(), AppError> {
    if description.chars().count() > 1024 {
        return Err(AppError::Validation(
            "Description must be at most 1024 characters".into(),
        ));
    }
    Ok(())
}

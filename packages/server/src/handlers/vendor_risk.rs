use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::vendor_risk;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::vendor_risk::*;
use crate::state::AppState;

use super::project_risk::find_project;

#[utoipa::path(
    get,
    path = "/",
    tag = "Vendor Risks",
    operation_id = "listVendorRisks",
    summary = "List vendor risks across all projects",
    responses(
        (status = 200, description = "List of vendor risks", body = Vec<VendorRiskResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_vendor_risks(
    State(state): State<AppState>,
) -> Result<Json<Vec<VendorRiskResponse>>, AppError> {
    let rows = vendor_risk::Entity::find()
        .order_by_desc(vendor_risk::Column::CreatedAt)
        .order_by_asc(vendor_risk::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(
        rows.into_iter().map(VendorRiskResponse::from).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Vendor Risks",
    operation_id = "createVendorRisk",
    summary = "Create a new vendor risk",
    request_body = CreateVendorRiskRequest,
    responses(
        (status = 201, description = "Vendor risk created", body = VendorRiskResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(project_id = payload.project_id))]
pub async fn create_vendor_risk(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateVendorRiskRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_vendor_risk(&payload)?;

    let txn = state.db.begin().await?;
    find_project(&txn, payload.project_id).await?;

    let new_risk = vendor_risk::ActiveModel {
        project_id: Set(payload.project_id),
        vendor_name: Set(payload.vendor_name.trim().to_string()),
        risk_description: Set(payload.risk_description),
        impact_description: Set(payload.impact_description),
        likelihood: Set(payload.likelihood),
        risk_severity: Set(payload.risk_severity),
        risk_level: Set(payload.risk_level),
        action_owner: Set(payload.action_owner.trim().to_string()),
        action_plan: Set(payload.action_plan),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_risk.insert(&txn).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(VendorRiskResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Vendor Risks",
    operation_id = "getVendorRisk",
    summary = "Get a vendor risk by ID",
    params(("id" = i32, Path, description = "Vendor risk ID")),
    responses(
        (status = 200, description = "Vendor risk details", body = VendorRiskResponse),
        (status = 404, description = "Vendor risk not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_vendor_risk(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<VendorRiskResponse>, AppError> {
    let model = find_vendor_risk(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Vendor Risks",
    operation_id = "updateVendorRisk",
    summary = "Update a vendor risk",
    description = "Partially updates a vendor risk using PATCH semantics — only provided fields are modified. An empty payload returns the current resource unchanged.",
    params(("id" = i32, Path, description = "Vendor risk ID")),
    request_body = UpdateVendorRiskRequest,
    responses(
        (status = 200, description = "Vendor risk updated", body = VendorRiskResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Vendor risk not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_vendor_risk(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateVendorRiskRequest>,
) -> Result<Json<VendorRiskResponse>, AppError> {
    validate_update_vendor_risk(&payload)?;

    if payload == UpdateVendorRiskRequest::default() {
        let existing = find_vendor_risk(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;

    let existing = find_vendor_risk(&txn, id).await?;
    let mut active: vendor_risk::ActiveModel = existing.into();

    if let Some(ref vendor_name) = payload.vendor_name {
        active.vendor_name = Set(vendor_name.trim().to_string());
    }
    if let Some(risk_description) = payload.risk_description {
        active.risk_description = Set(risk_description);
    }
    if let Some(impact_description) = payload.impact_description {
        active.impact_description = Set(impact_description);
    }
    if let Some(likelihood) = payload.likelihood {
        active.likelihood = Set(likelihood);
    }
    if let Some(risk_severity) = payload.risk_severity {
        active.risk_severity = Set(risk_severity);
    }
    if let Some(risk_level) = payload.risk_level {
        active.risk_level = Set(risk_level);
    }
    if let Some(ref action_owner) = payload.action_owner {
        active.action_owner = Set(action_owner.trim().to_string());
    }
    if let Some(action_plan) = payload.action_plan {
        active.action_plan = Set(action_plan);
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Vendor Risks",
    operation_id = "deleteVendorRisk",
    summary = "Delete a vendor risk",
    params(("id" = i32, Path, description = "Vendor risk ID")),
    responses(
        (status = 204, description = "Vendor risk deleted"),
        (status = 404, description = "Vendor risk not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_vendor_risk(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    find_vendor_risk(&txn, id).await?;
    vendor_risk::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/{id}/vendor-risks",
    tag = "Vendor Risks",
    operation_id = "listVendorRisksByProject",
    summary = "List vendor risks for a project",
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "List of vendor risks", body = Vec<VendorRiskResponse>),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(project_id))]
pub async fn list_vendor_risks_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
) -> Result<Json<Vec<VendorRiskResponse>>, AppError> {
    find_project(&state.db, project_id).await?;

    let rows = vendor_risk::Entity::find()
        .filter(vendor_risk::Column::ProjectId.eq(project_id))
        .order_by_desc(vendor_risk::Column::CreatedAt)
        .order_by_asc(vendor_risk::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(
        rows.into_iter().map(VendorRiskResponse::from).collect(),
    ))
}

async fn find_vendor_risk<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<vendor_risk::Model, AppError> {
    vendor_risk::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Vendor risk not found".into()))
}

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::project_risk::{self, MitigationStatus};
use crate::entity::project;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::project_risk::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Project Risks",
    operation_id = "createProjectRisk",
    summary = "Create a new project risk",
    request_body = CreateProjectRiskRequest,
    responses(
        (status = 201, description = "Project risk created", body = ProjectRiskResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(project_id = payload.project_id))]
pub async fn create_project_risk(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProjectRiskRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_project_risk(&payload)?;

    let txn = state.db.begin().await?;
    find_project(&txn, payload.project_id).await?;

    let new_risk = project_risk::ActiveModel {
        project_id: Set(payload.project_id),
        risk_name: Set(payload.risk_name.trim().to_string()),
        risk_owner: Set(payload.risk_owner.trim().to_string()),
        risk_description: Set(payload.risk_description),
        risk_category: Set(payload.risk_category.trim().to_string()),
        impact: Set(payload.impact),
        likelihood: Set(payload.likelihood),
        severity: Set(payload.severity),
        risk_level: Set(payload.risk_level),
        mitigation_status: Set(payload.mitigation_status),
        mitigation_plan: Set(payload.mitigation_plan),
        deadline: Set(payload.deadline),
        date_of_assessment: Set(payload.date_of_assessment),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_risk.insert(&txn).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(ProjectRiskResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Project Risks",
    operation_id = "getProjectRisk",
    summary = "Get a project risk by ID",
    params(("id" = i32, Path, description = "Project risk ID")),
    responses(
        (status = 200, description = "Project risk details", body = ProjectRiskResponse),
        (status = 404, description = "Project risk not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_project_risk(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProjectRiskResponse>, AppError> {
    let model = find_project_risk(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Project Risks",
    operation_id = "updateProjectRisk",
    summary = "Update a project risk",
    description = "Partially updates a project risk using PATCH semantics — only provided fields are modified. `deadline` is three-state: omit to keep, null to clear, value to set. An empty payload returns the current resource unchanged.",
    params(("id" = i32, Path, description = "Project risk ID")),
    request_body = UpdateProjectRiskRequest,
    responses(
        (status = 200, description = "Project risk updated", body = ProjectRiskResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Project risk not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_project_risk(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateProjectRiskRequest>,
) -> Result<Json<ProjectRiskResponse>, AppError> {
    validate_update_project_risk(&payload)?;

    if payload == UpdateProjectRiskRequest::default() {
        let existing = find_project_risk(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;

    let existing = find_project_risk(&txn, id).await?;
    let mut active: project_risk::ActiveModel = existing.into();

    if let Some(ref risk_name) = payload.risk_name {
        active.risk_name = Set(risk_name.trim().to_string());
    }
    if let Some(ref risk_owner) = payload.risk_owner {
        active.risk_owner = Set(risk_owner.trim().to_string());
    }
    if let Some(risk_description) = payload.risk_description {
        active.risk_description = Set(risk_description);
    }
    if let Some(ref risk_category) = payload.risk_category {
        active.risk_category = Set(risk_category.trim().to_string());
    }
    if let Some(impact) = payload.impact {
        active.impact = Set(impact);
    }
    if let Some(likelihood) = payload.likelihood {
        active.likelihood = Set(likelihood);
    }
    if let Some(severity) = payload.severity {
        active.severity = Set(severity);
    }
    if let Some(risk_level) = payload.risk_level {
        active.risk_level = Set(risk_level);
    }
    if let Some(mitigation_status) = payload.mitigation_status {
        active.mitigation_status = Set(mitigation_status);
    }
    if let Some(mitigation_plan) = payload.mitigation_plan {
        active.mitigation_plan = Set(mitigation_plan);
    }
    match payload.deadline {
        Some(Some(deadline)) => active.deadline = Set(Some(deadline)),
        Some(None) => active.deadline = Set(None),
        None => {}
    }
    if let Some(date_of_assessment) = payload.date_of_assessment {
        active.date_of_assessment = Set(date_of_assessment);
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Project Risks",
    operation_id = "deleteProjectRisk",
    summary = "Delete a project risk",
    params(("id" = i32, Path, description = "Project risk ID")),
    responses(
        (status = 204, description = "Project risk deleted"),
        (status = 404, description = "Project risk not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_project_risk(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    find_project_risk(&txn, id).await?;
    project_risk::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/{id}/risks",
    tag = "Project Risks",
    operation_id = "listProjectRisks",
    summary = "List risks for a project",
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "List of project risks", body = Vec<ProjectRiskResponse>),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(project_id))]
pub async fn list_project_risks(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
) -> Result<Json<Vec<ProjectRiskResponse>>, AppError> {
    find_project(&state.db, project_id).await?;

    let rows = project_risk::Entity::find()
        .filter(project_risk::Column::ProjectId.eq(project_id))
        .order_by_desc(project_risk::Column::CreatedAt)
        .order_by_asc(project_risk::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(
        rows.into_iter().map(ProjectRiskResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}/risks/non-mitigated",
    tag = "Project Risks",
    operation_id = "listNonMitigatedProjectRisks",
    summary = "List a project's risks whose mitigation is not completed",
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "List of non-mitigated project risks", body = Vec<ProjectRiskResponse>),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(project_id))]
pub async fn list_non_mitigated_project_risks(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
) -> Result<Json<Vec<ProjectRiskResponse>>, AppError> {
    find_project(&state.db, project_id).await?;

    let rows = project_risk::Entity::find()
        .filter(project_risk::Column::ProjectId.eq(project_id))
        .filter(project_risk::Column::MitigationStatus.ne(MitigationStatus::Completed))
        .order_by_desc(project_risk::Column::CreatedAt)
        .order_by_asc(project_risk::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(
        rows.into_iter().map(ProjectRiskResponse::from).collect(),
    ))
}

async fn find_project_risk<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<project_risk::Model, AppError> {
    project_risk::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Project risk not found".into()))
}

pub(super) async fn find_project<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<project::Model, AppError> {
    project::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))
}

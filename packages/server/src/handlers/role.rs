use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::role;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::role::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Roles",
    operation_id = "listRoles",
    summary = "List all roles",
    responses(
        (status = 200, description = "List of roles", body = Vec<RoleResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_roles(State(state): State<AppState>) -> Result<Json<Vec<RoleResponse>>, AppError> {
    let rows = role::Entity::find()
        .order_by_desc(role::Column::CreatedAt)
        .order_by_asc(role::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(RoleResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Roles",
    operation_id = "createRole",
    summary = "Create a new role",
    request_body = CreateRoleRequest,
    responses(
        (status = 201, description = "Role created", body = RoleResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Role name already exists (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_role(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_role(&payload)?;

    let txn = state.db.begin().await?;

    let new_role = role::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        description: Set(payload.description),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_role.insert(&txn).await.map_err(conflict_on_duplicate)?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(RoleResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Roles",
    operation_id = "getRole",
    summary = "Get a role by ID",
    params(("id" = i32, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role details", body = RoleResponse),
        (status = 404, description = "Role not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_role(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RoleResponse>, AppError> {
    let model = find_role(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Roles",
    operation_id = "updateRole",
    summary = "Update a role",
    description = "Partially updates a role using PATCH semantics. An empty payload returns the current resource unchanged.",
    params(("id" = i32, Path, description = "Role ID")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = RoleResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Role not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Role name already exists (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateRoleRequest>,
) -> Result<Json<RoleResponse>, AppError> {
    validate_update_role(&payload)?;

    if payload == UpdateRoleRequest::default() {
        let existing = find_role(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;

    let existing = find_role(&txn, id).await?;
    let mut active: role::ActiveModel = existing.into();

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }

    let model = active.update(&txn).await.map_err(conflict_on_duplicate)?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Roles",
    operation_id = "deleteRole",
    summary = "Delete a role",
    params(("id" = i32, Path, description = "Role ID")),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 404, description = "Role not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    find_role(&txn, id).await?;
    role::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_role<C: ConnectionTrait>(db: &C, id: i32) -> Result<role::Model, AppError> {
    role::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Role not found".into()))
}

fn conflict_on_duplicate(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("A role with that name already exists".into())
        }
        _ => err.into(),
    }
}

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{file, question, subtopic, topic};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::question::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Questions",
    operation_id = "listQuestions",
    summary = "List all assessment questions",
    description = "Returns every question, most recently created first. Evidence file descriptors are trimmed to their `{id, filename}` summary form.",
    responses(
        (status = 200, description = "List of questions", body = Vec<QuestionResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_questions(
    State(state): State<AppState>,
) -> Result<Json<Vec<QuestionResponse>>, AppError> {
    let rows = question::Entity::find()
        .order_by_desc(question::Column::CreatedAt)
        .order_by_asc(question::Column::Id)
        .all(&state.db)
        .await?;

    let items = rows
        .into_iter()
        .map(QuestionResponse::try_from_model)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Questions",
    operation_id = "createQuestion",
    summary = "Create a new question",
    description = "Creates a question under the given subtopic. `status` starts unset and `answer` stays NULL unless supplied.",
    request_body = CreateQuestionRequest,
    responses(
        (status = 201, description = "Question created", body = QuestionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Subtopic not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(subtopic_id = payload.subtopic_id))]
pub async fn create_question(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_question(&payload)?;

    let txn = state.db.begin().await?;
    find_subtopic(&txn, payload.subtopic_id).await?;

    let new_question = question::ActiveModel {
        order_no: Set(payload.order_no),
        question: Set(payload.question.trim().to_string()),
        hint: Set(payload.hint.trim().to_string()),
        priority_level: Set(payload.priority_level),
        answer_type: Set(payload.answer_type),
        input_type: Set(payload.input_type),
        evidence_required: Set(payload.evidence_required),
        is_required: Set(payload.is_required),
        dropdown_options: Set(payload.dropdown_options.map(serde_json::Value::from)),
        evidence_files: Set(None),
        answer: Set(payload.answer),
        subtopic_id: Set(payload.subtopic_id),
        is_demo: Set(payload.is_demo),
        created_at: Set(chrono::Utc::now()),
        status: Set(None),
        ..Default::default()
    };

    let model = new_question.insert(&txn).await?;
    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(QuestionResponse::try_from_model(model)?),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Questions",
    operation_id = "getQuestion",
    summary = "Get a question by ID",
    params(("id" = i32, Path, description = "Question ID")),
    responses(
        (status = 200, description = "Question details", body = QuestionResponse),
        (status = 404, description = "Question not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<QuestionResponse>, AppError> {
    let model = find_question(&state.db, id).await?;
    Ok(Json(QuestionResponse::try_from_model(model)?))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Questions",
    operation_id = "updateQuestion",
    summary = "Update a question's answer or status",
    description = "Partially updates a question using PATCH semantics. Only `answer` and `status` are updatable; all other fields are fixed at creation. An explicit `\"answer\": null` clears the answer to the empty string. An empty payload returns the current resource unchanged.",
    params(("id" = i32, Path, description = "Question ID")),
    request_body = UpdateQuestionRequest,
    responses(
        (status = 200, description = "Question updated", body = QuestionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Question not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_question(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateQuestionRequest>,
) -> Result<Json<QuestionResponse>, AppError> {
    validate_update_question(&payload)?;

    if payload == UpdateQuestionRequest::default() {
        let existing = find_question(&state.db, id).await?;
        return Ok(Json(QuestionResponse::try_from_model(existing)?));
    }

    let txn = state.db.begin().await?;

    let existing = find_question(&txn, id).await?;
    let mut active: question::ActiveModel = existing.into();

    match payload.answer {
        Some(Some(answer)) => active.answer = Set(Some(answer)),
        // Explicit null clears the stored answer to the empty string.
        Some(None) => active.answer = Set(Some(String::new())),
        None => {}
    }
    if let Some(status) = payload.status {
        active.status = Set(Some(status));
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(QuestionResponse::try_from_model(model)?))
}

#[utoipa::path(
    patch,
    path = "/{id}/evidence-files",
    tag = "Questions",
    operation_id = "updateQuestionEvidenceFiles",
    summary = "Attach or detach evidence file descriptors",
    description = "Merges uploaded file descriptors into the question's evidence list and removes the descriptors named in `deleted`. Detached descriptors have their stored file rows deleted in the same transaction.",
    params(("id" = i32, Path, description = "Question ID")),
    request_body = UpdateEvidenceFilesRequest,
    responses(
        (status = 200, description = "Evidence list updated", body = QuestionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Question not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_question_evidence_files(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateEvidenceFilesRequest>,
) -> Result<Json<QuestionResponse>, AppError> {
    validate_update_evidence_files(&payload)?;

    if payload.uploads.is_empty() && payload.deleted.is_empty() {
        let existing = find_question(&state.db, id).await?;
        return Ok(Json(QuestionResponse::try_from_model(existing)?));
    }

    let txn = state.db.begin().await?;

    let existing = find_question(&txn, id).await?;
    let mut refs = parse_evidence_refs(existing.evidence_files.as_ref())?;

    refs.retain(|r| !payload.deleted.contains(&r.id));
    refs.extend(payload.uploads);

    if !payload.deleted.is_empty() {
        file::Entity::delete_many()
            .filter(file::Column::Id.is_in(payload.deleted))
            .exec(&txn)
            .await?;
    }

    let encoded = serde_json::to_value(&refs)
        .map_err(|e| AppError::Internal(format!("Failed to encode evidence_files: {e}")))?;

    let mut active: question::ActiveModel = existing.into();
    active.evidence_files = Set(Some(encoded));

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(QuestionResponse::try_from_model(model)?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Questions",
    operation_id = "deleteQuestion",
    summary = "Delete a question",
    description = "Permanently deletes a question. Stored file rows referenced by its evidence descriptors are deleted in the same transaction.",
    params(("id" = i32, Path, description = "Question ID")),
    responses(
        (status = 204, description = "Question deleted"),
        (status = 404, description = "Question not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    let existing = find_question(&txn, id).await?;
    let refs = parse_evidence_refs(existing.evidence_files.as_ref())?;

    if !refs.is_empty() {
        let file_ids: Vec<i32> = refs.iter().map(|r| r.id).collect();
        file::Entity::delete_many()
            .filter(file::Column::Id.is_in(file_ids))
            .exec(&txn)
            .await?;
    }

    question::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/{id}/questions",
    tag = "Questions",
    operation_id = "listQuestionsBySubtopic",
    summary = "List questions in a subtopic",
    params(("id" = i32, Path, description = "Subtopic ID")),
    responses(
        (status = 200, description = "List of questions", body = Vec<QuestionResponse>),
        (status = 404, description = "Subtopic not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(subtopic_id))]
pub async fn list_questions_by_subtopic(
    State(state): State<AppState>,
    Path(subtopic_id): Path<i32>,
) -> Result<Json<Vec<QuestionResponse>>, AppError> {
    find_subtopic(&state.db, subtopic_id).await?;

    let rows = question::Entity::find()
        .filter(question::Column::SubtopicId.eq(subtopic_id))
        .order_by_desc(question::Column::CreatedAt)
        .order_by_asc(question::Column::Id)
        .all(&state.db)
        .await?;

    let items = rows
        .into_iter()
        .map(QuestionResponse::try_from_model)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/{id}/questions",
    tag = "Questions",
    operation_id = "listQuestionsByTopic",
    summary = "List questions across all subtopics of a topic",
    params(("id" = i32, Path, description = "Topic ID")),
    responses(
        (status = 200, description = "List of questions", body = Vec<QuestionResponse>),
        (status = 404, description = "Topic not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(topic_id))]
pub async fn list_questions_by_topic(
    State(state): State<AppState>,
    Path(topic_id): Path<i32>,
) -> Result<Json<Vec<QuestionResponse>>, AppError> {
    find_topic(&state.db, topic_id).await?;

    let rows = question::Entity::find()
        .filter(
            question::Column::SubtopicId.in_subquery(
                SeaQuery::select()
                    .column(subtopic::Column::Id)
                    .from(subtopic::Entity)
                    .and_where(subtopic::Column::TopicId.eq(topic_id))
                    .to_owned(),
            ),
        )
        .order_by_desc(question::Column::CreatedAt)
        .order_by_asc(question::Column::Id)
        .all(&state.db)
        .await?;

    let items = rows
        .into_iter()
        .map(QuestionResponse::try_from_model)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(items))
}

async fn find_question<C: ConnectionTrait>(db: &C, id: i32) -> Result<question::Model, AppError> {
    question::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Question not found".into()))
}

async fn find_subtopic<C: ConnectionTrait>(db: &C, id: i32) -> Result<subtopic::Model, AppError> {
    subtopic::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Subtopic not found".into()))
}

async fn find_topic<C: ConnectionTrait>(db: &C, id: i32) -> Result<topic::Model, AppError> {
    topic::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Topic not found".into()))
}

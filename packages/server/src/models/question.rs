use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::question::{self, PriorityLevel, QuestionStatus};
use crate::error::AppError;

use super::shared::double_option;
use super::shared::{validate_optional_text, validate_text};

/// Full evidence file descriptor as stored in the `evidence_files` JSONB
/// column. `id` references a row in the `file` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EvidenceFileRef {
    pub id: i32,
    pub filename: String,
    pub project_id: i32,
    pub uploaded_by: i32,
    pub uploaded_time: DateTime<Utc>,
}

/// Trimmed descriptor form rendered in question responses.
#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
pub struct EvidenceFileSummary {
    pub id: i32,
    pub filename: String,
}

impl From<EvidenceFileRef> for EvidenceFileSummary {
    fn from(r: EvidenceFileRef) -> Self {
        Self {
            id: r.id,
            filename: r.filename,
        }
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateQuestionRequest {
    pub subtopic_id: i32,
    pub question: String,
    pub hint: String,
    pub priority_level: PriorityLevel,
    pub answer_type: String,
    pub input_type: Option<String>,
    pub evidence_required: bool,
    pub is_required: bool,
    pub order_no: Option<i32>,
    pub dropdown_options: Option<Vec<String>>,
    pub answer: Option<String>,
    #[serde(default)]
    pub is_demo: bool,
}

/// PATCH payload. Only `answer` and `status` are updatable; structural
/// fields are fixed at creation. An explicit `"answer": null` clears the
/// answer to the empty string.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateQuestionRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub answer: Option<Option<String>>,
    pub status: Option<QuestionStatus>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateEvidenceFilesRequest {
    /// Descriptors of newly uploaded files to attach.
    #[serde(default)]
    pub uploads: Vec<EvidenceFileRef>,
    /// Descriptor ids to detach; the matching `file` rows are deleted.
    #[serde(default)]
    pub deleted: Vec<i32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct QuestionResponse {
    pub id: i32,
    pub order_no: Option<i32>,
    pub question: String,
    pub hint: String,
    pub priority_level: PriorityLevel,
    pub answer_type: String,
    pub input_type: Option<String>,
    pub evidence_required: bool,
    pub is_required: bool,
    pub dropdown_options: Option<serde_json::Value>,
    pub evidence_files: Vec<EvidenceFileSummary>,
    pub answer: Option<String>,
    pub subtopic_id: i32,
    pub is_demo: bool,
    pub created_at: DateTime<Utc>,
    pub status: Option<QuestionStatus>,
}

impl QuestionResponse {
    /// Shape a model for the wire, trimming evidence descriptors down to
    /// their `{id, filename}` summary form.
    pub fn try_from_model(m: question::Model) -> Result<Self, AppError> {
        let refs = parse_evidence_refs(m.evidence_files.as_ref())?;
        Ok(Self {
            id: m.id,
            order_no: m.order_no,
            question: m.question,
            hint: m.hint,
            priority_level: m.priority_level,
            answer_type: m.answer_type,
            input_type: m.input_type,
            evidence_required: m.evidence_required,
            is_required: m.is_required,
            dropdown_options: m.dropdown_options,
            evidence_files: refs.into_iter().map(EvidenceFileSummary::from).collect(),
            answer: m.answer,
            subtopic_id: m.subtopic_id,
            is_demo: m.is_demo,
            created_at: m.created_at,
            status: m.status,
        })
    }
}

/// Decode the `evidence_files` JSONB column. NULL decodes as empty.
pub fn parse_evidence_refs(
    value: Option<&serde_json::Value>,
) -> Result<Vec<EvidenceFileRef>, AppError> {
    match value {
        None | Some(serde_json::Value::Null) => Ok(Vec::new()),
        Some(v) => serde_json::from_value(v.clone())
            .map_err(|e| AppError::Internal(format!("Corrupt evidence_files column: {e}"))),
    }
}

pub fn validate_create_question(req: &CreateQuestionRequest) -> Result<(), AppError> {
    validate_text(&req.question, "Question", 2048)?;
    validate_text(&req.hint, "Hint", 1024)?;
    validate_text(&req.answer_type, "Answer type", 64)?;
    validate_optional_text(req.input_type.as_deref(), "Input type", 64)?;
    if let Some(order_no) = req.order_no
        && order_no < 0
    {
        return Err(AppError::Validation("Order number must be >= 0".into()));
    }
    if let Some(ref answer) = req.answer
        && answer.chars().count() > 8192
    {
        return Err(AppError::Validation(
            "Answer must be at most 8192 characters".into(),
        ));
    }
    Ok(())
}

pub fn validate_update_question(req: &UpdateQuestionRequest) -> Result<(), AppError> {
    if let Some(Some(ref answer)) = req.answer
        && answer.chars().count() > 8192
    {
        return Err(AppError::Validation(
            "Answer must be at most 8192 characters".into(),
        ));
    }
    Ok(())
}

pub fn validate_update_evidence_files(req: &UpdateEvidenceFilesRequest) -> Result<(), AppError> {
    for upload in &req.uploads {
        validate_text(&upload.filename, "Filename", 256)?;
    }
    Ok(())
}

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AssignmentId, SubmissionId};
use crate::types::{AnswerAnalysis, SubmissionMetrics, SubmissionStatus, ValidationReport};

/// POST /api/submissions request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateSubmissionRequest {
    pub assignment_id: AssignmentId,
    pub engineer_id: String,
}

/// POST /api/submissions response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateSubmissionResponse {
    pub success: bool,
    pub submission_id: SubmissionId,
    pub message: String,
}

/// GET /api/submissions query string.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SubmissionListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SubmissionStatus>,
}

/// POST /api/submissions/{id}/autosave request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AutosaveRequest {
    pub answers: Vec<String>,
    /// Seconds per question index, merged into the stored totals.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub time_spent: BTreeMap<usize, u32>,
}

/// POST /api/submissions/{id}/autosave response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AutosaveResponse {
    pub success: bool,
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub metrics: SubmissionMetrics,
    pub validation: ValidationReport,
}

/// POST /api/submissions/{id}/submit request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub answers: Vec<String>,
}

/// POST /api/submissions/{id}/submit response.
///
/// `success` is false when validation blocked the submission; the record stays a draft.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub status: SubmissionStatus,
    pub message: String,
    pub metrics: SubmissionMetrics,
    pub validation: ValidationReport,
}

/// POST /api/analyze request: score answers without touching any stored record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

/// POST /api/analyze response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analyses: Vec<AnswerAnalysis>,
    pub metrics: SubmissionMetrics,
    pub validation: ValidationReport,
}

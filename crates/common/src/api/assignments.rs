use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::AssignmentId;
use crate::types::Assignment;

/// GET /api/generate/{engineer_id} response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerateAssignmentResponse {
    pub success: bool,
    pub assignment_id: AssignmentId,
    pub code: String,
    pub title: String,
    pub topic: String,
    pub difficulty: u8,
    pub points: u32,
    pub due_date: NaiveDate,
    pub question_count: usize,
}

impl From<&Assignment> for GenerateAssignmentResponse {
    fn from(a: &Assignment) -> Self {
        Self {
            success: true,
            assignment_id: a.id,
            code: a.code.clone(),
            title: a.title.clone(),
            topic: a.topic.clone(),
            difficulty: a.difficulty,
            points: a.points,
            due_date: a.due_date,
            question_count: a.question_count(),
        }
    }
}

/// POST /api/bulk_generate request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BulkGenerateRequest {
    #[serde(default)]
    pub engineer_ids: Vec<String>,
}

/// POST /api/bulk_generate response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BulkGenerateResponse {
    pub success: bool,
    pub results: Vec<BulkGenerateResult>,
}

/// Per-engineer outcome of a bulk generation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BulkGenerateResult {
    pub engineer_id: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_id: Option<AssignmentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

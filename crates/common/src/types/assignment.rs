use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::AssignmentId;

/// A generated topic assignment owned by one engineer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    /// Human-readable reference, e.g. `PD_ROUTING_20240301_0930`.
    pub code: String,
    pub title: String,
    /// Topic key; selects the technical-term lexicon during scoring.
    pub topic: String,
    pub difficulty: u8,
    pub questions: Vec<String>,
    pub deliverables: Vec<String>,
    pub due_date: NaiveDate,
    pub points: u32,
    pub engineer_id: String,
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

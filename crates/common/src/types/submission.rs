use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AssignmentId, SubmissionId};
use crate::types::{AnswerAnalysis, SubmissionMetrics, ValidationReport};

/// Submission lifecycle states.
///
/// The scoring core only drives Draft → Submitted; the later states belong to
/// the grading workflow and are carried so stored records round-trip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Draft,
    Submitted,
    UnderReview,
    Graded,
    Returned,
}

impl SubmissionStatus {
    /// Answers may only change while the submission is a draft.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns the string representation used in PostgreSQL.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::Graded => "graded",
            Self::Returned => "returned",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "submitted" => Some(Self::Submitted),
            "under_review" => Some(Self::UnderReview),
            "graded" => Some(Self::Graded),
            "returned" => Some(Self::Returned),
            _ => None,
        }
    }
}

/// An engineer's answers to one assignment, with derived quality data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub assignment_id: AssignmentId,
    pub engineer_id: String,
    pub status: SubmissionStatus,
    /// One slot per question, in question order.
    pub answers: Vec<String>,
    #[serde(default)]
    pub answer_analyses: Vec<AnswerAnalysis>,
    pub metrics: SubmissionMetrics,
    pub is_complete: bool,
    #[serde(default)]
    pub quality_issues: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Bumped on every accepted write.
    pub version: u32,
    /// Timestamps of autosave events, oldest first.
    #[serde(default)]
    pub auto_saves: Vec<DateTime<Utc>>,
    /// Client-reported seconds spent per question index.
    #[serde(default)]
    pub time_spent: BTreeMap<usize, u32>,
    /// Grade set by the external review workflow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Submission {
    /// A fresh draft with `question_count` empty answers.
    pub fn new(assignment_id: AssignmentId, engineer_id: String, question_count: usize) -> Self {
        let now = Utc::now();
        Self {
            id: SubmissionId::new(),
            assignment_id,
            engineer_id,
            status: SubmissionStatus::Draft,
            answers: vec![String::new(); question_count],
            answer_analyses: Vec::new(),
            metrics: SubmissionMetrics::empty(),
            is_complete: false,
            quality_issues: Vec::new(),
            warnings: Vec::new(),
            version: 1,
            auto_saves: Vec::new(),
            time_spent: (0..question_count).map(|i| (i, 0)).collect(),
            score: None,
            feedback: None,
            created_at: now,
            last_modified: now,
            submitted_at: None,
        }
    }

    /// Store a fresh analysis run on the record.
    pub fn apply_scoring(
        &mut self,
        analyses: Vec<AnswerAnalysis>,
        metrics: SubmissionMetrics,
        report: ValidationReport,
    ) {
        self.answer_analyses = analyses;
        self.metrics = metrics;
        self.is_complete = report.is_complete;
        self.quality_issues = report.issues;
        self.warnings = report.warnings;
    }

    /// The validation outcome of the last scoring run.
    pub fn validation_report(&self) -> ValidationReport {
        ValidationReport {
            is_complete: self.is_complete,
            issues: self.quality_issues.clone(),
            warnings: self.warnings.clone(),
        }
    }
}

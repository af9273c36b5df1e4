//! Submission lifecycle: Draft --autosave--> Draft --submit--> Submitted.
//!
//! Every write reruns the analyzer, aggregator and validator over the full
//! answer list and stores the results on the record. Draft writes are
//! last-writer-wins, but a write never lands once the record has left Draft.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;

use pdassign_common::config::SystemConfig;
use pdassign_common::ids::{AssignmentId, SubmissionId};
use pdassign_common::types::{Submission, SubmissionStatus, ValidationReport};
use pdassign_common::{PdAssignError, Result};

use crate::analysis::{Evaluation, SubmissionValidator};
use crate::store::{Repository, StoreError};

/// Result of a submit request.
#[derive(Clone, Debug)]
pub enum SubmitOutcome {
    /// The submission moved to Submitted.
    Accepted {
        submission: Submission,
        message: String,
    },
    /// Validation found blocking issues; the answers were saved and the record stays a draft.
    Rejected {
        submission: Submission,
        report: ValidationReport,
    },
}

impl SubmitOutcome {
    pub fn submission(&self) -> &Submission {
        match self {
            Self::Accepted { submission, .. } | Self::Rejected { submission, .. } => submission,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Drives submissions through their lifecycle against a repository.
pub struct SubmissionManager {
    store: Arc<dyn Repository>,
    validator: SubmissionValidator,
    default_question_count: usize,
    allow_incomplete: bool,
}

impl SubmissionManager {
    pub fn new(store: Arc<dyn Repository>, config: &SystemConfig) -> Self {
        Self {
            store,
            validator: SubmissionValidator::new(&config.scoring),
            default_question_count: config.assignments.question_count,
            allow_incomplete: config.scoring.allow_incomplete_submission,
        }
    }

    /// Score answers without reading or writing any record.
    pub fn analyze(&self, answers: &[String], topic: Option<&str>) -> Evaluation {
        self.validator.evaluate(answers, topic)
    }

    /// Open a draft for an existing assignment with one empty answer per question.
    /// The empty answers are scored so the stored metrics match them.
    pub async fn create_submission(
        &self,
        assignment_id: AssignmentId,
        engineer_id: &str,
    ) -> Result<Submission> {
        let engineer_id = engineer_id.trim();
        if engineer_id.is_empty() {
            return Err(PdAssignError::Validation("engineer_id must not be empty".into()));
        }

        let assignment = self.store.get_assignment(assignment_id).await?;
        let question_count = match assignment.question_count() {
            0 => self.default_question_count,
            n => n,
        };

        let mut submission =
            Submission::new(assignment_id, engineer_id.to_string(), question_count);
        let evaluation = self
            .validator
            .evaluate(&submission.answers, Some(assignment.topic.as_str()));
        submission.apply_scoring(evaluation.analyses, evaluation.metrics, evaluation.report);
        self.store.put_submission(&submission).await?;

        tracing::info!(
            submission_id = %submission.id,
            assignment_id = %assignment_id,
            engineer_id = %engineer_id,
            question_count = question_count,
            "Submission created"
        );
        metrics::counter!("submissions.created").increment(1);

        Ok(submission)
    }

    /// Overwrite a draft's answers and rescore it.
    pub async fn autosave(
        &self,
        id: SubmissionId,
        answers: Vec<String>,
        time_spent: BTreeMap<usize, u32>,
    ) -> Result<Submission> {
        let (mut submission, topic) = self.load_draft(id).await?;
        let answers = normalize_answers(answers, submission.answers.len())?;

        let now = Utc::now();
        let evaluation = self.validator.evaluate(&answers, topic.as_deref());

        submission.answers = answers;
        for (index, seconds) in time_spent {
            if index < submission.answers.len() {
                submission.time_spent.insert(index, seconds);
            }
        }
        submission.apply_scoring(evaluation.analyses, evaluation.metrics, evaluation.report);
        submission.last_modified = now;
        submission.auto_saves.push(now);
        submission.version += 1;

        self.store.update_draft(&submission).await?;

        tracing::debug!(
            submission_id = %id,
            version = submission.version,
            total_words = submission.metrics.total_words,
            "Submission autosaved"
        );
        metrics::counter!("submissions.autosaved").increment(1);

        Ok(submission)
    }

    /// Final scoring run and, if it passes, the one-way move to Submitted.
    pub async fn submit(&self, id: SubmissionId, answers: Vec<String>) -> Result<SubmitOutcome> {
        let (mut submission, topic) = self.load_draft(id).await?;
        let answers = normalize_answers(answers, submission.answers.len())?;

        let now = Utc::now();
        let evaluation = self.validator.evaluate(&answers, topic.as_deref());
        let report = evaluation.report.clone();

        submission.answers = answers;
        submission.apply_scoring(evaluation.analyses, evaluation.metrics, evaluation.report);
        submission.last_modified = now;
        submission.version += 1;

        if !report.is_complete && !self.allow_incomplete {
            self.store.update_draft(&submission).await?;

            tracing::info!(
                submission_id = %id,
                issues = report.issues.len(),
                "Submission rejected by validation"
            );
            metrics::counter!("submissions.rejected").increment(1);

            return Ok(SubmitOutcome::Rejected { submission, report });
        }

        submission.status = SubmissionStatus::Submitted;
        submission.submitted_at = Some(now);
        self.store.update_draft(&submission).await?;

        let score = submission.metrics.overall_quality_score;
        tracing::info!(
            submission_id = %id,
            quality_score = score,
            complete = report.is_complete,
            "Submission submitted"
        );
        metrics::counter!("submissions.submitted").increment(1);
        metrics::histogram!("submissions.quality_score").record(score);

        Ok(SubmitOutcome::Accepted {
            message: format!("Submission successful! Quality score: {:.1}/100", score),
            submission,
        })
    }

    pub async fn get(&self, id: SubmissionId) -> Result<Submission> {
        Ok(self.store.get_submission(id).await?)
    }

    pub async fn list(&self, status: Option<SubmissionStatus>) -> Result<Vec<Submission>> {
        Ok(self.store.list_submissions(status).await?)
    }

    /// Load a submission that may still be edited, plus its assignment topic.
    async fn load_draft(&self, id: SubmissionId) -> Result<(Submission, Option<String>)> {
        let submission = self.store.get_submission(id).await?;

        if !submission.status.is_editable() {
            return Err(PdAssignError::InvalidState(format!(
                "Cannot modify submission {}: it is already {}",
                id,
                submission.status.as_db_str()
            )));
        }

        let topic = match self.store.get_assignment(submission.assignment_id).await {
            Ok(assignment) => Some(assignment.topic),
            Err(StoreError::NotFound(_)) => {
                tracing::warn!(
                    submission_id = %id,
                    assignment_id = %submission.assignment_id,
                    "Assignment missing, scoring without a topic lexicon"
                );
                None
            }
            Err(e) => return Err(e.into()),
        };

        Ok((submission, topic))
    }
}

/// Fit an incoming answer list to the submission's question count.
/// Short lists are padded with empty answers; long lists are rejected.
fn normalize_answers(mut answers: Vec<String>, question_count: usize) -> Result<Vec<String>> {
    if answers.len() > question_count {
        return Err(PdAssignError::Validation(format!(
            "Expected at most {} answers, got {}",
            question_count,
            answers.len()
        )));
    }
    answers.resize(question_count, String::new());
    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pads_short_lists() {
        let answers = normalize_answers(vec!["a".into()], 3).unwrap();
        assert_eq!(answers, vec!["a".to_string(), String::new(), String::new()]);
    }

    #[test]
    fn test_normalize_rejects_long_lists() {
        let err = normalize_answers(vec![String::new(); 4], 3).unwrap_err();
        assert!(matches!(err, PdAssignError::Validation(_)));
    }

    #[test]
    fn test_outcome_accessors() {
        let sub = Submission::new(AssignmentId::new(), "eng".into(), 1);
        let rejected = SubmitOutcome::Rejected {
            submission: sub.clone(),
            report: ValidationReport::default(),
        };
        assert!(!rejected.is_accepted());
        assert_eq!(rejected.submission().id, sub.id);
    }
}

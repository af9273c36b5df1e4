use chrono::{DateTime, Utc};
use uuid::Uuid;

use pdassign_common::ids::{AssignmentId, SubmissionId};
use pdassign_common::types::{Submission, SubmissionStatus};

use super::{StoreClient, StoreError};

const SUBMISSION_COLUMNS: &str = "id, assignment_id, engineer_id, status, answers, answer_analyses, \
     metrics, is_complete, quality_issues, warnings, version, auto_saves, time_spent, \
     score, feedback, created_at, last_modified, submitted_at";

impl StoreClient {
    /// Insert a submission, replacing any existing row with the same id.
    pub(super) async fn upsert_submission(&self, s: &Submission) -> Result<(), StoreError> {
        let to_json = |v: serde_json::Result<serde_json::Value>| v.unwrap_or_default();

        sqlx::query(
            r#"
            INSERT INTO submissions (id, assignment_id, engineer_id, status, answers,
                                     answer_analyses, metrics, is_complete, quality_issues,
                                     warnings, version, auto_saves, time_spent, score, feedback,
                                     created_at, last_modified, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            ON CONFLICT (id) DO UPDATE
            SET status = EXCLUDED.status,
                answers = EXCLUDED.answers,
                answer_analyses = EXCLUDED.answer_analyses,
                metrics = EXCLUDED.metrics,
                is_complete = EXCLUDED.is_complete,
                quality_issues = EXCLUDED.quality_issues,
                warnings = EXCLUDED.warnings,
                version = EXCLUDED.version,
                auto_saves = EXCLUDED.auto_saves,
                time_spent = EXCLUDED.time_spent,
                score = EXCLUDED.score,
                feedback = EXCLUDED.feedback,
                last_modified = EXCLUDED.last_modified,
                submitted_at = EXCLUDED.submitted_at
            "#,
        )
        .bind(s.id.0)
        .bind(s.assignment_id.0)
        .bind(&s.engineer_id)
        .bind(s.status.as_db_str())
        .bind(to_json(serde_json::to_value(&s.answers)))
        .bind(to_json(serde_json::to_value(&s.answer_analyses)))
        .bind(to_json(serde_json::to_value(&s.metrics)))
        .bind(s.is_complete)
        .bind(to_json(serde_json::to_value(&s.quality_issues)))
        .bind(to_json(serde_json::to_value(&s.warnings)))
        .bind(i32::try_from(s.version).unwrap_or(i32::MAX))
        .bind(to_json(serde_json::to_value(&s.auto_saves)))
        .bind(to_json(serde_json::to_value(&s.time_spent)))
        .bind(s.score)
        .bind(&s.feedback)
        .bind(s.created_at)
        .bind(s.last_modified)
        .bind(s.submitted_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }

    /// Overwrite the editable columns of a row that is still a draft.
    pub(super) async fn update_draft_submission(&self, s: &Submission) -> Result<(), StoreError> {
        let to_json = |v: serde_json::Result<serde_json::Value>| v.unwrap_or_default();

        let result = sqlx::query(
            r#"
            UPDATE submissions
            SET status = $2,
                answers = $3,
                answer_analyses = $4,
                metrics = $5,
                is_complete = $6,
                quality_issues = $7,
                warnings = $8,
                version = $9,
                auto_saves = $10,
                time_spent = $11,
                last_modified = $12,
                submitted_at = $13
            WHERE id = $1 AND status = $14
            "#,
        )
        .bind(s.id.0)
        .bind(s.status.as_db_str())
        .bind(to_json(serde_json::to_value(&s.answers)))
        .bind(to_json(serde_json::to_value(&s.answer_analyses)))
        .bind(to_json(serde_json::to_value(&s.metrics)))
        .bind(s.is_complete)
        .bind(to_json(serde_json::to_value(&s.quality_issues)))
        .bind(to_json(serde_json::to_value(&s.warnings)))
        .bind(i32::try_from(s.version).unwrap_or(i32::MAX))
        .bind(to_json(serde_json::to_value(&s.auto_saves)))
        .bind(to_json(serde_json::to_value(&s.time_spent)))
        .bind(s.last_modified)
        .bind(s.submitted_at)
        .bind(SubmissionStatus::Draft.as_db_str())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            // Distinguish a missing row from one that has left Draft.
            let current = self.fetch_submission(s.id).await?;
            return Err(StoreError::Conflict(format!(
                "Submission {} is already {}",
                s.id,
                current.status.as_db_str()
            )));
        }

        Ok(())
    }

    pub(super) async fn fetch_submission(&self, id: SubmissionId) -> Result<Submission, StoreError> {
        let sql = format!("SELECT {} FROM submissions WHERE id = $1", SUBMISSION_COLUMNS);
        let row = sqlx::query_as::<_, SubmissionRow>(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?
            .ok_or_else(|| StoreError::NotFound(format!("Submission {}", id)))?;

        Submission::try_from(row)
    }

    pub(super) async fn fetch_submissions(
        &self,
        status: Option<SubmissionStatus>,
    ) -> Result<Vec<Submission>, StoreError> {
        let sql = format!(
            "SELECT {} FROM submissions WHERE ($1::TEXT IS NULL OR status = $1) ORDER BY created_at",
            SUBMISSION_COLUMNS
        );
        let rows = sqlx::query_as::<_, SubmissionRow>(&sql)
            .bind(status.map(|s| s.as_db_str()))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        rows.into_iter().map(Submission::try_from).collect()
    }
}

/// Internal row type for sqlx deserialization.
#[derive(sqlx::FromRow)]
struct SubmissionRow {
    id: Uuid,
    assignment_id: Uuid,
    engineer_id: String,
    status: String,
    answers: serde_json::Value,
    answer_analyses: serde_json::Value,
    metrics: serde_json::Value,
    is_complete: bool,
    quality_issues: serde_json::Value,
    warnings: serde_json::Value,
    version: i32,
    auto_saves: serde_json::Value,
    time_spent: serde_json::Value,
    score: Option<f64>,
    feedback: Option<String>,
    created_at: DateTime<Utc>,
    last_modified: DateTime<Utc>,
    submitted_at: Option<DateTime<Utc>>,
}

impl TryFrom<SubmissionRow> for Submission {
    type Error = StoreError;

    fn try_from(row: SubmissionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SubmissionId::from_uuid(row.id),
            assignment_id: AssignmentId::from_uuid(row.assignment_id),
            engineer_id: row.engineer_id,
            status: parse_submission_status(row.id, &row.status)?,
            answers: serde_json::from_value(row.answers).unwrap_or_default(),
            answer_analyses: serde_json::from_value(row.answer_analyses).unwrap_or_default(),
            metrics: serde_json::from_value(row.metrics).unwrap_or_default(),
            is_complete: row.is_complete,
            quality_issues: serde_json::from_value(row.quality_issues).unwrap_or_default(),
            warnings: serde_json::from_value(row.warnings).unwrap_or_default(),
            version: u32::try_from(row.version).unwrap_or(1),
            auto_saves: serde_json::from_value(row.auto_saves).unwrap_or_default(),
            time_spent: serde_json::from_value(row.time_spent).unwrap_or_default(),
            score: row.score,
            feedback: row.feedback,
            created_at: row.created_at,
            last_modified: row.last_modified,
            submitted_at: row.submitted_at,
        })
    }
}

/// Unknown status strings are refused rather than mapped, so a damaged row
/// can never come back as an editable draft.
fn parse_submission_status(id: Uuid, s: &str) -> Result<SubmissionStatus, StoreError> {
    SubmissionStatus::from_db_str(s).ok_or_else(|| {
        tracing::warn!(submission_id = %id, status = s, "Unknown submission status in store");
        StoreError::Query(format!("Submission {} has unknown status '{}'", id, s))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_status_parses() {
        let status = parse_submission_status(Uuid::new_v4(), "under_review").unwrap();
        assert_eq!(status, SubmissionStatus::UnderReview);
    }

    #[test]
    fn test_unknown_status_is_an_error() {
        let err = parse_submission_status(Uuid::new_v4(), "archived").unwrap_err();
        assert!(matches!(err, StoreError::Query(_)));
    }
}

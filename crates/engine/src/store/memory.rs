use std::collections::HashMap;

use tokio::sync::RwLock;

use pdassign_common::ids::{AssignmentId, SubmissionId};
use pdassign_common::types::{Assignment, Submission, SubmissionStatus};

use super::{Repository, StoreError, StoreFuture, DEFAULT_DIFFICULTY};

/// Process-local repository. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    assignments: RwLock<HashMap<AssignmentId, Assignment>>,
    submissions: RwLock<HashMap<SubmissionId, Submission>>,
    difficulty: RwLock<HashMap<String, u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an engineer's difficulty level.
    pub async fn set_engineer_difficulty(&self, engineer_id: &str, difficulty: u8) {
        self.difficulty
            .write()
            .await
            .insert(engineer_id.to_string(), difficulty);
    }
}

impl Repository for MemoryStore {
    fn put_assignment<'a>(&'a self, assignment: &'a Assignment) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.assignments
                .write()
                .await
                .insert(assignment.id, assignment.clone());
            Ok(())
        })
    }

    fn get_assignment(&self, id: AssignmentId) -> StoreFuture<'_, Assignment> {
        Box::pin(async move {
            self.assignments
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(format!("Assignment {}", id)))
        })
    }

    fn list_assignments(&self) -> StoreFuture<'_, Vec<Assignment>> {
        Box::pin(async move {
            let mut all: Vec<Assignment> =
                self.assignments.read().await.values().cloned().collect();
            all.sort_by_key(|a| a.created_at);
            Ok(all)
        })
    }

    fn put_submission<'a>(&'a self, submission: &'a Submission) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.submissions
                .write()
                .await
                .insert(submission.id, submission.clone());
            Ok(())
        })
    }

    fn update_draft<'a>(&'a self, submission: &'a Submission) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let mut submissions = self.submissions.write().await;
            let stored = submissions
                .get_mut(&submission.id)
                .ok_or_else(|| StoreError::NotFound(format!("Submission {}", submission.id)))?;
            if !stored.status.is_editable() {
                return Err(StoreError::Conflict(format!(
                    "Submission {} is already {}",
                    submission.id,
                    stored.status.as_db_str()
                )));
            }
            *stored = submission.clone();
            Ok(())
        })
    }

    fn get_submission(&self, id: SubmissionId) -> StoreFuture<'_, Submission> {
        Box::pin(async move {
            self.submissions
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(format!("Submission {}", id)))
        })
    }

    fn list_submissions(
        &self,
        status: Option<SubmissionStatus>,
    ) -> StoreFuture<'_, Vec<Submission>> {
        Box::pin(async move {
            let mut matching: Vec<Submission> = self
                .submissions
                .read()
                .await
                .values()
                .filter(|s| status.map_or(true, |wanted| s.status == wanted))
                .cloned()
                .collect();
            matching.sort_by_key(|s| s.created_at);
            Ok(matching)
        })
    }

    fn engineer_difficulty<'a>(&'a self, engineer_id: &'a str) -> StoreFuture<'a, u8> {
        Box::pin(async move {
            let mut levels = self.difficulty.write().await;
            Ok(*levels
                .entry(engineer_id.to_string())
                .or_insert(DEFAULT_DIFFICULTY))
        })
    }

    fn health_check(&self) -> StoreFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn assignment(engineer: &str) -> Assignment {
        Assignment {
            id: AssignmentId::new(),
            code: "PD_ROUTING_20240301_0930".into(),
            title: "Routing Comprehensive Challenge".into(),
            topic: "routing".into(),
            difficulty: 2,
            questions: vec!["Q1".into(), "Q2".into()],
            deliverables: Vec::new(),
            due_date: Utc::now().date_naive(),
            points: 140,
            engineer_id: engineer.into(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_assignment_put_get() {
        let store = MemoryStore::new();
        let a = assignment("eng_001");
        store.put_assignment(&a).await.unwrap();
        assert_eq!(store.get_assignment(a.id).await.unwrap(), a);
    }

    #[tokio::test]
    async fn test_missing_records_are_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.get_assignment(AssignmentId::new()).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.get_submission(SubmissionId::new()).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_put_overwrites_last_writer_wins() {
        let store = MemoryStore::new();
        let a = assignment("eng_001");
        let mut sub = Submission::new(a.id, "eng_001".into(), 2);
        store.put_submission(&sub).await.unwrap();

        sub.answers[0] = "updated".into();
        sub.version = 2;
        store.put_submission(&sub).await.unwrap();

        let stored = store.get_submission(sub.id).await.unwrap();
        assert_eq!(stored.answers[0], "updated");
        assert_eq!(stored.version, 2);
        assert_eq!(store.list_submissions(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_draft_refuses_closed_records() {
        let store = MemoryStore::new();
        let a = assignment("eng_001");
        let draft = Submission::new(a.id, "eng_001".into(), 2);
        store.put_submission(&draft).await.unwrap();

        let mut edited = draft.clone();
        edited.answers[0] = "first pass".into();
        store.update_draft(&edited).await.unwrap();

        let mut submitted = edited.clone();
        submitted.status = SubmissionStatus::Submitted;
        store.update_draft(&submitted).await.unwrap();

        // A stale draft copy must not reopen the record.
        let err = store.update_draft(&edited).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        let stored = store.get_submission(draft.id).await.unwrap();
        assert_eq!(stored.status, SubmissionStatus::Submitted);

        let missing = Submission::new(a.id, "eng_001".into(), 2);
        assert!(matches!(
            store.update_draft(&missing).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_graded_submission_round_trip() {
        let store = MemoryStore::new();
        let a = assignment("eng_001");
        let mut sub = Submission::new(a.id, "eng_001".into(), 2);
        sub.status = SubmissionStatus::Graded;
        sub.score = Some(91.0);
        sub.feedback = Some("Clear via budget reasoning".into());
        store.put_submission(&sub).await.unwrap();

        let stored = store.get_submission(sub.id).await.unwrap();
        assert_eq!(stored.score, Some(91.0));
        assert_eq!(stored.feedback.as_deref(), Some("Clear via budget reasoning"));
        assert_eq!(stored, sub);
    }

    #[tokio::test]
    async fn test_list_submissions_filters_by_status() {
        let store = MemoryStore::new();
        let a = assignment("eng_001");

        let mut older = Submission::new(a.id, "eng_001".into(), 2);
        older.created_at = Utc::now() - Duration::minutes(5);
        let mut submitted = Submission::new(a.id, "eng_002".into(), 2);
        submitted.status = SubmissionStatus::Submitted;

        store.put_submission(&submitted).await.unwrap();
        store.put_submission(&older).await.unwrap();

        let all = store.list_submissions(None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, older.id);

        let only_submitted = store
            .list_submissions(Some(SubmissionStatus::Submitted))
            .await
            .unwrap();
        assert_eq!(only_submitted.len(), 1);
        assert_eq!(only_submitted[0].id, submitted.id);
    }

    #[tokio::test]
    async fn test_engineer_difficulty_defaults_then_persists() {
        let store = MemoryStore::new();
        assert_eq!(store.engineer_difficulty("eng_new").await.unwrap(), 1);

        store.set_engineer_difficulty("eng_senior", 4).await;
        assert_eq!(store.engineer_difficulty("eng_senior").await.unwrap(), 4);
    }
}

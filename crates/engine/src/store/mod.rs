//! Persistence for assignments, submissions and engineer progress.
//!
//! The scoring core never touches storage directly; callers go through the
//! object-safe [`Repository`] trait so the backend can be swapped at startup.

mod assignments;
mod memory;
mod submissions;

use std::future::Future;
use std::pin::Pin;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use pdassign_common::ids::{AssignmentId, SubmissionId};
use pdassign_common::types::{Assignment, Submission, SubmissionStatus};

pub use memory::MemoryStore;

/// Difficulty assigned to an engineer on first lookup.
pub const DEFAULT_DIFFICULTY: u8 = 1;

/// Boxed future returned by repository operations (object safe for `dyn Repository`).
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Storage interface for the assignment system. Writes are last-writer-wins.
pub trait Repository: Send + Sync {
    /// Insert or replace an assignment.
    fn put_assignment<'a>(&'a self, assignment: &'a Assignment) -> StoreFuture<'a, ()>;

    fn get_assignment(&self, id: AssignmentId) -> StoreFuture<'_, Assignment>;

    /// All assignments, oldest first.
    fn list_assignments(&self) -> StoreFuture<'_, Vec<Assignment>>;

    /// Insert or replace a submission.
    fn put_submission<'a>(&'a self, submission: &'a Submission) -> StoreFuture<'a, ()>;

    /// Replace a submission only while the stored record is still a draft.
    /// Fails with [`StoreError::Conflict`] once it has left Draft.
    fn update_draft<'a>(&'a self, submission: &'a Submission) -> StoreFuture<'a, ()>;

    fn get_submission(&self, id: SubmissionId) -> StoreFuture<'_, Submission>;

    /// Submissions, oldest first, optionally restricted to one status.
    fn list_submissions(&self, status: Option<SubmissionStatus>)
        -> StoreFuture<'_, Vec<Submission>>;

    /// Current difficulty for an engineer, initializing it on first lookup.
    fn engineer_difficulty<'a>(&'a self, engineer_id: &'a str) -> StoreFuture<'a, u8>;

    fn health_check(&self) -> StoreFuture<'_, ()>;
}

/// PostgreSQL-backed repository.
pub struct StoreClient {
    pool: PgPool,
}

impl StoreClient {
    /// Connect to PostgreSQL and return a client with a connection pool.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let client = Self { pool };
        client.ping().await?;
        tracing::info!("PostgreSQL connection established");

        Ok(client)
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        tracing::info!("Running PostgreSQL migrations");

        sqlx::migrate!("src/store/migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        tracing::info!("PostgreSQL migrations complete");
        Ok(())
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(())
    }
}

impl Repository for StoreClient {
    fn put_assignment<'a>(&'a self, assignment: &'a Assignment) -> StoreFuture<'a, ()> {
        Box::pin(self.upsert_assignment(assignment))
    }

    fn get_assignment(&self, id: AssignmentId) -> StoreFuture<'_, Assignment> {
        Box::pin(self.fetch_assignment(id))
    }

    fn list_assignments(&self) -> StoreFuture<'_, Vec<Assignment>> {
        Box::pin(self.fetch_all_assignments())
    }

    fn put_submission<'a>(&'a self, submission: &'a Submission) -> StoreFuture<'a, ()> {
        Box::pin(self.upsert_submission(submission))
    }

    fn update_draft<'a>(&'a self, submission: &'a Submission) -> StoreFuture<'a, ()> {
        Box::pin(self.update_draft_submission(submission))
    }

    fn get_submission(&self, id: SubmissionId) -> StoreFuture<'_, Submission> {
        Box::pin(self.fetch_submission(id))
    }

    fn list_submissions(
        &self,
        status: Option<SubmissionStatus>,
    ) -> StoreFuture<'_, Vec<Submission>> {
        Box::pin(self.fetch_submissions(status))
    }

    fn engineer_difficulty<'a>(&'a self, engineer_id: &'a str) -> StoreFuture<'a, u8> {
        Box::pin(self.fetch_or_init_difficulty(engineer_id))
    }

    fn health_check(&self) -> StoreFuture<'_, ()> {
        Box::pin(self.ping())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("PostgreSQL connection error: {0}")]
    Connection(String),

    #[error("PostgreSQL query error: {0}")]
    Query(String),

    #[error("PostgreSQL migration error: {0}")]
    Migration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<StoreError> for pdassign_common::PdAssignError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(what) => pdassign_common::PdAssignError::NotFound(what),
            StoreError::Conflict(what) => pdassign_common::PdAssignError::InvalidState(what),
            other => pdassign_common::PdAssignError::Postgres(other.to_string()),
        }
    }
}

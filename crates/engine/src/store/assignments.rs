use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use pdassign_common::ids::AssignmentId;
use pdassign_common::types::Assignment;

use super::{StoreClient, StoreError, DEFAULT_DIFFICULTY};

impl StoreClient {
    /// Insert an assignment, replacing any existing row with the same id.
    pub(super) async fn upsert_assignment(&self, a: &Assignment) -> Result<(), StoreError> {
        let questions_json = serde_json::to_value(&a.questions).unwrap_or_default();
        let deliverables_json = serde_json::to_value(&a.deliverables).unwrap_or_default();

        sqlx::query(
            r#"
            INSERT INTO assignments (id, code, title, topic, difficulty, questions,
                                     deliverables, due_date, points, engineer_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE
            SET code = EXCLUDED.code,
                title = EXCLUDED.title,
                topic = EXCLUDED.topic,
                difficulty = EXCLUDED.difficulty,
                questions = EXCLUDED.questions,
                deliverables = EXCLUDED.deliverables,
                due_date = EXCLUDED.due_date,
                points = EXCLUDED.points,
                engineer_id = EXCLUDED.engineer_id
            "#,
        )
        .bind(a.id.0)
        .bind(&a.code)
        .bind(&a.title)
        .bind(&a.topic)
        .bind(i16::from(a.difficulty))
        .bind(&questions_json)
        .bind(&deliverables_json)
        .bind(a.due_date)
        .bind(i32::try_from(a.points).unwrap_or(i32::MAX))
        .bind(&a.engineer_id)
        .bind(a.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }

    pub(super) async fn fetch_assignment(&self, id: AssignmentId) -> Result<Assignment, StoreError> {
        let row = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT id, code, title, topic, difficulty, questions, deliverables,
                   due_date, points, engineer_id, created_at
            FROM assignments
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?
        .ok_or_else(|| StoreError::NotFound(format!("Assignment {}", id)))?;

        Ok(row.into())
    }

    pub(super) async fn fetch_all_assignments(&self) -> Result<Vec<Assignment>, StoreError> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT id, code, title, topic, difficulty, questions, deliverables,
                   due_date, points, engineer_id, created_at
            FROM assignments
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Current difficulty for an engineer; creates the progress row on first lookup.
    pub(super) async fn fetch_or_init_difficulty(&self, engineer_id: &str) -> Result<u8, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO engineer_progress (engineer_id, current_difficulty)
            VALUES ($1, $2)
            ON CONFLICT (engineer_id) DO NOTHING
            "#,
        )
        .bind(engineer_id)
        .bind(i16::from(DEFAULT_DIFFICULTY))
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        let row: (i16,) = sqlx::query_as(
            "SELECT current_difficulty FROM engineer_progress WHERE engineer_id = $1",
        )
        .bind(engineer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(u8::try_from(row.0).unwrap_or(DEFAULT_DIFFICULTY))
    }
}

/// Internal row type for sqlx deserialization.
#[derive(sqlx::FromRow)]
struct AssignmentRow {
    id: Uuid,
    code: String,
    title: String,
    topic: String,
    difficulty: i16,
    questions: serde_json::Value,
    deliverables: serde_json::Value,
    due_date: NaiveDate,
    points: i32,
    engineer_id: String,
    created_at: DateTime<Utc>,
}

impl From<AssignmentRow> for Assignment {
    fn from(row: AssignmentRow) -> Self {
        Self {
            id: AssignmentId::from_uuid(row.id),
            code: row.code,
            title: row.title,
            topic: row.topic,
            difficulty: u8::try_from(row.difficulty).unwrap_or(DEFAULT_DIFFICULTY),
            questions: serde_json::from_value(row.questions).unwrap_or_default(),
            deliverables: serde_json::from_value(row.deliverables).unwrap_or_default(),
            due_date: row.due_date,
            points: u32::try_from(row.points).unwrap_or(0),
            engineer_id: row.engineer_id,
            created_at: row.created_at,
        }
    }
}

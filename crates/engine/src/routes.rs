//! HTTP surface. Handlers are thin: parse, call into the generator or the
//! submission manager, map errors to status codes.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;

use pdassign_common::api::assignments::{
    BulkGenerateRequest, BulkGenerateResponse, BulkGenerateResult, GenerateAssignmentResponse,
};
use pdassign_common::api::submissions::{
    AnalyzeRequest, AnalyzeResponse, AutosaveRequest, AutosaveResponse, CreateSubmissionRequest,
    CreateSubmissionResponse, SubmissionListQuery, SubmitRequest, SubmitResponse,
};
use pdassign_common::ids::{AssignmentId, SubmissionId};
use pdassign_common::types::{Assignment, Submission};
use pdassign_common::PdAssignError;

use crate::generator::AssignmentGenerator;
use crate::store::Repository;
use crate::submission::{SubmissionManager, SubmitOutcome};

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

/// Shared application state accessible from axum handlers.
pub struct AppState {
    pub store: Arc<dyn Repository>,
    pub generator: AssignmentGenerator,
    pub submissions: SubmissionManager,
    pub metrics_handle: PrometheusHandle,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/generate/{engineer_id}", get(generate_handler))
        .route("/api/bulk_generate", post(bulk_generate_handler))
        .route("/api/assignments", get(list_assignments_handler))
        .route("/api/assignments/{id}", get(get_assignment_handler))
        .route(
            "/api/submissions",
            get(list_submissions_handler).post(create_submission_handler),
        )
        .route("/api/submissions/{id}", get(get_submission_handler))
        .route("/api/submissions/{id}/autosave", post(autosave_handler))
        .route("/api/submissions/{id}/submit", post(submit_handler))
        .route("/api/analyze", post(analyze_handler))
        .with_state(state)
}

fn error_response(e: PdAssignError) -> (StatusCode, String) {
    let status = match &e {
        PdAssignError::NotFound(_) => StatusCode::NOT_FOUND,
        PdAssignError::Validation(_) => StatusCode::BAD_REQUEST,
        PdAssignError::InvalidState(_) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if !e.is_client_error() {
        tracing::error!(error = %e, "Request failed");
    }
    (status, e.to_string())
}

/// Health check endpoint. Reports store connectivity and record counts.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store_ok = state.store.health_check().await.is_ok();

    let (assignments, submissions) = if store_ok {
        let assignments = state.store.list_assignments().await.map(|a| a.len()).ok();
        let submissions = state
            .store
            .list_submissions(None)
            .await
            .map(|s| s.len())
            .ok();
        (assignments, submissions)
    } else {
        (None, None)
    };

    let status = if store_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = serde_json::json!({
        "status": if store_ok { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "assignments": assignments,
        "submissions": submissions,
        "timestamp": Utc::now(),
    });

    (status, Json(body))
}

/// Prometheus metrics endpoint.
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> String {
    state.metrics_handle.render()
}

/// GET /api/generate/{engineer_id}
pub async fn generate_handler(
    State(state): State<Arc<AppState>>,
    Path(engineer_id): Path<String>,
) -> ApiResult<GenerateAssignmentResponse> {
    let assignment = state
        .generator
        .generate_for(state.store.as_ref(), &engineer_id)
        .await
        .map_err(error_response)?;

    Ok(Json(GenerateAssignmentResponse::from(&assignment)))
}

/// POST /api/bulk_generate. A failure for one engineer does not stop the others.
pub async fn bulk_generate_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BulkGenerateRequest>,
) -> ApiResult<BulkGenerateResponse> {
    if request.engineer_ids.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "engineer_ids must not be empty".into(),
        ));
    }

    let mut results = Vec::with_capacity(request.engineer_ids.len());
    for engineer_id in request.engineer_ids {
        let result = match state
            .generator
            .generate_for(state.store.as_ref(), &engineer_id)
            .await
        {
            Ok(assignment) => BulkGenerateResult {
                engineer_id,
                success: true,
                assignment_id: Some(assignment.id),
                error: None,
            },
            Err(e) => {
                tracing::warn!(engineer_id = %engineer_id, error = %e, "Bulk generation failed");
                BulkGenerateResult {
                    engineer_id,
                    success: false,
                    assignment_id: None,
                    error: Some(e.to_string()),
                }
            }
        };
        results.push(result);
    }

    Ok(Json(BulkGenerateResponse {
        success: true,
        results,
    }))
}

/// GET /api/assignments
pub async fn list_assignments_handler(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Vec<Assignment>> {
    let assignments = state
        .store
        .list_assignments()
        .await
        .map_err(|e| error_response(e.into()))?;
    Ok(Json(assignments))
}

/// GET /api/assignments/{id}
pub async fn get_assignment_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<AssignmentId>,
) -> ApiResult<Assignment> {
    let assignment = state
        .store
        .get_assignment(id)
        .await
        .map_err(|e| error_response(e.into()))?;
    Ok(Json(assignment))
}

/// POST /api/submissions
pub async fn create_submission_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateSubmissionRequest>,
) -> ApiResult<CreateSubmissionResponse> {
    let submission = state
        .submissions
        .create_submission(request.assignment_id, &request.engineer_id)
        .await
        .map_err(error_response)?;

    Ok(Json(CreateSubmissionResponse {
        success: true,
        submission_id: submission.id,
        message: "Submission created".into(),
    }))
}

/// GET /api/submissions?status=...
pub async fn list_submissions_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SubmissionListQuery>,
) -> ApiResult<Vec<Submission>> {
    let submissions = state
        .submissions
        .list(query.status)
        .await
        .map_err(error_response)?;
    Ok(Json(submissions))
}

/// GET /api/submissions/{id}
pub async fn get_submission_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SubmissionId>,
) -> ApiResult<Submission> {
    let submission = state.submissions.get(id).await.map_err(error_response)?;
    Ok(Json(submission))
}

/// POST /api/submissions/{id}/autosave
pub async fn autosave_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SubmissionId>,
    Json(request): Json<AutosaveRequest>,
) -> ApiResult<AutosaveResponse> {
    let submission = state
        .submissions
        .autosave(id, request.answers, request.time_spent)
        .await
        .map_err(error_response)?;

    Ok(Json(AutosaveResponse {
        success: true,
        version: submission.version,
        saved_at: submission.last_modified,
        validation: submission.validation_report(),
        metrics: submission.metrics,
    }))
}

/// POST /api/submissions/{id}/submit
///
/// A validation rejection is a normal response with `success: false`.
pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SubmissionId>,
    Json(request): Json<SubmitRequest>,
) -> ApiResult<SubmitResponse> {
    let outcome = state
        .submissions
        .submit(id, request.answers)
        .await
        .map_err(error_response)?;

    let response = match outcome {
        SubmitOutcome::Accepted {
            submission,
            message,
        } => SubmitResponse {
            success: true,
            status: submission.status,
            message,
            validation: submission.validation_report(),
            metrics: submission.metrics,
        },
        SubmitOutcome::Rejected { submission, report } => SubmitResponse {
            success: false,
            status: submission.status,
            message: format!(
                "Submission has {} blocking issue(s); fix them and submit again",
                report.issues.len()
            ),
            metrics: submission.metrics,
            validation: report,
        },
    };

    Ok(Json(response))
}

/// POST /api/analyze. Stateless scoring for live feedback.
pub async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<AnalyzeResponse> {
    let evaluation = state
        .submissions
        .analyze(&request.answers, request.topic.as_deref());

    Ok(Json(AnalyzeResponse {
        analyses: evaluation.analyses,
        metrics: evaluation.metrics,
        validation: evaluation.report,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (PdAssignError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (PdAssignError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (PdAssignError::InvalidState("x".into()), StatusCode::CONFLICT),
            (
                PdAssignError::Postgres("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(error_response(err).0, expected);
        }
    }
}

//! HTTP handlers for the admin surface.
//!
//! Every route uses the `RequireAdmin` extractor; a plain student token
//! gets 403 before any handler logic runs.

use axum::extract::{Json, Path, Query, State};
use axum::response::IntoResponse;

use crate::application::handlers::admin::ReviewSubmissionCommand;
use crate::domain::enrollment::EnrollmentError;
use crate::domain::foundation::{CourseId, EnrollmentId, MilestoneId};

use super::super::enrollment::dto::{EnrollmentViewResponse, SubmissionResponse};
use super::super::error::ApiError;
use super::super::middleware::RequireAdmin;
use super::super::AppState;
use super::dto::{
    parse_status_filter, ReviewQueueEntryResponse, ReviewQueueParams, ReviewQueueResponse,
    ReviewRequest, StatsResponse,
};

/// GET /api/admin/review-queue - Submissions awaiting review
pub async fn list_review_queue(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ReviewQueueParams>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = parse_status_filter(params.status.as_deref())?;
    let entries = state.review_queue_handler().handle(filter).await?;

    Ok(Json(ReviewQueueResponse {
        entries: entries
            .into_iter()
            .map(ReviewQueueEntryResponse::from)
            .collect(),
    }))
}

/// POST /api/admin/enrollments/{enrollment_id}/milestones/{milestone_id}/review
pub async fn review_submission(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path((enrollment_id, milestone_id)): Path<(EnrollmentId, String)>,
    Json(request): Json<ReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let milestone_id = MilestoneId::new(milestone_id)
        .map_err(|_| EnrollmentError::validation("milestone_id", "cannot be empty"))?;

    tracing::info!(
        admin_id = %admin.id,
        enrollment_id = %enrollment_id,
        "Admin review requested"
    );

    let reviewed = state
        .review_submission_handler()
        .handle(ReviewSubmissionCommand {
            enrollment_id,
            milestone_id,
            decision: request.decision,
            score: request.score,
            feedback: request.feedback,
        })
        .await?;

    Ok(Json(SubmissionResponse::from(&reviewed)))
}

/// GET /api/admin/courses/{course_id}/roster - Everyone on a course
pub async fn get_course_roster(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(course_id): Path<CourseId>,
) -> Result<impl IntoResponse, ApiError> {
    let roster = state.course_roster_handler().handle(&course_id).await?;

    Ok(Json(
        roster
            .into_iter()
            .map(EnrollmentViewResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/admin/stats - Dashboard aggregates
pub async fn get_enrollment_stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state.enrollment_stats_handler().handle().await?;

    Ok(Json(StatsResponse::from(stats)))
}

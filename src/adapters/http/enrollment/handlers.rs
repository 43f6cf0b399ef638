//! HTTP handlers for student-facing enrollment endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers. The authenticated caller's id always comes from the token,
//! never from the request body, so a student cannot act on another
//! student's record.

use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;

use crate::application::handlers::enrollment::{
    MarkUnitCompleteCommand, SubmitAssignmentCommand, SubmitQuizCommand,
};
use crate::domain::enrollment::EnrollmentError;
use crate::domain::foundation::{CourseId, MilestoneId, UnitId};

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::AppState;
use super::dto::{
    AccessCheckResponse, EnrollmentDetailsResponse, EnrollmentListResponse,
    EnrollmentViewResponse, ProgressResponse, QuizGradeResponse, SubmitAssignmentRequest,
    SubmitQuizRequest,
};

/// GET /api/enrollments - List the caller's live enrollments
pub async fn list_my_enrollments(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let views = state.list_enrollments_handler().handle(&user.id).await?;

    Ok(Json(EnrollmentListResponse {
        enrollments: views.into_iter().map(EnrollmentViewResponse::from).collect(),
    }))
}

/// GET /api/enrollments/{course_id} - Full record for one course
pub async fn get_enrollment_details(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(course_id): Path<CourseId>,
) -> Result<impl IntoResponse, ApiError> {
    let enrollment = state
        .enrollment_details_handler()
        .handle(&user.id, &course_id)
        .await?;

    Ok(Json(EnrollmentDetailsResponse::from(enrollment)))
}

/// GET /api/enrollments/{course_id}/access - Course content gate
pub async fn check_access(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(course_id): Path<CourseId>,
) -> Result<impl IntoResponse, ApiError> {
    let access = state
        .check_enrollment_handler()
        .handle(&user.id, &course_id)
        .await?;

    Ok(Json(AccessCheckResponse {
        enrolled: access.enrolled,
    }))
}

/// POST /api/enrollments/{course_id}/units/{unit_id}/complete
pub async fn complete_unit(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((course_id, unit_id)): Path<(CourseId, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let unit_id = UnitId::new(unit_id)
        .map_err(|_| EnrollmentError::validation("unit_id", "cannot be empty"))?;

    let result = state
        .mark_unit_complete_handler()
        .handle(MarkUnitCompleteCommand {
            student_id: user.id,
            course_id,
            unit_id,
        })
        .await?;

    Ok(Json(ProgressResponse {
        progress: result.enrollment.progress.value(),
        status: result.enrollment.status,
        newly_completed: result.newly_completed,
    }))
}

/// POST /api/enrollments/{course_id}/units/{unit_id}/quiz
pub async fn submit_quiz(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((course_id, unit_id)): Path<(CourseId, String)>,
    Json(request): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let unit_id = UnitId::new(unit_id)
        .map_err(|_| EnrollmentError::validation("unit_id", "cannot be empty"))?;

    let result = state
        .submit_quiz_handler()
        .handle(SubmitQuizCommand {
            student_id: user.id,
            course_id,
            unit_id,
            answers: request.answers,
        })
        .await?;

    Ok(Json(QuizGradeResponse::from_grade(
        result.grade,
        result.attempt_count,
    )))
}

/// POST /api/enrollments/{course_id}/milestones/{milestone_id}/assignment
pub async fn submit_assignment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((course_id, milestone_id)): Path<(CourseId, String)>,
    Json(request): Json<SubmitAssignmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let milestone_id = MilestoneId::new(milestone_id)
        .map_err(|_| EnrollmentError::validation("milestone_id", "cannot be empty"))?;

    let submission = state
        .submit_assignment_handler()
        .handle(SubmitAssignmentCommand {
            student_id: user.id,
            course_id,
            milestone_id,
            submission_url: request.submission_url,
        })
        .await?;

    Ok(Json(super::dto::SubmissionResponse::from(&submission)))
}

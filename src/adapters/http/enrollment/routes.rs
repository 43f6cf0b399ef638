//! Axum router configuration for student-facing enrollment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::AppState;
use super::handlers::{
    check_access, complete_unit, get_enrollment_details, list_my_enrollments, submit_assignment,
    submit_quiz,
};

/// Create the enrollment API router.
///
/// # Routes (all require authentication)
/// - `GET /` - List the caller's live enrollments
/// - `GET /:course_id` - Full enrollment record for a course
/// - `GET /:course_id/access` - Check course content access
/// - `POST /:course_id/units/:unit_id/complete` - Mark a unit complete
/// - `POST /:course_id/units/:unit_id/quiz` - Grade a quiz attempt
/// - `POST /:course_id/milestones/:milestone_id/assignment` - Submit work
pub fn enrollment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_my_enrollments))
        .route("/:course_id", get(get_enrollment_details))
        .route("/:course_id/access", get(check_access))
        .route("/:course_id/units/:unit_id/complete", post(complete_unit))
        .route("/:course_id/units/:unit_id/quiz", post(submit_quiz))
        .route(
            "/:course_id/milestones/:milestone_id/assignment",
            post(submit_assignment),
        )
}

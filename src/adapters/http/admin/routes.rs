//! Axum router configuration for the admin surface.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::AppState;
use super::handlers::{
    get_course_roster, get_enrollment_stats, list_review_queue, review_submission,
};

/// Create the admin API router.
///
/// # Routes (all require the admin role)
/// - `GET /review-queue` - Submissions awaiting review
/// - `POST /enrollments/:enrollment_id/milestones/:milestone_id/review` - Apply a decision
/// - `GET /courses/:course_id/roster` - Everyone on a course
/// - `GET /stats` - Dashboard aggregates
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/review-queue", get(list_review_queue))
        .route(
            "/enrollments/:enrollment_id/milestones/:milestone_id/review",
            post(review_submission),
        )
        .route("/courses/:course_id/roster", get(get_course_roster))
        .route("/stats", get(get_enrollment_stats))
}

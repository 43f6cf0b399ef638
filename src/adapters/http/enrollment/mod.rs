//! HTTP adapter for student-facing enrollment endpoints.
//!
//! - `GET /api/enrollments` - List the caller's enrollments
//! - `GET /api/enrollments/{course_id}` - Full enrollment record
//! - `GET /api/enrollments/{course_id}/access` - Course access gate
//! - `POST /api/enrollments/{course_id}/units/{unit_id}/complete` - Progress
//! - `POST /api/enrollments/{course_id}/units/{unit_id}/quiz` - Quiz grading
//! - `POST /api/enrollments/{course_id}/milestones/{milestone_id}/assignment` - Submission

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::enrollment_routes;

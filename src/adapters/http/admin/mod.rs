//! HTTP adapter for the admin surface.
//!
//! - `GET /api/admin/review-queue` - Submissions awaiting review
//! - `POST /api/admin/enrollments/{id}/milestones/{id}/review` - Apply a decision
//! - `GET /api/admin/courses/{course_id}/roster` - Course roster
//! - `GET /api/admin/stats` - Dashboard aggregates

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::admin_routes;

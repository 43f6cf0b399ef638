//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the LearnTrack domain.

mod auth;
mod errors;
mod ids;
mod percentage;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, UserRole};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CourseId, EnrollmentId, MilestoneId, StudentId, UnitId};
pub use percentage::Percentage;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;

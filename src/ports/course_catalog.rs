//! Course catalog port.
//!
//! Read-only access to course definitions. Enrollment treats the
//! catalog as reference data: it is consulted for pricing, unit counts,
//! quizzes and milestone assignments, never written through this port.

use crate::domain::catalog::Course;
use crate::domain::foundation::{CourseId, DomainError};
use async_trait::async_trait;

/// Port for looking up course definitions.
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    /// Fetch a course by id. Returns `None` when the course does not
    /// exist.
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError>;

    /// All courses, for roster and dashboard title resolution.
    async fn list_all(&self) -> Result<Vec<Course>, DomainError>;
}

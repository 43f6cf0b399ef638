//! Enrollment repository port (write side).
//!
//! Defines the contract for persisting and retrieving Enrollment
//! aggregates. Implementations handle the actual database operations.
//!
//! # Design
//!
//! - **Write-focused**: Optimized for aggregate persistence
//! - **Unique constraint**: One enrollment per (student, course) pair
//! - **Atomic confirmation**: `complete_payment` is a single conditional
//!   update so concurrent confirmations cannot double-apply

use crate::domain::enrollment::Enrollment;
use crate::domain::foundation::{CourseId, DomainError, EnrollmentId, StudentId};
use async_trait::async_trait;

/// Outcome of the idempotent payment confirmation.
#[derive(Debug, Clone)]
pub enum PaymentTransition {
    /// This caller applied the pending -> completed transition.
    Applied(Enrollment),

    /// Another caller already applied it; the enrollment is returned
    /// unchanged.
    AlreadyApplied(Enrollment),
}

impl PaymentTransition {
    /// The enrollment after confirmation, regardless of who applied it.
    pub fn into_enrollment(self) -> Enrollment {
        match self {
            PaymentTransition::Applied(e) | PaymentTransition::AlreadyApplied(e) => e,
        }
    }

    /// Returns true when this caller performed the transition.
    pub fn was_applied(&self) -> bool {
        matches!(self, PaymentTransition::Applied(_))
    }
}

/// Repository port for Enrollment aggregate persistence.
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Save a new enrollment.
    ///
    /// # Errors
    ///
    /// - `AlreadyEnrolled` if the (student, course) pair already exists
    /// - `DatabaseError` on persistence failure
    async fn save(&self, enrollment: &Enrollment) -> Result<(), DomainError>;

    /// Update an existing enrollment.
    ///
    /// # Errors
    ///
    /// - `EnrollmentNotFound` if the enrollment doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, enrollment: &Enrollment) -> Result<(), DomainError>;

    /// Find an enrollment by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &EnrollmentId) -> Result<Option<Enrollment>, DomainError>;

    /// Find the enrollment for a (student, course) pair.
    ///
    /// This is the primary lookup method since the pair is unique.
    async fn find_by_student_and_course(
        &self,
        student: &StudentId,
        course: &CourseId,
    ) -> Result<Option<Enrollment>, DomainError>;

    /// Find an enrollment by its checkout session id.
    async fn find_by_payment_id(
        &self,
        payment_id: &str,
    ) -> Result<Option<Enrollment>, DomainError>;

    /// Atomically apply the pending -> completed payment transition for
    /// the enrollment carrying this checkout session id.
    ///
    /// Implemented as one conditional store update: under concurrent
    /// confirmation attempts, exactly one caller observes `Applied` and
    /// every other caller observes `AlreadyApplied`. `payment_id` and
    /// the captured amount are never touched by a losing caller.
    ///
    /// Returns `None` when no enrollment carries this session id.
    async fn complete_payment(
        &self,
        payment_id: &str,
    ) -> Result<Option<PaymentTransition>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn enrollment_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn EnrollmentRepository) {}
    }
}

//! InitiateCheckoutHandler - enrollment creation and checkout initiation.
//!
//! Free courses enroll the student directly; paid courses create (or
//! reuse) a pending enrollment bound to a fresh provider checkout
//! session. Retrying checkout before settlement never creates a second
//! record, only replaces the open session id.

use std::sync::Arc;

use crate::domain::enrollment::{Enrollment, EnrollmentError, PaymentStatus};
use crate::domain::foundation::{CourseId, ErrorCode, StudentId};
use crate::ports::{
    CheckoutSession, CourseCatalog, CreateCheckoutRequest, EnrollmentRepository, PaymentProvider,
};

/// Command to enroll in a course, paying if it has a price.
#[derive(Debug, Clone)]
pub struct InitiateCheckoutCommand {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub success_url: String,
    pub cancel_url: String,
}

/// Result of checkout initiation.
#[derive(Debug, Clone)]
pub enum InitiateCheckoutResult {
    /// Free course: the enrollment is live immediately.
    Enrolled(Enrollment),

    /// Paid course: the student must complete the hosted checkout.
    CheckoutRequired {
        enrollment: Enrollment,
        checkout: CheckoutSession,
    },
}

/// Handler for enrolling a student in a course.
pub struct InitiateCheckoutHandler {
    repository: Arc<dyn EnrollmentRepository>,
    catalog: Arc<dyn CourseCatalog>,
    payment_provider: Arc<dyn PaymentProvider>,
}

impl InitiateCheckoutHandler {
    pub fn new(
        repository: Arc<dyn EnrollmentRepository>,
        catalog: Arc<dyn CourseCatalog>,
        payment_provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            repository,
            catalog,
            payment_provider,
        }
    }

    pub async fn handle(
        &self,
        cmd: InitiateCheckoutCommand,
    ) -> Result<InitiateCheckoutResult, EnrollmentError> {
        // 1. The course must exist
        let course = self
            .catalog
            .find_by_id(&cmd.course_id)
            .await?
            .ok_or_else(|| EnrollmentError::course_not_found(cmd.course_id))?;

        // 2. Check the existing enrollment for this pair
        let existing = self
            .repository
            .find_by_student_and_course(&cmd.student_id, &cmd.course_id)
            .await?;

        if let Some(existing) = &existing {
            if existing.payment_status != PaymentStatus::Pending {
                return Err(EnrollmentError::already_enrolled(
                    cmd.student_id,
                    cmd.course_id,
                ));
            }
        }

        // 3. Free course: enroll directly, no provider round-trip
        if course.is_free() {
            let enrollment = Enrollment::enroll_free(cmd.student_id.clone(), cmd.course_id);
            self.save_new(&enrollment).await?;
            tracing::info!(
                enrollment_id = %enrollment.id,
                course_id = %cmd.course_id,
                "Free course enrollment created"
            );
            return Ok(InitiateCheckoutResult::Enrolled(enrollment));
        }

        // 4. Paid course: reuse the pending record or create one, then
        //    bind it to a fresh checkout session
        match existing {
            Some(mut enrollment) => {
                let checkout = self
                    .create_session(&cmd, &course.title, enrollment.amount_paid_cents, enrollment.id)
                    .await?;
                enrollment.reissue_checkout_session(&checkout.id)?;
                self.repository.update(&enrollment).await?;

                tracing::info!(
                    enrollment_id = %enrollment.id,
                    session_id = %checkout.id,
                    "Reissued checkout session on pending enrollment"
                );
                Ok(InitiateCheckoutResult::CheckoutRequired {
                    enrollment,
                    checkout,
                })
            }
            None => {
                // Session metadata needs the enrollment id, so the id is
                // fixed before the provider call and reused in the record.
                let enrollment_id = crate::domain::foundation::EnrollmentId::new();
                let checkout = self
                    .create_session(&cmd, &course.title, course.price_cents, enrollment_id)
                    .await?;

                let mut enrollment = Enrollment::pending_checkout(
                    cmd.student_id.clone(),
                    cmd.course_id,
                    checkout.id.clone(),
                    course.price_cents,
                );
                enrollment.id = enrollment_id;
                self.save_new(&enrollment).await?;

                tracing::info!(
                    enrollment_id = %enrollment.id,
                    session_id = %checkout.id,
                    "Pending enrollment created with checkout session"
                );
                Ok(InitiateCheckoutResult::CheckoutRequired {
                    enrollment,
                    checkout,
                })
            }
        }
    }

    async fn create_session(
        &self,
        cmd: &InitiateCheckoutCommand,
        course_title: &str,
        amount_cents: i64,
        enrollment_id: crate::domain::foundation::EnrollmentId,
    ) -> Result<CheckoutSession, EnrollmentError> {
        self.payment_provider
            .create_checkout_session(CreateCheckoutRequest {
                student_id: cmd.student_id.clone(),
                course_id: cmd.course_id,
                enrollment_id,
                course_title: course_title.to_string(),
                amount_cents,
                success_url: cmd.success_url.clone(),
                cancel_url: cmd.cancel_url.clone(),
            })
            .await
            .map_err(|e| EnrollmentError::payment_failed(e.message))
    }

    async fn save_new(&self, enrollment: &Enrollment) -> Result<(), EnrollmentError> {
        self.repository.save(enrollment).await.map_err(|e| {
            if e.code == ErrorCode::AlreadyEnrolled {
                EnrollmentError::already_enrolled(enrollment.student.clone(), enrollment.course)
            } else {
                e.into()
            }
        })
    }
}

//! Enrollment aggregate.
//!
//! The enrollment record is the single source of truth for one student's
//! relationship to one course: payment reconciliation state, completed
//! units and derived progress, the quiz attempt log, and assignment
//! submissions under review.
//!
//! # Invariants
//!
//! - `progress` is derived from `completed_units` against the catalog's
//!   unit count, never edited directly.
//! - `status` becomes `Completed` exactly when progress reaches 100 and
//!   never auto-reverses.
//! - Progress and assessment mutations require a completed payment;
//!   pending and refunded enrollments are visible but inert.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CourseId, EnrollmentId, MilestoneId, Percentage, StateMachine, StudentId, Timestamp, UnitId,
};

use super::assessment::{AssignmentSubmission, QuizAttempt, ReviewDecision};
use super::errors::EnrollmentError;
use super::payment_status::PaymentStatus;
use super::progress::compute_progress;
use super::status::EnrollmentStatus;

/// One student's enrollment in one course.
///
/// Unique per (student, course) pair; the pair is immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub student: StudentId,
    pub course: CourseId,

    /// Where the payment stands. Only `Completed` makes the record live.
    pub payment_status: PaymentStatus,

    /// Provider checkout session id; the reconciliation join key.
    /// At most one open session per enrollment.
    pub payment_id: Option<String>,

    /// Amount captured at checkout creation, in cents.
    pub amount_paid_cents: i64,

    /// Set of completed unit ids. Insertion is idempotent.
    pub completed_units: BTreeSet<UnitId>,

    /// Derived progress, 0-100.
    pub progress: Percentage,

    /// Append-only audit log of quiz attempts.
    pub quiz_attempts: Vec<QuizAttempt>,

    /// Assignment submissions, at most one per milestone.
    pub assignment_submissions: BTreeMap<MilestoneId, AssignmentSubmission>,

    pub status: EnrollmentStatus,
    pub enrolled_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Enrollment {
    /// Creates an enrollment for a free course: no checkout round-trip,
    /// payment counts as completed immediately.
    pub fn enroll_free(student: StudentId, course: CourseId) -> Self {
        let now = Timestamp::now();
        Self {
            id: EnrollmentId::new(),
            student,
            course,
            payment_status: PaymentStatus::Completed,
            payment_id: None,
            amount_paid_cents: 0,
            completed_units: BTreeSet::new(),
            progress: Percentage::ZERO,
            quiz_attempts: Vec::new(),
            assignment_submissions: BTreeMap::new(),
            status: EnrollmentStatus::Active,
            enrolled_at: now,
            updated_at: now,
        }
    }

    /// Creates a pending enrollment tied to a freshly issued checkout
    /// session. The record stays inert until the payment settles.
    pub fn pending_checkout(
        student: StudentId,
        course: CourseId,
        session_id: impl Into<String>,
        amount_cents: i64,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: EnrollmentId::new(),
            student,
            course,
            payment_status: PaymentStatus::Pending,
            payment_id: Some(session_id.into()),
            amount_paid_cents: amount_cents,
            completed_units: BTreeSet::new(),
            progress: Percentage::ZERO,
            quiz_attempts: Vec::new(),
            assignment_submissions: BTreeMap::new(),
            status: EnrollmentStatus::Active,
            enrolled_at: now,
            updated_at: now,
        }
    }

    /// Returns true if the payment settled and the record accepts
    /// progress and assessment mutations.
    pub fn is_live(&self) -> bool {
        self.payment_status.is_settled()
    }

    fn ensure_live(&self) -> Result<(), EnrollmentError> {
        if self.is_live() {
            Ok(())
        } else {
            Err(EnrollmentError::not_eligible(self.payment_status.as_str()))
        }
    }

    /// Marks a unit complete and recomputes progress against the given
    /// catalog unit count.
    ///
    /// Idempotent: returns `Ok(false)` without mutating anything when the
    /// unit was already recorded. Reaching 100% flips the enrollment
    /// status to `Completed`; the flip never reverses.
    pub fn mark_unit_complete(
        &mut self,
        unit_id: UnitId,
        total_units: usize,
    ) -> Result<bool, EnrollmentError> {
        self.ensure_live()?;

        if !self.completed_units.insert(unit_id) {
            return Ok(false);
        }

        self.progress = compute_progress(self.completed_units.len(), total_units);
        if self.progress.is_full() && self.status == EnrollmentStatus::Active {
            self.status = self
                .status
                .transition_to(EnrollmentStatus::Completed)
                .map_err(|_| {
                    EnrollmentError::invalid_state(self.status.as_str(), "complete")
                })?;
        }

        self.updated_at = Timestamp::now();
        Ok(true)
    }

    /// Appends a graded quiz attempt to the audit log.
    pub fn record_quiz_attempt(&mut self, attempt: QuizAttempt) -> Result<(), EnrollmentError> {
        self.ensure_live()?;
        self.quiz_attempts.push(attempt);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Submits (or resubmits) an assignment for a milestone.
    ///
    /// Upsert keyed by milestone: a resubmission replaces the URL and
    /// timestamp, resets the status to pending, and clears any earlier
    /// score and feedback.
    pub fn submit_assignment(
        &mut self,
        milestone_id: MilestoneId,
        submission_url: impl Into<String>,
    ) -> Result<(), EnrollmentError> {
        self.ensure_live()?;

        let submission_url = submission_url.into();
        if submission_url.trim().is_empty() {
            return Err(EnrollmentError::validation(
                "submission_url",
                "cannot be empty",
            ));
        }

        let now = Timestamp::now();
        self.assignment_submissions
            .insert(milestone_id, AssignmentSubmission::new(submission_url, now));
        self.updated_at = now;
        Ok(())
    }

    /// Applies an admin review decision to an existing submission.
    ///
    /// Never touches `completed_units` or `progress`; review and progress
    /// are independent tracks.
    pub fn review_submission(
        &mut self,
        milestone_id: &MilestoneId,
        decision: ReviewDecision,
        score: Option<u32>,
        feedback: Option<String>,
    ) -> Result<&AssignmentSubmission, EnrollmentError> {
        let submission = self
            .assignment_submissions
            .get_mut(milestone_id)
            .ok_or_else(|| EnrollmentError::submission_not_found(milestone_id.clone()))?;

        submission.apply_review(decision, score, feedback);
        self.updated_at = Timestamp::now();
        Ok(&self.assignment_submissions[milestone_id])
    }

    /// Applies the pending -> completed payment transition.
    ///
    /// Idempotent: returns `Ok(false)` when the payment is already
    /// completed, leaving `payment_id` and `amount_paid_cents` untouched.
    /// A refunded enrollment cannot be re-completed.
    pub fn confirm_payment(&mut self) -> Result<bool, EnrollmentError> {
        if self.payment_status == PaymentStatus::Completed {
            return Ok(false);
        }

        self.payment_status = self
            .payment_status
            .transition_to(PaymentStatus::Completed)
            .map_err(|_| {
                EnrollmentError::invalid_state(self.payment_status.as_str(), "confirm payment for")
            })?;

        self.updated_at = Timestamp::now();
        Ok(true)
    }

    /// Replaces the open checkout session on a still-pending enrollment.
    ///
    /// Used when a student retries checkout before the earlier session
    /// settles; only the session id changes.
    pub fn reissue_checkout_session(
        &mut self,
        session_id: impl Into<String>,
    ) -> Result<(), EnrollmentError> {
        if self.payment_status != PaymentStatus::Pending {
            return Err(EnrollmentError::invalid_state(
                self.payment_status.as_str(),
                "reissue a checkout session for",
            ));
        }

        self.payment_id = Some(session_id.into());
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

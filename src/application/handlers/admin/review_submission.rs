//! ReviewSubmissionHandler - admin review of assignment submissions.

use std::sync::Arc;

use crate::domain::enrollment::{AssignmentSubmission, EnrollmentError, ReviewDecision};
use crate::domain::foundation::{EnrollmentId, MilestoneId};
use crate::ports::EnrollmentRepository;

/// Command carrying an admin's decision on one submission.
#[derive(Debug, Clone)]
pub struct ReviewSubmissionCommand {
    pub enrollment_id: EnrollmentId,
    pub milestone_id: MilestoneId,
    /// One of `approved`, `rejected`, `reviewed`.
    pub decision: String,
    pub score: Option<u32>,
    pub feedback: Option<String>,
}

/// Handler applying review decisions. Review outcomes never feed
/// progress; the enrollment's `completed_units` and `progress` are
/// untouched whatever the decision.
pub struct ReviewSubmissionHandler {
    repository: Arc<dyn EnrollmentRepository>,
}

impl ReviewSubmissionHandler {
    pub fn new(repository: Arc<dyn EnrollmentRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: ReviewSubmissionCommand,
    ) -> Result<AssignmentSubmission, EnrollmentError> {
        // 1. The decision string is validated before any lookup
        let decision = ReviewDecision::parse(&cmd.decision)?;

        // 2. Load the enrollment holding the submission
        let mut enrollment = self
            .repository
            .find_by_id(&cmd.enrollment_id)
            .await?
            .ok_or(EnrollmentError::NotFound(cmd.enrollment_id))?;

        // 3. Apply and persist
        let reviewed = enrollment
            .review_submission(&cmd.milestone_id, decision, cmd.score, cmd.feedback)?
            .clone();
        self.repository.update(&enrollment).await?;

        tracing::info!(
            enrollment_id = %cmd.enrollment_id,
            milestone_id = %cmd.milestone_id,
            decision = %cmd.decision,
            "Submission reviewed"
        );

        Ok(reviewed)
    }
}

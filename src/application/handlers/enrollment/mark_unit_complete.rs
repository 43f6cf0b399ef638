//! MarkUnitCompleteHandler - progress tracking.
//!
//! The catalog is consulted before anything is mutated, so a failed
//! lookup leaves the enrollment untouched; the unit insertion and the
//! progress recompute are then applied together in one update.

use std::sync::Arc;

use crate::domain::catalog::CourseIndex;
use crate::domain::enrollment::{Enrollment, EnrollmentError};
use crate::domain::foundation::{CourseId, StudentId, UnitId};
use crate::ports::{CourseCatalog, EnrollmentRepository};

/// Command to mark one unit complete.
#[derive(Debug, Clone)]
pub struct MarkUnitCompleteCommand {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub unit_id: UnitId,
}

/// Result of marking a unit complete.
#[derive(Debug, Clone)]
pub struct MarkUnitCompleteResult {
    pub enrollment: Enrollment,
    /// False when the unit was already recorded (idempotent no-op).
    pub newly_completed: bool,
}

/// Handler for unit completion.
pub struct MarkUnitCompleteHandler {
    repository: Arc<dyn EnrollmentRepository>,
    catalog: Arc<dyn CourseCatalog>,
}

impl MarkUnitCompleteHandler {
    pub fn new(repository: Arc<dyn EnrollmentRepository>, catalog: Arc<dyn CourseCatalog>) -> Self {
        Self {
            repository,
            catalog,
        }
    }

    pub async fn handle(
        &self,
        cmd: MarkUnitCompleteCommand,
    ) -> Result<MarkUnitCompleteResult, EnrollmentError> {
        let course = self
            .catalog
            .find_by_id(&cmd.course_id)
            .await?
            .ok_or_else(|| EnrollmentError::course_not_found(cmd.course_id))?;
        let index = CourseIndex::build(&course);

        let mut enrollment = self
            .repository
            .find_by_student_and_course(&cmd.student_id, &cmd.course_id)
            .await?
            .ok_or_else(|| {
                EnrollmentError::not_found_for_course(cmd.student_id.clone(), cmd.course_id)
            })?;

        let newly_completed =
            enrollment.mark_unit_complete(cmd.unit_id.clone(), index.total_units())?;

        if newly_completed {
            self.repository.update(&enrollment).await?;
            tracing::info!(
                enrollment_id = %enrollment.id,
                unit_id = %cmd.unit_id,
                progress = %enrollment.progress,
                "Unit completed"
            );
        }

        Ok(MarkUnitCompleteResult {
            enrollment,
            newly_completed,
        })
    }
}

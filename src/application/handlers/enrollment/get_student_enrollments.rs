//! GetStudentEnrollmentsHandler - a student's own enrollment list.

use std::sync::Arc;

use crate::domain::enrollment::EnrollmentError;
use crate::domain::foundation::StudentId;
use crate::ports::{EnrollmentReader, EnrollmentView};

/// Handler returning the caller's live enrollments, newest first.
pub struct GetStudentEnrollmentsHandler {
    reader: Arc<dyn EnrollmentReader>,
}

impl GetStudentEnrollmentsHandler {
    pub fn new(reader: Arc<dyn EnrollmentReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<EnrollmentView>, EnrollmentError> {
        let views = self.reader.list_for_student(student_id).await?;
        tracing::debug!(
            student_id = %student_id,
            count = views.len(),
            "Listed student enrollments"
        );
        Ok(views)
    }
}

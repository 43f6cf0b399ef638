//! In-memory enrollment store.
//!
//! Implements both the write-side repository and the query-side reader
//! over one mutex-guarded map, which is what makes the conditional
//! payment transition atomic here: the whole read-check-write happens
//! under a single lock acquisition, mirroring the database's
//! conditional UPDATE.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::enrollment::{Enrollment, EnrollmentStatus, SubmissionStatus};
use crate::domain::foundation::{
    CourseId, DomainError, EnrollmentId, ErrorCode, StudentId, Timestamp,
};
use crate::ports::{
    DailyEnrollmentCount, EnrollmentReader, EnrollmentRepository, EnrollmentStats, EnrollmentView,
    PaymentTransition, ReviewQueueEntry,
};

use crate::ports::CourseCatalog;

use super::course_catalog::InMemoryCourseCatalog;

/// In-memory `EnrollmentRepository` + `EnrollmentReader` implementation.
#[derive(Default, Clone)]
pub struct InMemoryEnrollmentStore {
    enrollments: Arc<Mutex<HashMap<EnrollmentId, Enrollment>>>,
    /// Optional catalog for resolving course titles in views.
    catalog: Option<InMemoryCourseCatalog>,
}

impl InMemoryEnrollmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store that resolves course titles through the given catalog.
    pub fn with_catalog(catalog: InMemoryCourseCatalog) -> Self {
        Self {
            enrollments: Arc::new(Mutex::new(HashMap::new())),
            catalog: Some(catalog),
        }
    }

    /// Number of stored enrollments (test assertions).
    pub fn len(&self) -> usize {
        self.enrollments.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn title_of(&self, course: &CourseId) -> Option<String> {
        let catalog = self.catalog.as_ref()?;
        catalog
            .find_by_id(course)
            .await
            .ok()
            .flatten()
            .map(|c| c.title)
    }

    async fn view_of(&self, enrollment: &Enrollment) -> EnrollmentView {
        EnrollmentView {
            id: enrollment.id,
            student_id: enrollment.student.clone(),
            course_id: enrollment.course,
            course_title: self.title_of(&enrollment.course).await,
            payment_status: enrollment.payment_status,
            status: enrollment.status,
            progress: enrollment.progress,
            enrolled_at: enrollment.enrolled_at,
        }
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryEnrollmentStore {
    async fn save(&self, enrollment: &Enrollment) -> Result<(), DomainError> {
        let mut store = self.enrollments.lock().unwrap();

        let duplicate = store
            .values()
            .any(|e| e.student == enrollment.student && e.course == enrollment.course);
        if duplicate {
            return Err(DomainError::new(
                ErrorCode::AlreadyEnrolled,
                "Enrollment already exists for this student and course",
            ));
        }

        store.insert(enrollment.id, enrollment.clone());
        Ok(())
    }

    async fn update(&self, enrollment: &Enrollment) -> Result<(), DomainError> {
        let mut store = self.enrollments.lock().unwrap();
        if !store.contains_key(&enrollment.id) {
            return Err(DomainError::new(
                ErrorCode::EnrollmentNotFound,
                format!("Enrollment not found: {}", enrollment.id),
            ));
        }
        store.insert(enrollment.id, enrollment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &EnrollmentId) -> Result<Option<Enrollment>, DomainError> {
        Ok(self.enrollments.lock().unwrap().get(id).cloned())
    }

    async fn find_by_student_and_course(
        &self,
        student: &StudentId,
        course: &CourseId,
    ) -> Result<Option<Enrollment>, DomainError> {
        Ok(self
            .enrollments
            .lock()
            .unwrap()
            .values()
            .find(|e| &e.student == student && &e.course == course)
            .cloned())
    }

    async fn find_by_payment_id(
        &self,
        payment_id: &str,
    ) -> Result<Option<Enrollment>, DomainError> {
        Ok(self
            .enrollments
            .lock()
            .unwrap()
            .values()
            .find(|e| e.payment_id.as_deref() == Some(payment_id))
            .cloned())
    }

    async fn complete_payment(
        &self,
        payment_id: &str,
    ) -> Result<Option<PaymentTransition>, DomainError> {
        // Single lock acquisition covers the check and the write.
        let mut store = self.enrollments.lock().unwrap();

        let Some(enrollment) = store
            .values_mut()
            .find(|e| e.payment_id.as_deref() == Some(payment_id))
        else {
            return Ok(None);
        };

        let applied = enrollment.confirm_payment().map_err(DomainError::from)?;
        let snapshot = enrollment.clone();

        Ok(Some(if applied {
            PaymentTransition::Applied(snapshot)
        } else {
            PaymentTransition::AlreadyApplied(snapshot)
        }))
    }
}

#[async_trait]
impl EnrollmentReader for InMemoryEnrollmentStore {
    async fn list_for_student(
        &self,
        student: &StudentId,
    ) -> Result<Vec<EnrollmentView>, DomainError> {
        let mut matched: Vec<Enrollment> = self
            .enrollments
            .lock()
            .unwrap()
            .values()
            .filter(|e| &e.student == student && e.is_live())
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.enrolled_at.cmp(&a.enrolled_at));

        let mut views = Vec::with_capacity(matched.len());
        for enrollment in &matched {
            views.push(self.view_of(enrollment).await);
        }
        Ok(views)
    }

    async fn roster_for_course(
        &self,
        course: &CourseId,
    ) -> Result<Vec<EnrollmentView>, DomainError> {
        let mut matched: Vec<Enrollment> = self
            .enrollments
            .lock()
            .unwrap()
            .values()
            .filter(|e| &e.course == course)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.enrolled_at.cmp(&a.enrolled_at));

        let mut views = Vec::with_capacity(matched.len());
        for enrollment in &matched {
            views.push(self.view_of(enrollment).await);
        }
        Ok(views)
    }

    async fn review_queue(
        &self,
        status: Option<SubmissionStatus>,
    ) -> Result<Vec<ReviewQueueEntry>, DomainError> {
        let mut entries: Vec<ReviewQueueEntry> = self
            .enrollments
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.is_live())
            .flat_map(|e| {
                e.assignment_submissions
                    .iter()
                    .filter(|(_, s)| status.map_or(true, |wanted| s.status == wanted))
                    .map(|(milestone_id, submission)| ReviewQueueEntry {
                        enrollment_id: e.id,
                        student_id: e.student.clone(),
                        course_id: e.course,
                        milestone_id: milestone_id.clone(),
                        submission: submission.clone(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        entries.sort_by(|a, b| a.submission.submitted_at.cmp(&b.submission.submitted_at));
        Ok(entries)
    }

    async fn stats(&self, recent_days: u32) -> Result<EnrollmentStats, DomainError> {
        let store = self.enrollments.lock().unwrap();

        let live: Vec<&Enrollment> = store.values().filter(|e| e.is_live()).collect();

        let total_enrollments = live.len() as i64;
        let completed_enrollments = live
            .iter()
            .filter(|e| e.status == EnrollmentStatus::Completed)
            .count() as i64;
        let active_enrollments = live
            .iter()
            .filter(|e| e.status == EnrollmentStatus::Active)
            .count() as i64;
        let pending_reviews = live
            .iter()
            .flat_map(|e| e.assignment_submissions.values())
            .filter(|s| s.status == SubmissionStatus::Pending)
            .count() as i64;

        let cutoff = Timestamp::now().minus_days(recent_days as i64);
        let mut per_day: BTreeMap<String, i64> = BTreeMap::new();
        for enrollment in &live {
            if enrollment.enrolled_at.is_after(&cutoff) {
                let day = enrollment
                    .enrolled_at
                    .as_datetime()
                    .format("%Y-%m-%d")
                    .to_string();
                *per_day.entry(day).or_insert(0) += 1;
            }
        }

        let daily_enrollments = per_day
            .into_iter()
            .map(|(date, count)| DailyEnrollmentCount { date, count })
            .collect();

        Ok(EnrollmentStats {
            total_enrollments,
            active_enrollments,
            completed_enrollments,
            pending_reviews,
            daily_enrollments,
        })
    }
}

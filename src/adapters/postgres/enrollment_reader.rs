//! PostgreSQL implementation of EnrollmentReader.
//!
//! Read-optimized queries for the student listing, the admin roster,
//! the review queue and the dashboard aggregates. The review queue is
//! answered by flattening the `assignment_submissions` JSONB documents
//! with `jsonb_each`, so no separate projection table is needed.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::enrollment::{
    AssignmentSubmission, EnrollmentStatus, PaymentStatus, SubmissionStatus,
};
use crate::domain::foundation::{
    CourseId, DomainError, EnrollmentId, ErrorCode, MilestoneId, Percentage, StudentId, Timestamp,
};
use crate::ports::{
    DailyEnrollmentCount, EnrollmentReader, EnrollmentStats, EnrollmentView, ReviewQueueEntry,
};

/// PostgreSQL implementation of the EnrollmentReader port.
#[derive(Clone)]
pub struct PostgresEnrollmentReader {
    pool: PgPool,
}

impl PostgresEnrollmentReader {
    /// Creates a new PostgresEnrollmentReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn view_from_row(row: &sqlx::postgres::PgRow) -> Result<EnrollmentView, DomainError> {
    let id: Uuid = row.get("id");
    let student_id: String = row.get("student_id");
    let course_id: Uuid = row.get("course_id");
    let course_title: Option<String> = row.get("course_title");
    let payment_status: String = row.get("payment_status");
    let status: String = row.get("status");
    let progress: i16 = row.get("progress");
    let enrolled_at: chrono::DateTime<chrono::Utc> = row.get("enrolled_at");

    Ok(EnrollmentView {
        id: EnrollmentId::from_uuid(id),
        student_id: StudentId::new(student_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid student_id: {}", e))
        })?,
        course_id: CourseId::from_uuid(course_id),
        course_title,
        payment_status: PaymentStatus::parse(&payment_status).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid payment_status value: {}", payment_status),
            )
        })?,
        status: EnrollmentStatus::parse(&status).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid status value: {}", status),
            )
        })?,
        progress: Percentage::new(progress.clamp(0, 100) as u8),
        enrolled_at: Timestamp::from_datetime(enrolled_at),
    })
}

#[async_trait]
impl EnrollmentReader for PostgresEnrollmentReader {
    async fn list_for_student(
        &self,
        student: &StudentId,
    ) -> Result<Vec<EnrollmentView>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT e.id, e.student_id, e.course_id, c.title AS course_title,
                   e.payment_status, e.status, e.progress, e.enrolled_at
            FROM enrollments e
            LEFT JOIN courses c ON c.id = e.course_id
            WHERE e.student_id = $1 AND e.payment_status = 'completed'
            ORDER BY e.enrolled_at DESC
            "#,
        )
        .bind(student.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list enrollments: {}", e),
            )
        })?;

        rows.iter().map(view_from_row).collect()
    }

    async fn roster_for_course(
        &self,
        course: &CourseId,
    ) -> Result<Vec<EnrollmentView>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT e.id, e.student_id, e.course_id, c.title AS course_title,
                   e.payment_status, e.status, e.progress, e.enrolled_at
            FROM enrollments e
            LEFT JOIN courses c ON c.id = e.course_id
            WHERE e.course_id = $1
            ORDER BY e.enrolled_at DESC
            "#,
        )
        .bind(course.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to load course roster: {}", e),
            )
        })?;

        rows.iter().map(view_from_row).collect()
    }

    async fn review_queue(
        &self,
        status: Option<SubmissionStatus>,
    ) -> Result<Vec<ReviewQueueEntry>, DomainError> {
        // RFC 3339 UTC strings sort chronologically, so ordering on the
        // raw submitted_at text is enough.
        let rows = sqlx::query(
            r#"
            SELECT e.id, e.student_id, e.course_id,
                   sub.key AS milestone_id, sub.value AS submission
            FROM enrollments e, jsonb_each(e.assignment_submissions) AS sub
            WHERE e.payment_status = 'completed'
              AND ($1::text IS NULL OR sub.value->>'status' = $1)
            ORDER BY sub.value->>'submitted_at' ASC
            "#,
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to load review queue: {}", e),
            )
        })?;

        rows.iter()
            .map(|row| {
                let id: Uuid = row.get("id");
                let student_id: String = row.get("student_id");
                let course_id: Uuid = row.get("course_id");
                let milestone_id: String = row.get("milestone_id");
                let submission: serde_json::Value = row.get("submission");

                let submission: AssignmentSubmission = serde_json::from_value(submission)
                    .map_err(|e| {
                        DomainError::new(
                            ErrorCode::DatabaseError,
                            format!("Invalid submission document: {}", e),
                        )
                    })?;

                Ok(ReviewQueueEntry {
                    enrollment_id: EnrollmentId::from_uuid(id),
                    student_id: StudentId::new(student_id).map_err(|e| {
                        DomainError::new(
                            ErrorCode::DatabaseError,
                            format!("Invalid student_id: {}", e),
                        )
                    })?,
                    course_id: CourseId::from_uuid(course_id),
                    milestone_id: MilestoneId::new(milestone_id).map_err(|e| {
                        DomainError::new(
                            ErrorCode::DatabaseError,
                            format!("Invalid milestone_id: {}", e),
                        )
                    })?,
                    submission,
                })
            })
            .collect()
    }

    async fn stats(&self, recent_days: u32) -> Result<EnrollmentStats, DomainError> {
        let counts = sqlx::query(
            r#"
            SELECT
                COUNT(*) AS total_enrollments,
                COUNT(*) FILTER (WHERE status = 'active') AS active_enrollments,
                COUNT(*) FILTER (WHERE status = 'completed') AS completed_enrollments
            FROM enrollments
            WHERE payment_status = 'completed'
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to load enrollment counts: {}", e),
            )
        })?;

        let pending_reviews_row = sqlx::query(
            r#"
            SELECT COUNT(*) AS pending_reviews
            FROM enrollments e, jsonb_each(e.assignment_submissions) AS sub
            WHERE e.payment_status = 'completed'
              AND sub.value->>'status' = 'pending'
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to count pending reviews: {}", e),
            )
        })?;

        let daily_rows = sqlx::query(
            r#"
            SELECT to_char(date_trunc('day', enrolled_at), 'YYYY-MM-DD') AS day,
                   COUNT(*) AS count
            FROM enrollments
            WHERE payment_status = 'completed'
              AND enrolled_at > NOW() - ($1 * INTERVAL '1 day')
            GROUP BY date_trunc('day', enrolled_at)
            ORDER BY day ASC
            "#,
        )
        .bind(recent_days as i32)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to load daily enrollment counts: {}", e),
            )
        })?;

        let daily_enrollments = daily_rows
            .iter()
            .map(|row| DailyEnrollmentCount {
                date: row.get("day"),
                count: row.get("count"),
            })
            .collect();

        Ok(EnrollmentStats {
            total_enrollments: counts.get("total_enrollments"),
            active_enrollments: counts.get("active_enrollments"),
            completed_enrollments: counts.get("completed_enrollments"),
            pending_reviews: pending_reviews_row.get("pending_reviews"),
            daily_enrollments,
        })
    }
}

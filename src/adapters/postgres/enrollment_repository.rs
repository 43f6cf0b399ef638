//! PostgreSQL implementation of EnrollmentRepository.
//!
//! Persists Enrollment aggregates. The scalar lifecycle fields live in
//! typed columns; completed units, quiz attempts and assignment
//! submissions are stored as JSONB documents owned by the aggregate.

use crate::domain::enrollment::{
    AssignmentSubmission, Enrollment, EnrollmentStatus, PaymentStatus, QuizAttempt,
};
use crate::domain::foundation::{
    CourseId, DomainError, EnrollmentId, ErrorCode, MilestoneId, Percentage, StudentId, Timestamp,
    UnitId,
};
use crate::ports::{EnrollmentRepository, PaymentTransition};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

const ENROLLMENT_COLUMNS: &str = "id, student_id, course_id, payment_status, payment_id, \
     amount_paid_cents, completed_units, progress, quiz_attempts, \
     assignment_submissions, status, enrolled_at, updated_at";

/// PostgreSQL implementation of the EnrollmentRepository port.
///
/// Uses sqlx for type-safe database operations with connection pooling.
pub struct PostgresEnrollmentRepository {
    pool: PgPool,
}

impl PostgresEnrollmentRepository {
    /// Creates a new PostgresEnrollmentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an enrollment.
#[derive(Debug, sqlx::FromRow)]
struct EnrollmentRow {
    id: Uuid,
    student_id: String,
    course_id: Uuid,
    payment_status: String,
    payment_id: Option<String>,
    amount_paid_cents: i64,
    completed_units: serde_json::Value,
    progress: i16,
    quiz_attempts: serde_json::Value,
    assignment_submissions: serde_json::Value,
    status: String,
    enrolled_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EnrollmentRow> for Enrollment {
    type Error = DomainError;

    fn try_from(row: EnrollmentRow) -> Result<Self, Self::Error> {
        let payment_status = parse_payment_status(&row.payment_status)?;
        let status = parse_enrollment_status(&row.status)?;

        let completed_units: BTreeSet<UnitId> = serde_json::from_value(row.completed_units)
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid completed_units document: {}", e),
                )
            })?;
        let quiz_attempts: Vec<QuizAttempt> =
            serde_json::from_value(row.quiz_attempts).map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid quiz_attempts document: {}", e),
                )
            })?;
        let assignment_submissions: BTreeMap<MilestoneId, AssignmentSubmission> =
            serde_json::from_value(row.assignment_submissions).map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid assignment_submissions document: {}", e),
                )
            })?;

        let progress = u8::try_from(row.progress).map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Progress out of range: {}", row.progress),
            )
        })?;

        Ok(Enrollment {
            id: EnrollmentId::from_uuid(row.id),
            student: StudentId::new(row.student_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid student_id: {}", e))
            })?,
            course: CourseId::from_uuid(row.course_id),
            payment_status,
            payment_id: row.payment_id,
            amount_paid_cents: row.amount_paid_cents,
            completed_units,
            progress: Percentage::new(progress),
            quiz_attempts,
            assignment_submissions,
            status,
            enrolled_at: Timestamp::from_datetime(row.enrolled_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_payment_status(s: &str) -> Result<PaymentStatus, DomainError> {
    PaymentStatus::parse(s).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid payment_status value: {}", s),
        )
    })
}

fn parse_enrollment_status(s: &str) -> Result<EnrollmentStatus, DomainError> {
    EnrollmentStatus::parse(s).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid status value: {}", s),
        )
    })
}

fn to_json<T: serde::Serialize>(field: &str, value: &T) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(value).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to serialize {}: {}", field, e),
        )
    })
}

#[async_trait]
impl EnrollmentRepository for PostgresEnrollmentRepository {
    async fn save(&self, enrollment: &Enrollment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO enrollments (
                id, student_id, course_id, payment_status, payment_id, amount_paid_cents,
                completed_units, progress, quiz_attempts, assignment_submissions,
                status, enrolled_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(enrollment.id.as_uuid())
        .bind(enrollment.student.as_str())
        .bind(enrollment.course.as_uuid())
        .bind(enrollment.payment_status.as_str())
        .bind(&enrollment.payment_id)
        .bind(enrollment.amount_paid_cents)
        .bind(to_json("completed_units", &enrollment.completed_units)?)
        .bind(enrollment.progress.value() as i16)
        .bind(to_json("quiz_attempts", &enrollment.quiz_attempts)?)
        .bind(to_json(
            "assignment_submissions",
            &enrollment.assignment_submissions,
        )?)
        .bind(enrollment.status.as_str())
        .bind(enrollment.enrolled_at.as_datetime())
        .bind(enrollment.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("enrollments_student_id_course_id_key") {
                    return DomainError::new(
                        ErrorCode::AlreadyEnrolled,
                        "Student is already enrolled in this course",
                    );
                }
            }
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save enrollment: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, enrollment: &Enrollment) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE enrollments SET
                payment_status = $2,
                payment_id = $3,
                amount_paid_cents = $4,
                completed_units = $5,
                progress = $6,
                quiz_attempts = $7,
                assignment_submissions = $8,
                status = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(enrollment.id.as_uuid())
        .bind(enrollment.payment_status.as_str())
        .bind(&enrollment.payment_id)
        .bind(enrollment.amount_paid_cents)
        .bind(to_json("completed_units", &enrollment.completed_units)?)
        .bind(enrollment.progress.value() as i16)
        .bind(to_json("quiz_attempts", &enrollment.quiz_attempts)?)
        .bind(to_json(
            "assignment_submissions",
            &enrollment.assignment_submissions,
        )?)
        .bind(enrollment.status.as_str())
        .bind(enrollment.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update enrollment: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::EnrollmentNotFound,
                "Enrollment not found",
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &EnrollmentId) -> Result<Option<Enrollment>, DomainError> {
        let row: Option<EnrollmentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM enrollments WHERE id = $1",
            ENROLLMENT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find enrollment: {}", e),
            )
        })?;

        row.map(Enrollment::try_from).transpose()
    }

    async fn find_by_student_and_course(
        &self,
        student: &StudentId,
        course: &CourseId,
    ) -> Result<Option<Enrollment>, DomainError> {
        let row: Option<EnrollmentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM enrollments WHERE student_id = $1 AND course_id = $2",
            ENROLLMENT_COLUMNS
        ))
        .bind(student.as_str())
        .bind(course.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find enrollment: {}", e),
            )
        })?;

        row.map(Enrollment::try_from).transpose()
    }

    async fn find_by_payment_id(
        &self,
        payment_id: &str,
    ) -> Result<Option<Enrollment>, DomainError> {
        let row: Option<EnrollmentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM enrollments WHERE payment_id = $1",
            ENROLLMENT_COLUMNS
        ))
        .bind(payment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find enrollment by payment id: {}", e),
            )
        })?;

        row.map(Enrollment::try_from).transpose()
    }

    async fn complete_payment(
        &self,
        payment_id: &str,
    ) -> Result<Option<PaymentTransition>, DomainError> {
        // Conditional update: only one concurrent caller can match the
        // pending row, so the transition applies exactly once.
        let updated: Option<EnrollmentRow> = sqlx::query_as(&format!(
            r#"
            UPDATE enrollments
            SET payment_status = 'completed', updated_at = NOW()
            WHERE payment_id = $1 AND payment_status = 'pending'
            RETURNING {}
            "#,
            ENROLLMENT_COLUMNS
        ))
        .bind(payment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to complete payment: {}", e),
            )
        })?;

        if let Some(row) = updated {
            return Ok(Some(PaymentTransition::Applied(row.try_into()?)));
        }

        // No pending row matched: either the session id is unknown or
        // another caller already applied the transition.
        let existing = self.find_by_payment_id(payment_id).await?;
        match existing {
            None => Ok(None),
            Some(enrollment) if enrollment.payment_status == PaymentStatus::Completed => {
                Ok(Some(PaymentTransition::AlreadyApplied(enrollment)))
            }
            Some(enrollment) => Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot complete payment from status {}",
                    enrollment.payment_status.as_str()
                ),
            )),
        }
    }
}

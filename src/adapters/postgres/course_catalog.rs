//! PostgreSQL implementation of CourseCatalog.
//!
//! Courses are reference data authored elsewhere; this adapter only
//! reads them. The milestone structure (units, quizzes, assignments)
//! is stored as one JSONB document per course.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::{Course, Milestone};
use crate::domain::foundation::{CourseId, DomainError, ErrorCode};
use crate::ports::CourseCatalog;

/// PostgreSQL implementation of the CourseCatalog port.
#[derive(Clone)]
pub struct PostgresCourseCatalog {
    pool: PgPool,
}

impl PostgresCourseCatalog {
    /// Creates a new PostgresCourseCatalog.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a course.
#[derive(Debug, sqlx::FromRow)]
struct CourseRow {
    id: Uuid,
    title: String,
    price_cents: i64,
    milestones: serde_json::Value,
}

impl TryFrom<CourseRow> for Course {
    type Error = DomainError;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        let milestones: Vec<Milestone> = serde_json::from_value(row.milestones).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid milestones document: {}", e),
            )
        })?;

        Ok(Course {
            id: CourseId::from_uuid(row.id),
            title: row.title,
            price_cents: row.price_cents,
            milestones,
        })
    }
}

#[async_trait]
impl CourseCatalog for PostgresCourseCatalog {
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        let row: Option<CourseRow> = sqlx::query_as(
            r#"
            SELECT id, title, price_cents, milestones
            FROM courses WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find course: {}", e),
            )
        })?;

        row.map(Course::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Course>, DomainError> {
        let rows: Vec<CourseRow> = sqlx::query_as(
            r#"
            SELECT id, title, price_cents, milestones
            FROM courses ORDER BY title ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list courses: {}", e),
            )
        })?;

        rows.into_iter().map(Course::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_converts_to_course() {
        let row = CourseRow {
            id: Uuid::new_v4(),
            title: "Intro to Databases".to_string(),
            price_cents: 4900,
            milestones: serde_json::json!([
                {
                    "id": "m1",
                    "title": "Foundations",
                    "units": [
                        {"id": "u1", "title": "Relational Model"},
                        {"id": "u2", "title": "SQL Basics"}
                    ],
                    "assignment": {"title": "Schema Design"}
                }
            ]),
        };

        let course = Course::try_from(row).unwrap();
        assert_eq!(course.title, "Intro to Databases");
        assert_eq!(course.total_units(), 2);
        assert!(course.milestones[0].assignment.is_some());
    }

    #[test]
    fn row_with_malformed_milestones_fails_conversion() {
        let row = CourseRow {
            id: Uuid::new_v4(),
            title: "Broken".to_string(),
            price_cents: 0,
            milestones: serde_json::json!({"not": "an array"}),
        };

        assert!(Course::try_from(row).is_err());
    }
}

//! In-memory course catalog.
//!
//! Backs tests and local development with a plain map of courses. The
//! catalog is reference data, so the only write path is test setup.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::catalog::Course;
use crate::domain::foundation::{CourseId, DomainError};
use crate::ports::CourseCatalog;

/// In-memory `CourseCatalog` implementation.
#[derive(Default, Clone)]
pub struct InMemoryCourseCatalog {
    courses: Arc<Mutex<HashMap<CourseId, Course>>>,
}

impl InMemoryCourseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a course.
    pub fn insert(&self, course: Course) {
        self.courses.lock().unwrap().insert(course.id, course);
    }
}

#[async_trait]
impl CourseCatalog for InMemoryCourseCatalog {
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        Ok(self.courses.lock().unwrap().get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Course>, DomainError> {
        Ok(self.courses.lock().unwrap().values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(title: &str, price_cents: i64) -> Course {
        Course {
            id: CourseId::new(),
            title: title.to_string(),
            price_cents,
            milestones: vec![],
        }
    }

    #[tokio::test]
    async fn find_returns_inserted_course() {
        let catalog = InMemoryCourseCatalog::new();
        let c = course("Rust Basics", 4900);
        let id = c.id;
        catalog.insert(c);

        let found = catalog.find_by_id(&id).await.unwrap();
        assert_eq!(found.unwrap().title, "Rust Basics");
    }

    #[tokio::test]
    async fn find_misses_unknown_course() {
        let catalog = InMemoryCourseCatalog::new();
        assert!(catalog.find_by_id(&CourseId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_all_returns_every_course() {
        let catalog = InMemoryCourseCatalog::new();
        catalog.insert(course("A", 0));
        catalog.insert(course("B", 1000));

        assert_eq!(catalog.list_all().await.unwrap().len(), 2);
    }
}

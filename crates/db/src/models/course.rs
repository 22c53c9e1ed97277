//! Course catalog models: courses, sections, lectures.
//!
//! The enrollment service reads the catalog (price, publish status, lecture
//! structure) and performs exactly one write against it: the
//! `total_enrollments` counter increment.

use coursehub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Course publish status values stored in `courses.status`.
pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_PUBLISHED: &str = "published";
pub const STATUS_UNPUBLISHED: &str = "unpublished";

/// A course row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub instructor_id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// Course price in major currency units. `0` means free.
    pub price: f64,
    pub status: String,
    pub total_enrollments: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Course {
    pub fn is_published(&self) -> bool {
        self.status == STATUS_PUBLISHED
    }

    pub fn is_free(&self) -> bool {
        self.price <= 0.0
    }

    /// Price in minor currency units (e.g. cents, paise), rounded.
    pub fn price_minor_units(&self) -> i64 {
        (self.price * 100.0).round() as i64
    }
}

/// DTO for creating a new course.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourse {
    pub instructor_id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `0` (free) if omitted.
    pub price: Option<f64>,
    /// Defaults to `draft` if omitted.
    pub status: Option<String>,
}

/// A section row from the `sections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Section {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub position: i32,
}

/// A lecture row from the `lectures` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lecture {
    pub id: DbId,
    pub section_id: DbId,
    pub title: String,
    pub duration_secs: i32,
    pub position: i32,
}

/// A section with its lectures, as rendered in progress responses.
#[derive(Debug, Clone, Serialize)]
pub struct SectionWithLectures {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub position: i32,
    pub lectures: Vec<Lecture>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn course(price: f64, status: &str) -> Course {
        Course {
            id: 1,
            instructor_id: 1,
            title: "t".into(),
            description: None,
            price,
            status: status.into(),
            total_enrollments: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn price_converts_to_minor_units() {
        assert_eq!(course(49.99, STATUS_PUBLISHED).price_minor_units(), 4999);
        assert_eq!(course(0.0, STATUS_PUBLISHED).price_minor_units(), 0);
        assert_eq!(course(10.0, STATUS_PUBLISHED).price_minor_units(), 1000);
        // Rounding, not truncation.
        assert_eq!(course(0.999, STATUS_PUBLISHED).price_minor_units(), 100);
    }

    #[test]
    fn free_and_published_predicates() {
        assert!(course(0.0, STATUS_PUBLISHED).is_free());
        assert!(!course(5.0, STATUS_PUBLISHED).is_free());
        assert!(course(0.0, STATUS_PUBLISHED).is_published());
        assert!(!course(0.0, STATUS_DRAFT).is_published());
        assert!(!course(0.0, STATUS_UNPUBLISHED).is_published());
    }
}

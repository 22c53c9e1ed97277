//! Enrollment ledger models.

use coursehub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::course::Course;

/// An enrollment row from the `enrollments` table: one student's
/// relationship to one course. `student_id` and `course_id` are immutable
/// after creation; `progress` is recomputed on every mark/unmark.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enrollment {
    pub id: DbId,
    pub student_id: DbId,
    pub course_id: DbId,
    pub progress: i32,
    pub enrolled_at: Timestamp,
}

/// An enrollment together with its course, as returned by the my-courses
/// listing.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentWithCourse {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub course: Course,
}

//! Repository for the enrollment ledger (`enrollments` and
//! `completed_lectures` tables).
//!
//! Pure storage: the one rule enforced here is uniqueness of the
//! (student, course) pair, and that comes from the database index rather
//! than a check-then-insert, so concurrent creates fail deterministically
//! with a unique-constraint violation.

use coursehub_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::Course;
use crate::models::enrollment::{Enrollment, EnrollmentWithCourse};

/// Column list shared across `enrollments` queries.
const COLUMNS: &str = "id, student_id, course_id, progress, enrolled_at";

/// Provides storage operations for enrollments and their completed-lecture
/// sets.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Insert a new enrollment with progress 0 and an empty completed set.
    ///
    /// Fails with a unique-constraint violation (`uq_enrollments_student_course`)
    /// if the student is already enrolled in the course.
    pub async fn create(
        pool: &PgPool,
        student_id: DbId,
        course_id: DbId,
    ) -> Result<Enrollment, sqlx::Error> {
        let query = format!(
            "INSERT INTO enrollments (student_id, course_id, progress)
             VALUES ($1, $2, 0)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(student_id)
            .bind(course_id)
            .fetch_one(pool)
            .await
    }

    /// Find an enrollment by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrollments WHERE id = $1");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the enrollment linking one student to one course, if any.
    pub async fn find_by_student_and_course(
        pool: &PgPool,
        student_id: DbId,
        course_id: DbId,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM enrollments WHERE student_id = $1 AND course_id = $2");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(student_id)
            .bind(course_id)
            .fetch_optional(pool)
            .await
    }

    /// List a student's enrollments with their courses, newest first.
    pub async fn find_all_by_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<EnrollmentWithCourse>, sqlx::Error> {
        let enrollments = sqlx::query_as::<_, Enrollment>(&format!(
            "SELECT {COLUMNS} FROM enrollments
             WHERE student_id = $1 ORDER BY enrolled_at DESC, id DESC"
        ))
        .bind(student_id)
        .fetch_all(pool)
        .await?;

        let mut result = Vec::with_capacity(enrollments.len());
        for enrollment in enrollments {
            let course = sqlx::query_as::<_, Course>(
                "SELECT id, instructor_id, title, description, price, status,
                        total_enrollments, created_at, updated_at
                 FROM courses WHERE id = $1",
            )
            .bind(enrollment.course_id)
            .fetch_one(pool)
            .await?;
            result.push(EnrollmentWithCourse { enrollment, course });
        }
        Ok(result)
    }

    /// Store a freshly recomputed progress percentage.
    pub async fn set_progress(
        pool: &PgPool,
        id: DbId,
        progress: i32,
    ) -> Result<Enrollment, sqlx::Error> {
        let query = format!(
            "UPDATE enrollments SET progress = $2 WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .bind(progress)
            .fetch_one(pool)
            .await
    }

    /// Add a lecture to the completed set. Adding an already-present id is a
    /// no-op, not an error.
    ///
    /// `lecture_id` carries no foreign key, so membership in the
    /// enrollment's course must be checked by the caller before inserting.
    pub async fn add_completed_lecture(
        pool: &PgPool,
        enrollment_id: DbId,
        lecture_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO completed_lectures (enrollment_id, lecture_id)
             VALUES ($1, $2)
             ON CONFLICT (enrollment_id, lecture_id) DO NOTHING",
        )
        .bind(enrollment_id)
        .bind(lecture_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove a lecture from the completed set. Removing an absent id is a
    /// no-op, not an error.
    pub async fn remove_completed_lecture(
        pool: &PgPool,
        enrollment_id: DbId,
        lecture_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "DELETE FROM completed_lectures WHERE enrollment_id = $1 AND lecture_id = $2",
        )
        .bind(enrollment_id)
        .bind(lecture_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Ids of every lecture in the enrollment's completed set, including
    /// stale entries for lectures since removed from the course.
    pub async fn completed_lecture_ids(
        pool: &PgPool,
        enrollment_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT lecture_id FROM completed_lectures
             WHERE enrollment_id = $1 ORDER BY completed_at, lecture_id",
        )
        .bind(enrollment_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}

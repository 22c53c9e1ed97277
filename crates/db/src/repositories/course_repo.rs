//! Repository for the course catalog tables (`courses`, `sections`,
//! `lectures`).
//!
//! The enrollment service reads course price/status/structure through this
//! repo. The only catalog write it performs is [`CourseRepo::increment_enrollments`].

use coursehub_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{Course, CreateCourse, Lecture, Section, SectionWithLectures};

/// Column list shared across `courses` queries.
const COLUMNS: &str = "id, instructor_id, title, description, price, status, \
     total_enrollments, created_at, updated_at";

/// Provides read access to the course catalog plus the enrollment counter
/// increment.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course, returning the created row.
    ///
    /// `price` defaults to 0 (free) and `status` to `draft` when omitted.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (instructor_id, title, description, price, status)
             VALUES ($1, $2, $3, COALESCE($4, 0), COALESCE($5, 'draft'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(input.instructor_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a course by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Increment the denormalized enrollment counter by one.
    ///
    /// Called once per successful enrollment creation. This write and the
    /// enrollment insert are intentionally not in one transaction; a crash
    /// between them leaves the counter under-counted (accepted gap).
    pub async fn increment_enrollments(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE courses SET total_enrollments = total_enrollments + 1, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Add a section to a course, returning the created row.
    pub async fn add_section(
        pool: &PgPool,
        course_id: DbId,
        title: &str,
        position: i32,
    ) -> Result<Section, sqlx::Error> {
        sqlx::query_as::<_, Section>(
            "INSERT INTO sections (course_id, title, position)
             VALUES ($1, $2, $3)
             RETURNING id, course_id, title, position",
        )
        .bind(course_id)
        .bind(title)
        .bind(position)
        .fetch_one(pool)
        .await
    }

    /// Add a lecture to a section, returning the created row.
    pub async fn add_lecture(
        pool: &PgPool,
        section_id: DbId,
        title: &str,
        duration_secs: i32,
        position: i32,
    ) -> Result<Lecture, sqlx::Error> {
        sqlx::query_as::<_, Lecture>(
            "INSERT INTO lectures (section_id, title, duration_secs, position)
             VALUES ($1, $2, $3, $4)
             RETURNING id, section_id, title, duration_secs, position",
        )
        .bind(section_id)
        .bind(title)
        .bind(duration_secs)
        .bind(position)
        .fetch_one(pool)
        .await
    }

    /// Remove a lecture from the catalog. Returns `true` if a row was removed.
    pub async fn delete_lecture(pool: &PgPool, lecture_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lectures WHERE id = $1")
            .bind(lecture_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Load the course structure (sections with their lectures) in display
    /// order.
    pub async fn find_structure(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<SectionWithLectures>, sqlx::Error> {
        let sections = sqlx::query_as::<_, Section>(
            "SELECT id, course_id, title, position FROM sections
             WHERE course_id = $1 ORDER BY position, id",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await?;

        let lectures = sqlx::query_as::<_, Lecture>(
            "SELECT l.id, l.section_id, l.title, l.duration_secs, l.position
             FROM lectures l
             JOIN sections s ON s.id = l.section_id
             WHERE s.course_id = $1
             ORDER BY l.position, l.id",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await?;

        let mut result: Vec<SectionWithLectures> = sections
            .into_iter()
            .map(|s| SectionWithLectures {
                id: s.id,
                course_id: s.course_id,
                title: s.title,
                position: s.position,
                lectures: Vec::new(),
            })
            .collect();

        for lecture in lectures {
            if let Some(section) = result.iter_mut().find(|s| s.id == lecture.section_id) {
                section.lectures.push(lecture);
            }
        }

        Ok(result)
    }

    /// Ids of every lecture currently belonging to the course.
    ///
    /// Progress recomputation reads this fresh on every mark/unmark call so
    /// catalog changes are reflected immediately.
    pub async fn live_lecture_ids(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT l.id FROM lectures l
             JOIN sections s ON s.id = l.section_id
             WHERE s.course_id = $1",
        )
        .bind(course_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}

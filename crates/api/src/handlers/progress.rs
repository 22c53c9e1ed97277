//! Handlers for the `/progress` resource: per-lecture completion marking.
//!
//! Both operations are idempotent at the set level (re-marking a completed
//! lecture or unmarking an absent one is a no-op) and both finish by
//! recomputing the enrollment's percentage against the lecture set the
//! course has right now.

use axum::extract::State;
use axum::Json;
use coursehub_core::error::CoreError;
use coursehub_core::progress::completion_percent;
use coursehub_core::types::DbId;
use coursehub_db::models::enrollment::Enrollment;
use coursehub_db::repositories::{CourseRepo, EnrollmentRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStudent;
use crate::state::AppState;

/// Request body for mark-complete / mark-incomplete.
#[derive(Debug, Deserialize)]
pub struct MarkLectureRequest {
    pub enrollment_id: DbId,
    pub lecture_id: DbId,
}

/// Response payload: the enrollment with its freshly recomputed progress
/// and the current completed set.
#[derive(Debug, Serialize)]
pub struct ProgressUpdate {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub completed_lectures: Vec<DbId>,
}

/// POST /api/v1/progress/mark-complete
///
/// The lecture must belong to the enrollment's course at the time of
/// marking; only lectures deleted *after* a mark may linger in the stored
/// set.
pub async fn mark_complete(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
    Json(input): Json<MarkLectureRequest>,
) -> AppResult<Json<ProgressUpdate>> {
    let enrollment = owned_enrollment(&state, &user, input.enrollment_id).await?;

    let live = CourseRepo::live_lecture_ids(&state.pool, enrollment.course_id).await?;
    if !live.contains(&input.lecture_id) {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Lecture in course",
            id: input.lecture_id,
        }));
    }

    EnrollmentRepo::add_completed_lecture(&state.pool, enrollment.id, input.lecture_id).await?;

    recompute(&state, &enrollment).await
}

/// POST /api/v1/progress/mark-incomplete
pub async fn mark_incomplete(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
    Json(input): Json<MarkLectureRequest>,
) -> AppResult<Json<ProgressUpdate>> {
    let enrollment = owned_enrollment(&state, &user, input.enrollment_id).await?;

    EnrollmentRepo::remove_completed_lecture(&state.pool, enrollment.id, input.lecture_id).await?;

    recompute(&state, &enrollment).await
}

/// Load an enrollment and check it belongs to the caller.
async fn owned_enrollment(
    state: &AppState,
    user: &AuthUser,
    enrollment_id: DbId,
) -> Result<Enrollment, AppError> {
    let enrollment = EnrollmentRepo::find_by_id(&state.pool, enrollment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id: enrollment_id,
        }))?;

    if enrollment.student_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Enrollment belongs to a different student".into(),
        )));
    }

    Ok(enrollment)
}

/// Recompute and persist the enrollment's progress percentage.
///
/// The live lecture set is read fresh from the catalog every time, so
/// progress can decrease if lectures were added to the course since the
/// student's earlier completions.
async fn recompute(state: &AppState, enrollment: &Enrollment) -> AppResult<Json<ProgressUpdate>> {
    let live = CourseRepo::live_lecture_ids(&state.pool, enrollment.course_id).await?;
    let completed = EnrollmentRepo::completed_lecture_ids(&state.pool, enrollment.id).await?;

    let percent = completion_percent(&completed, &live);
    let updated = EnrollmentRepo::set_progress(&state.pool, enrollment.id, percent).await?;

    Ok(Json(ProgressUpdate {
        enrollment: updated,
        completed_lectures: completed,
    }))
}

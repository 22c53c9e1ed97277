//! Handlers for the `/enrollments` resource: free enrollment, the paid
//! order/verify flow, and enrollment lookups.
//!
//! The enrollment insert and the `total_enrollments` increment are two
//! separate writes with no cross-entity transaction. A crash between them
//! leaves the counter under-counted; this subsystem does not compensate or
//! reconcile.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use coursehub_core::error::CoreError;
use coursehub_core::payment::verify_payment_signature;
use coursehub_core::types::DbId;
use coursehub_db::models::course::SectionWithLectures;
use coursehub_db::models::enrollment::{Enrollment, EnrollmentWithCourse};
use coursehub_db::repositories::{CourseRepo, EnrollmentRepo};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::gateway::GatewayOrder;
use crate::middleware::rbac::RequireStudent;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/enrollments/{course_id}
///
/// Direct enrollment, free courses only. Paid courses must go through
/// [`create_order`] / [`verify_payment`].
pub async fn enroll(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
    Path(course_id): Path<DbId>,
) -> AppResult<(StatusCode, Json<Enrollment>)> {
    let course = CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;

    if !course.is_published() {
        return Err(AppError::Core(CoreError::InvalidState(
            "Cannot enroll in unpublished course".into(),
        )));
    }

    let existing =
        EnrollmentRepo::find_by_student_and_course(&state.pool, user.user_id, course_id).await?;
    if existing.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Already enrolled in this course".into(),
        )));
    }

    if !course.is_free() {
        return Err(AppError::Core(CoreError::InvalidState(
            "This is a paid course. Please initiate payment first.".into(),
        )));
    }

    // The existence check above closes the common case; a concurrent enroll
    // that slips past it is rejected here by the unique index and surfaces
    // as 409.
    let enrollment = EnrollmentRepo::create(&state.pool, user.user_id, course_id).await?;
    CourseRepo::increment_enrollments(&state.pool, course_id).await?;

    tracing::info!(
        student_id = user.user_id,
        course_id,
        enrollment_id = enrollment.id,
        "Student enrolled in free course"
    );

    Ok((StatusCode::CREATED, Json(enrollment)))
}

/// GET /api/v1/enrollments/my-courses
pub async fn my_courses(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
) -> AppResult<Json<DataResponse<Vec<EnrollmentWithCourse>>>> {
    let enrollments = EnrollmentRepo::find_all_by_student(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: enrollments }))
}

/// Response payload for the enrollment check.
#[derive(Debug, Serialize)]
pub struct EnrollmentCheck {
    pub enrolled: bool,
    pub enrollment: Option<Enrollment>,
}

/// GET /api/v1/enrollments/{course_id}/check
pub async fn check(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
    Path(course_id): Path<DbId>,
) -> AppResult<Json<DataResponse<EnrollmentCheck>>> {
    let enrollment =
        EnrollmentRepo::find_by_student_and_course(&state.pool, user.user_id, course_id).await?;
    Ok(Json(DataResponse {
        data: EnrollmentCheck {
            enrolled: enrollment.is_some(),
            enrollment,
        },
    }))
}

/// Enrollment merged with the live course structure, for rendering the
/// learning view.
#[derive(Debug, Serialize)]
pub struct CourseProgress {
    #[serde(flatten)]
    pub enrollment: EnrollmentWithCourse,
    pub sections: Vec<SectionWithLectures>,
    pub completed_lectures: Vec<DbId>,
}

/// GET /api/v1/enrollments/{course_id}/progress
pub async fn get_progress(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
    Path(course_id): Path<DbId>,
) -> AppResult<Json<DataResponse<CourseProgress>>> {
    let enrollment =
        EnrollmentRepo::find_by_student_and_course(&state.pool, user.user_id, course_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Enrollment for course",
                id: course_id,
            }))?;

    let course = CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;

    let sections = CourseRepo::find_structure(&state.pool, course_id).await?;
    let completed_lectures =
        EnrollmentRepo::completed_lecture_ids(&state.pool, enrollment.id).await?;

    Ok(Json(DataResponse {
        data: CourseProgress {
            enrollment: EnrollmentWithCourse { enrollment, course },
            sections,
            completed_lectures,
        },
    }))
}

/// POST /api/v1/enrollments/{course_id}/order
///
/// Creates a payment order with the gateway for a paid course. The returned
/// order id is opaque; the client's checkout widget echoes it back in
/// [`verify_payment`].
pub async fn create_order(
    State(state): State<AppState>,
    RequireStudent(_user): RequireStudent,
    Path(course_id): Path<DbId>,
) -> AppResult<Json<DataResponse<GatewayOrder>>> {
    let course = CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;

    // Receipt references must be unique per call.
    let receipt = format!("rcpt_{}", Uuid::new_v4().simple());
    let order = state
        .gateway
        .create_order(course.price_minor_units(), &receipt)
        .await?;

    Ok(Json(DataResponse { data: order }))
}

/// Request body for payment verification: the three gateway-issued tokens
/// plus the course being purchased.
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyPaymentRequest {
    #[validate(length(min = 1, message = "order_id must not be empty"))]
    pub order_id: String,
    #[validate(length(min = 1, message = "payment_id must not be empty"))]
    pub payment_id: String,
    #[validate(length(min = 1, message = "signature must not be empty"))]
    pub signature: String,
    pub course_id: DbId,
}

/// Response payload for payment verification.
#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    pub message: &'static str,
    /// `None` when the student was already enrolled (duplicate callback).
    pub enrollment: Option<Enrollment>,
}

/// POST /api/v1/enrollments/verify-payment
///
/// The signature check is the sole proof that payment occurred: the
/// expected value is HMAC-SHA256 over `order_id + "|" + payment_id` keyed
/// with the gateway key secret. On mismatch nothing is mutated. A valid
/// callback for an already-enrolled student is acknowledged without
/// mutation so gateway retries stay idempotent.
pub async fn verify_payment(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
    Json(input): Json<VerifyPaymentRequest>,
) -> AppResult<Json<VerifyPaymentResponse>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let valid = verify_payment_signature(
        &state.config.payment.key_secret,
        &input.order_id,
        &input.payment_id,
        &input.signature,
    );
    if !valid {
        tracing::warn!(
            student_id = user.user_id,
            course_id = input.course_id,
            order_id = %input.order_id,
            "Rejected payment confirmation with invalid signature"
        );
        return Err(AppError::Core(CoreError::Unauthorized(
            "invalid payment signature".into(),
        )));
    }

    let course = CourseRepo::find_by_id(&state.pool, input.course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: input.course_id,
        }))?;

    let existing =
        EnrollmentRepo::find_by_student_and_course(&state.pool, user.user_id, course.id).await?;
    if existing.is_some() {
        return Ok(Json(VerifyPaymentResponse {
            message: "Already enrolled",
            enrollment: None,
        }));
    }

    let enrollment = EnrollmentRepo::create(&state.pool, user.user_id, course.id).await?;
    CourseRepo::increment_enrollments(&state.pool, course.id).await?;

    tracing::info!(
        student_id = user.user_id,
        course_id = course.id,
        enrollment_id = enrollment.id,
        order_id = %input.order_id,
        "Payment verified, student enrolled"
    );

    Ok(Json(VerifyPaymentResponse {
        message: "Payment verified and enrolled successfully",
        enrollment: Some(enrollment),
    }))
}

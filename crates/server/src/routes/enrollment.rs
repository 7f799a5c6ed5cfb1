use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::enrollment::{EnrollOutcome, EnrollmentService};
use sea_orm::{DatabaseConnection, prelude::Uuid};
use serde_json::json;

use crate::{
    context::RequesterContext,
    dtos::enrollment::{EnrollRequest, EnrollmentResponse},
    error::ApiError,
};

/// List the caller's enrollments with their courses
#[utoipa::path(
    get,
    path = "/enrollments",
    responses(
        (status = 200, description = "The caller's enrollments", body = [EnrollmentResponse]),
        (status = 403, description = "Caller is not a student")
    ),
    tag = "Enrollments"
)]
pub async fn list_enrollments(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<EnrollmentResponse>>, ApiError> {
    ctx.require_student()?;
    let rows = EnrollmentService::list_for_user(&db, ctx.user_id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// Enroll the caller into a course. Enrolling twice is a no-op success.
#[utoipa::path(
    post,
    path = "/enrollments",
    request_body = EnrollRequest,
    responses(
        (status = 201, description = "Enrolled", body = EnrollmentResponse),
        (status = 200, description = "Already enrolled"),
        (status = 404, description = "Course not found"),
        (status = 403, description = "Caller is not a student")
    ),
    tag = "Enrollments"
)]
pub async fn enroll(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Json(body): Json<EnrollRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    ctx.require_student()?;
    match EnrollmentService::enroll(&db, ctx.user_id, body.course_id).await? {
        EnrollOutcome::Enrolled(row) => Ok((
            StatusCode::CREATED,
            Json(json!({
                "status": "enrolled",
                "enrollment": EnrollmentResponse::from((row, None)),
            })),
        )),
        EnrollOutcome::AlreadyEnrolled => Ok((
            StatusCode::OK,
            Json(json!({ "status": "already enrolled" })),
        )),
    }
}

/// Drop the caller's enrollment in a course. The row is removed outright.
#[utoipa::path(
    delete,
    path = "/enrollments/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Enrollment dropped"),
        (status = 404, description = "Caller is not enrolled in this course"),
        (status = 403, description = "Caller is not a student")
    ),
    tag = "Enrollments"
)]
pub async fn drop_enrollment(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Path(course_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ctx.require_student()?;
    EnrollmentService::drop(&db, ctx.user_id, course_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

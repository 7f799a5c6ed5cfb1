use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::course::{CourseInput, CourseService};
use sea_orm::{DatabaseConnection, prelude::Uuid};

use crate::{
    context::RequesterContext,
    dtos::course::{CourseQueryParams, CourseRequest, CourseResponse},
    error::ApiError,
};

impl From<CourseRequest> for CourseInput {
    fn from(body: CourseRequest) -> Self {
        Self {
            name: body.name,
            code: body.code,
            department_id: body.department_id,
            duration: body.duration,
            fee: body.fee,
            start_date: body.start_date,
            end_date: body.end_date,
            is_active: body.is_active,
        }
    }
}

/// List courses, ordered by name, optionally for one department
#[utoipa::path(
    get,
    path = "/courses",
    params(CourseQueryParams),
    responses(
        (status = 200, description = "List of courses", body = [CourseResponse]),
        (status = 401, description = "Missing caller identity")
    ),
    tag = "Courses"
)]
pub async fn list_courses(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Query(params): Query<CourseQueryParams>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    ctx.require_active()?;
    let courses = CourseService::list(&db, params.department).await?;
    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

/// Get a single course by ID
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
pub async fn get_course(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseResponse>, ApiError> {
    ctx.require_active()?;
    let course = CourseService::get(&db, id).await?;
    Ok(Json(course.into()))
}

/// Create a course under an existing department
#[utoipa::path(
    post,
    path = "/courses",
    request_body = CourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 409, description = "Duplicate code"),
        (status = 422, description = "Department does not exist")
    ),
    tag = "Courses"
)]
pub async fn create_course(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Json(body): Json<CourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    ctx.require_admin()?;
    let created = CourseService::create(&db, body.into()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Update a course
#[utoipa::path(
    put,
    path = "/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = CourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Duplicate code"),
        (status = 422, description = "Department does not exist")
    ),
    tag = "Courses"
)]
pub async fn update_course(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(body): Json<CourseRequest>,
) -> Result<Json<CourseResponse>, ApiError> {
    ctx.require_admin()?;
    let updated = CourseService::update(&db, id, body.into()).await?;
    Ok(Json(updated.into()))
}

/// Delete a course; blocked while modules reference it
#[utoipa::path(
    delete,
    path = "/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Modules still reference this course")
    ),
    tag = "Courses"
)]
pub async fn delete_course(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ctx.require_admin()?;
    CourseService::delete(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

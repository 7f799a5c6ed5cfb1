use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::{
    error::StoreError,
    services::student::{StudentInput, StudentService},
};
use models::status::StudentStatus;
use sea_orm::{DatabaseConnection, prelude::Uuid};

use crate::{
    context::RequesterContext,
    dtos::student::{StudentRequest, StudentResponse},
    error::ApiError,
};

fn parse_request(body: StudentRequest) -> Result<(StudentInput, Option<String>), ApiError> {
    let status = body
        .status
        .parse::<StudentStatus>()
        .map_err(|_| StoreError::validation(format!("unknown student status '{}'", body.status)))?;

    let login_password = if body.create_login {
        match body.password {
            Some(password) => Some(password),
            None => {
                return Err(
                    StoreError::validation("a password is required to create a login").into(),
                );
            }
        }
    } else {
        None
    };

    Ok((
        StudentInput {
            name: body.name,
            email: body.email,
            roll_number: body.roll_number,
            department_id: body.department_id,
            course_id: body.course_id,
            year: body.year,
            semester: body.semester,
            status,
        },
        login_password,
    ))
}

/// List all students, ordered by name
#[utoipa::path(
    get,
    path = "/students",
    responses(
        (status = 200, description = "List of students", body = [StudentResponse]),
        (status = 403, description = "Caller is not an admin")
    ),
    tag = "Students"
)]
pub async fn list_students(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    ctx.require_admin()?;
    let students = StudentService::list(&db).await?;
    Ok(Json(students.into_iter().map(Into::into).collect()))
}

/// Get a single student by ID
#[utoipa::path(
    get,
    path = "/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student found", body = StudentResponse),
        (status = 404, description = "Student not found")
    ),
    tag = "Students"
)]
pub async fn get_student(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<Json<StudentResponse>, ApiError> {
    ctx.require_admin()?;
    let student = StudentService::get(&db, id).await?;
    Ok(Json(student.into()))
}

/// Create a student, optionally with a linked login account
#[utoipa::path(
    post,
    path = "/students",
    request_body = StudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 409, description = "Duplicate email or roll number"),
        (status = 422, description = "Unknown department or course")
    ),
    tag = "Students"
)]
pub async fn create_student(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Json(body): Json<StudentRequest>,
) -> Result<(StatusCode, Json<StudentResponse>), ApiError> {
    ctx.require_admin()?;
    let (input, login_password) = parse_request(body)?;
    let created = StudentService::create(&db, input, login_password).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Update a student; a login can be created lazily but never replaced
#[utoipa::path(
    put,
    path = "/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = StudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Duplicate email or roll number")
    ),
    tag = "Students"
)]
pub async fn update_student(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(body): Json<StudentRequest>,
) -> Result<Json<StudentResponse>, ApiError> {
    ctx.require_admin()?;
    let (input, login_password) = parse_request(body)?;
    let updated = StudentService::update(&db, id, input, login_password).await?;
    Ok(Json(updated.into()))
}

/// Delete a student record
#[utoipa::path(
    delete,
    path = "/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found")
    ),
    tag = "Students"
)]
pub async fn delete_student(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ctx.require_admin()?;
    StudentService::delete(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::department::{DepartmentInput, DepartmentService};
use sea_orm::{DatabaseConnection, prelude::Uuid};

use crate::{
    context::RequesterContext,
    dtos::department::{DepartmentRequest, DepartmentResponse},
    error::ApiError,
};

impl From<DepartmentRequest> for DepartmentInput {
    fn from(body: DepartmentRequest) -> Self {
        Self {
            name: body.name,
            code: body.code,
            description: body.description,
            is_active: body.is_active,
        }
    }
}

/// List all departments, ordered by name
#[utoipa::path(
    get,
    path = "/departments",
    responses(
        (status = 200, description = "List of departments", body = [DepartmentResponse]),
        (status = 401, description = "Missing caller identity")
    ),
    tag = "Departments"
)]
pub async fn list_departments(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<DepartmentResponse>>, ApiError> {
    ctx.require_active()?;
    let departments = DepartmentService::list(&db).await?;
    Ok(Json(departments.into_iter().map(Into::into).collect()))
}

/// Get a single department by ID
#[utoipa::path(
    get,
    path = "/departments/{id}",
    params(("id" = Uuid, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department found", body = DepartmentResponse),
        (status = 404, description = "Department not found")
    ),
    tag = "Departments"
)]
pub async fn get_department(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    ctx.require_active()?;
    let department = DepartmentService::get(&db, id).await?;
    Ok(Json(department.into()))
}

/// Create a department
#[utoipa::path(
    post,
    path = "/departments",
    request_body = DepartmentRequest,
    responses(
        (status = 201, description = "Department created", body = DepartmentResponse),
        (status = 409, description = "Duplicate name or code"),
        (status = 403, description = "Caller is not an admin")
    ),
    tag = "Departments"
)]
pub async fn create_department(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Json(body): Json<DepartmentRequest>,
) -> Result<(StatusCode, Json<DepartmentResponse>), ApiError> {
    ctx.require_admin()?;
    let created = DepartmentService::create(&db, body.into()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Update a department
#[utoipa::path(
    put,
    path = "/departments/{id}",
    params(("id" = Uuid, Path, description = "Department ID")),
    request_body = DepartmentRequest,
    responses(
        (status = 200, description = "Department updated", body = DepartmentResponse),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Duplicate name or code")
    ),
    tag = "Departments"
)]
pub async fn update_department(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(body): Json<DepartmentRequest>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    ctx.require_admin()?;
    let updated = DepartmentService::update(&db, id, body.into()).await?;
    Ok(Json(updated.into()))
}

/// Delete a department, cascading over its courses
#[utoipa::path(
    delete,
    path = "/departments/{id}",
    params(("id" = Uuid, Path, description = "Department ID")),
    responses(
        (status = 204, description = "Department deleted"),
        (status = 404, description = "Department not found")
    ),
    tag = "Departments"
)]
pub async fn delete_department(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ctx.require_admin()?;
    DepartmentService::delete(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

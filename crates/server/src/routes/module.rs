use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::module::{ModuleInput, ModuleService};
use sea_orm::{DatabaseConnection, prelude::Uuid};

use crate::{
    context::RequesterContext,
    dtos::module::{ModuleQueryParams, ModuleRequest, ModuleResponse},
    error::ApiError,
};

impl From<ModuleRequest> for ModuleInput {
    fn from(body: ModuleRequest) -> Self {
        Self {
            name: body.name,
            code: body.code,
            course_id: body.course_id,
            department_id: body.department_id,
            credits: body.credits,
            semester: body.semester,
            weights: body.assessment.into(),
            prerequisites: body.prerequisites,
        }
    }
}

/// List modules ordered by (semester, name), optionally for one course
#[utoipa::path(
    get,
    path = "/modules",
    params(ModuleQueryParams),
    responses(
        (status = 200, description = "List of modules", body = [ModuleResponse]),
        (status = 401, description = "Missing caller identity")
    ),
    tag = "Modules"
)]
pub async fn list_modules(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Query(params): Query<ModuleQueryParams>,
) -> Result<Json<Vec<ModuleResponse>>, ApiError> {
    ctx.require_active()?;
    let modules = ModuleService::list(&db, params.course).await?;
    Ok(Json(
        modules
            .into_iter()
            .map(|(model, prerequisites)| ModuleResponse::from_model(model, prerequisites))
            .collect(),
    ))
}

/// Get a single module by ID, including its prerequisite module IDs
#[utoipa::path(
    get,
    path = "/modules/{id}",
    params(("id" = Uuid, Path, description = "Module ID")),
    responses(
        (status = 200, description = "Module found", body = ModuleResponse),
        (status = 404, description = "Module not found")
    ),
    tag = "Modules"
)]
pub async fn get_module(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<Json<ModuleResponse>, ApiError> {
    ctx.require_active()?;
    let (model, prerequisites) = ModuleService::get(&db, id).await?;
    Ok(Json(ModuleResponse::from_model(model, prerequisites)))
}

/// Create a module under an existing course and department
#[utoipa::path(
    post,
    path = "/modules",
    request_body = ModuleRequest,
    responses(
        (status = 201, description = "Module created", body = ModuleResponse),
        (status = 400, description = "Weights unbalanced or semester out of range"),
        (status = 409, description = "Duplicate code"),
        (status = 422, description = "Unknown course/department, or department mismatch")
    ),
    tag = "Modules"
)]
pub async fn create_module(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Json(body): Json<ModuleRequest>,
) -> Result<(StatusCode, Json<ModuleResponse>), ApiError> {
    ctx.require_admin()?;
    let (created, prerequisites) = ModuleService::create(&db, body.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ModuleResponse::from_model(created, prerequisites)),
    ))
}

/// Update a module
#[utoipa::path(
    put,
    path = "/modules/{id}",
    params(("id" = Uuid, Path, description = "Module ID")),
    request_body = ModuleRequest,
    responses(
        (status = 200, description = "Module updated", body = ModuleResponse),
        (status = 404, description = "Module not found"),
        (status = 409, description = "Duplicate code"),
        (status = 422, description = "Unknown course/department, or department mismatch")
    ),
    tag = "Modules"
)]
pub async fn update_module(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(body): Json<ModuleRequest>,
) -> Result<Json<ModuleResponse>, ApiError> {
    ctx.require_admin()?;
    let (updated, prerequisites) = ModuleService::update(&db, id, body.into()).await?;
    Ok(Json(ModuleResponse::from_model(updated, prerequisites)))
}

/// Delete a module; blocked while another module lists it as a prerequisite
#[utoipa::path(
    delete,
    path = "/modules/{id}",
    params(("id" = Uuid, Path, description = "Module ID")),
    responses(
        (status = 204, description = "Module deleted"),
        (status = 404, description = "Module not found"),
        (status = 409, description = "Another module lists this one as a prerequisite")
    ),
    tag = "Modules"
)]
pub async fn delete_module(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ctx.require_admin()?;
    ModuleService::delete(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::{
    error::StoreError,
    services::user::{NewUser, UserService, UserUpdate},
};
use models::role::UserRole;
use sea_orm::{DatabaseConnection, prelude::Uuid};

use crate::{
    context::RequesterContext,
    dtos::user::{CreateUserRequest, UpdateUserRequest, UserResponse},
    error::ApiError,
};

fn parse_role(raw: &str) -> Result<UserRole, ApiError> {
    raw.parse::<UserRole>()
        .map_err(|_| StoreError::validation(format!("unknown role '{raw}'")).into())
}

/// List all user accounts, ordered by name
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "List of users", body = [UserResponse]),
        (status = 403, description = "Caller is not an admin")
    ),
    tag = "Users"
)]
pub async fn list_users(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    ctx.require_admin()?;
    let users = UserService::list(&db).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Get a single user account by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
pub async fn get_user(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    ctx.require_admin()?;
    let account = UserService::get(&db, id).await?;
    Ok(Json(account.into()))
}

/// Create a standalone user account
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Password too short or unknown role"),
        (status = 409, description = "Duplicate email")
    ),
    tag = "Users"
)]
pub async fn create_user(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    ctx.require_admin()?;
    let role = parse_role(&body.role)?;
    let created = UserService::create(
        &db,
        NewUser {
            name: body.name,
            email: body.email,
            password: body.password,
            role,
            is_active: body.is_active,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Update a user account. Deactivation happens here via `is_active`;
/// accounts are never deleted.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "Duplicate email")
    ),
    tag = "Users"
)]
pub async fn update_user(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    ctx.require_admin()?;
    let role = parse_role(&body.role)?;
    let updated = UserService::update(
        &db,
        id,
        UserUpdate {
            name: body.name,
            email: body.email,
            role,
            is_active: body.is_active,
            password: body.password,
        },
    )
    .await?;
    Ok(Json(updated.into()))
}

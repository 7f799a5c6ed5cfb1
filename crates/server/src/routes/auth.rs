use axum::{Json, extract::State};
use database::services::user::UserService;
use sea_orm::DatabaseConnection;

use crate::{
    dtos::{auth::LoginRequest, user::UserResponse},
    error::ApiError,
};

/// Verify a user's credentials and return their profile. Session/token
/// issuance happens upstream; this endpoint only answers whether the
/// credentials are valid.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials are valid", body = UserResponse),
        (status = 400, description = "Unknown email, wrong password, or disabled account")
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(db): State<DatabaseConnection>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let account = UserService::verify_credentials(&db, &body.email, &body.password).await?;
    Ok(Json(account.into()))
}

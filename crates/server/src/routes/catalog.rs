use axum::{Json, extract::State};
use database::services::catalog::CatalogService;
use sea_orm::DatabaseConnection;

use crate::{
    context::RequesterContext, dtos::catalog::CatalogDepartmentResponse, error::ApiError,
};

/// The full catalog grouped by department, course, and semester. Courses
/// and modules whose references no longer resolve are omitted.
#[utoipa::path(
    get,
    path = "/catalog",
    responses(
        (status = 200, description = "Grouped catalog", body = [CatalogDepartmentResponse]),
        (status = 401, description = "Missing caller identity")
    ),
    tag = "Catalog"
)]
pub async fn get_catalog(
    ctx: RequesterContext,
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<CatalogDepartmentResponse>>, ApiError> {
    ctx.require_active()?;
    let tree = CatalogService::catalog(&db).await?;
    Ok(Json(tree.into_iter().map(Into::into).collect()))
}

use database::entities::department;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::default_true;

#[derive(Debug, Serialize, ToSchema)]
pub struct DepartmentResponse {
    pub id: String,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub is_active: bool,
}

impl From<department::Model> for DepartmentResponse {
    fn from(model: department::Model) -> Self {
        Self {
            id: model.id.to_string(),
            name: model.name,
            code: model.code,
            description: model.description,
            is_active: model.is_active,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DepartmentRequest {
    pub name: String,
    pub code: String,
    pub description: Option<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

use database::entities::user;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::default_true;

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id.to_string(),
            name: model.name,
            email: model.email,
            role: model.role.to_string(),
            is_active: model.is_active,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,

    /// When set, replaces the stored password
    pub password: Option<String>,
}

use database::entities::student;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub roll_number: String,
    pub department_id: String,
    pub course_id: String,
    pub year: i16,
    pub semester: i16,
    pub status: String,
    pub user_id: Option<String>,
}

impl From<student::Model> for StudentResponse {
    fn from(model: student::Model) -> Self {
        Self {
            id: model.id.to_string(),
            name: model.name,
            email: model.email,
            roll_number: model.roll_number,
            department_id: model.department_id.to_string(),
            course_id: model.course_id.to_string(),
            year: model.year,
            semester: model.semester,
            status: model.status.to_string(),
            user_id: model.user_id.map(|id| id.to_string()),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StudentRequest {
    pub name: String,
    pub email: String,
    pub roll_number: String,
    pub department_id: Uuid,
    pub course_id: Uuid,
    pub year: i16,
    pub semester: i16,
    pub status: String,

    /// Opt into lazily creating a linked login account
    #[serde(default)]
    pub create_login: bool,

    /// Password for the new login; required when `create_login` is set
    pub password: Option<String>,
}

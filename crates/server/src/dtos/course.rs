use chrono::NaiveDate;
use database::entities::course;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::default_true;

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: String,
    pub name: String,
    pub code: String,
    pub department_id: String,
    pub duration: i16,
    pub fee: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
}

impl From<course::Model> for CourseResponse {
    fn from(model: course::Model) -> Self {
        Self {
            id: model.id.to_string(),
            name: model.name,
            code: model.code,
            department_id: model.department_id.to_string(),
            duration: model.duration,
            fee: model.fee,
            start_date: model.start_date,
            end_date: model.end_date,
            is_active: model.is_active,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CourseRequest {
    pub name: String,
    pub code: String,
    pub department_id: Uuid,
    pub duration: i16,
    pub fee: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct CourseQueryParams {
    /// Restrict the listing to one department
    pub department: Option<Uuid>,
}

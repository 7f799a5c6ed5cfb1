use chrono::NaiveDateTime;
use database::entities::{course, enrollment};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::course::CourseResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentResponse {
    pub id: String,
    pub course_id: String,
    pub status: String,
    pub joined_at: NaiveDateTime,
    pub course: Option<CourseResponse>,
}

impl From<(enrollment::Model, Option<course::Model>)> for EnrollmentResponse {
    fn from((row, course): (enrollment::Model, Option<course::Model>)) -> Self {
        Self {
            id: row.id.to_string(),
            course_id: row.course_id.to_string(),
            status: row.status.to_string(),
            joined_at: row.joined_at,
            course: course.map(Into::into),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EnrollRequest {
    pub course_id: Uuid,
}

use database::entities::module;
use models::assessment::AssessmentWeights;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AssessmentBreakdown {
    pub exam: f64,
    pub coursework: f64,
    pub practical: f64,
}

impl From<AssessmentBreakdown> for AssessmentWeights {
    fn from(dto: AssessmentBreakdown) -> Self {
        AssessmentWeights::new(dto.exam, dto.coursework, dto.practical)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModuleResponse {
    pub id: String,
    pub name: String,
    pub code: String,
    pub course_id: String,
    pub department_id: String,
    pub credits: i16,
    pub semester: i16,
    pub assessment: AssessmentBreakdown,
    pub prerequisites: Vec<String>,
}

impl ModuleResponse {
    pub fn from_model(model: module::Model, prerequisites: Vec<Uuid>) -> Self {
        let weights = model.weights();
        Self {
            id: model.id.to_string(),
            name: model.name,
            code: model.code,
            course_id: model.course_id.to_string(),
            department_id: model.department_id.to_string(),
            credits: model.credits,
            semester: model.semester,
            assessment: AssessmentBreakdown {
                exam: weights.exam,
                coursework: weights.coursework,
                practical: weights.practical,
            },
            prerequisites: prerequisites.iter().map(Uuid::to_string).collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ModuleRequest {
    pub name: String,
    pub code: String,
    pub course_id: Uuid,
    pub department_id: Uuid,
    pub credits: i16,
    pub semester: i16,
    pub assessment: AssessmentBreakdown,

    #[serde(default)]
    pub prerequisites: Vec<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ModuleQueryParams {
    /// Restrict the listing to one course
    pub course: Option<Uuid>,
}

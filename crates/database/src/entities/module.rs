use models::assessment::AssessmentWeights;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "modules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub course_id: Uuid,
    pub department_id: Uuid,
    pub credits: i16,
    pub semester: i16,
    pub exam_weight: f64,
    pub coursework_weight: f64,
    pub practical_weight: f64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Model {
    pub fn weights(&self) -> AssessmentWeights {
        AssessmentWeights::new(self.exam_weight, self.coursework_weight, self.practical_weight)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id"
    )]
    Department,
    #[sea_orm(has_many = "super::module_prerequisite::Entity")]
    Prerequisites,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::module_prerequisite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Prerequisites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

use database::services::catalog::{CatalogCourse, CatalogDepartment, CatalogSemester};
use serde::Serialize;
use utoipa::ToSchema;

use super::{course::CourseResponse, department::DepartmentResponse};

/// One module row inside the catalog tree. Prerequisite links are not
/// resolved in this view.
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogModuleResponse {
    pub id: String,
    pub name: String,
    pub code: String,
    pub credits: i16,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogSemesterResponse {
    pub semester: i16,
    pub modules: Vec<CatalogModuleResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogCourseResponse {
    pub course: CourseResponse,
    pub semesters: Vec<CatalogSemesterResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogDepartmentResponse {
    pub department: DepartmentResponse,
    pub courses: Vec<CatalogCourseResponse>,
}

impl From<CatalogSemester> for CatalogSemesterResponse {
    fn from(group: CatalogSemester) -> Self {
        Self {
            semester: group.semester,
            modules: group
                .modules
                .into_iter()
                .map(|m| CatalogModuleResponse {
                    id: m.id.to_string(),
                    name: m.name,
                    code: m.code,
                    credits: m.credits,
                })
                .collect(),
        }
    }
}

impl From<CatalogCourse> for CatalogCourseResponse {
    fn from(group: CatalogCourse) -> Self {
        Self {
            course: group.course.into(),
            semesters: group.semesters.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<CatalogDepartment> for CatalogDepartmentResponse {
    fn from(group: CatalogDepartment) -> Self {
        Self {
            department: group.department.into(),
            courses: group.courses.into_iter().map(Into::into).collect(),
        }
    }
}

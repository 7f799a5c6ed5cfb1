use std::collections::HashMap;

use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    entities::{course, department, module},
    error::StoreResult,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSemester {
    pub semester: i16,
    pub modules: Vec<module::Model>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogCourse {
    pub course: course::Model,
    pub semesters: Vec<CatalogSemester>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogDepartment {
    pub department: department::Model,
    pub courses: Vec<CatalogCourse>,
}

pub struct CatalogService;

impl CatalogService {
    /// Fetch the three collections independently and assemble the grouped
    /// Department → Course → Semester → Modules view.
    pub async fn catalog(db: &DatabaseConnection) -> StoreResult<Vec<CatalogDepartment>> {
        let (departments, courses, modules) = futures::try_join!(
            department::Entity::find()
                .order_by_asc(department::Column::Name)
                .all(db),
            course::Entity::find()
                .order_by_asc(course::Column::Name)
                .all(db),
            module::Entity::find()
                .order_by_asc(module::Column::Semester)
                .order_by_asc(module::Column::Name)
                .all(db),
        )?;
        Ok(build_catalog(departments, courses, modules))
    }
}

/// Pure transform over three already-fetched, pre-ordered sequences.
///
/// Courses whose department does not resolve are dropped from the view, as
/// are modules whose department bucket or course bucket does not resolve.
/// Orphans are skipped silently, never reported. Output order mirrors the
/// insertion order of the inputs.
pub fn build_catalog(
    departments: Vec<department::Model>,
    courses: Vec<course::Model>,
    modules: Vec<module::Model>,
) -> Vec<CatalogDepartment> {
    let mut tree: Vec<CatalogDepartment> = Vec::with_capacity(departments.len());
    let mut dept_slot: HashMap<Uuid, usize> = HashMap::new();
    for dept in departments {
        dept_slot.insert(dept.id, tree.len());
        tree.push(CatalogDepartment {
            department: dept,
            courses: Vec::new(),
        });
    }

    // (department position, course position) per course id
    let mut course_slot: HashMap<Uuid, (usize, usize)> = HashMap::new();
    for item in courses {
        let Some(&dept_pos) = dept_slot.get(&item.department_id) else {
            continue;
        };
        let bucket = &mut tree[dept_pos].courses;
        course_slot.insert(item.id, (dept_pos, bucket.len()));
        bucket.push(CatalogCourse {
            course: item,
            semesters: Vec::new(),
        });
    }

    for item in modules {
        // Prefer the module's own department, fall back to its course's
        let dept_pos = match dept_slot.get(&item.department_id) {
            Some(&pos) => pos,
            None => match course_slot.get(&item.course_id) {
                Some(&(pos, _)) => pos,
                None => continue,
            },
        };
        let Some(&(course_dept_pos, course_pos)) = course_slot.get(&item.course_id) else {
            continue;
        };
        if course_dept_pos != dept_pos {
            // no course bucket under the resolved department
            continue;
        }

        let semesters = &mut tree[dept_pos].courses[course_pos].semesters;
        match semesters.iter_mut().find(|s| s.semester == item.semester) {
            Some(bucket) => bucket.modules.push(item),
            None => semesters.push(CatalogSemester {
                semester: item.semester,
                modules: vec![item],
            }),
        }
    }

    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> chrono::NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 9, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn dept(name: &str, code: &str) -> department::Model {
        department::Model {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            code: code.to_owned(),
            description: None,
            is_active: true,
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn course(name: &str, code: &str, department_id: Uuid) -> course::Model {
        course::Model {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            code: code.to_owned(),
            department_id,
            duration: 6,
            fee: 4200.0,
            start_date: chrono::NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2028, 6, 30).unwrap(),
            is_active: true,
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn module(name: &str, course_id: Uuid, department_id: Uuid, semester: i16) -> module::Model {
        module::Model {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            code: name.to_uppercase(),
            course_id,
            department_id,
            credits: 15,
            semester,
            exam_weight: 50.0,
            coursework_weight: 30.0,
            practical_weight: 20.0,
            created_at: ts(),
            updated_at: ts(),
        }
    }

    #[test]
    fn groups_modules_by_department_course_and_semester() {
        let cs = dept("Computer Science", "CS");
        let cs101 = course("Intro to CS", "CS101", cs.id);
        let m1 = module("M1", cs101.id, cs.id, 1);
        let m2 = module("M2", cs101.id, cs.id, 1);
        let orphan = module("Morphan", Uuid::new_v4(), cs.id, 2);

        let tree = build_catalog(
            vec![cs.clone()],
            vec![cs101.clone()],
            vec![m1.clone(), m2.clone(), orphan],
        );

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].department.code, "CS");
        assert_eq!(tree[0].courses.len(), 1);
        assert_eq!(tree[0].courses[0].course.code, "CS101");

        // one semester bucket; the orphan module is absent
        let semesters = &tree[0].courses[0].semesters;
        assert_eq!(semesters.len(), 1);
        assert_eq!(semesters[0].semester, 1);
        assert_eq!(semesters[0].modules, vec![m1, m2]);
    }

    #[test]
    fn drops_courses_with_unknown_department() {
        let cs = dept("Computer Science", "CS");
        let stray = course("Ghost Course", "GH100", Uuid::new_v4());
        let kept = course("Intro to CS", "CS101", cs.id);

        let tree = build_catalog(vec![cs], vec![stray, kept], vec![]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].courses.len(), 1);
        assert_eq!(tree[0].courses[0].course.code, "CS101");
    }

    #[test]
    fn module_department_falls_back_to_course_department() {
        let cs = dept("Computer Science", "CS");
        let cs101 = course("Intro to CS", "CS101", cs.id);
        // department reference no longer resolves, course still does
        let stray_dept_module = module("M1", cs101.id, Uuid::new_v4(), 1);

        let tree = build_catalog(vec![cs], vec![cs101], vec![stray_dept_module.clone()]);
        assert_eq!(tree[0].courses[0].semesters[0].modules, vec![stray_dept_module]);
    }

    #[test]
    fn output_mirrors_input_order() {
        let cs = dept("Computer Science", "CS");
        let math = dept("Mathematics", "MATH");
        let cs101 = course("Algorithms", "CS101", cs.id);
        let cs102 = course("Compilers", "CS102", cs.id);
        let ma201 = course("Calculus", "MA201", math.id);
        let a = module("Automata", cs101.id, cs.id, 1);
        let b = module("Big Data", cs101.id, cs.id, 2);
        let c = module("Complexity", cs101.id, cs.id, 2);

        let tree = build_catalog(
            vec![cs.clone(), math.clone()],
            vec![cs101.clone(), cs102.clone(), ma201.clone()],
            vec![a.clone(), b.clone(), c.clone()],
        );

        let dept_codes: Vec<_> = tree.iter().map(|d| d.department.code.as_str()).collect();
        assert_eq!(dept_codes, ["CS", "MATH"]);

        let course_codes: Vec<_> = tree[0]
            .courses
            .iter()
            .map(|c| c.course.code.as_str())
            .collect();
        assert_eq!(course_codes, ["CS101", "CS102"]);

        let semesters: Vec<_> = tree[0].courses[0]
            .semesters
            .iter()
            .map(|s| s.semester)
            .collect();
        assert_eq!(semesters, [1, 2]);
        assert_eq!(tree[0].courses[0].semesters[1].modules, vec![b, c]);
    }

    #[test]
    fn empty_inputs_produce_empty_tree() {
        assert!(build_catalog(vec![], vec![], vec![]).is_empty());
    }
}

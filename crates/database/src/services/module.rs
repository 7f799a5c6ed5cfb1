use std::collections::HashMap;

use chrono::Utc;
use models::{assessment::AssessmentWeights, normalize};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    entities::{course, department, module, module_prerequisite},
    error::{StoreError, StoreResult},
};

pub struct ModuleInput {
    pub name: String,
    pub code: String,
    pub course_id: Uuid,
    pub department_id: Uuid,
    pub credits: i16,
    pub semester: i16,
    pub weights: AssessmentWeights,
    pub prerequisites: Vec<Uuid>,
}

/// Valid module semesters.
const SEMESTER_RANGE: std::ops::RangeInclusive<i16> = 1..=12;

pub struct ModuleService;

impl ModuleService {
    const NATURAL_KEYS: &'static [&'static str] = &["code"];

    pub async fn list(
        db: &DatabaseConnection,
        course: Option<Uuid>,
    ) -> StoreResult<Vec<(module::Model, Vec<Uuid>)>> {
        let mut query = module::Entity::find()
            .order_by_asc(module::Column::Semester)
            .order_by_asc(module::Column::Name);
        if let Some(course_id) = course {
            query = query.filter(module::Column::CourseId.eq(course_id));
        }
        let modules = query.all(db).await?;
        if modules.is_empty() {
            return Ok(vec![]);
        }

        // Batch fetch prerequisite links and bucket them per module
        let ids: Vec<Uuid> = modules.iter().map(|m| m.id).collect();
        let links = module_prerequisite::Entity::find()
            .filter(module_prerequisite::Column::ModuleId.is_in(ids))
            .all(db)
            .await?;

        let mut by_module: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for link in links {
            by_module
                .entry(link.module_id)
                .or_default()
                .push(link.prerequisite_id);
        }

        Ok(modules
            .into_iter()
            .map(|m| {
                let prerequisites = by_module.remove(&m.id).unwrap_or_default();
                (m, prerequisites)
            })
            .collect())
    }

    pub async fn get(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> StoreResult<(module::Model, Vec<Uuid>)> {
        let model = module::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| StoreError::not_found("module"))?;
        let prerequisites = Self::prerequisite_ids(db, id).await?;
        Ok((model, prerequisites))
    }

    pub async fn create(
        db: &DatabaseConnection,
        mut input: ModuleInput,
    ) -> StoreResult<(module::Model, Vec<Uuid>)> {
        input.prerequisites.sort_unstable();
        input.prerequisites.dedup();
        let (name, code) = Self::validated(&input)?;
        Self::ensure_unique(db, &code, None).await?;
        Self::check_references(db, &input).await?;

        let now = Utc::now().naive_utc();
        let model = module::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            code: Set(code),
            course_id: Set(input.course_id),
            department_id: Set(input.department_id),
            credits: Set(input.credits),
            semester: Set(input.semester),
            exam_weight: Set(input.weights.exam),
            coursework_weight: Set(input.weights.coursework),
            practical_weight: Set(input.weights.practical),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = model
            .insert(db)
            .await
            .map_err(|err| StoreError::from_write(err, "module", Self::NATURAL_KEYS))?;

        Self::replace_prerequisites(db, created.id, &input.prerequisites, false).await?;
        Ok((created, input.prerequisites))
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        mut input: ModuleInput,
    ) -> StoreResult<(module::Model, Vec<Uuid>)> {
        input.prerequisites.sort_unstable();
        input.prerequisites.dedup();
        let existing = module::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| StoreError::not_found("module"))?;
        let (name, code) = Self::validated(&input)?;
        if input.prerequisites.contains(&id) {
            return Err(StoreError::validation(
                "a module cannot be its own prerequisite",
            ));
        }
        Self::ensure_unique(db, &code, Some(id)).await?;
        Self::check_references(db, &input).await?;

        let mut active = existing.into_active_model();
        active.name = Set(name);
        active.code = Set(code);
        active.course_id = Set(input.course_id);
        active.department_id = Set(input.department_id);
        active.credits = Set(input.credits);
        active.semester = Set(input.semester);
        active.exam_weight = Set(input.weights.exam);
        active.coursework_weight = Set(input.weights.coursework);
        active.practical_weight = Set(input.weights.practical);
        active.updated_at = Set(Utc::now().naive_utc());
        let updated = active
            .update(db)
            .await
            .map_err(|err| StoreError::from_write(err, "module", Self::NATURAL_KEYS))?;

        Self::replace_prerequisites(db, id, &input.prerequisites, true).await?;
        Ok((updated, input.prerequisites))
    }

    /// A module cannot be deleted while another module lists it as a
    /// prerequisite. Its own prerequisite links are removed with it.
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> StoreResult<()> {
        module::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| StoreError::not_found("module"))?;

        let dependent = module_prerequisite::Entity::find()
            .filter(module_prerequisite::Column::PrerequisiteId.eq(id))
            .one(db)
            .await?;
        if dependent.is_some() {
            return Err(StoreError::dependents("module", "dependent modules"));
        }

        module_prerequisite::Entity::delete_many()
            .filter(module_prerequisite::Column::ModuleId.eq(id))
            .exec(db)
            .await?;
        module::Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }

    async fn prerequisite_ids(db: &DatabaseConnection, id: Uuid) -> StoreResult<Vec<Uuid>> {
        Ok(module_prerequisite::Entity::find()
            .filter(module_prerequisite::Column::ModuleId.eq(id))
            .all(db)
            .await?
            .into_iter()
            .map(|link| link.prerequisite_id)
            .collect())
    }

    fn validated(input: &ModuleInput) -> StoreResult<(String, String)> {
        let name = input.name.trim().to_owned();
        let code = normalize::code(&input.code);
        if name.is_empty() || code.is_empty() {
            return Err(StoreError::validation("module name and code are required"));
        }
        if input.credits < 1 {
            return Err(StoreError::validation("module credits must be at least 1"));
        }
        if !SEMESTER_RANGE.contains(&input.semester) {
            return Err(StoreError::validation(format!(
                "module semester must be between {} and {}",
                SEMESTER_RANGE.start(),
                SEMESTER_RANGE.end()
            )));
        }
        if !input.weights.in_range() {
            return Err(StoreError::validation(
                "assessment weights must each be between 0 and 100",
            ));
        }
        if !input.weights.is_balanced() {
            return Err(StoreError::validation(format!(
                "assessment weights must sum to {}, got {}",
                AssessmentWeights::TOTAL,
                input.weights.total()
            )));
        }
        Ok((name, code))
    }

    async fn ensure_unique(
        db: &DatabaseConnection,
        code: &str,
        exclude: Option<Uuid>,
    ) -> StoreResult<()> {
        let mut query = module::Entity::find().filter(module::Column::Code.eq(code));
        if let Some(id) = exclude {
            query = query.filter(module::Column::Id.ne(id));
        }
        if query.one(db).await?.is_some() {
            return Err(StoreError::duplicate("module", &["code"]));
        }
        Ok(())
    }

    /// The course and department must both exist, the module's department
    /// must be the course's department, and every prerequisite must resolve
    /// to an existing module.
    async fn check_references(db: &DatabaseConnection, input: &ModuleInput) -> StoreResult<()> {
        let owning_course = course::Entity::find_by_id(input.course_id)
            .one(db)
            .await?
            .ok_or_else(|| StoreError::missing("module", "course"))?;
        department::Entity::find_by_id(input.department_id)
            .one(db)
            .await?
            .ok_or_else(|| StoreError::missing("module", "department"))?;
        if owning_course.department_id != input.department_id {
            return Err(StoreError::ReferenceMismatch);
        }

        if input.prerequisites.is_empty() {
            return Ok(());
        }
        let found = module::Entity::find()
            .filter(module::Column::Id.is_in(input.prerequisites.clone()))
            .all(db)
            .await?;
        if found.len() != input.prerequisites.len() {
            return Err(StoreError::missing("module", "prerequisite module"));
        }
        Ok(())
    }

    async fn replace_prerequisites(
        db: &DatabaseConnection,
        module_id: Uuid,
        prerequisites: &[Uuid],
        clear_existing: bool,
    ) -> StoreResult<()> {
        if clear_existing {
            module_prerequisite::Entity::delete_many()
                .filter(module_prerequisite::Column::ModuleId.eq(module_id))
                .exec(db)
                .await?;
        }
        if prerequisites.is_empty() {
            return Ok(());
        }

        let links: Vec<module_prerequisite::ActiveModel> = prerequisites
            .iter()
            .map(|prerequisite_id| module_prerequisite::ActiveModel {
                id: Set(Uuid::new_v4()),
                module_id: Set(module_id),
                prerequisite_id: Set(*prerequisite_id),
            })
            .collect();
        module_prerequisite::Entity::insert_many(links)
            .exec(db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use sea_orm::{DatabaseBackend, MockDatabase};

    fn ts() -> chrono::NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 9, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn sample_course(department_id: Uuid) -> course::Model {
        course::Model {
            id: Uuid::new_v4(),
            name: "Software Engineering".to_owned(),
            code: "SE101".to_owned(),
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

    fn sample_department(name: &str, code: &str) -> department::Model {
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

    fn sample_module(course_id: Uuid, department_id: Uuid) -> module::Model {
        module::Model {
            id: Uuid::new_v4(),
            name: "Databases".to_owned(),
            code: "DB201".to_owned(),
            course_id,
            department_id,
            credits: 15,
            semester: 3,
            exam_weight: 50.0,
            coursework_weight: 30.0,
            practical_weight: 20.0,
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn input(course_id: Uuid, department_id: Uuid) -> ModuleInput {
        ModuleInput {
            name: "Databases".to_owned(),
            code: "db201".to_owned(),
            course_id,
            department_id,
            credits: 15,
            semester: 3,
            weights: AssessmentWeights::new(50.0, 30.0, 20.0),
            prerequisites: vec![],
        }
    }

    #[tokio::test]
    async fn create_rejects_unbalanced_weights() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let mut bad = input(Uuid::new_v4(), Uuid::new_v4());
        bad.weights = AssessmentWeights::new(50.0, 30.0, 19.0);
        let err = ModuleService::create(&db, bad).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_out_of_range_semester() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let mut bad = input(Uuid::new_v4(), Uuid::new_v4());
        bad.semester = 13;
        let err = ModuleService::create(&db, bad).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_department_course_mismatch() {
        // course belongs to CS, module claims Physics
        let cs = sample_department("Computer Science", "CS");
        let physics = sample_department("Physics", "PHY");
        let owning_course = sample_course(cs.id);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<module::Model>::new()])
            .append_query_results([vec![owning_course.clone()]])
            .append_query_results([vec![physics.clone()]])
            .into_connection();

        let err = ModuleService::create(&db, input(owning_course.id, physics.id))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ReferenceMismatch));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_code_case_insensitively() {
        let department_id = Uuid::new_v4();
        let course_id = Uuid::new_v4();
        let existing = sample_module(course_id, department_id);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing]])
            .into_connection();

        // "db201" normalizes to the stored "DB201"
        let err = ModuleService::create(&db, input(course_id, department_id))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));
    }

    #[tokio::test]
    async fn delete_is_blocked_while_listed_as_prerequisite() {
        let department_id = Uuid::new_v4();
        let course_id = Uuid::new_v4();
        let target = sample_module(course_id, department_id);
        let link = module_prerequisite::Model {
            id: Uuid::new_v4(),
            module_id: Uuid::new_v4(),
            prerequisite_id: target.id,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![target.clone()]])
            .append_query_results([vec![link]])
            .into_connection();

        let err = ModuleService::delete(&db, target.id).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::HasDependents {
                entity: "module",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn update_rejects_self_prerequisite() {
        let department_id = Uuid::new_v4();
        let course_id = Uuid::new_v4();
        let existing = sample_module(course_id, department_id);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing.clone()]])
            .into_connection();

        let mut bad = input(course_id, department_id);
        bad.prerequisites = vec![existing.id];
        let err = ModuleService::update(&db, existing.id, bad).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }
}

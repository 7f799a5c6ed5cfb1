use chrono::{NaiveDate, Utc};
use models::normalize;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    entities::{course, department, module},
    error::{StoreError, StoreResult},
};

pub struct CourseInput {
    pub name: String,
    pub code: String,
    pub department_id: Uuid,
    pub duration: i16,
    pub fee: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
}

pub struct CourseService;

impl CourseService {
    const NATURAL_KEYS: &'static [&'static str] = &["code"];

    pub async fn list(
        db: &DatabaseConnection,
        department: Option<Uuid>,
    ) -> StoreResult<Vec<course::Model>> {
        let mut query = course::Entity::find().order_by_asc(course::Column::Name);
        if let Some(department_id) = department {
            query = query.filter(course::Column::DepartmentId.eq(department_id));
        }
        Ok(query.all(db).await?)
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> StoreResult<course::Model> {
        course::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| StoreError::not_found("course"))
    }

    pub async fn create(db: &DatabaseConnection, input: CourseInput) -> StoreResult<course::Model> {
        let (name, code) = Self::validated(&input)?;
        Self::ensure_unique(db, &code, None).await?;
        Self::ensure_department_exists(db, input.department_id).await?;

        let now = Utc::now().naive_utc();
        let model = course::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            code: Set(code),
            department_id: Set(input.department_id),
            duration: Set(input.duration),
            fee: Set(input.fee),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            is_active: Set(input.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        };
        model
            .insert(db)
            .await
            .map_err(|err| StoreError::from_write(err, "course", Self::NATURAL_KEYS))
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        input: CourseInput,
    ) -> StoreResult<course::Model> {
        let existing = Self::get(db, id).await?;
        let (name, code) = Self::validated(&input)?;
        Self::ensure_unique(db, &code, Some(id)).await?;
        Self::ensure_department_exists(db, input.department_id).await?;

        let mut active = existing.into_active_model();
        active.name = Set(name);
        active.code = Set(code);
        active.department_id = Set(input.department_id);
        active.duration = Set(input.duration);
        active.fee = Set(input.fee);
        active.start_date = Set(input.start_date);
        active.end_date = Set(input.end_date);
        active.is_active = Set(input.is_active);
        active.updated_at = Set(Utc::now().naive_utc());
        active
            .update(db)
            .await
            .map_err(|err| StoreError::from_write(err, "course", Self::NATURAL_KEYS))
    }

    /// A course cannot be deleted while modules reference it. Enrollment
    /// rows are left untouched, matching the rest of the best-effort model.
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> StoreResult<()> {
        Self::get(db, id).await?;

        let dependent = module::Entity::find()
            .filter(module::Column::CourseId.eq(id))
            .one(db)
            .await?;
        if dependent.is_some() {
            return Err(StoreError::dependents("course", "modules"));
        }

        course::Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }

    fn validated(input: &CourseInput) -> StoreResult<(String, String)> {
        let name = input.name.trim().to_owned();
        let code = normalize::code(&input.code);
        if name.is_empty() || code.is_empty() {
            return Err(StoreError::validation("course name and code are required"));
        }
        if input.duration < 1 {
            return Err(StoreError::validation(
                "course duration must be at least one semester",
            ));
        }
        if input.fee < 0.0 {
            return Err(StoreError::validation("course fee cannot be negative"));
        }
        if input.end_date <= input.start_date {
            return Err(StoreError::validation(
                "course end date must be after its start date",
            ));
        }
        Ok((name, code))
    }

    async fn ensure_unique(
        db: &DatabaseConnection,
        code: &str,
        exclude: Option<Uuid>,
    ) -> StoreResult<()> {
        let mut query = course::Entity::find().filter(course::Column::Code.eq(code));
        if let Some(id) = exclude {
            query = query.filter(course::Column::Id.ne(id));
        }
        if query.one(db).await?.is_some() {
            return Err(StoreError::duplicate("course", &["code"]));
        }
        Ok(())
    }

    async fn ensure_department_exists(
        db: &DatabaseConnection,
        department_id: Uuid,
    ) -> StoreResult<()> {
        department::Entity::find_by_id(department_id)
            .one(db)
            .await?
            .map(|_| ())
            .ok_or_else(|| StoreError::missing("course", "department"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn ts() -> chrono::NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 9, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_course(department_id: Uuid) -> course::Model {
        course::Model {
            id: Uuid::new_v4(),
            name: "Software Engineering".to_owned(),
            code: "SE101".to_owned(),
            department_id,
            duration: 6,
            fee: 4200.0,
            start_date: date(2025, 9, 1),
            end_date: date(2028, 6, 30),
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

    fn input(department_id: Uuid) -> CourseInput {
        CourseInput {
            name: "Software Engineering".to_owned(),
            code: "se101".to_owned(),
            department_id,
            duration: 6,
            fee: 4200.0,
            start_date: date(2025, 9, 1),
            end_date: date(2028, 6, 30),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn create_rejects_missing_department() {
        let department_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<course::Model>::new()])
            .append_query_results([Vec::<crate::entities::department::Model>::new()])
            .into_connection();

        let err = CourseService::create(&db, input(department_id)).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::MissingReference {
                entity: "course",
                reference: "department"
            }
        ));
    }

    #[tokio::test]
    async fn create_rejects_end_date_before_start_date() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let mut bad = input(Uuid::new_v4());
        bad.end_date = bad.start_date;
        let err = CourseService::create(&db, bad).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_is_blocked_by_dependent_modules() {
        let department_id = Uuid::new_v4();
        let existing = sample_course(department_id);
        let dependent = sample_module(existing.id, department_id);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing.clone()]])
            .append_query_results([vec![dependent]])
            .into_connection();

        let err = CourseService::delete(&db, existing.id).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::HasDependents {
                entity: "course",
                dependents: "modules"
            }
        ));
    }

    #[tokio::test]
    async fn delete_without_modules_succeeds() {
        let existing = sample_course(Uuid::new_v4());
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing.clone()]])
            .append_query_results([Vec::<module::Model>::new()])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        CourseService::delete(&db, existing.id).await.unwrap();
    }
}

use chrono::Utc;
use models::normalize;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    entities::{course, department},
    error::{StoreError, StoreResult},
};

pub struct DepartmentInput {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub is_active: bool,
}

pub struct DepartmentService;

impl DepartmentService {
    const NATURAL_KEYS: &'static [&'static str] = &["name", "code"];

    pub async fn list(db: &DatabaseConnection) -> StoreResult<Vec<department::Model>> {
        Ok(department::Entity::find()
            .order_by_asc(department::Column::Name)
            .all(db)
            .await?)
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> StoreResult<department::Model> {
        department::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| StoreError::not_found("department"))
    }

    pub async fn create(
        db: &DatabaseConnection,
        input: DepartmentInput,
    ) -> StoreResult<department::Model> {
        let (name, code) = Self::normalized(&input)?;
        Self::ensure_unique(db, &name, &code, None).await?;

        let now = Utc::now().naive_utc();
        let model = department::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            code: Set(code),
            description: Set(input.description),
            is_active: Set(input.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        };
        model
            .insert(db)
            .await
            .map_err(|err| StoreError::from_write(err, "department", Self::NATURAL_KEYS))
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        input: DepartmentInput,
    ) -> StoreResult<department::Model> {
        let existing = Self::get(db, id).await?;
        let (name, code) = Self::normalized(&input)?;
        Self::ensure_unique(db, &name, &code, Some(id)).await?;

        let mut active = existing.into_active_model();
        active.name = Set(name);
        active.code = Set(code);
        active.description = Set(input.description);
        active.is_active = Set(input.is_active);
        active.updated_at = Set(Utc::now().naive_utc());
        active
            .update(db)
            .await
            .map_err(|err| StoreError::from_write(err, "department", Self::NATURAL_KEYS))
    }

    /// Deleting a department removes every course under it first. The
    /// cascade is unconditional and not transactional; modules under a
    /// cascaded course keep their now-dangling course reference.
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> StoreResult<()> {
        let existing = Self::get(db, id).await?;

        let removed = course::Entity::delete_many()
            .filter(course::Column::DepartmentId.eq(id))
            .exec(db)
            .await?;
        if removed.rows_affected > 0 {
            log::info!(
                "cascade removed {} course(s) under department {}",
                removed.rows_affected,
                existing.code
            );
        }

        department::Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }

    fn normalized(input: &DepartmentInput) -> StoreResult<(String, String)> {
        let name = input.name.trim().to_owned();
        let code = normalize::code(&input.code);
        if name.is_empty() || code.is_empty() {
            return Err(StoreError::validation("department name and code are required"));
        }
        Ok((name, code))
    }

    /// Optimistic pre-check for a friendly error message; the unique
    /// indexes on name and code remain authoritative under races.
    async fn ensure_unique(
        db: &DatabaseConnection,
        name: &str,
        code: &str,
        exclude: Option<Uuid>,
    ) -> StoreResult<()> {
        let mut query = department::Entity::find().filter(
            Condition::any()
                .add(department::Column::Name.eq(name))
                .add(department::Column::Code.eq(code)),
        );
        if let Some(id) = exclude {
            query = query.filter(department::Column::Id.ne(id));
        }

        if let Some(existing) = query.one(db).await? {
            let mut fields = Vec::new();
            if existing.name == name {
                fields.push("name");
            }
            if existing.code == code {
                fields.push("code");
            }
            return Err(StoreError::duplicate("department", &fields));
        }
        Ok(())
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

    fn sample(name: &str, code: &str) -> department::Model {
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

    #[tokio::test]
    async fn create_normalizes_and_inserts() {
        let stored = sample("Computer Science", "CS");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<department::Model>::new()])
            .append_query_results([vec![stored.clone()]])
            .into_connection();

        let created = DepartmentService::create(
            &db,
            DepartmentInput {
                name: "  Computer Science ".to_owned(),
                code: "cs".to_owned(),
                description: None,
                is_active: true,
            },
        )
        .await
        .unwrap();

        assert_eq!(created, stored);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_code_case_insensitively() {
        let existing = sample("Computer Science", "CS");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing]])
            .into_connection();

        let err = DepartmentService::create(
            &db,
            DepartmentInput {
                name: "Physics".to_owned(),
                code: "cs".to_owned(),
                description: None,
                is_active: true,
            },
        )
        .await
        .unwrap_err();

        match err {
            StoreError::DuplicateKey { entity, fields } => {
                assert_eq!(entity, "department");
                assert_eq!(fields, "code");
            }
            other => panic!("expected DuplicateKey, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_name() {
        let existing = sample("Computer Science", "CS");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing]])
            .into_connection();

        let err = DepartmentService::create(
            &db,
            DepartmentInput {
                name: "Computer Science".to_owned(),
                code: "CSE".to_owned(),
                description: None,
                is_active: true,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateKey { .. }));
    }

    #[tokio::test]
    async fn delete_cascades_over_courses_unconditionally() {
        let dept = sample("Computer Science", "CS");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![dept.clone()]])
            .append_exec_results([
                // cascaded course rows, then the department itself
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 3,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        DepartmentService::delete(&db, dept.id).await.unwrap();
    }

    #[tokio::test]
    async fn delete_missing_department_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<department::Model>::new()])
            .into_connection();

        let err = DepartmentService::delete(&db, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "department" }));
    }
}

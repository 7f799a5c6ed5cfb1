use chrono::Utc;
use models::status::EnrollmentStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::{
    entities::{course, enrollment},
    error::{StoreError, StoreResult, is_unique_violation},
};

/// What an enroll call observed. Enrolling twice is a no-op success, not an
/// error.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrollOutcome {
    Enrolled(enrollment::Model),
    AlreadyEnrolled,
}

pub struct EnrollmentService;

impl EnrollmentService {
    pub async fn enroll(
        db: &DatabaseConnection,
        user_id: Uuid,
        course_id: Uuid,
    ) -> StoreResult<EnrollOutcome> {
        course::Entity::find_by_id(course_id)
            .one(db)
            .await?
            .ok_or_else(|| StoreError::not_found("course"))?;

        if Self::find_pair(db, user_id, course_id).await?.is_some() {
            return Ok(EnrollOutcome::AlreadyEnrolled);
        }

        let row = enrollment::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            course_id: Set(course_id),
            status: Set(EnrollmentStatus::Enrolled),
            joined_at: Set(Utc::now().naive_utc()),
        };
        match row.insert(db).await {
            Ok(created) => Ok(EnrollOutcome::Enrolled(created)),
            Err(err) if is_unique_violation(&err) => {
                // lost a race with a concurrent enroll for the same pair
                log::warn!("duplicate enrollment for user {user_id} in course {course_id}");
                Ok(EnrollOutcome::AlreadyEnrolled)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Dropping removes the row outright; no status history is kept.
    pub async fn drop(
        db: &DatabaseConnection,
        user_id: Uuid,
        course_id: Uuid,
    ) -> StoreResult<()> {
        let existing = Self::find_pair(db, user_id, course_id)
            .await?
            .ok_or_else(|| StoreError::not_found("enrollment"))?;

        enrollment::Entity::delete_by_id(existing.id).exec(db).await?;
        Ok(())
    }

    pub async fn list_for_user(
        db: &DatabaseConnection,
        user_id: Uuid,
    ) -> StoreResult<Vec<(enrollment::Model, Option<course::Model>)>> {
        Ok(enrollment::Entity::find()
            .filter(enrollment::Column::UserId.eq(user_id))
            .find_also_related(course::Entity)
            .order_by_asc(enrollment::Column::JoinedAt)
            .all(db)
            .await?)
    }

    async fn find_pair(
        db: &DatabaseConnection,
        user_id: Uuid,
        course_id: Uuid,
    ) -> StoreResult<Option<enrollment::Model>> {
        Ok(enrollment::Entity::find()
            .filter(enrollment::Column::UserId.eq(user_id))
            .filter(enrollment::Column::CourseId.eq(course_id))
            .one(db)
            .await?)
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

    fn sample_course() -> course::Model {
        course::Model {
            id: Uuid::new_v4(),
            name: "Software Engineering".to_owned(),
            code: "SE101".to_owned(),
            department_id: Uuid::new_v4(),
            duration: 6,
            fee: 4200.0,
            start_date: chrono::NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2028, 6, 30).unwrap(),
            is_active: true,
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn sample_enrollment(user_id: Uuid, course_id: Uuid) -> enrollment::Model {
        enrollment::Model {
            id: Uuid::new_v4(),
            user_id,
            course_id,
            status: EnrollmentStatus::Enrolled,
            joined_at: ts(),
        }
    }

    #[tokio::test]
    async fn enroll_creates_a_row() {
        let user_id = Uuid::new_v4();
        let target = sample_course();
        let created = sample_enrollment(user_id, target.id);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![target.clone()]])
            .append_query_results([Vec::<enrollment::Model>::new()])
            .append_query_results([vec![created.clone()]])
            .into_connection();

        let outcome = EnrollmentService::enroll(&db, user_id, target.id).await.unwrap();
        assert_eq!(outcome, EnrollOutcome::Enrolled(created));
    }

    #[tokio::test]
    async fn enroll_twice_is_a_noop_success() {
        let user_id = Uuid::new_v4();
        let target = sample_course();
        let existing = sample_enrollment(user_id, target.id);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![target.clone()]])
            .append_query_results([vec![existing]])
            .into_connection();

        let outcome = EnrollmentService::enroll(&db, user_id, target.id).await.unwrap();
        assert_eq!(outcome, EnrollOutcome::AlreadyEnrolled);
    }

    #[tokio::test]
    async fn enroll_into_unknown_course_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<course::Model>::new()])
            .into_connection();

        let err = EnrollmentService::enroll(&db, Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "course" }));
    }

    #[tokio::test]
    async fn drop_without_enrollment_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<enrollment::Model>::new()])
            .into_connection();

        let err = EnrollmentService::drop(&db, Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "enrollment" }));
    }

    #[tokio::test]
    async fn drop_deletes_the_row() {
        let user_id = Uuid::new_v4();
        let course_id = Uuid::new_v4();
        let existing = sample_enrollment(user_id, course_id);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        EnrollmentService::drop(&db, user_id, course_id).await.unwrap();
    }
}

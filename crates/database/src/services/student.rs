use chrono::Utc;
use models::{normalize, role::UserRole, status::StudentStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    entities::{course, department, student},
    error::{StoreError, StoreResult},
    services::user::{NewUser, UserService},
};

pub struct StudentInput {
    pub name: String,
    pub email: String,
    pub roll_number: String,
    pub department_id: Uuid,
    pub course_id: Uuid,
    pub year: i16,
    pub semester: i16,
    pub status: StudentStatus,
}

pub struct StudentService;

impl StudentService {
    const NATURAL_KEYS: &'static [&'static str] = &["email", "roll_number"];

    pub async fn list(db: &DatabaseConnection) -> StoreResult<Vec<student::Model>> {
        Ok(student::Entity::find()
            .order_by_asc(student::Column::Name)
            .all(db)
            .await?)
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> StoreResult<student::Model> {
        student::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| StoreError::not_found("student"))
    }

    /// `login_password`, when given, lazily creates a linked login account
    /// with role `student` and the student's email.
    pub async fn create(
        db: &DatabaseConnection,
        input: StudentInput,
        login_password: Option<String>,
    ) -> StoreResult<student::Model> {
        let (name, email, roll_number) = Self::validated(&input)?;
        Self::ensure_unique(db, &email, &roll_number, None).await?;
        Self::check_references(db, &input).await?;

        let user_id = match login_password {
            Some(password) => {
                let account = UserService::create(
                    db,
                    NewUser {
                        name: name.clone(),
                        email: email.clone(),
                        password,
                        role: UserRole::Student,
                        is_active: true,
                    },
                )
                .await?;
                Some(account.id)
            }
            None => None,
        };

        let now = Utc::now().naive_utc();
        let model = student::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            email: Set(email),
            roll_number: Set(roll_number),
            department_id: Set(input.department_id),
            course_id: Set(input.course_id),
            year: Set(input.year),
            semester: Set(input.semester),
            status: Set(input.status),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
        };
        model
            .insert(db)
            .await
            .map_err(|err| StoreError::from_write(err, "student", Self::NATURAL_KEYS))
    }

    /// `login_password` creates the linked account only when the student
    /// does not have one yet; an existing link is left as-is.
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        input: StudentInput,
        login_password: Option<String>,
    ) -> StoreResult<student::Model> {
        let existing = Self::get(db, id).await?;
        let (name, email, roll_number) = Self::validated(&input)?;
        Self::ensure_unique(db, &email, &roll_number, Some(id)).await?;
        Self::check_references(db, &input).await?;

        let user_id = match (existing.user_id, login_password) {
            (Some(linked), _) => Some(linked),
            (None, Some(password)) => {
                let account = UserService::create(
                    db,
                    NewUser {
                        name: name.clone(),
                        email: email.clone(),
                        password,
                        role: UserRole::Student,
                        is_active: true,
                    },
                )
                .await?;
                Some(account.id)
            }
            (None, None) => None,
        };

        let mut active = existing.into_active_model();
        active.name = Set(name);
        active.email = Set(email);
        active.roll_number = Set(roll_number);
        active.department_id = Set(input.department_id);
        active.course_id = Set(input.course_id);
        active.year = Set(input.year);
        active.semester = Set(input.semester);
        active.status = Set(input.status);
        active.user_id = Set(user_id);
        active.updated_at = Set(Utc::now().naive_utc());
        active
            .update(db)
            .await
            .map_err(|err| StoreError::from_write(err, "student", Self::NATURAL_KEYS))
    }

    /// Nothing references students, so deletion is unguarded. A linked
    /// login account is kept; deactivating it is a separate admin action.
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> StoreResult<()> {
        Self::get(db, id).await?;
        student::Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }

    fn validated(input: &StudentInput) -> StoreResult<(String, String, String)> {
        let name = input.name.trim().to_owned();
        let email = normalize::email(&input.email);
        let roll_number = normalize::roll_number(&input.roll_number);
        if name.is_empty() || email.is_empty() || roll_number.is_empty() {
            return Err(StoreError::validation(
                "student name, email, and roll number are required",
            ));
        }
        if input.year < 1 {
            return Err(StoreError::validation("student year must be at least 1"));
        }
        if input.semester < 1 {
            return Err(StoreError::validation(
                "student semester must be at least 1",
            ));
        }
        Ok((name, email, roll_number))
    }

    async fn ensure_unique(
        db: &DatabaseConnection,
        email: &str,
        roll_number: &str,
        exclude: Option<Uuid>,
    ) -> StoreResult<()> {
        let mut query = student::Entity::find().filter(
            Condition::any()
                .add(student::Column::Email.eq(email))
                .add(student::Column::RollNumber.eq(roll_number)),
        );
        if let Some(id) = exclude {
            query = query.filter(student::Column::Id.ne(id));
        }

        if let Some(existing) = query.one(db).await? {
            let mut fields = Vec::new();
            if existing.email == email {
                fields.push("email");
            }
            if existing.roll_number == roll_number {
                fields.push("roll_number");
            }
            return Err(StoreError::duplicate("student", &fields));
        }
        Ok(())
    }

    async fn check_references(db: &DatabaseConnection, input: &StudentInput) -> StoreResult<()> {
        department::Entity::find_by_id(input.department_id)
            .one(db)
            .await?
            .map(|_| ())
            .ok_or_else(|| StoreError::missing("student", "department"))?;
        course::Entity::find_by_id(input.course_id)
            .one(db)
            .await?
            .map(|_| ())
            .ok_or_else(|| StoreError::missing("student", "course"))
    }
}

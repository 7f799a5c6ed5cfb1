use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use models::{normalize, role::UserRole};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    entities::user,
    error::{StoreError, StoreResult},
};

pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub is_active: bool,
}

pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    /// When set, the password is re-hashed under the same rules as create.
    pub password: Option<String>,
}

const MIN_PASSWORD_LEN: usize = 6;

pub struct UserService;

impl UserService {
    const NATURAL_KEYS: &'static [&'static str] = &["email"];

    pub async fn list(db: &DatabaseConnection) -> StoreResult<Vec<user::Model>> {
        Ok(user::Entity::find()
            .order_by_asc(user::Column::Name)
            .all(db)
            .await?)
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> StoreResult<user::Model> {
        user::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| StoreError::not_found("user"))
    }

    pub async fn create(db: &DatabaseConnection, input: NewUser) -> StoreResult<user::Model> {
        let name = input.name.trim().to_owned();
        let email = normalize::email(&input.email);
        if name.is_empty() || email.is_empty() {
            return Err(StoreError::validation("user name and email are required"));
        }
        let password_hash = hash_password(&input.password)?;
        Self::ensure_unique(db, &email, None).await?;

        let now = Utc::now().naive_utc();
        let model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            email: Set(email),
            password_hash: Set(password_hash),
            role: Set(input.role),
            is_active: Set(input.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        };
        model
            .insert(db)
            .await
            .map_err(|err| StoreError::from_write(err, "user", Self::NATURAL_KEYS))
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        input: UserUpdate,
    ) -> StoreResult<user::Model> {
        let existing = Self::get(db, id).await?;
        let name = input.name.trim().to_owned();
        let email = normalize::email(&input.email);
        if name.is_empty() || email.is_empty() {
            return Err(StoreError::validation("user name and email are required"));
        }
        Self::ensure_unique(db, &email, Some(id)).await?;

        let mut active = existing.into_active_model();
        active.name = Set(name);
        active.email = Set(email);
        active.role = Set(input.role);
        active.is_active = Set(input.is_active);
        if let Some(password) = input.password {
            active.password_hash = Set(hash_password(&password)?);
        }
        active.updated_at = Set(Utc::now().naive_utc());
        active
            .update(db)
            .await
            .map_err(|err| StoreError::from_write(err, "user", Self::NATURAL_KEYS))
    }

    /// Credential check hook for the external session provider. The stored
    /// hash is verified in constant time; the same error covers an unknown
    /// email and a wrong password.
    pub async fn verify_credentials(
        db: &DatabaseConnection,
        email: &str,
        password: &str,
    ) -> StoreResult<user::Model> {
        let found = user::Entity::find()
            .filter(user::Column::Email.eq(normalize::email(email)))
            .one(db)
            .await?;
        let Some(account) = found else {
            return Err(StoreError::validation("invalid email or password"));
        };
        if !verify_password(&account.password_hash, password) {
            return Err(StoreError::validation("invalid email or password"));
        }
        if !account.is_active {
            return Err(StoreError::validation("account is disabled"));
        }
        Ok(account)
    }

    async fn ensure_unique(
        db: &DatabaseConnection,
        email: &str,
        exclude: Option<Uuid>,
    ) -> StoreResult<()> {
        let mut query = user::Entity::find().filter(user::Column::Email.eq(email));
        if let Some(id) = exclude {
            query = query.filter(user::Column::Id.ne(id));
        }
        if query.one(db).await?.is_some() {
            return Err(StoreError::duplicate("user", &["email"]));
        }
        Ok(())
    }
}

fn hash_password(plain: &str) -> StoreResult<String> {
    if plain.chars().count() < MIN_PASSWORD_LEN {
        return Err(StoreError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| StoreError::Db(DbErr::Custom(format!("password hashing failed: {err}"))))
}

fn verify_password(hash: &str, candidate: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn hashes_verify_and_never_echo_plaintext() {
        let hash = hash_password("correct horse").unwrap();
        assert_ne!(hash, "correct horse");
        assert!(verify_password(&hash, "correct horse"));
        assert!(!verify_password(&hash, "incorrect horse"));
    }

    #[test]
    fn short_passwords_are_rejected() {
        let err = hash_password("abc12").unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn garbage_hashes_never_verify() {
        assert!(!verify_password("not-a-phc-string", "anything"));
    }

    #[tokio::test]
    async fn create_rejects_short_password_before_any_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let err = UserService::create(
            &db,
            NewUser {
                name: "Jane Doe".to_owned(),
                email: "jane@example.edu".to_owned(),
                password: "abc12".to_owned(),
                role: UserRole::Student,
                is_active: true,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email_case_insensitively() {
        let existing = user::Model {
            id: Uuid::new_v4(),
            name: "Jane Doe".to_owned(),
            email: "jane@example.edu".to_owned(),
            password_hash: hash_password("hunter2secret").unwrap(),
            role: UserRole::Student,
            is_active: true,
            created_at: chrono::NaiveDate::from_ymd_opt(2025, 9, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            updated_at: chrono::NaiveDate::from_ymd_opt(2025, 9, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing]])
            .into_connection();

        let err = UserService::create(
            &db,
            NewUser {
                name: "Jane D.".to_owned(),
                email: "Jane@Example.EDU".to_owned(),
                password: "hunter2secret".to_owned(),
                role: UserRole::Student,
                is_active: true,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));
    }
}

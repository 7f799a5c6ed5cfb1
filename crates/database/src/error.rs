use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Caller-visible outcomes of a store operation. Everything except [`Db`]
/// is recoverable and maps to a user-facing message at the request layer.
///
/// [`Db`]: StoreError::Db
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("a {entity} with the same {fields} already exists")]
    DuplicateKey { entity: &'static str, fields: String },

    #[error("{entity} references a {reference} that does not exist")]
    MissingReference {
        entity: &'static str,
        reference: &'static str,
    },

    #[error("module department does not match the course department")]
    ReferenceMismatch,

    #[error("{entity} cannot be deleted while {dependents} depend on it")]
    HasDependents {
        entity: &'static str,
        dependents: &'static str,
    },

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl StoreError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    pub fn duplicate(entity: &'static str, fields: &[&str]) -> Self {
        Self::DuplicateKey {
            entity,
            fields: fields.join(", "),
        }
    }

    pub fn missing(entity: &'static str, reference: &'static str) -> Self {
        Self::MissingReference { entity, reference }
    }

    pub fn dependents(entity: &'static str, dependents: &'static str) -> Self {
        Self::HasDependents { entity, dependents }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Map a failed write. The unique index is the authoritative uniqueness
    /// guard: a violation naming one of the entity's natural keys becomes
    /// [`DuplicateKey`]; any other failure stays a storage error.
    ///
    /// [`DuplicateKey`]: StoreError::DuplicateKey
    pub fn from_write(err: DbErr, entity: &'static str, keys: &[&'static str]) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(constraint)) = err.sql_err() {
            if let Some(field) = keys.iter().find(|key| constraint.contains(*key)) {
                return Self::DuplicateKey {
                    entity,
                    fields: (*field).to_owned(),
                };
            }
        }
        Self::Db(err)
    }
}

/// Whether a write failed on a unique index.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

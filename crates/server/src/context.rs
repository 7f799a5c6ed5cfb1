use axum::http::request::Parts;
use axum::extract::FromRequestParts;
use models::role::UserRole;
use uuid::Uuid;

use crate::error::ApiError;

/// Identity and capabilities of the caller, as asserted by the
/// authenticating gateway in front of this service. Always passed
/// explicitly into the operations that need it, never held as ambient
/// state.
#[derive(Debug, Clone)]
pub struct RequesterContext {
    pub user_id: Uuid,
    pub role: UserRole,
    pub is_active: bool,
}

impl RequesterContext {
    pub fn require_active(&self) -> Result<(), ApiError> {
        if !self.is_active {
            return Err(ApiError::Forbidden);
        }
        Ok(())
    }

    pub fn require_admin(&self) -> Result<(), ApiError> {
        self.require_active()?;
        if self.role != UserRole::Admin {
            return Err(ApiError::Forbidden);
        }
        Ok(())
    }

    pub fn require_student(&self) -> Result<(), ApiError> {
        self.require_active()?;
        if self.role != UserRole::Student {
            return Err(ApiError::Forbidden);
        }
        Ok(())
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|value| value.to_str().ok())
}

impl<S> FromRequestParts<S> for RequesterContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header(parts, "x-user-id")
            .and_then(|raw| raw.parse::<Uuid>().ok())
            .ok_or(ApiError::Unauthorized)?;
        let role = header(parts, "x-user-role")
            .and_then(|raw| raw.parse::<UserRole>().ok())
            .ok_or(ApiError::Unauthorized)?;
        // absent means the gateway did not flag the account as disabled
        let is_active = header(parts, "x-user-active") != Some("false");

        Ok(Self {
            user_id,
            role,
            is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(role: UserRole, is_active: bool) -> RequesterContext {
        RequesterContext {
            user_id: Uuid::new_v4(),
            role,
            is_active,
        }
    }

    #[test]
    fn admin_gate_rejects_students_and_inactive_admins() {
        assert!(ctx(UserRole::Admin, true).require_admin().is_ok());
        assert!(ctx(UserRole::Student, true).require_admin().is_err());
        assert!(ctx(UserRole::Admin, false).require_admin().is_err());
    }

    #[test]
    fn student_gate_rejects_staff() {
        assert!(ctx(UserRole::Student, true).require_student().is_ok());
        assert!(ctx(UserRole::Staff, true).require_student().is_err());
    }
}

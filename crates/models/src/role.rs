use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Role attached to a user account. Stored as a string column.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
    EnumString,
    Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "student")]
    Student,
    #[sea_orm(string_value = "staff")]
    Staff,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_wire_names() {
        assert_eq!(UserRole::from_str("admin").unwrap(), UserRole::Admin);
        assert_eq!(UserRole::from_str("student").unwrap(), UserRole::Student);
        assert_eq!(UserRole::from_str("staff").unwrap(), UserRole::Staff);
        assert!(UserRole::from_str("superuser").is_err());
    }

    #[test]
    fn displays_as_wire_names() {
        assert_eq!(UserRole::Admin.to_string(), "admin");
        assert_eq!(UserRole::Student.to_string(), "student");
    }
}

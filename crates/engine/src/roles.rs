//! Caller roles.
//!
//! Every caller identity owns exactly one row in `user_roles`. The row is
//! created with [`UserRole::User`] the first time the identity is observed.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    #[default]
    User,
    Guest,
}

impl UserRole {
    /// Returns the canonical role string stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Guest => "guest",
        }
    }

    /// Guests are treated as unauthenticated for record and profile access.
    pub fn is_member(self) -> bool {
        matches!(self, Self::Admin | Self::User)
    }
}

impl TryFrom<&str> for UserRole {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "guest" => Ok(Self::Guest),
            other => Err(EngineError::InvalidRole(format!("invalid user role: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub identity: String,
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn new(identity: &str, role: UserRole) -> Self {
        Self {
            identity: ActiveValue::Set(identity.to_string()),
            role: ActiveValue::Set(role.as_str().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_roles() {
        assert_eq!(UserRole::try_from("admin"), Ok(UserRole::Admin));
        assert_eq!(UserRole::try_from("user"), Ok(UserRole::User));
        assert_eq!(UserRole::try_from("guest"), Ok(UserRole::Guest));
    }

    #[test]
    fn rejects_unknown_role() {
        assert_eq!(
            UserRole::try_from("owner"),
            Err(EngineError::InvalidRole(
                "invalid user role: owner".to_string()
            ))
        );
    }

    #[test]
    fn default_role_is_user() {
        assert_eq!(UserRole::default(), UserRole::User);
        assert!(UserRole::User.is_member());
        assert!(UserRole::Admin.is_member());
        assert!(!UserRole::Guest.is_member());
    }
}

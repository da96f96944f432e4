//! Registered platform user.
//!
//! Users are identified by their email address, which is also the identity
//! carried inside of session tokens. Privileges are derived from the stored
//! [`Role`] on every privileged request, so role changes take effect
//! without re-issuing tokens.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique user identifier.
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Unique email address.
    #[sea_orm(unique)]
    pub email: String,

    /// Profile photo URL.
    pub photo_url: Option<String>,

    /// Platform role.
    pub role: Role,

    /// University (or club) a moderator is responsible for.
    pub moderator_for: Option<String>,

    /// Registration timestamp.
    pub created_at: TimeDateTime,
}

/// User role.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "i16", db_type = "Integer")]
pub enum Role {
    #[sea_orm(num_value = 0)]
    Student,
    #[sea_orm(num_value = 1)]
    Moderator,
    #[sea_orm(num_value = 2)]
    Admin,
}

impl Role {
    /// Parse a role that may be granted through the role management route.
    ///
    /// Administrator privileges can not be granted this way.
    pub fn assignable(value: &str) -> Option<Self> {
        match value {
            "Student" => Some(Role::Student),
            "Moderator" => Some(Role::Moderator),
            _ => None,
        }
    }

    /// Check if the role grants moderation privileges.
    pub fn is_moderator(&self) -> bool {
        matches!(self, Role::Moderator | Role::Admin)
    }

    /// Check if the role grants administrator privileges.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// User model relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

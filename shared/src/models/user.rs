//! User Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Actor role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Operation,
    #[default]
    Staff,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Operation => "OPERATION",
            Self::Staff => "STAFF",
        }
    }

    /// Trim + uppercase match. `None` for anything unrecognized.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "ADMIN" => Some(Self::Admin),
            "OPERATION" => Some(Self::Operation),
            "STAFF" => Some(Self::Staff),
            _ => None,
        }
    }

    /// ADMIN and OPERATION see every device and history row
    pub fn is_management(&self) -> bool {
        matches!(self, Self::Admin | Self::Operation)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Local id, unique within one fetch only
    pub id: String,
    pub employee_id: String,
    pub name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Create user payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub name: String,
    pub employee_id: String,
    pub role: UserRole,
}

/// Update user payload
///
/// `None` keeps the current value. The employee ID is the row key and
/// cannot change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: Option<String>,
    pub role: Option<UserRole>,
    pub avatar_url: Option<String>,
}

impl UserUpdate {
    pub fn apply(&self, user: &User) -> User {
        let mut updated = user.clone();
        if let Some(v) = &self.name {
            updated.name = v.clone();
        }
        if let Some(v) = self.role {
            updated.role = v;
        }
        if let Some(v) = &self.avatar_url {
            updated.avatar_url = if v.trim().is_empty() {
                None
            } else {
                Some(v.clone())
            };
        }
        updated
    }
}

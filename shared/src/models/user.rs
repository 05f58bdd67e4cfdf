//! User accounts and the role/permission policy

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Roles a user can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Administrator,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "Administrator",
            Role::User => "User",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Administrator" => Some(Role::Administrator),
            "User" => Some(Role::User),
            _ => None,
        }
    }

    /// Capability check: may this role perform `action` on `resource`?
    ///
    /// Administrators may do everything. Regular users may read everything
    /// except user administration, register movements, build and export
    /// quotations, generate reports, and dismiss alerts; all other mutation
    /// is administrative.
    pub fn permits(&self, resource: Resource, action: Action) -> bool {
        match self {
            Role::Administrator => true,
            Role::User => match (resource, action) {
                (Resource::User, _) => false,
                (_, Action::View) => true,
                (Resource::Movement, Action::Create) => true,
                (Resource::Quotation, Action::Create | Action::Export) => true,
                (Resource::Report, Action::Create | Action::Export) => true,
                (Resource::Alert, Action::Dismiss) => true,
                _ => false,
            },
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resources the API exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Product,
    Category,
    Supplier,
    Customer,
    Movement,
    Alert,
    Quotation,
    Report,
    User,
    Dashboard,
}

/// Actions that can be performed on resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
    Dismiss,
    Export,
}

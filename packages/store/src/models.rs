//! # Domain models shared by the client, the guard and the provider
//!
//! These types are `Serialize + Deserialize` so they can cross the server/client
//! boundary via Dioxus server functions unchanged.
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Principal`] | The authenticated identity handed out by the identity provider. Never mutated by the application. |
//! | [`Role`] | The closed set of roles a principal can hold. |
//! | [`RoleAssignment`] | A stored row binding a principal to a [`Role`]. |
//! | [`Profile`] | Per-citizen display name and reward counters, maintained by the provider. |
//! | [`SignUpFields`] | The profile fields a user fills in on the sign-up form. |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Authenticated identity returned by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub email: String,
}

/// Role held by a principal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Citizen,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Citizen => "citizen",
            Role::Admin => "admin",
        }
    }

    /// Effective role for a principal given its (possibly absent) role row.
    ///
    /// Citizens created without an explicit row are citizens; this is the only
    /// place that inference is made.
    pub fn resolve(assignment: Option<&RoleAssignment>) -> Role {
        assignment.map(|a| a.role).unwrap_or(Role::Citizen)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored role string is not one of the known roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "citizen" => Ok(Role::Citizen),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A role row as stored by the data provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub user_id: String,
    pub role: Role,
}

/// Citizen profile. Counters are only ever changed by the provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Same value as the owning [`Principal::id`].
    pub id: String,
    pub name: Option<String>,
    pub points: u32,
    pub total_reports: u32,
}

impl Profile {
    /// Name to greet the user with, or `fallback` when none was given.
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => fallback,
        }
    }
}

/// Profile fields collected by the sign-up form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpFields {
    pub name: String,
    pub role: Role,
}

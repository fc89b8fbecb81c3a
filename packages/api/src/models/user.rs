//! # Account and profile rows
//!
//! [`Account`] and [`ProfileRow`] (server only) are the `users` and `profiles`
//! rows as loaded by sqlx. They project into the client-safe
//! [`store::Principal`] and [`store::Profile`]; the password hash and timestamps
//! never leave the server.
//!
//! [`AuthReply`] is what the sign-in and sign-up server functions return. A
//! credential rejection is an ordinary answer (`Rejected`), not a
//! `ServerFnError`, so the client can tell it apart from a failed call.

use serde::{Deserialize, Serialize};
use store::Principal;

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use store::Profile;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Row of the `users` table.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl Account {
    pub fn to_principal(&self) -> Principal {
        Principal {
            id: self.id.to_string(),
            email: self.email.clone(),
        }
    }
}

/// Row of the `profiles` table.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub points: i32,
    pub total_reports: i32,
}

#[cfg(feature = "server")]
impl ProfileRow {
    pub fn to_profile(&self) -> Profile {
        Profile {
            id: self.id.to_string(),
            name: self.name.clone(),
            points: u32::try_from(self.points).unwrap_or(0),
            total_reports: u32::try_from(self.total_reports).unwrap_or(0),
        }
    }
}

/// Outcome of a sign-in or sign-up request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AuthReply {
    Accepted(Principal),
    /// Refused by the provider, with the message to show the user.
    Rejected(String),
}

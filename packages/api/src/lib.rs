//! # API crate — the identity and data provider for Fix Karachi
//!
//! Every public `async fn` in this file is a Dioxus server function, annotated
//! with `#[get(...)]` or `#[post(...)]` and compiled twice: once with the real
//! logic (behind `#[cfg(feature = "server")]`, delegating to [`provider`]) and
//! once as a client stub that forwards the call over HTTP.
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | `server` | Session key, Argon2id password hashing |
//! | [`client`] | — | [`ApiBackend`], the `store::Backend` implemented over these server functions |
//! | [`db`] | `server` | PostgreSQL pool (lazy `OnceCell` singleton) |
//! | [`models`] | — | `users`/`profiles` rows and the [`AuthReply`] wire type |
//! | [`settings`] | `server` | Layered server settings (`config` crate) |
//!
//! ## Server functions
//!
//! - **Identity**: `get_current_principal`, `sign_in`, `sign_up`, `sign_out`
//! - **Data**: `query_role`, `query_profile`, `insert_role_assignment`, `citizen_count`
//! - **Configuration**: `app_config`

use dioxus::prelude::*;
use store::{AppConfig, Principal, Profile, Role, RoleAssignment, SignUpFields};

pub mod auth;
pub mod client;
pub mod db;
#[cfg(feature = "server")]
pub mod error;
pub mod models;
#[cfg(feature = "server")]
mod provider;
#[cfg(feature = "server")]
pub mod settings;

pub use client::ApiBackend;
pub use models::AuthReply;

/// Get the principal of the current session.
#[cfg(feature = "server")]
#[get("/api/auth/principal", session: tower_sessions::Session)]
pub async fn get_current_principal() -> Result<Option<Principal>, ServerFnError> {
    provider::current_principal(&session)
        .await
        .map_err(|e| e.into_server_error())
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/principal")]
pub async fn get_current_principal() -> Result<Option<Principal>, ServerFnError> {
    Ok(None)
}

/// Sign in with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/sign-in", session: tower_sessions::Session)]
pub async fn sign_in(email: String, password: String) -> Result<AuthReply, ServerFnError> {
    provider::sign_in(&session, &email, &password)
        .await
        .map_err(|e| e.into_server_error())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/sign-in")]
pub async fn sign_in(email: String, password: String) -> Result<AuthReply, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create an account with its profile and start a session for it.
#[cfg(feature = "server")]
#[post("/api/auth/sign-up", session: tower_sessions::Session)]
pub async fn sign_up(
    email: String,
    password: String,
    fields: SignUpFields,
) -> Result<AuthReply, ServerFnError> {
    let config = &settings::current()
        .map_err(|e| ServerFnError::new(e.to_string()))?
        .app;
    provider::sign_up(&session, config, &email, &password, &fields)
        .await
        .map_err(|e| e.into_server_error())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/sign-up")]
pub async fn sign_up(
    email: String,
    password: String,
    fields: SignUpFields,
) -> Result<AuthReply, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// End the current session.
#[cfg(feature = "server")]
#[post("/api/auth/sign-out", session: tower_sessions::Session)]
pub async fn sign_out() -> Result<(), ServerFnError> {
    provider::sign_out(&session)
        .await
        .map_err(|e| e.into_server_error())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/sign-out")]
pub async fn sign_out() -> Result<(), ServerFnError> {
    Ok(())
}

/// Role row of a principal, if one was stored.
#[cfg(feature = "server")]
#[get("/api/roles/:principal_id", session: tower_sessions::Session)]
pub async fn query_role(principal_id: String) -> Result<Option<RoleAssignment>, ServerFnError> {
    provider::query_role(&session, &principal_id)
        .await
        .map_err(|e| e.into_server_error())
}

#[cfg(not(feature = "server"))]
#[get("/api/roles/:principal_id")]
pub async fn query_role(principal_id: String) -> Result<Option<RoleAssignment>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Profile of a principal.
#[cfg(feature = "server")]
#[get("/api/profiles/:principal_id", session: tower_sessions::Session)]
pub async fn query_profile(principal_id: String) -> Result<Option<Profile>, ServerFnError> {
    provider::query_profile(&session, &principal_id)
        .await
        .map_err(|e| e.into_server_error())
}

#[cfg(not(feature = "server"))]
#[get("/api/profiles/:principal_id")]
pub async fn query_profile(principal_id: String) -> Result<Option<Profile>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Store a role row for the signed-in principal.
#[cfg(feature = "server")]
#[post("/api/roles", session: tower_sessions::Session)]
pub async fn insert_role_assignment(principal_id: String, role: Role) -> Result<(), ServerFnError> {
    provider::insert_role_assignment(&session, &principal_id, role)
        .await
        .map_err(|e| e.into_server_error())
}

#[cfg(not(feature = "server"))]
#[post("/api/roles")]
pub async fn insert_role_assignment(principal_id: String, role: Role) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Number of registered citizens. Admins only.
#[cfg(feature = "server")]
#[get("/api/admin/citizen-count", session: tower_sessions::Session)]
pub async fn citizen_count() -> Result<u64, ServerFnError> {
    provider::citizen_count(&session)
        .await
        .map_err(|e| e.into_server_error())
}

#[cfg(not(feature = "server"))]
#[get("/api/admin/citizen-count")]
pub async fn citizen_count() -> Result<u64, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Client-visible application configuration.
#[cfg(feature = "server")]
#[get("/api/config")]
pub async fn app_config() -> Result<AppConfig, ServerFnError> {
    let settings = settings::current().map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok(settings.app.clone())
}

#[cfg(not(feature = "server"))]
#[get("/api/config")]
pub async fn app_config() -> Result<AppConfig, ServerFnError> {
    Ok(AppConfig::default())
}

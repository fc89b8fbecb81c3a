//! Provider-side failures and their mapping onto `ServerFnError`.

use dioxus::prelude::ServerFnError;
use store::models::UnknownRole;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Not allowed")]
    Forbidden,
    #[error("invalid principal id: {0}")]
    InvalidId(String),
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error(transparent)]
    Role(#[from] UnknownRole),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl ProviderError {
    /// Log and convert for the server function boundary.
    pub fn into_server_error(self) -> ServerFnError {
        match &self {
            ProviderError::NotAuthenticated | ProviderError::Forbidden => {
                tracing::warn!("Rejected provider call: {}", self)
            }
            _ => tracing::error!("Provider call failed: {}", self),
        }
        ServerFnError::new(self.to_string())
    }
}

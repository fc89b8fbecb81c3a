//! Error types for provider calls and the authentication flows.

use thiserror::Error;

/// The provider could not answer: network trouble or a server-side failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("network error: {0}")]
    Network(String),
    #[error("provider error: {0}")]
    Provider(String),
}

/// Failure of a sign-in or sign-up attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Rejected by the identity provider, carrying its message text.
    #[error("{0}")]
    Authentication(String),
    /// Rejected before reaching the provider. Holds a localization key.
    #[error("invalid input: {0}")]
    Validation(&'static str),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl AuthError {
    /// Text shown in the error notification.
    ///
    /// Validation errors are translated with `translate`; provider messages are
    /// shown verbatim.
    pub fn user_message(&self, translate: impl Fn(&str) -> String) -> String {
        match self {
            AuthError::Authentication(message) => message.clone(),
            AuthError::Validation(key) => translate(key),
            AuthError::Backend(e) => e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let rejected = AuthError::Authentication("Invalid login credentials".to_string());
        assert_eq!(rejected.user_message(|k| k.to_uppercase()), "Invalid login credentials");

        let invalid = AuthError::Validation("auth.invalidEmail");
        assert_eq!(invalid.user_message(|k| format!("<{k}>")), "<auth.invalidEmail>");

        let offline: AuthError = BackendError::Network("timed out".to_string()).into();
        assert_eq!(offline.user_message(|k| k.to_string()), "network error: timed out");
    }
}

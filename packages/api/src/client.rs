//! [`store::Backend`] over the server functions of this crate.
//!
//! A failed server function call becomes [`BackendError::Provider`]; a
//! credential rejection arrives as [`AuthReply::Rejected`] and becomes
//! [`AuthError::Authentication`] with the provider's message.

use dioxus::prelude::ServerFnError;
use store::{
    AuthError, Backend, BackendError, Lookup, Principal, Profile, Role, RoleAssignment,
    SignUpFields,
};

use crate::models::AuthReply;

/// The provider as seen from the UI.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ApiBackend;

fn call_failed(e: ServerFnError) -> BackendError {
    BackendError::Provider(e.to_string())
}

fn into_principal(reply: AuthReply) -> Result<Principal, AuthError> {
    match reply {
        AuthReply::Accepted(principal) => Ok(principal),
        AuthReply::Rejected(message) => Err(AuthError::Authentication(message)),
    }
}

impl Backend for ApiBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, AuthError> {
        let reply = crate::sign_in(email.to_string(), password.to_string())
            .await
            .map_err(call_failed)?;
        into_principal(reply)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        fields: &SignUpFields,
    ) -> Result<Principal, AuthError> {
        let reply = crate::sign_up(email.to_string(), password.to_string(), fields.clone())
            .await
            .map_err(call_failed)?;
        into_principal(reply)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        crate::sign_out().await.map_err(call_failed)
    }

    async fn current_principal(&self) -> Lookup<Principal> {
        crate::get_current_principal().await.map_err(call_failed)
    }

    async fn query_role(&self, principal_id: &str) -> Lookup<RoleAssignment> {
        crate::query_role(principal_id.to_string())
            .await
            .map_err(call_failed)
    }

    async fn query_profile(&self, principal_id: &str) -> Lookup<Profile> {
        crate::query_profile(principal_id.to_string())
            .await
            .map_err(call_failed)
    }

    async fn insert_role_assignment(
        &self,
        principal_id: &str,
        role: Role,
    ) -> Result<(), BackendError> {
        crate::insert_role_assignment(principal_id.to_string(), role)
            .await
            .map_err(call_failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_reply_keeps_provider_message() {
        let err = into_principal(AuthReply::Rejected("User already registered".to_string()))
            .unwrap_err();
        assert_eq!(
            err,
            AuthError::Authentication("User already registered".to_string())
        );
    }

    #[test]
    fn test_accepted_reply() {
        let principal = Principal {
            id: "7f1c".to_string(),
            email: "a@example.com".to_string(),
        };
        assert_eq!(
            into_principal(AuthReply::Accepted(principal.clone())),
            Ok(principal)
        );
    }
}

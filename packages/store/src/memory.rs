use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::backend::{Backend, Lookup};
use crate::error::{AuthError, BackendError};
use crate::models::{Principal, Profile, Role, RoleAssignment, SignUpFields};

#[derive(Debug, Default)]
struct State {
    /// email -> (principal, password)
    accounts: HashMap<String, (Principal, String)>,
    roles: HashMap<String, Role>,
    profiles: HashMap<String, Profile>,
    current: Option<Principal>,
    role_inserts: Vec<RoleAssignment>,
    next_id: u64,
    offline: bool,
}

/// In-memory Backend for tests and offline development.
///
/// Messages mirror the hosted identity provider so the UI behaves the same
/// against either backend. Like the provider, an admin sign-up stores its
/// role row together with the account.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every call fails with [`BackendError::Network`].
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    /// Every `insert_role_assignment` call received, in order.
    pub fn role_inserts(&self) -> Vec<RoleAssignment> {
        self.state.lock().unwrap().role_inserts.clone()
    }

    /// Overwrite a stored profile, standing in for provider-side reward logic.
    pub fn put_profile(&self, profile: Profile) {
        self.state
            .lock()
            .unwrap()
            .profiles
            .insert(profile.id.clone(), profile);
    }

    fn check_online(state: &State) -> Result<(), BackendError> {
        if state.offline {
            Err(BackendError::Network("backend unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Backend for MemoryBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, AuthError> {
        let mut state = self.state.lock().unwrap();
        Self::check_online(&state)?;
        let principal = match state.accounts.get(email) {
            Some((principal, stored)) if stored == password => principal.clone(),
            _ => {
                return Err(AuthError::Authentication(
                    "Invalid login credentials".to_string(),
                ))
            }
        };
        state.current = Some(principal.clone());
        Ok(principal)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        fields: &SignUpFields,
    ) -> Result<Principal, AuthError> {
        let mut state = self.state.lock().unwrap();
        Self::check_online(&state)?;
        if state.accounts.contains_key(email) {
            return Err(AuthError::Authentication(
                "User already registered".to_string(),
            ));
        }
        state.next_id += 1;
        let principal = Principal {
            id: format!("user-{}", state.next_id),
            email: email.to_string(),
        };
        state.accounts.insert(
            email.to_string(),
            (principal.clone(), password.to_string()),
        );
        state.profiles.insert(
            principal.id.clone(),
            Profile {
                id: principal.id.clone(),
                name: Some(fields.name.clone()),
                points: 0,
                total_reports: 0,
            },
        );
        if fields.role == Role::Admin {
            state.roles.insert(principal.id.clone(), Role::Admin);
        }
        state.current = Some(principal.clone());
        Ok(principal)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        Self::check_online(&state)?;
        state.current = None;
        Ok(())
    }

    async fn current_principal(&self) -> Lookup<Principal> {
        let state = self.state.lock().unwrap();
        Self::check_online(&state)?;
        Ok(state.current.clone())
    }

    async fn query_role(&self, principal_id: &str) -> Lookup<RoleAssignment> {
        let state = self.state.lock().unwrap();
        Self::check_online(&state)?;
        Ok(state.roles.get(principal_id).map(|role| RoleAssignment {
            user_id: principal_id.to_string(),
            role: *role,
        }))
    }

    async fn query_profile(&self, principal_id: &str) -> Lookup<Profile> {
        let state = self.state.lock().unwrap();
        Self::check_online(&state)?;
        Ok(state.profiles.get(principal_id).cloned())
    }

    async fn insert_role_assignment(
        &self,
        principal_id: &str,
        role: Role,
    ) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        Self::check_online(&state)?;
        state.role_inserts.push(RoleAssignment {
            user_id: principal_id.to_string(),
            role,
        });
        match state.roles.get(principal_id) {
            Some(stored) if *stored == role => Ok(()),
            Some(_) => Err(BackendError::Provider(
                "role already assigned".to_string(),
            )),
            None => {
                state.roles.insert(principal_id.to_string(), role);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citizen(name: &str) -> SignUpFields {
        SignUpFields {
            name: name.to_string(),
            role: Role::Citizen,
        }
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let backend = MemoryBackend::new();
        let created = backend
            .sign_up("a@example.com", "secret1", &citizen("Ali"))
            .await
            .unwrap();
        backend.sign_out().await.unwrap();
        assert!(backend.current_principal().await.unwrap().is_none());

        let signed_in = backend.sign_in("a@example.com", "secret1").await.unwrap();
        assert_eq!(signed_in, created);
        assert_eq!(backend.current_principal().await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let backend = MemoryBackend::new();
        backend
            .sign_up("a@example.com", "secret1", &citizen("Ali"))
            .await
            .unwrap();
        let err = backend.sign_in("a@example.com", "nope").await.unwrap_err();
        assert_eq!(
            err,
            AuthError::Authentication("Invalid login credentials".to_string())
        );
    }

    #[tokio::test]
    async fn test_duplicate_sign_up_is_rejected() {
        let backend = MemoryBackend::new();
        backend
            .sign_up("a@example.com", "secret1", &citizen("Ali"))
            .await
            .unwrap();
        let err = backend
            .sign_up("a@example.com", "secret2", &citizen("Ali"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AuthError::Authentication("User already registered".to_string())
        );
    }

    #[tokio::test]
    async fn test_sign_up_creates_empty_profile() {
        let backend = MemoryBackend::new();
        let principal = backend
            .sign_up("a@example.com", "secret1", &citizen("Ali"))
            .await
            .unwrap();
        let profile = backend.query_profile(&principal.id).await.unwrap().unwrap();
        assert_eq!(profile.name.as_deref(), Some("Ali"));
        assert_eq!(profile.points, 0);
        assert_eq!(profile.total_reports, 0);
    }

    #[tokio::test]
    async fn test_role_rows() {
        let backend = MemoryBackend::new();
        assert!(backend.query_role("user-1").await.unwrap().is_none());

        backend
            .insert_role_assignment("user-1", Role::Admin)
            .await
            .unwrap();
        let row = backend.query_role("user-1").await.unwrap().unwrap();
        assert_eq!(row.role, Role::Admin);

        backend
            .insert_role_assignment("user-1", Role::Admin)
            .await
            .unwrap();
        assert!(backend
            .insert_role_assignment("user-1", Role::Citizen)
            .await
            .is_err());
        assert_eq!(backend.role_inserts().len(), 3);
        assert_eq!(
            backend.query_role("user-1").await.unwrap().map(|r| r.role),
            Some(Role::Admin)
        );
    }

    #[tokio::test]
    async fn test_admin_sign_up_stores_role_with_account() {
        let backend = MemoryBackend::new();
        let principal = backend
            .sign_up(
                "a@example.com",
                "secret1",
                &SignUpFields {
                    name: "Hina".to_string(),
                    role: Role::Admin,
                },
            )
            .await
            .unwrap();
        let row = backend.query_role(&principal.id).await.unwrap();
        assert_eq!(row.map(|r| r.role), Some(Role::Admin));
        assert!(backend.role_inserts().is_empty());
    }

    #[tokio::test]
    async fn test_offline_fails_every_call() {
        let backend = MemoryBackend::new();
        backend.set_offline(true);
        assert!(matches!(
            backend.current_principal().await,
            Err(BackendError::Network(_))
        ));
        assert!(matches!(
            backend.sign_in("a@example.com", "x").await,
            Err(AuthError::Backend(BackendError::Network(_)))
        ));
    }
}

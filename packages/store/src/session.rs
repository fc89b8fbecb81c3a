//! User-triggered authentication flows: sign in, sign up, sign out.
//!
//! None of these retry. A failure is returned to the caller, which shows it
//! and waits for the user to submit again.

use crate::backend::Backend;
use crate::config::AppConfig;
use crate::error::AuthError;
use crate::guard::Screen;
use crate::models::{Principal, Role, SignUpFields};

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Sign in and return the dashboard matching the principal's role.
pub async fn sign_in<B: Backend>(
    backend: &B,
    email: &str,
    password: &str,
) -> Result<Screen, AuthError> {
    let email = normalize_email(email);
    if email.is_empty() || !email.contains('@') {
        return Err(AuthError::Validation("auth.invalidEmail"));
    }

    let principal = backend.sign_in(&email, password).await?;
    let row = backend.query_role(&principal.id).await?;
    let role = Role::resolve(row.as_ref());
    tracing::info!("{} signed in as {}", principal.id, role);

    Ok(Screen::dashboard_for(role))
}

/// Create an account and record its role.
///
/// Admins always get a role row. Citizens only get one when
/// `auth.persist_citizen_role` is enabled; otherwise the missing row implies
/// the citizen role.
///
/// The provider already stores the row with the account, so the insert here
/// confirms it. If the confirmation fails the account still holds its role
/// and signing in reaches the right dashboard.
pub async fn sign_up<B: Backend>(
    backend: &B,
    config: &AppConfig,
    email: &str,
    password: &str,
    fields: &SignUpFields,
) -> Result<Principal, AuthError> {
    let email = normalize_email(email);
    let fields = SignUpFields {
        name: fields.name.trim().to_string(),
        role: fields.role,
    };

    if fields.name.is_empty() {
        return Err(AuthError::Validation("auth.nameRequired"));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(AuthError::Validation("auth.invalidEmail"));
    }
    if password.chars().count() < config.auth.min_password_length {
        return Err(AuthError::Validation("auth.passwordTooShort"));
    }

    let principal = backend.sign_up(&email, password, &fields).await?;

    let record_role = match fields.role {
        Role::Admin => true,
        Role::Citizen => config.auth.persist_citizen_role,
    };
    if record_role {
        backend
            .insert_role_assignment(&principal.id, fields.role)
            .await?;
    }
    tracing::info!("Created account {} ({})", principal.id, fields.role);

    Ok(principal)
}

/// End the session. Always lands on the login screen, even if the provider
/// call fails.
pub async fn sign_out<B: Backend>(backend: &B) -> Screen {
    if let Err(e) = backend.sign_out().await {
        tracing::warn!("Sign-out failed: {}", e);
    }
    Screen::Auth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Lookup;
    use crate::error::BackendError;
    use crate::guard::{check_access, Access};
    use crate::memory::MemoryBackend;
    use crate::models::{Profile, RoleAssignment};

    fn fields(name: &str, role: Role) -> SignUpFields {
        SignUpFields {
            name: name.to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_citizen_sign_up_inserts_no_role_row() {
        let backend = MemoryBackend::new();
        sign_up(
            &backend,
            &AppConfig::default(),
            "c@example.com",
            "secret1",
            &fields("Bilal", Role::Citizen),
        )
        .await
        .unwrap();
        assert!(backend.role_inserts().is_empty());
    }

    #[tokio::test]
    async fn test_admin_sign_up_inserts_one_admin_row() {
        let backend = MemoryBackend::new();
        let principal = sign_up(
            &backend,
            &AppConfig::default(),
            "a@example.com",
            "secret1",
            &fields("Hina", Role::Admin),
        )
        .await
        .unwrap();
        assert_eq!(
            backend.role_inserts(),
            vec![RoleAssignment {
                user_id: principal.id,
                role: Role::Admin,
            }]
        );
    }

    #[tokio::test]
    async fn test_persisted_citizen_role_opt_in() {
        let backend = MemoryBackend::new();
        let config = AppConfig::default().with_persisted_citizen_role(true);
        sign_up(
            &backend,
            &config,
            "c@example.com",
            "secret1",
            &fields("Bilal", Role::Citizen),
        )
        .await
        .unwrap();
        let inserts = backend.role_inserts();
        assert_eq!(inserts.len(), 1);
        assert_eq!(inserts[0].role, Role::Citizen);
    }

    #[tokio::test]
    async fn test_sign_up_validation_happens_before_provider_call() {
        let backend = MemoryBackend::new();
        backend.set_offline(true);
        let config = AppConfig::default();

        let err = sign_up(&backend, &config, "c@example.com", "pw", &fields(" ", Role::Citizen))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::Validation("auth.nameRequired"));

        let err = sign_up(&backend, &config, "nope", "secret1", &fields("Bilal", Role::Citizen))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::Validation("auth.invalidEmail"));

        let err = sign_up(&backend, &config, "c@example.com", "12345", &fields("Bilal", Role::Citizen))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::Validation("auth.passwordTooShort"));
    }

    #[tokio::test]
    async fn test_sign_up_conflict_surfaces_provider_message() {
        let backend = MemoryBackend::new();
        let config = AppConfig::default();
        sign_up(&backend, &config, "c@example.com", "secret1", &fields("Bilal", Role::Citizen))
            .await
            .unwrap();
        let err = sign_up(&backend, &config, "C@example.com ", "secret1", &fields("Bilal", Role::Admin))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AuthError::Authentication("User already registered".to_string())
        );
        assert!(backend.role_inserts().is_empty());
    }

    /// Provider whose role inserts never get through.
    struct UnreachableRoles(MemoryBackend);

    impl Backend for UnreachableRoles {
        async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, AuthError> {
            self.0.sign_in(email, password).await
        }

        async fn sign_up(
            &self,
            email: &str,
            password: &str,
            fields: &SignUpFields,
        ) -> Result<Principal, AuthError> {
            self.0.sign_up(email, password, fields).await
        }

        async fn sign_out(&self) -> Result<(), BackendError> {
            self.0.sign_out().await
        }

        async fn current_principal(&self) -> Lookup<Principal> {
            self.0.current_principal().await
        }

        async fn query_role(&self, principal_id: &str) -> Lookup<RoleAssignment> {
            self.0.query_role(principal_id).await
        }

        async fn query_profile(&self, principal_id: &str) -> Lookup<Profile> {
            self.0.query_profile(principal_id).await
        }

        async fn insert_role_assignment(
            &self,
            _principal_id: &str,
            _role: Role,
        ) -> Result<(), BackendError> {
            Err(BackendError::Provider("insert failed".to_string()))
        }
    }

    #[tokio::test]
    async fn test_failed_role_insert_keeps_admin_account_usable() {
        let backend = UnreachableRoles(MemoryBackend::new());
        let config = AppConfig::default();

        let err = sign_up(&backend, &config, "a@example.com", "secret1", &fields("Hina", Role::Admin))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AuthError::Backend(BackendError::Provider("insert failed".to_string()))
        );

        assert_eq!(
            sign_in(&backend, "a@example.com", "secret1").await,
            Ok(Screen::AdminDashboard)
        );
        assert!(matches!(
            check_access(&backend, Screen::AdminDashboard).await,
            Access::Authorized(_)
        ));
    }

    #[tokio::test]
    async fn test_sign_in_routes_by_role() {
        let backend = MemoryBackend::new();
        let config = AppConfig::default();
        sign_up(&backend, &config, "a@example.com", "secret1", &fields("Hina", Role::Admin))
            .await
            .unwrap();
        sign_up(&backend, &config, "c@example.com", "secret1", &fields("Bilal", Role::Citizen))
            .await
            .unwrap();

        assert_eq!(
            sign_in(&backend, " A@Example.com", "secret1").await,
            Ok(Screen::AdminDashboard)
        );
        assert_eq!(
            sign_in(&backend, "c@example.com", "secret1").await,
            Ok(Screen::CitizenDashboard)
        );
        assert_eq!(
            sign_in(&backend, "c@example.com", "wrong").await,
            Err(AuthError::Authentication(
                "Invalid login credentials".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_sign_in_provider_failure_is_reported() {
        let backend = MemoryBackend::new();
        backend.set_offline(true);
        assert!(matches!(
            sign_in(&backend, "c@example.com", "secret1").await,
            Err(AuthError::Backend(BackendError::Network(_)))
        ));
    }

    #[tokio::test]
    async fn test_logout_from_authorized_state() {
        let backend = MemoryBackend::new();
        sign_up(
            &backend,
            &AppConfig::default(),
            "c@example.com",
            "secret1",
            &fields("Bilal", Role::Citizen),
        )
        .await
        .unwrap();
        assert!(matches!(
            check_access(&backend, Screen::CitizenDashboard).await,
            Access::Authorized(_)
        ));

        let destination = sign_out(&backend).await;
        assert_eq!(destination.path(), "/auth");
        assert_eq!(backend.current_principal().await, Ok(None));
    }

    #[tokio::test]
    async fn test_logout_navigates_even_when_provider_fails() {
        let backend = MemoryBackend::new();
        backend.set_offline(true);
        assert_eq!(sign_out(&backend).await, Screen::Auth);
    }
}

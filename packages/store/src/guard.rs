//! # Session/role guard for protected screens
//!
//! Each activation of a protected screen starts in [`Access::Checking`] and
//! ends in exactly one of:
//!
//! - [`Access::Unauthenticated`]: no principal, or any lookup failed. Go to `/auth`.
//! - [`Access::WrongRole`]: signed in, but the screen belongs to the other role.
//!   Go to the dashboard of the role actually held.
//! - [`Access::Authorized`]: render the screen with the resolved [`Session`].
//!
//! A principal without a role row is treated as a citizen (see [`Role::resolve`]).
//!
//! Lookups are network round-trips, so a user can navigate away before one
//! finishes. [`Activations`] hands out a [`Ticket`] per activation and
//! [`check_activation`] drops results whose ticket has been superseded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::backend::Backend;
use crate::models::{Principal, Profile, Role};

/// Screens the router knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    Auth,
    CitizenDashboard,
    AdminDashboard,
}

impl Screen {
    pub fn path(&self) -> &'static str {
        match self {
            Screen::Auth => "/auth",
            Screen::CitizenDashboard => "/citizen-dashboard",
            Screen::AdminDashboard => "/admin-dashboard",
        }
    }

    /// Role required to view the screen, `None` for public screens.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Screen::Auth => None,
            Screen::CitizenDashboard => Some(Role::Citizen),
            Screen::AdminDashboard => Some(Role::Admin),
        }
    }

    pub fn dashboard_for(role: Role) -> Screen {
        match role {
            Role::Citizen => Screen::CitizenDashboard,
            Role::Admin => Screen::AdminDashboard,
        }
    }
}

/// What the guard knows about the signed-in user once access is granted.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub principal: Principal,
    pub role: Role,
    /// Loaded for citizens only. `None` when missing or when the lookup failed.
    pub profile: Option<Profile>,
}

/// Guard state for one screen activation.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Access {
    #[default]
    Checking,
    Unauthenticated,
    /// Signed in with the contained role, which the screen does not accept.
    WrongRole(Role),
    Authorized(Session),
}

impl Access {
    /// Where to navigate instead of rendering, if anywhere.
    pub fn redirect(&self) -> Option<Screen> {
        match self {
            Access::Unauthenticated => Some(Screen::Auth),
            Access::WrongRole(actual) => Some(Screen::dashboard_for(*actual)),
            Access::Checking | Access::Authorized(_) => None,
        }
    }
}

/// Resolve the current principal and its role. `None` on any failure.
async fn resolve_principal<B: Backend>(backend: &B) -> Option<(Principal, Role)> {
    let principal = match backend.current_principal().await {
        Ok(Some(principal)) => principal,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Session lookup failed, treating as signed out: {}", e);
            return None;
        }
    };

    match backend.query_role(&principal.id).await {
        Ok(row) => {
            let role = Role::resolve(row.as_ref());
            Some((principal, role))
        }
        Err(e) => {
            tracing::warn!(
                "Role lookup for {} failed, treating as signed out: {}",
                principal.id,
                e
            );
            None
        }
    }
}

/// Decide whether the current user may see `screen`.
pub async fn check_access<B: Backend>(backend: &B, screen: Screen) -> Access {
    let Some((principal, role)) = resolve_principal(backend).await else {
        return Access::Unauthenticated;
    };

    if let Some(required) = screen.required_role() {
        if required != role {
            tracing::debug!(
                "{} holds role {}, redirecting away from {}",
                principal.id,
                role,
                screen.path()
            );
            return Access::WrongRole(role);
        }
    }

    let profile = match role {
        Role::Citizen => match backend.query_profile(&principal.id).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("Profile lookup for {} failed: {}", principal.id, e);
                None
            }
        },
        Role::Admin => None,
    };

    Access::Authorized(Session {
        principal,
        role,
        profile,
    })
}

/// Where to send someone opening the application root.
pub async fn landing<B: Backend>(backend: &B) -> Screen {
    match resolve_principal(backend).await {
        Some((_, role)) => Screen::dashboard_for(role),
        None => Screen::Auth,
    }
}

/// Identifies one screen activation.
#[derive(Clone, Debug)]
pub struct Ticket {
    generation: u64,
    counter: Arc<AtomicU64>,
}

impl Ticket {
    /// `false` once a newer activation has begun.
    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::SeqCst) == self.generation
    }
}

/// Source of activation tickets; starting an activation supersedes older ones.
#[derive(Clone, Debug, Default)]
pub struct Activations {
    counter: Arc<AtomicU64>,
}

impl Activations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Ticket {
        let generation = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            generation,
            counter: self.counter.clone(),
        }
    }

    /// Invalidate every outstanding ticket, e.g. when the screen unmounts.
    pub fn cancel(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }
}

/// [`check_access`], discarding the result if `ticket` was superseded meanwhile.
pub async fn check_activation<B: Backend>(
    backend: &B,
    screen: Screen,
    ticket: &Ticket,
) -> Option<Access> {
    let access = check_access(backend, screen).await;
    if ticket.is_current() {
        Some(access)
    } else {
        tracing::debug!("Dropping stale guard result for {}", screen.path());
        None
    }
}

/// [`landing`], discarding the result if `ticket` was superseded meanwhile.
pub async fn landing_activation<B: Backend>(backend: &B, ticket: &Ticket) -> Option<Screen> {
    let screen = landing(backend).await;
    if ticket.is_current() {
        Some(screen)
    } else {
        tracing::debug!("Dropping stale landing result");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tokio::sync::Notify;

    use crate::backend::{Backend, Lookup};
    use crate::error::{AuthError, BackendError};
    use crate::memory::MemoryBackend;
    use crate::models::{RoleAssignment, SignUpFields};

    /// Holds every session lookup until `gate` is notified.
    #[derive(Default)]
    struct Gated {
        inner: MemoryBackend,
        gate: Arc<Notify>,
    }

    impl Backend for Gated {
        async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, AuthError> {
            self.inner.sign_in(email, password).await
        }

        async fn sign_up(
            &self,
            email: &str,
            password: &str,
            fields: &SignUpFields,
        ) -> Result<Principal, AuthError> {
            self.inner.sign_up(email, password, fields).await
        }

        async fn sign_out(&self) -> Result<(), BackendError> {
            self.inner.sign_out().await
        }

        async fn current_principal(&self) -> Lookup<Principal> {
            self.gate.notified().await;
            self.inner.current_principal().await
        }

        async fn query_role(&self, principal_id: &str) -> Lookup<RoleAssignment> {
            self.inner.query_role(principal_id).await
        }

        async fn query_profile(&self, principal_id: &str) -> Lookup<Profile> {
            self.inner.query_profile(principal_id).await
        }

        async fn insert_role_assignment(
            &self,
            principal_id: &str,
            role: Role,
        ) -> Result<(), BackendError> {
            self.inner.insert_role_assignment(principal_id, role).await
        }
    }

    async fn signed_in(backend: &MemoryBackend, role_row: Option<Role>) -> Principal {
        let principal = backend
            .sign_up(
                "user@example.com",
                "secret1",
                &SignUpFields {
                    name: "Sana".to_string(),
                    role: role_row.unwrap_or_default(),
                },
            )
            .await
            .unwrap();
        if let Some(role) = role_row {
            backend
                .insert_role_assignment(&principal.id, role)
                .await
                .unwrap();
        }
        principal
    }

    #[tokio::test]
    async fn test_no_principal_redirects_to_auth() {
        let backend = MemoryBackend::new();
        let access = check_access(&backend, Screen::AdminDashboard).await;
        assert_eq!(access, Access::Unauthenticated);
        assert_eq!(access.redirect().map(|s| s.path()), Some("/auth"));
    }

    #[tokio::test]
    async fn test_admin_on_citizen_dashboard_redirects_to_admin() {
        let backend = MemoryBackend::new();
        signed_in(&backend, Some(Role::Admin)).await;
        let access = check_access(&backend, Screen::CitizenDashboard).await;
        assert_eq!(access, Access::WrongRole(Role::Admin));
        assert_eq!(access.redirect().map(|s| s.path()), Some("/admin-dashboard"));
    }

    #[tokio::test]
    async fn test_missing_role_row_on_admin_dashboard_redirects_to_citizen() {
        let backend = MemoryBackend::new();
        signed_in(&backend, None).await;
        let access = check_access(&backend, Screen::AdminDashboard).await;
        assert_eq!(access, Access::WrongRole(Role::Citizen));
        assert_eq!(
            access.redirect().map(|s| s.path()),
            Some("/citizen-dashboard")
        );
    }

    #[tokio::test]
    async fn test_citizen_is_authorized_with_profile() {
        let backend = MemoryBackend::new();
        let principal = signed_in(&backend, None).await;
        backend.put_profile(Profile {
            id: principal.id.clone(),
            name: Some("Sana".to_string()),
            points: 40,
            total_reports: 4,
        });

        let Access::Authorized(session) = check_access(&backend, Screen::CitizenDashboard).await
        else {
            panic!("expected access to be granted");
        };
        assert_eq!(session.principal, principal);
        assert_eq!(session.role, Role::Citizen);
        assert_eq!(session.profile.map(|p| p.points), Some(40));
    }

    #[tokio::test]
    async fn test_admin_is_authorized_without_profile() {
        let backend = MemoryBackend::new();
        signed_in(&backend, Some(Role::Admin)).await;
        let access = check_access(&backend, Screen::AdminDashboard).await;
        assert!(matches!(
            access,
            Access::Authorized(Session { role: Role::Admin, profile: None, .. })
        ));
        assert_eq!(access.redirect(), None);
    }

    #[tokio::test]
    async fn test_lookup_failure_fails_closed() {
        let backend = MemoryBackend::new();
        signed_in(&backend, Some(Role::Admin)).await;
        backend.set_offline(true);
        let access = check_access(&backend, Screen::AdminDashboard).await;
        assert_eq!(access, Access::Unauthenticated);
        assert_eq!(access.redirect(), Some(Screen::Auth));
    }

    #[tokio::test]
    async fn test_landing() {
        let backend = MemoryBackend::new();
        assert_eq!(landing(&backend).await, Screen::Auth);

        signed_in(&backend, Some(Role::Admin)).await;
        assert_eq!(landing(&backend).await, Screen::AdminDashboard);

        backend.set_offline(true);
        assert_eq!(landing(&backend).await, Screen::Auth);
    }

    #[tokio::test]
    async fn test_superseded_activation_is_dropped() {
        let backend = MemoryBackend::new();
        let activations = Activations::new();

        let first = activations.begin();
        let second = activations.begin();
        assert!(!first.is_current());
        assert!(second.is_current());

        assert_eq!(
            check_activation(&backend, Screen::CitizenDashboard, &first).await,
            None
        );
        assert_eq!(
            check_activation(&backend, Screen::CitizenDashboard, &second).await,
            Some(Access::Unauthenticated)
        );

        activations.cancel();
        assert!(!second.is_current());
    }

    #[tokio::test]
    async fn test_activation_superseded_while_in_flight() {
        let backend = Gated::default();
        signed_in(&backend.inner, Some(Role::Admin)).await;
        let activations = Activations::new();

        let first = activations.begin();
        let (stale, second) = tokio::join!(
            check_activation(&backend, Screen::CitizenDashboard, &first),
            async {
                let second = activations.begin();
                backend.gate.notify_one();
                second
            }
        );
        assert_eq!(stale, None);

        backend.gate.notify_one();
        assert_eq!(
            check_activation(&backend, Screen::CitizenDashboard, &second).await,
            Some(Access::WrongRole(Role::Admin))
        );
    }

    #[tokio::test]
    async fn test_landing_dropped_when_cancelled_in_flight() {
        let backend = Gated::default();
        signed_in(&backend.inner, Some(Role::Admin)).await;
        let activations = Activations::new();

        let ticket = activations.begin();
        let (stale, ()) = tokio::join!(landing_activation(&backend, &ticket), async {
            activations.cancel();
            backend.gate.notify_one();
        });
        assert_eq!(stale, None);

        let ticket = activations.begin();
        backend.gate.notify_one();
        assert_eq!(
            landing_activation(&backend, &ticket).await,
            Some(Screen::AdminDashboard)
        );
    }

    #[test]
    fn test_screen_paths_and_roles() {
        assert_eq!(Screen::Auth.required_role(), None);
        assert_eq!(Screen::AdminDashboard.required_role(), Some(Role::Admin));
        assert_eq!(Screen::dashboard_for(Role::Citizen).path(), "/citizen-dashboard");
        assert_eq!(Access::Checking.redirect(), None);
    }
}

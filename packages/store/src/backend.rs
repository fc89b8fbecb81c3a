//! # Backend — the identity and data provider contract
//!
//! Everything the application knows about users comes from a provider behind
//! this trait: the server functions in the `api` crate on the web, or
//! [`crate::MemoryBackend`] in tests.
//!
//! Every lookup answers with a [`Lookup`], so call sites must deal with
//! "found", "not found" and "provider failed" separately:
//!
//! | Value | Meaning |
//! |-------|---------|
//! | `Ok(Some(value))` | The record exists. |
//! | `Ok(None)` | The provider answered and there is no such record. |
//! | `Err(BackendError)` | The provider could not answer. |

use std::future::Future;

use crate::error::{AuthError, BackendError};
use crate::models::{Principal, Profile, Role, RoleAssignment, SignUpFields};

/// Result of a provider lookup.
pub type Lookup<T> = Result<Option<T>, BackendError>;

/// Async identity and data provider.
pub trait Backend {
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Principal, AuthError>>;

    fn sign_up(
        &self,
        email: &str,
        password: &str,
        fields: &SignUpFields,
    ) -> impl Future<Output = Result<Principal, AuthError>>;

    fn sign_out(&self) -> impl Future<Output = Result<(), BackendError>>;

    fn current_principal(&self) -> impl Future<Output = Lookup<Principal>>;

    fn query_role(&self, principal_id: &str) -> impl Future<Output = Lookup<RoleAssignment>>;

    fn query_profile(&self, principal_id: &str) -> impl Future<Output = Lookup<Profile>>;

    fn insert_role_assignment(
        &self,
        principal_id: &str,
        role: Role,
    ) -> impl Future<Output = Result<(), BackendError>>;
}

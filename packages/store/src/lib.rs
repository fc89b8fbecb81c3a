//! Client-side state and domain logic for Fix Karachi: models, localization,
//! the session/role guard, the authentication flows and the provider contract.

pub mod backend;
pub mod config;
pub mod error;
pub mod guard;
pub mod i18n;
pub mod models;
pub mod session;

mod memory;
pub use memory::MemoryBackend;

pub use backend::{Backend, Lookup};
pub use config::AppConfig;
pub use error::{AuthError, BackendError};
pub use guard::{check_access, check_activation, landing, landing_activation, Access, Activations, Screen, Session, Ticket};
pub use i18n::{translate, Language, LanguageStore, Subscription};
pub use models::{Principal, Profile, Role, RoleAssignment, SignUpFields};

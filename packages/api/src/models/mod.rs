//! Database rows and wire types for the provider.

mod user;

#[cfg(feature = "server")]
pub use user::{Account, ProfileRow};
pub use user::AuthReply;

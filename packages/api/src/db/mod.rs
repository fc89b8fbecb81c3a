//! # Database module — PostgreSQL connection pool
//!
//! Server-only. The pool is a lazy process-wide singleton: the first call to
//! [`get_pool`] connects using the settings loaded by
//! [`crate::settings::init`] and every later caller shares it.

#[cfg(feature = "server")]
mod pool;

#[cfg(feature = "server")]
pub use pool::get_pool;

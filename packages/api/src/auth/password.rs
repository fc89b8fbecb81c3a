//! # Password hashing and verification — Argon2id
//!
//! [`hash_password`] salts with [`OsRng`] and returns a PHC-format string
//! (`$argon2id$v=19$...`) for the `password_hash` column of `users`.
//! [`verify_password`] checks a plaintext against such a string and only errors
//! when the stored hash itself is malformed.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::ProviderError;

/// Hash a password using Argon2id. Returns a PHC-format string.
pub fn hash_password(password: &str) -> Result<String, ProviderError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ProviderError::Hash(e.to_string()))
}

/// Verify a password against a PHC-format hash string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ProviderError> {
    let parsed = PasswordHash::new(hash).map_err(|e| ProviderError::Hash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("monsoon-2025").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("monsoon-2025", &hash).unwrap());
        assert!(!verify_password("monsoon-2024", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("x", "not-a-hash").is_err());
    }
}

//! One-way salted password hashing (Argon2id, PHC string format)

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::OnceLock;
use tracing::error;

use crate::common::ApiError;

pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!(error = %e, "Password hashing failed");
            ApiError::InternalServer("password hashing failed".to_string())
        })
}

/// Compares `password` with a stored PHC hash. Unparseable hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Hash of a random secret nobody knows, for accounts created by social login
pub fn placeholder_hash() -> Result<String, ApiError> {
    let secret: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect();
    hash_password(&secret)
}

/// Runs a verification against a fixed hash so that logins for unknown
/// emails cost the same as logins with a wrong password.
pub fn verify_against_dummy(password: &str) {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();

    let hash = DUMMY_HASH.get_or_init(|| placeholder_hash().unwrap_or_default());
    let _ = verify_password(password, hash);
}

pub async fn hash_password_blocking(password: String) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::InternalServer(format!("hashing task failed: {}", e)))?
}

pub async fn placeholder_hash_blocking() -> Result<String, ApiError> {
    tokio::task::spawn_blocking(placeholder_hash)
        .await
        .map_err(|e| ApiError::InternalServer(format!("hashing task failed: {}", e)))?
}

/// Verifies on the blocking pool; `None` hash means the account does not exist.
pub async fn verify_password_blocking(password: String, hash: Option<String>) -> bool {
    tokio::task::spawn_blocking(move || match hash {
        Some(hash) => verify_password(&password, &hash),
        None => {
            verify_against_dummy(&password);
            false
        }
    })
    .await
    .unwrap_or(false)
}

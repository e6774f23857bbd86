//! Argon2 password hashing for staff accounts.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::{SchoolError, SchoolResult};

/// Hashes a password with Argon2id and a random salt, returning a PHC string.
pub fn hash_password(password: &str) -> SchoolResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| SchoolError::PasswordHash(err.to_string()))
}

/// Checks a plain password against a PHC hash string.
///
/// Returns `false` on mismatch and for hashes that cannot be parsed.
pub fn verify_password(hashed_password: &str, plain_password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hashed_password) else {
        return false;
    };

    Argon2::default()
        .verify_password(plain_password.as_bytes(), &parsed)
        .is_ok()
}

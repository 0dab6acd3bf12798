/// Password hashing and verification using Argon2id
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use error_types::{ApiError, ApiResult};

/// Hash a password using Argon2id with a fresh random salt.
/// Returns the PHC-format hash string suitable for storage.
///
/// Input validation (non-empty, strength policy) happens upstream in the
/// identity service; this function only derives the hash.
pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| ApiError::Internal("Failed to hash password".to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against a stored hash.
///
/// A mismatch is `Ok(false)`, never an error; only a malformed stored hash
/// is reported as a failure. Comparison is constant-time inside the `argon2`
/// crate.
pub fn verify_password(password: &str, hash: &str) -> ApiResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| ApiError::Internal("Invalid password hash format".to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(_) => Err(ApiError::Internal(
            "Password verification failed".to_string(),
        )),
    }
}

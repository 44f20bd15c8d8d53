/// Password hashing and verification using Argon2id
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{AppError, Result};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a password using Argon2id with a random per-password salt.
/// Returns a PHC-formatted hash string safe for database storage.
pub fn hash_password(password: &str) -> Result<String> {
    validate_password(password)?;

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against its PHC-formatted hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(format!("Invalid password hash format: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Internal(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}

/// Validate password length.
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_valid_password() {
        let password = "correct horse battery staple";
        let hash = hash_password(password).expect("should hash password successfully");
        assert!(verify_password(password, &hash).expect("should verify successfully"));
    }

    #[test]
    fn test_verify_wrong_password() {
        let password = "correct horse battery staple";
        let hash = hash_password(password).expect("should hash password successfully");
        assert!(!verify_password("wrong password", &hash).expect("verification should succeed"));
    }

    #[test]
    fn test_password_too_short() {
        let result = hash_password("short1!");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let password = "correct horse battery staple";
        let hash1 = hash_password(password).expect("should hash successfully");
        let hash2 = hash_password(password).expect("should hash successfully");
        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);
    }
}

//! Password hashing helpers shared by the staff services

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{AppError, AppResult};

/// Hash a password using Argon2 with a random salt
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored Argon2 hash
pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_never_the_plaintext() {
        let hash = hash_password("Secret1").expect("hash");
        assert_ne!(hash, "Secret1");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn correct_password_verifies() {
        let hash = hash_password("Secret1").expect("hash");
        assert!(verify_password(&hash, "Secret1").expect("verify"));
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hash = hash_password("Secret1").expect("hash");
        assert!(!verify_password(&hash, "Secret2").expect("verify"));
    }

    #[test]
    fn same_password_hashes_differently_per_salt() {
        let a = hash_password("Secret1").expect("hash");
        let b = hash_password("Secret1").expect("hash");
        assert_ne!(a, b);
    }
}

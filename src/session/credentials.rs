//! Password hashing at the login boundary
//!
//! Only PHC-formatted hashes are ever stored; plaintext passwords never leave
//! the call that receives them.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{FormError, Result};

/// Turns passwords into storable hashes and checks them later
pub trait CredentialHasher {
    fn hash(&self, password: &str) -> Result<String>;

    /// True if `password` matches `hash`; a malformed hash is an error
    fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

/// Argon2id with the crate's recommended parameters
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| FormError::Auth(format!("Failed to hash password: {e}")))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| FormError::Auth(format!("Invalid password hash format: {e}")))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

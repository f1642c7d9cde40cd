//! Registered users for the local mock login

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::{CredentialHasher, Session};
use crate::error::{FormError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// PHC hash string
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User key to credential hash, stored as JSON next to the forms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserDirectory {
    users: BTreeMap<String, UserRecord>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a directory file; a missing file is an empty directory
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn contains(&self, user_key: &str) -> bool {
        self.users.contains_key(user_key)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Add a user; an existing key is rejected
    pub fn register(&mut self, hasher: &impl CredentialHasher, user_key: &str, password: &str) -> Result<()> {
        if self.contains(user_key) {
            return Err(FormError::DuplicateUser(user_key.to_string()));
        }
        let record = UserRecord {
            password_hash: hasher.hash(password)?,
            created_at: Utc::now(),
        };
        self.users.insert(user_key.to_string(), record);
        info!("Registered user {}", user_key);
        Ok(())
    }

    /// Check credentials and start a session
    ///
    /// Unknown users and wrong passwords produce the same error.
    pub fn login(
        &self,
        hasher: &impl CredentialHasher,
        user_key: &str,
        password: &str,
        timeout_minutes: i64,
    ) -> Result<Session> {
        let record = self
            .users
            .get(user_key)
            .ok_or_else(|| FormError::InvalidCredentials(user_key.to_string()))?;

        if !hasher.verify(password, &record.password_hash)? {
            return Err(FormError::InvalidCredentials(user_key.to_string()));
        }

        info!("User {} logged in", user_key);
        Ok(Session::new(user_key, timeout_minutes, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Argon2Hasher;

    #[test]
    fn test_register_and_login() {
        let hasher = Argon2Hasher;
        let mut users = UserDirectory::new();
        users.register(&hasher, "pat", "hunter22").unwrap();

        let session = users.login(&hasher, "pat", "hunter22", 30).unwrap();
        assert_eq!(session.user_key(), "pat");

        assert!(matches!(
            users.login(&hasher, "pat", "hunter23", 30),
            Err(FormError::InvalidCredentials(_))
        ));
        assert!(matches!(
            users.login(&hasher, "sam", "hunter22", 30),
            Err(FormError::InvalidCredentials(_))
        ));
        assert!(matches!(
            users.register(&hasher, "pat", "other"),
            Err(FormError::DuplicateUser(_))
        ));
    }

    #[test]
    fn test_file_never_holds_plaintext() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");

        let mut users = UserDirectory::load(&path).unwrap();
        assert!(users.is_empty());
        users.register(&Argon2Hasher, "pat", "correct-horse").unwrap();
        users.save(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(!text.contains("correct-horse"));

        let reloaded = UserDirectory::load(&path).unwrap();
        assert_eq!(reloaded, users);
        assert!(reloaded.login(&Argon2Hasher, "pat", "correct-horse", 30).is_ok());
    }
}

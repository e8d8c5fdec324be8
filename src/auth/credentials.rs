use std::collections::HashMap;
use std::sync::Mutex;

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::error::{AppError, Result};

/// In-process credential store: username -> Argon2 password hash.
/// Constructed once at startup and updated on signup. Credentials live
/// only in process memory and reset on restart, while account data is
/// file-persisted; the account document never holds passwords.
pub struct CredentialStore {
    users: Mutex<HashMap<String, String>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    /// Demo logins for local runs (admin/1234, user1/pass123).
    pub fn with_demo_users() -> Result<Self> {
        let store = Self::new();
        store.register("admin", "1234")?;
        store.register("user1", "pass123")?;
        Ok(store)
    }

    /// Hash and store a new user's password. Rejects an existing
    /// username without touching its hash.
    pub fn register(&self, username: &str, password: &str) -> Result<()> {
        let hash = Self::hash_password(password)?;

        let mut users = self.users.lock().map_err(|_| {
            AppError::Internal("credential store lock poisoned".to_string())
        })?;
        if users.contains_key(username) {
            return Err(AppError::UserExists);
        }
        users.insert(username.to_string(), hash);
        Ok(())
    }

    /// Store a password for a user whose uniqueness was already checked
    /// against the account document (the signup path). Overwrites any
    /// stale hash left from a previous process lifetime.
    pub fn set_password(&self, username: &str, password: &str) -> Result<()> {
        let hash = Self::hash_password(password)?;

        let mut users = self.users.lock().map_err(|_| {
            AppError::Internal("credential store lock poisoned".to_string())
        })?;
        users.insert(username.to_string(), hash);
        Ok(())
    }

    /// Check a login attempt. Unknown users and bad passwords are both
    /// a plain `false`, nothing leaks which one failed.
    pub fn verify(&self, username: &str, password: &str) -> Result<bool> {
        let users = self.users.lock().map_err(|_| {
            AppError::Internal("credential store lock poisoned".to_string())
        })?;

        let Some(stored_hash) = users.get(username) else {
            return Ok(false);
        };

        let parsed_hash = PasswordHash::new(stored_hash)
            .map_err(|e| AppError::Internal(format!("Invalid hash: {}", e)))?;

        let argon2 = Argon2::default();
        Ok(argon2.verify_password(password.as_bytes(), &parsed_hash).is_ok())
    }

    fn hash_password(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?
            .to_string();
        Ok(hash)
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

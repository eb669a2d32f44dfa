//! Session storage access
//!
//! The web client kept the connected user in `localStorage`. Controllers
//! receive a `Session` at construction instead of reaching for a global.

use billed_core::constants::{SESSION_JWT_KEY, SESSION_USER_KEY};
use billed_core::{AppError, User};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Key-value string storage (the `localStorage` contract)
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
}

/// In-memory session storage
#[derive(Default)]
pub struct MemorySessionStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }
}

/// Typed accessor over a `SessionStorage`
///
/// Every read goes back to the storage, so a user switched mid-session is
/// picked up by the next operation.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn SessionStorage>,
}

impl Session {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Session backed by fresh in-memory storage holding `user`
    pub fn in_memory(user: &User) -> Result<Self, AppError> {
        let session = Self::new(Arc::new(MemorySessionStorage::new()));
        session.set_user(user)?;
        Ok(session)
    }

    pub fn set_user(&self, user: &User) -> Result<(), AppError> {
        let json = serde_json::to_string(user)?;
        self.storage.set_item(SESSION_USER_KEY, &json);
        Ok(())
    }

    pub fn user(&self) -> Result<User, AppError> {
        let raw = self
            .storage
            .get_item(SESSION_USER_KEY)
            .ok_or_else(|| AppError::Session("No user in session".to_string()))?;
        serde_json::from_str(&raw)
            .map_err(|e| AppError::Session(format!("Malformed user entry: {}", e)))
    }

    pub fn user_email(&self) -> Result<String, AppError> {
        let user = self.user()?;
        if user.email.is_empty() {
            return Err(AppError::Session("Session user has no email".to_string()));
        }
        Ok(user.email)
    }

    /// API bearer token, if the user logged in against the REST backend
    pub fn token(&self) -> Option<String> {
        self.storage.get_item(SESSION_JWT_KEY)
    }
}

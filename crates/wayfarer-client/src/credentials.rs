//! The session credential cell.

use std::sync::{Arc, Mutex, PoisonError};

/// Holds the bearer token for the current session.
///
/// Cloning shares the same cell: the connection manager clears it when the
/// server signals a protocol error, and the auth layer refills it on the
/// next login. This is the only state that outlives a connection.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    token: Arc<Mutex<Option<String>>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a fresh token, replacing any previous one.
    pub fn set(&self, token: &str) {
        *self.lock() = Some(token.to_string());
    }

    /// The current token, if authenticated.
    pub fn token(&self) -> Option<String> {
        self.lock().clone()
    }

    /// Discards the token. The next connection attempt will fail fast and
    /// surface as logged-out.
    pub fn clear(&self) {
        *self.lock() = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // A panic while holding this lock leaves plain data behind;
        // recovering the guard is always safe.
        self.token.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

//! Client Session
//!
//! The bearer token and user profile of the signed-in user, kept in a
//! [`SessionStore`] under the `token` and `user` keys.
//!
//! ## Pieces
//!
//! - **Session**: typed access to the two keys, shared by cloning
//! - **SessionStore**: storage backend (`MemoryStore`, `FileStore`)
//! - **Navigator**: where page guards and logout send the user

mod guard;
mod store;

pub use guard::{
    check_auth, is_authenticated, logout, AuthCheck, MemoryNavigator, Navigator, SIGNIN_PAGE,
    SIGNUP_PAGE,
};
pub use store::{FileStore, MemoryStore, SessionStore};

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Store key holding the raw bearer token
pub const TOKEN_KEY: &str = "token";

/// Store key holding the JSON-encoded user profile
pub const USER_KEY: &str = "user";

/// Handle to the persisted session
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Session backed by a fresh [`MemoryStore`]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Stored bearer token; empty strings count as absent
    pub fn token(&self) -> SessionResult<Option<String>> {
        Ok(self.store.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    pub fn has_token(&self) -> bool {
        matches!(self.token(), Ok(Some(_)))
    }

    /// Stored user, or `None` when missing or not valid JSON.
    ///
    /// Use [`try_current_user`](Self::try_current_user) to tell the two apart.
    pub fn current_user(&self) -> Option<Value> {
        match self.try_current_user() {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable stored user");
                None
            }
        }
    }

    /// Stored user, surfacing malformed JSON as an error
    pub fn try_current_user(&self) -> SessionResult<Option<Value>> {
        let Some(raw) = self.store.get(USER_KEY)? else {
            return Ok(None);
        };

        if raw.is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| SessionError::MalformedUser(e.to_string()))
    }

    /// Overwrite token and user. The two writes are independent.
    pub fn persist(&self, token: &str, user: &Value) -> SessionResult<()> {
        self.store.set(TOKEN_KEY, token)?;
        self.store.set(USER_KEY, &user.to_string())?;
        tracing::debug!("Session stored");
        Ok(())
    }

    /// Remove token and user. Both removals are attempted; the first
    /// failure is returned.
    pub fn clear(&self) -> SessionResult<()> {
        let token = self.store.remove(TOKEN_KEY);
        let user = self.store.remove(USER_KEY);
        token.and(user)?;
        tracing::debug!("Session cleared");
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("has_token", &self.has_token())
            .finish()
    }
}

/// Errors from session storage
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Stored user is not valid JSON: {0}")]
    MalformedUser(String),

    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Serialization(err.to_string())
    }
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;

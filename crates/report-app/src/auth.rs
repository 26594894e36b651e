//! Session state shared between the dialog and the login action

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Read access to the user's session.
///
/// The dialog only ever asks whether a session exists; the report service
/// also needs the token itself.
#[cfg_attr(test, mockall::automock)]
pub trait AuthAccessor: Send + Sync {
    fn has_session(&self) -> bool;
    fn session_token(&self) -> Option<String>;
    /// Display name of the signed-in user, when the service sent one
    fn username(&self) -> Option<String>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub jwt: Option<String>,
    pub username: Option<String>,
}

/// In-memory session, cloned handles share the same state
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<AuthState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded from configuration. Blank tokens mean "signed out".
    pub fn with_token(token: Option<String>) -> Self {
        let store = Self::new();
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            store.write().jwt = Some(token);
        }
        store
    }

    pub fn set_session(&self, jwt: impl Into<String>, username: Option<String>) {
        let mut state = self.write();
        state.jwt = Some(jwt.into());
        state.username = username;
    }

    /// Drop a session the service no longer accepts
    pub fn clear(&self) {
        *self.write() = AuthState::default();
    }

    pub fn snapshot(&self) -> AuthState {
        self.read().clone()
    }

    // A panicked writer can't leave AuthState half-updated, so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, AuthState> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, AuthState> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl AuthAccessor for SessionStore {
    fn has_session(&self) -> bool {
        self.read().jwt.as_deref().is_some_and(|jwt| !jwt.is_empty())
    }

    fn session_token(&self) -> Option<String> {
        self.read().jwt.clone().filter(|jwt| !jwt.is_empty())
    }

    fn username(&self) -> Option<String> {
        self.read().username.clone()
    }
}

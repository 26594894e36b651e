//! Login request/response types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Credentials posted to the login endpoint
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub identifier: String,
    pub password: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
        }
    }
}

// Passwords must never end up in log files
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login: a session token plus the user it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub jwt: String,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AuthUser {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl AuthUser {
    /// Best human-readable name for the status line
    pub fn display_name(&self) -> Option<&str> {
        self.username.as_deref().or(self.email.as_deref())
    }
}

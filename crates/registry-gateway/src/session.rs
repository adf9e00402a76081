//! Session credentials and role
//!
//! The session is constructed once by the authentication collaborator and
//! passed explicitly into the gateway and engine; nothing here reads
//! ambient global state.

use serde::{Deserialize, Serialize};

/// Staff role, controlling which filters the backend honors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Municipal administrator: may filter across barangays
    Admin,
    /// Barangay-level staff: scoped to their own barangay server-side
    Staff,
}

impl Role {
    /// Whether this role may apply the barangay filter
    #[inline]
    #[must_use]
    pub fn can_filter_barangay(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    role: Role,
}

impl Session {
    /// Create a session from a bearer token and role
    #[inline]
    #[must_use]
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
        }
    }

    /// Bearer token for the Authorization header
    #[inline]
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Role of the authenticated staff member
    #[inline]
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Authorization header value
    #[inline]
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

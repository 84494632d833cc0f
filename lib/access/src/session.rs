//! Session management for authenticated users.
//!
//! A session correlates an authenticated identity, its business role, and
//! its access token for the duration of a user's interaction. Sessions are
//! created only by the login flow after a successful token exchange and
//! role lookup, and they live until logout or token expiry.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Unique identifier for a session.
///
/// Session IDs are opaque strings generated during session creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a session ID from a string.
    #[must_use]
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Generates a fresh session ID using ULID.
    #[must_use]
    pub fn generate() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

    /// Returns the session ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An authenticated user's session.
///
/// A logged-in session always carries a non-empty name, e-mail, and access
/// token; the role may be absent, in which case every non-public page is
/// denied. Expiry follows the access token's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,
    /// Display name, as kept in the business directory.
    name: String,
    /// Verified e-mail from the ID-token claims.
    email: String,
    /// Provider access token (opaque).
    access_token: String,
    /// Business role, when the directory has a mapping for the e-mail.
    role: Option<Role>,
    /// Whether the login flow completed for this session.
    logged_in: bool,
    /// When the session was created.
    created_at: DateTime<Utc>,
    /// When the session expires.
    expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates a logged-in session valid for the given duration.
    #[must_use]
    pub fn authenticated(
        id: SessionId,
        name: String,
        email: String,
        access_token: String,
        role: Option<Role>,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            access_token,
            role,
            logged_in: true,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Returns the session ID.
    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the user's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the user's verified e-mail.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the provider access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the business role, if one is assigned.
    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    /// Returns true once the login flow has completed.
    #[must_use]
    pub fn logged_in(&self) -> bool {
        self.logged_in
    }

    /// Returns when the session was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the session expires.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns true if the session has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Returns true if the session is still valid (not expired).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.is_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session(role: Option<Role>, ttl: Duration) -> Session {
        Session::authenticated(
            SessionId::generate(),
            "Maria".to_string(),
            "maria@autogeral.com".to_string(),
            "access-token".to_string(),
            role,
            ttl,
        )
    }

    #[test]
    fn session_id_display() {
        let id = SessionId::new("sess_123".to_string());
        assert_eq!(id.to_string(), "sess_123");
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn authenticated_session_has_identity_and_token() {
        let session = test_session(Some(Role::new("Gestor")), Duration::hours(1));

        assert!(session.logged_in());
        assert_eq!(session.name(), "Maria");
        assert_eq!(session.email(), "maria@autogeral.com");
        assert_eq!(session.access_token(), "access-token");
        assert_eq!(session.role(), Some(&Role::new("Gestor")));
        assert!(session.expires_at() > session.created_at());
    }

    #[test]
    fn session_may_carry_no_role() {
        let session = test_session(None, Duration::hours(1));
        assert!(session.logged_in());
        assert!(session.role().is_none());
    }

    #[test]
    fn session_expiry() {
        let expired = test_session(Some(Role::new("Gestor")), Duration::seconds(-1));
        assert!(expired.is_expired());
        assert!(!expired.is_valid());

        let live = test_session(Some(Role::new("Gestor")), Duration::hours(1));
        assert!(live.is_valid());
    }

    #[test]
    fn session_serialization_roundtrip() {
        let session = test_session(Some(Role::new("Gestor")), Duration::hours(1));
        let json = serde_json::to_string(&session).expect("serialize");
        let parsed: Session = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(session, parsed);
    }
}

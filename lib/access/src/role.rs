//! Business roles ("cargo") and directory records.
//!
//! A role is the free-form position string kept in the business directory
//! (e.g. "Gestor", "Sócio"). Page-level authorization is decided on the
//! role, never on the identity itself.

use serde::{Deserialize, Serialize};

/// Business role driving page-level authorization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    /// Creates a role from the directory's cargo string.
    #[must_use]
    pub fn new(cargo: impl Into<String>) -> Self {
        Self(cargo.into())
    }

    /// Returns the role as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Directory record for an authenticated identity.
///
/// Returned by a role-directory lookup; absence of a record means the
/// identity has no access, which is a normal outcome rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    /// The e-mail the record is keyed by.
    pub email: String,
    /// Display name kept in the directory. Overrides the provider's name
    /// claim in the session.
    pub display_name: String,
    /// The business role.
    pub role: Role,
}

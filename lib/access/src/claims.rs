//! ID-token claims and identity resolution.

use serde::{Deserialize, Serialize};

use crate::error::AuthenticationError;

/// Display name used when the provider sends a name claim that is present
/// but blank.
pub const PLACEHOLDER_NAME: &str = "Usuário";

/// Stand-in for a blank `preferred_username` claim. It is not a real
/// address, so a directory lookup with it always comes back empty and the
/// login degrades to the generic no-permission path.
pub const PLACEHOLDER_EMAIL: &str = "sem-email@invalido.local";

/// Claims decoded from the provider's ID token.
///
/// Only the claims this application consumes are modeled; anything else in
/// the token payload is ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdTokenClaims {
    /// Subject claim: the unique user identifier at the provider.
    pub sub: String,
    /// Display name, if the provider sent one.
    #[serde(default)]
    pub name: Option<String>,
    /// E-mail / login identifier.
    #[serde(default)]
    pub preferred_username: Option<String>,
    /// Issued-at, seconds since the epoch.
    #[serde(default)]
    pub iat: Option<i64>,
    /// Expiry, seconds since the epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl IdTokenClaims {
    /// Resolves the display name from the `name` claim.
    ///
    /// A claim that is present but blank falls back to [`PLACEHOLDER_NAME`];
    /// an absent claim is an authentication failure, not a silent default.
    pub fn display_name(&self) -> Result<String, AuthenticationError> {
        match &self.name {
            Some(name) if name.trim().is_empty() => Ok(PLACEHOLDER_NAME.to_string()),
            Some(name) => Ok(name.clone()),
            None => Err(AuthenticationError::MissingClaim { claim: "name" }),
        }
    }

    /// Resolves the verified e-mail from the `preferred_username` claim.
    ///
    /// This is the only value that may be handed to the role directory.
    /// Present-but-blank falls back to [`PLACEHOLDER_EMAIL`]; absent is an
    /// authentication failure.
    pub fn verified_email(&self) -> Result<String, AuthenticationError> {
        match &self.preferred_username {
            Some(email) if email.trim().is_empty() => Ok(PLACEHOLDER_EMAIL.to_string()),
            Some(email) => Ok(email.clone()),
            None => Err(AuthenticationError::MissingClaim {
                claim: "preferred_username",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(name: Option<&str>, email: Option<&str>) -> IdTokenClaims {
        IdTokenClaims {
            sub: "sub-123".to_string(),
            name: name.map(str::to_string),
            preferred_username: email.map(str::to_string),
            iat: Some(1_700_000_000),
            exp: Some(1_700_003_600),
        }
    }

    #[test]
    fn present_claims_resolve_verbatim() {
        let c = claims(Some("Maria"), Some("maria@autogeral.com"));
        assert_eq!(c.display_name().unwrap(), "Maria");
        assert_eq!(c.verified_email().unwrap(), "maria@autogeral.com");
    }

    #[test]
    fn blank_claims_fall_back_to_placeholders() {
        let c = claims(Some("   "), Some(""));
        assert_eq!(c.display_name().unwrap(), PLACEHOLDER_NAME);
        assert_eq!(c.verified_email().unwrap(), PLACEHOLDER_EMAIL);
    }

    #[test]
    fn absent_name_claim_is_an_error() {
        let c = claims(None, Some("maria@autogeral.com"));
        assert_eq!(
            c.display_name().unwrap_err(),
            AuthenticationError::MissingClaim { claim: "name" }
        );
    }

    #[test]
    fn absent_email_claim_is_an_error() {
        let c = claims(Some("Maria"), None);
        assert_eq!(
            c.verified_email().unwrap_err(),
            AuthenticationError::MissingClaim {
                claim: "preferred_username"
            }
        );
    }

    #[test]
    fn unknown_payload_fields_are_ignored() {
        let json = r#"{
            "sub": "sub-123",
            "name": "Maria",
            "preferred_username": "maria@autogeral.com",
            "iat": 1700000000,
            "exp": 1700003600,
            "aud": "client-id",
            "tid": "tenant-1"
        }"#;

        let c: IdTokenClaims = serde_json::from_str(json).expect("deserialize");
        assert_eq!(c.sub, "sub-123");
        assert_eq!(c.name.as_deref(), Some("Maria"));
    }
}

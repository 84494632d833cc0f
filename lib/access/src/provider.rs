//! Identity-provider seam.
//!
//! The login flow talks to the provider through this trait; the production
//! OAuth2 client lives in the server crate and test doubles live next to
//! the flow tests.

use async_trait::async_trait;

use crate::claims::IdTokenClaims;
use crate::error::ExchangeError;

/// Authorization redirect computed for an anonymous visit.
///
/// Recomputed per visit and never persisted; carries the inputs it was
/// built from alongside the final URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    /// Full provider URL to send the browser to.
    pub url: String,
    /// Scope string the URL was built with.
    pub scopes: String,
    /// Redirect URI the URL was built with.
    pub redirect_uri: String,
}

/// Result of a successful authorization-code exchange.
///
/// Consumed immediately by the login flow to build the session; never
/// stored as-is.
#[derive(Debug, Clone)]
pub struct TokenExchange {
    /// Provider access token (opaque).
    pub access_token: String,
    /// Claims decoded from the ID token.
    pub claims: IdTokenClaims,
    /// Access-token lifetime reported by the provider, if any.
    pub expires_in: Option<std::time::Duration>,
}

/// Client for the OAuth2 identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Builds the authorization redirect for an anonymous visit.
    ///
    /// Pure and deterministic given the configuration; never touches the
    /// network.
    fn authorization_request(&self) -> AuthorizationRequest;

    /// Exchanges an authorization code for tokens.
    ///
    /// One network round-trip with a bounded timeout. Side-effect-free on
    /// failure; authorization codes are single-use, so callers must never
    /// retry a failed exchange with the same code.
    async fn exchange_code(&self, code: &str) -> Result<TokenExchange, ExchangeError>;
}

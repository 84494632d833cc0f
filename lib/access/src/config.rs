//! Identity-provider configuration.
//!
//! Loaded once at process start and shared read-only across all request
//! handlers. Nothing in this type is mutated after construction.

use serde::{Deserialize, Serialize};

/// Configuration for the OAuth2 identity provider.
///
/// The authority is the tenant base URL; the authorization and token
/// endpoints are derived from it as `{authority}/authorize` and
/// `{authority}/token`.
///
/// Fields with defaults can be omitted when loading from environment
/// variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The OAuth2 client ID registered with the provider.
    client_id: String,
    /// The OAuth2 client secret.
    client_secret: String,
    /// Tenant authority URL (e.g. "https://login.microsoftonline.com/<tenant>").
    authority: String,
    /// The redirect URI for the authorization callback.
    redirect_uri: String,
    /// OAuth2 scopes to request as a comma-separated string.
    /// Default: "User.Read"
    #[serde(default = "default_scopes")]
    scopes: String,
}

fn default_scopes() -> String {
    "User.Read".to_string()
}

impl ProviderConfig {
    /// Creates a new provider configuration with the default scopes.
    #[must_use]
    pub fn new(
        client_id: String,
        client_secret: String,
        authority: String,
        redirect_uri: String,
    ) -> Self {
        Self {
            client_id,
            client_secret,
            authority,
            redirect_uri,
            scopes: default_scopes(),
        }
    }

    /// Replaces the requested scopes.
    #[must_use]
    pub fn with_scopes(mut self, scopes: String) -> Self {
        self.scopes = scopes;
        self
    }

    /// Returns the OAuth2 client ID.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the OAuth2 client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Returns the tenant authority URL.
    #[must_use]
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Returns the redirect URI for the authorization callback.
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Returns the scopes to request, parsed from the comma-separated string.
    #[must_use]
    pub fn scopes(&self) -> Vec<&str> {
        self.scopes.split(',').map(str::trim).collect()
    }

    /// Returns the raw scopes string.
    #[must_use]
    pub fn scopes_raw(&self) -> &str {
        &self.scopes
    }
}

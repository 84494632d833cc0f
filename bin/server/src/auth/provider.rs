//! OAuth2 identity-provider client.
//!
//! Wraps the provider's endpoints for the Authorization Code Grant:
//! a deterministic authorization URL for anonymous visits and a
//! single-round-trip code exchange against `{authority}/token`. The
//! ID-token claims are read from the exchange response payload.

use async_trait::async_trait;
use base64::Engine;
use oauth2::basic::{
    BasicErrorResponse, BasicErrorResponseType, BasicRevocationErrorResponse,
    BasicTokenIntrospectionResponse, BasicTokenType,
};
use oauth2::{
    AuthorizationCode, ClientId, ClientSecret, ExtraTokenFields, RedirectUrl, RequestTokenError,
    StandardRevocableToken, StandardTokenResponse, TokenResponse, TokenUrl,
};
use paineis_access::{
    AuthorizationRequest, ExchangeError, IdTokenClaims, IdentityProvider, ProviderConfig,
    TokenExchange,
};
use serde::{Deserialize, Serialize};
use url::Url;

/// Timeout for the token-exchange round trip.
const EXCHANGE_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Extra token-response fields: the provider returns the ID token next to
/// the standard access-token fields.
#[derive(Clone, Debug, Deserialize, Serialize)]
struct IdTokenFields {
    id_token: Option<String>,
}

impl ExtraTokenFields for IdTokenFields {}

type ProviderTokenResponse = StandardTokenResponse<IdTokenFields, BasicTokenType>;
type ProviderClient = oauth2::Client<
    BasicErrorResponse,
    ProviderTokenResponse,
    BasicTokenIntrospectionResponse,
    StandardRevocableToken,
    BasicRevocationErrorResponse,
>;

/// Invalid identity-provider configuration detected at startup.
#[derive(Debug)]
pub struct ConfigurationError(String);

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "identity provider configuration error: {}", self.0)
    }
}

impl std::error::Error for ConfigurationError {}

/// OAuth2 client for the configured identity provider.
///
/// Endpoint URLs are validated once at construction so that building the
/// authorization URL later is infallible.
pub struct OAuthProviderClient {
    config: ProviderConfig,
    authorize_endpoint: Url,
    token_url: TokenUrl,
    redirect_url: RedirectUrl,
}

impl OAuthProviderClient {
    /// Creates a client from the provider configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the authority or redirect URI is not a valid
    /// URL.
    pub fn new(config: ProviderConfig) -> Result<Self, ConfigurationError> {
        let authority = config.authority().trim_end_matches('/');

        let authorize_endpoint = Url::parse(&format!("{authority}/authorize"))
            .map_err(|e| ConfigurationError(format!("invalid authority URL: {e}")))?;
        let token_url = TokenUrl::new(format!("{authority}/token"))
            .map_err(|e| ConfigurationError(format!("invalid authority URL: {e}")))?;
        let redirect_url = RedirectUrl::new(config.redirect_uri().to_string())
            .map_err(|e| ConfigurationError(format!("invalid redirect URI: {e}")))?;

        Ok(Self {
            config,
            authorize_endpoint,
            token_url,
            redirect_url,
        })
    }

    /// Returns the provider configuration.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Scope parameter as sent on the wire.
    fn scope_param(&self) -> String {
        self.config.scopes().join(" ")
    }
}

#[async_trait]
impl IdentityProvider for OAuthProviderClient {
    fn authorization_request(&self) -> AuthorizationRequest {
        let scopes = self.scope_param();
        let mut url = self.authorize_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client_id", self.config.client_id())
            .append_pair("response_type", "code")
            .append_pair("response_mode", "query")
            .append_pair("redirect_uri", self.config.redirect_uri())
            .append_pair("scope", &scopes);

        AuthorizationRequest {
            url: url.to_string(),
            scopes,
            redirect_uri: self.config.redirect_uri().to_string(),
        }
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenExchange, ExchangeError> {
        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(EXCHANGE_TIMEOUT)
            .build()
            .map_err(|e| ExchangeError::Network(format!("failed to create HTTP client: {e}")))?;

        let client = ProviderClient::new(ClientId::new(self.config.client_id().to_string()))
            .set_client_secret(ClientSecret::new(self.config.client_secret().to_string()))
            .set_token_uri(self.token_url.clone())
            .set_redirect_uri(self.redirect_url.clone());

        let token_response = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .add_extra_param("scope", self.scope_param())
            .request_async(&http_client)
            .await
            .map_err(|err| match err {
                RequestTokenError::ServerResponse(resp) => match resp.error() {
                    BasicErrorResponseType::InvalidGrant => ExchangeError::InvalidGrant,
                    _ => ExchangeError::Provider(resp.to_string()),
                },
                RequestTokenError::Request(e) => ExchangeError::Network(e.to_string()),
                other => ExchangeError::Provider(other.to_string()),
            })?;

        let id_token = token_response
            .extra_fields()
            .id_token
            .as_deref()
            .ok_or_else(|| ExchangeError::Provider("no ID token in response".to_string()))?;
        let claims = decode_id_token_claims(id_token)?;

        Ok(TokenExchange {
            access_token: token_response.access_token().secret().clone(),
            claims,
            expires_in: token_response.expires_in(),
        })
    }
}

/// Decodes the claims from a compact-serialized ID token.
///
/// The JWT is `base64url(header).base64url(payload).signature`; only the
/// payload is read. The token arrives directly from the token endpoint
/// over TLS, so there is no local signature check.
fn decode_id_token_claims(id_token: &str) -> Result<IdTokenClaims, ExchangeError> {
    let parts: Vec<&str> = id_token.split('.').collect();
    if parts.len() != 3 {
        return Err(ExchangeError::Provider("invalid ID token format".to_string()));
    }

    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| ExchangeError::Provider(format!("failed to decode ID token payload: {e}")))?;

    serde_json::from_slice(&payload)
        .map_err(|e| ExchangeError::Provider(format!("failed to parse ID token claims: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ProviderConfig {
        ProviderConfig::new(
            "client-id".to_string(),
            "client-secret".to_string(),
            "https://login.example.com/tenant-1".to_string(),
            "https://paineis.example.com/auth/callback".to_string(),
        )
    }

    fn encode_payload(json: &str) -> String {
        let segment = |s: &str| base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(s);
        format!("{}.{}.{}", segment(r#"{"alg":"RS256"}"#), segment(json), "sig")
    }

    #[test]
    fn authorization_request_carries_redirect_uri_and_scope() {
        let client = OAuthProviderClient::new(test_config()).expect("valid config");

        let request = client.authorization_request();

        assert!(request.url.starts_with("https://login.example.com/tenant-1/authorize?"));
        assert!(request.url.contains("client_id=client-id"));
        assert!(request.url.contains("response_type=code"));
        assert!(
            request
                .url
                .contains("redirect_uri=https%3A%2F%2Fpaineis.example.com%2Fauth%2Fcallback")
        );
        assert!(request.url.contains("scope=User.Read"));
        assert_eq!(request.scopes, "User.Read");
        assert_eq!(request.redirect_uri, "https://paineis.example.com/auth/callback");
    }

    #[test]
    fn authorization_request_is_deterministic() {
        let client = OAuthProviderClient::new(test_config()).expect("valid config");
        assert_eq!(client.authorization_request(), client.authorization_request());
    }

    #[test]
    fn authority_trailing_slash_is_normalized() {
        let config = ProviderConfig::new(
            "client-id".to_string(),
            "client-secret".to_string(),
            "https://login.example.com/tenant-1/".to_string(),
            "https://paineis.example.com/auth/callback".to_string(),
        );
        let client = OAuthProviderClient::new(config).expect("valid config");

        let request = client.authorization_request();
        assert!(request.url.starts_with("https://login.example.com/tenant-1/authorize?"));
    }

    #[test]
    fn invalid_authority_is_rejected_at_construction() {
        let config = ProviderConfig::new(
            "client-id".to_string(),
            "client-secret".to_string(),
            "not a url".to_string(),
            "https://paineis.example.com/auth/callback".to_string(),
        );
        assert!(OAuthProviderClient::new(config).is_err());
    }

    #[test]
    fn decode_reads_the_payload_segment() {
        let token = encode_payload(
            r#"{
                "sub": "sub-maria",
                "name": "Maria",
                "preferred_username": "maria@autogeral.com",
                "iat": 1700000000,
                "exp": 1700003600
            }"#,
        );

        let claims = decode_id_token_claims(&token).expect("decode");

        assert_eq!(claims.sub, "sub-maria");
        assert_eq!(claims.name.as_deref(), Some("Maria"));
        assert_eq!(claims.preferred_username.as_deref(), Some("maria@autogeral.com"));
    }

    #[test]
    fn decode_rejects_a_token_without_three_segments() {
        let err = decode_id_token_claims("only.two").unwrap_err();
        assert!(matches!(err, ExchangeError::Provider(_)));
    }

    #[test]
    fn decode_rejects_a_payload_that_is_not_base64() {
        let err = decode_id_token_claims("header.§§§.sig").unwrap_err();
        assert!(matches!(err, ExchangeError::Provider(_)));
    }
}

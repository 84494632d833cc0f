//! Login-flow controller.
//!
//! Drives the authorization-code login end to end: presents the provider
//! redirect to anonymous visitors, exchanges callback codes, enriches the
//! verified identity with its business role, and owns the only mutations
//! of the session store (one create on success, one delete on logout).
//!
//! Failures never leave this controller as raw transport errors: the
//! provider and directory adapters are folded into [`CallbackResult`], and
//! re-attempting the whole flow from the login prompt is always safe.
//! Nothing is retried here: authorization codes are single-use, so a
//! blind retry of the same code is guaranteed to fail.

use chrono::Duration;

use crate::directory::RoleDirectory;
use crate::error::{AuthenticationError, ExchangeError};
use crate::provider::{AuthorizationRequest, IdentityProvider};
use crate::role::Role;
use crate::session::{Session, SessionId};
use crate::store::SessionStore;

/// Outcome of handling an authorization callback.
#[derive(Debug)]
pub enum CallbackResult {
    /// Exchange and role enrichment succeeded; the session is stored.
    Success {
        /// The freshly created session.
        session: Session,
    },
    /// The identity authenticated but the directory holds no role for it.
    /// No session is created. The e-mail is for server-side logging only;
    /// user-facing messaging must stay generic.
    NoRoleAssigned {
        /// The verified e-mail that had no directory record.
        email: String,
    },
    /// Authentication failed. Nothing was persisted, and the code must not
    /// be submitted again.
    Failed(AuthenticationError),
}

/// Orchestrates login, from anonymous visit to stored session.
pub struct LoginFlow<P, D> {
    provider: P,
    directory: D,
    store: SessionStore,
    /// Session lifetime when the provider does not report one.
    fallback_ttl: Duration,
}

impl<P, D> LoginFlow<P, D>
where
    P: IdentityProvider,
    D: RoleDirectory,
{
    /// Creates a flow controller over the given collaborators.
    pub fn new(provider: P, directory: D, store: SessionStore, fallback_ttl: Duration) -> Self {
        Self {
            provider,
            directory,
            store,
            fallback_ttl,
        }
    }

    /// Returns the session store this flow writes to.
    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Builds the login redirect for an anonymous visit.
    #[must_use]
    pub fn login_prompt(&self) -> AuthorizationRequest {
        self.provider.authorization_request()
    }

    /// Completes a login from the callback's authorization code.
    pub async fn complete_login(&self, code: &str) -> CallbackResult {
        // The code is opaque and provider-validated; emptiness is the only
        // check possible on this side.
        if code.trim().is_empty() {
            return CallbackResult::Failed(ExchangeError::InvalidGrant.into());
        }

        let exchange = match self.provider.exchange_code(code).await {
            Ok(exchange) => exchange,
            Err(e) => {
                tracing::warn!(error = %e, "token exchange failed");
                return CallbackResult::Failed(e.into());
            }
        };

        let claim_name = match exchange.claims.display_name() {
            Ok(name) => name,
            Err(e) => return CallbackResult::Failed(e),
        };
        let email = match exchange.claims.verified_email() {
            Ok(email) => email,
            Err(e) => return CallbackResult::Failed(e),
        };
        tracing::debug!(name = %claim_name, "identity verified");

        let record = match self.directory.lookup_role(&email).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::info!(email = %email, "no role mapping in the directory");
                return CallbackResult::NoRoleAssigned { email };
            }
            Err(e) => {
                tracing::warn!(error = %e, "role directory lookup failed");
                return CallbackResult::Failed(e.into());
            }
        };

        let ttl = exchange
            .expires_in
            .and_then(|d| Duration::from_std(d).ok())
            .unwrap_or(self.fallback_ttl);

        let session = Session::authenticated(
            SessionId::generate(),
            record.display_name,
            email,
            exchange.access_token,
            Some(record.role),
            ttl,
        );
        self.store.insert(session.clone());

        tracing::info!(
            session = %session.id(),
            role = session.role().map(Role::as_str).unwrap_or_default(),
            "login completed"
        );
        CallbackResult::Success { session }
    }

    /// Logs the session out, deleting its store entry.
    ///
    /// Logging out an already-absent session is a quiet no-op.
    pub fn logout(&self, id: &SessionId) {
        if self.store.remove(id) {
            tracing::info!(session = %id, "logged out");
        }
    }
}

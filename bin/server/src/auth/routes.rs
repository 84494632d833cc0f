//! Authentication routes for login, callback, and logout.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use paineis_access::{AuthenticationError, CallbackResult, SessionId};
use serde::Deserialize;
use std::sync::Arc;
use time::Duration as TimeDuration;

use super::AppState;

/// Session cookie name.
pub(crate) const SESSION_COOKIE: &str = "session";

/// Query parameters for the authorization callback.
///
/// The provider may append parameters beyond these (e.g. `state`,
/// `session_state`); they are ignored. Absence of `code` means the visit
/// is still anonymous.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Initiates the login flow by redirecting to the identity provider.
pub async fn login(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let prompt = state.flow.login_prompt();
    Redirect::to(&prompt.url)
}

/// Handles the authorization callback from the identity provider.
pub async fn callback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CallbackQuery>,
    jar: CookieJar,
) -> Result<Response, AuthError> {
    if let Some(error) = query.error {
        tracing::warn!(error = %error, "provider returned an authorization error");
        return Err(AuthError::AuthenticationFailed);
    }

    // No code yet: the visit is anonymous, present the login redirect
    // again.
    let Some(code) = query.code.filter(|code| !code.trim().is_empty()) else {
        let prompt = state.flow.login_prompt();
        return Ok(Redirect::to(&prompt.url).into_response());
    };

    match state.flow.complete_login(&code).await {
        CallbackResult::Success { session } => {
            let max_age = (session.expires_at() - session.created_at()).num_minutes().max(1);
            let cookie = Cookie::build((SESSION_COOKIE, session.id().to_string()))
                .path("/")
                .http_only(true)
                .secure(state.session_config.secure_cookies)
                .same_site(SameSite::Lax)
                .max_age(TimeDuration::minutes(max_age));

            Ok((jar.add(cookie), Redirect::to("/nav")).into_response())
        }
        CallbackResult::NoRoleAssigned { .. } => Err(AuthError::NoRoleAssigned),
        CallbackResult::Failed(e) => Err(AuthError::Authentication(e)),
    }
}

/// Logs out the user by deleting their session.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    if let Some(session_cookie) = jar.get(SESSION_COOKIE) {
        let session_id = SessionId::from(session_cookie.value());
        state.flow.logout(&session_id);
    }

    // Remove the session cookie either way.
    let remove_session = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(TimeDuration::ZERO);

    (jar.add(remove_session), Redirect::to("/nav"))
}

/// Authentication errors surfaced to the browser.
///
/// Messages are deliberately generic: nothing here reveals whether an
/// e-mail exists in the directory or why the provider rejected a code.
#[derive(Debug)]
pub enum AuthError {
    /// The provider refused the authorization request.
    AuthenticationFailed,
    /// The identity has no role mapping in the directory.
    NoRoleAssigned,
    /// The login flow failed.
    Authentication(AuthenticationError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::AuthenticationFailed => (
                StatusCode::UNAUTHORIZED,
                "Falha na autenticação. Tente novamente.",
            ),
            Self::NoRoleAssigned => (
                StatusCode::FORBIDDEN,
                "Conta reconhecida, mas sem permissão de acesso.",
            ),
            Self::Authentication(e) => {
                tracing::error!(error = %e, "login failed");
                (
                    StatusCode::UNAUTHORIZED,
                    "Falha na autenticação. Tente novamente.",
                )
            }
        };

        (status, message).into_response()
    }
}

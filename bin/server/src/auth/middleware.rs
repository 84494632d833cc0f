//! Authentication extractors for Axum.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use paineis_access::{Session, SessionId};
use std::sync::Arc;

use super::AppState;
use super::routes::SESSION_COOKIE;

/// Extractor for requiring a live, logged-in session.
///
/// Requests without one are redirected to the login flow. An expired
/// session is deleted eagerly here, so the store never serves it again.
pub struct RequireAuth(pub Session);

impl<S> FromRequestParts<S> for RequireAuth
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthRejection::NotAuthenticated)?;

        let session_cookie = jar
            .get(SESSION_COOKIE)
            .ok_or(AuthRejection::NotAuthenticated)?;
        let session_id = SessionId::from(session_cookie.value());

        let session = app_state
            .flow
            .store()
            .get(&session_id)
            .ok_or(AuthRejection::NotAuthenticated)?;

        if session.is_expired() {
            app_state.flow.store().remove(&session_id);
            return Err(AuthRejection::SessionExpired);
        }

        if !session.logged_in() {
            return Err(AuthRejection::NotAuthenticated);
        }

        Ok(RequireAuth(session))
    }
}

/// Extractor for optionally getting the current session.
///
/// Yields `None` for anonymous requests instead of rejecting them.
pub struct OptionalAuth(pub Option<Session>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match RequireAuth::from_request_parts(parts, state).await {
            Ok(RequireAuth(session)) => Ok(OptionalAuth(Some(session))),
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}

/// Rejection type for authentication extractors.
#[derive(Debug)]
pub enum AuthRejection {
    NotAuthenticated,
    SessionExpired,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::NotAuthenticated | Self::SessionExpired => {
                Redirect::to("/auth/login").into_response()
            }
        }
    }
}

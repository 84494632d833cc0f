//! Navigation surface consumed by the dashboard front end.
//!
//! Thin presentation over the access engine: the ordered list of links a
//! session may open, plus the login redirect for anonymous visitors.

use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use crate::auth::{AppState, OptionalAuth};

/// Navigation model returned by `GET /nav`.
#[derive(Debug, Serialize)]
pub struct NavModel {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<NavUser>,
    pub pages: Vec<NavLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_url: Option<String>,
}

/// The signed-in user, as shown in the sidebar.
#[derive(Debug, Serialize)]
pub struct NavUser {
    pub name: String,
    pub role: String,
}

/// One navigation link.
#[derive(Debug, Serialize)]
pub struct NavLink {
    pub id: String,
    pub label: String,
    pub href: String,
}

/// Builds the navigation for the current session.
pub async fn nav(
    State(state): State<Arc<AppState>>,
    OptionalAuth(session): OptionalAuth,
) -> Json<NavModel> {
    let Some(session) = session else {
        let prompt = state.flow.login_prompt();
        return Json(NavModel {
            logged_in: false,
            user: None,
            pages: Vec::new(),
            login_url: Some(prompt.url),
        });
    };

    let pages = state
        .engine
        .visible_pages(Some(&session))
        .into_iter()
        .map(|entry| NavLink {
            id: entry.id().to_string(),
            label: entry.label().to_string(),
            href: format!("/pages/{}", entry.id()),
        })
        .collect();

    Json(NavModel {
        logged_in: true,
        user: Some(NavUser {
            name: session.name().to_string(),
            role: session
                .role()
                .map(|role| role.as_str().to_string())
                .unwrap_or_default(),
        }),
        pages,
        login_url: None,
    })
}

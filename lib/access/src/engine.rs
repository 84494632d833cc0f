//! Access decisions over the page permission table.

use crate::permission::{PageEntry, PageId, PermissionTable};
use crate::session::Session;

/// Outcome of an access check for one page.
///
/// The three refusal variants are deliberately distinct: an anonymous
/// visitor is sent to the login flow, a roleless session gets its own
/// notice, and an under-privileged role is denied without any hint of the
/// page's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The session may open the page.
    Granted,
    /// No live, logged-in session; the caller should redirect to login.
    RedirectToLogin,
    /// Authenticated session without an assigned role. Surfaced with its
    /// own message, never conflated with a login failure.
    NoRoleAssigned,
    /// The session's role does not cover the page (or the page is not
    /// registered).
    Denied,
}

/// Decides page reachability from a session and the permission table.
///
/// Holds the immutable table loaded at startup; safe to share across
/// concurrent handlers without locking.
#[derive(Debug, Clone)]
pub struct AccessEngine {
    table: PermissionTable,
}

impl AccessEngine {
    /// Creates an engine over the given table.
    #[must_use]
    pub fn new(table: PermissionTable) -> Self {
        Self { table }
    }

    /// Returns the underlying permission table.
    #[must_use]
    pub fn table(&self) -> &PermissionTable {
        &self.table
    }

    /// Decides whether the session may open the page.
    #[must_use]
    pub fn decide(&self, session: Option<&Session>, page: &PageId) -> AccessDecision {
        let Some(session) = session else {
            return AccessDecision::RedirectToLogin;
        };
        if !session.logged_in() || session.is_expired() {
            return AccessDecision::RedirectToLogin;
        }
        let Some(role) = session.role() else {
            return AccessDecision::NoRoleAssigned;
        };

        match self.table.get(page) {
            Some(entry) if entry.access().allows(role) => AccessDecision::Granted,
            Some(_) => {
                tracing::warn!(page = %page, role = %role, "page access denied");
                AccessDecision::Denied
            }
            None => AccessDecision::Denied,
        }
    }

    /// Returns true if the session may open the page.
    #[must_use]
    pub fn can_access(&self, session: Option<&Session>, page: &PageId) -> bool {
        matches!(self.decide(session, page), AccessDecision::Granted)
    }

    /// Returns the pages the session may open, in registry order.
    ///
    /// Used to build navigation; a page never appears here unless opening
    /// it would succeed.
    #[must_use]
    pub fn visible_pages(&self, session: Option<&Session>) -> Vec<&PageEntry> {
        self.table
            .entries()
            .iter()
            .filter(|entry| self.can_access(session, entry.id()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::PageAccess;
    use crate::role::Role;
    use crate::session::SessionId;
    use chrono::Duration;

    const REPORT_ROLES: &[&str] = &["Gestor", "Encarregado", "VENDAS"];

    fn table() -> PermissionTable {
        PermissionTable::new(vec![
            PageEntry::new("painel", "Painel geral", PageAccess::Public),
            PageEntry::new(
                "custos",
                "Custos",
                PageAccess::Roles(REPORT_ROLES.iter().map(|r| Role::new(*r)).collect()),
            ),
            PageEntry::new(
                "mapa-calor",
                "Mapa de calor",
                PageAccess::Roles(vec![Role::new("Gestor")]),
            ),
        ])
    }

    fn engine() -> AccessEngine {
        AccessEngine::new(table())
    }

    fn session_with_role(role: Option<Role>) -> Session {
        Session::authenticated(
            SessionId::generate(),
            "Maria".to_string(),
            "maria@autogeral.com".to_string(),
            "token".to_string(),
            role,
            Duration::hours(1),
        )
    }

    #[test]
    fn public_pages_grant_for_any_logged_in_role() {
        let engine = engine();
        for role in ["Gestor", "VENDAS", "Compras", "cargo-inexistente"] {
            let session = session_with_role(Some(Role::new(role)));
            assert!(
                engine.can_access(Some(&session), &PageId::new("painel")),
                "role {role} should reach the public page"
            );
        }
    }

    #[test]
    fn role_pages_grant_exactly_on_membership() {
        let engine = engine();
        let page = PageId::new("custos");
        for role in ["Gestor", "Encarregado", "VENDAS", "Compras", "Sócio"] {
            let session = session_with_role(Some(Role::new(role)));
            assert_eq!(
                engine.can_access(Some(&session), &page),
                REPORT_ROLES.contains(&role),
                "unexpected decision for role {role}"
            );
        }
    }

    #[test]
    fn no_session_reaches_nothing() {
        let engine = engine();
        for entry in engine.table().entries() {
            assert_eq!(
                engine.decide(None, entry.id()),
                AccessDecision::RedirectToLogin
            );
        }
        assert!(engine.visible_pages(None).is_empty());
    }

    #[test]
    fn expired_session_is_treated_as_logged_out() {
        let engine = engine();
        let session = Session::authenticated(
            SessionId::generate(),
            "Maria".to_string(),
            "maria@autogeral.com".to_string(),
            "token".to_string(),
            Some(Role::new("Gestor")),
            Duration::seconds(-1),
        );
        assert_eq!(
            engine.decide(Some(&session), &PageId::new("painel")),
            AccessDecision::RedirectToLogin
        );
    }

    #[test]
    fn roleless_session_is_denied_everywhere_with_its_own_signal() {
        let engine = engine();
        let session = session_with_role(None);
        for entry in engine.table().entries() {
            assert_eq!(
                engine.decide(Some(&session), entry.id()),
                AccessDecision::NoRoleAssigned
            );
        }
        assert!(engine.visible_pages(Some(&session)).is_empty());
    }

    #[test]
    fn under_privileged_role_is_denied_silently() {
        let engine = engine();
        let session = session_with_role(Some(Role::new("VENDAS")));
        assert_eq!(
            engine.decide(Some(&session), &PageId::new("mapa-calor")),
            AccessDecision::Denied
        );
    }

    #[test]
    fn unregistered_page_is_denied() {
        let engine = engine();
        let session = session_with_role(Some(Role::new("Gestor")));
        assert_eq!(
            engine.decide(Some(&session), &PageId::new("pagina-inexistente")),
            AccessDecision::Denied
        );
    }

    #[test]
    fn visible_pages_preserve_registry_order() {
        let engine = engine();
        let session = session_with_role(Some(Role::new("Gestor")));
        let ids: Vec<&str> = engine
            .visible_pages(Some(&session))
            .iter()
            .map(|e| e.id().as_str())
            .collect();
        assert_eq!(ids, vec!["painel", "custos", "mapa-calor"]);
    }

    #[test]
    fn visible_pages_never_include_forbidden_entries() {
        let engine = engine();
        let session = session_with_role(Some(Role::new("VENDAS")));
        let visible = engine.visible_pages(Some(&session));
        for entry in &visible {
            assert!(engine.can_access(Some(&session), entry.id()));
        }
        let ids: Vec<&str> = visible.iter().map(|e| e.id().as_str()).collect();
        assert_eq!(ids, vec!["painel", "custos"]);
    }
}

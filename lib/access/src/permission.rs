//! The page permission table.
//!
//! One declarative, ordered registry of report pages with per-page role
//! sets. Loaded once at startup and read-only afterwards; never keyed by
//! anything session-specific.

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Identifier of a registered report page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// Creates a page ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the page ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Who may open a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageAccess {
    /// Reachable by any logged-in session regardless of role.
    Public,
    /// Reachable only by the listed roles.
    Roles(Vec<Role>),
}

impl PageAccess {
    /// Returns true if the given role may open a page with this access.
    #[must_use]
    pub fn allows(&self, role: &Role) -> bool {
        match self {
            Self::Public => true,
            Self::Roles(roles) => roles.contains(role),
        }
    }
}

/// One registered report page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    id: PageId,
    label: String,
    access: PageAccess,
}

impl PageEntry {
    /// Creates a page entry.
    #[must_use]
    pub fn new(id: impl Into<PageId>, label: impl Into<String>, access: PageAccess) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            access,
        }
    }

    /// Returns the page ID.
    #[must_use]
    pub fn id(&self) -> &PageId {
        &self.id
    }

    /// Returns the navigation label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns who may open the page.
    #[must_use]
    pub fn access(&self) -> &PageAccess {
        &self.access
    }
}

/// Ordered, immutable registry of pages with their role sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionTable {
    entries: Vec<PageEntry>,
}

impl PermissionTable {
    /// Creates a table from the registry entries, preserving their order.
    #[must_use]
    pub fn new(entries: Vec<PageEntry>) -> Self {
        Self { entries }
    }

    /// Looks up a page by ID.
    #[must_use]
    pub fn get(&self, id: &PageId) -> Option<&PageEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Returns the registry entries in order.
    #[must_use]
    pub fn entries(&self) -> &[PageEntry] {
        &self.entries
    }

    /// Returns the number of registered pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no pages are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PermissionTable {
        PermissionTable::new(vec![
            PageEntry::new("painel", "Painel geral", PageAccess::Public),
            PageEntry::new(
                "custos",
                "Custos",
                PageAccess::Roles(vec![Role::new("Gestor"), Role::new("Sócio")]),
            ),
        ])
    }

    #[test]
    fn public_access_allows_any_role() {
        assert!(PageAccess::Public.allows(&Role::new("whatever")));
    }

    #[test]
    fn role_access_allows_only_members() {
        let access = PageAccess::Roles(vec![Role::new("Gestor")]);
        assert!(access.allows(&Role::new("Gestor")));
        assert!(!access.allows(&Role::new("VENDAS")));
    }

    #[test]
    fn get_finds_registered_pages() {
        let t = table();
        assert!(t.get(&PageId::new("custos")).is_some());
        assert!(t.get(&PageId::new("desconhecida")).is_none());
    }

    #[test]
    fn entries_preserve_registry_order() {
        let t = table();
        let ids: Vec<&str> = t.entries().iter().map(|e| e.id().as_str()).collect();
        assert_eq!(ids, vec!["painel", "custos"]);
    }

    #[test]
    fn access_serializes_as_tagged_data() {
        let json = serde_json::to_string(&PageAccess::Public).expect("serialize");
        assert_eq!(json, "\"public\"");

        let json =
            serde_json::to_string(&PageAccess::Roles(vec![Role::new("Gestor")])).expect("serialize");
        assert_eq!(json, r#"{"roles":["Gestor"]}"#);
    }

    #[test]
    fn table_roundtrips_through_serde() {
        let t = table();
        let json = serde_json::to_string(&t).expect("serialize");
        let parsed: PermissionTable = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(t, parsed);
    }
}

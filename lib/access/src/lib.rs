//! Authentication and page-level access control for the paineis dashboards.
//!
//! This crate provides:
//! - Identity-provider configuration and claims types (`ProviderConfig`, `IdTokenClaims`)
//! - Business roles ("cargo") and directory records (`Role`, `RoleRecord`)
//! - Session management (`Session`, `SessionId`, `SessionStore`)
//! - The page permission table and access decisions (`PermissionTable`, `AccessEngine`)
//! - The login-flow controller (`LoginFlow`)
//!
//! # Access Control Model
//!
//! Every report page requires a logged-in session. Each page in the
//! registry is either public (any authenticated role) or carries an
//! explicit set of roles allowed to open it. Roles come from the business
//! directory, keyed by the verified e-mail of the authenticated identity,
//! never by anything the user typed.
//!
//! # Example
//!
//! ```
//! use chrono::Duration;
//! use paineis_access::{
//!     AccessEngine, PageAccess, PageEntry, PageId, PermissionTable, Role, Session, SessionId,
//! };
//!
//! let table = PermissionTable::new(vec![
//!     PageEntry::new("painel", "Painel geral", PageAccess::Public),
//!     PageEntry::new(
//!         "custos",
//!         "Custos",
//!         PageAccess::Roles(vec![Role::new("Gestor")]),
//!     ),
//! ]);
//! let engine = AccessEngine::new(table);
//!
//! let session = Session::authenticated(
//!     SessionId::generate(),
//!     "Maria".to_string(),
//!     "maria@autogeral.com".to_string(),
//!     "token".to_string(),
//!     Some(Role::new("Gestor")),
//!     Duration::hours(1),
//! );
//!
//! assert!(engine.can_access(Some(&session), &PageId::new("custos")));
//! assert!(!engine.can_access(None, &PageId::new("custos")));
//! assert_eq!(engine.visible_pages(Some(&session)).len(), 2);
//! ```

pub mod claims;
pub mod config;
pub mod directory;
pub mod engine;
pub mod error;
pub mod flow;
pub mod permission;
pub mod provider;
pub mod role;
pub mod session;
pub mod store;

// Re-export main types at crate root
pub use claims::IdTokenClaims;
pub use config::ProviderConfig;
pub use directory::RoleDirectory;
pub use engine::{AccessDecision, AccessEngine};
pub use error::{AuthenticationError, DirectoryError, ExchangeError};
pub use flow::{CallbackResult, LoginFlow};
pub use permission::{PageAccess, PageEntry, PageId, PermissionTable};
pub use provider::{AuthorizationRequest, IdentityProvider, TokenExchange};
pub use role::{Role, RoleRecord};
pub use session::{Session, SessionId};
pub use store::SessionStore;

//! Process-wide session store.
//!
//! Keyed map from session ID to session record. Creates and deletes are
//! atomic per key; reads on one key never block writes to another beyond
//! the map guard itself. No background task lives here; expired entries
//! are removed eagerly by the middleware and periodically by the server's
//! sweep.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::session::{Session, SessionId};

/// Shared in-process store of live sessions.
///
/// Cheap to clone; all clones see the same map.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a session, replacing any previous entry under the same ID.
    pub fn insert(&self, session: Session) {
        self.inner.write().insert(session.id().clone(), session);
    }

    /// Returns a copy of the session for the given ID, if present.
    #[must_use]
    pub fn get(&self, id: &SessionId) -> Option<Session> {
        self.inner.read().get(id).cloned()
    }

    /// Deletes the session for the given ID. Returns whether an entry was
    /// actually removed; deleting an absent ID is a no-op.
    pub fn remove(&self, id: &SessionId) -> bool {
        self.inner.write().remove(id).is_some()
    }

    /// Deletes every expired session and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut map = self.inner.write();
        let before = map.len();
        map.retain(|_, session| session.is_valid());
        before - map.len()
    }

    /// Returns the number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns true if the store holds no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

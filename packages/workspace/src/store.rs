//! Sessions keyed by id.
//!
//! Each session sits behind its own mutex, so at most one edit per session
//! is in flight while different sessions proceed independently.

use crate::WorkspaceError;
use refine_editor::{EditSession, UndoStack};
use refine_schema::IdGenerator;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::info;

pub type SharedSession = Arc<Mutex<EditSession>>;

#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SharedSession>>,
    ids: Mutex<IdGenerator>,
    max_history: usize,
    max_undo_levels: usize,
}

impl SessionStore {
    pub fn new(max_history: usize, max_undo_levels: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ids: Mutex::new(IdGenerator::from_seed("session".to_string())),
            max_history,
            max_undo_levels,
        }
    }

    /// Open an empty session and return its id
    pub fn create(&self) -> String {
        let id = self.ids.lock().unwrap_or_else(PoisonError::into_inner).new_id();
        let session = EditSession::with_limits(
            id.clone(),
            self.max_history,
            UndoStack::with_max_levels(self.max_undo_levels),
        );
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), Arc::new(Mutex::new(session)));
        info!(session_id = %id, "Created session");
        id
    }

    pub fn get(&self, session_id: &str) -> Result<SharedSession, WorkspaceError> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
            .cloned()
            .ok_or_else(|| WorkspaceError::UnknownSession(session_id.to_string()))
    }

    pub fn remove(&self, session_id: &str) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(session_id)
            .is_some();
        if removed {
            info!(session_id, "Closed session");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn session_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }
}

/// Lock a session, recovering the state if a previous holder panicked
pub fn lock(session: &SharedSession) -> MutexGuard<'_, EditSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

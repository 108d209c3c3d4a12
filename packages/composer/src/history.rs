//! Shared local-history handle.

use inkstone_engine::UndoStack;
use std::sync::{Arc, Mutex, PoisonError};

/// Externally owned undo/redo handle for local sessions.
///
/// The composition root owns this state so history survives a remount of
/// the surrounding UI; it does not survive a change of session identity.
/// Exactly one session binds it at a time, and only in local mode.
#[derive(Clone, Default)]
pub struct SharedHistoryState {
    inner: Arc<Mutex<UndoStack>>,
}

impl SharedHistoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a closure against the underlying stack.
    pub fn with<R>(&self, f: impl FnOnce(&mut UndoStack) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn undo_levels(&self) -> usize {
        self.with(|stack| stack.undo_levels())
    }

    pub fn redo_levels(&self) -> usize {
        self.with(|stack| stack.redo_levels())
    }

    /// Drop all history, e.g. when session identity changes.
    pub fn clear(&self) {
        self.with(|stack| stack.clear());
    }
}

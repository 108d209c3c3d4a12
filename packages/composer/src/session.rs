//! # Session Composition
//!
//! Wires one editing session together: initial document state, history
//! branch, and viewport tracking.
//!
//! Configuration is read once at session construction and its decisions are
//! fixed for the session's lifetime; changing any mode flag requires
//! destroying the session and starting a new one. Document state and history
//! are not portable between local and collaborative modes.

use crate::bootstrap::populate_welcome_document;
use crate::collab::{HostEnv, ProviderFactory, ProviderHandle};
use crate::config::SessionConfig;
use crate::errors::ComposerError;
use crate::history::SharedHistoryState;
use crate::viewport::{ResizeSignal, ViewportTracker};
use inkstone_engine::{
    EditorTheme, EngineConfig, EngineError, EngineHandle, InitialDocumentState, Mutation,
    MutationResult,
};
use tracing::debug;

/// Fixed identifier for the shared collaborative document.
pub const COLLAB_SESSION_ID: &str = "main";

/// Decide how the engine seeds its document.
///
/// Total over the three mode booleans; every combination has a defined
/// result. Collaboration wins unconditionally: the provider supplies the
/// authoritative document, and the local builder must never run beside it,
/// or two writers would race to populate the same empty document.
pub fn select_initial_state(config: &SessionConfig) -> InitialDocumentState {
    if config.collaboration_enabled {
        InitialDocumentState::Absent
    } else if config.start_empty {
        InitialDocumentState::Empty
    } else {
        InitialDocumentState::Builder(populate_welcome_document)
    }
}

/// Mutually exclusive history wiring, selected once per session.
pub enum HistoryMode {
    /// Local undo/redo bound to an externally owned handle.
    Local(SharedHistoryState),

    /// Delegated to a collaborative provider.
    Collaborative {
        provider: Box<dyn ProviderHandle>,
        should_bootstrap: bool,
    },
}

impl HistoryMode {
    pub fn is_local(&self) -> bool {
        matches!(self, HistoryMode::Local(_))
    }

    pub fn is_collaborative(&self) -> bool {
        matches!(self, HistoryMode::Collaborative { .. })
    }
}

/// One instantiation of the editing surface: engine, history branch, and
/// viewport tracker, bound to one configuration and one document lifetime.
pub struct Session {
    engine: EngineHandle,
    history: HistoryMode,
    viewport: ViewportTracker,
    rich_text_enabled: bool,
}

impl Session {
    /// Compose and start a session.
    ///
    /// Errors raised while configuring the engine have already passed
    /// through the configured handler when this returns; they propagate
    /// unchanged to the caller, which owns recovery.
    pub fn start(
        config: &SessionConfig,
        env: &dyn HostEnv,
        resize_signal: &ResizeSignal,
        history: &SharedHistoryState,
        providers: &dyn ProviderFactory,
    ) -> Result<Self, ComposerError> {
        let initial_state = select_initial_state(config);
        debug!(
            namespace = %config.document_namespace,
            ?initial_state,
            collaboration = config.collaboration_enabled,
            "starting session"
        );

        let engine = EngineHandle::configure(EngineConfig {
            namespace: config.document_namespace.clone(),
            registered_node_types: config.registered_node_types.clone(),
            initial_state,
            on_error: config.error_handler.clone(),
            theme: EditorTheme::default(),
        })?;

        let history = if config.collaboration_enabled {
            let mut provider = providers.create(COLLAB_SESSION_ID);
            let should_bootstrap = !env.is_secondary_embedded_instance();
            provider.connect(should_bootstrap);
            debug!(should_bootstrap, "mounted collaborative provider");
            HistoryMode::Collaborative {
                provider,
                should_bootstrap,
            }
        } else {
            HistoryMode::Local(history.clone())
        };

        let viewport = ViewportTracker::mount(env, resize_signal);

        Ok(Self {
            engine,
            history,
            viewport,
            rich_text_enabled: config.rich_text_enabled,
        })
    }

    /// Apply a user-triggered mutation.
    ///
    /// Local sessions record the inverse for undo; collaborative sessions
    /// forward the mutation to the provider instead.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, ComposerError> {
        let local_history = match &self.history {
            HistoryMode::Local(history) => Some(history.clone()),
            HistoryMode::Collaborative { .. } => None,
        };

        if let Some(history) = local_history {
            let inverse = match mutation.to_inverse(self.engine.document()) {
                Ok(inverse) => inverse,
                Err(e) => {
                    let err = EngineError::from(e);
                    self.engine.report(&err);
                    return Err(err.into());
                }
            };
            let result = self.engine.apply(&mutation)?;
            history.with(|stack| stack.record(mutation, inverse));
            Ok(result)
        } else {
            let result = self.engine.apply(&mutation)?;
            let payload = serde_json::to_vec(&mutation)
                .map_err(|e| ComposerError::Provider(e.to_string()))?;
            if let HistoryMode::Collaborative { provider, .. } = &mut self.history {
                provider.broadcast(&payload);
            }
            Ok(result)
        }
    }

    /// Undo the most recent local batch. Collaborative sessions delegate
    /// history to the provider and refuse.
    pub fn undo(&mut self) -> Result<bool, ComposerError> {
        let history = match &self.history {
            HistoryMode::Local(history) => history.clone(),
            HistoryMode::Collaborative { .. } => return Err(ComposerError::HistoryDelegated),
        };

        let root = self.engine.document_mut();
        match history.with(|stack| stack.undo(root)) {
            Ok(applied) => Ok(applied),
            Err(e) => {
                let err = EngineError::from(e);
                self.engine.report(&err);
                Err(err.into())
            }
        }
    }

    /// Redo the most recently undone local batch.
    pub fn redo(&mut self) -> Result<bool, ComposerError> {
        let history = match &self.history {
            HistoryMode::Local(history) => history.clone(),
            HistoryMode::Collaborative { .. } => return Err(ComposerError::HistoryDelegated),
        };

        let root = self.engine.document_mut();
        match history.with(|stack| stack.redo(root)) {
            Ok(applied) => Ok(applied),
            Err(e) => {
                let err = EngineError::from(e);
                self.engine.report(&err);
                Err(err.into())
            }
        }
    }

    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    pub fn history_mode(&self) -> &HistoryMode {
        &self.history
    }

    pub fn viewport(&self) -> &ViewportTracker {
        &self.viewport
    }

    /// Rich-text sessions mount the toolbar; plain-text sessions do not.
    pub fn toolbar_enabled(&self) -> bool {
        self.rich_text_enabled
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let HistoryMode::Collaborative { provider, .. } = &mut self.history {
            debug!("disconnecting collaborative provider");
            provider.disconnect();
        }
        // Viewport subscription is released by the tracker's own Drop.
    }
}

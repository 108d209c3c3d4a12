//! # Inkstone Composer
//!
//! Document bootstrap and session-mode composition for the Inkstone editing
//! surface.
//!
//! This crate owns the composition root's hard decisions:
//!
//! - **Initial document state**: [`session::select_initial_state`] maps the
//!   three configuration booleans onto `{Absent, Empty, Builder}`. The
//!   welcome-document builder runs only for local, non-empty sessions, so a
//!   collaborative provider and the local builder can never race to populate
//!   the same document.
//! - **History mode**: [`session::HistoryMode`] mounts exactly one of local
//!   undo/redo or a collaborative provider per session.
//! - **Viewport density**: [`viewport::ViewportTracker`] flips a narrow/wide
//!   flag at a fixed breakpoint with scoped listener registration.
//! - **Error boundary**: every engine error passes through the session's
//!   single handler once, then propagates to the caller unchanged.
//!
//! Everything else here (placeholder copy, container classes) is
//! presentation glue derived from the same immutable configuration.

pub mod bootstrap;
pub mod collab;
pub mod config;
pub mod errors;
pub mod history;
pub mod session;
pub mod viewport;

pub use bootstrap::{populate_welcome_document, COMMUNITY_INVITE_URL};
pub use collab::{HeadlessHost, HostEnv, ProviderFactory, ProviderHandle};
pub use config::{container_classes, placeholder_text, SessionConfig};
pub use errors::ComposerError;
pub use history::SharedHistoryState;
pub use session::{select_initial_state, HistoryMode, Session, COLLAB_SESSION_ID};
pub use viewport::{ResizeSignal, ResizeSubscription, ViewportTracker, NARROW_VIEWPORT_MAX_PX};

// Re-export the engine surface consumed by composition roots
pub use inkstone_engine::{
    EngineError, EngineHandle, InitialDocumentState, Mutation, NodePath, UndoStack,
};

#[cfg(feature = "collaboration")]
pub use inkstone_engine::CollabDocument;

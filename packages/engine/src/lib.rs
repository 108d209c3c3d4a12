//! # Inkstone Engine
//!
//! Pluggable editing engine surface for the Inkstone document model.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ composer: session composition               │
//! │  - Selects initial document state           │
//! │  - Mounts history or collaboration          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ engine: configuration + document lifetime   │
//! │  - Validate construction record             │
//! │  - Seed initial document state              │
//! │  - Apply mutations with validation          │
//! │  - Local undo/redo stack                    │
//! │  - CRDT-backed baseline (optional)          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ model: typed document-node tree             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Errors raised during configuration or mutation pass through the
//! configured [`ErrorHandler`] exactly once and then propagate unchanged to
//! the caller; the engine performs no local recovery.

mod config;
mod engine;
mod errors;
mod mutations;
mod undo_stack;

#[cfg(feature = "collaboration")]
mod crdt;

pub use config::{default_node_types, EditorTheme, EngineConfig, ErrorHandler, InitialDocumentState};
pub use engine::{EngineHandle, RenderStats};
pub use errors::EngineError;
pub use mutations::{Mutation, MutationError, MutationResult, NodePath};
pub use undo_stack::{MutationBatch, UndoStack};

#[cfg(feature = "collaboration")]
pub use crdt::CollabDocument;

// Re-export common model types for convenience
pub use inkstone_model::{DocumentRoot, NodeKind};

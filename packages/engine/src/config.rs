//! # Engine Configuration
//!
//! The immutable construction record handed to [`crate::EngineHandle::configure`].
//!
//! A configuration is built once per editing session and never mutated; a
//! new session requires a new configuration. The error handler is a required
//! field: every error the engine raises during configuration or mutation
//! passes through it exactly once before propagating to the caller.

use crate::errors::EngineError;
use inkstone_model::{DocumentRoot, NodeKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Observer for engine errors. Invoked exactly once per error, after which
/// the error propagates unchanged to the caller, which owns recovery.
pub type ErrorHandler = Arc<dyn Fn(&EngineError) + Send + Sync>;

/// How the engine seeds its document at construction time.
#[derive(Clone, Copy)]
pub enum InitialDocumentState {
    /// No local document: an external collaborative provider is the
    /// authority. The engine starts with a bare root it never populates.
    Absent,

    /// Bare root plus one empty paragraph.
    Empty,

    /// The builder runs exactly once during engine initialization, against
    /// an empty root. Builders must re-check emptiness themselves: the
    /// engine may re-run default-state initialization across remounts.
    Builder(fn(&mut DocumentRoot)),
}

impl fmt::Debug for InitialDocumentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitialDocumentState::Absent => write!(f, "Absent"),
            InitialDocumentState::Empty => write!(f, "Empty"),
            InitialDocumentState::Builder(_) => write!(f, "Builder(..)"),
        }
    }
}

/// CSS class hooks applied to rendered nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorTheme {
    pub heading: String,
    pub quote: String,
    pub paragraph: String,
    pub list: String,
    pub link: String,
    pub text: String,
}

impl Default for EditorTheme {
    fn default() -> Self {
        Self {
            heading: "editor-heading".to_string(),
            quote: "editor-quote".to_string(),
            paragraph: "editor-paragraph".to_string(),
            list: "editor-list".to_string(),
            link: "editor-link".to_string(),
            text: "editor-text".to_string(),
        }
    }
}

/// Immutable engine construction record.
#[derive(Clone)]
pub struct EngineConfig {
    /// Namespace identifying the editor instance (must be non-empty).
    pub namespace: String,

    /// Node kinds this session accepts. Documents containing other kinds
    /// are configuration errors.
    pub registered_node_types: BTreeSet<NodeKind>,

    /// Initial document state selected by the composition layer.
    pub initial_state: InitialDocumentState,

    /// Required error observer.
    pub on_error: ErrorHandler,

    /// Class hooks for rendering.
    pub theme: EditorTheme,
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("namespace", &self.namespace)
            .field("registered_node_types", &self.registered_node_types)
            .field("initial_state", &self.initial_state)
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

/// The full node-type set. Registration is independent of presentation
/// mode: plain-text sessions register everything too and differ only in
/// which UI affordances are mounted.
pub fn default_node_types() -> BTreeSet<NodeKind> {
    [
        NodeKind::Root,
        NodeKind::Heading,
        NodeKind::Quote,
        NodeKind::Paragraph,
        NodeKind::List,
        NodeKind::ListItem,
        NodeKind::Link,
        NodeKind::Text,
    ]
    .into_iter()
    .collect()
}

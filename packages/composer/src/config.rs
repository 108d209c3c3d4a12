//! # Session Configuration
//!
//! The immutable record describing one editing session.
//!
//! A configuration is constructed once by the composition root and never
//! mutated; changing any of its values requires tearing the session down and
//! starting a new one. The three mode booleans fully determine document
//! bootstrap behavior (see [`crate::session::select_initial_state`]) and the
//! derived presentation strings below.

use inkstone_engine::{default_node_types, ErrorHandler};
use inkstone_model::NodeKind;
use std::collections::BTreeSet;
use std::fmt;

/// Immutable per-session configuration.
#[derive(Clone)]
pub struct SessionConfig {
    /// Delegate document authority to a collaborative provider.
    pub collaboration_enabled: bool,

    /// Mount rich-text affordances (toolbar, rich placeholder copy).
    pub rich_text_enabled: bool,

    /// Start from a bare document instead of the welcome content.
    pub start_empty: bool,

    /// Namespace identifying the editor instance.
    pub document_namespace: String,

    /// Node kinds registered with the engine.
    pub registered_node_types: BTreeSet<NodeKind>,

    /// Required error observer; every engine error passes through it once.
    pub error_handler: ErrorHandler,
}

impl SessionConfig {
    pub fn new(namespace: impl Into<String>, error_handler: ErrorHandler) -> Self {
        Self {
            collaboration_enabled: false,
            rich_text_enabled: true,
            start_empty: false,
            document_namespace: namespace.into(),
            registered_node_types: default_node_types(),
            error_handler,
        }
    }

    pub fn with_collaboration(mut self, enabled: bool) -> Self {
        self.collaboration_enabled = enabled;
        self
    }

    pub fn with_rich_text(mut self, enabled: bool) -> Self {
        self.rich_text_enabled = enabled;
        self
    }

    pub fn with_start_empty(mut self, start_empty: bool) -> Self {
        self.start_empty = start_empty;
        self
    }

    pub fn with_node_types(mut self, kinds: BTreeSet<NodeKind>) -> Self {
        self.registered_node_types = kinds;
        self
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("collaboration_enabled", &self.collaboration_enabled)
            .field("rich_text_enabled", &self.rich_text_enabled)
            .field("start_empty", &self.start_empty)
            .field("document_namespace", &self.document_namespace)
            .finish_non_exhaustive()
    }
}

/// Placeholder copy shown in an empty surface. Collaboration wins over
/// rich-text when both are enabled.
pub fn placeholder_text(config: &SessionConfig) -> &'static str {
    if config.collaboration_enabled {
        "Enter some collaborative rich text..."
    } else if config.rich_text_enabled {
        "Enter some rich text..."
    } else {
        "Enter some plain text..."
    }
}

/// CSS state classes for the surface container.
pub fn container_classes(config: &SessionConfig, tree_view_enabled: bool) -> String {
    let mut classes = String::from("editor-container");
    if tree_view_enabled {
        classes.push_str(" tree-view");
    }
    if !config.rich_text_enabled {
        classes.push_str(" plain-text");
    }
    classes
}

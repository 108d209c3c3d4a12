//! # Engine Handle
//!
//! The configured editing engine instance: one per session.
//!
//! `configure` validates the construction record, seeds the document from
//! the selected initial state, and performs the first render pass only once
//! the document tree is fully built, so renderers never observe a partially
//! constructed tree. Every error raised here or by later mutations goes
//! through the configured error handler exactly once and then propagates to
//! the caller.

use crate::config::{EditorTheme, EngineConfig, ErrorHandler, InitialDocumentState};
use crate::errors::EngineError;
use crate::mutations::{Mutation, MutationResult};
use inkstone_model::{
    walk_block, walk_inline, walk_list_item, BlockNode, DocumentRoot, InlineNode, ListItem,
    NodeKind, TextNode, Visitor,
};
use std::collections::BTreeSet;
use tracing::debug;

/// Live engine instance bound to one document lifetime.
pub struct EngineHandle {
    namespace: String,
    registered: BTreeSet<NodeKind>,
    theme: EditorTheme,
    on_error: ErrorHandler,
    document: DocumentRoot,
    version: u64,
}

/// Node counts from a render traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub blocks: usize,
    pub texts: usize,
}

impl EngineHandle {
    /// Build an engine from an immutable configuration record.
    ///
    /// On failure the configured handler observes the error once, then the
    /// same error is returned to the caller.
    pub fn configure(config: EngineConfig) -> Result<Self, EngineError> {
        let on_error = config.on_error.clone();
        Self::build(config).map_err(|err| {
            (on_error)(&err);
            err
        })
    }

    fn build(config: EngineConfig) -> Result<Self, EngineError> {
        if config.namespace.is_empty() {
            return Err(EngineError::Config(
                "namespace must not be empty".to_string(),
            ));
        }

        // The engine always needs a root, a paragraph to place the caret in,
        // and text leaves, whatever the session registers beyond that.
        for kind in [NodeKind::Root, NodeKind::Paragraph, NodeKind::Text] {
            if !config.registered_node_types.contains(&kind) {
                return Err(EngineError::UnregisteredNodeType(kind));
            }
        }

        let mut document = DocumentRoot::new();
        match config.initial_state {
            InitialDocumentState::Absent => {
                debug!(
                    namespace = %config.namespace,
                    "document authority delegated to collaborative provider"
                );
            }
            InitialDocumentState::Empty => {
                document.append(BlockNode::paragraph(Vec::new()));
            }
            InitialDocumentState::Builder(build) => {
                build(&mut document);
                check_registered(&document, &config.registered_node_types)?;
            }
        }

        let handle = Self {
            namespace: config.namespace,
            registered: config.registered_node_types,
            theme: config.theme,
            on_error: config.on_error,
            document,
            version: 0,
        };

        // First render pass: the document is fully built by this point.
        let stats = handle.render_pass();
        debug!(
            namespace = %handle.namespace,
            blocks = stats.blocks,
            texts = stats.texts,
            "engine configured"
        );

        Ok(handle)
    }

    /// Apply a mutation to the document.
    pub fn apply(&mut self, mutation: &Mutation) -> Result<MutationResult, EngineError> {
        match mutation.apply(&mut self.document) {
            Ok(()) => {
                self.version += 1;
                Ok(MutationResult {
                    version: self.version,
                })
            }
            Err(e) => {
                let err = EngineError::from(e);
                (self.on_error)(&err);
                Err(err)
            }
        }
    }

    /// Route an error raised outside the engine's own entry points through
    /// the configured handler. The composition layer uses this so that every
    /// session error reaches the single handler, wherever it originated.
    pub fn report(&self, err: &EngineError) {
        (self.on_error)(err);
    }

    /// Traverse the current tree and return node counts.
    pub fn render_pass(&self) -> RenderStats {
        let mut stats = StatsCollector::default();
        stats.visit_root(&self.document);
        RenderStats {
            blocks: stats.blocks,
            texts: stats.texts,
        }
    }

    pub fn document(&self) -> &DocumentRoot {
        &self.document
    }

    /// Mutable access for the history branch, which applies inverses
    /// directly rather than through [`EngineHandle::apply`].
    pub fn document_mut(&mut self) -> &mut DocumentRoot {
        &mut self.document
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn theme(&self) -> &EditorTheme {
        &self.theme
    }

    pub fn registered_node_types(&self) -> &BTreeSet<NodeKind> {
        &self.registered
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

/// Reject documents containing node kinds the session did not register.
fn check_registered(
    document: &DocumentRoot,
    registered: &BTreeSet<NodeKind>,
) -> Result<(), EngineError> {
    let mut collector = KindCollector::default();
    collector.visit_root(document);

    for kind in collector.kinds {
        if !registered.contains(&kind) {
            return Err(EngineError::UnregisteredNodeType(kind));
        }
    }
    Ok(())
}

#[derive(Default)]
struct KindCollector {
    kinds: BTreeSet<NodeKind>,
}

impl Visitor for KindCollector {
    fn visit_block(&mut self, block: &BlockNode) {
        self.kinds.insert(block.kind());
        walk_block(self, block);
    }

    fn visit_list_item(&mut self, item: &ListItem) {
        self.kinds.insert(NodeKind::ListItem);
        walk_list_item(self, item);
    }

    fn visit_inline(&mut self, inline: &InlineNode) {
        self.kinds.insert(inline.kind());
        walk_inline(self, inline);
    }

    fn visit_text(&mut self, _text: &TextNode) {
        self.kinds.insert(NodeKind::Text);
    }
}

#[derive(Default)]
struct StatsCollector {
    blocks: usize,
    texts: usize,
}

impl Visitor for StatsCollector {
    fn visit_block(&mut self, block: &BlockNode) {
        self.blocks += 1;
        walk_block(self, block);
    }

    fn visit_text(&mut self, _text: &TextNode) {
        self.texts += 1;
    }
}

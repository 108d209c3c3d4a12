//! # Document Mutations
//!
//! High-level semantic operations on document trees.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: Each mutation represents a semantic operation
//! 2. **Validated**: All mutations validate structural constraints first
//! 3. **Invertible**: Every mutation can compute its inverse against the
//!    tree it is about to change, which is what the undo stack records

use inkstone_model::{BlockNode, DocumentRoot, TextFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Index path addressing a node from the root down.
///
/// Segments are child indices: `[block]`, then for lists `[item]`, then
/// `[inline]`, then for links `[text]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePath(pub Vec<usize>);

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments: Vec<String> = self.0.iter().map(|s| s.to_string()).collect();
        write!(f, "/{}", segments.join("/"))
    }
}

/// Semantic mutations over the document tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a block at the given top-level index.
    InsertBlock { index: usize, block: BlockNode },

    /// Remove the block at the given top-level index (and all descendants).
    RemoveBlock { index: usize },

    /// Replace text content of a text node (atomic replacement).
    UpdateText { path: NodePath, content: String },

    /// Toggle a format flag on a text node. Self-inverse.
    ToggleFormat { path: NodePath, format: TextFormat },

    /// Replace the URL of a link node.
    SetLinkUrl { path: NodePath, url: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodePath),

    #[error("Node at {0} is not text")]
    NotText(NodePath),

    #[error("Node at {0} is not a link")]
    NotALink(NodePath),

    #[error("Block index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl Mutation {
    /// Validate without applying.
    pub fn validate(&self, root: &DocumentRoot) -> Result<(), MutationError> {
        match self {
            Mutation::InsertBlock { index, .. } => {
                if *index > root.len() {
                    return Err(MutationError::IndexOutOfRange {
                        index: *index,
                        len: root.len(),
                    });
                }
                Ok(())
            }

            Mutation::RemoveBlock { index } => {
                if *index >= root.len() {
                    return Err(MutationError::IndexOutOfRange {
                        index: *index,
                        len: root.len(),
                    });
                }
                Ok(())
            }

            Mutation::UpdateText { path, .. } | Mutation::ToggleFormat { path, .. } => root
                .resolve_text(&path.0)
                .map(|_| ())
                .ok_or_else(|| MutationError::NodeNotFound(path.clone())),

            Mutation::SetLinkUrl { path, .. } => root
                .resolve_link_url(&path.0)
                .map(|_| ())
                .ok_or_else(|| MutationError::NotALink(path.clone())),
        }
    }

    /// Apply mutation to the tree with validation.
    pub fn apply(&self, root: &mut DocumentRoot) -> Result<(), MutationError> {
        self.validate(root)?;

        match self {
            Mutation::InsertBlock { index, block } => {
                root.insert(*index, block.clone());
                Ok(())
            }

            Mutation::RemoveBlock { index } => {
                root.remove(*index)
                    .map(|_| ())
                    .ok_or(MutationError::IndexOutOfRange {
                        index: *index,
                        len: root.len(),
                    })
            }

            Mutation::UpdateText { path, content } => {
                let text = root
                    .resolve_text_mut(&path.0)
                    .ok_or_else(|| MutationError::NodeNotFound(path.clone()))?;
                text.content = content.clone();
                Ok(())
            }

            Mutation::ToggleFormat { path, format } => {
                let text = root
                    .resolve_text_mut(&path.0)
                    .ok_or_else(|| MutationError::NodeNotFound(path.clone()))?;
                text.toggle_format(*format);
                Ok(())
            }

            Mutation::SetLinkUrl { path, url } => {
                let slot = root
                    .resolve_link_url_mut(&path.0)
                    .ok_or_else(|| MutationError::NotALink(path.clone()))?;
                *slot = url.clone();
                Ok(())
            }
        }
    }

    /// Compute the inverse of this mutation against the tree it is about to
    /// change. Must be called before [`Mutation::apply`].
    pub fn to_inverse(&self, root: &DocumentRoot) -> Result<Mutation, MutationError> {
        match self {
            Mutation::InsertBlock { index, .. } => Ok(Mutation::RemoveBlock { index: *index }),

            Mutation::RemoveBlock { index } => {
                let block = root
                    .children
                    .get(*index)
                    .ok_or(MutationError::IndexOutOfRange {
                        index: *index,
                        len: root.len(),
                    })?;
                Ok(Mutation::InsertBlock {
                    index: *index,
                    block: block.clone(),
                })
            }

            Mutation::UpdateText { path, .. } => {
                let text = root
                    .resolve_text(&path.0)
                    .ok_or_else(|| MutationError::NodeNotFound(path.clone()))?;
                Ok(Mutation::UpdateText {
                    path: path.clone(),
                    content: text.content.clone(),
                })
            }

            // Toggling is its own inverse
            Mutation::ToggleFormat { .. } => Ok(self.clone()),

            Mutation::SetLinkUrl { path, .. } => {
                let current = root
                    .resolve_link_url(&path.0)
                    .ok_or_else(|| MutationError::NotALink(path.clone()))?;
                Ok(Mutation::SetLinkUrl {
                    path: path.clone(),
                    url: current.clone(),
                })
            }
        }
    }
}

/// Result of applying a mutation through the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// New document version number.
    pub version: u64,
}

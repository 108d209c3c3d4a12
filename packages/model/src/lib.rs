//! # Inkstone Document Model
//!
//! Typed document-node tree for rich-text content.
//!
//! The tree is the single source of truth for document structure:
//!
//! ```text
//! DocumentRoot
//!   └─ BlockNode (heading | quote | paragraph | list)
//!        └─ InlineNode (text | link)
//!             └─ TextNode (content + format set)
//! ```
//!
//! Structural invariants are enforced by construction rather than by runtime
//! checks: children are owned `Vec`s, so every node has exactly one parent
//! and the tree cannot contain cycles or shared subtrees. Only block nodes
//! can sit under the root, and only inline nodes can sit inside blocks.

pub mod format;
pub mod node;
pub mod visitor;

pub use format::TextFormat;
pub use node::{BlockNode, DocumentRoot, InlineNode, ListItem, ListKind, NodeKind, TextNode};
pub use visitor::{walk_block, walk_inline, walk_list_item, walk_root, Visitor};

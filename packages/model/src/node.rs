//! Document tree nodes.
//!
//! The root owns an ordered sequence of block nodes; blocks own ordered
//! inline content. `append` is order-preserving everywhere: children always
//! retain insertion order.

use crate::format::TextFormat;
use serde::{Deserialize, Serialize};

/// Discriminant for every node variant in the tree.
///
/// Used by the engine's node-type registry: a session only accepts documents
/// built from registered kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Root,
    Heading,
    Quote,
    Paragraph,
    List,
    ListItem,
    Link,
    Text,
}

/// List presentation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListKind {
    Bullet,
    Ordered,
}

/// Leaf text node: content plus a set of format flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub content: String,
    pub format: TextFormat,
}

impl TextNode {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            format: TextFormat::empty(),
        }
    }

    pub fn with_format(content: impl Into<String>, format: TextFormat) -> Self {
        Self {
            content: content.into(),
            format,
        }
    }

    /// Toggle a format flag. Toggling the same flag twice restores the
    /// original state.
    pub fn toggle_format(&mut self, format: TextFormat) {
        self.format.toggle(format);
    }
}

/// Inline content: plain/formatted text or a link wrapping text runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InlineNode {
    Text(TextNode),
    Link { url: String, children: Vec<TextNode> },
}

impl InlineNode {
    pub fn text(content: impl Into<String>) -> Self {
        InlineNode::Text(TextNode::new(content))
    }

    pub fn formatted(content: impl Into<String>, format: TextFormat) -> Self {
        InlineNode::Text(TextNode::with_format(content, format))
    }

    pub fn link(url: impl Into<String>, children: Vec<TextNode>) -> Self {
        InlineNode::Link {
            url: url.into(),
            children,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            InlineNode::Text(_) => NodeKind::Text,
            InlineNode::Link { .. } => NodeKind::Link,
        }
    }
}

/// One item of a list block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ListItem {
    pub children: Vec<InlineNode>,
}

impl ListItem {
    pub fn new(children: Vec<InlineNode>) -> Self {
        Self { children }
    }

    /// Append inline content, preserving insertion order.
    pub fn append(&mut self, inline: InlineNode) {
        self.children.push(inline);
    }
}

/// Top-level block node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BlockNode {
    Heading {
        level: u8,
        children: Vec<InlineNode>,
    },
    Quote {
        children: Vec<InlineNode>,
    },
    Paragraph {
        children: Vec<InlineNode>,
    },
    List {
        kind: ListKind,
        items: Vec<ListItem>,
    },
}

impl BlockNode {
    /// Heading with the given level, clamped to 1..=6.
    pub fn heading(level: u8, children: Vec<InlineNode>) -> Self {
        BlockNode::Heading {
            level: level.clamp(1, 6),
            children,
        }
    }

    pub fn quote(children: Vec<InlineNode>) -> Self {
        BlockNode::Quote { children }
    }

    pub fn paragraph(children: Vec<InlineNode>) -> Self {
        BlockNode::Paragraph { children }
    }

    pub fn list(kind: ListKind, items: Vec<ListItem>) -> Self {
        BlockNode::List { kind, items }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            BlockNode::Heading { .. } => NodeKind::Heading,
            BlockNode::Quote { .. } => NodeKind::Quote,
            BlockNode::Paragraph { .. } => NodeKind::Paragraph,
            BlockNode::List { .. } => NodeKind::List,
        }
    }

    /// Inline children for leaf blocks; `None` for lists, whose children
    /// are items rather than inline nodes.
    pub fn inline_children(&self) -> Option<&[InlineNode]> {
        match self {
            BlockNode::Heading { children, .. }
            | BlockNode::Quote { children }
            | BlockNode::Paragraph { children } => Some(children),
            BlockNode::List { .. } => None,
        }
    }
}

/// Root of a document tree.
///
/// There is exactly one root per document and it is the sole entry point of
/// traversal. All addressing (see [`DocumentRoot::resolve_text`]) starts
/// here with a block index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DocumentRoot {
    pub children: Vec<BlockNode>,
}

impl DocumentRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block, preserving insertion order.
    pub fn append(&mut self, block: BlockNode) {
        self.children.push(block);
    }

    /// Insert a block at `index`, clamped to the current length.
    pub fn insert(&mut self, index: usize, block: BlockNode) {
        let index = index.min(self.children.len());
        self.children.insert(index, block);
    }

    /// Remove and return the block at `index`, if present.
    pub fn remove(&mut self, index: usize) -> Option<BlockNode> {
        if index < self.children.len() {
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Resolve an index path to a text node.
    ///
    /// Path segments are child indices from the root down:
    /// `[block]`, then for lists `[item]`, then `[inline]`, then for links
    /// `[text]`. A path that stops early or runs past a leaf resolves to
    /// `None`.
    pub fn resolve_text(&self, path: &[usize]) -> Option<&TextNode> {
        let (&block, rest) = path.split_first()?;
        match self.children.get(block)? {
            BlockNode::Heading { children, .. }
            | BlockNode::Quote { children }
            | BlockNode::Paragraph { children } => resolve_in_inlines(children, rest),
            BlockNode::List { items, .. } => {
                let (&item, rest) = rest.split_first()?;
                resolve_in_inlines(&items.get(item)?.children, rest)
            }
        }
    }

    /// Mutable variant of [`DocumentRoot::resolve_text`].
    pub fn resolve_text_mut(&mut self, path: &[usize]) -> Option<&mut TextNode> {
        let (&block, rest) = path.split_first()?;
        match self.children.get_mut(block)? {
            BlockNode::Heading { children, .. }
            | BlockNode::Quote { children }
            | BlockNode::Paragraph { children } => resolve_in_inlines_mut(children, rest),
            BlockNode::List { items, .. } => {
                let (&item, rest) = rest.split_first()?;
                resolve_in_inlines_mut(&mut items.get_mut(item)?.children, rest)
            }
        }
    }

    /// Resolve an index path to a link node's URL.
    pub fn resolve_link_url(&self, path: &[usize]) -> Option<&String> {
        let (&block, rest) = path.split_first()?;
        let inlines = match self.children.get(block)? {
            BlockNode::Heading { children, .. }
            | BlockNode::Quote { children }
            | BlockNode::Paragraph { children } => children,
            BlockNode::List { items, .. } => {
                let (&item, new_rest) = rest.split_first()?;
                return resolve_link_url_ref_in(&items.get(item)?.children, new_rest);
            }
        };
        resolve_link_url_ref_in(inlines, rest)
    }

    /// Mutable variant of [`DocumentRoot::resolve_link_url`].
    pub fn resolve_link_url_mut(&mut self, path: &[usize]) -> Option<&mut String> {
        let (&block, rest) = path.split_first()?;
        let inlines = match self.children.get_mut(block)? {
            BlockNode::Heading { children, .. }
            | BlockNode::Quote { children }
            | BlockNode::Paragraph { children } => children,
            BlockNode::List { items, .. } => {
                let (&item, new_rest) = rest.split_first()?;
                let inlines = &mut items.get_mut(item)?.children;
                return resolve_link_url_in(inlines, new_rest);
            }
        };
        resolve_link_url_in(inlines, rest)
    }
}

fn resolve_in_inlines<'a>(inlines: &'a [InlineNode], path: &[usize]) -> Option<&'a TextNode> {
    let (&inline, rest) = path.split_first()?;
    match inlines.get(inline)? {
        InlineNode::Text(text) => {
            if rest.is_empty() {
                Some(text)
            } else {
                None
            }
        }
        InlineNode::Link { children, .. } => {
            let (&text, rest) = rest.split_first()?;
            if rest.is_empty() {
                children.get(text)
            } else {
                None
            }
        }
    }
}

fn resolve_in_inlines_mut<'a>(
    inlines: &'a mut [InlineNode],
    path: &[usize],
) -> Option<&'a mut TextNode> {
    let (&inline, rest) = path.split_first()?;
    match inlines.get_mut(inline)? {
        InlineNode::Text(text) => {
            if rest.is_empty() {
                Some(text)
            } else {
                None
            }
        }
        InlineNode::Link { children, .. } => {
            let (&text, rest) = rest.split_first()?;
            if rest.is_empty() {
                children.get_mut(text)
            } else {
                None
            }
        }
    }
}

fn resolve_link_url_ref_in<'a>(inlines: &'a [InlineNode], path: &[usize]) -> Option<&'a String> {
    let (&inline, rest) = path.split_first()?;
    if !rest.is_empty() {
        return None;
    }
    match inlines.get(inline)? {
        InlineNode::Link { url, .. } => Some(url),
        InlineNode::Text(_) => None,
    }
}

fn resolve_link_url_in<'a>(inlines: &'a mut [InlineNode], path: &[usize]) -> Option<&'a mut String> {
    let (&inline, rest) = path.split_first()?;
    if !rest.is_empty() {
        return None;
    }
    match inlines.get_mut(inline)? {
        InlineNode::Link { url, .. } => Some(url),
        InlineNode::Text(_) => None,
    }
}

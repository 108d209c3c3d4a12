//! Visitor pattern for traversing document trees immutably.
//!
//! This trait provides default implementations that walk the entire tree.
//! Override specific visit_* methods to perform custom actions on nodes.

use crate::node::{BlockNode, DocumentRoot, InlineNode, ListItem, TextNode};

pub trait Visitor: Sized {
    fn visit_root(&mut self, root: &DocumentRoot) {
        walk_root(self, root);
    }

    fn visit_block(&mut self, block: &BlockNode) {
        walk_block(self, block);
    }

    fn visit_list_item(&mut self, item: &ListItem) {
        walk_list_item(self, item);
    }

    fn visit_inline(&mut self, inline: &InlineNode) {
        walk_inline(self, inline);
    }

    fn visit_text(&mut self, _text: &TextNode) {
        // Leaf node, no children to walk
    }
}

pub fn walk_root<V: Visitor>(visitor: &mut V, root: &DocumentRoot) {
    for block in &root.children {
        visitor.visit_block(block);
    }
}

pub fn walk_block<V: Visitor>(visitor: &mut V, block: &BlockNode) {
    match block {
        BlockNode::Heading { children, .. }
        | BlockNode::Quote { children }
        | BlockNode::Paragraph { children } => {
            for inline in children {
                visitor.visit_inline(inline);
            }
        }
        BlockNode::List { items, .. } => {
            for item in items {
                visitor.visit_list_item(item);
            }
        }
    }
}

pub fn walk_list_item<V: Visitor>(visitor: &mut V, item: &ListItem) {
    for inline in &item.children {
        visitor.visit_inline(inline);
    }
}

pub fn walk_inline<V: Visitor>(visitor: &mut V, inline: &InlineNode) {
    match inline {
        InlineNode::Text(text) => visitor.visit_text(text),
        InlineNode::Link { children, .. } => {
            for text in children {
                visitor.visit_text(text);
            }
        }
    }
}

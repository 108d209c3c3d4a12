//! # CRDT-backed Document Storage
//!
//! Wraps Yjs (via `yrs`) to provide a convergent shared baseline for
//! collaborative sessions.
//!
//! The shared state holds a serialized snapshot of the document tree; merge
//! semantics and transport belong to the collaborative provider, not to this
//! crate. The local node tree remains a derived view that can be rebuilt
//! from the shared state at any time.

use crate::errors::EngineError;
use inkstone_model::DocumentRoot;
use yrs::updates::decoder::Decode;
use yrs::{Doc, GetString, ReadTxn, StateVector, Text, Transact, Update};

const CONTENT_KEY: &str = "document";

/// CRDT-backed document baseline.
pub struct CollabDocument {
    doc: Doc,
}

impl CollabDocument {
    /// Empty shared document. This is the expected baseline a bootstrapping
    /// participant seeds from.
    pub fn new() -> Self {
        Self { doc: Doc::new() }
    }

    /// Seed a shared document from an existing tree.
    pub fn from_root(root: &DocumentRoot) -> Result<Self, EngineError> {
        let mut collab = Self::new();
        collab.set_root(root)?;
        Ok(collab)
    }

    /// Replace the shared snapshot with the given tree.
    pub fn set_root(&mut self, root: &DocumentRoot) -> Result<(), EngineError> {
        let json = serde_json::to_string(root)
            .map_err(|e| EngineError::Collab(format!("snapshot encode failed: {e}")))?;

        let text = self.doc.get_or_insert_text(CONTENT_KEY);
        let mut txn = self.doc.transact_mut();
        let len = text.len(&txn);
        if len > 0 {
            text.remove_range(&mut txn, 0, len);
        }
        text.insert(&mut txn, 0, &json);
        Ok(())
    }

    /// Rebuild the document tree from the shared state.
    ///
    /// An untouched shared document yields an empty root.
    pub fn to_root(&self) -> Result<DocumentRoot, EngineError> {
        let text = self.doc.get_or_insert_text(CONTENT_KEY);
        let txn = self.doc.transact();
        let json = text.get_string(&txn);
        if json.is_empty() {
            return Ok(DocumentRoot::new());
        }
        serde_json::from_str(&json)
            .map_err(|e| EngineError::Collab(format!("snapshot decode failed: {e}")))
    }

    /// Encode the full state as an update for another participant.
    pub fn encode_update(&self) -> Vec<u8> {
        let txn = self.doc.transact();
        txn.encode_state_as_update_v1(&StateVector::default())
    }

    /// Apply an update received from another participant.
    pub fn apply_update(&mut self, update: &[u8]) -> Result<(), EngineError> {
        let update = Update::decode_v1(update)
            .map_err(|e| EngineError::Collab(format!("update decode failed: {e}")))?;
        let mut txn = self.doc.transact_mut();
        txn.apply_update(update);
        Ok(())
    }
}

impl Default for CollabDocument {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkstone_model::{BlockNode, InlineNode};

    #[test]
    fn test_empty_shared_document_yields_empty_root() {
        let collab = CollabDocument::new();
        let root = collab.to_root().unwrap();
        assert!(root.is_empty());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut root = DocumentRoot::new();
        root.append(BlockNode::paragraph(vec![InlineNode::text("shared")]));

        let collab = CollabDocument::from_root(&root).unwrap();
        assert_eq!(collab.to_root().unwrap(), root);
    }

    #[test]
    fn test_update_sync_converges() {
        let mut root = DocumentRoot::new();
        root.append(BlockNode::paragraph(vec![InlineNode::text("seeded")]));

        let seeder = CollabDocument::from_root(&root).unwrap();
        let update = seeder.encode_update();

        let mut joiner = CollabDocument::new();
        joiner.apply_update(&update).unwrap();

        assert_eq!(joiner.to_root().unwrap(), root);
    }
}

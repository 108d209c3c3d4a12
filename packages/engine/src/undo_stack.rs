//! # Undo/Redo Stack
//!
//! Tracks mutation history for local (non-collaborative) sessions.
//!
//! ## Design
//!
//! - Each mutation records its inverse before being applied
//! - Undo applies the inverses and moves the batch to the redo stack
//! - Redo reapplies the original mutations
//! - New mutations clear the redo stack
//! - Supports batched operations (group multiple mutations as one undo step)

use crate::mutations::{Mutation, MutationError};
use inkstone_model::DocumentRoot;

/// A group of mutations that are undone/redone together.
#[derive(Debug, Clone)]
pub struct MutationBatch {
    /// The mutations in this batch (in application order)
    pub mutations: Vec<Mutation>,

    /// The inverse mutations (in reverse order for undo)
    pub inverses: Vec<Mutation>,

    /// Optional description of this batch
    pub description: Option<String>,
}

impl MutationBatch {
    /// Create a single-mutation batch
    pub fn single(mutation: Mutation, inverse: Mutation) -> Self {
        Self {
            mutations: vec![mutation],
            inverses: vec![inverse],
            description: None,
        }
    }

    /// Add a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Undo/redo stack for one document lifetime.
#[derive(Debug)]
pub struct UndoStack {
    /// Stack of applied batches (most recent last)
    undo_stack: Vec<MutationBatch>,

    /// Stack of undone batches (most recent last)
    redo_stack: Vec<MutationBatch>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<MutationBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Apply a mutation and record it for undo
    pub fn apply(
        &mut self,
        mutation: &Mutation,
        root: &mut DocumentRoot,
    ) -> Result<(), MutationError> {
        // Generate inverse before applying
        let inverse = mutation.to_inverse(root)?;

        mutation.apply(root)?;

        self.record(mutation.clone(), inverse);
        Ok(())
    }

    /// Record an already-applied mutation and its inverse.
    ///
    /// Used when application happened elsewhere (e.g. through the engine
    /// handle) and only the history bookkeeping remains.
    pub fn record(&mut self, mutation: Mutation, inverse: Mutation) {
        if let Some(batch) = &mut self.current_batch {
            batch.mutations.push(mutation);
            batch.inverses.insert(0, inverse); // Inverses go in reverse order
        } else {
            self.push_batch(MutationBatch::single(mutation, inverse));
        }
    }

    /// Start a batch of mutations (will be undone/redone together)
    pub fn begin_batch(&mut self) {
        self.current_batch = Some(MutationBatch {
            mutations: Vec::new(),
            inverses: Vec::new(),
            description: None,
        });
    }

    /// End the current batch and push to undo stack
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if !batch.mutations.is_empty() {
                self.push_batch(batch);
            }
        }
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    fn push_batch(&mut self, batch: MutationBatch) {
        self.undo_stack.push(batch);

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // Clear redo stack (new action invalidates future)
        self.redo_stack.clear();
    }

    /// Undo the most recent batch. Returns false when there is nothing to
    /// undo.
    pub fn undo(&mut self, root: &mut DocumentRoot) -> Result<bool, MutationError> {
        if let Some(batch) = self.undo_stack.pop() {
            for inverse in &batch.inverses {
                inverse.apply(root)?;
            }

            self.redo_stack.push(batch);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Redo the most recently undone batch.
    pub fn redo(&mut self, root: &mut DocumentRoot) -> Result<bool, MutationError> {
        if let Some(batch) = self.redo_stack.pop() {
            for mutation in &batch.mutations {
                mutation.apply(root)?;
            }

            self.undo_stack.push(batch);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

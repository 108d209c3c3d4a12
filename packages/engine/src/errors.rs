//! Error types for the engine

use crate::mutations::MutationError;
use inkstone_model::NodeKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unregistered node type: {0:?}")]
    UnregisteredNodeType(NodeKind),

    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[cfg(feature = "collaboration")]
    #[error("Collaboration backend error: {0}")]
    Collab(String),
}

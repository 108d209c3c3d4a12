//! Error types for the composition layer

use inkstone_engine::EngineError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposerError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Collaboration provider error: {0}")]
    Provider(String),

    #[error("Undo history is owned by the collaborative provider")]
    HistoryDelegated,
}

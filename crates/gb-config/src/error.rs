use thiserror::Error;

/// Errors from loading or compiling a piece-set asset.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("duplicate definition name {0:?}")]
    DuplicateDefinition(String),

    #[error("duplicate behavior set name {0:?}")]
    DuplicateBehaviorSet(String),

    #[error("definition {definition:?} references unknown behavior set {set:?}")]
    UnknownBehaviorSet { definition: String, set: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

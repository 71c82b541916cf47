use thiserror::Error;

/// Invalid-usage errors from engine construction and piece-set switching.
///
/// Per-item runtime faults (behavior hooks, contact anomalies) are never
/// errors at this level — they are logged and contained so the frame loop
/// keeps running.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no piece sets were provided")]
    NoPieceSets,

    #[error("duplicate piece set name {0:?}")]
    DuplicatePieceSet(String),

    #[error("unknown piece set {0:?}")]
    UnknownPieceSet(String),

    #[error(
        "piece set {set:?} references variables beyond the supplied store; \
         pass the VariableStore the set was compiled against"
    )]
    VariableStoreMismatch { set: String },
}

pub type EngineResult<T> = Result<T, EngineError>;

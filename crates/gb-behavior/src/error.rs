use thiserror::Error;

use gb_piece::InstantiateError;

/// A fault raised by a behavior hook.
///
/// Contained at the dispatch boundary: the dispatcher logs it with the
/// definition/behavior identity and moves on to the next behavior.
#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error(transparent)]
    Instantiate(#[from] InstantiateError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;

//! Error types for grid construction and the automaton engine.

use thiserror::Error;

/// Errors surfaced by the simulation core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    /// A grid side length below 1 was requested.
    #[error("invalid grid size {0}, must be at least 1")]
    InvalidSize(usize),

    /// `step` was called before the engine was seeded.
    #[error("engine has not been seeded")]
    Uninitialized,

    /// Explicit grid content was not square.
    #[error("grid content is not square: {rows} rows, row of {cols} cells")]
    NotSquare { rows: usize, cols: usize },
}

pub type Result<T> = std::result::Result<T, LifeError>;

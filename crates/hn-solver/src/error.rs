//! Error types for solver operations.

use hn_core::error::HnError;
use hn_system::SystemError;
use thiserror::Error;

/// Errors that can occur while driving a network to steady state.
#[derive(Error, Debug)]
pub enum SolverError {
    /// Iteration stopped without reaching the residual tolerance.
    #[error("Unsolvable: {what}")]
    Unsolvable { what: String },

    #[error("Numeric error: {what}")]
    Numeric { what: String },

    #[error("System error: {0}")]
    System(#[from] SystemError),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for HnError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::System(inner) => inner.into(),
            other => HnError::Invariant {
                what: other.to_string(),
            },
        }
    }
}

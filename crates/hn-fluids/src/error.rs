//! Fluid property errors.

use hn_core::HnError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur while building or querying a liquid model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Non-physical property (zero or negative density, viscosity, ...).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// No catalog entry matches the requested name.
    #[error("Unknown liquid: {name}")]
    UnknownLiquid { name: String },
}

impl From<FluidError> for HnError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::NonPhysical { what } => HnError::InvalidArg {
                what: format!("Non-physical liquid property: {what}"),
            },
            FluidError::UnknownLiquid { name } => HnError::InvalidArg {
                what: format!("Unknown liquid: {name}"),
            },
        }
    }
}

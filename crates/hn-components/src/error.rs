//! Error types for component operations.

use hn_core::error::HnError;
use hn_fluids::FluidError;
use thiserror::Error;

/// Errors that can occur during component calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Fluid model error: {0}")]
    Fluid(#[from] FluidError),
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<ComponentError> for HnError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::NonPhysical { what } | ComponentError::InvalidArg { what } => {
                HnError::InvalidArg {
                    what: what.to_string(),
                }
            }
            ComponentError::Fluid(inner) => inner.into(),
        }
    }
}

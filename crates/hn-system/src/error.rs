//! Error types for system assembly.

use hn_components::ComponentError;
use hn_core::{HnError, VertexId};
use hn_graph::GraphError;
use thiserror::Error;

/// Errors raised while building a network or assembling its equations.
#[derive(Error, Debug)]
pub enum SystemError {
    #[error("{what} {index} out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("No component between vertex {from} and vertex {to}")]
    EdgeNotFound { from: VertexId, to: VertexId },

    #[error("System has not been initialized")]
    NotInitialized,

    #[error("System is already initialized")]
    AlreadyInitialized,

    #[error("Topology is frozen after initialization")]
    TopologyFrozen,

    #[error("Invalid argument: {what}")]
    InvalidArgument { what: String },

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error("Graph error: {0}")]
    Graph(GraphError),
}

pub type SystemResult<T> = Result<T, SystemError>;

impl SystemError {
    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        SystemError::InvalidArgument { what: what.into() }
    }
}

impl From<GraphError> for SystemError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::VertexOutOfRange { vertex, len } => SystemError::IndexOutOfRange {
                what: "vertex",
                index: vertex.as_usize(),
                len,
            },
            GraphError::EdgeOutOfRange { edge, len } => SystemError::IndexOutOfRange {
                what: "edge",
                index: edge.as_usize(),
                len,
            },
            GraphError::EdgeNotFound { from, to } => SystemError::EdgeNotFound { from, to },
            other => SystemError::Graph(other),
        }
    }
}

impl From<SystemError> for HnError {
    fn from(err: SystemError) -> Self {
        match err {
            SystemError::IndexOutOfRange { what, index, len } => {
                HnError::IndexOob { what, index, len }
            }
            SystemError::InvalidArgument { what } => HnError::InvalidArg { what },
            SystemError::Component(inner) => inner.into(),
            SystemError::Graph(inner) => inner.into(),
            other => HnError::Invariant {
                what: other.to_string(),
            },
        }
    }
}

//! Graph-specific error types.

use hn_core::{EdgeId, HnError, VertexId};

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph lookup and construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A vertex handle past the end of the vertex set.
    VertexOutOfRange { vertex: VertexId, len: usize },

    /// An edge handle past the end of the edge set.
    EdgeOutOfRange { edge: EdgeId, len: usize },

    /// Both vertices exist but no edge joins them.
    EdgeNotFound { from: VertexId, to: VertexId },

    /// The graph cannot hold this many vertices.
    CapacityExceeded { requested: usize },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::VertexOutOfRange { vertex, len } => {
                write!(f, "Vertex {} out of range (graph has {} vertices)", vertex, len)
            }
            GraphError::EdgeOutOfRange { edge, len } => {
                write!(f, "Edge {} out of range (graph has {} edges)", edge, len)
            }
            GraphError::EdgeNotFound { from, to } => {
                write!(f, "No edge from vertex {} to vertex {}", from, to)
            }
            GraphError::CapacityExceeded { requested } => {
                write!(f, "Cannot address {} vertices", requested)
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for HnError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::VertexOutOfRange { vertex, len } => HnError::IndexOob {
                what: "vertex",
                index: vertex.as_usize(),
                len,
            },
            GraphError::EdgeOutOfRange { edge, len } => HnError::IndexOob {
                what: "edge",
                index: edge.as_usize(),
                len,
            },
            other => HnError::Invariant {
                what: other.to_string(),
            },
        }
    }
}

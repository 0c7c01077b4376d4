//! hn-graph: directed network graph for hydronet.
//!
//! Provides:
//! - `NetworkGraph`, a payload-carrying directed graph with incoming and outgoing
//!   adjacency so every vertex can reach all of its incident edges
//! - topology queries used for equation layout (vertex roles, connected
//!   components, flow branches through pass-through junctions)
//!
//! # Example
//!
//! ```
//! use hn_graph::NetworkGraph;
//!
//! let mut graph: NetworkGraph<&str, &str> = NetworkGraph::new();
//! let a = graph.add_vertex("inlet");
//! let b = graph.add_vertex("outlet");
//! graph.add_edge(a, b, "pipe").unwrap();
//!
//! assert_eq!(graph.vertex_count(), 2);
//! assert_eq!(graph.successors(a).unwrap(), vec![b]);
//! assert_eq!(graph.predecessors(b).unwrap(), vec![a]);
//! ```

pub mod error;
pub mod graph;
pub mod topology;

pub use error::{GraphError, GraphResult};
pub use graph::NetworkGraph;
pub use topology::{BranchLabels, ComponentLabels, Degree, VertexRole};

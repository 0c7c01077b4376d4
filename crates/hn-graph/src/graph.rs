//! Core graph data structure.

use hn_core::{EdgeId, Id, VertexId};
use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::error::{GraphError, GraphResult};
use crate::topology::Degree;

/// Directed graph with a payload on every vertex and edge.
///
/// Vertices and edges are addressed by contiguous handles in insertion order.
/// Nothing is ever removed, so handles stay valid for the lifetime of the graph
/// and iteration order is stable across calls.
///
/// Incident-edge queries return handles sorted by index for determinism.
#[derive(Debug, Clone)]
pub struct NetworkGraph<V, E> {
    inner: DiGraph<V, E, u32>,
}

impl<V, E> Default for NetworkGraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

fn node(v: VertexId) -> NodeIndex<u32> {
    NodeIndex::new(v.as_usize())
}

fn edge_index(e: EdgeId) -> EdgeIndex<u32> {
    EdgeIndex::new(e.as_usize())
}

fn vertex_id(n: NodeIndex<u32>) -> VertexId {
    Id::from_index(n.index() as u32)
}

fn edge_id(e: EdgeIndex<u32>) -> EdgeId {
    Id::from_index(e.index() as u32)
}

impl<V, E> NetworkGraph<V, E> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            inner: DiGraph::default(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn contains_vertex(&self, v: VertexId) -> bool {
        v.as_usize() < self.vertex_count()
    }

    /// Add a vertex and return its handle.
    pub fn add_vertex(&mut self, payload: V) -> VertexId {
        vertex_id(self.inner.add_node(payload))
    }

    /// Grow the vertex set until it holds `count` vertices.
    ///
    /// `fill` builds the payload of each new vertex. Returns the handles that were
    /// created, in order; empty when the graph is already large enough.
    pub fn grow_to(
        &mut self,
        count: usize,
        mut fill: impl FnMut(VertexId) -> V,
    ) -> GraphResult<Vec<VertexId>> {
        if count > u32::MAX as usize {
            return Err(GraphError::CapacityExceeded { requested: count });
        }
        let mut created = Vec::new();
        while self.vertex_count() < count {
            let next = Id::from_index(self.vertex_count() as u32);
            created.push(self.add_vertex(fill(next)));
        }
        Ok(created)
    }

    /// Insert a directed edge `from -> to`. Both vertices must already exist.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, payload: E) -> GraphResult<EdgeId> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        Ok(edge_id(self.inner.add_edge(node(from), node(to), payload)))
    }

    pub fn vertex(&self, v: VertexId) -> GraphResult<&V> {
        self.check_vertex(v)?;
        self.inner
            .node_weight(node(v))
            .ok_or(GraphError::VertexOutOfRange {
                vertex: v,
                len: self.vertex_count(),
            })
    }

    pub fn vertex_mut(&mut self, v: VertexId) -> GraphResult<&mut V> {
        let len = self.vertex_count();
        self.inner
            .node_weight_mut(node(v))
            .ok_or(GraphError::VertexOutOfRange { vertex: v, len })
    }

    pub fn edge(&self, e: EdgeId) -> GraphResult<&E> {
        self.inner
            .edge_weight(edge_index(e))
            .ok_or(GraphError::EdgeOutOfRange {
                edge: e,
                len: self.edge_count(),
            })
    }

    pub fn edge_mut(&mut self, e: EdgeId) -> GraphResult<&mut E> {
        let len = self.edge_count();
        self.inner
            .edge_weight_mut(edge_index(e))
            .ok_or(GraphError::EdgeOutOfRange { edge: e, len })
    }

    /// Source and target of an edge.
    pub fn endpoints(&self, e: EdgeId) -> GraphResult<(VertexId, VertexId)> {
        self.inner
            .edge_endpoints(edge_index(e))
            .map(|(a, b)| (vertex_id(a), vertex_id(b)))
            .ok_or(GraphError::EdgeOutOfRange {
                edge: e,
                len: self.edge_count(),
            })
    }

    /// First edge inserted from `from` to `to`.
    pub fn find_edge(&self, from: VertexId, to: VertexId) -> GraphResult<EdgeId> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        self.inner
            .edges_connecting(node(from), node(to))
            .map(|e| e.id())
            .min()
            .map(edge_id)
            .ok_or(GraphError::EdgeNotFound { from, to })
    }

    /// Edges leaving `v`, sorted by edge index.
    pub fn outgoing(&self, v: VertexId) -> GraphResult<Vec<EdgeId>> {
        self.incident(v, Direction::Outgoing)
    }

    /// Edges entering `v`, sorted by edge index.
    pub fn incoming(&self, v: VertexId) -> GraphResult<Vec<EdgeId>> {
        self.incident(v, Direction::Incoming)
    }

    /// Targets of the edges leaving `v`, in edge order.
    pub fn successors(&self, v: VertexId) -> GraphResult<Vec<VertexId>> {
        self.outgoing(v)?
            .into_iter()
            .map(|e| self.endpoints(e).map(|(_, to)| to))
            .collect()
    }

    /// Sources of the edges entering `v`, in edge order.
    pub fn predecessors(&self, v: VertexId) -> GraphResult<Vec<VertexId>> {
        self.incoming(v)?
            .into_iter()
            .map(|e| self.endpoints(e).map(|(from, _)| from))
            .collect()
    }

    pub fn degree(&self, v: VertexId) -> GraphResult<Degree> {
        self.check_vertex(v)?;
        Ok(Degree {
            incoming: self
                .inner
                .edges_directed(node(v), Direction::Incoming)
                .count(),
            outgoing: self
                .inner
                .edges_directed(node(v), Direction::Outgoing)
                .count(),
        })
    }

    /// All vertex handles in index order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.inner.node_indices().map(vertex_id)
    }

    /// All edge handles in insertion order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.inner.edge_indices().map(edge_id)
    }

    fn incident(&self, v: VertexId, dir: Direction) -> GraphResult<Vec<EdgeId>> {
        self.check_vertex(v)?;
        let mut edges: Vec<EdgeId> = self
            .inner
            .edges_directed(node(v), dir)
            .map(|e| edge_id(e.id()))
            .collect();
        edges.sort();
        Ok(edges)
    }

    fn check_vertex(&self, v: VertexId) -> GraphResult<()> {
        if self.contains_vertex(v) {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex: v,
                len: self.vertex_count(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> (NetworkGraph<u8, char>, [VertexId; 3]) {
        let mut graph = NetworkGraph::new();
        let a = graph.add_vertex(0);
        let b = graph.add_vertex(1);
        let c = graph.add_vertex(2);
        graph.add_edge(a, b, 'x').unwrap();
        graph.add_edge(b, c, 'y').unwrap();
        (graph, [a, b, c])
    }

    #[test]
    fn edges_keep_insertion_order() {
        let (graph, _) = chain();
        let ids: Vec<u32> = graph.edge_ids().map(|e| e.index()).collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(*graph.edge(EdgeId::from_index(1)).unwrap(), 'y');
    }

    #[test]
    fn bidirectional_traversal() {
        let (graph, [a, b, c]) = chain();
        assert_eq!(graph.successors(b).unwrap(), vec![c]);
        assert_eq!(graph.predecessors(b).unwrap(), vec![a]);
        let deg = graph.degree(b).unwrap();
        assert_eq!((deg.incoming, deg.outgoing), (1, 1));
    }

    #[test]
    fn add_edge_requires_vertices() {
        let (mut graph, [a, _, _]) = chain();
        let err = graph.add_edge(a, VertexId::from_index(9), 'z').unwrap_err();
        assert_eq!(
            err,
            GraphError::VertexOutOfRange {
                vertex: VertexId::from_index(9),
                len: 3
            }
        );
    }

    #[test]
    fn grow_to_fills_new_vertices() {
        let mut graph: NetworkGraph<u32, ()> = NetworkGraph::new();
        graph.add_vertex(100);
        let created = graph.grow_to(4, |v| v.index() * 10).unwrap();
        assert_eq!(created.len(), 3);
        assert_eq!(*graph.vertex(VertexId::from_index(3)).unwrap(), 30);
        assert!(graph.grow_to(2, |_| 0).unwrap().is_empty());
    }

    #[test]
    fn find_edge_distinguishes_missing_vertex_and_missing_edge() {
        let (graph, [a, _, c]) = chain();
        assert!(matches!(
            graph.find_edge(a, c),
            Err(GraphError::EdgeNotFound { .. })
        ));
        assert!(matches!(
            graph.find_edge(VertexId::from_index(5), VertexId::from_index(6)),
            Err(GraphError::VertexOutOfRange { .. })
        ));
    }

    #[test]
    fn find_edge_prefers_first_parallel_edge() {
        let (mut graph, [a, b, _]) = chain();
        graph.add_edge(a, b, 'p').unwrap();
        assert_eq!(graph.find_edge(a, b).unwrap().index(), 0);
        assert_eq!(graph.outgoing(a).unwrap().len(), 2);
    }
}

//! Topology queries that fix the layout of the network equations.

use hn_core::{EdgeId, VertexId};
use petgraph::unionfind::UnionFind;

use crate::error::GraphResult;
use crate::graph::NetworkGraph;

/// Number of edges entering and leaving a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Degree {
    pub incoming: usize,
    pub outgoing: usize,
}

impl Degree {
    pub fn total(&self) -> usize {
        self.incoming + self.outgoing
    }

    /// Exactly one edge in and one edge out: flow passes straight through.
    pub fn is_pass_through(&self) -> bool {
        self.incoming == 1 && self.outgoing == 1
    }

    pub fn role(&self) -> VertexRole {
        match self.total() {
            0 => VertexRole::Isolated,
            1 => VertexRole::Terminal,
            _ => VertexRole::Junction,
        }
    }
}

/// Role a vertex plays in the equation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexRole {
    /// No incident edges.
    Isolated,
    /// Exactly one incident edge: a network boundary.
    Terminal,
    /// Two or more incident edges.
    Junction,
}

/// Undirected connected-component label for every vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentLabels {
    /// `labels[v]` is the component of vertex `v`, numbered by first appearance.
    pub labels: Vec<usize>,
    pub count: usize,
}

impl ComponentLabels {
    /// `true` for the highest-indexed vertex of each closed component.
    ///
    /// A component is closed when none of its vertices is a terminal, so no
    /// flow crosses its boundary and its mass balances sum to zero. One of them
    /// is dropped. Components with a terminal keep every balance, since the
    /// terminal inflows make the rows independent. Isolated vertices count as
    /// closed components of their own.
    pub fn reference_vertices(&self, roles: &[VertexRole]) -> Vec<bool> {
        let mut open = vec![false; self.count];
        let mut last = vec![usize::MAX; self.count];
        for (v, &label) in self.labels.iter().enumerate() {
            last[label] = v;
            if roles.get(v) == Some(&VertexRole::Terminal) {
                open[label] = true;
            }
        }
        let mut is_ref = vec![false; self.labels.len()];
        for (label, v) in last.into_iter().enumerate() {
            if v != usize::MAX && !open[label] {
                is_ref[v] = true;
            }
        }
        is_ref
    }
}

/// Flow-branch label for every edge.
///
/// Edges chained through pass-through vertices carry the same volumetric flow
/// and share one branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchLabels {
    /// `labels[e]` is the branch of edge `e`, numbered by first appearance.
    pub labels: Vec<usize>,
    pub count: usize,
}

impl BranchLabels {
    /// Edges of branch `branch`, in edge order.
    pub fn edges_of(&self, branch: usize) -> Vec<EdgeId> {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b == branch)
            .map(|(e, _)| EdgeId::from_index(e as u32))
            .collect()
    }
}

fn normalize(raw: Vec<usize>) -> (Vec<usize>, usize) {
    let mut seen: Vec<Option<usize>> = vec![None; raw.len()];
    let mut count = 0;
    let labels: Vec<usize> = raw
        .into_iter()
        .map(|root| {
            *seen[root].get_or_insert_with(|| {
                count += 1;
                count - 1
            })
        })
        .collect();
    (labels, count)
}

/// Connected components, ignoring edge direction.
pub fn connected_components<V, E>(graph: &NetworkGraph<V, E>) -> GraphResult<ComponentLabels> {
    let mut uf = UnionFind::<usize>::new(graph.vertex_count());
    for e in graph.edge_ids() {
        let (from, to) = graph.endpoints(e)?;
        uf.union(from.as_usize(), to.as_usize());
    }
    let (labels, count) = normalize(uf.into_labeling());
    Ok(ComponentLabels { labels, count })
}

/// Group edges into flow branches.
pub fn flow_branches<V, E>(graph: &NetworkGraph<V, E>) -> GraphResult<BranchLabels> {
    let mut uf = UnionFind::<usize>::new(graph.edge_count());
    for v in graph.vertex_ids() {
        if graph.degree(v)?.is_pass_through() {
            let inflow = graph.incoming(v)?;
            let outflow = graph.outgoing(v)?;
            uf.union(inflow[0].as_usize(), outflow[0].as_usize());
        }
    }
    let (labels, count) = normalize(uf.into_labeling());
    Ok(BranchLabels { labels, count })
}

/// Role of every vertex, in index order.
pub fn vertex_roles<V, E>(graph: &NetworkGraph<V, E>) -> GraphResult<Vec<VertexRole>> {
    graph
        .vertex_ids()
        .map(|v| graph.degree(v).map(|d| d.role()))
        .collect()
}

/// Terminal vertices touching the ends of a branch, with the edge that reaches them.
pub fn branch_terminals<V, E>(
    graph: &NetworkGraph<V, E>,
    branches: &BranchLabels,
    branch: usize,
) -> GraphResult<Vec<(VertexId, EdgeId)>> {
    let mut terminals = Vec::new();
    for e in branches.edges_of(branch) {
        let (from, to) = graph.endpoints(e)?;
        for v in [from, to] {
            if graph.degree(v)?.role() == VertexRole::Terminal {
                terminals.push((v, e));
            }
        }
    }
    Ok(terminals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(n: usize, edges: &[(u32, u32)]) -> NetworkGraph<(), ()> {
        let mut graph = NetworkGraph::new();
        graph.grow_to(n, |_| ()).unwrap();
        for &(a, b) in edges {
            graph
                .add_edge(VertexId::from_index(a), VertexId::from_index(b), ())
                .unwrap();
        }
        graph
    }

    #[test]
    fn degree_roles() {
        let d = |incoming, outgoing| Degree { incoming, outgoing };
        assert_eq!(d(0, 0).role(), VertexRole::Isolated);
        assert_eq!(d(0, 1).role(), VertexRole::Terminal);
        assert_eq!(d(2, 0).role(), VertexRole::Junction);
        assert!(d(1, 1).is_pass_through());
        assert!(!d(2, 1).is_pass_through());
    }

    #[test]
    fn components_and_references() {
        // 0 -> 1 -> 2, 3 isolated, 4 -> 5
        let graph = graph_with(6, &[(0, 1), (1, 2), (4, 5)]);
        let comps = connected_components(&graph).unwrap();
        assert_eq!(comps.count, 3);
        assert_eq!(comps.labels, vec![0, 0, 0, 1, 2, 2]);
        let roles = vertex_roles(&graph).unwrap();
        // both lines have terminals: only the isolated vertex is a reference
        assert_eq!(
            comps.reference_vertices(&roles),
            vec![false, false, false, true, false, false]
        );
    }

    #[test]
    fn closed_loop_drops_one_balance() {
        // ring 0 -> 1 -> 2 -> 0 next to the line 3 -> 4
        let graph = graph_with(5, &[(0, 1), (1, 2), (2, 0), (3, 4)]);
        let comps = connected_components(&graph).unwrap();
        let roles = vertex_roles(&graph).unwrap();
        assert_eq!(
            comps.reference_vertices(&roles),
            vec![false, false, true, false, false]
        );
    }

    #[test]
    fn series_edges_share_a_branch() {
        let graph = graph_with(3, &[(0, 1), (1, 2)]);
        let branches = flow_branches(&graph).unwrap();
        assert_eq!(branches.count, 1);
        assert_eq!(branches.labels, vec![0, 0]);

        let terminals = branch_terminals(&graph, &branches, 0).unwrap();
        assert_eq!(terminals.len(), 2);
        assert_eq!(terminals[0].0, VertexId::from_index(0));
        assert_eq!(terminals[1].0, VertexId::from_index(2));
    }

    #[test]
    fn split_junction_separates_branches() {
        // 0 -> 1, 1 -> 2, 1 -> 3
        let graph = graph_with(4, &[(0, 1), (1, 2), (1, 3)]);
        let branches = flow_branches(&graph).unwrap();
        assert_eq!(branches.count, 3);
        let roles = vertex_roles(&graph).unwrap();
        assert_eq!(roles[1], VertexRole::Junction);
        assert_eq!(roles[3], VertexRole::Terminal);
    }

    #[test]
    fn converging_pair_is_not_pass_through() {
        // 0 -> 1 <- 2: vertex 1 has two incoming edges
        let graph = graph_with(3, &[(0, 1), (2, 1)]);
        assert_eq!(flow_branches(&graph).unwrap().count, 2);
    }
}

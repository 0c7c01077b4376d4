//! Equation structure fixed at initialization.

use hn_core::{EdgeId, VertexId};
use hn_graph::topology::{self, BranchLabels, ComponentLabels, VertexRole};
use hn_graph::{GraphResult, NetworkGraph};

/// Row and column structure of the network equations.
///
/// One energy row per edge in insertion order, followed by one mass row per
/// vertex. The highest-indexed vertex of a closed component (one without
/// terminals, isolated vertices included) gets no mass row.
#[derive(Debug, Clone)]
pub struct EquationLayout {
    roles: Vec<VertexRole>,
    components: ComponentLabels,
    branches: BranchLabels,
    mass_rows: Vec<VertexId>,
    energy_rows: usize,
}

impl EquationLayout {
    pub(crate) fn build<V, E>(graph: &NetworkGraph<V, E>) -> GraphResult<Self> {
        let roles = topology::vertex_roles(graph)?;
        let components = topology::connected_components(graph)?;
        let branches = topology::flow_branches(graph)?;
        let mass_rows = components
            .reference_vertices(&roles)
            .into_iter()
            .zip(graph.vertex_ids())
            .filter(|(is_ref, _)| !is_ref)
            .map(|(_, v)| v)
            .collect();
        Ok(Self {
            roles,
            components,
            branches,
            mass_rows,
            energy_rows: graph.edge_count(),
        })
    }

    pub fn role(&self, v: VertexId) -> VertexRole {
        self.roles
            .get(v.as_usize())
            .copied()
            .unwrap_or(VertexRole::Isolated)
    }

    pub fn roles(&self) -> &[VertexRole] {
        &self.roles
    }

    pub fn components(&self) -> &ComponentLabels {
        &self.components
    }

    pub fn branches(&self) -> &BranchLabels {
        &self.branches
    }

    /// Branch that edge `e` belongs to.
    pub fn branch_of(&self, e: EdgeId) -> Option<usize> {
        self.branches.labels.get(e.as_usize()).copied()
    }

    /// Vertices that carry a mass-balance row, in index order.
    pub fn mass_rows(&self) -> &[VertexId] {
        &self.mass_rows
    }

    pub fn energy_rows(&self) -> usize {
        self.energy_rows
    }

    /// Total residual length: edges + vertices - closed components.
    pub fn rows(&self) -> usize {
        self.energy_rows + self.mass_rows.len()
    }
}

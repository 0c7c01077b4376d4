//! Network container and known/unknown classification.

use std::rc::Rc;

use hn_components::FluidComponent;
use hn_core::units::{Pressure, Velocity, VolumeRate, m3ps, mps, pa};
use hn_core::{EdgeId, VertexId};
use hn_fluids::Liquid;
use hn_graph::NetworkGraph;
use hn_graph::topology::{self, VertexRole};
use nalgebra::DVector;
use tracing::{debug, trace};

use crate::error::{SystemError, SystemResult};
use crate::guess::{Category, GuessBounds, MeanOrUniform, SeedStrategy};
use crate::layout::EquationLayout;
use crate::quantity::{Shared, SiQuantity};
use crate::registry::Registry;
use crate::state::State;

/// Vertex payload: the liquid present and its flow condition.
#[derive(Debug)]
pub struct Vertex {
    pub(crate) liquid: Rc<Liquid>,
    pub(crate) state: State,
}

impl Vertex {
    fn new(liquid: Rc<Liquid>) -> Self {
        Self {
            liquid,
            state: State::new(),
        }
    }

    pub fn liquid(&self) -> &Rc<Liquid> {
        &self.liquid
    }

    pub fn state(&self) -> &State {
        &self.state
    }
}

/// Edge payload: the component and the flow through it.
///
/// Edges on the same flow branch share one flow cell after initialization.
#[derive(Debug)]
pub struct Edge {
    pub(crate) component: Rc<dyn FluidComponent>,
    pub(crate) flow: Shared<VolumeRate>,
}

impl Edge {
    pub fn component(&self) -> &Rc<dyn FluidComponent> {
        &self.component
    }

    pub fn flow(&self) -> &Shared<VolumeRate> {
        &self.flow
    }
}

pub type Network = NetworkGraph<Vertex, Edge>;

/// Steady-state network of fluid components and the quantities that describe it.
///
/// Build the topology with [`System::add_fluid_component`], fix boundary
/// conditions with the `set_known_*` methods, then call [`System::initialize`]
/// once. After that the topology is frozen and the residual and initial-guess
/// queries become available.
#[derive(Debug)]
pub struct System {
    graph: Network,
    default_liquid: Rc<Liquid>,
    speeds: Registry<Velocity>,
    pressures: Registry<Pressure>,
    flows: Registry<VolumeRate>,
    bounds: GuessBounds,
    layout: Option<EquationLayout>,
}

impl System {
    /// Empty network. Vertices created later receive `liquid`.
    pub fn new(liquid: Liquid) -> Self {
        Self {
            graph: Network::new(),
            default_liquid: Rc::new(liquid),
            speeds: Registry::new(),
            pressures: Registry::new(),
            flows: Registry::new(),
            bounds: GuessBounds::default(),
            layout: None,
        }
    }

    /// Network with `n` unconnected vertices, all holding `liquid`.
    pub fn with_vertices(liquid: Liquid, n: usize) -> SystemResult<Self> {
        let mut system = Self::new(liquid);
        system.grow_to(n)?;
        Ok(system)
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Read-only view of the network graph.
    pub fn graph(&self) -> &Network {
        &self.graph
    }

    pub fn default_liquid(&self) -> &Rc<Liquid> {
        &self.default_liquid
    }

    pub fn is_initialized(&self) -> bool {
        self.layout.is_some()
    }

    /// Equation layout, available once initialized.
    pub fn layout(&self) -> SystemResult<&EquationLayout> {
        self.layout.as_ref().ok_or(SystemError::NotInitialized)
    }

    pub fn guess_bounds(&self) -> &GuessBounds {
        &self.bounds
    }

    pub fn set_guess_bounds(&mut self, bounds: GuessBounds) {
        self.bounds = bounds;
    }

    /// Insert `component` on a directed edge `u -> v`.
    ///
    /// Missing vertices up to `max(u, v)` are created with the default liquid.
    pub fn add_fluid_component(
        &mut self,
        component: Rc<dyn FluidComponent>,
        u: usize,
        v: usize,
    ) -> SystemResult<EdgeId> {
        if self.is_initialized() {
            return Err(SystemError::TopologyFrozen);
        }
        if u == v {
            return Err(SystemError::invalid(format!(
                "component '{}' cannot connect vertex {u} to itself",
                component.name()
            )));
        }
        let needed = u
            .max(v)
            .checked_add(1)
            .ok_or_else(|| SystemError::invalid("vertex index too large"))?;
        self.grow_to(needed)?;

        let from = self.vertex_id(u)?;
        let to = self.vertex_id(v)?;
        let name = component.name().to_owned();
        let edge = self.graph.add_edge(
            from,
            to,
            Edge {
                component,
                flow: Shared::new(m3ps(0.0)),
            },
        )?;
        debug!(edge = %edge, from = u, to = v, component = %name, "component added");
        Ok(edge)
    }

    /// Liquid at vertex `u`.
    pub fn liquid(&self, u: usize) -> SystemResult<&Rc<Liquid>> {
        Ok(&self.graph.vertex(self.vertex_id(u)?)?.liquid)
    }

    /// Place `liquid` at vertex `u`.
    ///
    /// Allowed after initialization: the liquid changes values, not the
    /// equation structure.
    pub fn set_liquid(&mut self, u: usize, liquid: Rc<Liquid>) -> SystemResult<()> {
        let id = self.vertex_id(u)?;
        trace!(vertex = u, liquid = liquid.name(), "liquid set");
        self.graph.vertex_mut(id)?.liquid = liquid;
        Ok(())
    }

    /// Flow condition at vertex `u`.
    pub fn state(&self, u: usize) -> SystemResult<&State> {
        Ok(&self.graph.vertex(self.vertex_id(u)?)?.state)
    }

    /// First component inserted on `u -> v`.
    pub fn component(&self, u: usize, v: usize) -> SystemResult<&Rc<dyn FluidComponent>> {
        let from = self.vertex_id(u)?;
        let to = self.vertex_id(v)?;
        let edge = self.graph.find_edge(from, to)?;
        Ok(&self.graph.edge(edge)?.component)
    }

    /// Fix the speed at vertex `v`.
    ///
    /// Allocates the speed when the vertex has none yet. After initialization a
    /// known terminal speed also fixes the flow of its branch.
    pub fn set_known_speed(&mut self, v: usize, value: Velocity) -> SystemResult<()> {
        check_value(value, v)?;
        let id = self.vertex_id(v)?;
        let cell = self.graph.vertex_mut(id)?.state.speed_or_insert(value);
        cell.set(value);
        let reclassified = self.speeds.mark_known(&cell);
        trace!(vertex = v, speed = value.value, reclassified, "speed known");

        if self.is_initialized() {
            self.refresh_terminal_flow(id)?;
        }
        Ok(())
    }

    /// Fix the static pressure at vertex `v`.
    pub fn set_known_static_pressure(&mut self, v: usize, value: Pressure) -> SystemResult<()> {
        check_value(value, v)?;
        let id = self.vertex_id(v)?;
        let cell = self
            .graph
            .vertex_mut(id)?
            .state
            .static_pressure_or_insert(value);
        cell.set(value);
        let reclassified = self.pressures.mark_known(&cell);
        trace!(vertex = v, pressure = value.value, reclassified, "static pressure known");
        Ok(())
    }

    /// Derive the unknowns from the topology and freeze it.
    ///
    /// Terminals get a speed and a static pressure, junctions a static
    /// pressure. Edges chained through pass-through vertices share one flow;
    /// that flow is known when a terminal at either end has a known speed.
    pub fn initialize(&mut self) -> SystemResult<()> {
        if self.is_initialized() {
            return Err(SystemError::AlreadyInitialized);
        }
        let layout = EquationLayout::build(&self.graph)?;

        let vertices: Vec<VertexId> = self.graph.vertex_ids().collect();
        for v in vertices {
            let role = layout.role(v);
            if role == VertexRole::Isolated {
                continue;
            }
            let state = &mut self.graph.vertex_mut(v)?.state;
            let pressure = state.static_pressure_or_insert(pa(0.0));
            if role == VertexRole::Terminal {
                let speed = state.speed_or_insert(mps(0.0));
                self.speeds.register_unknown(&speed);
            }
            self.pressures.register_unknown(&pressure);
        }

        let branches = layout.branches();
        for branch in 0..branches.count {
            let edges = branches.edges_of(branch);
            let Some((&first, rest)) = edges.split_first() else {
                continue;
            };
            let cell = self.graph.edge(first)?.flow.clone();
            for &e in rest {
                self.graph.edge_mut(e)?.flow = cell.clone();
            }
            match self.known_terminal_flow(&layout, branch)? {
                Some(flow) => {
                    cell.set(flow);
                    self.flows.mark_known(&cell);
                }
                None => {
                    self.flows.register_unknown(&cell);
                }
            }
        }

        debug!(
            vertices = self.vertex_count(),
            edges = self.edge_count(),
            branches = branches.count,
            rows = layout.rows(),
            unknowns = self.n_unknowns(),
            "system initialized"
        );
        self.layout = Some(layout);
        Ok(())
    }

    /// Number of solver unknowns.
    pub fn n_unknowns(&self) -> usize {
        self.speeds.unknown().len() + self.pressures.unknown().len() + self.flows.unknown().len()
    }

    pub fn known_speeds(&self) -> &[Shared<Velocity>] {
        self.speeds.known()
    }

    pub fn unknown_speeds(&self) -> &[Shared<Velocity>] {
        self.speeds.unknown()
    }

    pub fn known_static_pressures(&self) -> &[Shared<Pressure>] {
        self.pressures.known()
    }

    pub fn unknown_static_pressures(&self) -> &[Shared<Pressure>] {
        self.pressures.unknown()
    }

    pub fn known_volumetric_flows(&self) -> &[Shared<VolumeRate>] {
        self.flows.known()
    }

    pub fn unknown_volumetric_flows(&self) -> &[Shared<VolumeRate>] {
        self.flows.unknown()
    }

    /// Current values of the unknowns: `[speeds | static pressures | flows]`.
    pub fn unknown_values(&self) -> DVector<f64> {
        let values: Vec<f64> = self
            .speeds
            .unknown_values()
            .into_iter()
            .chain(self.pressures.unknown_values())
            .chain(self.flows.unknown_values())
            .collect();
        DVector::from_vec(values)
    }

    /// Write a solver vector back into the unknown cells.
    pub fn write_unknowns(&self, x: &DVector<f64>) -> SystemResult<()> {
        if x.len() != self.n_unknowns() {
            return Err(SystemError::invalid(format!(
                "expected {} unknowns, got {}",
                self.n_unknowns(),
                x.len()
            )));
        }
        if let Some(i) = x.iter().position(|v| !v.is_finite()) {
            return Err(SystemError::invalid(format!(
                "unknown {i} is not finite: {}",
                x[i]
            )));
        }
        let values = x.as_slice();
        let (speeds, rest) = values.split_at(self.speeds.unknown().len());
        let (pressures, flows) = rest.split_at(self.pressures.unknown().len());
        self.speeds.write_unknowns(speeds);
        self.pressures.write_unknowns(pressures);
        self.flows.write_unknowns(flows);
        Ok(())
    }

    /// Starting point for a solver, freshly seeded on every call.
    pub fn initial_vector(&self) -> SystemResult<DVector<f64>> {
        self.initial_vector_with(&mut MeanOrUniform::from_entropy())
    }

    /// Starting point produced by `strategy`, laid out like [`System::unknown_values`].
    pub fn initial_vector_with<S: SeedStrategy + ?Sized>(
        &self,
        strategy: &mut S,
    ) -> SystemResult<DVector<f64>> {
        self.layout()?;
        let mut values = Vec::with_capacity(self.n_unknowns());
        values.extend(self.seed(strategy, Category::Speed, &self.speeds)?);
        values.extend(self.seed(strategy, Category::StaticPressure, &self.pressures)?);
        values.extend(self.seed(strategy, Category::VolumetricFlow, &self.flows)?);
        Ok(DVector::from_vec(values))
    }

    fn seed<S: SeedStrategy + ?Sized, Q: SiQuantity>(
        &self,
        strategy: &mut S,
        category: Category,
        registry: &Registry<Q>,
    ) -> SystemResult<Vec<f64>> {
        let count = registry.unknown().len();
        let values = strategy.seed(
            category,
            &registry.known_values(),
            count,
            self.bounds.range(category),
        );
        if values.len() != count {
            return Err(SystemError::invalid(format!(
                "seed strategy produced {} {} values, expected {count}",
                values.len(),
                Q::KIND
            )));
        }
        Ok(values)
    }

    fn grow_to(&mut self, count: usize) -> SystemResult<()> {
        let liquid = Rc::clone(&self.default_liquid);
        let created = self
            .graph
            .grow_to(count, |_| Vertex::new(Rc::clone(&liquid)))?;
        if !created.is_empty() {
            trace!(created = created.len(), total = count, "vertices added");
        }
        Ok(())
    }

    pub(crate) fn vertex_id(&self, index: usize) -> SystemResult<VertexId> {
        match VertexId::try_from_usize(index) {
            Some(id) if self.graph.contains_vertex(id) => Ok(id),
            _ => Err(SystemError::IndexOutOfRange {
                what: "vertex",
                index,
                len: self.vertex_count(),
            }),
        }
    }

    /// Flow fixed by a known terminal speed at either end of `branch`.
    fn known_terminal_flow(
        &self,
        layout: &EquationLayout,
        branch: usize,
    ) -> SystemResult<Option<VolumeRate>> {
        for (v, e) in topology::branch_terminals(&self.graph, layout.branches(), branch)? {
            let Some(speed) = self.graph.vertex(v)?.state.speed() else {
                continue;
            };
            if self.speeds.is_known(speed) {
                return Ok(Some(self.graph.edge(e)?.component.flow_at(speed.get())));
            }
        }
        Ok(None)
    }

    fn refresh_terminal_flow(&mut self, v: VertexId) -> SystemResult<()> {
        let Some(layout) = self.layout.as_ref() else {
            return Ok(());
        };
        if layout.role(v) != VertexRole::Terminal {
            return Ok(());
        }
        let mut incident = self.graph.incoming(v)?;
        incident.extend(self.graph.outgoing(v)?);
        let Some((edge, branch)) = incident
            .first()
            .and_then(|&e| layout.branch_of(e).map(|b| (e, b)))
        else {
            return Ok(());
        };
        let Some(flow) = self.known_terminal_flow(layout, branch)? else {
            return Ok(());
        };
        let cell = self.graph.edge(edge)?.flow.clone();
        cell.set(flow);
        let reclassified = self.flows.mark_known(&cell);
        trace!(vertex = %v, branch, flow = flow.value, reclassified, "branch flow known");
        Ok(())
    }
}

fn check_value<Q: SiQuantity>(value: Q, vertex: usize) -> SystemResult<()> {
    if value.si().is_finite() {
        Ok(())
    } else {
        Err(SystemError::invalid(format!(
            "{} at vertex {vertex} must be finite",
            Q::KIND
        )))
    }
}

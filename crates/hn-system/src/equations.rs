//! Residual assembly.
//!
//! Energy rows compare the specific energy at the two ends of every component:
//!
//! ```text
//! E(x, e) = p_x / ρ_x + ½ s²
//! r_e     = E(u, e) - [E(v, e) + Δp_e(Q_e) / ρ_u]        [J/kg]
//! ```
//!
//! `s` is the vertex speed when the vertex has one, otherwise the port speed of
//! edge `e`. Mass rows count inflow as positive:
//!
//! ```text
//! r_x = Σ_in Q - Σ_out Q + q_ext(x)                       [m³/s]
//! ```
//!
//! where `q_ext` is the flow entering through an inlet terminal (`+s·A`) or
//! leaving through an outlet terminal (`-s·A`). A terminal row therefore ties
//! the terminal speed to the flow of its edge. Only components without
//! terminals lose a row, see [`EquationLayout`](crate::EquationLayout).

use hn_core::units::{SpecEnergy, VolumeRate, m3ps};
use hn_core::{EdgeId, VertexId};
use nalgebra::DVector;
use tracing::trace;

use crate::error::{SystemError, SystemResult};
use crate::system::{Edge, System};

impl System {
    /// Energy residual of every edge, in insertion order.
    pub fn bernoulli_vec(&self) -> SystemResult<DVector<f64>> {
        self.layout()?;
        let rows = self
            .graph()
            .edge_ids()
            .map(|e| self.energy_residual(e).map(|r| r.value))
            .collect::<SystemResult<Vec<f64>>>()?;
        Ok(DVector::from_vec(rows))
    }

    /// Mass residual of every vertex with a mass row, in index order.
    pub fn massflow_vec(&self) -> SystemResult<DVector<f64>> {
        let layout = self.layout()?;
        let rows = layout
            .mass_rows()
            .iter()
            .map(|&x| self.mass_residual(x).map(|r| r.value))
            .collect::<SystemResult<Vec<f64>>>()?;
        Ok(DVector::from_vec(rows))
    }

    /// `[bernoulli_vec; massflow_vec]`.
    pub fn return_vec(&self) -> SystemResult<DVector<f64>> {
        let energy = self.bernoulli_vec()?;
        let mass = self.massflow_vec()?;
        let out = DVector::from_iterator(
            energy.len() + mass.len(),
            energy.iter().chain(mass.iter()).copied(),
        );
        trace!(rows = out.len(), norm = out.norm(), "residuals assembled");
        Ok(out)
    }

    fn energy_residual(&self, e: EdgeId) -> SystemResult<SpecEnergy> {
        let (u, v) = self.graph().endpoints(e)?;
        let edge = self.graph().edge(e)?;
        let upstream = self.graph().vertex(u)?;
        let drop = edge
            .component
            .pressure_drop(&upstream.liquid, edge.flow.get())?;
        let loss: SpecEnergy = drop / upstream.liquid.density();
        Ok(self.energy(u, edge)? - (self.energy(v, edge)? + loss))
    }

    /// Specific energy at vertex `x` seen from `edge`.
    fn energy(&self, x: VertexId, edge: &Edge) -> SystemResult<SpecEnergy> {
        let vertex = self.graph().vertex(x)?;
        let pressure = vertex
            .state
            .static_pressure()
            .ok_or(SystemError::NotInitialized)?
            .get();
        let speed = match vertex.state.speed() {
            Some(cell) => cell.get(),
            None => edge.component.port_speed(edge.flow.get()),
        };
        let static_part: SpecEnergy = pressure / vertex.liquid.density();
        let kinetic: SpecEnergy = speed * speed * 0.5;
        Ok(static_part + kinetic)
    }

    fn mass_residual(&self, x: VertexId) -> SystemResult<VolumeRate> {
        let mut net = self.boundary_inflow(x)?;
        for e in self.graph().incoming(x)? {
            net += self.graph().edge(e)?.flow.get();
        }
        for e in self.graph().outgoing(x)? {
            net -= self.graph().edge(e)?.flow.get();
        }
        Ok(net)
    }

    /// Flow crossing the network boundary at a terminal vertex.
    fn boundary_inflow(&self, x: VertexId) -> SystemResult<VolumeRate> {
        let none = m3ps(0.0);
        let Some(speed) = self.graph().vertex(x)?.state.speed() else {
            return Ok(none);
        };
        let degree = self.graph().degree(x)?;
        let (edges, sign) = match (degree.incoming, degree.outgoing) {
            (0, 1) => (self.graph().outgoing(x)?, 1.0),
            (1, 0) => (self.graph().incoming(x)?, -1.0),
            _ => return Ok(none),
        };
        match edges.first() {
            Some(&e) => Ok(self.graph().edge(e)?.component.flow_at(speed.get()) * sign),
            None => Ok(none),
        }
    }
}

//! Core trait for component models.

use crate::error::ComponentResult;
use hn_core::units::{Area, Pressure, Velocity, VolumeRate};
use hn_fluids::Liquid;
use std::fmt;

/// An element placed on a directed network edge (inlet = source vertex,
/// outlet = target vertex).
///
/// Components are deterministic functions of the flow and their parameters.
pub trait FluidComponent: fmt::Debug + Send + Sync {
    /// Component name for debugging and identification.
    fn name(&self) -> &str;

    /// Flow area at the component ports.
    fn cross_section(&self) -> Area;

    /// Static pressure drop `p_inlet - p_outlet` caused by the element at the
    /// given volumetric flow.
    ///
    /// Positive flow runs inlet → outlet. Passive elements return a drop with
    /// the sign of the flow; machines that add energy (pumps) return a negative
    /// drop when delivering forward flow.
    fn pressure_drop(&self, liquid: &Liquid, flow: VolumeRate) -> ComponentResult<Pressure>;

    /// Mean velocity at the ports for a given flow.
    fn port_speed(&self, flow: VolumeRate) -> Velocity {
        flow / self.cross_section()
    }

    /// Volumetric flow carried at a given port velocity.
    fn flow_at(&self, speed: Velocity) -> VolumeRate {
        speed * self.cross_section()
    }
}

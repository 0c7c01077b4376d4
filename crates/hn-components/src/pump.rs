//! Pump component model.

use crate::common::{check_finite, check_positive, signed_square};
use crate::error::{ComponentError, ComponentResult};
use crate::traits::FluidComponent;
use hn_core::units::{Area, Length, Pressure, VolumeRate, circle_area, pa};
use hn_fluids::Liquid;

/// Centrifugal pump described by a quadratic head curve.
///
/// ## Model
///
/// ```text
/// ΔP_gain(Q) = ΔP_shutoff - k Q|Q|
/// pressure_drop(Q) = -ΔP_gain(Q)
/// ```
///
/// `ΔP_shutoff` is the pressure rise at zero flow and `k` [Pa·s²/m⁶] sets how
/// quickly the curve falls off with delivered flow. The curve is evaluated
/// for reverse flow as well, where it keeps rising.
#[derive(Clone, Debug)]
pub struct Pump {
    name: String,
    /// Pressure rise at zero flow
    pub shutoff_pressure: Pressure,
    /// Curve coefficient (Pa per (m³/s)²)
    pub curve_k: f64,
    /// Suction/discharge bore diameter
    pub diameter: Length,
}

impl Pump {
    /// Create a new pump.
    ///
    /// # Errors
    /// Returns error if parameters are out of physical bounds.
    pub fn new(
        name: String,
        shutoff_pressure: Pressure,
        curve_k: f64,
        diameter: Length,
    ) -> ComponentResult<Self> {
        if !(shutoff_pressure.value.is_finite() && shutoff_pressure.value >= 0.0) {
            return Err(ComponentError::InvalidArg {
                what: "pump shutoff pressure cannot be negative",
            });
        }
        if !(curve_k.is_finite() && curve_k >= 0.0) {
            return Err(ComponentError::InvalidArg {
                what: "pump curve coefficient cannot be negative",
            });
        }
        check_positive(diameter.value, "pump diameter must be positive")?;
        Ok(Self {
            name,
            shutoff_pressure,
            curve_k,
            diameter,
        })
    }

    /// Pressure rise delivered at a given flow.
    pub fn pressure_gain(&self, flow: VolumeRate) -> Pressure {
        pa(self.shutoff_pressure.value - self.curve_k * signed_square(flow.value))
    }

    /// Flow at which the pump no longer adds pressure.
    pub fn runout_flow(&self) -> Option<VolumeRate> {
        if self.curve_k > 0.0 {
            Some(hn_core::units::m3ps(
                (self.shutoff_pressure.value / self.curve_k).sqrt(),
            ))
        } else {
            None
        }
    }
}

impl FluidComponent for Pump {
    fn name(&self) -> &str {
        &self.name
    }

    fn cross_section(&self) -> Area {
        circle_area(self.diameter)
    }

    fn pressure_drop(&self, _liquid: &Liquid, flow: VolumeRate) -> ComponentResult<Pressure> {
        check_finite(flow.value, "volumetric flow")?;
        Ok(-self.pressure_gain(flow))
    }
}

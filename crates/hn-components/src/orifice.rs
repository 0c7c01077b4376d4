//! Sharp-edged orifice for incompressible flow.

use crate::common::{check_finite, check_positive, signed_square};
use crate::error::ComponentResult;
use crate::traits::FluidComponent;
use hn_core::units::{Area, Pressure, VolumeRate, pa};
use hn_fluids::Liquid;

/// Orifice plate: `ΔP = ρ/2 · (Q / (Cd A))·|Q / (Cd A)|`.
///
/// The ports are sized by the throat area.
#[derive(Debug, Clone)]
pub struct Orifice {
    name: String,
    /// Discharge coefficient (dimensionless, typically 0.6-0.9)
    pub cd: f64,
    /// Orifice throat area
    pub area: Area,
}

impl Orifice {
    /// Create a new orifice.
    pub fn new(name: String, cd: f64, area: Area) -> ComponentResult<Self> {
        check_positive(cd, "discharge coefficient must be positive")?;
        check_positive(area.value, "orifice area must be positive")?;
        Ok(Self { name, cd, area })
    }

    /// Flow passed for a given pressure drop (inverse of `pressure_drop`).
    pub fn flow_for_drop(&self, liquid: &Liquid, dp: Pressure) -> VolumeRate {
        let rho = liquid.density().value;
        let q = self.cd * self.area.value * (2.0 * dp.value.abs() / rho).sqrt();
        hn_core::units::m3ps(q.copysign(dp.value))
    }
}

impl FluidComponent for Orifice {
    fn name(&self) -> &str {
        &self.name
    }

    fn cross_section(&self) -> Area {
        self.area
    }

    fn pressure_drop(&self, liquid: &Liquid, flow: VolumeRate) -> ComponentResult<Pressure> {
        check_finite(flow.value, "volumetric flow")?;
        let throat_speed = flow.value / (self.cd * self.area.value);
        let dp = 0.5 * liquid.density().value * signed_square(throat_speed);
        check_finite(dp, "pressure drop")?;
        Ok(pa(dp))
    }
}

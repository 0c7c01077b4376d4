//! Valve component with an opening law.

use crate::common::{check_finite, check_positive, loss_for_coefficient};
use crate::error::ComponentResult;
use crate::traits::FluidComponent;
use hn_core::units::{Area, Length, Pressure, VolumeRate, circle_area};
use hn_fluids::Liquid;

/// Smallest effective opening; a shut valve is modelled as nearly shut.
pub const MIN_OPENING: f64 = 1e-3;

/// Valve opening characteristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValveLaw {
    /// Flow factor = opening
    Linear,
    /// Flow factor = opening^2
    Quadratic,
}

/// Throttling valve.
///
/// The loss coefficient grows as the valve closes:
///
/// ```text
/// K(opening) = k_open / factor(opening)²,  ΔP = K ½ρ v|v|
/// ```
#[derive(Debug, Clone)]
pub struct Valve {
    name: String,
    /// Bore diameter at the ports
    pub diameter: Length,
    /// Loss coefficient when fully open
    pub k_open: f64,
    /// Valve opening: 0.0 (closed) to 1.0 (fully open)
    pub opening: f64,
    /// Valve opening characteristic
    pub law: ValveLaw,
}

impl Valve {
    /// Create a new valve with linear opening law.
    pub fn new(name: String, diameter: Length, k_open: f64, opening: f64) -> ComponentResult<Self> {
        check_positive(diameter.value, "valve diameter must be positive")?;
        check_positive(k_open, "valve loss coefficient must be positive")?;
        check_finite(opening, "valve opening")?;
        Ok(Self {
            name,
            diameter,
            k_open,
            opening: opening.clamp(0.0, 1.0),
            law: ValveLaw::Linear,
        })
    }

    /// Create a valve with specified law.
    pub fn with_law(mut self, law: ValveLaw) -> Self {
        self.law = law;
        self
    }

    /// Set valve opening (clamped to 0..1).
    pub fn set_opening(&mut self, opening: f64) {
        self.opening = opening.clamp(0.0, 1.0);
    }

    /// Loss coefficient at the current opening.
    pub fn loss_coefficient(&self) -> f64 {
        let factor = match self.law {
            ValveLaw::Linear => self.opening,
            ValveLaw::Quadratic => self.opening * self.opening,
        }
        .max(MIN_OPENING);
        self.k_open / (factor * factor)
    }
}

impl FluidComponent for Valve {
    fn name(&self) -> &str {
        &self.name
    }

    fn cross_section(&self) -> Area {
        circle_area(self.diameter)
    }

    fn pressure_drop(&self, liquid: &Liquid, flow: VolumeRate) -> ComponentResult<Pressure> {
        check_finite(flow.value, "volumetric flow")?;
        let dp = loss_for_coefficient(self.loss_coefficient(), liquid, self.port_speed(flow));
        check_finite(dp.value, "pressure drop")?;
        Ok(dp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_core::units::{m, m3ps};

    #[test]
    fn fully_open_valve_uses_k_open() {
        let valve = Valve::new("v".into(), m(0.05), 0.2, 1.0).unwrap();
        assert!((valve.loss_coefficient() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn closing_increases_drop() {
        let water = Liquid::water();
        let mut valve = Valve::new("v".into(), m(0.05), 0.2, 1.0).unwrap();
        let open = valve.pressure_drop(&water, m3ps(0.003)).unwrap().value;
        valve.set_opening(0.5);
        let half = valve.pressure_drop(&water, m3ps(0.003)).unwrap().value;
        assert!((half / open - 4.0).abs() < 1e-9);
    }

    #[test]
    fn quadratic_law_throttles_harder() {
        let linear = Valve::new("v".into(), m(0.05), 0.2, 0.5).unwrap();
        let quadratic = linear.clone().with_law(ValveLaw::Quadratic);
        assert!(quadratic.loss_coefficient() > linear.loss_coefficient());
    }

    #[test]
    fn shut_valve_stays_finite() {
        let valve = Valve::new("v".into(), m(0.05), 0.2, 0.0).unwrap();
        let dp = valve
            .pressure_drop(&Liquid::water(), m3ps(1e-4))
            .unwrap()
            .value;
        assert!(dp.is_finite() && dp > 0.0);
    }

    #[test]
    fn opening_is_clamped() {
        let mut valve = Valve::new("v".into(), m(0.05), 0.2, 3.0).unwrap();
        assert_eq!(valve.opening, 1.0);
        valve.set_opening(-1.0);
        assert_eq!(valve.opening, 0.0);
    }
}

//! Pipe component with friction using Darcy-Weisbach correlation.

use crate::common::{
    LAMINAR_REYNOLDS, check_finite, check_positive, loss_for_coefficient, reynolds, swamee_jain,
};
use crate::error::{ComponentError, ComponentResult};
use crate::traits::FluidComponent;
use hn_core::units::{Area, Length, Pressure, VolumeRate, circle_area, pa};
use hn_fluids::Liquid;

/// Straight circular pipe with wall friction and lumped fittings.
///
/// ```text
/// laminar   (Re < 2300): ΔP = 32 μ L v / D²          + K ½ρ v|v|
/// turbulent            : ΔP = f(Re, ε/D) L/D ½ρ v|v| + K ½ρ v|v|
/// ```
///
/// `f` is the Swamee-Jain approximation of Colebrook-White. The drop is odd in
/// the flow, so reverse flow produces a negative drop.
#[derive(Debug, Clone)]
pub struct Pipe {
    name: String,
    /// Pipe length
    pub length: Length,
    /// Pipe inner diameter
    pub diameter: Length,
    /// Surface roughness (absolute)
    pub roughness: Length,
    /// Minor loss coefficient (sum of K factors for fittings, bends, etc.)
    pub k_minor: f64,
}

impl Pipe {
    /// Create a new pipe.
    ///
    /// # Errors
    /// Length and diameter must be positive; roughness and `k_minor` must be
    /// non-negative.
    pub fn new(
        name: String,
        length: Length,
        diameter: Length,
        roughness: Length,
        k_minor: f64,
    ) -> ComponentResult<Self> {
        check_positive(length.value, "pipe length must be positive")?;
        check_positive(diameter.value, "pipe diameter must be positive")?;
        if !(roughness.value.is_finite() && roughness.value >= 0.0) {
            return Err(ComponentError::InvalidArg {
                what: "pipe roughness cannot be negative",
            });
        }
        if !(k_minor.is_finite() && k_minor >= 0.0) {
            return Err(ComponentError::InvalidArg {
                what: "minor loss coefficient cannot be negative",
            });
        }
        Ok(Self {
            name,
            length,
            diameter,
            roughness,
            k_minor,
        })
    }

    /// Darcy friction factor for a given Reynolds number.
    pub fn friction_factor(&self, reynolds: f64) -> f64 {
        if reynolds < LAMINAR_REYNOLDS {
            64.0 / reynolds.max(f64::MIN_POSITIVE)
        } else {
            swamee_jain(reynolds, self.roughness.value / self.diameter.value)
        }
    }
}

impl FluidComponent for Pipe {
    fn name(&self) -> &str {
        &self.name
    }

    fn cross_section(&self) -> Area {
        circle_area(self.diameter)
    }

    fn pressure_drop(&self, liquid: &Liquid, flow: VolumeRate) -> ComponentResult<Pressure> {
        check_finite(flow.value, "volumetric flow")?;

        let speed = self.port_speed(flow);
        let re = reynolds(liquid, speed, self.diameter);
        check_finite(re, "Reynolds number")?;

        let friction = if re < LAMINAR_REYNOLDS {
            // Hagen-Poiseuille, written without 1/Re so it stays finite at rest
            32.0 * liquid.dynamic_viscosity().value * self.length.value * speed.value
                / self.diameter.value.powi(2)
        } else {
            let k_friction = self.friction_factor(re) * self.length.value / self.diameter.value;
            loss_for_coefficient(k_friction, liquid, speed).value
        };
        let minor = loss_for_coefficient(self.k_minor, liquid, speed).value;

        let dp = friction + minor;
        check_finite(dp, "pressure drop")?;
        Ok(pa(dp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_core::units::{m, m3ps};

    fn pipe(length: f64) -> Pipe {
        Pipe::new("test".into(), m(length), m(0.05), m(1e-5), 1.0).unwrap()
    }

    #[test]
    fn pipe_zero_flow_zero_drop() {
        let dp = pipe(10.0).pressure_drop(&Liquid::water(), m3ps(0.0)).unwrap();
        assert!(dp.value.abs() < 1e-12);
    }

    #[test]
    fn pipe_drop_is_odd_in_flow() {
        let water = Liquid::water();
        let p = pipe(10.0);
        let fwd = p.pressure_drop(&water, m3ps(0.004)).unwrap().value;
        let rev = p.pressure_drop(&water, m3ps(-0.004)).unwrap().value;
        assert!(fwd > 0.0);
        assert!((fwd + rev).abs() < 1e-9 * fwd);
    }

    #[test]
    fn laminar_drop_matches_hagen_poiseuille() {
        let water = Liquid::water();
        let p = Pipe::new("capillary".into(), m(2.0), m(0.002), m(0.0), 0.0).unwrap();
        // v = 0.1 m/s in a 2 mm bore: Re ≈ 199
        let flow = p.flow_at(hn_core::units::mps(0.1));
        let dp = p.pressure_drop(&water, flow).unwrap().value;
        let expected = 32.0 * 1.002e-3 * 2.0 * 0.1 / (0.002 * 0.002);
        assert!((dp - expected).abs() < 1e-9 * expected);
    }

    #[test]
    fn pipe_longer_means_more_drop() {
        let water = Liquid::water();
        let short = pipe(5.0).pressure_drop(&water, m3ps(0.004)).unwrap().value;
        let long = pipe(20.0).pressure_drop(&water, m3ps(0.004)).unwrap().value;
        assert!(long > short, "longer pipe should lose more pressure");
    }

    #[test]
    fn pipe_rejects_bad_geometry() {
        assert!(Pipe::new("bad".into(), m(0.0), m(0.05), m(0.0), 0.0).is_err());
        assert!(Pipe::new("bad".into(), m(1.0), m(-0.05), m(0.0), 0.0).is_err());
        assert!(Pipe::new("bad".into(), m(1.0), m(0.05), m(-1e-5), 0.0).is_err());
        assert!(Pipe::new("bad".into(), m(1.0), m(0.05), m(0.0), -1.0).is_err());
    }

    #[test]
    fn pipe_rejects_non_finite_flow() {
        let err = pipe(1.0)
            .pressure_drop(&Liquid::water(), m3ps(f64::NAN))
            .unwrap_err();
        assert!(matches!(err, ComponentError::NonPhysical { .. }));
    }
}

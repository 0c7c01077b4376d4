//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use hn_core::numeric::ensure_finite;
use hn_core::units::{Length, Pressure, Velocity, pa};
use hn_fluids::Liquid;

/// Below this Reynolds number flow is treated as laminar.
pub const LAMINAR_REYNOLDS: f64 = 2300.0;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })?;
    Ok(())
}

/// Ensure a geometric or model parameter is strictly positive and finite.
pub fn check_positive(value: f64, what: &'static str) -> ComponentResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ComponentError::InvalidArg { what })
    }
}

/// `x * |x|`: a square that keeps the sign of the flow.
pub fn signed_square(x: f64) -> f64 {
    x * x.abs()
}

/// Re = ρ |v| D / μ
pub fn reynolds(liquid: &Liquid, speed: Velocity, diameter: Length) -> f64 {
    liquid.density().value * speed.value.abs() * diameter.value / liquid.dynamic_viscosity().value
}

/// Turbulent Darcy friction factor, Swamee-Jain approximation of Colebrook-White.
pub fn swamee_jain(reynolds: f64, relative_roughness: f64) -> f64 {
    let a = relative_roughness / 3.7;
    let b = 5.74 / reynolds.powf(0.9);
    let f = 0.25 / (a + b).log10().powi(2);
    f.max(1e-4)
}

/// Signed dynamic-pressure loss `K · ½ρ v|v|`.
pub fn loss_for_coefficient(k: f64, liquid: &Liquid, speed: Velocity) -> Pressure {
    pa(k * 0.5 * liquid.density().value * signed_square(speed.value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_core::units::{m, mps};

    #[test]
    fn test_signed_square() {
        assert_eq!(signed_square(3.0), 9.0);
        assert_eq!(signed_square(-3.0), -9.0);
        assert_eq!(signed_square(0.0), 0.0);
    }

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
    }

    #[test]
    fn test_check_positive() {
        assert!(check_positive(0.1, "test").is_ok());
        assert!(check_positive(0.0, "test").is_err());
        assert!(check_positive(f64::NAN, "test").is_err());
    }

    #[test]
    fn reynolds_of_water_in_small_bore() {
        let re = reynolds(&Liquid::water(), mps(1.0), m(0.05));
        assert!((re - 998.2 * 0.05 / 1.002e-3).abs() < 1e-6);
    }

    #[test]
    fn swamee_jain_smooth_pipe_range() {
        // Smooth pipe at Re = 1e5 sits close to the Blasius value 0.018.
        let f = swamee_jain(1e5, 0.0);
        assert!((f - 0.018).abs() < 1e-3, "f = {f}");
    }
}

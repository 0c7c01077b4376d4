//! Constant-property liquid model.

use crate::error::{FluidError, FluidResult};
use hn_core::units::{Density, DynVisc, KinVisc, kgpm3, pas};

/// Incompressible liquid with constant density and viscosity.
#[derive(Debug, Clone, PartialEq)]
pub struct Liquid {
    name: String,
    density: Density,
    viscosity: DynVisc,
}

impl Liquid {
    /// Create a liquid, rejecting non-positive or non-finite properties.
    pub fn new(name: impl Into<String>, density: Density, viscosity: DynVisc) -> FluidResult<Self> {
        if !density.value.is_finite() || density.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "density must be positive and finite",
            });
        }
        if !viscosity.value.is_finite() || viscosity.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "viscosity must be positive and finite",
            });
        }
        Ok(Self {
            name: name.into(),
            density,
            viscosity,
        })
    }

    /// Fresh water at 20 °C.
    pub fn water() -> Self {
        Self {
            name: "Water".into(),
            density: kgpm3(998.2),
            viscosity: pas(1.002e-3),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn density(&self) -> Density {
        self.density
    }

    pub fn dynamic_viscosity(&self) -> DynVisc {
        self.viscosity
    }

    /// ν = μ / ρ
    pub fn kinematic_viscosity(&self) -> KinVisc {
        (self.viscosity / self.density).into()
    }
}

impl Default for Liquid {
    fn default() -> Self {
        Self::water()
    }
}

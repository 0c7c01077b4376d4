//! Turn a network definition into an assembler-ready system.

use std::collections::HashMap;
use std::rc::Rc;

use hn_components::{FluidComponent, Orifice, Pipe, Pump, Valve, ValveLaw};
use hn_core::units::{kgpm3, m, m2, mps, pa, pas};
use hn_fluids::Liquid;
use hn_system::{GuessBounds, GuessRange, System, SystemError};
use tracing::debug;

use crate::schema::{ComponentDef, ComponentKind, GuessBoundsDef, LiquidDef, NetworkDef, ValveLawDef};
use crate::validate::{ValidationError, validate_network};
use crate::{ProjectError, ProjectResult};

/// Build an uninitialized [`System`] from a validated definition.
///
/// Vertices take their list position as index and may override the network
/// liquid. Components are added in document order and boundaries are applied
/// as known quantities. The caller
/// decides when to call [`System::initialize`].
pub fn build_system(network: &NetworkDef) -> ProjectResult<System> {
    validate_network(network)?;

    let liquid = liquid_from_def(&network.liquid)?;
    let mut system = System::with_vertices(liquid, network.vertices.len())?;

    let index: HashMap<&str, usize> = network
        .vertices
        .iter()
        .enumerate()
        .map(|(i, v)| (v.id.as_str(), i))
        .collect();
    for (v, def) in network.vertices.iter().enumerate() {
        if let Some(liquid) = &def.liquid {
            system.set_liquid(v, Rc::new(liquid_from_def(liquid)?))?;
        }
    }

    let lookup = |id: &str| -> ProjectResult<usize> {
        index.get(id).copied().ok_or_else(|| {
            ProjectError::Validation(ValidationError::MissingReference {
                id: id.to_string(),
                context: "vertex lookup".to_string(),
            })
        })
    };

    for def in &network.components {
        let component = component_from_def(def)?;
        let from = lookup(&def.from_vertex_id)?;
        let to = lookup(&def.to_vertex_id)?;
        system.add_fluid_component(component, from, to)?;
    }

    for boundary in &network.boundaries {
        let v = lookup(&boundary.vertex_id)?;
        if let Some(speed) = boundary.speed_m_s {
            system.set_known_speed(v, mps(speed))?;
        }
        if let Some(pressure) = boundary.static_pressure_pa {
            system.set_known_static_pressure(v, pa(pressure))?;
        }
    }

    if let Some(guess) = &network.initial_guess {
        system.set_guess_bounds(bounds_from_def(guess)?);
    }

    debug!(
        network = %network.name,
        vertices = system.vertex_count(),
        edges = system.edge_count(),
        "system built"
    );
    Ok(system)
}

fn liquid_from_def(def: &LiquidDef) -> ProjectResult<Liquid> {
    let liquid = match def {
        LiquidDef::Named { name } => hn_fluids::catalog::liquid_by_name(name),
        LiquidDef::Custom {
            name,
            density_kg_m3,
            viscosity_pa_s,
        } => Liquid::new(name.as_str(), kgpm3(*density_kg_m3), pas(*viscosity_pa_s)),
    };
    liquid.map_err(|e| {
        ProjectError::Validation(ValidationError::InvalidValue {
            field: "liquid".to_string(),
            value: format!("{def:?}"),
            reason: e.to_string(),
        })
    })
}

fn component_from_def(def: &ComponentDef) -> ProjectResult<Rc<dyn FluidComponent>> {
    let name = def.name.clone();
    let component: Rc<dyn FluidComponent> = match &def.kind {
        ComponentKind::Pipe {
            length_m,
            diameter_m,
            roughness_m,
            k_minor,
        } => Rc::new(
            Pipe::new(name, m(*length_m), m(*diameter_m), m(*roughness_m), *k_minor)
                .map_err(SystemError::from)?,
        ),
        ComponentKind::Valve {
            diameter_m,
            k_open,
            opening,
            law,
        } => {
            let law = match law {
                ValveLawDef::Linear => ValveLaw::Linear,
                ValveLawDef::Quadratic => ValveLaw::Quadratic,
            };
            Rc::new(
                Valve::new(name, m(*diameter_m), *k_open, *opening)
                    .map_err(SystemError::from)?
                    .with_law(law),
            )
        }
        ComponentKind::Pump {
            diameter_m,
            shutoff_pressure_pa,
            curve_k,
        } => Rc::new(
            Pump::new(name, pa(*shutoff_pressure_pa), *curve_k, m(*diameter_m))
                .map_err(SystemError::from)?,
        ),
        ComponentKind::Orifice { cd, area_m2 } => {
            Rc::new(Orifice::new(name, *cd, m2(*area_m2)).map_err(SystemError::from)?)
        }
    };
    Ok(component)
}

fn bounds_from_def(def: &GuessBoundsDef) -> ProjectResult<GuessBounds> {
    Ok(GuessBounds {
        speed: GuessRange::new(def.speed_m_s.low, def.speed_m_s.high)?,
        static_pressure: GuessRange::new(def.static_pressure_pa.low, def.static_pressure_pa.high)?,
        volumetric_flow: GuessRange::new(
            def.volumetric_flow_m3_s.low,
            def.volumetric_flow_m3_s.high,
        )?,
    })
}

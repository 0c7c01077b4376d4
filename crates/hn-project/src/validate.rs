//! Network definition validation.

use crate::schema::{BoundaryDef, ComponentDef, ComponentKind, LiquidDef, NetworkDef, RangeDef};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_network(network: &NetworkDef) -> Result<(), ValidationError> {
    if network.version == 0 || network.version > crate::schema::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: network.version,
        });
    }

    validate_liquid(&network.liquid)?;

    let mut vertex_ids = HashSet::new();
    for vertex in &network.vertices {
        if !vertex_ids.insert(&vertex.id) {
            return Err(ValidationError::DuplicateId {
                id: vertex.id.clone(),
                context: format!("network '{}' vertices", network.name),
            });
        }
        if let Some(liquid) = &vertex.liquid {
            validate_liquid(liquid)?;
        }
    }

    let mut component_ids = HashSet::new();
    for component in &network.components {
        if !component_ids.insert(&component.id) {
            return Err(ValidationError::DuplicateId {
                id: component.id.clone(),
                context: format!("network '{}' components", network.name),
            });
        }
        validate_component(component, &vertex_ids, &network.name)?;
    }

    let mut bounded = HashSet::new();
    for boundary in &network.boundaries {
        if !bounded.insert(&boundary.vertex_id) {
            return Err(ValidationError::DuplicateId {
                id: boundary.vertex_id.clone(),
                context: format!("network '{}' boundaries", network.name),
            });
        }
        validate_boundary(boundary, &vertex_ids, &network.name)?;
    }

    if let Some(guess) = &network.initial_guess {
        validate_range("initial_guess speed_m_s", guess.speed_m_s)?;
        validate_range("initial_guess static_pressure_pa", guess.static_pressure_pa)?;
        validate_range(
            "initial_guess volumetric_flow_m3_s",
            guess.volumetric_flow_m3_s,
        )?;
    }

    Ok(())
}

fn validate_liquid(liquid: &LiquidDef) -> Result<(), ValidationError> {
    match liquid {
        LiquidDef::Named { name } => {
            if hn_fluids::catalog::liquid_by_name(name).is_err() {
                return Err(ValidationError::InvalidValue {
                    field: "liquid name".to_string(),
                    value: name.clone(),
                    reason: "not in the liquid catalog".to_string(),
                });
            }
            Ok(())
        }
        LiquidDef::Custom {
            name,
            density_kg_m3,
            viscosity_pa_s,
        } => {
            validate_positive_finite("density_kg_m3", *density_kg_m3, name)?;
            validate_positive_finite("viscosity_pa_s", *viscosity_pa_s, name)
        }
    }
}

fn validate_component(
    component: &ComponentDef,
    vertex_ids: &HashSet<&String>,
    network_name: &str,
) -> Result<(), ValidationError> {
    for (field, id) in [
        ("from_vertex_id", &component.from_vertex_id),
        ("to_vertex_id", &component.to_vertex_id),
    ] {
        if !vertex_ids.contains(id) {
            return Err(ValidationError::MissingReference {
                id: id.clone(),
                context: format!(
                    "network '{}' component '{}' {}",
                    network_name, component.name, field
                ),
            });
        }
    }
    if component.from_vertex_id == component.to_vertex_id {
        return Err(ValidationError::InvalidValue {
            field: format!("component '{}' to_vertex_id", component.name),
            value: component.to_vertex_id.clone(),
            reason: "a component must join two different vertices".to_string(),
        });
    }

    match &component.kind {
        ComponentKind::Pipe {
            length_m,
            diameter_m,
            roughness_m,
            k_minor,
        } => {
            validate_positive_finite("length_m", *length_m, &component.name)?;
            validate_positive_finite("diameter_m", *diameter_m, &component.name)?;
            validate_non_negative_finite("roughness_m", *roughness_m, &component.name)?;
            validate_non_negative_finite("k_minor", *k_minor, &component.name)?;
        }
        ComponentKind::Valve {
            diameter_m,
            k_open,
            opening,
            ..
        } => {
            validate_positive_finite("diameter_m", *diameter_m, &component.name)?;
            validate_positive_finite("k_open", *k_open, &component.name)?;
            if !opening.is_finite() || *opening < 0.0 || *opening > 1.0 {
                return Err(ValidationError::InvalidValue {
                    field: format!("component '{}' opening", component.name),
                    value: opening.to_string(),
                    reason: "must be in [0, 1]".to_string(),
                });
            }
        }
        ComponentKind::Pump {
            diameter_m,
            shutoff_pressure_pa,
            curve_k,
        } => {
            validate_positive_finite("diameter_m", *diameter_m, &component.name)?;
            validate_non_negative_finite(
                "shutoff_pressure_pa",
                *shutoff_pressure_pa,
                &component.name,
            )?;
            validate_non_negative_finite("curve_k", *curve_k, &component.name)?;
        }
        ComponentKind::Orifice { cd, area_m2 } => {
            validate_positive_finite("cd", *cd, &component.name)?;
            validate_positive_finite("area_m2", *area_m2, &component.name)?;
        }
    }

    Ok(())
}

fn validate_boundary(
    boundary: &BoundaryDef,
    vertex_ids: &HashSet<&String>,
    network_name: &str,
) -> Result<(), ValidationError> {
    if !vertex_ids.contains(&boundary.vertex_id) {
        return Err(ValidationError::MissingReference {
            id: boundary.vertex_id.clone(),
            context: format!("network '{}' boundary vertex_id", network_name),
        });
    }
    if boundary.speed_m_s.is_none() && boundary.static_pressure_pa.is_none() {
        return Err(ValidationError::InvalidValue {
            field: format!("boundary '{}'", boundary.vertex_id),
            value: "none".to_string(),
            reason: "must fix a speed or a static pressure".to_string(),
        });
    }
    for (field, value) in [
        ("speed_m_s", boundary.speed_m_s),
        ("static_pressure_pa", boundary.static_pressure_pa),
    ] {
        if let Some(v) = value
            && !v.is_finite()
        {
            return Err(ValidationError::InvalidValue {
                field: format!("boundary '{}' {}", boundary.vertex_id, field),
                value: v.to_string(),
                reason: "must be finite".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_range(field: &str, range: RangeDef) -> Result<(), ValidationError> {
    if !range.low.is_finite() || !range.high.is_finite() || range.low >= range.high {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: format!("[{}, {}]", range.low, range.high),
            reason: "must be a finite range with low < high".to_string(),
        });
    }
    Ok(())
}

fn validate_positive_finite(field: &str, value: f64, owner: &str) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: format!("'{}' {}", owner, field),
            value: value.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    Ok(())
}

fn validate_non_negative_finite(field: &str, value: f64, owner: &str) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: format!("'{}' {}", owner, field),
            value: value.to_string(),
            reason: "must be non-negative and finite".to_string(),
        });
    }
    Ok(())
}

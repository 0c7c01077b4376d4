//! Network definition schema.

use serde::{Deserialize, Serialize};

/// Newest document version this crate reads and writes.
pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkDef {
    pub version: u32,
    pub name: String,
    pub liquid: LiquidDef,
    #[serde(default)]
    pub vertices: Vec<VertexDef>,
    #[serde(default)]
    pub components: Vec<ComponentDef>,
    #[serde(default)]
    pub boundaries: Vec<BoundaryDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_guess: Option<GuessBoundsDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum LiquidDef {
    /// Entry of the built-in liquid catalog, looked up by name or alias.
    Named { name: String },
    Custom {
        name: String,
        density_kg_m3: f64,
        viscosity_pa_s: f64,
    },
}

/// Network vertex. Its position in the list is its index in the system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VertexDef {
    pub id: String,
    pub name: String,
    /// Overrides the network liquid at this vertex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquid: Option<LiquidDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentDef {
    pub id: String,
    pub name: String,
    pub kind: ComponentKind,
    pub from_vertex_id: String,
    pub to_vertex_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ComponentKind {
    Pipe {
        length_m: f64,
        diameter_m: f64,
        roughness_m: f64,
        #[serde(default)]
        k_minor: f64,
    },
    Valve {
        diameter_m: f64,
        k_open: f64,
        opening: f64,
        #[serde(default)]
        law: ValveLawDef,
    },
    Pump {
        diameter_m: f64,
        shutoff_pressure_pa: f64,
        curve_k: f64,
    },
    Orifice {
        cd: f64,
        area_m2: f64,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ValveLawDef {
    #[default]
    Linear,
    Quadratic,
}

/// Known quantities at a vertex.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundaryDef {
    pub vertex_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_m_s: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_pressure_pa: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RangeDef {
    pub low: f64,
    pub high: f64,
}

/// Ranges for randomly seeded unknowns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GuessBoundsDef {
    pub speed_m_s: RangeDef,
    pub static_pressure_pa: RangeDef,
    pub volumetric_flow_m3_s: RangeDef,
}

//! Named liquids with reference properties near 20 °C.

use crate::error::{FluidError, FluidResult};
use crate::liquid::Liquid;
use hn_core::units::{kgpm3, pas};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidCatalogEntry {
    pub canonical_id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
    pub density_kg_m3: f64,
    pub viscosity_pa_s: f64,
}

impl LiquidCatalogEntry {
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        self.canonical_id.eq_ignore_ascii_case(&query)
            || self.display_name.eq_ignore_ascii_case(&query)
            || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(&query))
    }

    pub fn liquid(&self) -> FluidResult<Liquid> {
        Liquid::new(
            self.display_name,
            kgpm3(self.density_kg_m3),
            pas(self.viscosity_pa_s),
        )
    }
}

const CATALOG: [LiquidCatalogEntry; 5] = [
    LiquidCatalogEntry {
        canonical_id: "Water",
        display_name: "Water",
        aliases: &["h2o", "fresh water"],
        density_kg_m3: 998.2,
        viscosity_pa_s: 1.002e-3,
    },
    LiquidCatalogEntry {
        canonical_id: "SeaWater",
        display_name: "Sea Water",
        aliases: &["seawater", "brine"],
        density_kg_m3: 1025.0,
        viscosity_pa_s: 1.08e-3,
    },
    LiquidCatalogEntry {
        canonical_id: "EthyleneGlycol",
        display_name: "Ethylene Glycol",
        aliases: &["glycol", "meg"],
        density_kg_m3: 1113.0,
        viscosity_pa_s: 1.61e-2,
    },
    LiquidCatalogEntry {
        canonical_id: "Ethanol",
        display_name: "Ethanol",
        aliases: &["etoh"],
        density_kg_m3: 789.0,
        viscosity_pa_s: 1.2e-3,
    },
    LiquidCatalogEntry {
        canonical_id: "HydraulicOil",
        display_name: "Hydraulic Oil",
        aliases: &["oil", "iso vg 32"],
        density_kg_m3: 870.0,
        viscosity_pa_s: 2.8e-2,
    },
];

/// All catalog entries.
pub fn entries() -> &'static [LiquidCatalogEntry] {
    &CATALOG
}

/// Look up a liquid by canonical id, display name or alias (case-insensitive).
pub fn liquid_by_name(name: &str) -> FluidResult<Liquid> {
    CATALOG
        .iter()
        .find(|entry| entry.matches(name))
        .ok_or_else(|| FluidError::UnknownLiquid {
            name: name.to_string(),
        })?
        .liquid()
}

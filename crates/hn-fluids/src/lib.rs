//! hn-fluids: liquid property models for hydronet.
//!
//! Liquids are treated as incompressible with constant properties; every network
//! vertex carries a shared [`Liquid`] that the equation assembler queries for
//! density and the component models query for viscosity.
//!
//! # Example
//!
//! ```
//! use hn_fluids::{Liquid, catalog};
//!
//! let water = Liquid::water();
//! assert!((water.density().value - 998.2).abs() < 1e-9);
//!
//! let glycol = catalog::liquid_by_name("glycol").unwrap();
//! assert!(glycol.dynamic_viscosity().value > water.dynamic_viscosity().value);
//! ```

pub mod catalog;
pub mod error;
pub mod liquid;

pub use error::{FluidError, FluidResult};
pub use liquid::Liquid;

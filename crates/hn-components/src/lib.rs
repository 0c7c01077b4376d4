//! hn-components: fluid component library for hydronet.
//!
//! Provides models for the elements that sit on network edges:
//! - Pipes with Darcy-Weisbach friction and minor losses
//! - Valves with an opening law
//! - Pumps with a quadratic head curve
//! - Orifices
//!
//! All components implement [`FluidComponent`]: a pure relation between the
//! volumetric flow through the element and the static pressure drop across it.
//!
//! # Example
//!
//! ```
//! use hn_components::{FluidComponent, Pipe};
//! use hn_core::units::{m, m3ps};
//! use hn_fluids::Liquid;
//!
//! let pipe = Pipe::new("main".into(), m(50.0), m(0.1), m(4.5e-5), 0.5).unwrap();
//! let dp = pipe.pressure_drop(&Liquid::water(), m3ps(0.01)).unwrap();
//! assert!(dp.value > 0.0);
//! ```

pub mod common;
pub mod error;
pub mod orifice;
pub mod pipe;
pub mod pump;
pub mod traits;
pub mod valve;

// Re-exports
pub use error::{ComponentError, ComponentResult};
pub use orifice::Orifice;
pub use pipe::Pipe;
pub use pump::Pump;
pub use traits::FluidComponent;
pub use valve::{Valve, ValveLaw};

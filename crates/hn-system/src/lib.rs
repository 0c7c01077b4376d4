//! hn-system: steady-state equation assembly for hydronet.
//!
//! A [`System`] holds a directed network of fluid components. Vertices carry a
//! liquid and a flow [`State`]; edges carry a component and a volumetric flow.
//! Every speed, pressure and flow is a [`Shared`] cell classified as known
//! (boundary condition) or unknown (solver variable).
//!
//! The residual vector a nonlinear solver drives to zero is
//! `[energy per edge; mass per vertex]`, see [`equations`].
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use hn_components::Pipe;
//! use hn_core::units::{m, mps, pa};
//! use hn_fluids::Liquid;
//! use hn_system::System;
//!
//! let mut system = System::new(Liquid::water());
//! let pipe = Pipe::new("feed".into(), m(25.0), m(0.08), m(4.5e-5), 0.0).unwrap();
//! system.add_fluid_component(Rc::new(pipe), 0, 1).unwrap();
//! system.set_known_speed(0, mps(1.2)).unwrap();
//! system.set_known_static_pressure(0, pa(3.0e5)).unwrap();
//! system.initialize().unwrap();
//!
//! // downstream speed and pressure remain
//! assert_eq!(system.n_unknowns(), 2);
//! // one energy row, one mass row per terminal
//! assert_eq!(system.return_vec().unwrap().len(), 3);
//! ```

pub mod equations;
pub mod error;
pub mod guess;
pub mod layout;
pub mod quantity;
pub mod registry;
pub mod state;
pub mod system;

pub use error::{SystemError, SystemResult};
pub use guess::{Category, GuessBounds, GuessRange, MeanOrUniform, SeedStrategy};
pub use layout::EquationLayout;
pub use quantity::{Shared, SiQuantity};
pub use registry::Registry;
pub use state::State;
pub use system::{Edge, Network, System, Vertex};

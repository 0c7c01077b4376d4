//! Nonlinear driver for hydronet systems.
//!
//! Drives the residual vector of an initialized [`hn_system::System`] to zero
//! with a damped Gauss-Newton iteration. Jacobians are built by finite
//! differences; trial points are written into the system's unknown cells
//! before every residual evaluation.

pub mod error;
pub mod jacobian;
pub mod newton;
pub mod solve;

pub use error::{SolverError, SolverResult};
pub use newton::{NewtonConfig, NewtonResult, newton_solve};
pub use solve::{SolveReport, solve, solve_from, solve_warm, solve_with_strategy};

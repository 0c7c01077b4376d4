//! hn-core: shared foundation for hydronet.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact vertex/edge handles)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{HnError, HnResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;

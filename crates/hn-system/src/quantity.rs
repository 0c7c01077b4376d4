//! Shared quantity cells.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use hn_core::units::{Pressure, Velocity, VolumeRate, m3ps, mps, pa};

/// A physical quantity that several owners observe and update together.
///
/// Cloning shares the cell. Two handles are the same quantity exactly when
/// they point at the same cell, regardless of the value they hold.
pub struct Shared<Q: Copy>(Rc<Cell<Q>>);

impl<Q: Copy> Shared<Q> {
    pub fn new(value: Q) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    pub fn get(&self) -> Q {
        self.0.get()
    }

    pub fn set(&self, value: Q) {
        self.0.set(value);
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of live handles to this cell.
    pub fn holders(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl<Q: Copy> Clone for Shared<Q> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<Q: Copy + fmt::Debug> fmt::Debug for Shared<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Shared").field(&self.get()).finish()
    }
}

/// Quantities that take part in the solver vector, addressed by their SI value.
pub trait SiQuantity: Copy + fmt::Debug {
    /// Category name used in logs and errors.
    const KIND: &'static str;

    fn si(&self) -> f64;
    fn from_si(value: f64) -> Self;
}

impl SiQuantity for Velocity {
    const KIND: &'static str = "speed";

    fn si(&self) -> f64 {
        self.value
    }

    fn from_si(value: f64) -> Self {
        mps(value)
    }
}

impl SiQuantity for Pressure {
    const KIND: &'static str = "static pressure";

    fn si(&self) -> f64 {
        self.value
    }

    fn from_si(value: f64) -> Self {
        pa(value)
    }
}

impl SiQuantity for VolumeRate {
    const KIND: &'static str = "volumetric flow";

    fn si(&self) -> f64 {
        self.value
    }

    fn from_si(value: f64) -> Self {
        m3ps(value)
    }
}

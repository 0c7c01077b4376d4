//! Flow condition at a network vertex.

use hn_core::units::{Pressure, Velocity};

use crate::quantity::Shared;

/// Speed and static pressure at a vertex.
///
/// Either quantity may be unallocated. Cloning a `State` shares its cells, so a
/// clone observes every later value change.
#[derive(Debug, Clone, Default)]
pub struct State {
    speed: Option<Shared<Velocity>>,
    static_pressure: Option<Shared<Pressure>>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speed(&self) -> Option<&Shared<Velocity>> {
        self.speed.as_ref()
    }

    pub fn static_pressure(&self) -> Option<&Shared<Pressure>> {
        self.static_pressure.as_ref()
    }

    /// Rebind the speed to `cell`.
    pub fn set_speed(&mut self, cell: Shared<Velocity>) {
        self.speed = Some(cell);
    }

    /// Rebind the static pressure to `cell`.
    pub fn set_static_pressure(&mut self, cell: Shared<Pressure>) {
        self.static_pressure = Some(cell);
    }

    /// Speed cell, allocated with `initial` when missing.
    pub(crate) fn speed_or_insert(&mut self, initial: Velocity) -> Shared<Velocity> {
        self.speed.get_or_insert_with(|| Shared::new(initial)).clone()
    }

    /// Static pressure cell, allocated with `initial` when missing.
    pub(crate) fn static_pressure_or_insert(&mut self, initial: Pressure) -> Shared<Pressure> {
        self.static_pressure
            .get_or_insert_with(|| Shared::new(initial))
            .clone()
    }
}

//! Known/unknown bookkeeping for one quantity kind.

use crate::quantity::{Shared, SiQuantity};

/// Ordered known and unknown lists of shared cells.
///
/// A cell appears in at most one list and at most once. Once registered, a cell
/// never leaves the registry; it only moves from unknown to known. The order of
/// the unknown list fixes the cell's position in the solver vector.
#[derive(Debug)]
pub struct Registry<Q: Copy> {
    known: Vec<Shared<Q>>,
    unknown: Vec<Shared<Q>>,
}

impl<Q: Copy> Default for Registry<Q> {
    fn default() -> Self {
        Self {
            known: Vec::new(),
            unknown: Vec::new(),
        }
    }
}

impl<Q: Copy> Registry<Q> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn known(&self) -> &[Shared<Q>] {
        &self.known
    }

    pub fn unknown(&self) -> &[Shared<Q>] {
        &self.unknown
    }

    pub fn is_known(&self, cell: &Shared<Q>) -> bool {
        self.known.iter().any(|c| c.ptr_eq(cell))
    }

    pub fn is_unknown(&self, cell: &Shared<Q>) -> bool {
        self.unknown.iter().any(|c| c.ptr_eq(cell))
    }

    pub fn contains(&self, cell: &Shared<Q>) -> bool {
        self.is_known(cell) || self.is_unknown(cell)
    }

    /// Classify `cell` as known. Returns `true` when it was previously unknown.
    pub fn mark_known(&mut self, cell: &Shared<Q>) -> bool {
        let was_unknown = match self.unknown.iter().position(|c| c.ptr_eq(cell)) {
            Some(pos) => {
                self.unknown.remove(pos);
                true
            }
            None => false,
        };
        if !self.is_known(cell) {
            self.known.push(cell.clone());
        }
        was_unknown
    }

    /// Register `cell` as unknown unless it is already classified.
    /// Returns `true` when the cell was added.
    pub fn register_unknown(&mut self, cell: &Shared<Q>) -> bool {
        if self.contains(cell) {
            return false;
        }
        self.unknown.push(cell.clone());
        true
    }
}

impl<Q: SiQuantity> Registry<Q> {
    /// SI values of the known cells, in list order.
    pub fn known_values(&self) -> Vec<f64> {
        self.known.iter().map(|c| c.get().si()).collect()
    }

    /// SI values of the unknown cells, in list order.
    pub fn unknown_values(&self) -> Vec<f64> {
        self.unknown.iter().map(|c| c.get().si()).collect()
    }

    /// Write SI values into the unknown cells, in list order.
    ///
    /// `values` must hold exactly one entry per unknown cell.
    pub(crate) fn write_unknowns(&self, values: &[f64]) {
        for (cell, &v) in self.unknown.iter().zip(values) {
            cell.set(Q::from_si(v));
        }
    }
}

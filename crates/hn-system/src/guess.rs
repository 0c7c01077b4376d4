//! Initial guess generation for the unknown vector.

use hn_core::numeric::mean;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{SystemError, SystemResult};

/// Quantity category of a slot in the unknown vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Speed,
    StaticPressure,
    VolumetricFlow,
}

/// Half-open SI range `[low, high)` used for random seeding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuessRange {
    low: f64,
    high: f64,
}

impl GuessRange {
    pub fn new(low: f64, high: f64) -> SystemResult<Self> {
        if !(low.is_finite() && high.is_finite()) {
            return Err(SystemError::invalid("guess range bounds must be finite"));
        }
        if low >= high {
            return Err(SystemError::invalid(format!(
                "guess range is empty: low {low} >= high {high}"
            )));
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value < self.high
    }
}

/// Ranges used for categories that have no known values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuessBounds {
    pub speed: GuessRange,
    pub static_pressure: GuessRange,
    pub volumetric_flow: GuessRange,
}

impl Default for GuessBounds {
    fn default() -> Self {
        Self {
            speed: GuessRange {
                low: 0.1,
                high: 5.0,
            },
            static_pressure: GuessRange {
                low: 1.0e5,
                high: 1.0e6,
            },
            volumetric_flow: GuessRange {
                low: 1.0e-4,
                high: 1.0e-1,
            },
        }
    }
}

impl GuessBounds {
    pub fn range(&self, category: Category) -> GuessRange {
        match category {
            Category::Speed => self.speed,
            Category::StaticPressure => self.static_pressure,
            Category::VolumetricFlow => self.volumetric_flow,
        }
    }
}

/// Policy that fills the unknown slots of one category.
///
/// `range` already carries the configured bounds of the category. `category`
/// is passed for strategies that treat quantities differently, such as
/// seeding flows from a design point; [`MeanOrUniform`] does not need it.
pub trait SeedStrategy {
    /// Produce exactly `count` starting values for `category`.
    ///
    /// `known` holds the SI values of the category's known quantities.
    fn seed(&mut self, category: Category, known: &[f64], count: usize, range: GuessRange)
    -> Vec<f64>;
}

/// Seed every slot with the mean of the known values, or draw uniformly from
/// the category range when nothing is known.
#[derive(Debug, Clone)]
pub struct MeanOrUniform {
    rng: ChaCha8Rng,
}

impl MeanOrUniform {
    /// Reproducible draws from a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Fresh random seed.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random::<u64>())
    }
}

impl SeedStrategy for MeanOrUniform {
    fn seed(
        &mut self,
        _category: Category,
        known: &[f64],
        count: usize,
        range: GuessRange,
    ) -> Vec<f64> {
        match mean(known) {
            Some(m) => vec![m; count],
            None => (0..count)
                .map(|_| self.rng.random_range(range.low..range.high))
                .collect(),
        }
    }
}

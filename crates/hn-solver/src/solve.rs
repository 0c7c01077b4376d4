//! High-level solver interface.

use crate::error::SolverResult;
use crate::jacobian::{central_difference_jacobian, finite_difference_jacobian};
use crate::newton::{NewtonConfig, newton_solve};
use hn_system::{MeanOrUniform, SeedStrategy, System};
use nalgebra::DVector;
use tracing::{debug, info};

/// Outcome of a converged solve.
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// Newton iterations taken
    pub iterations: usize,
    /// Euclidean norm of the final residual vector
    pub residual_norm: f64,
    /// Converged unknowns, laid out like [`System::unknown_values`]
    pub unknowns: DVector<f64>,
}

/// Solve an initialized system from a freshly seeded initial guess.
pub fn solve(system: &System, config: &NewtonConfig) -> SolverResult<SolveReport> {
    solve_with_strategy(system, config, &mut MeanOrUniform::from_entropy())
}

/// Solve with the initial guess produced by `strategy`.
pub fn solve_with_strategy<S: SeedStrategy + ?Sized>(
    system: &System,
    config: &NewtonConfig,
    strategy: &mut S,
) -> SolverResult<SolveReport> {
    let x0 = system.initial_vector_with(strategy)?;
    solve_from(system, config, x0)
}

/// Solve starting from the current values of the unknowns.
///
/// Useful as a warm start after changing a boundary condition.
pub fn solve_warm(system: &System, config: &NewtonConfig) -> SolverResult<SolveReport> {
    solve_from(system, config, system.unknown_values())
}

/// Solve starting from `x0`.
///
/// On success the converged point is written into the system. On failure the
/// unknowns are restored to the values they held before the call.
pub fn solve_from(
    system: &System,
    config: &NewtonConfig,
    x0: DVector<f64>,
) -> SolverResult<SolveReport> {
    let original = system.unknown_values();
    debug!(
        unknowns = x0.len(),
        rows = system.layout()?.rows(),
        "starting solve"
    );

    let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
        system.write_unknowns(x)?;
        Ok(system.return_vec()?)
    };
    let jacobian = |x: &DVector<f64>| {
        if config.central_differences {
            central_difference_jacobian(x, &residual, config.jacobian_step)
        } else {
            finite_difference_jacobian(x, &residual, config.jacobian_step)
        }
    };

    match newton_solve(x0, &residual, jacobian, config) {
        Ok(result) => {
            system.write_unknowns(&result.x)?;
            info!(
                iterations = result.iterations,
                residual = result.residual_norm,
                "solve converged"
            );
            Ok(SolveReport {
                iterations: result.iterations,
                residual_norm: result.residual_norm,
                unknowns: result.x,
            })
        }
        Err(err) => {
            system.write_unknowns(&original)?;
            Err(err)
        }
    }
}

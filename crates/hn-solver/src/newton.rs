//! Damped Gauss-Newton solver.

use crate::error::{SolverError, SolverResult};
use nalgebra::{DMatrix, DVector};
use tracing::{debug, warn};

/// Singular values below this fraction of the largest one are treated as zero.
const SVD_RELATIVE_EPS: f64 = 1e-12;

/// Newton solver configuration.
#[derive(Debug, Clone)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance for residual norm
    pub abs_tol: f64,
    /// Relative tolerance for residual norm
    pub rel_tol: f64,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
    /// Relative finite-difference step for the Jacobian
    pub jacobian_step: f64,
    /// Use central instead of forward differences
    pub central_differences: bool,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            abs_tol: 1e-6,
            rel_tol: 1e-10,
            line_search_beta: 0.5,
            max_line_search_iters: 30,
            jacobian_step: 1e-7,
            central_differences: false,
        }
    }
}

/// Newton iteration result.
#[derive(Debug, Clone)]
pub struct NewtonResult {
    /// Solution vector
    pub x: DVector<f64>,
    /// Final residual norm
    pub residual_norm: f64,
    /// Number of iterations
    pub iterations: usize,
}

/// Newton step `dx` minimizing `|J dx + r|`.
///
/// Square systems go through LU; singular or rectangular ones fall back to an
/// SVD least-squares solve, which returns the minimum-norm step.
fn newton_step(jac: DMatrix<f64>, r: &DVector<f64>) -> SolverResult<DVector<f64>> {
    let rhs = -r;
    if jac.is_square() {
        if let Some(dx) = jac.clone().lu().solve(&rhs) {
            if dx.iter().all(|v| v.is_finite()) {
                return Ok(dx);
            }
        }
    }
    let svd = jac.svd(true, true);
    let eps = SVD_RELATIVE_EPS * svd.singular_values.max();
    svd.solve(&rhs, eps)
        .map_err(|what| SolverError::Numeric {
            what: format!("least-squares step failed: {what}"),
        })
}

/// Gauss-Newton solver with backtracking line search.
///
/// Converges when the residual norm drops below `abs_tol`, or below `rel_tol`
/// times the starting norm. The residual may be longer than `x`.
pub fn newton_solve<F, J>(
    x0: DVector<f64>,
    residual_fn: F,
    jacobian_fn: J,
    config: &NewtonConfig,
) -> SolverResult<NewtonResult>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
    J: Fn(&DVector<f64>) -> SolverResult<DMatrix<f64>>,
{
    let mut x = x0;
    let mut r = residual_fn(&x)?;
    let mut r_norm = r.norm();
    let r0_norm = r_norm;

    for iter in 0..config.max_iterations {
        if r_norm < config.abs_tol || r_norm < config.rel_tol * r0_norm {
            return Ok(NewtonResult {
                x,
                residual_norm: r_norm,
                iterations: iter,
            });
        }
        if x.is_empty() {
            return Err(SolverError::Unsolvable {
                what: format!("no unknowns left but residual norm is {r_norm:e}"),
            });
        }

        let dx = newton_step(jacobian_fn(&x)?, &r)?;

        let mut alpha = 1.0;
        let mut accepted = None;
        for _ in 0..config.max_line_search_iters {
            let x_new = &x + alpha * &dx;
            let r_new = residual_fn(&x_new)?;
            let r_new_norm = r_new.norm();
            if r_new_norm.is_finite() && r_new_norm < r_norm {
                accepted = Some((x_new, r_new, r_new_norm));
                break;
            }
            alpha *= config.line_search_beta;
        }

        let Some((x_new, r_new, r_new_norm)) = accepted else {
            warn!(iteration = iter, residual = r_norm, "line search stagnated");
            return Err(SolverError::Unsolvable {
                what: format!("line search stagnated at iteration {iter}, residual = {r_norm:e}"),
            });
        };

        debug!(
            iteration = iter,
            residual = r_new_norm,
            step = alpha,
            "newton iteration"
        );
        x = x_new;
        r = r_new;
        r_norm = r_new_norm;
    }

    if r_norm < config.abs_tol || r_norm < config.rel_tol * r0_norm {
        return Ok(NewtonResult {
            x,
            residual_norm: r_norm,
            iterations: config.max_iterations,
        });
    }
    debug!(residual = r.norm(), "iteration limit reached");
    Err(SolverError::Unsolvable {
        what: format!(
            "maximum iterations {} reached, residual = {:e}",
            config.max_iterations, r_norm
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_quadratic() {
        // Solve x^2 - 4 = 0, x > 0
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, x[0] * x[0] - 4.0))
        };
        let jacobian = |x: &DVector<f64>| -> SolverResult<DMatrix<f64>> {
            Ok(DMatrix::from_element(1, 1, 2.0 * x[0]))
        };

        let x0 = DVector::from_element(1, 3.0);
        let config = NewtonConfig::default();
        let result = newton_solve(x0, residual, jacobian, &config).unwrap();

        assert!((result.x[0] - 2.0).abs() < 1e-6);
        assert!(result.iterations > 0);
    }

    #[test]
    fn overdetermined_consistent_system() {
        // x^2 = 9 stated twice plus a zero row: rectangular Jacobian
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_vec(vec![x[0] * x[0] - 9.0, 2.0 * (x[0] * x[0] - 9.0), 0.0]))
        };
        let jacobian = |x: &DVector<f64>| -> SolverResult<DMatrix<f64>> {
            Ok(DMatrix::from_column_slice(3, 1, &[2.0 * x[0], 4.0 * x[0], 0.0]))
        };

        let x0 = DVector::from_element(1, 1.0);
        let result = newton_solve(x0, residual, jacobian, &NewtonConfig::default()).unwrap();
        assert!((result.x[0] - 3.0).abs() < 1e-6);
    }

    #[test]
    fn singular_square_system_uses_least_squares() {
        // second unknown does not enter the residual
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_vec(vec![x[0] - 1.0, 0.0]))
        };
        let jacobian = |_: &DVector<f64>| -> SolverResult<DMatrix<f64>> {
            Ok(DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 0.0]))
        };

        let x0 = DVector::from_vec(vec![5.0, 7.0]);
        let result = newton_solve(x0, residual, jacobian, &NewtonConfig::default()).unwrap();
        assert!((result.x[0] - 1.0).abs() < 1e-9);
        assert!((result.x[1] - 7.0).abs() < 1e-9);
    }

    #[test]
    fn iteration_limit_is_unsolvable() {
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, x[0].exp() - 10.0))
        };
        let jacobian = |x: &DVector<f64>| -> SolverResult<DMatrix<f64>> {
            Ok(DMatrix::from_element(1, 1, x[0].exp()))
        };

        let config = NewtonConfig {
            max_iterations: 1,
            ..NewtonConfig::default()
        };
        let err = newton_solve(DVector::from_element(1, 0.0), residual, jacobian, &config)
            .unwrap_err();
        assert!(matches!(err, SolverError::Unsolvable { .. }));
    }

    #[test]
    fn no_root_stagnates() {
        // x^2 + 1 has no real root; the minimum residual is reached at x = 0
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, x[0] * x[0] + 1.0))
        };
        let jacobian = |x: &DVector<f64>| -> SolverResult<DMatrix<f64>> {
            Ok(DMatrix::from_element(1, 1, 2.0 * x[0]))
        };

        let result = newton_solve(
            DVector::from_element(1, 0.0),
            residual,
            jacobian,
            &NewtonConfig::default(),
        );
        assert!(matches!(result, Err(SolverError::Unsolvable { .. })));
    }
}

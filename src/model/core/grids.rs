//! grids — discretized state space for the household block.
//!
//! Purpose
//! -------
//! Build the discount-factor grid, the asset grid, and the income Markov
//! chain for a given parameterization and wage level, and keep them together
//! in a [`HouseholdGrids`] arena that the household and distribution solvers
//! read.
//!
//! Key behaviors
//! -------------
//! - [`beta_grid`]: `Nbeta` evenly spaced points over
//!   `[beta_mean - beta_delta, beta_mean + beta_delta]`; exactly `[beta_mean]`
//!   when `Nbeta = 1`.
//! - [`equilogspace`]: `n` points between `x_min` and `x_max` that are
//!   geometrically spaced after shifting by a pivot, which concentrates points
//!   near the borrowing limit where policy functions bend the most. The end
//!   points are set exactly.
//! - [`HouseholdGrids::build`]: assembles all grids; the asset grid's upper
//!   bound is `w * a_max`, so the grid follows the steady-state wage.
//!
//! Invariants & assumptions
//! ------------------------
//! - `a_grid[0] == 0.0` (the borrowing limit) and `a_grid` is strictly
//!   increasing.
//! - `z_trans` stacks one copy of the income transition matrix per
//!   discount-factor type: shape `(Nbeta, Nz, Nz)`.
//! - Grids are immutable after construction for a given parameterization.
use crate::model::{
    core::{
        markov::IncomeProcess,
        params::{HANCParams, Preferences},
        validation::{validate_count, validate_positive, validate_strictly_increasing},
    },
    errors::{ModelError, ModelResult},
};
use ndarray::{Array1, Array3, Axis};

/// Offset added to the lower bound before geometric spacing in [`equilogspace`].
const LOG_PIVOT_OFFSET: f64 = 0.25;

/// HouseholdGrids — state-space arena for one steady-state solve.
///
/// Fields
/// ------
/// - `beta_grid`: discount factor per type, length `Nbeta`.
/// - `a_grid`: asset grid, length `Na`, starting at 0.
/// - `income`: discretized income process (`z_grid`, transition, ergodic).
/// - `z_trans`: per-type income transition stack, shape `(Nbeta, Nz, Nz)`.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseholdGrids {
    pub beta_grid: Array1<f64>,
    pub a_grid: Array1<f64>,
    pub income: IncomeProcess,
    pub z_trans: Array3<f64>,
}

impl HouseholdGrids {
    /// Build the full state space for `params` at wage `w`.
    ///
    /// Parameters
    /// ----------
    /// - `params`: validated model configuration.
    /// - `w`: steady-state wage; scales the asset-grid maximum to `w * a_max`.
    ///
    /// Errors
    /// ------
    /// - [`ModelError::InvalidGridParam`] if `w` is not finite and positive.
    /// - Any error from [`IncomeProcess::discretize`].
    pub fn build(params: &HANCParams, w: f64) -> ModelResult<Self> {
        validate_positive("w", w)?;
        let beta_grid = beta_grid(&params.preferences)?;
        let a_grid = equilogspace(0.0, w * params.asset_grid.a_max, params.asset_grid.n_a)?;
        let income = IncomeProcess::discretize(&params.income)?;

        let n_beta = beta_grid.len();
        let n_z = income.len();
        let mut z_trans = Array3::<f64>::zeros((n_beta, n_z, n_z));
        for mut slab in z_trans.axis_iter_mut(Axis(0)) {
            slab.assign(&income.trans);
        }
        Ok(HouseholdGrids { beta_grid, a_grid, income, z_trans })
    }

    /// Shape `(Nbeta, Nz, Na)` of policy and distribution arrays.
    pub fn state_shape(&self) -> (usize, usize, usize) {
        (self.beta_grid.len(), self.income.len(), self.a_grid.len())
    }
}

/// Evenly spaced discount-factor grid.
///
/// With `n_beta == 1` the grid is exactly `[beta_mean]`; the spacing is never
/// computed in that case.
pub fn beta_grid(prefs: &Preferences) -> ModelResult<Array1<f64>> {
    validate_count("Nbeta", prefs.n_beta, 1)?;
    if prefs.n_beta == 1 {
        return Ok(Array1::from_elem(1, prefs.beta_mean));
    }
    Ok(Array1::linspace(
        prefs.beta_mean - prefs.beta_delta,
        prefs.beta_mean + prefs.beta_delta,
        prefs.n_beta,
    ))
}

/// Pivoted log-spaced grid on `[x_min, x_max]` with exact end points.
///
/// Errors
/// ------
/// - [`ModelError::InvalidGridParam`] if `n < 2`, the bounds are not finite,
///   or `x_max <= x_min`.
/// - [`ModelError::InvalidGrid`] if rounding destroys strict monotonicity
///   (only possible for extremely dense grids).
pub fn equilogspace(x_min: f64, x_max: f64, n: usize) -> ModelResult<Array1<f64>> {
    validate_count("Na", n, 2)?;
    if !x_min.is_finite() || !x_max.is_finite() || x_max <= x_min {
        return Err(ModelError::InvalidGridParam {
            name: "a_max",
            value: x_max,
            reason: "Upper bound must be finite and strictly above the lower bound.",
        });
    }

    let pivot = x_min.abs() + LOG_PIVOT_OFFSET;
    let log_lo = (x_min + pivot).ln();
    let log_hi = (x_max + pivot).ln();
    let mut grid = Array1::linspace(log_lo, log_hi, n).mapv(|y| y.exp() - pivot);
    grid[0] = x_min;
    grid[n - 1] = x_max;

    validate_strictly_increasing("a_grid", grid.view())?;
    Ok(grid)
}

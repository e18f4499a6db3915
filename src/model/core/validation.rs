//! Validation helpers for model configuration and state-space arrays.
//!
//! Purpose
//! -------
//! Centralize the scalar and array checks used by the configuration types and
//! the grid builders so that every constructor fails fast with a typed
//! [`ModelError`] instead of letting NaNs or degenerate grids reach the
//! household solver.
//!
//! Key behaviors
//! -------------
//! - Scalar checks: finiteness, positivity, open-interval membership, and
//!   minimum counts.
//! - Array checks: strictly increasing grids, row-stochastic transition
//!   matrices, and unit-mass non-negative distributions.
//!
//! Conventions
//! -----------
//! - Each helper takes a static `name` that is echoed in the error payload.
//! - Stochasticity and mass checks use [`STOCHASTIC_TOL`] as absolute
//!   tolerance.
use crate::model::errors::{ModelError, ModelResult};
use ndarray::{ArrayView1, ArrayView2, ArrayViewD};

/// Absolute tolerance used when checking that rows or distributions sum to 1.
pub const STOCHASTIC_TOL: f64 = 1e-10;

pub fn validate_count(name: &'static str, value: usize, min: usize) -> ModelResult<()> {
    if value < min {
        return Err(ModelError::InvalidGridParam {
            name,
            value: value as f64,
            reason: "Count is below the admissible minimum.",
        });
    }
    Ok(())
}

pub fn validate_positive(name: &'static str, value: f64) -> ModelResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ModelError::InvalidGridParam {
            name,
            value,
            reason: "Value must be finite and strictly positive.",
        });
    }
    Ok(())
}

/// Check `|rho| < 1` and finiteness for an AR(1) persistence parameter.
pub fn validate_persistence(value: f64) -> ModelResult<()> {
    if !value.is_finite() || value.abs() >= 1.0 {
        return Err(ModelError::InvalidIncomeProcess {
            name: "rho_z",
            value,
            reason: "Persistence must satisfy |rho_z| < 1.",
        });
    }
    Ok(())
}

/// Check that a grid is strictly increasing.
///
/// Errors
/// ------
/// - [`ModelError::InvalidGrid`] at the first index `i` with `grid[i] <= grid[i-1]`
///   or a non-finite entry.
pub fn validate_strictly_increasing(name: &'static str, grid: ArrayView1<f64>) -> ModelResult<()> {
    for (i, &x) in grid.iter().enumerate() {
        if !x.is_finite() {
            return Err(ModelError::InvalidGrid { name, index: i, reason: "Non-finite entry." });
        }
        if i > 0 && x <= grid[i - 1] {
            return Err(ModelError::InvalidGrid {
                name,
                index: i,
                reason: "Grid must be strictly increasing.",
            });
        }
    }
    Ok(())
}

/// Check that a square matrix is row-stochastic.
pub fn validate_row_stochastic(trans: ArrayView2<f64>) -> ModelResult<()> {
    if trans.nrows() != trans.ncols() {
        return Err(ModelError::ErgodicNotFound { reason: "Transition matrix is not square." });
    }
    for (row, r) in trans.outer_iter().enumerate() {
        if r.iter().any(|&p| !p.is_finite() || p < 0.0) {
            return Err(ModelError::NonStochasticRow { row, sum: r.sum() });
        }
        let sum = r.sum();
        if (sum - 1.0).abs() > STOCHASTIC_TOL {
            return Err(ModelError::NonStochasticRow { row, sum });
        }
    }
    Ok(())
}

/// Check that a probability mass array is non-negative and sums to one.
pub fn validate_distribution(dist: ArrayViewD<f64>) -> ModelResult<()> {
    let mass = dist.sum();
    if dist.iter().any(|&p| !p.is_finite() || p < 0.0) {
        return Err(ModelError::InvalidDistribution {
            mass,
            reason: "Entries must be finite and non-negative.",
        });
    }
    if (mass - 1.0).abs() > STOCHASTIC_TOL * (dist.len().max(1) as f64) {
        return Err(ModelError::InvalidDistribution { mass, reason: "Mass must sum to 1." });
    }
    Ok(())
}

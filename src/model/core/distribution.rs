//! distribution — initial cross-sectional distribution over the joint state.
//!
//! Purpose
//! -------
//! Seed the forward iteration of the household distribution with a
//! beginning-of-period distribution `Dbeg` over `(beta, z, a)`: every
//! discount-factor type gets an equal share `1 / Nbeta`, income is drawn from
//! the ergodic distribution of the income chain, and all mass sits at the
//! borrowing limit (asset index 0).
//!
//! Invariants & assumptions
//! ------------------------
//! - The returned array has shape `(Nbeta, Nz, Na)`, is non-negative, and sums
//!   to one.
//! - `Dbeg[b, z, a] = 0` for every `a > 0`.
use crate::model::{
    core::{grids::HouseholdGrids, validation::validate_distribution},
    errors::ModelResult,
};
use ndarray::{Array3, ArrayView1, Axis};

/// Build the initial beginning-of-period distribution for `grids`.
///
/// Errors
/// ------
/// - [`ModelError::InvalidDistribution`](crate::model::errors::ModelError::InvalidDistribution)
///   if the ergodic distribution carried by `grids` is not a valid
///   probability vector.
pub fn initial_distribution(grids: &HouseholdGrids) -> ModelResult<Array3<f64>> {
    let (n_beta, _, n_a) = grids.state_shape();
    initial_distribution_from(grids.income.ergodic.view(), n_beta, n_a)
}

/// Build `Dbeg` from an ergodic income distribution, a type count, and an
/// asset-grid size.
pub fn initial_distribution_from(
    z_ergodic: ArrayView1<f64>, n_beta: usize, n_a: usize,
) -> ModelResult<Array3<f64>> {
    let n_z = z_ergodic.len();
    let mut dbeg = Array3::<f64>::zeros((n_beta, n_z, n_a));
    let share = n_beta as f64;
    for mut by_type in dbeg.axis_iter_mut(Axis(0)) {
        by_type.index_axis_mut(Axis(1), 0).assign(&z_ergodic.mapv(|p| p / share));
    }
    validate_distribution(dbeg.view().into_dyn())?;
    Ok(dbeg)
}

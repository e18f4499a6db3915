//! markov — finite-state discretizations of the persistent income process.
//!
//! Purpose
//! -------
//! Approximate the AR(1) `log z' = rho_z * log z + psi`, `psi ~ N(0, sigma_psi²)`,
//! by an `Nz`-state Markov chain and compute the chain's stationary (ergodic)
//! distribution. The result is packaged as an [`IncomeProcess`] that the grid
//! layer owns and the household layer reads.
//!
//! Key behaviors
//! -------------
//! - [`rouwenhorst`] builds the transition matrix by the Rouwenhorst recursion
//!   and spaces log-states over `±sqrt(Nz-1) * sigma_y`, which matches the
//!   unconditional variance `sigma_y² = sigma_psi² / (1 - rho_z²)` exactly.
//! - [`tauchen`] spaces log-states over `±width * sigma_y` and assigns
//!   transition probabilities from the standard normal CDF (`statrs`).
//! - [`find_ergodic`] solves `(Pᵀ - I) π = 0`, `Σ π = 1` with an LU
//!   factorization (`nalgebra`).
//! - [`IncomeProcess::discretize`] maps log-states to levels `z = exp(log z)`
//!   and rescales them to have mean one under the ergodic distribution, so
//!   aggregate effective labor supply equals one in the stationary state.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every produced transition matrix is row-stochastic (checked with
//!   [`validate_row_stochastic`]).
//! - `ergodic · trans == ergodic` up to floating-point error.
//! - `Nz >= 2` and `|rho_z| < 1`; violations fail with
//!   [`ModelError::InvalidIncomeProcess`].
use crate::model::{
    core::{
        params::{IncomeMethod, IncomeSpec},
        validation::{validate_persistence, validate_row_stochastic},
    },
    errors::{ModelError, ModelResult},
};
use nalgebra::{DMatrix, DVector};
use ndarray::{array, s, Array1, Array2, ArrayView2, Axis};
use statrs::distribution::{ContinuousCDF, Normal};

/// Negative ergodic entries above this magnitude are treated as a failed solve.
const ERGODIC_NEG_TOL: f64 = 1e-12;

/// IncomeProcess — discretized persistent income.
///
/// Fields
/// ------
/// - `z_grid`: income levels, mean one under `ergodic`.
/// - `log_z_grid`: log-states before level normalization.
/// - `trans`: `Nz × Nz` row-stochastic transition matrix, `trans[i, j] = P(z' = j | z = i)`.
/// - `ergodic`: stationary distribution of `trans`.
/// - `trans_cumsum`: row-wise cumulative sums of `trans`.
/// - `ergodic_cumsum`: cumulative sums of `ergodic`.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeProcess {
    pub z_grid: Array1<f64>,
    pub log_z_grid: Array1<f64>,
    pub trans: Array2<f64>,
    pub ergodic: Array1<f64>,
    pub trans_cumsum: Array2<f64>,
    pub ergodic_cumsum: Array1<f64>,
}

impl IncomeProcess {
    /// Discretize the income process described by `spec`.
    ///
    /// Errors
    /// ------
    /// - [`ModelError::InvalidIncomeProcess`] for malformed parameters.
    /// - [`ModelError::ErgodicNotFound`] if the stationary distribution cannot
    ///   be computed.
    pub fn discretize(spec: &IncomeSpec) -> ModelResult<Self> {
        let (log_z_grid, trans) = match spec.method {
            IncomeMethod::Rouwenhorst => rouwenhorst(spec.rho_z, spec.sigma_psi, spec.n_z)?,
            IncomeMethod::Tauchen { width } => {
                tauchen(spec.rho_z, spec.sigma_psi, spec.n_z, width)?
            }
        };
        validate_row_stochastic(trans.view())?;
        let ergodic = find_ergodic(trans.view())?;

        let mut z_grid = log_z_grid.mapv(f64::exp);
        let mean = ergodic.dot(&z_grid);
        z_grid /= mean;

        let mut trans_cumsum = trans.clone();
        trans_cumsum.accumulate_axis_inplace(Axis(1), |&prev, curr| *curr += prev);
        let mut ergodic_cumsum = ergodic.clone();
        ergodic_cumsum.accumulate_axis_inplace(Axis(0), |&prev, curr| *curr += prev);

        Ok(IncomeProcess { z_grid, log_z_grid, trans, ergodic, trans_cumsum, ergodic_cumsum })
    }

    /// Number of income states.
    pub fn len(&self) -> usize {
        self.z_grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z_grid.is_empty()
    }
}

/// Rouwenhorst discretization of a zero-mean AR(1) in logs.
///
/// Returns `(log_grid, trans)`.
///
/// Errors
/// ------
/// - [`ModelError::InvalidIncomeProcess`] if `n < 2`, `|rho| >= 1`, or
///   `sigma` is not finite and positive.
pub fn rouwenhorst(rho: f64, sigma: f64, n: usize) -> ModelResult<(Array1<f64>, Array2<f64>)> {
    validate_ar1(rho, sigma, n)?;

    let p = (1.0 + rho) / 2.0;
    let mut trans = array![[p, 1.0 - p], [1.0 - p, p]];

    for m in 3..=n {
        let k = m - 1;
        let mut next = Array2::<f64>::zeros((m, m));
        next.slice_mut(s![..k, ..k]).scaled_add(p, &trans);
        next.slice_mut(s![..k, 1..]).scaled_add(1.0 - p, &trans);
        next.slice_mut(s![1.., ..k]).scaled_add(1.0 - p, &trans);
        next.slice_mut(s![1.., 1..]).scaled_add(p, &trans);
        next.slice_mut(s![1..k, ..]).mapv_inplace(|x| x / 2.0);
        trans = next;
    }

    let sigma_y = sigma / (1.0 - rho * rho).sqrt();
    let psi = ((n - 1) as f64).sqrt() * sigma_y;
    let log_grid = Array1::linspace(-psi, psi, n);
    Ok((log_grid, trans))
}

/// Tauchen discretization of a zero-mean AR(1) in logs over `±width` unconditional
/// standard deviations.
///
/// Returns `(log_grid, trans)`.
pub fn tauchen(
    rho: f64, sigma: f64, n: usize, width: f64,
) -> ModelResult<(Array1<f64>, Array2<f64>)> {
    validate_ar1(rho, sigma, n)?;
    if !width.is_finite() || width <= 0.0 {
        return Err(ModelError::InvalidIncomeProcess {
            name: "width",
            value: width,
            reason: "Tauchen width must be finite and > 0.",
        });
    }

    let std_normal = Normal::new(0.0, 1.0)?;
    let sigma_y = sigma / (1.0 - rho * rho).sqrt();
    let bound = width * sigma_y;
    let log_grid = Array1::linspace(-bound, bound, n);
    let half_step = (log_grid[1] - log_grid[0]) / 2.0;

    let mut trans = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        let mean = rho * log_grid[i];
        for j in 0..n {
            let upper = if j == n - 1 {
                1.0
            } else {
                std_normal.cdf((log_grid[j] + half_step - mean) / sigma)
            };
            let lower =
                if j == 0 { 0.0 } else { std_normal.cdf((log_grid[j] - half_step - mean) / sigma) };
            trans[[i, j]] = upper - lower;
        }
        let row_sum = trans.row(i).sum();
        trans.row_mut(i).mapv_inplace(|x| x / row_sum);
    }
    Ok((log_grid, trans))
}

/// Stationary distribution of a row-stochastic matrix.
///
/// Solves `πᵀ P = πᵀ` by replacing the last equation of `(Pᵀ - I) π = 0`
/// with the normalization `Σ π = 1`.
///
/// Errors
/// ------
/// - [`ModelError::ErgodicNotFound`] if the system is singular (no unique
///   stationary distribution) or the solution has materially negative mass.
pub fn find_ergodic(trans: ArrayView2<f64>) -> ModelResult<Array1<f64>> {
    let n = trans.nrows();
    if n == 0 || trans.ncols() != n {
        return Err(ModelError::ErgodicNotFound { reason: "Transition matrix is not square." });
    }

    let a = DMatrix::<f64>::from_fn(n, n, |i, j| {
        if i == n - 1 {
            1.0
        } else if i == j {
            trans[[j, i]] - 1.0
        } else {
            trans[[j, i]]
        }
    });
    let mut b = DVector::<f64>::zeros(n);
    b[n - 1] = 1.0;

    let pi = a
        .lu()
        .solve(&b)
        .ok_or(ModelError::ErgodicNotFound { reason: "Singular system; chain is not ergodic." })?;

    if pi.iter().any(|&p| !p.is_finite() || p < -ERGODIC_NEG_TOL) {
        return Err(ModelError::ErgodicNotFound { reason: "Solution has negative mass." });
    }
    let mut ergodic = Array1::from_iter(pi.iter().map(|&p| p.max(0.0)));
    let total = ergodic.sum();
    ergodic /= total;
    Ok(ergodic)
}

// ---- Helper methods ----

fn validate_ar1(rho: f64, sigma: f64, n: usize) -> ModelResult<()> {
    if n < 2 {
        return Err(ModelError::InvalidIncomeProcess {
            name: "Nz",
            value: n as f64,
            reason: "Nz must be at least 2.",
        });
    }
    validate_persistence(rho)?;
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ModelError::InvalidIncomeProcess {
            name: "sigma_psi",
            value: sigma,
            reason: "Innovation std must be finite and > 0.",
        });
    }
    Ok(())
}

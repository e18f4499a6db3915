//! household — household policies, the stationary distribution, and the
//! interfaces of the solvers that produce them.
//!
//! Purpose
//! -------
//! Define the seam between the steady-state engine and the two iterative
//! collaborators it relies on:
//! - a [`HouseholdOracle`] that maps prices `(r, w)` to converged policies,
//! - a [`DistributionSolver`] that maps policies and the income transition
//!   kernel to a converged stationary distribution and its aggregates.
//!
//! Reference implementations of both ship with the crate
//! ([`EgmHouseholdSolver`], [`HistogramSimulator`]); any other implementation
//! can be plugged into the steady-state solver through the traits.
//!
//! Key behaviors
//! -------------
//! - [`Prices`] validates `r > -1` and `w > 0`.
//! - [`HouseholdPolicies`] holds the savings (`a`), consumption (`c`),
//!   cash-on-hand (`m`), and expected marginal value (`vbeg_a`) arrays.
//! - [`StationaryDistribution`] holds the post-shock distribution `D`, the
//!   beginning-of-period distribution `Dbeg`, and [`HouseholdAggregates`].
//!
//! Invariants & assumptions
//! ------------------------
//! - All state arrays have shape `(Nbeta, Nz, Na)` matching the grids.
//! - Solvers are synchronous and blocking; their iteration caps are the only
//!   bounded-time guarantee.
//! - Solvers take immutable inputs and return fresh arrays; callers replace
//!   prior state instead of aliasing it.

pub mod egm;
pub mod errors;
pub mod interp;
pub mod simulate;

use crate::model::core::{grids::HouseholdGrids, params::HANCParams};
use ndarray::{Array3, Zip};

pub use self::egm::EgmHouseholdSolver;
pub use self::errors::{HouseholdError, HouseholdResult, SolveStage};
pub use self::simulate::HistogramSimulator;

/// Prices faced by households in the steady state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prices {
    pub r: f64,
    pub w: f64,
}

impl Prices {
    /// Errors
    /// ------
    /// - [`HouseholdError::InvalidPrices`] if `r` is not finite or `<= -1`, or
    ///   `w` is not finite or `<= 0`.
    pub fn new(r: f64, w: f64) -> HouseholdResult<Self> {
        if !r.is_finite() || r <= -1.0 {
            return Err(HouseholdError::InvalidPrices { name: "r", value: r });
        }
        if !w.is_finite() || w <= 0.0 {
            return Err(HouseholdError::InvalidPrices { name: "w", value: w });
        }
        Ok(Prices { r, w })
    }
}

/// Iteration count and final sup-norm change of an iterative solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceSummary {
    pub iterations: usize,
    pub max_gap: f64,
}

/// Converged household policies on the `(Nbeta, Nz, Na)` state space.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseholdPolicies {
    /// End-of-period assets chosen at each state.
    pub a: Array3<f64>,
    /// Consumption at each state.
    pub c: Array3<f64>,
    /// Cash-on-hand `(1 + r) a + w z`.
    pub m: Array3<f64>,
    /// Expected marginal value of beginning-of-period assets.
    pub vbeg_a: Array3<f64>,
    pub summary: ConvergenceSummary,
}

/// Aggregates implied by a distribution and a set of policies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseholdAggregates {
    /// Aggregate end-of-period assets.
    pub a_hh: f64,
    /// Aggregate consumption.
    pub c_hh: f64,
    /// Aggregate effective labor supply.
    pub l_hh: f64,
}

/// Converged stationary distribution and its aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct StationaryDistribution {
    /// Distribution after the income shock, before the savings choice.
    pub d: Array3<f64>,
    /// Beginning-of-period distribution (before the income shock).
    pub dbeg: Array3<f64>,
    pub aggregates: HouseholdAggregates,
    pub summary: ConvergenceSummary,
}

/// HouseholdOracle — prices to converged household policies.
///
/// Implementations must either converge within `params.solver.tol_solve` in
/// at most `params.solver.max_iter_solve` iterations or return
/// [`HouseholdError::NonConvergence`].
pub trait HouseholdOracle {
    fn solve(
        &self, prices: &Prices, grids: &HouseholdGrids, params: &HANCParams,
    ) -> HouseholdResult<HouseholdPolicies>;
}

/// DistributionSolver — policies and transition kernel to a stationary
/// distribution.
///
/// Implementations must either converge within `params.solver.tol_simulate`
/// in at most `params.solver.max_iter_simulate` iterations or return
/// [`HouseholdError::NonConvergence`]. The transition kernel is
/// `grids.z_trans`; `dbeg` seeds the iteration.
pub trait DistributionSolver {
    fn simulate(
        &self, policies: &HouseholdPolicies, grids: &HouseholdGrids, dbeg: &Array3<f64>,
        params: &HANCParams,
    ) -> HouseholdResult<StationaryDistribution>;
}

impl<T: HouseholdOracle + ?Sized> HouseholdOracle for &T {
    fn solve(
        &self, prices: &Prices, grids: &HouseholdGrids, params: &HANCParams,
    ) -> HouseholdResult<HouseholdPolicies> {
        (**self).solve(prices, grids, params)
    }
}

impl<T: DistributionSolver + ?Sized> DistributionSolver for &T {
    fn simulate(
        &self, policies: &HouseholdPolicies, grids: &HouseholdGrids, dbeg: &Array3<f64>,
        params: &HANCParams,
    ) -> HouseholdResult<StationaryDistribution> {
        (**self).simulate(policies, grids, dbeg, params)
    }
}

/// Check that `arr` has the grids' state shape.
pub(crate) fn check_state_shape(
    what: &'static str, arr: &Array3<f64>, grids: &HouseholdGrids,
) -> HouseholdResult<()> {
    let expected = grids.state_shape();
    let actual = arr.dim();
    if expected != actual {
        return Err(HouseholdError::ShapeMismatch { what, expected, actual });
    }
    Ok(())
}

/// Sup-norm distance between two equally shaped arrays.
pub(crate) fn sup_norm_diff(lhs: &Array3<f64>, rhs: &Array3<f64>) -> f64 {
    Zip::from(lhs).and(rhs).fold(0.0_f64, |acc, &x, &y| acc.max((x - y).abs()))
}

pub mod prelude {
    pub use super::{
        ConvergenceSummary, DistributionSolver, EgmHouseholdSolver, HistogramSimulator,
        HouseholdAggregates, HouseholdError, HouseholdOracle, HouseholdPolicies, HouseholdResult,
        Prices, SolveStage, StationaryDistribution,
    };
}

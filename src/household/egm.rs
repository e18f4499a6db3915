//! egm — endogenous-grid-method solver for the household savings problem.
//!
//! Purpose
//! -------
//! Provide the crate's reference [`HouseholdOracle`]: given prices `(r, w)`,
//! iterate the household Euler equation backwards on the asset grid until the
//! savings policy stops changing.
//!
//! Key behaviors
//! -------------
//! For each discount-factor type `b` and income state `z`, one backward step:
//! 1. Cash-on-hand on the exogenous grid: `m = (1 + r) a + w z`.
//! 2. Euler inversion on the end-of-period grid:
//!    `c_endo = (beta_b * vbeg_a)^(-1/sigma)`, `m_endo = c_endo + a_grid`.
//! 3. Savings `a'(m)` by linear interpolation of `a_grid` on `m_endo`,
//!    clamped at the borrowing limit 0; consumption `c = m - a'`.
//! 4. Expectation step: `vbeg_a[b] = z_trans[b] · ((1 + r) c^(-sigma))`.
//!
//! Iteration stops when `max |a'_new - a'_old| < tol_solve`; otherwise
//! [`HouseholdError::NonConvergence`] is returned after `max_iter_solve`
//! steps.
//!
//! Invariants & assumptions
//! ------------------------
//! - Returned policies are finite, `a' >= 0`, and `c > 0` at every state.
//! - The initial guess saves a fixed share of cash-on-hand, which keeps the
//!   first marginal values finite even at the borrowing limit.
use crate::{
    household::{
        check_state_shape,
        errors::{HouseholdError, HouseholdResult, SolveStage},
        interp::interp_linear,
        sup_norm_diff, ConvergenceSummary, HouseholdOracle, HouseholdPolicies, Prices,
    },
    model::core::{grids::HouseholdGrids, params::HANCParams},
};
use ndarray::{Array3, Axis};
use slog::{debug, o, Discard, Logger};

/// Share of cash-on-hand saved in the initial policy guess.
const INITIAL_SAVINGS_SHARE: f64 = 0.9;

/// EgmHouseholdSolver — reference backward-induction household oracle.
#[derive(Debug, Clone)]
pub struct EgmHouseholdSolver {
    logger: Logger,
}

impl EgmHouseholdSolver {
    pub fn new() -> Self {
        EgmHouseholdSolver { logger: Logger::root(Discard, o!()) }
    }

    /// Attach a logger that receives a `debug` record on convergence.
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }
}

impl Default for EgmHouseholdSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl HouseholdOracle for EgmHouseholdSolver {
    fn solve(
        &self, prices: &Prices, grids: &HouseholdGrids, params: &HANCParams,
    ) -> HouseholdResult<HouseholdPolicies> {
        let sigma = params.preferences.sigma;
        let opts = &params.solver;

        let m = cash_on_hand(prices, grids);
        let mut c = m.mapv(|mi| (1.0 - INITIAL_SAVINGS_SHARE) * mi);
        let mut vbeg_a = expectation_step(prices, grids, &c, sigma);
        let mut a = m.mapv(|mi| INITIAL_SAVINGS_SHARE * mi);
        let mut last_gap = f64::INFINITY;

        for iteration in 1..=opts.max_iter_solve {
            let (a_new, c_new) = egm_step(grids, &m, &vbeg_a, sigma);
            let gap = sup_norm_diff(&a_new, &a);
            vbeg_a = expectation_step(prices, grids, &c_new, sigma);
            a = a_new;
            c = c_new;
            last_gap = gap;

            if gap < opts.tol_solve {
                check_policies(&a, &c)?;
                debug!(self.logger, "household solve converged";
                    "iterations" => iteration, "max_gap" => gap, "r" => prices.r, "w" => prices.w);
                return Ok(HouseholdPolicies {
                    a,
                    c,
                    m,
                    vbeg_a,
                    summary: ConvergenceSummary { iterations: iteration, max_gap: gap },
                });
            }
        }

        Err(HouseholdError::NonConvergence {
            stage: SolveStage::Solve,
            iterations: opts.max_iter_solve,
            max_iter: opts.max_iter_solve,
            distance: last_gap,
        })
    }
}

// ---- Helper methods ----

/// Cash-on-hand `(1 + r) a + w z` on the `(Nbeta, Nz, Na)` state space.
fn cash_on_hand(prices: &Prices, grids: &HouseholdGrids) -> Array3<f64> {
    let shape = grids.state_shape();
    Array3::from_shape_fn(shape, |(_, i_z, i_a)| {
        (1.0 + prices.r) * grids.a_grid[i_a] + prices.w * grids.income.z_grid[i_z]
    })
}

/// One Euler-inversion step given next period's expected marginal value.
fn egm_step(
    grids: &HouseholdGrids, m: &Array3<f64>, vbeg_a: &Array3<f64>, sigma: f64,
) -> (Array3<f64>, Array3<f64>) {
    let (n_beta, n_z, n_a) = grids.state_shape();
    let a_grid = grids.a_grid.to_vec();
    let mut a = Array3::<f64>::zeros((n_beta, n_z, n_a));
    let mut c = Array3::<f64>::zeros((n_beta, n_z, n_a));
    let mut m_endo = vec![0.0; n_a];

    for i_beta in 0..n_beta {
        let beta = grids.beta_grid[i_beta];
        for i_z in 0..n_z {
            for (i_a, slot) in m_endo.iter_mut().enumerate() {
                let c_endo = (beta * vbeg_a[[i_beta, i_z, i_a]]).powf(-1.0 / sigma);
                *slot = c_endo + a_grid[i_a];
            }
            for i_a in 0..n_a {
                let mi = m[[i_beta, i_z, i_a]];
                let savings = interp_linear(&m_endo, &a_grid, mi).max(0.0);
                a[[i_beta, i_z, i_a]] = savings;
                c[[i_beta, i_z, i_a]] = mi - savings;
            }
        }
    }
    (a, c)
}

/// `vbeg_a[b] = z_trans[b] · ((1 + r) c[b]^(-sigma))`.
fn expectation_step(
    prices: &Prices, grids: &HouseholdGrids, c: &Array3<f64>, sigma: f64,
) -> Array3<f64> {
    let v_a = c.mapv(|ci| (1.0 + prices.r) * ci.powf(-sigma));
    let mut vbeg_a = Array3::<f64>::zeros(v_a.raw_dim());
    for (i_beta, mut out) in vbeg_a.axis_iter_mut(Axis(0)).enumerate() {
        let trans = grids.z_trans.index_axis(Axis(0), i_beta);
        out.assign(&trans.dot(&v_a.index_axis(Axis(0), i_beta)));
    }
    vbeg_a
}

fn check_policies(a: &Array3<f64>, c: &Array3<f64>) -> HouseholdResult<()> {
    for ((index, &ai), &ci) in a.indexed_iter().zip(c.iter()) {
        if !ai.is_finite() {
            return Err(HouseholdError::NonFiniteValue { what: "a", index, value: ai });
        }
        if !ci.is_finite() {
            return Err(HouseholdError::NonFiniteValue { what: "c", index, value: ci });
        }
        if ci <= 0.0 {
            return Err(HouseholdError::NonPositiveConsumption { index, value: ci });
        }
    }
    Ok(())
}

/// Validate that externally supplied policies match the grids.
pub(crate) fn check_policy_shapes(
    policies: &HouseholdPolicies, grids: &HouseholdGrids,
) -> HouseholdResult<()> {
    check_state_shape("a", &policies.a, grids)?;
    check_state_shape("c", &policies.c, grids)?;
    Ok(())
}

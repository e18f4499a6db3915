//! simulate — forward iteration of the cross-sectional distribution.
//!
//! Purpose
//! -------
//! Provide the crate's reference [`DistributionSolver`]: a non-stochastic
//! (histogram) simulation that pushes probability mass through the income
//! transition and the savings policy until the beginning-of-period
//! distribution is stationary.
//!
//! Key behaviors
//! -------------
//! - Exogenous step, per discount-factor type `b`:
//!   `D[b] = z_trans[b]ᵀ · Dbeg[b]`.
//! - Endogenous step: mass at `(b, z, a)` moves to the two asset points that
//!   bracket the chosen `a'`, with weights that preserve the mean of `a'`
//!   (a lottery on the grid). Choices above the top of the grid are placed
//!   on the top point.
//! - Converges when `max |Dbeg_next - Dbeg| < tol_simulate`; otherwise returns
//!   [`HouseholdError::NonConvergence`] after `max_iter_simulate` steps.
//! - Aggregates are computed on the post-shock distribution `D`:
//!   `A_hh = Σ D·a'`, `C_hh = Σ D·c`, `L_hh = Σ D·z`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both steps are Markov operators: mass is non-negative and conserved.
//! - The seed `Dbeg` must be a valid probability mass of the grids' shape.
use crate::{
    household::{
        check_state_shape,
        egm::check_policy_shapes,
        errors::{HouseholdError, HouseholdResult, SolveStage},
        interp::{bracket, lower_weight},
        sup_norm_diff, ConvergenceSummary, DistributionSolver, HouseholdAggregates,
        HouseholdPolicies, StationaryDistribution,
    },
    model::core::{grids::HouseholdGrids, params::HANCParams, validation::validate_distribution},
};
use ndarray::{Array3, Axis, Zip};
use slog::{debug, o, Discard, Logger};

/// HistogramSimulator — reference forward distribution iteration.
#[derive(Debug, Clone)]
pub struct HistogramSimulator {
    logger: Logger,
}

impl HistogramSimulator {
    pub fn new() -> Self {
        HistogramSimulator { logger: Logger::root(Discard, o!()) }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }
}

impl Default for HistogramSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl DistributionSolver for HistogramSimulator {
    fn simulate(
        &self, policies: &HouseholdPolicies, grids: &HouseholdGrids, dbeg: &Array3<f64>,
        params: &HANCParams,
    ) -> HouseholdResult<StationaryDistribution> {
        check_policy_shapes(policies, grids)?;
        check_state_shape("Dbeg", dbeg, grids)?;
        validate_distribution(dbeg.view().into_dyn())?;

        let opts = &params.solver;
        let lottery = ChoiceLottery::new(&policies.a, grids);
        let mut current = dbeg.clone();
        let mut last_gap = f64::INFINITY;

        for iteration in 1..=opts.max_iter_simulate {
            let d = exogenous_step(&current, grids);
            let next = lottery.apply(&d);
            let gap = sup_norm_diff(&next, &current);
            current = next;
            last_gap = gap;

            if gap < opts.tol_simulate {
                let d = exogenous_step(&current, grids);
                check_mass(&d)?;
                let aggregates = aggregate(&d, policies, grids);
                debug!(self.logger, "distribution simulation converged";
                    "iterations" => iteration, "max_gap" => gap, "A_hh" => aggregates.a_hh);
                return Ok(StationaryDistribution {
                    d,
                    dbeg: current,
                    aggregates,
                    summary: ConvergenceSummary { iterations: iteration, max_gap: gap },
                });
            }
        }

        Err(HouseholdError::NonConvergence {
            stage: SolveStage::Simulate,
            iterations: opts.max_iter_simulate,
            max_iter: opts.max_iter_simulate,
            distance: last_gap,
        })
    }
}

/// Aggregate assets, consumption and effective labor under `d`.
pub fn aggregate(
    d: &Array3<f64>, policies: &HouseholdPolicies, grids: &HouseholdGrids,
) -> HouseholdAggregates {
    let a_hh = Zip::from(d).and(&policies.a).fold(0.0, |acc, &p, &a| acc + p * a);
    let c_hh = Zip::from(d).and(&policies.c).fold(0.0, |acc, &p, &c| acc + p * c);
    let l_hh = d
        .indexed_iter()
        .fold(0.0, |acc, ((_, i_z, _), &p)| acc + p * grids.income.z_grid[i_z]);
    HouseholdAggregates { a_hh, c_hh, l_hh }
}

/// `D[b] = z_trans[b]ᵀ · Dbeg[b]` for every discount-factor type.
pub fn exogenous_step(dbeg: &Array3<f64>, grids: &HouseholdGrids) -> Array3<f64> {
    let mut d = Array3::<f64>::zeros(dbeg.raw_dim());
    for (i_beta, mut out) in d.axis_iter_mut(Axis(0)).enumerate() {
        let trans = grids.z_trans.index_axis(Axis(0), i_beta);
        out.assign(&trans.t().dot(&dbeg.index_axis(Axis(0), i_beta)));
    }
    d
}

// ---- Helper methods ----

/// Precomputed bracketing index and lower weight for each state's choice.
struct ChoiceLottery {
    index: Array3<usize>,
    weight: Array3<f64>,
}

impl ChoiceLottery {
    fn new(a_policy: &Array3<f64>, grids: &HouseholdGrids) -> Self {
        let a_grid = grids.a_grid.to_vec();
        let index = a_policy.mapv(|a| bracket(&a_grid, a));
        let mut weight = Array3::<f64>::zeros(a_policy.raw_dim());
        Zip::from(&mut weight).and(&index).and(a_policy).for_each(|w, &i, &a| {
            *w = lower_weight(&a_grid, i, a);
        });
        ChoiceLottery { index, weight }
    }

    fn apply(&self, d: &Array3<f64>) -> Array3<f64> {
        let mut next = Array3::<f64>::zeros(d.raw_dim());
        for ((i_beta, i_z, i_a), &mass) in d.indexed_iter() {
            if mass == 0.0 {
                continue;
            }
            let i = self.index[[i_beta, i_z, i_a]];
            let w = self.weight[[i_beta, i_z, i_a]];
            next[[i_beta, i_z, i]] += w * mass;
            next[[i_beta, i_z, i + 1]] += (1.0 - w) * mass;
        }
        next
    }
}

fn check_mass(d: &Array3<f64>) -> HouseholdResult<()> {
    for (index, &p) in d.indexed_iter() {
        if !p.is_finite() {
            return Err(HouseholdError::NonFiniteValue { what: "D", index, value: p });
        }
    }
    validate_distribution(d.view().into_dyn())?;
    Ok(())
}

//! steady_state — stationary equilibrium of the HANC economy by back-solving.
//!
//! Purpose
//! -------
//! Compute a stationary equilibrium in which the interest rate `r` and wage
//! `w` are *targets* rather than unknowns. Households are solved once at the
//! target prices; aggregate capital is read off their asset holdings, and TFP
//! `Gamma` and depreciation `delta` are back-solved so that firms' first-order
//! conditions hold at those prices. No outer root-finding is needed.
//!
//! Key behaviors
//! -------------
//! [`SteadyStateSolver::find_ss`] runs, in order:
//! 1. `L = 1`, `r = r_ss_target`, `w = w_ss_target`.
//! 2. Stability precondition `(1 + r) * beta_mean < 1`, checked before any
//!    household work.
//! 3. Grids (asset grid scaled by `w`) and the initial `Dbeg`.
//! 4. Household oracle, then distribution solver.
//! 5. The aggregate block ([`solve_aggregate_block`]):
//!    `A = K_lag = K = A_hh`,
//!    `Gamma = w / ((1 - alpha) (K/L)^alpha)`,
//!    `rk = alpha Gamma (K/L)^(alpha - 1)`, `delta = rk - r`,
//!    `Y = Gamma K^alpha L^(1 - alpha)`, `I = delta K`,
//!    `clearing_A = A - A_hh`, `clearing_L = L - L_hh`,
//!    `clearing_Y = Y - C_hh - I`.
//! 6. Diagnostics and, if `do_print`, an `info` record with the report.
//!
//! Invariants & assumptions
//! ------------------------
//! - On success every [`SteadyState`] field is populated and finite,
//!   `clearing_A == 0` exactly and `clearing_L == 0` up to the distribution's
//!   mass tolerance.
//! - `find_ss` never mutates its input; the back-solved `delta` is returned
//!   in a fresh parameter set on the outcome.
//! - Running `find_ss` twice on the same input yields identical results.
//!
//! Downstream usage
//! ----------------
//! - Use [`SteadyStateSolver::reference`] for the built-in EGM + histogram
//!   pair, or [`SteadyStateSolver::new`] to plug in other collaborators.
//! - Call [`SteadyStateOutcome::ensure_consistent`] to treat recorded
//!   anomalies as errors.
use crate::{
    equilibrium::{
        diagnostics::{SteadyStateDiagnostics, SteadyStateReport},
        errors::{SSError, SSResult},
    },
    household::{
        DistributionSolver, EgmHouseholdSolver, HistogramSimulator, HouseholdAggregates,
        HouseholdOracle, HouseholdPolicies, Prices, StationaryDistribution,
    },
    model::core::{distribution::initial_distribution, grids::HouseholdGrids, params::HANCParams},
};
use slog::{info, o, warn, Discard, Logger};

/// Aggregate labor supply in the steady state.
const STEADY_STATE_LABOR: f64 = 1.0;

/// SteadyState — the aggregate record of a solved stationary equilibrium.
///
/// Field names follow the model notation in lower case: `k` is `K`, `k_lag`
/// is `K_lag`, `gamma` is `Gamma`, `clearing_y` is `clearing_Y`, and so on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteadyState {
    // ---- Prices and labor ----
    pub l: f64,
    pub r: f64,
    pub w: f64,

    // ---- Capital and assets ----
    pub k: f64,
    pub k_lag: f64,
    pub a: f64,

    // ---- Household aggregates ----
    pub a_hh: f64,
    pub c_hh: f64,
    /// Aggregate consumption; equals `c_hh`.
    pub c: f64,
    pub l_hh: f64,

    // ---- Firm block ----
    pub gamma: f64,
    pub rk: f64,
    pub delta: f64,
    pub y: f64,
    pub i: f64,

    // ---- Market clearing residuals ----
    pub clearing_a: f64,
    pub clearing_l: f64,
    pub clearing_y: f64,
}

impl SteadyState {
    pub fn k_over_y(&self) -> f64 {
        self.k / self.y
    }

    pub fn report(&self) -> SteadyStateReport {
        SteadyStateReport::from(self)
    }
}

/// Everything produced by one `find_ss` call.
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyStateOutcome {
    pub ss: SteadyState,
    /// Input parameters with `technology.delta` replaced by the back-solved
    /// value.
    pub params: HANCParams,
    pub grids: HouseholdGrids,
    pub policies: HouseholdPolicies,
    pub distribution: StationaryDistribution,
    pub diagnostics: SteadyStateDiagnostics,
}

impl SteadyStateOutcome {
    /// Promote recorded consistency anomalies to an error.
    ///
    /// Errors
    /// ------
    /// - [`SSError::Inconsistent`] listing every anomaly, if any were
    ///   recorded.
    pub fn ensure_consistent(&self) -> SSResult<()> {
        if self.diagnostics.is_consistent() {
            return Ok(());
        }
        Err(SSError::Inconsistent { anomalies: self.diagnostics.anomalies.clone() })
    }
}

/// SteadyStateSolver — drives one back-solved steady-state computation.
///
/// Generic over the household oracle `O` and distribution solver `S` so that
/// alternative solvers (or test doubles) can be plugged in.
#[derive(Debug, Clone)]
pub struct SteadyStateSolver<O, S> {
    oracle: O,
    simulator: S,
    logger: Logger,
}

impl SteadyStateSolver<EgmHouseholdSolver, HistogramSimulator> {
    /// Built-in EGM household solver with the histogram simulator.
    pub fn reference() -> Self {
        SteadyStateSolver::new(EgmHouseholdSolver::new(), HistogramSimulator::new())
    }
}

impl<O: HouseholdOracle, S: DistributionSolver> SteadyStateSolver<O, S> {
    pub fn new(oracle: O, simulator: S) -> Self {
        SteadyStateSolver { oracle, simulator, logger: Logger::root(Discard, o!()) }
    }

    /// Route the steady-state report and anomaly warnings to `logger`.
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Find the steady state implied by `params`.
    ///
    /// Parameters
    /// ----------
    /// - `params`: validated configuration; `technology.delta` is ignored on
    ///   input and back-solved.
    ///
    /// Returns
    /// -------
    /// [`SteadyStateOutcome`] with the populated record, the updated
    /// parameters, grids, policies, distribution, and diagnostics.
    ///
    /// Errors
    /// ------
    /// - [`SSError::StabilityViolated`] if `(1 + r) * beta_mean >= 1`; no
    ///   household solving is attempted.
    /// - [`SSError::Model`] for grid or income-process construction failures.
    /// - [`SSError::Household`] for oracle or simulator failures, including
    ///   non-convergence.
    /// - [`SSError::NonPositiveCapital`] / [`SSError::NonFiniteAggregate`]
    ///   from the aggregate block.
    pub fn find_ss(&self, params: &HANCParams) -> SSResult<SteadyStateOutcome> {
        let l = STEADY_STATE_LABOR;
        let r = params.targets.r_ss_target;
        let w = params.targets.w_ss_target;
        check_stability(r, params.preferences.beta_mean)?;

        let prices = Prices::new(r, w)?;
        let grids = HouseholdGrids::build(params, w)?;
        let dbeg = initial_distribution(&grids)?;

        let policies = self.oracle.solve(&prices, &grids, params)?;
        let distribution = self.simulator.simulate(&policies, &grids, &dbeg, params)?;

        let ss = solve_aggregate_block(params, l, r, w, &distribution.aggregates)?;
        let diagnostics = SteadyStateDiagnostics::assess(&ss, &params.diagnostics);

        if params.diagnostics.do_print {
            info!(self.logger, "steady state solved\n{}", ss.report();
                "household_iterations" => policies.summary.iterations,
                "distribution_iterations" => distribution.summary.iterations);
            for anomaly in &diagnostics.anomalies {
                warn!(self.logger, "steady state anomaly: {}", anomaly);
            }
        }

        Ok(SteadyStateOutcome {
            ss,
            params: params.with_delta(ss.delta),
            grids,
            policies,
            distribution,
            diagnostics,
        })
    }
}

// ---- Helper methods ----

/// Errors
/// ------
/// - [`SSError::StabilityViolated`] if `(1 + r) * beta_mean >= 1`.
pub fn check_stability(r: f64, beta_mean: f64) -> SSResult<()> {
    let product = (1.0 + r) * beta_mean;
    if !(product < 1.0) {
        return Err(SSError::StabilityViolated { r, beta_mean, product });
    }
    Ok(())
}

/// Back-solve the firm block from household aggregates.
///
/// Parameters
/// ----------
/// - `params`: supplies `alpha`.
/// - `l`, `r`, `w`: steady-state labor and target prices.
/// - `hh`: aggregates from the converged distribution.
///
/// Errors
/// ------
/// - [`SSError::NonPositiveCapital`] if `A_hh <= 0` (or NaN).
/// - [`SSError::NonFiniteAggregate`] if any derived quantity is NaN/±inf.
pub fn solve_aggregate_block(
    params: &HANCParams, l: f64, r: f64, w: f64, hh: &HouseholdAggregates,
) -> SSResult<SteadyState> {
    let alpha = params.technology.alpha;

    let a = hh.a_hh;
    if !(a > 0.0) {
        return Err(SSError::NonPositiveCapital { value: a });
    }
    let k = a;
    let k_lag = k;
    let capital_labor = k / l;

    let gamma = w / ((1.0 - alpha) * capital_labor.powf(alpha));
    let rk = alpha * gamma * capital_labor.powf(alpha - 1.0);
    let delta = rk - r;
    let y = gamma * k.powf(alpha) * l.powf(1.0 - alpha);
    let i = delta * k;

    let ss = SteadyState {
        l,
        r,
        w,
        k,
        k_lag,
        a,
        a_hh: hh.a_hh,
        c_hh: hh.c_hh,
        c: hh.c_hh,
        l_hh: hh.l_hh,
        gamma,
        rk,
        delta,
        y,
        i,
        clearing_a: a - hh.a_hh,
        clearing_l: l - hh.l_hh,
        clearing_y: y - hh.c_hh - i,
    };
    check_finite(&ss)?;
    Ok(ss)
}

fn check_finite(ss: &SteadyState) -> SSResult<()> {
    let fields = [
        ("C_hh", ss.c_hh),
        ("L_hh", ss.l_hh),
        ("Gamma", ss.gamma),
        ("rk", ss.rk),
        ("delta", ss.delta),
        ("Y", ss.y),
        ("I", ss.i),
        ("clearing_L", ss.clearing_l),
        ("clearing_Y", ss.clearing_y),
    ];
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some(&(name, value)) => Err(SSError::NonFiniteAggregate { name, value }),
        None => Ok(()),
    }
}

//! Integration tests for the back-solved steady-state pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end pipeline: validated configuration, grids and
//!   income process, initial distribution, EGM household solve, histogram
//!   simulation, and the aggregate block of `find_ss`.
//! - Exercise small but economically realistic calibrations rather than toy
//!   edge cases only.
//!
//! Coverage
//! --------
//! - `model::core`:
//!   - `beta_grid`, wage-scaled `a_grid`, Rouwenhorst and Tauchen chains,
//!     and the initial distribution.
//! - `household`:
//!   - `EgmHouseholdSolver` and `HistogramSimulator` through the traits.
//! - `equilibrium`:
//!   - Market-clearing residuals, back-solved `Gamma` / `rk` / `delta`,
//!     precondition failure, and non-convergence propagation.
//!
//! Exclusions
//! ----------
//! - Closed-form checks with stub oracles and idempotence live in the unit
//!   tests of `equilibrium::steady_state`.
//! - Python bindings are exercised from the Python side.
//! - Full-size baseline runs (`Na = 300`) are too slow for the default test
//!   profile.
use approx::assert_abs_diff_eq;
use ndarray::{Array1, Axis};
use rust_hanc::{
    equilibrium::{SSError, SteadyStateOutcome, SteadyStateSolver},
    household::{
        DistributionSolver, EgmHouseholdSolver, HistogramSimulator, HouseholdError,
        HouseholdOracle, Prices, SolveStage,
    },
    model::{
        core::{beta_grid, initial_distribution},
        AssetGridSpec, HANCParams, HouseholdGrids, IncomeMethod, IncomeSpec, Preferences,
        SolverOptions, Targets,
    },
};

/// Purpose
/// -------
/// Build a small calibration that converges quickly and leaves the top of
/// the asset grid unused.
///
/// Parameters
/// ----------
/// - `n_beta`: number of discount-factor types.
/// - `beta_delta`: half-width of the discount-factor interval.
///
/// Returns
/// -------
/// - `HANCParams` with `Na = 80`, `a_max = 100`, `Nz = 7`,
///   `beta_mean = 0.96`, `tol_solve = 1e-9`, `tol_simulate = 1e-12`, and
///   baseline targets `r = 0.01`, `w = 1`.
fn small_params(n_beta: usize, beta_delta: f64) -> HANCParams {
    let mut params = HANCParams::default();
    params.preferences = Preferences::new(2.0, 0.96, beta_delta, n_beta).expect("valid prefs");
    params.asset_grid = AssetGridSpec::new(100.0, 80).expect("valid grid spec");
    params.solver = SolverOptions::new(1e-9, 50_000, 1e-12, 500_000).expect("valid options");
    params
}

/// Purpose
/// -------
/// Check the accounting identities every successful outcome must satisfy.
///
/// Invariants
/// ----------
/// - `A = K = K_lag = A_hh`, `clearing_A == 0` exactly.
/// - `clearing_L ~ 0` and `clearing_Y ~ 0` given tight tolerances.
/// - Firm first-order conditions hold at the target prices.
/// - The returned params carry the back-solved depreciation.
fn assert_reconciled(out: &SteadyStateOutcome) {
    let ss = &out.ss;
    let alpha = out.params.technology.alpha;

    assert_eq!(ss.a, ss.a_hh);
    assert_eq!(ss.k, ss.a_hh);
    assert_eq!(ss.k_lag, ss.k);
    assert_eq!(ss.clearing_a, 0.0);
    assert_abs_diff_eq!(ss.clearing_l, 0.0, epsilon = 1e-10);
    assert_abs_diff_eq!(ss.clearing_y, 0.0, epsilon = 1e-6);

    let kl = ss.k / ss.l;
    assert_abs_diff_eq!(ss.w, (1.0 - alpha) * ss.gamma * kl.powf(alpha), epsilon = 1e-12);
    assert_abs_diff_eq!(ss.rk, ss.r + ss.delta, epsilon = 1e-14);
    assert_abs_diff_eq!(ss.i, ss.delta * ss.k, epsilon = 1e-14);
    assert_eq!(out.params.technology.delta, ss.delta);
}

#[test]
// Purpose
// -------
// Verify the static building blocks through the public API.
//
// Given
// -----
// - Baseline preferences with `Nbeta = 1` and a three-type variant.
// - The baseline income process and a wage of 1.0 vs 1.5.
//
// Expect
// ------
// - `beta_grid == [beta_mean]` for one type; sorted, length 3 otherwise.
// - `a_grid` starts at 0, strictly increases, and its maximum scales with w.
// - Transition rows sum to one; the ergodic distribution is a fixed point.
// - The initial distribution sums to one with all mass at asset index 0.
fn grids_and_initial_distribution_satisfy_properties() {
    // Arrange
    let params = small_params(1, 0.0);
    let three = Preferences::new(2.0, 0.96, 0.01, 3).expect("valid prefs");

    // Act
    let grids = HouseholdGrids::build(&params, 1.0).expect("grids at w = 1");
    let scaled = HouseholdGrids::build(&params, 1.5).expect("grids at w = 1.5");
    let betas = beta_grid(&three).expect("three-type grid");
    let dbeg = initial_distribution(&grids).expect("initial distribution");

    // Assert
    assert_eq!(grids.beta_grid, Array1::from(vec![0.96]));
    assert_eq!(betas.len(), 3);
    assert!(betas.windows(2).into_iter().all(|w| w[0] < w[1]));

    assert_eq!(grids.a_grid[0], 0.0);
    assert!(grids.a_grid.windows(2).into_iter().all(|w| w[0] < w[1]));
    assert_abs_diff_eq!(grids.a_grid[79], 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(scaled.a_grid[79], 1.5 * grids.a_grid[79], epsilon = 1e-9);

    let income = &grids.income;
    for row in income.trans.rows() {
        assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-12);
    }
    let pushed = income.ergodic.dot(&income.trans);
    for (p, e) in pushed.iter().zip(income.ergodic.iter()) {
        assert_abs_diff_eq!(p, e, epsilon = 1e-12);
    }

    assert_abs_diff_eq!(dbeg.sum(), 1.0, epsilon = 1e-12);
    let positive_assets: f64 = dbeg.slice(ndarray::s![.., .., 1..]).sum();
    assert_eq!(positive_assets, 0.0);
    for (i_z, &e) in income.ergodic.iter().enumerate() {
        assert_abs_diff_eq!(dbeg[[0, i_z, 0]], e, epsilon = 1e-15);
    }
}

#[test]
// Purpose
// -------
// Run the full pipeline with the reference collaborators.
//
// Given
// -----
// - One discount-factor type, `beta_mean = 0.96`, `r = 0.01`, `w = 1`.
//
// Expect
// ------
// - A reconciled steady state with positive capital and depreciation.
// - No recorded anomalies; `ensure_consistent` passes.
// - The stationary distribution conserves mass and matches the ergodic
//   income marginal.
fn reference_pipeline_reconciles_markets() {
    // Arrange
    let params = small_params(1, 0.0);

    // Act
    let out = SteadyStateSolver::reference().find_ss(&params).expect("steady state");

    // Assert
    assert_reconciled(&out);
    assert!(out.ss.k > 0.0);
    assert!(out.ss.delta > 0.0);
    assert!(out.diagnostics.anomalies.is_empty(), "{:?}", out.diagnostics.anomalies);
    assert!(out.ensure_consistent().is_ok());

    let d = &out.distribution.d;
    assert_abs_diff_eq!(d.sum(), 1.0, epsilon = 1e-10);
    assert!(d.iter().all(|&p| p >= 0.0));
    let z_marginal = d.sum_axis(Axis(2)).sum_axis(Axis(0));
    for (m, e) in z_marginal.iter().zip(out.grids.income.ergodic.iter()) {
        assert_abs_diff_eq!(m, e, epsilon = 1e-10);
    }
}

#[test]
// Purpose
// -------
// Verify discount-factor heterogeneity and a non-unit wage target.
//
// Given
// -----
// - Three types with `beta in {0.95, 0.96, 0.97}` and `w = 1.2`.
//
// Expect
// ------
// - The asset grid tops out at `1.2 * a_max`.
// - Patient households hold more assets in aggregate than impatient ones.
// - The outcome is reconciled.
fn heterogeneous_patience_pipeline() {
    // Arrange
    let mut params = small_params(3, 0.01);
    params.targets = Targets::new(0.01, 1.2).expect("valid targets");

    // Act
    let out = SteadyStateSolver::reference().find_ss(&params).expect("steady state");

    // Assert
    assert_abs_diff_eq!(out.grids.a_grid[79], 120.0, epsilon = 1e-9);
    assert_reconciled(&out);

    let wealth_by_type: Vec<f64> = out
        .distribution
        .d
        .axis_iter(Axis(0))
        .zip(out.policies.a.axis_iter(Axis(0)))
        .map(|(d, a)| (&d * &a).sum())
        .collect();
    assert!(wealth_by_type[2] > wealth_by_type[0]);
}

#[test]
// Purpose
// -------
// Ensure the Tauchen discretization plugs into the same pipeline.
//
// Given
// -----
// - `IncomeMethod::Tauchen { width: 3.0 }` with baseline persistence.
//
// Expect
// ------
// - A reconciled steady state.
fn tauchen_income_pipeline() {
    // Arrange
    let mut params = small_params(1, 0.0);
    let base = params.income;
    params.income = IncomeSpec::new(
        base.rho_z,
        base.sigma_psi,
        base.n_z,
        IncomeMethod::Tauchen { width: 3.0 },
    )
    .expect("valid income spec");

    // Act
    let out = SteadyStateSolver::reference().find_ss(&params).expect("steady state");

    // Assert
    assert_reconciled(&out);
}

#[test]
// Purpose
// -------
// Verify the collaborators compose manually the same way `find_ss` does.
//
// Given
// -----
// - Grids and the initial distribution built by hand at `r = 0.01`, `w = 1`.
//
// Expect
// ------
// - The hand-assembled aggregates equal those recorded by `find_ss`.
fn manual_composition_matches_find_ss() {
    // Arrange
    let params = small_params(1, 0.0);
    let prices = Prices::new(0.01, 1.0).expect("prices");
    let grids = HouseholdGrids::build(&params, prices.w).expect("grids");
    let dbeg = initial_distribution(&grids).expect("initial distribution");

    // Act
    let policies = EgmHouseholdSolver::new().solve(&prices, &grids, &params).expect("policies");
    let dist = HistogramSimulator::new()
        .simulate(&policies, &grids, &dbeg, &params)
        .expect("distribution");
    let out = SteadyStateSolver::reference().find_ss(&params).expect("steady state");

    // Assert
    assert_eq!(dist.aggregates.a_hh, out.ss.a_hh);
    assert_eq!(dist.aggregates.c_hh, out.ss.c_hh);
    assert_eq!(dist.aggregates.l_hh, out.ss.l_hh);
}

#[test]
// Purpose
// -------
// Ensure the stability precondition fails fast with the reference solver.
//
// Given
// -----
// - `r = 0.5`, `beta_mean = 0.9875`.
//
// Expect
// ------
// - `SSError::StabilityViolated`.
fn unstable_targets_fail_fast() {
    // Arrange
    let mut params = HANCParams::default();
    params.targets = Targets::new(0.5, 1.0).expect("valid targets");

    // Act
    let err = SteadyStateSolver::reference().find_ss(&params).unwrap_err();

    // Assert
    assert!(matches!(err, SSError::StabilityViolated { .. }), "{err}");
}

#[test]
// Purpose
// -------
// Ensure household non-convergence aborts the whole solve.
//
// Given
// -----
// - `max_iter_solve = 3` with `tol_solve = 1e-12`.
//
// Expect
// ------
// - `SSError::Household(NonConvergence { stage: Solve, .. })`.
fn household_non_convergence_propagates() {
    // Arrange
    let mut params = small_params(1, 0.0);
    params.solver = SolverOptions::new(1e-12, 3, 1e-12, 10).expect("valid options");

    // Act
    let err = SteadyStateSolver::reference().find_ss(&params).unwrap_err();

    // Assert
    assert!(matches!(
        err,
        SSError::Household(HouseholdError::NonConvergence { stage: SolveStage::Solve, .. })
    ));
}

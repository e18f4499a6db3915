//! rust_hanc — stationary equilibrium of heterogeneous-agent (HANC) economies.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the steady-state solver to Python via the `_rust_hanc` extension module.
//! The crate computes the stationary equilibrium of a heterogeneous-agent
//! neoclassical economy by back-solving: the interest rate and wage are
//! targets, households are solved once at those prices, and TFP and
//! depreciation are inferred so that firms' first-order conditions hold.
//!
//! Key behaviors
//! -------------
//! - [`model`]: validated configuration, the discount-factor and asset grids,
//!   the discretized income process, and the initial distribution.
//! - [`household`]: household policies and the stationary distribution behind
//!   the `HouseholdOracle` / `DistributionSolver` traits, with reference EGM
//!   and histogram implementations.
//! - [`equilibrium`]: `find_ss`, the `SteadyState` record, consistency
//!   diagnostics, and the printable report.
//! - [`observability`]: `slog` logger constructors.
//! - With `python-bindings`, a `SteadyState` class and a `find_steady_state`
//!   function under `_rust_hanc`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All heavy numerical work lives in the inner modules; this file performs
//!   only FFI glue and error mapping.
//! - Errors from core Rust code are propagated as rich error types internally
//!   and converted to `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! ```no_run
//! use rust_hanc::{equilibrium::SteadyStateSolver, model::HANCParams};
//!
//! let params = HANCParams::default();
//! let outcome = SteadyStateSolver::reference().find_ss(&params)?;
//! println!("{}", outcome.ss.report());
//! # Ok::<(), rust_hanc::equilibrium::SSError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; the end-to-end pipeline is covered
//!   by `tests/integration_steady_state_pipeline.rs`.

pub mod equilibrium;
pub mod household;
pub mod model;
pub mod observability;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{PyArray1, PyArray2, PyArray3, ToPyArray};

#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

#[cfg(feature = "python-bindings")]
use crate::{
    equilibrium::{SteadyStateOutcome, SteadyStateSolver},
    utils::build_hanc_params,
};

/// SteadyState — Python-facing view of a solved stationary equilibrium.
///
/// Purpose
/// -------
/// Expose the aggregate record, the grids, the policies and the stationary
/// distribution of a [`SteadyStateOutcome`] to Python callers.
///
/// Key behaviors
/// -------------
/// - Scalar getters use the model notation (`K`, `Gamma`, `clearing_Y`, ...).
/// - Array getters copy into fresh `numpy` arrays on each access.
/// - `report()` returns the same text the solver logs when `do_print` is set.
///
/// Notes
/// -----
/// - Rust callers should use [`SteadyStateOutcome`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "SteadyState", module = "rust_hanc")]
pub struct PySteadyState {
    inner: SteadyStateOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PySteadyState {
    // ---- Aggregates ----

    #[getter(L)]
    pub fn l(&self) -> f64 {
        self.inner.ss.l
    }

    #[getter]
    pub fn r(&self) -> f64 {
        self.inner.ss.r
    }

    #[getter]
    pub fn w(&self) -> f64 {
        self.inner.ss.w
    }

    #[getter(K)]
    pub fn k(&self) -> f64 {
        self.inner.ss.k
    }

    #[getter(K_lag)]
    pub fn k_lag(&self) -> f64 {
        self.inner.ss.k_lag
    }

    #[getter(A)]
    pub fn a(&self) -> f64 {
        self.inner.ss.a
    }

    #[getter(A_hh)]
    pub fn a_hh(&self) -> f64 {
        self.inner.ss.a_hh
    }

    #[getter(C_hh)]
    pub fn c_hh(&self) -> f64 {
        self.inner.ss.c_hh
    }

    #[getter(C)]
    pub fn c(&self) -> f64 {
        self.inner.ss.c
    }

    #[getter(L_hh)]
    pub fn l_hh(&self) -> f64 {
        self.inner.ss.l_hh
    }

    #[getter(Gamma)]
    pub fn gamma(&self) -> f64 {
        self.inner.ss.gamma
    }

    #[getter]
    pub fn rk(&self) -> f64 {
        self.inner.ss.rk
    }

    #[getter]
    pub fn delta(&self) -> f64 {
        self.inner.ss.delta
    }

    #[getter(Y)]
    pub fn y(&self) -> f64 {
        self.inner.ss.y
    }

    #[getter(I)]
    pub fn i(&self) -> f64 {
        self.inner.ss.i
    }

    #[getter(clearing_A)]
    pub fn clearing_a(&self) -> f64 {
        self.inner.ss.clearing_a
    }

    #[getter(clearing_L)]
    pub fn clearing_l(&self) -> f64 {
        self.inner.ss.clearing_l
    }

    #[getter(clearing_Y)]
    pub fn clearing_y(&self) -> f64 {
        self.inner.ss.clearing_y
    }

    #[getter(K_over_Y)]
    pub fn k_over_y(&self) -> f64 {
        self.inner.diagnostics.k_over_y
    }

    // ---- Diagnostics ----

    #[getter]
    pub fn anomalies(&self) -> Vec<String> {
        self.inner.diagnostics.anomalies.iter().map(|a| a.to_string()).collect()
    }

    #[getter]
    pub fn household_iterations(&self) -> usize {
        self.inner.policies.summary.iterations
    }

    #[getter]
    pub fn distribution_iterations(&self) -> usize {
        self.inner.distribution.summary.iterations
    }

    pub fn report(&self) -> String {
        self.inner.ss.report().to_string()
    }

    // ---- Grids ----

    #[getter]
    pub fn beta_grid<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.grids.beta_grid.to_pyarray(py)
    }

    #[getter]
    pub fn a_grid<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.grids.a_grid.to_pyarray(py)
    }

    #[getter]
    pub fn z_grid<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.grids.income.z_grid.to_pyarray(py)
    }

    #[getter]
    pub fn z_trans<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.grids.income.trans.to_pyarray(py)
    }

    #[getter]
    pub fn z_ergodic<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.grids.income.ergodic.to_pyarray(py)
    }

    // ---- Policies and distribution ----

    #[getter(a)]
    pub fn savings<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<f64>> {
        self.inner.policies.a.to_pyarray(py)
    }

    #[getter(c)]
    pub fn consumption<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<f64>> {
        self.inner.policies.c.to_pyarray(py)
    }

    #[getter(D)]
    pub fn distribution<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<f64>> {
        self.inner.distribution.d.to_pyarray(py)
    }

    #[getter(Dbeg)]
    pub fn distribution_beg<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<f64>> {
        self.inner.distribution.dbeg.to_pyarray(py)
    }

    pub fn __repr__(&self) -> String {
        format!(
            "SteadyState(K={:.6}, Y={:.6}, Gamma={:.6}, delta={:.6}, clearing_Y={:e})",
            self.inner.ss.k,
            self.inner.ss.y,
            self.inner.ss.gamma,
            self.inner.ss.delta,
            self.inner.ss.clearing_y
        )
    }
}

/// find_steady_state — solve the back-solved steady state from Python.
///
/// Every keyword falls back to the baseline calibration. The GIL is released
/// while the household and distribution solvers run. With `do_print=True`
/// (and the `obs_slog` feature) the report is written to the terminal.
///
/// Errors
/// ------
/// - `ValueError` for invalid configuration, a violated stability
///   precondition, or solver non-convergence.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (
    *, sigma = None, beta_mean = None, beta_delta = None, n_beta = None, rho_z = None,
    sigma_psi = None, n_z = None, income_method = None, tauchen_width = None, alpha = None,
    r_ss_target = None, w_ss_target = None, a_max = None, n_a = None, tol_solve = None,
    max_iter_solve = None, tol_simulate = None, max_iter_simulate = None,
    tol_clearing_y = None, do_print = None
))]
#[allow(clippy::too_many_arguments)]
pub fn find_steady_state(
    py: Python<'_>, sigma: Option<f64>, beta_mean: Option<f64>, beta_delta: Option<f64>,
    n_beta: Option<usize>, rho_z: Option<f64>, sigma_psi: Option<f64>, n_z: Option<usize>,
    income_method: Option<&str>, tauchen_width: Option<f64>, alpha: Option<f64>,
    r_ss_target: Option<f64>, w_ss_target: Option<f64>, a_max: Option<f64>, n_a: Option<usize>,
    tol_solve: Option<f64>, max_iter_solve: Option<usize>, tol_simulate: Option<f64>,
    max_iter_simulate: Option<usize>, tol_clearing_y: Option<f64>, do_print: Option<bool>,
) -> PyResult<PySteadyState> {
    let params = build_hanc_params(
        sigma,
        beta_mean,
        beta_delta,
        n_beta,
        rho_z,
        sigma_psi,
        n_z,
        income_method,
        tauchen_width,
        alpha,
        r_ss_target,
        w_ss_target,
        a_max,
        n_a,
        tol_solve,
        max_iter_solve,
        tol_simulate,
        max_iter_simulate,
        tol_clearing_y,
        do_print,
    )?;

    let outcome = py.allow_threads(|| {
        let solver = SteadyStateSolver::reference();
        #[cfg(feature = "obs_slog")]
        let solver = solver.with_logger(crate::observability::terminal_logger());
        solver.find_ss(&params)
    })?;
    Ok(PySteadyState { inner: outcome })
}

/// _rust_hanc — PyO3 module initializer for the Python extension.
///
/// Registers the `SteadyState` class and the `find_steady_state` function.
/// Invoked automatically by Python when importing the compiled extension.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_hanc<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<PySteadyState>()?;
    m.add_function(wrap_pyfunction!(find_steady_state, m)?)?;
    Ok(())
}

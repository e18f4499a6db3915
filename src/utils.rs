//! utils — Python-boundary helpers for building model configuration.
//!
//! Every optional keyword argument of `find_steady_state` falls back to the
//! baseline calibration in the corresponding `Default` impl; validation is
//! delegated to the Rust constructors so that errors surface as `ValueError`.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*};

#[cfg(feature = "python-bindings")]
use crate::model::core::{
    options::{DiagnosticOptions, SolverOptions},
    params::{AssetGridSpec, HANCParams, IncomeMethod, IncomeSpec, Preferences, Targets, Technology},
};

/// Number of unconditional standard deviations covered by a Tauchen grid
/// when no width is given.
#[cfg(feature = "python-bindings")]
const DEFAULT_TAUCHEN_WIDTH: f64 = 3.0;

#[cfg(feature = "python-bindings")]
#[allow(clippy::too_many_arguments)]
pub fn build_hanc_params(
    sigma: Option<f64>, beta_mean: Option<f64>, beta_delta: Option<f64>, n_beta: Option<usize>,
    rho_z: Option<f64>, sigma_psi: Option<f64>, n_z: Option<usize>, income_method: Option<&str>,
    tauchen_width: Option<f64>, alpha: Option<f64>, r_ss_target: Option<f64>,
    w_ss_target: Option<f64>, a_max: Option<f64>, n_a: Option<usize>, tol_solve: Option<f64>,
    max_iter_solve: Option<usize>, tol_simulate: Option<f64>, max_iter_simulate: Option<usize>,
    tol_clearing_y: Option<f64>, do_print: Option<bool>,
) -> PyResult<HANCParams> {
    let base = HANCParams::default();

    let preferences = Preferences::new(
        sigma.unwrap_or(base.preferences.sigma),
        beta_mean.unwrap_or(base.preferences.beta_mean),
        beta_delta.unwrap_or(base.preferences.beta_delta),
        n_beta.unwrap_or(base.preferences.n_beta),
    )?;

    let method = extract_income_method(income_method, tauchen_width)?;
    let income = IncomeSpec::new(
        rho_z.unwrap_or(base.income.rho_z),
        sigma_psi.unwrap_or(base.income.sigma_psi),
        n_z.unwrap_or(base.income.n_z),
        method,
    )?;

    let technology =
        Technology::new(alpha.unwrap_or(base.technology.alpha), base.technology.delta)?;
    let targets = Targets::new(
        r_ss_target.unwrap_or(base.targets.r_ss_target),
        w_ss_target.unwrap_or(base.targets.w_ss_target),
    )?;
    let asset_grid = AssetGridSpec::new(
        a_max.unwrap_or(base.asset_grid.a_max),
        n_a.unwrap_or(base.asset_grid.n_a),
    )?;

    let solver = SolverOptions::new(
        tol_solve.unwrap_or(base.solver.tol_solve),
        max_iter_solve.unwrap_or(base.solver.max_iter_solve),
        tol_simulate.unwrap_or(base.solver.tol_simulate),
        max_iter_simulate.unwrap_or(base.solver.max_iter_simulate),
    )?;
    let diagnostics = DiagnosticOptions::new(
        tol_clearing_y.unwrap_or(base.diagnostics.tol_clearing_y),
        do_print.unwrap_or(base.diagnostics.do_print),
    )?;

    Ok(HANCParams::new(preferences, income, technology, targets, asset_grid, solver, diagnostics))
}

#[cfg(feature = "python-bindings")]
fn extract_income_method(name: Option<&str>, width: Option<f64>) -> PyResult<IncomeMethod> {
    let name = name.unwrap_or("rouwenhorst").to_lowercase();
    match name.as_str() {
        "rouwenhorst" => Ok(IncomeMethod::Rouwenhorst),
        "tauchen" => Ok(IncomeMethod::Tauchen { width: width.unwrap_or(DEFAULT_TAUCHEN_WIDTH) }),
        other => Err(PyValueError::new_err(format!(
            "invalid income_method {:?} (expected 'rouwenhorst' or 'tauchen')",
            other
        ))),
    }
}

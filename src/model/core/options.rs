//! Solver and diagnostic options — tolerances, iteration caps, and reporting.
//!
//! Purpose
//! -------
//! Collect the numeric knobs that bound the iterative household and
//! distribution solves ([`SolverOptions`]) and the knobs that govern how the
//! steady-state outcome is checked and reported ([`DiagnosticOptions`]).
//!
//! Key behaviors
//! -------------
//! - Validate tolerances (finite, strictly positive) and iteration caps
//!   (at least one) at construction time.
//! - Provide defaults matching the baseline calibration: `1e-10` tolerances
//!   and `50_000` iteration caps for both the household and the distribution
//!   stage.
//!
//! Invariants & assumptions
//! ------------------------
//! - A caller-specified iteration cap is the only bounded-time guarantee of
//!   the external solvers; there is no cancellation.
//! - Options are immutable for the duration of a solve.
use crate::model::errors::{ModelError, ModelResult};

/// SolverOptions — convergence controls for the household and distribution
/// iterations.
///
/// Fields
/// ------
/// - `tol_solve`: sup-norm tolerance on the change in the expected marginal
///   value of assets between two backward iterations.
/// - `max_iter_solve`: cap on backward iterations.
/// - `tol_simulate`: sup-norm tolerance on the change in the beginning-of-period
///   distribution between two forward iterations.
/// - `max_iter_simulate`: cap on forward iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    pub tol_solve: f64,
    pub max_iter_solve: usize,
    pub tol_simulate: f64,
    pub max_iter_simulate: usize,
}

impl SolverOptions {
    /// Construct validated solver options.
    ///
    /// Errors
    /// ------
    /// - [`ModelError::InvalidTolerance`] if either tolerance is non-finite or `<= 0`.
    /// - [`ModelError::InvalidMaxIter`] if either cap is zero.
    pub fn new(
        tol_solve: f64, max_iter_solve: usize, tol_simulate: f64, max_iter_simulate: usize,
    ) -> ModelResult<Self> {
        validate_tolerance("tol_solve", tol_solve)?;
        validate_tolerance("tol_simulate", tol_simulate)?;
        validate_max_iter("max_iter_solve", max_iter_solve)?;
        validate_max_iter("max_iter_simulate", max_iter_simulate)?;
        Ok(SolverOptions { tol_solve, max_iter_solve, tol_simulate, max_iter_simulate })
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            tol_solve: 1e-10,
            max_iter_solve: 50_000,
            tol_simulate: 1e-10,
            max_iter_simulate: 50_000,
        }
    }
}

/// DiagnosticOptions — how the steady-state outcome is checked and reported.
///
/// Fields
/// ------
/// - `tol_clearing_y`: absolute threshold on the goods-market residual above
///   which a consistency anomaly is recorded.
/// - `do_print`: when `true`, the diagnostic report is emitted on the solver's
///   logger at `info` level after a successful solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagnosticOptions {
    pub tol_clearing_y: f64,
    pub do_print: bool,
}

impl DiagnosticOptions {
    pub fn new(tol_clearing_y: f64, do_print: bool) -> ModelResult<Self> {
        validate_tolerance("tol_clearing_y", tol_clearing_y)?;
        Ok(DiagnosticOptions { tol_clearing_y, do_print })
    }
}

impl Default for DiagnosticOptions {
    fn default() -> Self {
        DiagnosticOptions { tol_clearing_y: 1e-6, do_print: false }
    }
}

// ---- Helper methods ----

fn validate_tolerance(name: &'static str, value: f64) -> ModelResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ModelError::InvalidTolerance { name, value });
    }
    Ok(())
}

fn validate_max_iter(name: &'static str, value: usize) -> ModelResult<()> {
    if value == 0 {
        return Err(ModelError::InvalidMaxIter { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify that `SolverOptions::new` preserves valid inputs.
    //
    // Given
    // -----
    // - Tolerances `1e-8`, caps `100` and `200`.
    //
    // Expect
    // ------
    // - Fields equal the inputs.
    fn solver_options_new_preserves_inputs() {
        // Arrange / Act
        let opts = SolverOptions::new(1e-8, 100, 1e-9, 200).expect("valid options");

        // Assert
        assert_eq!(opts.tol_solve, 1e-8);
        assert_eq!(opts.max_iter_solve, 100);
        assert_eq!(opts.tol_simulate, 1e-9);
        assert_eq!(opts.max_iter_simulate, 200);
    }

    #[test]
    // Purpose
    // -------
    // Ensure non-positive tolerances and zero caps are rejected.
    //
    // Given
    // -----
    // - `tol_solve = 0.0` in one call, `max_iter_simulate = 0` in another.
    //
    // Expect
    // ------
    // - `InvalidTolerance` and `InvalidMaxIter` respectively.
    fn solver_options_rejects_invalid_values() {
        // Act
        let tol_err = SolverOptions::new(0.0, 10, 1e-8, 10).unwrap_err();
        let iter_err = SolverOptions::new(1e-8, 10, 1e-8, 0).unwrap_err();

        // Assert
        assert_eq!(tol_err, ModelError::InvalidTolerance { name: "tol_solve", value: 0.0 });
        assert_eq!(iter_err, ModelError::InvalidMaxIter { name: "max_iter_simulate", value: 0 });
    }

    #[test]
    // Purpose
    // -------
    // Ensure the goods-market threshold must be finite.
    //
    // Given
    // -----
    // - `tol_clearing_y = NaN`.
    //
    // Expect
    // ------
    // - `InvalidTolerance` for "tol_clearing_y".
    fn diagnostic_options_rejects_nan_threshold() {
        // Act
        let err = DiagnosticOptions::new(f64::NAN, false).unwrap_err();

        // Assert
        match err {
            ModelError::InvalidTolerance { name, .. } => assert_eq!(name, "tol_clearing_y"),
            other => panic!("expected InvalidTolerance, got {other:?}"),
        }
    }
}

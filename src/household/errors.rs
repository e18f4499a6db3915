//! household::errors — failures of the household and distribution solves.
//!
//! Purpose
//! -------
//! Define [`HouseholdError`] and [`HouseholdResult`] for the iterative
//! household backward solve and the forward distribution iteration. The most
//! important variant is [`HouseholdError::NonConvergence`], which reports the
//! stage, the iteration budget, and the last sup-norm distance so callers can
//! see how far from convergence the solve stopped.
//!
//! Conventions
//! -----------
//! - Non-convergence is fatal for the steady-state solve: no partial policies
//!   or distributions are returned alongside it.
//! - Invalid configuration detected while simulating (e.g. a malformed
//!   initial distribution) is wrapped from [`ModelError`].
use crate::model::errors::ModelError;
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for household / distribution routines.
pub type HouseholdResult<T> = Result<T, HouseholdError>;

/// Which iterative stage failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStage {
    /// Backward iteration on the household problem.
    Solve,
    /// Forward iteration on the distribution.
    Simulate,
}

impl std::fmt::Display for SolveStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveStage::Solve => write!(f, "household solve"),
            SolveStage::Simulate => write!(f, "distribution simulation"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HouseholdError {
    // ---- Convergence ----
    /// Iteration cap reached before the tolerance was met.
    NonConvergence { stage: SolveStage, iterations: usize, max_iter: usize, distance: f64 },

    // ---- Inputs ----
    /// Prices outside the admissible region (`r <= -1` or `w <= 0`).
    InvalidPrices { name: &'static str, value: f64 },

    /// An array does not have the `(Nbeta, Nz, Na)` shape of the grids.
    ShapeMismatch {
        what: &'static str,
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },

    // ---- Numerical invariants ----
    /// A policy or distribution entry became NaN/±inf.
    NonFiniteValue { what: &'static str, index: (usize, usize, usize), value: f64 },

    /// Consumption implied by the budget constraint is not strictly positive.
    NonPositiveConsumption { index: (usize, usize, usize), value: f64 },

    // ---- Wrapped ----
    /// Invalid model configuration or state detected while solving.
    Model(ModelError),
}

impl std::error::Error for HouseholdError {}

impl std::fmt::Display for HouseholdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HouseholdError::NonConvergence { stage, iterations, max_iter, distance } => {
                write!(
                    f,
                    "{stage} did not converge: {iterations} of {max_iter} iterations used, last distance {distance:e}"
                )
            }
            HouseholdError::InvalidPrices { name, value } => {
                write!(f, "Invalid price {name} = {value}; need r > -1 and w > 0.")
            }
            HouseholdError::ShapeMismatch { what, expected, actual } => {
                write!(f, "{what} has shape {actual:?}, expected {expected:?}")
            }
            HouseholdError::NonFiniteValue { what, index, value } => {
                write!(f, "{what} is non-finite at {index:?}: {value}")
            }
            HouseholdError::NonPositiveConsumption { index, value } => {
                write!(f, "Consumption must be > 0; got {value} at {index:?}")
            }
            HouseholdError::Model(err) => write!(f, "{err}"),
        }
    }
}

impl From<ModelError> for HouseholdError {
    fn from(err: ModelError) -> HouseholdError {
        HouseholdError::Model(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<HouseholdError> for PyErr {
    fn from(err: HouseholdError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

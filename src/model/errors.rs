//! model::errors — configuration and state-space construction errors.
//!
//! Purpose
//! -------
//! Define [`ModelError`] and the [`ModelResult`] alias used by every routine
//! that validates configuration or builds the discretized state space (asset
//! grid, discount-factor grid, income Markov chain, initial distribution).
//!
//! Key behaviors
//! -------------
//! - Each variant carries the offending value(s) plus a short static reason so
//!   that messages are meaningful without extra context.
//! - `statrs` normal-distribution failures (used by the Tauchen discretization)
//!   are normalized into [`ModelError::InvalidIncomeProcess`].
//! - Under `python-bindings`, errors convert into a Python `ValueError`.
//!
//! Conventions
//! -----------
//! - All variants describe *precondition violations*: they are raised before
//!   any household solving starts and never carry partial results.
//! - Error messages are phrased in terms of model constraints ("Nz must be at
//!   least 2", "|rho_z| < 1") rather than implementation details.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};
use statrs::distribution::NormalError;

/// Result alias for configuration and grid-construction paths.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while validating configuration or building the state space.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    // ---- Grids ----
    /// Grid size or bound is invalid (e.g. `Na < 2`, `a_max <= 0`).
    InvalidGridParam { name: &'static str, value: f64, reason: &'static str },

    /// Grid values violate an ordering/range invariant.
    InvalidGrid { name: &'static str, index: usize, reason: &'static str },

    // ---- Income process ----
    /// Income-process parameters are invalid (`Nz < 2`, `|rho_z| >= 1`, ...).
    InvalidIncomeProcess { name: &'static str, value: f64, reason: &'static str },

    /// The transition matrix has no unique stationary distribution.
    ErgodicNotFound { reason: &'static str },

    /// A transition row does not sum to one.
    NonStochasticRow { row: usize, sum: f64 },

    // ---- Preferences / technology / targets ----
    /// Preference parameter out of range.
    InvalidPreference { name: &'static str, value: f64, reason: &'static str },

    /// Technology parameter out of range.
    InvalidTechnology { name: &'static str, value: f64, reason: &'static str },

    /// Calibration target out of range.
    InvalidTarget { name: &'static str, value: f64, reason: &'static str },

    // ---- Solver options ----
    /// Tolerance must be finite and strictly positive.
    InvalidTolerance { name: &'static str, value: f64 },

    /// Iteration cap must be at least one.
    InvalidMaxIter { name: &'static str, value: usize },

    // ---- Distributions ----
    /// A distribution is negative somewhere or does not carry unit mass.
    InvalidDistribution { mass: f64, reason: &'static str },
}

impl std::error::Error for ModelError {}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Grids ----
            ModelError::InvalidGridParam { name, value, reason } => {
                write!(f, "Invalid grid parameter {name} = {value}. {reason}")
            }
            ModelError::InvalidGrid { name, index, reason } => {
                write!(f, "Grid {name} is invalid at index {index}. {reason}")
            }
            // ---- Income process ----
            ModelError::InvalidIncomeProcess { name, value, reason } => {
                write!(f, "Invalid income-process parameter {name} = {value}. {reason}")
            }
            ModelError::ErgodicNotFound { reason } => {
                write!(f, "Could not compute the ergodic distribution: {reason}")
            }
            ModelError::NonStochasticRow { row, sum } => {
                write!(f, "Transition row {row} sums to {sum}, expected 1.")
            }
            // ---- Preferences / technology / targets ----
            ModelError::InvalidPreference { name, value, reason } => {
                write!(f, "Invalid preference parameter {name} = {value}. {reason}")
            }
            ModelError::InvalidTechnology { name, value, reason } => {
                write!(f, "Invalid technology parameter {name} = {value}. {reason}")
            }
            ModelError::InvalidTarget { name, value, reason } => {
                write!(f, "Invalid calibration target {name} = {value}. {reason}")
            }
            // ---- Solver options ----
            ModelError::InvalidTolerance { name, value } => {
                write!(f, "Tolerance {name} must be finite and > 0; got: {value}")
            }
            ModelError::InvalidMaxIter { name, value } => {
                write!(f, "Iteration cap {name} must be >= 1; got: {value}")
            }
            // ---- Distributions ----
            ModelError::InvalidDistribution { mass, reason } => {
                write!(f, "Invalid distribution (total mass {mass}): {reason}")
            }
        }
    }
}

impl From<NormalError> for ModelError {
    fn from(_: NormalError) -> ModelError {
        ModelError::InvalidIncomeProcess {
            name: "normal",
            value: f64::NAN,
            reason: "Standard normal distribution could not be constructed.",
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<ModelError> for PyErr {
    fn from(err: ModelError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

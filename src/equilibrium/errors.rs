//! equilibrium::errors — failures of the steady-state equilibrium solve.
//!
//! Purpose
//! -------
//! Define [`SSError`] / [`SSResult`] for `find_ss` and its aggregate block.
//! The taxonomy follows the three ways a steady-state solve can go wrong:
//!
//! - **Precondition violation** (fatal, before any household solving):
//!   [`SSError::StabilityViolated`] when `(1 + r) * beta_mean >= 1`, and
//!   malformed configuration wrapped from [`ModelError`].
//! - **Non-convergence** of the household or distribution stage, wrapped from
//!   [`HouseholdError`] and propagated unchanged.
//! - **Consistency anomalies** are *not* errors; they are recorded in the
//!   outcome's diagnostics. [`SSError::Inconsistent`] only appears when the
//!   caller explicitly asks for strictness via `ensure_consistent`.
use crate::{
    equilibrium::diagnostics::ConsistencyAnomaly, household::errors::HouseholdError,
    model::errors::ModelError,
};
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for steady-state routines.
pub type SSResult<T> = Result<T, SSError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SSError {
    // ---- Preconditions ----
    /// `(1 + r) * beta_mean >= 1`: household assets would grow without bound.
    StabilityViolated { r: f64, beta_mean: f64, product: f64 },

    /// Aggregate capital must be strictly positive for the Cobb–Douglas block.
    NonPositiveCapital { value: f64 },

    /// A derived aggregate is NaN/±inf.
    NonFiniteAggregate { name: &'static str, value: f64 },

    // ---- Strict consistency ----
    /// Anomalies promoted to an error by `ensure_consistent`.
    Inconsistent { anomalies: Vec<ConsistencyAnomaly> },

    // ---- Wrapped ----
    Model(ModelError),
    Household(HouseholdError),
}

impl std::error::Error for SSError {}

impl std::fmt::Display for SSError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SSError::StabilityViolated { r, beta_mean, product } => {
                write!(
                    f,
                    "(1 + r) * beta_mean must be < 1; got (1 + {r}) * {beta_mean} = {product}"
                )
            }
            SSError::NonPositiveCapital { value } => {
                write!(f, "Household asset holdings imply non-positive capital K = {value}")
            }
            SSError::NonFiniteAggregate { name, value } => {
                write!(f, "Aggregate {name} is non-finite: {value}")
            }
            SSError::Inconsistent { anomalies } => {
                write!(f, "Steady state is inconsistent:")?;
                for anomaly in anomalies {
                    write!(f, " {anomaly};")?;
                }
                Ok(())
            }
            SSError::Model(err) => write!(f, "{err}"),
            SSError::Household(err) => write!(f, "{err}"),
        }
    }
}

impl From<ModelError> for SSError {
    fn from(err: ModelError) -> SSError {
        SSError::Model(err)
    }
}

impl From<HouseholdError> for SSError {
    fn from(err: HouseholdError) -> SSError {
        SSError::Household(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<SSError> for PyErr {
    fn from(err: SSError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

//! equilibrium — back-solved stationary equilibrium and its diagnostics.
//!
//! Purpose
//! -------
//! Tie the static model (`crate::model`) and the household layer
//! (`crate::household`) together into a single steady-state computation,
//! [`SteadyStateSolver::find_ss`], and expose the resulting aggregate record,
//! consistency diagnostics, and printable report.
//!
//! Conventions
//! -----------
//! - Precondition and convergence failures are [`SSError`]s; consistency
//!   anomalies are recorded in [`SteadyStateDiagnostics`] and only become
//!   errors through [`SteadyStateOutcome::ensure_consistent`].
//! - Logging goes through an injected `slog::Logger` (discarding by default).

pub mod diagnostics;
pub mod errors;
pub mod steady_state;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::diagnostics::{ConsistencyAnomaly, SteadyStateDiagnostics, SteadyStateReport};
pub use self::errors::{SSError, SSResult};
pub use self::steady_state::{
    check_stability, solve_aggregate_block, SteadyState, SteadyStateOutcome, SteadyStateSolver,
};

pub mod prelude {
    pub use super::{
        ConsistencyAnomaly, SSError, SSResult, SteadyState, SteadyStateDiagnostics,
        SteadyStateOutcome, SteadyStateReport, SteadyStateSolver,
    };
}

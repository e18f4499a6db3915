//! model — configuration, grids, income process, and initial distribution.
//!
//! Purpose
//! -------
//! Provide the static side of a heterogeneous-agent steady-state solve: the
//! explicit configuration object and the discretized state space built from
//! it. Everything here is deterministic and immutable once built; the only
//! state mutated by iterative solving (policies and distributions) lives in
//! [`crate::household`].
//!
//! Downstream usage
//! ----------------
//! 1. Build a [`HANCParams`] (or start from `HANCParams::default()`).
//! 2. Call [`HouseholdGrids::build`] with the steady-state wage.
//! 3. Seed the forward iteration with [`initial_distribution`].

pub mod core;
pub mod errors;

pub use self::core::{
    beta_grid, equilogspace, initial_distribution, AssetGridSpec, DiagnosticOptions, HANCParams,
    HouseholdGrids, IncomeMethod, IncomeProcess, IncomeSpec, Preferences, SolverOptions, Targets,
    Technology,
};
pub use self::errors::{ModelError, ModelResult};

pub mod prelude {
    pub use super::{
        initial_distribution, AssetGridSpec, DiagnosticOptions, HANCParams, HouseholdGrids,
        IncomeMethod, IncomeProcess, IncomeSpec, ModelError, ModelResult, Preferences,
        SolverOptions, Targets, Technology,
    };
}

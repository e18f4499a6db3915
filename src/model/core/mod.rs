//! core — configuration and discretized state space of the HANC economy.
//!
//! Purpose
//! -------
//! Collect the building blocks that exist before any household problem is
//! solved: the validated configuration ([`HANCParams`] and its groups), the
//! discount-factor and asset grids, the income Markov chain with its ergodic
//! distribution, and the initial cross-sectional distribution.
//!
//! Key behaviors
//! -------------
//! - [`params`] / [`options`]: validated parameter groups with baseline
//!   defaults.
//! - [`grids`]: `beta_grid`, pivoted log-spaced `a_grid` scaled by the wage,
//!   and the [`HouseholdGrids`] arena.
//! - [`markov`]: Rouwenhorst / Tauchen discretizations and the ergodic solve.
//! - [`distribution`]: the zero-asset, ergodic-income initial `Dbeg`.
//! - [`validation`]: shared scalar and array checks.
//!
//! Conventions
//! -----------
//! - State arrays are indexed `(i_beta, i_z, i_a)` with shape `(Nbeta, Nz, Na)`.
//! - This module performs no I/O and no logging; failures surface as
//!   [`ModelResult`](crate::model::errors::ModelResult).

pub mod distribution;
pub mod grids;
pub mod markov;
pub mod options;
pub mod params;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::distribution::{initial_distribution, initial_distribution_from};
pub use self::grids::{beta_grid, equilogspace, HouseholdGrids};
pub use self::markov::{find_ergodic, rouwenhorst, tauchen, IncomeProcess};
pub use self::options::{DiagnosticOptions, SolverOptions};
pub use self::params::{
    AssetGridSpec, HANCParams, IncomeMethod, IncomeSpec, Preferences, Targets, Technology,
};

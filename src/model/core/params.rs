//! Model parameters — the explicit configuration object for a HANC economy.
//!
//! Purpose
//! -------
//! Hold every structural constant and numerical setting needed to build the
//! state space and solve for the steady state, grouped by concern:
//! preferences, the income process, technology, calibration targets, the
//! asset grid, and solver/diagnostic options. [`HANCParams`] bundles the
//! groups and is passed by reference into the grid builders and the
//! steady-state solver; there is no global model registry.
//!
//! Key behaviors
//! -------------
//! - Each group validates its own fields in `new(..)` and returns a
//!   [`ModelError`] on violation.
//! - `Default` implementations carry the baseline calibration
//!   (`sigma = 2`, `beta_mean = 0.9875`, `rho_z = 0.95`, `Nz = 7`,
//!   `alpha = 0.36`, `r = 0.01`, `w = 1`, `a_max = 500`, `Na = 300`).
//! - `Technology::delta` is the one parameter that the steady-state solve
//!   back-solves; [`HANCParams::with_delta`] returns an updated copy rather
//!   than mutating in place.
//!
//! Invariants & assumptions
//! ------------------------
//! - After construction every group satisfies its documented invariants; the
//!   grid builders and the solver do not re-check them.
//! - The no-arbitrage condition `(1 + r) * beta_mean < 1` is *not* checked
//!   here: it is a precondition of the steady-state solve and is reported by
//!   the equilibrium layer.
use crate::model::{
    core::{
        options::{DiagnosticOptions, SolverOptions},
        validation::{validate_count, validate_persistence, validate_positive},
    },
    errors::{ModelError, ModelResult},
};

/// Household preferences and the discount-factor type distribution.
///
/// Fields
/// ------
/// - `sigma`: CRRA coefficient (> 0).
/// - `beta_mean`: mean discount factor (> 0).
/// - `beta_delta`: half-width of the discount-factor range (>= 0); the grid
///   spans `[beta_mean - beta_delta, beta_mean + beta_delta]`.
/// - `n_beta`: number of discount-factor types (>= 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preferences {
    pub sigma: f64,
    pub beta_mean: f64,
    pub beta_delta: f64,
    pub n_beta: usize,
}

impl Preferences {
    /// Construct validated preferences.
    ///
    /// Errors
    /// ------
    /// - [`ModelError::InvalidPreference`] when `sigma <= 0`, `beta_mean <= 0`,
    ///   `beta_delta < 0`, `beta_mean - beta_delta <= 0`, or any value is
    ///   non-finite.
    /// - [`ModelError::InvalidGridParam`] when `n_beta == 0`.
    pub fn new(sigma: f64, beta_mean: f64, beta_delta: f64, n_beta: usize) -> ModelResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(ModelError::InvalidPreference {
                name: "sigma",
                value: sigma,
                reason: "CRRA coefficient must be finite and > 0.",
            });
        }
        if !beta_mean.is_finite() || beta_mean <= 0.0 {
            return Err(ModelError::InvalidPreference {
                name: "beta_mean",
                value: beta_mean,
                reason: "Mean discount factor must be finite and > 0.",
            });
        }
        if !beta_delta.is_finite() || beta_delta < 0.0 {
            return Err(ModelError::InvalidPreference {
                name: "beta_delta",
                value: beta_delta,
                reason: "Discount-factor width must be finite and >= 0.",
            });
        }
        if beta_mean - beta_delta <= 0.0 {
            return Err(ModelError::InvalidPreference {
                name: "beta_delta",
                value: beta_delta,
                reason: "Lowest discount factor beta_mean - beta_delta must be > 0.",
            });
        }
        validate_count("Nbeta", n_beta, 1)?;
        Ok(Preferences { sigma, beta_mean, beta_delta, n_beta })
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences { sigma: 2.0, beta_mean: 0.9875, beta_delta: 0.0, n_beta: 1 }
    }
}

/// Discretization scheme for the persistent log-income AR(1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IncomeMethod {
    /// Rouwenhorst: exact conditional mean/variance matching, preferred for
    /// highly persistent processes.
    Rouwenhorst,
    /// Tauchen: equally spaced points covering `width` unconditional standard
    /// deviations on each side, with normal-CDF transition probabilities.
    Tauchen { width: f64 },
}

/// Persistent income process `log z' = rho_z * log z + psi`, `psi ~ N(0, sigma_psi²)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncomeSpec {
    pub rho_z: f64,
    pub sigma_psi: f64,
    pub n_z: usize,
    pub method: IncomeMethod,
}

impl IncomeSpec {
    /// Construct a validated income specification.
    ///
    /// Errors
    /// ------
    /// - [`ModelError::InvalidIncomeProcess`] if `n_z < 2`, `|rho_z| >= 1`,
    ///   `sigma_psi` is non-finite or `<= 0`, or a Tauchen width is not
    ///   finite and positive.
    pub fn new(rho_z: f64, sigma_psi: f64, n_z: usize, method: IncomeMethod) -> ModelResult<Self> {
        if n_z < 2 {
            return Err(ModelError::InvalidIncomeProcess {
                name: "Nz",
                value: n_z as f64,
                reason: "Nz must be at least 2.",
            });
        }
        validate_persistence(rho_z)?;
        if !sigma_psi.is_finite() || sigma_psi <= 0.0 {
            return Err(ModelError::InvalidIncomeProcess {
                name: "sigma_psi",
                value: sigma_psi,
                reason: "Innovation std must be finite and > 0.",
            });
        }
        if let IncomeMethod::Tauchen { width } = method {
            if !width.is_finite() || width <= 0.0 {
                return Err(ModelError::InvalidIncomeProcess {
                    name: "width",
                    value: width,
                    reason: "Tauchen width must be finite and > 0.",
                });
            }
        }
        Ok(IncomeSpec { rho_z, sigma_psi, n_z, method })
    }
}

impl Default for IncomeSpec {
    fn default() -> Self {
        let rho_z: f64 = 0.95;
        IncomeSpec {
            rho_z,
            sigma_psi: 0.30 * (1.0 - rho_z.powi(2)).sqrt(),
            n_z: 7,
            method: IncomeMethod::Rouwenhorst,
        }
    }
}

/// Cobb–Douglas technology `Y = Gamma * K^alpha * L^(1-alpha)`.
///
/// `delta` is the depreciation rate in use before a steady-state solve; the
/// solve replaces it with the back-solved value `rk - r`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Technology {
    pub alpha: f64,
    pub delta: f64,
}

impl Technology {
    pub fn new(alpha: f64, delta: f64) -> ModelResult<Self> {
        if !alpha.is_finite() || alpha <= 0.0 || alpha >= 1.0 {
            return Err(ModelError::InvalidTechnology {
                name: "alpha",
                value: alpha,
                reason: "Capital share must lie in (0, 1).",
            });
        }
        if !delta.is_finite() {
            return Err(ModelError::InvalidTechnology {
                name: "delta",
                value: delta,
                reason: "Depreciation must be finite.",
            });
        }
        Ok(Technology { alpha, delta })
    }
}

impl Default for Technology {
    fn default() -> Self {
        Technology { alpha: 0.36, delta: 0.032 }
    }
}

/// Steady-state price targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Targets {
    pub r_ss_target: f64,
    pub w_ss_target: f64,
}

impl Targets {
    /// Errors
    /// ------
    /// - [`ModelError::InvalidTarget`] if `r_ss_target <= -1` or non-finite, or
    ///   `w_ss_target` is non-finite or `<= 0`.
    pub fn new(r_ss_target: f64, w_ss_target: f64) -> ModelResult<Self> {
        if !r_ss_target.is_finite() || r_ss_target <= -1.0 {
            return Err(ModelError::InvalidTarget {
                name: "r_ss_target",
                value: r_ss_target,
                reason: "Real rate must be finite and > -1.",
            });
        }
        if !w_ss_target.is_finite() || w_ss_target <= 0.0 {
            return Err(ModelError::InvalidTarget {
                name: "w_ss_target",
                value: w_ss_target,
                reason: "Real wage must be finite and > 0.",
            });
        }
        Ok(Targets { r_ss_target, w_ss_target })
    }
}

impl Default for Targets {
    fn default() -> Self {
        Targets { r_ss_target: 0.01, w_ss_target: 1.0 }
    }
}

/// Asset grid size and upper bound (before wage scaling).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetGridSpec {
    pub a_max: f64,
    pub n_a: usize,
}

impl AssetGridSpec {
    /// Errors
    /// ------
    /// - [`ModelError::InvalidGridParam`] if `a_max` is not finite and positive
    ///   or `n_a < 2`.
    pub fn new(a_max: f64, n_a: usize) -> ModelResult<Self> {
        validate_positive("a_max", a_max)?;
        validate_count("Na", n_a, 2)?;
        Ok(AssetGridSpec { a_max, n_a })
    }
}

impl Default for AssetGridSpec {
    fn default() -> Self {
        AssetGridSpec { a_max: 500.0, n_a: 300 }
    }
}

/// HANCParams — complete configuration for one steady-state solve.
///
/// Purpose
/// -------
/// Bundle the validated parameter groups into a single, cheaply clonable
/// value. Public APIs accept `&HANCParams` rather than loose scalars.
///
/// Invariants
/// ----------
/// - Every group was built through its validating constructor or `Default`.
/// - The value is immutable during a solve; the back-solved depreciation is
///   returned in a fresh copy via [`HANCParams::with_delta`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HANCParams {
    pub preferences: Preferences,
    pub income: IncomeSpec,
    pub technology: Technology,
    pub targets: Targets,
    pub asset_grid: AssetGridSpec,
    pub solver: SolverOptions,
    pub diagnostics: DiagnosticOptions,
}

impl HANCParams {
    pub fn new(
        preferences: Preferences, income: IncomeSpec, technology: Technology, targets: Targets,
        asset_grid: AssetGridSpec, solver: SolverOptions, diagnostics: DiagnosticOptions,
    ) -> HANCParams {
        HANCParams { preferences, income, technology, targets, asset_grid, solver, diagnostics }
    }

    /// Return a copy with `technology.delta` replaced.
    pub fn with_delta(&self, delta: f64) -> HANCParams {
        let mut out = self.clone();
        out.technology.delta = delta;
        out
    }

    /// Shape `(Nbeta, Nz, Na)` of policy and distribution arrays.
    pub fn state_shape(&self) -> (usize, usize, usize) {
        (self.preferences.n_beta, self.income.n_z, self.asset_grid.n_a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Baseline defaults.
    // - Rejection paths of the group constructors named as preconditions
    //   (`Nz < 2`, `|rho_z| >= 1`, non-positive `Na` / `a_max`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the baseline calibration carried by `HANCParams::default()`.
    //
    // Given
    // -----
    // - Default parameters.
    //
    // Expect
    // ------
    // - Documented baseline values and shape `(1, 7, 300)`.
    fn default_params_match_baseline() {
        // Act
        let par = HANCParams::default();

        // Assert
        assert_eq!(par.preferences.sigma, 2.0);
        assert_eq!(par.preferences.beta_mean, 0.9875);
        assert_eq!(par.technology.alpha, 0.36);
        assert_eq!(par.targets.r_ss_target, 0.01);
        assert_eq!(par.state_shape(), (1, 7, 300));
        assert!((par.income.sigma_psi - 0.30 * (1.0 - 0.95f64 * 0.95).sqrt()).abs() < 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // Ensure malformed income parameters fail fast.
    //
    // Given
    // -----
    // - `Nz = 1`, then `rho_z = 1.0`, then `sigma_psi = 0`.
    //
    // Expect
    // ------
    // - `InvalidIncomeProcess` each time, naming the offending field.
    fn income_spec_rejects_malformed_inputs() {
        // Act
        let nz = IncomeSpec::new(0.9, 0.1, 1, IncomeMethod::Rouwenhorst).unwrap_err();
        let rho = IncomeSpec::new(1.0, 0.1, 5, IncomeMethod::Rouwenhorst).unwrap_err();
        let sig = IncomeSpec::new(0.9, 0.0, 5, IncomeMethod::Rouwenhorst).unwrap_err();

        // Assert
        for (err, expected) in [(nz, "Nz"), (rho, "rho_z"), (sig, "sigma_psi")] {
            match err {
                ModelError::InvalidIncomeProcess { name, .. } => assert_eq!(name, expected),
                other => panic!("expected InvalidIncomeProcess, got {other:?}"),
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure non-positive asset-grid parameters are rejected.
    //
    // Given
    // -----
    // - `a_max = 0`, then `Na = 0`.
    //
    // Expect
    // ------
    // - `InvalidGridParam` naming "a_max" and "Na".
    fn asset_grid_rejects_non_positive() {
        // Act
        let amax = AssetGridSpec::new(0.0, 10).unwrap_err();
        let na = AssetGridSpec::new(10.0, 0).unwrap_err();

        // Assert
        assert!(matches!(amax, ModelError::InvalidGridParam { name: "a_max", .. }));
        assert!(matches!(na, ModelError::InvalidGridParam { name: "Na", .. }));
    }

    #[test]
    // Purpose
    // -------
    // Verify `with_delta` returns an updated copy and leaves the input intact.
    //
    // Given
    // -----
    // - Default parameters and `delta = 0.05`.
    //
    // Expect
    // ------
    // - Copy carries 0.05; input keeps 0.032.
    fn with_delta_returns_updated_copy() {
        // Arrange
        let par = HANCParams::default();

        // Act
        let updated = par.with_delta(0.05);

        // Assert
        assert_eq!(updated.technology.delta, 0.05);
        assert_eq!(par.technology.delta, 0.032);
    }

    #[test]
    // Purpose
    // -------
    // Ensure preferences reject non-positive lowest discount factors.
    //
    // Given
    // -----
    // - `beta_mean = 0.5`, `beta_delta = 0.6`.
    //
    // Expect
    // ------
    // - `InvalidPreference` naming "beta_delta".
    fn preferences_reject_negative_lowest_beta() {
        let err = Preferences::new(2.0, 0.5, 0.6, 3).unwrap_err();
        assert!(matches!(err, ModelError::InvalidPreference { name: "beta_delta", .. }));
    }
}

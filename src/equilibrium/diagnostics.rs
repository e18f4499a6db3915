//! diagnostics — consistency checks and the steady-state report.
//!
//! Purpose
//! -------
//! Turn a solved [`SteadyState`] into observations a caller can act on:
//! - [`SteadyStateDiagnostics`]: non-fatal consistency anomalies (a goods
//!   market residual above `tol_clearing_y`, a non-positive back-solved
//!   depreciation rate) plus the capital–output ratio.
//! - [`SteadyStateReport`]: the human-readable printout of implied `K`, `Y`,
//!   `Gamma`, `delta`, `K/Y` and the three clearing residuals.
//!
//! Conventions
//! -----------
//! - Nothing here affects control flow of the solve; anomalies are data.
//! - `clearing_A` and `clearing_L` are zero by construction and are reported,
//!   not checked.
use crate::{equilibrium::steady_state::SteadyState, model::core::options::DiagnosticOptions};

/// A non-fatal inconsistency in a solved steady state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsistencyAnomaly {
    /// `|Y - C_hh - I|` exceeds the configured threshold; points at loose
    /// household / distribution tolerances or a solver bug.
    GoodsMarketResidual { residual: f64, tol: f64 },
    /// Back-solved depreciation `rk - r` is not strictly positive; the
    /// parameterization is economically implausible.
    NonPositiveDelta { delta: f64 },
}

impl std::fmt::Display for ConsistencyAnomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsistencyAnomaly::GoodsMarketResidual { residual, tol } => {
                write!(f, "goods-market residual {residual:e} exceeds tolerance {tol:e}")
            }
            ConsistencyAnomaly::NonPositiveDelta { delta } => {
                write!(f, "back-solved depreciation {delta} is not positive")
            }
        }
    }
}

/// Diagnostics attached to every successful steady-state outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyStateDiagnostics {
    pub anomalies: Vec<ConsistencyAnomaly>,
    pub k_over_y: f64,
}

impl SteadyStateDiagnostics {
    /// Inspect `ss` against the thresholds in `opts`.
    pub fn assess(ss: &SteadyState, opts: &DiagnosticOptions) -> Self {
        let mut anomalies = Vec::new();
        if !(ss.clearing_y.abs() <= opts.tol_clearing_y) {
            anomalies.push(ConsistencyAnomaly::GoodsMarketResidual {
                residual: ss.clearing_y,
                tol: opts.tol_clearing_y,
            });
        }
        if !(ss.delta > 0.0) {
            anomalies.push(ConsistencyAnomaly::NonPositiveDelta { delta: ss.delta });
        }
        SteadyStateDiagnostics { anomalies, k_over_y: ss.k / ss.y }
    }

    pub fn is_consistent(&self) -> bool {
        self.anomalies.is_empty()
    }
}

/// Printable summary of a solved steady state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteadyStateReport {
    pub k: f64,
    pub y: f64,
    pub gamma: f64,
    pub delta: f64,
    pub k_over_y: f64,
    pub clearing_a: f64,
    pub clearing_l: f64,
    pub clearing_y: f64,
}

impl From<&SteadyState> for SteadyStateReport {
    fn from(ss: &SteadyState) -> Self {
        SteadyStateReport {
            k: ss.k,
            y: ss.y,
            gamma: ss.gamma,
            delta: ss.delta,
            k_over_y: ss.k / ss.y,
            clearing_a: ss.clearing_a,
            clearing_l: ss.clearing_l,
            clearing_y: ss.clearing_y,
        }
    }
}

impl std::fmt::Display for SteadyStateReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Implied K = {:6.3}", self.k)?;
        writeln!(f, "Implied Y = {:6.3}", self.y)?;
        writeln!(f, "Implied Gamma = {:6.3}", self.gamma)?;
        writeln!(f, "Implied delta = {:6.3}", self.delta)?;
        writeln!(f, "Implied K/Y = {:6.3}", self.k_over_y)?;
        writeln!(f, "Discrepancy in A = {:12.8}", self.clearing_a)?;
        writeln!(f, "Discrepancy in L = {:12.8}", self.clearing_l)?;
        write!(f, "Discrepancy in Y = {:12.8}", self.clearing_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state(delta: f64, clearing_y: f64) -> SteadyState {
        SteadyState {
            l: 1.0,
            r: 0.01,
            w: 1.0,
            k: 10.0,
            k_lag: 10.0,
            a: 10.0,
            a_hh: 10.0,
            c_hh: 1.1,
            c: 1.1,
            l_hh: 1.0,
            gamma: 0.7,
            rk: 0.05625,
            delta,
            y: 1.5625,
            i: delta * 10.0,
            clearing_a: 0.0,
            clearing_l: 0.0,
            clearing_y,
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that a clean steady state records no anomalies.
    //
    // Given
    // -----
    // - `delta = 0.04625`, `clearing_Y = 1e-12`, threshold `1e-6`.
    //
    // Expect
    // ------
    // - No anomalies; `K/Y = 6.4`.
    fn clean_state_has_no_anomalies() {
        // Act
        let diag = SteadyStateDiagnostics::assess(
            &sample_state(0.04625, 1e-12),
            &DiagnosticOptions::default(),
        );

        // Assert
        assert!(diag.is_consistent());
        assert!((diag.k_over_y - 6.4).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify both anomaly kinds are recorded, including a NaN residual.
    //
    // Given
    // -----
    // - `delta = -0.01` and `clearing_Y = 1e-3`; then `clearing_Y = NaN`.
    //
    // Expect
    // ------
    // - Both anomalies in the first case, a goods-market anomaly for NaN.
    fn anomalies_are_recorded() {
        // Arrange
        let opts = DiagnosticOptions::default();

        // Act
        let diag = SteadyStateDiagnostics::assess(&sample_state(-0.01, 1e-3), &opts);
        let nan = SteadyStateDiagnostics::assess(&sample_state(0.04, f64::NAN), &opts);

        // Assert
        assert_eq!(diag.anomalies.len(), 2);
        assert!(diag.anomalies.contains(&ConsistencyAnomaly::GoodsMarketResidual {
            residual: 1e-3,
            tol: 1e-6
        }));
        assert!(diag.anomalies.contains(&ConsistencyAnomaly::NonPositiveDelta { delta: -0.01 }));
        assert_eq!(nan.anomalies.len(), 1);
    }

    #[test]
    // Purpose
    // -------
    // Verify the report prints every documented line.
    //
    // Given
    // -----
    // - A sample steady state with `K = 10`.
    //
    // Expect
    // ------
    // - Eight lines, starting with "Implied K = 10.000".
    fn report_prints_all_lines() {
        // Act
        let text = SteadyStateReport::from(&sample_state(0.04625, 0.0)).to_string();

        // Assert
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "Implied K = 10.000");
        assert!(lines[3].starts_with("Implied delta ="));
        assert!(lines[7].starts_with("Discrepancy in Y ="));
    }
}

//! observability — `slog` logger construction for the solvers.
//!
//! Every solver in this crate carries a `slog::Logger` and defaults to a
//! discarding root. With the `obs_slog` feature, [`terminal_logger`] builds a
//! non-blocking terminal drain suitable for `with_logger(..)` on
//! `SteadyStateSolver`, `EgmHouseholdSolver` and `HistogramSimulator`.
use slog::{o, Discard, Logger};

#[cfg(feature = "obs_slog")]
use slog::Drain;

/// Root logger that drops every record.
pub fn discard_logger() -> Logger {
    Logger::root(Discard, o!())
}

/// Root logger writing to the terminal through an asynchronous drain.
///
/// Records are formatted by `slog-term` and handed to a background thread by
/// `slog-async`, so the numerical loops never block on terminal I/O.
#[cfg(feature = "obs_slog")]
pub fn terminal_logger() -> Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    Logger::root(drain, o!("crate" => env!("CARGO_PKG_NAME")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use slog::info;

    #[test]
    // Purpose
    // -------
    // Ensure the discarding logger accepts records without side effects.
    //
    // Given
    // -----
    // - A discard logger.
    //
    // Expect
    // ------
    // - Logging returns normally.
    fn discard_logger_accepts_records() {
        let log = discard_logger();
        info!(log, "steady state solved"; "K" => 10.0);
    }
}

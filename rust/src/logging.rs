//! Verbosity-gated logging for schedule analysis runs.
//!
//! Output goes to stderr and compiles down to a single integer comparison
//! when the run is silent. Levels:
//! - 0: SILENT
//! - 1: SUMMARY (project duration, critical path of each run)
//! - 2: STAGES (ordering outcome, per-stage progress)
//! - 3: DEBUG (per-activity values from both passes)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_SUMMARY: u8 = 1;
pub const VERBOSITY_STAGES: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at SUMMARY level (verbosity >= 1).
#[macro_export]
macro_rules! log_summary {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_SUMMARY {
            eprintln!($($arg)*);
        }
    };
}

/// Log at STAGES level (verbosity >= 2).
#[macro_export]
macro_rules! log_stages {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_STAGES {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}

//! Logging and verbosity control

use tracing::Level;

/// Variable GitHub sets when a run is re-run with debug logging
pub const RUNNER_DEBUG_VAR: &str = "RUNNER_DEBUG";

/// Verbosity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    /// Quiet mode - warnings and errors only
    Quiet = 0,
    /// Normal mode - standard output
    Normal = 1,
    /// Verbose mode - debug output
    Verbose = 2,
}

impl VerbosityLevel {
    /// Resolve from CLI flags and the runner debug switch. `--quiet` wins.
    pub fn from_flags(verbose: bool, quiet: bool, runner_debug: bool) -> Self {
        if quiet {
            VerbosityLevel::Quiet
        } else if verbose || runner_debug {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }

    /// Maximum tracing level for this verbosity
    pub fn max_level(self) -> Level {
        match self {
            VerbosityLevel::Quiet => Level::WARN,
            VerbosityLevel::Normal => Level::INFO,
            VerbosityLevel::Verbose => Level::DEBUG,
        }
    }
}

fn runner_debug() -> bool {
    std::env::var(RUNNER_DEBUG_VAR).map(|v| v == "1").unwrap_or(false)
}

/// Initialize logging based on CLI flags.
///
/// Logs go to stderr so they never interleave with workflow commands on stdout.
pub fn init_logging(verbose: bool, quiet: bool) -> VerbosityLevel {
    let level = VerbosityLevel::from_flags(verbose, quiet, runner_debug());

    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::fmt()
        .with_max_level(level.max_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    level
}

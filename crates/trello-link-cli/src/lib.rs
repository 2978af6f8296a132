//! trello-link CLI library
//!
//! Wires configuration, the GitHub layer and the link engine together and
//! reports the run through workflow annotations.

pub mod app;
pub mod cli;
pub mod error;
pub mod logging;
pub mod output;

pub use app::{execute, run, EXIT_FAILURE, EXIT_SUCCESS};
pub use cli::Cli;
pub use error::{CliError, CliResult};
pub use logging::{init_logging, VerbosityLevel};
pub use output::Annotations;

//! trello-link configuration
//!
//! Reads the action inputs (`INPUT_*` variables, optionally a TOML file),
//! applies defaults per input, validates them and compiles the patterns the
//! core needs. Configuration is built once and passed down explicitly.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::{ConfigLoader, INPUT_ENV_PREFIX};
pub use types::{ActionConfig, ActionInputs, CompiledConfig, DEFAULT_TIMEOUT_SECS};

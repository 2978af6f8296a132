//! Configuration loader implementation

use std::{collections::HashMap, path::PathBuf};

use config::{Config, Environment, File, FileFormat};
use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    types::{ActionConfig, ActionInputs},
};

/// Prefix GitHub Actions puts in front of every input variable
pub const INPUT_ENV_PREFIX: &str = "INPUT";

/// Loads action inputs from an optional TOML file and the environment.
/// Environment values take precedence over the file.
pub struct ConfigLoader {
    /// Optional configuration file path
    config_path: Option<PathBuf>,
    /// Environment prefix
    env_prefix: String,
    /// Explicit variables used instead of the process environment
    env_override: Option<HashMap<String, String>>,
}

impl ConfigLoader {
    /// Create a loader reading `INPUT_*` variables from the process environment
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: INPUT_ENV_PREFIX.to_string(),
            env_override: None,
        }
    }

    /// Also read a TOML file; it must exist
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Read variables from `vars` instead of the process environment
    pub fn with_env(mut self, vars: HashMap<String, String>) -> Self {
        self.env_override = Some(vars);
        self
    }

    /// Load the raw inputs without defaulting or validation
    pub fn load_inputs(&self) -> Result<ActionInputs> {
        let mut builder = Config::builder();

        if let Some(path) = &self.config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            debug!(path = %path.display(), "Reading config file");
            builder = builder.add_source(File::from(path.clone()).format(FileFormat::Toml));
        }

        let mut environment = Environment::with_prefix(&self.env_prefix);
        if let Some(vars) = &self.env_override {
            environment = environment.source(Some(vars.clone()));
        }
        builder = builder.add_source(environment);

        let config = builder.build()?;
        let inputs: ActionInputs = config.try_deserialize()?;
        debug!(inputs = ?inputs, "Loaded action inputs");
        Ok(inputs)
    }

    /// Load, default and validate the configuration
    pub fn load(&self) -> Result<ActionConfig> {
        let inputs = self.load_inputs()?;
        ActionConfig::from_inputs(&inputs)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

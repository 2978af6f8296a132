//! CLI error types

use thiserror::Error;
use trello_link_config::ConfigError;
use trello_link_github::GitHubError;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Message for the failure annotation
    pub fn user_message(&self) -> String {
        match self {
            CliError::Config(ConfigError::Validation(msg)) => msg.clone(),
            CliError::Config(e) => format!("Configuration error: {}", e),
            CliError::GitHub(e @ GitHubError::NoPullRequest { .. }) => e.to_string(),
            CliError::GitHub(e) if e.is_auth_error() => {
                format!("{}\n\nCheck the token input.", e)
            }
            CliError::GitHub(e) if e.is_rate_limit() => {
                format!("{}\n\nThe token has exhausted its API quota, re-run the job later.", e)
            }
            CliError::GitHub(e) if e.is_not_found() => {
                format!("{}\n\nCheck that the token can read this repository.", e)
            }
            CliError::GitHub(e) => e.to_string(),
            CliError::Io(e) => format!("File operation failed: {}", e),
        }
    }

    /// Get technical details for verbose mode
    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

pub type CliResult<T> = Result<T, CliError>;

//! GitHub Integration Error Types

use thiserror::Error;

/// Errors that can occur during GitHub operations
#[derive(Debug, Error)]
pub enum GitHubError {
    /// API error from GitHub
    #[error("GitHub API error: {0}")]
    ApiError(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// No open pull request matches the triggering event
    #[error("No open pull request found for {event}, {sha}")]
    NoPullRequest { event: String, sha: String },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Event payload could not be decoded
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Octocrab error
    #[error("GitHub client error: {0}")]
    OctocrabError(String),

    /// Timeout error
    #[error("Operation timed out")]
    Timeout,
}

impl GitHubError {
    /// Create a new API error
    pub fn api_error(msg: impl Into<String>) -> Self {
        GitHubError::ApiError(msg.into())
    }

    /// Create a new auth error
    pub fn auth_error(msg: impl Into<String>) -> Self {
        GitHubError::AuthError(msg.into())
    }

    /// Create a new config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        GitHubError::ConfigError(msg.into())
    }

    /// Create a new not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        GitHubError::NotFound(msg.into())
    }

    /// Map an octocrab failure, keeping the operation for context
    pub fn from_octocrab(operation: &str, err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => {
                let message = source.message.clone();
                let lowered = message.to_lowercase();
                if lowered.contains("rate limit") {
                    GitHubError::RateLimitExceeded
                } else if lowered.contains("bad credentials") {
                    GitHubError::auth_error(format!("{}: {}", operation, message))
                } else if lowered.contains("not found") {
                    GitHubError::not_found(format!("{}: {}", operation, message))
                } else {
                    GitHubError::api_error(format!("{}: {}", operation, message))
                }
            }
            other => GitHubError::OctocrabError(format!("{}: {}", operation, other)),
        }
    }

    /// Check if this is a rate limit error
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, GitHubError::RateLimitExceeded)
    }

    /// Check if this is an auth error
    pub fn is_auth_error(&self) -> bool {
        matches!(self, GitHubError::AuthError(_))
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GitHubError::NotFound(_) | GitHubError::NoPullRequest { .. }
        )
    }
}

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, GitHubError>;

//! GitHub Data Models
//!
//! Only the fields the link injector reads are modelled; everything else in
//! the REST payloads is ignored.

use serde::{Deserialize, Serialize};

/// Pull Request state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    /// Open PR
    Open,
    /// Closed or merged PR
    Closed,
    /// Anything else the API reports
    #[serde(other)]
    Other,
}

/// Head branch of a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrHead {
    /// Branch name without the `refs/heads/` prefix
    #[serde(rename = "ref")]
    pub ref_name: String,
    #[serde(default)]
    pub sha: String,
}

/// Pull Request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// PR title
    #[serde(default)]
    pub title: String,
    /// PR body; GitHub sends `null` for an empty description
    #[serde(default)]
    pub body: Option<String>,
    /// PR state
    pub state: PrState,
    /// Head branch
    pub head: PrHead,
}

impl PullRequest {
    /// Body text, empty when the description is unset
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    /// Whether the PR is open and its head branch is the given git ref
    pub fn is_open_for_ref(&self, git_ref: &str) -> bool {
        self.state == PrState::Open && git_ref == format!("refs/heads/{}", self.head.ref_name)
    }
}

/// Commit details nested in a pull request commit entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetails {
    /// Full commit message
    pub message: String,
}

/// Commit entry from the pull request commits listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrCommit {
    #[serde(default)]
    pub sha: String,
    pub commit: CommitDetails,
}

impl PrCommit {
    /// Create a commit entry with a message
    pub fn new(sha: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            commit: CommitDetails {
                message: message.into(),
            },
        }
    }

    pub fn message(&self) -> &str {
        &self.commit.message
    }
}

/// Request body for updating a pull request description
#[derive(Debug, Clone, Serialize)]
pub struct PrBodyUpdate<'a> {
    pub body: &'a str,
}

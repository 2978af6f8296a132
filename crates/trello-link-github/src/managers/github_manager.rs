//! GitHub Manager - REST access to pull requests

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    context::{ActionContext, DEFAULT_API_URL},
    errors::{GitHubError, Result},
    models::{PrBodyUpdate, PrCommit, PullRequest},
};

/// GitHub caps the pull request commit listing at this many entries
pub const MAX_PR_COMMITS: usize = 250;

const COMMITS_PER_PAGE: u8 = 100;

/// GitHub configuration
#[derive(Clone)]
pub struct GitHubConfig {
    /// GitHub API token
    pub token: String,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// REST endpoint
    pub api_url: String,
    /// API timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl GitHubConfig {
    /// Create a new GitHub configuration
    pub fn new(token: impl Into<String>, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Build from a token and the workflow context
    pub fn for_context(token: impl Into<String>, context: &ActionContext) -> Self {
        Self {
            api_url: context.api_url.clone(),
            ..Self::new(token, context.owner.clone(), context.repo.clone())
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(GitHubError::config_error("GitHub token is required"));
        }
        if self.owner.is_empty() {
            return Err(GitHubError::config_error("Repository owner is required"));
        }
        if self.repo.is_empty() {
            return Err(GitHubError::config_error("Repository name is required"));
        }
        if self.timeout_secs == 0 {
            return Err(GitHubError::config_error("Timeout must be greater than 0"));
        }
        Ok(())
    }
}

/// Pull request operations the link injector needs
#[async_trait]
pub trait PullRequestApi: Send + Sync {
    /// Fetch one pull request
    async fn get_pull_request(&self, number: u64) -> Result<PullRequest>;

    /// List the commits of a pull request, oldest first
    async fn list_commits(&self, number: u64) -> Result<Vec<PrCommit>>;

    /// Pull requests associated with a commit
    async fn pulls_for_commit(&self, sha: &str) -> Result<Vec<PullRequest>>;

    /// Replace the description of a pull request
    async fn update_body(&self, number: u64, body: &str) -> Result<()>;
}

#[derive(Serialize)]
struct PageParams {
    per_page: u8,
    page: u32,
}

/// Octocrab-backed implementation of [`PullRequestApi`]
pub struct GitHubClient {
    config: GitHubConfig,
    client: octocrab::Octocrab,
}

impl GitHubClient {
    /// Create a client; no request is made until an operation runs
    pub fn new(config: GitHubConfig) -> Result<Self> {
        config.validate()?;

        let client = octocrab::OctocrabBuilder::new()
            .base_uri(config.api_url.as_str())
            .map_err(|e| GitHubError::config_error(format!("Invalid API URL '{}': {}", config.api_url, e)))?
            .personal_token(config.token.clone())
            .build()
            .map_err(|e| GitHubError::auth_error(format!("Failed to create GitHub client: {}", e)))?;

        info!(
            owner = %config.owner,
            repo = %config.repo,
            "Created GitHub client"
        );

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &GitHubConfig {
        &self.config
    }

    fn repo_route(&self, suffix: &str) -> String {
        format!("/repos/{}/{}/{}", self.config.owner, self.config.repo, suffix)
    }

    async fn with_timeout<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::time::timeout(Duration::from_secs(self.config.timeout_secs), fut)
            .await
            .map_err(|_| GitHubError::Timeout)?
    }
}

#[async_trait]
impl PullRequestApi for GitHubClient {
    async fn get_pull_request(&self, number: u64) -> Result<PullRequest> {
        let route = self.repo_route(&format!("pulls/{}", number));
        debug!(route = %route, "Fetching pull request");
        self.with_timeout(async {
            self.client
                .get::<PullRequest, _, ()>(&route, None)
                .await
                .map_err(|e| GitHubError::from_octocrab("Failed to get pull request", e))
        })
        .await
    }

    async fn list_commits(&self, number: u64) -> Result<Vec<PrCommit>> {
        let route = self.repo_route(&format!("pulls/{}/commits", number));
        let mut commits = Vec::new();
        let mut page = 1;

        loop {
            let params = PageParams {
                per_page: COMMITS_PER_PAGE,
                page,
            };
            debug!(route = %route, page, "Fetching pull request commits");
            let batch: Vec<PrCommit> = self
                .with_timeout(async {
                    self.client
                        .get::<Vec<PrCommit>, _, _>(&route, Some(&params))
                        .await
                        .map_err(|e| GitHubError::from_octocrab("Failed to list commits", e))
                })
                .await?;

            let fetched = batch.len();
            commits.extend(batch);
            if fetched < COMMITS_PER_PAGE as usize || commits.len() >= MAX_PR_COMMITS {
                break;
            }
            page += 1;
        }

        Ok(commits)
    }

    async fn pulls_for_commit(&self, sha: &str) -> Result<Vec<PullRequest>> {
        let route = self.repo_route(&format!("commits/{}/pulls", sha));
        debug!(route = %route, "Listing pull requests for commit");
        self.with_timeout(async {
            self.client
                .get::<Vec<PullRequest>, _, ()>(&route, None)
                .await
                .map_err(|e| GitHubError::from_octocrab("Failed to list pull requests for commit", e))
        })
        .await
    }

    async fn update_body(&self, number: u64, body: &str) -> Result<()> {
        let route = self.repo_route(&format!("pulls/{}", number));
        debug!(route = %route, "Updating pull request body");
        self.with_timeout(async {
            self.client
                .patch::<serde_json::Value, _, _>(&route, Some(&PrBodyUpdate { body }))
                .await
                .map(|_| ())
                .map_err(|e| GitHubError::from_octocrab("Failed to update pull request", e))
        })
        .await
    }
}

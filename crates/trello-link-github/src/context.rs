//! Workflow run context - repository, commit and event payload of the triggering event

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::errors::{GitHubError, Result};

/// Default REST endpoint when `GITHUB_API_URL` is not set
pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Default, Deserialize)]
struct EventPullRequest {
    number: u64,
}

/// Subset of the webhook payload stored at `GITHUB_EVENT_PATH`
#[derive(Debug, Default, Deserialize)]
struct EventPayload {
    #[serde(default)]
    pull_request: Option<EventPullRequest>,
    #[serde(default, rename = "ref")]
    git_ref: Option<String>,
}

/// Context of the workflow run that triggered the action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionContext {
    pub owner: String,
    pub repo: String,
    /// Event name, e.g. `pull_request` or `push`
    pub event_name: String,
    /// Commit SHA of the run
    pub sha: String,
    /// Git ref from the payload, e.g. `refs/heads/main`
    pub git_ref: Option<String>,
    /// PR number when the payload carries a pull request
    pub pr_number: Option<u64>,
    pub api_url: String,
}

impl ActionContext {
    /// Create a context for a repository
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        event_name: impl Into<String>,
        sha: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            event_name: event_name.into(),
            sha: sha.into(),
            git_ref: None,
            pr_number: None,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Set the pull request number
    pub fn with_pr_number(mut self, number: u64) -> Self {
        self.pr_number = Some(number);
        self
    }

    /// Set the git ref
    pub fn with_ref(mut self, git_ref: impl Into<String>) -> Self {
        self.git_ref = Some(git_ref.into());
        self
    }

    /// Read the context from the `GITHUB_*` variables of the process
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Read the context through a variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let repository = lookup("GITHUB_REPOSITORY")
            .ok_or_else(|| GitHubError::config_error("GITHUB_REPOSITORY is not set"))?;
        let (owner, repo) = parse_repository(&repository)?;

        let mut context = Self::new(
            owner,
            repo,
            lookup("GITHUB_EVENT_NAME").unwrap_or_default(),
            lookup("GITHUB_SHA").unwrap_or_default(),
        );

        if let Some(api_url) = lookup("GITHUB_API_URL").filter(|u| !u.is_empty()) {
            context.api_url = api_url;
        }

        let payload = match lookup("GITHUB_EVENT_PATH").filter(|p| !p.is_empty()) {
            Some(path) if Path::new(&path).exists() => {
                let raw = std::fs::read_to_string(&path)?;
                parse_payload(&raw)?
            }
            _ => EventPayload::default(),
        };

        context.pr_number = payload.pull_request.map(|pr| pr.number);
        context.git_ref = payload.git_ref.or_else(|| lookup("GITHUB_REF"));

        debug!(
            owner = %context.owner,
            repo = %context.repo,
            event = %context.event_name,
            pr_number = ?context.pr_number,
            "Loaded workflow context"
        );

        Ok(context)
    }

    /// Apply an event payload to this context
    pub fn with_payload(mut self, raw: &str) -> Result<Self> {
        let payload = parse_payload(raw)?;
        self.pr_number = payload.pull_request.map(|pr| pr.number);
        if payload.git_ref.is_some() {
            self.git_ref = payload.git_ref;
        }
        Ok(self)
    }
}

fn parse_payload(raw: &str) -> Result<EventPayload> {
    if raw.trim().is_empty() {
        return Ok(EventPayload::default());
    }
    Ok(serde_json::from_str(raw)?)
}

/// Split `owner/repo`
pub fn parse_repository(repository: &str) -> Result<(String, String)> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(GitHubError::config_error(format!(
            "Invalid repository '{}', expected owner/repo",
            repository
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_repository() {
        assert_eq!(
            parse_repository("owner-name/repo-name").unwrap(),
            ("owner-name".to_string(), "repo-name".to_string())
        );
        assert!(parse_repository("no-slash").is_err());
        assert!(parse_repository("a/b/c").is_err());
        assert!(parse_repository("/repo").is_err());
    }

    #[test]
    fn test_pull_request_payload() {
        let context = ActionContext::new("o", "r", "pull_request", "sha")
            .with_payload(r#"{"pull_request": {"number": 123}, "ref": "refs/heads/branch-with-pr"}"#)
            .unwrap();
        assert_eq!(context.pr_number, Some(123));
        assert_eq!(context.git_ref.as_deref(), Some("refs/heads/branch-with-pr"));
    }

    #[test]
    fn test_push_payload_has_no_number() {
        let context = ActionContext::new("o", "r", "push", "sha")
            .with_payload(r#"{"ref": "refs/heads/main", "head_commit": {}}"#)
            .unwrap();
        assert_eq!(context.pr_number, None);
    }

    #[test]
    fn test_from_vars_reads_event_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"pull_request": {{"number": 7}}}}"#).unwrap();

        let vars: HashMap<&str, String> = HashMap::from([
            ("GITHUB_REPOSITORY", "owner-name/repo-name".to_string()),
            ("GITHUB_EVENT_NAME", "pull_request".to_string()),
            ("GITHUB_SHA", "sha".to_string()),
            ("GITHUB_REF", "refs/pull/7/merge".to_string()),
            ("GITHUB_EVENT_PATH", file.path().display().to_string()),
        ]);

        let context = ActionContext::from_vars(|key| vars.get(key).cloned()).unwrap();
        assert_eq!(context.owner, "owner-name");
        assert_eq!(context.repo, "repo-name");
        assert_eq!(context.pr_number, Some(7));
        assert_eq!(context.git_ref.as_deref(), Some("refs/pull/7/merge"));
        assert_eq!(context.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_from_vars_requires_repository() {
        let result = ActionContext::from_vars(|_| None);
        assert!(matches!(result, Err(GitHubError::ConfigError(_))));
    }
}

//! Shared fixtures for the trello-link integration tests
//!
//! `RecordingApi` is an in-memory pull request store that counts every call
//! so scenarios can assert which requests a run made.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
    sync::Mutex,
};

use async_trait::async_trait;
use trello_link_github::{
    GitHubError, PrCommit, PrHead, PrState, PullRequest, PullRequestApi, Result,
};

pub const OWNER: &str = "owner-name";
pub const REPO: &str = "repo-name";
pub const PR_NUMBER: u64 = 123;
pub const SHA: &str = "sha";

pub const TEMPLATE_BODY: &str = "## Trello
<!-- DO NOT TOUCH -->
<!--TRELLO_LINK_START--><!--TRELLO_LINK_END-->";

/// In-memory pull request store
#[derive(Default)]
pub struct RecordingApi {
    pulls: HashMap<u64, PullRequest>,
    commits: Vec<PrCommit>,
    associated: Vec<PullRequest>,
    updates: Mutex<Vec<(u64, String)>>,
    pr_gets: AtomicUsize,
    commit_lists: AtomicUsize,
    commit_lookups: AtomicUsize,
}

impl RecordingApi {
    /// Store with PR 123 on `branch-with-pr`, six commits (one duplicate, one
    /// without a code) and the commit association GitHub reports for `sha`
    pub fn fixture() -> Self {
        let mut api = Self::default()
            .with_pull(pull(PR_NUMBER, "[12345] PR Title", TEMPLATE_BODY, "open", "branch-with-pr"))
            .with_commits(&[
                "[abcdefg] blah",
                "[hijklmn] arg",
                "[opqrstu] foo",
                " [vwxyz] fug",
                " [vwxyz] fug",
                "dig dug",
            ]);
        api.associated = vec![
            pull(PR_NUMBER + 1, "", "", "other", "branch-without-pr"),
            pull(PR_NUMBER + 2, "", "", "draft", "draft-branch-with-pr"),
            pull(PR_NUMBER, "", "", "open", "branch-with-pr"),
        ];
        api
    }

    pub fn with_pull(mut self, pr: PullRequest) -> Self {
        self.pulls.insert(pr.number, pr);
        self
    }

    pub fn with_commits(mut self, messages: &[&str]) -> Self {
        self.commits = messages
            .iter()
            .enumerate()
            .map(|(i, m)| PrCommit::new(format!("c{}", i), *m))
            .collect();
        self
    }

    /// Replace the body of the fixture pull request
    pub fn with_body(mut self, body: &str) -> Self {
        if let Some(pr) = self.pulls.get_mut(&PR_NUMBER) {
            pr.body = Some(body.to_string());
        }
        self
    }

    pub fn updates(&self) -> Vec<(u64, String)> {
        self.updates.lock().map(|u| u.clone()).unwrap_or_default()
    }

    /// Body written by the last update
    pub fn last_body(&self) -> Option<String> {
        self.updates().pop().map(|(_, body)| body)
    }

    pub fn pr_gets(&self) -> usize {
        self.pr_gets.load(Ordering::SeqCst)
    }

    pub fn commit_lists(&self) -> usize {
        self.commit_lists.load(Ordering::SeqCst)
    }

    pub fn commit_lookups(&self) -> usize {
        self.commit_lookups.load(Ordering::SeqCst)
    }
}

/// Build a pull request as the REST API would return it
pub fn pull(number: u64, title: &str, body: &str, state: &str, head: &str) -> PullRequest {
    let state = match state {
        "open" => PrState::Open,
        "closed" => PrState::Closed,
        _ => PrState::Other,
    };
    PullRequest {
        number,
        title: title.to_string(),
        body: Some(body.to_string()).filter(|b| !b.is_empty()),
        state,
        head: PrHead {
            ref_name: head.to_string(),
            sha: SHA.to_string(),
        },
    }
}

#[async_trait]
impl PullRequestApi for RecordingApi {
    async fn get_pull_request(&self, number: u64) -> Result<PullRequest> {
        self.pr_gets.fetch_add(1, Ordering::SeqCst);
        self.pulls
            .get(&number)
            .cloned()
            .ok_or_else(|| GitHubError::not_found(format!("pull request {}", number)))
    }

    async fn list_commits(&self, _number: u64) -> Result<Vec<PrCommit>> {
        self.commit_lists.fetch_add(1, Ordering::SeqCst);
        Ok(self.commits.clone())
    }

    async fn pulls_for_commit(&self, _sha: &str) -> Result<Vec<PullRequest>> {
        self.commit_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.associated.clone())
    }

    async fn update_body(&self, number: u64, body: &str) -> Result<()> {
        self.updates
            .lock()
            .map_err(|_| GitHubError::api_error("update log poisoned"))?
            .push((number, body.to_string()));
        Ok(())
    }
}

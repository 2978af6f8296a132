//! GitHub Integration for trello-link
//!
//! This crate connects the link engine to GitHub:
//! - Reading the workflow context of the triggering event
//! - Resolving the pull request of a push or pull request event
//! - Fetching the title and commits of a pull request
//! - Rewriting the pull request description

pub mod context;
pub mod errors;
pub mod managers;
pub mod models;

pub use context::{parse_repository, ActionContext, DEFAULT_API_URL};
pub use errors::{GitHubError, Result};
pub use managers::{
    resolve_pr_number, BodyUpdate, GitHubClient, GitHubConfig, InjectionReport, LinkInjector,
    PullRequestApi, MAX_PR_COMMITS,
};
pub use models::{CommitDetails, PrBodyUpdate, PrCommit, PrHead, PrState, PullRequest};

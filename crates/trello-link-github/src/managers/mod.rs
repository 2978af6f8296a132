//! GitHub Managers
//!
//! REST access and the pull request link injection flow

pub mod github_manager;
pub mod pr_manager;

pub use github_manager::{GitHubClient, GitHubConfig, PullRequestApi, MAX_PR_COMMITS};
pub use pr_manager::{resolve_pr_number, BodyUpdate, InjectionReport, LinkInjector};

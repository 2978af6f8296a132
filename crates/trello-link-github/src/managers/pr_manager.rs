//! PR Manager - resolves the pull request of a run and injects Trello links into its body

use tracing::{debug, info, warn};
use trello_link_core::{
    apply_template, CodeCollector, Extraction, RegionLocator, ReplaceError, TemplateStrategy,
};

use crate::{
    context::ActionContext,
    errors::{GitHubError, Result},
    managers::github_manager::PullRequestApi,
};

/// Find the pull request for the triggering event.
///
/// A `pull_request` payload carries the number directly. For other events the
/// first open pull request associated with the commit whose head branch is the
/// pushed ref is used.
pub async fn resolve_pr_number<A>(api: &A, context: &ActionContext) -> Result<u64>
where
    A: PullRequestApi + ?Sized,
{
    if let Some(number) = context.pr_number {
        debug!(pr_number = number, "Using pull request from event payload");
        return Ok(number);
    }

    let not_found = || GitHubError::NoPullRequest {
        event: context.event_name.clone(),
        sha: context.sha.clone(),
    };

    let git_ref = context.git_ref.as_deref().ok_or_else(not_found)?;

    let candidates = api.pulls_for_commit(&context.sha).await?;
    debug!(
        sha = %context.sha,
        candidates = candidates.len(),
        "Looking up pull request by commit"
    );

    candidates
        .iter()
        .find(|pr| pr.is_open_for_ref(git_ref))
        .map(|pr| pr.number)
        .ok_or_else(not_found)
}

/// What happened to the pull request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyUpdate {
    /// The new body was written
    Persisted,
    /// The new body equals the current one, nothing was written
    Unchanged,
    /// Dry run, nothing was written
    DryRun,
    /// The templated region was not found, nothing was written
    TemplateNotFound(ReplaceError),
}

/// Result of one injection run
#[derive(Debug, Clone)]
pub struct InjectionReport {
    pub pr_number: u64,
    /// Codes and warnings from the title and commits
    pub extraction: Extraction,
    /// Body after replacement, when the region was found
    pub body: Option<String>,
    pub update: BodyUpdate,
}

impl InjectionReport {
    /// A run succeeds when the title carried a code (or was not read) and the region was found
    pub fn is_success(&self) -> bool {
        self.extraction.title_warning().is_none()
            && !matches!(self.update, BodyUpdate::TemplateNotFound(_))
    }
}

/// Injects Trello links into pull request bodies
#[derive(Debug, Clone, Default)]
pub struct LinkInjector {
    collector: CodeCollector,
    strategy: TemplateStrategy,
    dry_run: bool,
}

impl LinkInjector {
    /// Create an injector
    pub fn new(collector: CodeCollector, strategy: TemplateStrategy) -> Self {
        Self {
            collector,
            strategy,
            dry_run: false,
        }
    }

    /// Compute the new body without writing it
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Resolve the pull request, collect codes and rewrite its body
    pub async fn run<A>(&self, api: &A, context: &ActionContext) -> Result<InjectionReport>
    where
        A: PullRequestApi + ?Sized,
    {
        let pr_number = resolve_pr_number(api, context).await?;
        let pr = api.get_pull_request(pr_number).await?;

        let messages: Vec<String> = if self.collector.selection().includes_commits() {
            api.list_commits(pr_number)
                .await?
                .into_iter()
                .map(|c| c.commit.message)
                .collect()
        } else {
            Vec::new()
        };

        let extraction = self.collector.collect(&pr.title, &messages);
        let current = pr.body_text();

        let (body, update) = match apply_template(&self.strategy, current, &extraction.codes) {
            Ok(updated) if updated == current => {
                info!(pr_number, "Pull request body already up to date");
                (Some(updated), BodyUpdate::Unchanged)
            }
            Ok(updated) if self.dry_run => {
                info!(pr_number, "Dry run, not updating pull request body");
                (Some(updated), BodyUpdate::DryRun)
            }
            Ok(updated) => {
                api.update_body(pr_number, &updated).await?;
                info!(pr_number, links = extraction.codes.len(), "Updated pull request body");
                (Some(updated), BodyUpdate::Persisted)
            }
            Err(err) => {
                warn!(
                    pr_number,
                    template = %self.strategy.describe(),
                    "Template region missing, leaving pull request body untouched"
                );
                (None, BodyUpdate::TemplateNotFound(err))
            }
        };

        Ok(InjectionReport {
            pr_number,
            extraction,
            body,
            update,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::models::{PrCommit, PrHead, PrState, PullRequest};

    struct StubApi {
        pr: PullRequest,
        associated: Vec<PullRequest>,
        commits: Vec<PrCommit>,
        updates: Mutex<Vec<String>>,
    }

    impl StubApi {
        fn new(body: Option<&str>) -> Self {
            Self {
                pr: pull_request(123, "[T] title", body, PrState::Open, "feature"),
                associated: Vec::new(),
                commits: vec![PrCommit::new("1", "[A] x"), PrCommit::new("2", "no code")],
                updates: Mutex::new(Vec::new()),
            }
        }
    }

    fn pull_request(number: u64, title: &str, body: Option<&str>, state: PrState, head: &str) -> PullRequest {
        PullRequest {
            number,
            title: title.to_string(),
            body: body.map(str::to_string),
            state,
            head: PrHead {
                ref_name: head.to_string(),
                sha: String::new(),
            },
        }
    }

    #[async_trait]
    impl PullRequestApi for StubApi {
        async fn get_pull_request(&self, _number: u64) -> Result<PullRequest> {
            Ok(self.pr.clone())
        }

        async fn list_commits(&self, _number: u64) -> Result<Vec<PrCommit>> {
            Ok(self.commits.clone())
        }

        async fn pulls_for_commit(&self, _sha: &str) -> Result<Vec<PullRequest>> {
            Ok(self.associated.clone())
        }

        async fn update_body(&self, _number: u64, body: &str) -> Result<()> {
            self.updates.lock().unwrap().push(body.to_string());
            Ok(())
        }
    }

    fn pr_context() -> ActionContext {
        ActionContext::new("o", "r", "pull_request", "sha").with_pr_number(123)
    }

    #[tokio::test]
    async fn test_run_persists_new_body() {
        let api = StubApi::new(Some("<!--TRELLO_LINK_START--><!--TRELLO_LINK_END-->"));
        let report = LinkInjector::default().run(&api, &pr_context()).await.unwrap();

        assert_eq!(report.update, BodyUpdate::Persisted);
        assert_eq!(report.extraction.codes.as_strs(), vec!["T", "A"]);
        assert!(report.is_success());
        assert_eq!(api.updates.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_run_template_missing_does_not_persist() {
        let api = StubApi::new(None);
        let report = LinkInjector::default().run(&api, &pr_context()).await.unwrap();

        assert!(matches!(report.update, BodyUpdate::TemplateNotFound(_)));
        assert!(report.body.is_none());
        assert!(!report.is_success());
        assert!(api.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_dry_run() {
        let api = StubApi::new(Some("<!--TRELLO_LINK_START--><!--TRELLO_LINK_END-->"));
        let report = LinkInjector::default()
            .dry_run(true)
            .run(&api, &pr_context())
            .await
            .unwrap();

        assert_eq!(report.update, BodyUpdate::DryRun);
        assert!(report.body.unwrap().contains("[Trello Link: T]"));
        assert!(api.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_unchanged_body_not_written() {
        let current = "<!--TRELLO_LINK_START-->\n[Trello Link: T](https://trello.com/c/T)\n[Trello Link: A](https://trello.com/c/A)\n<!--TRELLO_LINK_END-->";
        let api = StubApi::new(Some(current));
        let report = LinkInjector::default().run(&api, &pr_context()).await.unwrap();

        assert_eq!(report.update, BodyUpdate::Unchanged);
        assert!(api.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_by_commit() {
        let mut api = StubApi::new(None);
        api.associated = vec![
            pull_request(124, "t", None, PrState::Closed, "branch-without-pr"),
            pull_request(125, "t", None, PrState::Other, "draft-branch-with-pr"),
            pull_request(123, "t", None, PrState::Open, "branch-with-pr"),
        ];
        let context = ActionContext::new("o", "r", "push", "sha").with_ref("refs/heads/branch-with-pr");

        assert_eq!(resolve_pr_number(&api, &context).await.unwrap(), 123);
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let api = StubApi::new(None);
        let context = ActionContext::new("o", "r", "other", "sha").with_ref("refs/heads/branch-without-pr");

        let err = resolve_pr_number(&api, &context).await.unwrap_err();
        assert_eq!(err.to_string(), "No open pull request found for other, sha");
    }
}

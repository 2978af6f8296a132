//! Run orchestration: configuration, pull request update and annotations

use std::io::Write;

use tracing::{debug, info};
use trello_link_config::{ActionConfig, ConfigLoader};
use trello_link_core::ExtractionWarning;
use trello_link_github::{
    ActionContext, BodyUpdate, GitHubClient, GitHubConfig, InjectionReport, LinkInjector,
    PullRequestApi,
};

use crate::{
    cli::Cli,
    error::CliResult,
    output::Annotations,
};

/// Process exit code for a successful run
pub const EXIT_SUCCESS: i32 = 0;
/// Process exit code for a failed run
pub const EXIT_FAILURE: i32 = 1;

/// Run the action against an API and report through annotations.
///
/// Patterns are compiled before the first request so a bad input never
/// touches the pull request. Returns the process exit code.
pub async fn execute<A, W>(
    config: &ActionConfig,
    api: &A,
    context: &ActionContext,
    dry_run: bool,
    annotations: &mut Annotations<W>,
) -> CliResult<i32>
where
    A: PullRequestApi + ?Sized,
    W: Write,
{
    for line in config.summary() {
        annotations.notice(&line)?;
    }

    let compiled = config.compile()?;
    let injector = LinkInjector::new(compiled.collector, compiled.strategy).dry_run(dry_run);
    let report = injector.run(api, context).await?;

    report_outcome(&report, annotations)?;

    Ok(if annotations.failed() {
        EXIT_FAILURE
    } else {
        EXIT_SUCCESS
    })
}

fn report_outcome<W: Write>(
    report: &InjectionReport,
    annotations: &mut Annotations<W>,
) -> CliResult<()> {
    for warning in &report.extraction.warnings {
        match warning {
            ExtractionWarning::TitleCodeMissing { .. } => annotations.error(&warning.to_string())?,
            ExtractionWarning::CommitCodeMissing { .. } => annotations.notice(&warning.to_string())?,
        }
    }

    annotations.notice(&format!(
        "Injecting {} Trello links into PR body",
        report.extraction.codes.len()
    ))?;

    match &report.update {
        BodyUpdate::TemplateNotFound(err) => annotations.error(&err.to_string())?,
        BodyUpdate::Unchanged => {
            annotations.notice(&format!("PR #{} body already up to date", report.pr_number))?
        }
        BodyUpdate::DryRun => {
            if let Some(body) = &report.body {
                annotations.notice(&format!("Dry run, PR #{} body would be:\n{}", report.pr_number, body))?;
            }
        }
        BodyUpdate::Persisted => {
            debug!(pr_number = report.pr_number, "PR body persisted");
        }
    }

    Ok(())
}

/// Load configuration and context from the environment and run against GitHub
pub async fn run<W: Write>(cli: &Cli, annotations: &mut Annotations<W>) -> CliResult<i32> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_path(path);
    }
    let config = loader.load()?;

    let context = ActionContext::from_env()?;
    info!(
        repository = %format!("{}/{}", context.owner, context.repo),
        event = %context.event_name,
        dry_run = cli.dry_run,
        "Starting trello-link"
    );

    let github = GitHubConfig::for_context(config.token.clone(), &context)
        .with_timeout(config.timeout_secs);
    let client = GitHubClient::new(github)?;

    execute(&config, &client, &context, cli.dry_run, annotations).await
}

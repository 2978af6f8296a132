//! End-to-end scenarios: inputs from `INPUT_*` variables, an in-memory
//! GitHub, annotations captured from the run.

use std::collections::HashMap;

use trello_link_cli::{execute, Annotations, CliError, EXIT_FAILURE, EXIT_SUCCESS};
use trello_link_config::ConfigLoader;
use trello_link_github::{ActionContext, GitHubError};
use trello_link_integration_tests::{RecordingApi, OWNER, PR_NUMBER, REPO, SHA};

const FIVE_LINKS: &str = "## Trello
<!-- DO NOT TOUCH -->
<!--TRELLO_LINK_START-->
[Trello Link: 12345](https://trello.com/c/12345)
[Trello Link: abcdefg](https://trello.com/c/abcdefg)
[Trello Link: hijklmn](https://trello.com/c/hijklmn)
[Trello Link: opqrstu](https://trello.com/c/opqrstu)
[Trello Link: vwxyz](https://trello.com/c/vwxyz)
<!--TRELLO_LINK_END-->";

struct Outcome {
    result: Result<i32, CliError>,
    annotations: String,
}

impl Outcome {
    fn code(&self) -> i32 {
        *self.result.as_ref().expect("run should complete")
    }

    fn noticed(&self, message: &str) -> bool {
        self.annotations.lines().any(|l| l == format!("::notice::{}", message))
    }

    fn errors(&self) -> Vec<&str> {
        self.annotations
            .lines()
            .filter_map(|l| l.strip_prefix("::error::"))
            .collect()
    }
}

fn pull_request_event() -> ActionContext {
    ActionContext::new(OWNER, REPO, "pull_request", SHA)
        .with_payload(r#"{"pull_request": {"number": 123}, "ref": "refs/heads/branch-with-pr"}"#)
        .unwrap()
}

async fn run_action(api: &RecordingApi, context: &ActionContext, inputs: &[(&str, &str)]) -> Outcome {
    let mut vars: HashMap<String, String> =
        HashMap::from([("INPUT_TOKEN".to_string(), "token".to_string())]);
    for (key, value) in inputs {
        vars.insert(key.to_string(), value.to_string());
    }
    let config = ConfigLoader::new().with_env(vars).load().unwrap();

    let mut annotations = Annotations::new(Vec::new());
    let result = execute(&config, api, context, false, &mut annotations).await;
    Outcome {
        result,
        annotations: String::from_utf8(annotations.into_inner()).unwrap(),
    }
}

#[tokio::test]
async fn test_replaces_body_on_total_match() {
    let api = RecordingApi::fixture();
    let outcome = run_action(&api, &pull_request_event(), &[]).await;

    assert_eq!(outcome.code(), EXIT_SUCCESS);
    assert_eq!(api.pr_gets(), 1);
    assert!(outcome.noticed("Injecting 5 Trello links into PR body"));
    assert_eq!(api.updates(), vec![(PR_NUMBER, FIVE_LINKS.to_string())]);
    assert_eq!(api.commit_lookups(), 0);
    assert!(outcome.errors().is_empty());
}

#[tokio::test]
async fn test_case_insensitive_flags() {
    let api = RecordingApi::fixture();
    let outcome = run_action(&api, &pull_request_event(), &[("INPUT_REPLACEMENTREGEXFLAGS", "i")]).await;

    assert_eq!(outcome.code(), EXIT_SUCCESS);
    assert!(outcome.noticed("Using replacement regex flags: i"));
    assert!(outcome.noticed("Injecting 5 Trello links into PR body"));
    assert_eq!(api.last_body().as_deref(), Some(FIVE_LINKS));
}

#[tokio::test]
async fn test_title_shortcode_only() {
    let api = RecordingApi::fixture();
    let outcome = run_action(&api, &pull_request_event(), &[("INPUT_SHORTCODESOURCE", "title")]).await;

    assert_eq!(outcome.code(), EXIT_SUCCESS);
    assert!(outcome.noticed("Injecting 1 Trello links into PR body"));
    assert_eq!(api.commit_lists(), 0);
    assert_eq!(
        api.last_body().as_deref(),
        Some(
            "## Trello
<!-- DO NOT TOUCH -->
<!--TRELLO_LINK_START-->
[Trello Link: 12345](https://trello.com/c/12345)
<!--TRELLO_LINK_END-->"
        )
    );
}

#[tokio::test]
async fn test_commit_shortcodes_only() {
    let api = RecordingApi::fixture();
    let outcome = run_action(&api, &pull_request_event(), &[("INPUT_SHORTCODESOURCE", "commits")]).await;

    assert_eq!(outcome.code(), EXIT_SUCCESS);
    assert!(outcome.noticed("Injecting 4 Trello links into PR body"));
    assert!(outcome.noticed(
        "Commit message dig dug does not contain a valid Trello short code. Please check your commits regex."
    ));
    assert_eq!(
        api.last_body().as_deref(),
        Some(
            "## Trello
<!-- DO NOT TOUCH -->
<!--TRELLO_LINK_START-->
[Trello Link: abcdefg](https://trello.com/c/abcdefg)
[Trello Link: hijklmn](https://trello.com/c/hijklmn)
[Trello Link: opqrstu](https://trello.com/c/opqrstu)
[Trello Link: vwxyz](https://trello.com/c/vwxyz)
<!--TRELLO_LINK_END-->"
        )
    );
}

#[tokio::test]
async fn test_looks_up_pull_request_by_sha() {
    let api = RecordingApi::fixture();
    let context = ActionContext::new(OWNER, REPO, "push", SHA)
        .with_payload(r#"{"ref": "refs/heads/branch-with-pr"}"#)
        .unwrap();
    let outcome = run_action(&api, &context, &[]).await;

    assert_eq!(outcome.code(), EXIT_SUCCESS);
    assert_eq!(api.commit_lookups(), 1);
    assert_eq!(api.pr_gets(), 1);
    assert_eq!(api.last_body().as_deref(), Some(FIVE_LINKS));
}

#[tokio::test]
async fn test_replaces_existing_list_of_links() {
    let api = RecordingApi::fixture().with_body(
        "## Trello
<!-- DO NOT TOUCH -->
<!--TRELLO_LINK_START-->
[Trello Link: 12345](https://trello.com/c/12345)
[Trello Link: abcdefg](https://trello.com/c/abcdefg)
<!--TRELLO_LINK_END-->",
    );
    let outcome = run_action(&api, &pull_request_event(), &[]).await;

    assert_eq!(outcome.code(), EXIT_SUCCESS);
    assert!(outcome.noticed("Injecting 5 Trello links into PR body"));
    assert_eq!(api.last_body().as_deref(), Some(FIVE_LINKS));
}

#[tokio::test]
async fn test_second_run_does_not_write() {
    let api = RecordingApi::fixture().with_body(FIVE_LINKS);
    let outcome = run_action(&api, &pull_request_event(), &[]).await;

    assert_eq!(outcome.code(), EXIT_SUCCESS);
    assert!(api.updates().is_empty());
}

#[tokio::test]
async fn test_fails_when_pull_request_cannot_be_found() {
    let api = RecordingApi::fixture();
    let context = ActionContext::new(OWNER, REPO, "other", SHA)
        .with_payload(r#"{"ref": "refs/heads/branch-without-pr"}"#)
        .unwrap();
    let outcome = run_action(&api, &context, &[]).await;

    match &outcome.result {
        Err(err @ CliError::GitHub(GitHubError::NoPullRequest { .. })) => {
            assert_eq!(err.user_message(), "No open pull request found for other, sha");
        }
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(api.commit_lookups(), 1);
    assert_eq!(api.pr_gets(), 0);
    assert!(api.updates().is_empty());
}

#[tokio::test]
async fn test_fails_when_template_string_missing() {
    let api = RecordingApi::fixture().with_body("REGULAR PR\nNO TEMPLATE STRING");
    let outcome = run_action(&api, &pull_request_event(), &[]).await;

    assert_eq!(outcome.code(), EXIT_FAILURE);
    assert_eq!(
        outcome.errors(),
        vec![
            "Template string not found in your PR description '/<!--TRELLO_LINK_START-->[\\s\\S]*<!--TRELLO_LINK_END-->/gm'"
        ]
    );
    assert!(api.updates().is_empty());
}

#[tokio::test]
async fn test_marker_strategy_end_to_end() {
    let api = RecordingApi::fixture();
    let outcome = run_action(&api, &pull_request_event(), &[("INPUT_TEMPLATESTRATEGY", "markers")]).await;

    assert_eq!(outcome.code(), EXIT_SUCCESS);
    assert!(outcome.noticed("Using start marker: <!--TRELLO_LINK_START-->"));
    assert_eq!(api.last_body().as_deref(), Some(FIVE_LINKS));
}

#[tokio::test]
async fn test_title_without_code_still_updates_and_fails() {
    let api = RecordingApi::fixture().with_pull(trello_link_integration_tests::pull(
        PR_NUMBER,
        "PR Title",
        trello_link_integration_tests::TEMPLATE_BODY,
        "open",
        "branch-with-pr",
    ));
    let outcome = run_action(&api, &pull_request_event(), &[]).await;

    assert_eq!(outcome.code(), EXIT_FAILURE);
    assert_eq!(
        outcome.errors(),
        vec!["Title does not contain a valid Trello short code. Please check your title regex."]
    );
    assert!(outcome.noticed("Injecting 4 Trello links into PR body"));
    assert_eq!(api.updates().len(), 1);
}

/*!
 * Failure policy and degraded outcome handling across a run
 */

use std::fs;

use synthdoc::app_controller::{Controller, FailurePolicy, RunOptions};
use synthdoc::catalog::Platform;
use synthdoc::errors::AppError;
use synthdoc::generation::{GenerationClient, is_sentinel};
use synthdoc::providers::mock::MockProvider;

use crate::common;

fn dialpad_options(failure_policy: FailurePolicy, abort_on_degraded: bool) -> RunOptions {
    RunOptions {
        platforms: vec![Platform::Dialpad],
        count: None,
        failure_policy,
        abort_on_degraded,
    }
}

#[tokio::test]
async fn test_run_withFailingProvider_shouldWriteErrorSentinelsAndContinue() {
    let temp_dir = common::create_temp_dir().unwrap();
    let config = common::write_sample_sources(temp_dir.path()).unwrap();
    let controller = Controller::new(config, GenerationClient::new(Some(Box::new(MockProvider::failing()))));

    let summary = controller
        .run(&dialpad_options(FailurePolicy::Continue, false), &mut common::seeded_rng(1))
        .await
        .unwrap();

    assert!(summary.is_success());
    assert_eq!(summary.results.len(), 5);
    assert_eq!(summary.degraded_count(), 5);
    for result in &summary.results {
        let content = fs::read_to_string(&result.output_path).unwrap();
        assert!(content.starts_with("[API ERROR]"));
        assert!(is_sentinel(&content));
    }
}

#[tokio::test]
async fn test_run_withAbortOnDegradedAndContinue_shouldIsolateFailures() {
    let temp_dir = common::create_temp_dir().unwrap();
    let config = common::write_sample_sources(temp_dir.path()).unwrap();
    let output_dir = config.output_dir.clone();
    let mock = MockProvider::intermittent("{\"call_id\": \"1\", \"lines\": []}", 2);
    let controller = Controller::new(config, GenerationClient::new(Some(Box::new(mock.clone()))));

    let summary = controller
        .run(&dialpad_options(FailurePolicy::Continue, true), &mut common::seeded_rng(1))
        .await
        .unwrap();

    // Requests 2 and 4 fail; the other three documents are still written
    assert_eq!(mock.request_count(), 5);
    assert_eq!(summary.results.len(), 3);
    assert_eq!(summary.failures.len(), 2);
    assert!(!summary.is_success());
    assert_eq!(common::list_files(&output_dir).len(), 3);
    assert!(summary.failures.iter().all(|f| f.platform == Platform::Dialpad));
}

#[tokio::test]
async fn test_run_withAbortOnDegradedAndFailFast_shouldStopAtFirstFailure() {
    let temp_dir = common::create_temp_dir().unwrap();
    let config = common::write_sample_sources(temp_dir.path()).unwrap();
    let output_dir = config.output_dir.clone();
    let mock = MockProvider::intermittent("{\"call_id\": \"1\", \"lines\": []}", 2);
    let controller = Controller::new(config, GenerationClient::new(Some(Box::new(mock.clone()))));

    let result = controller
        .run(&dialpad_options(FailurePolicy::Abort, true), &mut common::seeded_rng(1))
        .await;

    assert!(matches!(result, Err(AppError::Degraded { .. })));
    assert_eq!(mock.request_count(), 2);
    assert_eq!(common::list_files(&output_dir).len(), 1);
}

#[tokio::test]
async fn test_run_withoutCredentialAndAbortOnDegraded_shouldFailEveryDocument() {
    let temp_dir = common::create_temp_dir().unwrap();
    let config = common::write_sample_sources(temp_dir.path()).unwrap();
    let output_dir = config.output_dir.clone();
    let controller = Controller::new(config, GenerationClient::offline());

    let summary = controller
        .run(
            &RunOptions {
                platforms: vec![Platform::Slack],
                abort_on_degraded: true,
                ..RunOptions::default()
            },
            &mut common::seeded_rng(1),
        )
        .await
        .unwrap();

    assert_eq!(summary.failures.len(), 2);
    assert!(summary.results.is_empty());
    assert!(!output_dir.exists());
}

/*!
 * End-to-end generation runs against temporary configuration sources
 */

use std::collections::HashSet;
use std::fs;

use synthdoc::app_controller::{Controller, RunOptions};
use synthdoc::catalog::{OutputFormat, Platform};
use synthdoc::errors::{AppError, ConfigError, ProfileError};
use synthdoc::generation::{GenerationClient, PLACEHOLDER_TEXT};
use synthdoc::providers::mock::MockProvider;

use crate::common;

fn options(platforms: &[Platform], count: Option<usize>) -> RunOptions {
    RunOptions {
        platforms: platforms.to_vec(),
        count,
        ..RunOptions::default()
    }
}

#[tokio::test]
async fn test_run_withoutCredentialForSlack_shouldWriteSinglePlaceholder() {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir().unwrap();
    let config = common::write_sample_sources(temp_dir.path()).unwrap();
    let output_dir = config.output_dir.clone();
    let controller = Controller::new(config, GenerationClient::offline());

    let summary = controller
        .run(&options(&[Platform::Slack], Some(1)), &mut common::seeded_rng(1))
        .await
        .unwrap();

    let files = common::list_files(&output_dir);
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with(output_dir.join("Slack")));
    assert_eq!(fs::read_to_string(&files[0]).unwrap(), PLACEHOLDER_TEXT);

    assert!(summary.is_success());
    assert_eq!(summary.results.len(), 1);
    assert_eq!(summary.degraded_count(), 1);
}

#[tokio::test]
async fn test_run_withDialpadCountTwo_shouldWriteTwoDistinctTypes() {
    let temp_dir = common::create_temp_dir().unwrap();
    let config = common::write_sample_sources(temp_dir.path()).unwrap();
    let output_dir = config.output_dir.clone();
    let controller = Controller::new(config, GenerationClient::offline());

    let summary = controller
        .run(&options(&[Platform::Dialpad], Some(2)), &mut common::seeded_rng(9))
        .await
        .unwrap();

    let names: HashSet<&str> = summary.results.iter().map(|r| r.spec.type_name.as_str()).collect();
    assert_eq!(names.len(), 2);
    assert!(summary.results.iter().all(|r| r.spec.platform == Platform::Dialpad));

    let files = common::list_files(&output_dir.join("Dialpad"));
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f.extension().is_some_and(|e| e == "json")));
}

#[tokio::test]
async fn test_run_withoutCount_shouldGenerateWholeCatalogue() {
    let temp_dir = common::create_temp_dir().unwrap();
    let config = common::write_sample_sources(temp_dir.path()).unwrap();
    let output_dir = config.output_dir.clone();
    let controller = Controller::new(config, GenerationClient::offline());

    let summary = controller
        .run(&RunOptions::default(), &mut common::seeded_rng(2))
        .await
        .unwrap();

    assert_eq!(summary.results.len(), 10);
    assert_eq!(common::list_files(&output_dir).len(), 10);

    // Canonical platform order: Coda, then Dialpad, then Slack
    let platforms: Vec<Platform> = summary.results.iter().map(|r| r.spec.platform).collect();
    let mut sorted = platforms.clone();
    sorted.sort();
    assert_eq!(platforms, sorted);
}

#[tokio::test]
async fn test_run_withCountAboveCatalogueSize_shouldUseAllTypes() {
    let temp_dir = common::create_temp_dir().unwrap();
    let config = common::write_sample_sources(temp_dir.path()).unwrap();
    let controller = Controller::new(config, GenerationClient::offline());

    let summary = controller
        .run(&options(&[Platform::Coda], Some(10)), &mut common::seeded_rng(4))
        .await
        .unwrap();

    assert_eq!(summary.results.len(), 3);
}

#[tokio::test]
async fn test_run_withZeroCount_shouldGenerateWholePlatform() {
    let temp_dir = common::create_temp_dir().unwrap();
    let config = common::write_sample_sources(temp_dir.path()).unwrap();
    let controller = Controller::new(config, GenerationClient::offline());

    let summary = controller
        .run(&options(&[Platform::Dialpad], Some(0)), &mut common::seeded_rng(6))
        .await
        .unwrap();

    assert_eq!(summary.results.len(), 5);
    assert!(summary.is_success());
}

#[tokio::test]
async fn test_run_withWorkingProvider_shouldWriteSanitizedContent() {
    let temp_dir = common::create_temp_dir().unwrap();
    let config = common::write_sample_sources(temp_dir.path()).unwrap();
    let mock = MockProvider::working("Here's a realistic Slack export:\n```markdown\n# Weekly Status\n\nAll green.\n```");
    let controller = Controller::new(config, GenerationClient::new(Some(Box::new(mock.clone()))));

    let summary = controller
        .run(&options(&[Platform::Slack], None), &mut common::seeded_rng(5))
        .await
        .unwrap();

    let report = summary
        .results
        .iter()
        .find(|r| r.spec.output_format == OutputFormat::Markdown)
        .unwrap();
    assert!(report.output_path.ends_with("Slack/weekly_status_report.md"));
    assert_eq!(fs::read_to_string(&report.output_path).unwrap(), "# Weekly Status\n\nAll green.");
    assert_eq!(report.sanitized_text, "# Weekly Status\n\nAll green.");
    assert!(report.raw_text.starts_with("Here's a realistic"));
    assert!(!report.degraded);

    // One request per document, each prompt naming its document type
    let prompts = mock.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts.iter().any(|p| p.contains("Weekly Status Report")));
    assert!(prompts.iter().any(|p| p.contains("Incident Channel Export")));
}

#[tokio::test]
async fn test_run_withSameSeed_shouldSelectSameTypes() {
    let temp_dir = common::create_temp_dir().unwrap();
    let config = common::write_sample_sources(temp_dir.path()).unwrap();
    let controller = Controller::new(config, GenerationClient::offline());
    let run_options = options(&[Platform::Dialpad], Some(3));

    let first = controller.run(&run_options, &mut common::seeded_rng(77)).await.unwrap();
    let second = controller.run(&run_options, &mut common::seeded_rng(77)).await.unwrap();

    let names = |summary: &synthdoc::RunSummary| {
        summary
            .results
            .iter()
            .map(|r| r.spec.type_name.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(names(&first), names(&second));
}

#[tokio::test]
async fn test_run_withMissingCatalogue_shouldAbortWithoutFiles() {
    let temp_dir = common::create_temp_dir().unwrap();
    let config = common::write_sample_sources(temp_dir.path()).unwrap();
    fs::remove_file(&config.inputs.type_catalogue).unwrap();
    let output_dir = config.output_dir.clone();
    let controller = Controller::new(config, GenerationClient::offline());

    let result = controller.run(&RunOptions::default(), &mut common::seeded_rng(1)).await;

    assert!(matches!(result, Err(AppError::Config(ConfigError::NotFound(_)))));
    assert!(!output_dir.exists());
}

#[tokio::test]
async fn test_run_withProfileMissingMarker_shouldAbortWithNamedError() {
    let temp_dir = common::create_temp_dir().unwrap();
    let profile = common::sample_profile_text().replace("**Outreach and Onboarding**", "");
    let config = common::write_sources(temp_dir.path(), common::SAMPLE_CATALOGUE, common::SAMPLE_THEMES, &profile)
        .unwrap();
    let output_dir = config.output_dir.clone();
    let controller = Controller::new(config, GenerationClient::offline());

    let result = controller.run(&RunOptions::default(), &mut common::seeded_rng(1)).await;

    assert!(matches!(result, Err(AppError::Profile(ProfileError::SectionMissing(_)))));
    assert!(!output_dir.exists());
}

#[tokio::test]
async fn test_run_withPlatformAbsentFromCatalogue_shouldSkipIt() {
    let temp_dir = common::create_temp_dir().unwrap();
    let catalogue = r#"{"Coda": [{"type": "Billing FAQ", "format": ".txt"}]}"#;
    let config = common::write_sources(temp_dir.path(), catalogue, common::SAMPLE_THEMES, &common::sample_profile_text())
        .unwrap();
    let controller = Controller::new(config, GenerationClient::offline());

    let summary = controller
        .run(&options(&[Platform::Slack, Platform::Coda], Some(1)), &mut common::seeded_rng(1))
        .await
        .unwrap();

    assert_eq!(summary.results.len(), 1);
    assert_eq!(summary.results[0].spec.platform, Platform::Coda);
    assert!(summary.is_success());
}

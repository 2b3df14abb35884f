/*!
 * Tests for theme sampling and profile section selection
 */

use std::collections::HashSet;
use std::path::Path;

use synthdoc::catalog::{Platform, ProfileSection, ThemeEntry, parse_themes};
use synthdoc::generation::selector::{
    MAX_THEMES, candidate_themes, relevance_keywords, select_profile_sections, select_themes,
};

use crate::common;

fn sample_themes() -> Vec<ThemeEntry> {
    parse_themes(common::SAMPLE_THEMES, Path::new("themes.csv")).unwrap()
}

#[test]
fn test_selectThemes_overManySeeds_shouldReturnDistinctSubsetOfInput() {
    let themes = sample_themes();
    let document_types = [
        (Platform::Coda, "Product Requirements Document"),
        (Platform::Dialpad, "Sales Call Logs"),
        (Platform::Slack, "Weekly Status Report"),
    ];

    for seed in 0..200 {
        let mut rng = common::seeded_rng(seed);
        for (platform, document_type) in document_types {
            let selected = select_themes(platform, document_type, &themes, &mut rng);

            assert!(selected.len() <= MAX_THEMES);
            let unique: HashSet<&ThemeEntry> = selected.iter().collect();
            assert_eq!(unique.len(), selected.len(), "duplicate theme for seed {}", seed);
            assert!(selected.iter().all(|t| themes.contains(t)));
        }
    }
}

#[test]
fn test_selectThemes_overManySeeds_shouldCoverZeroToFour() {
    let themes = sample_themes();
    let mut sizes = HashSet::new();

    for seed in 0..200 {
        let mut rng = common::seeded_rng(seed);
        sizes.insert(select_themes(Platform::Slack, "Random Chatter", &themes, &mut rng).len());
    }

    assert_eq!(sizes, (0..=MAX_THEMES).collect::<HashSet<_>>());
}

#[test]
fn test_selectThemes_withRelevantThemes_shouldOnlyPickRelevant() {
    let themes = sample_themes();
    let keywords = relevance_keywords(Platform::Dialpad, "Support Call Transcript");

    for seed in 0..50 {
        let mut rng = common::seeded_rng(seed);
        let selected = select_themes(Platform::Dialpad, "Support Call Transcript", &themes, &mut rng);
        for theme in &selected {
            assert!(keywords.iter().any(|k| theme.mentions(k)), "irrelevant theme {}", theme);
        }
    }
}

#[test]
fn test_selectThemes_withSmallPool_shouldClampToPoolSize() {
    let themes = vec![ThemeEntry::new("Ops", "Billing cadence")];

    for seed in 0..50 {
        let mut rng = common::seeded_rng(seed);
        let selected = select_themes(Platform::Coda, "Billing FAQ", &themes, &mut rng);
        assert!(selected.len() <= 1);
    }
}

#[test]
fn test_selectThemes_withEmptyThemeTable_shouldReturnNothing() {
    let mut rng = common::seeded_rng(7);
    assert!(select_themes(Platform::Slack, "Incident Channel Export", &[], &mut rng).is_empty());
}

#[test]
fn test_selectThemes_withSameSeed_shouldBeReproducible() {
    let themes = sample_themes();
    let first = select_themes(Platform::Coda, "Feature Roadmap", &themes, &mut common::seeded_rng(42));
    let second = select_themes(Platform::Coda, "Feature Roadmap", &themes, &mut common::seeded_rng(42));
    assert_eq!(first, second);
}

#[test]
fn test_candidateThemes_withDuplicateRows_shouldDeduplicate() {
    let mut themes = sample_themes();
    themes.extend(sample_themes());

    let pool = candidate_themes(Platform::Slack, "Weekly Status Report", &themes);
    let unique: HashSet<&&ThemeEntry> = pool.iter().collect();
    assert_eq!(pool.len(), unique.len());
    assert_eq!(pool.len(), 8);
}

#[test]
fn test_candidateThemes_withNoRuleMatch_shouldFallBackToAllThemes() {
    let themes = sample_themes();
    assert!(relevance_keywords(Platform::Slack, "Weekly Status Report").is_empty());
    assert_eq!(candidate_themes(Platform::Slack, "Weekly Status Report", &themes).len(), themes.len());
}

#[test]
fn test_candidateThemes_withNoRelevantTheme_shouldFallBackToAllThemes() {
    let themes = vec![ThemeEntry::new("Finance", "Quarterly budget")];
    // "Billing" rule matches but no theme mentions its keywords
    assert_eq!(candidate_themes(Platform::Slack, "Billing Alerts", &themes).len(), 1);
}

#[test]
fn test_selectProfileSections_shouldFollowPlatformTables() {
    assert_eq!(
        select_profile_sections(Platform::Dialpad, "Sales Call Logs"),
        &[ProfileSection::Users, ProfileSection::Feedback]
    );
    assert_eq!(
        select_profile_sections(Platform::Slack, "Billing Alerts"),
        &[ProfileSection::Costs, ProfileSection::Feedback]
    );
    assert_eq!(
        select_profile_sections(Platform::Coda, "Therapist Match Criteria"),
        &[ProfileSection::Users, ProfileSection::Outreach]
    );
    assert!(select_profile_sections(Platform::Coda, "Weekly Status Report").is_empty());
}

#[test]
fn test_relevanceKeywords_shouldBeCaseSensitive() {
    assert!(relevance_keywords(Platform::Slack, "billing alerts").is_empty());
    assert!(!relevance_keywords(Platform::Slack, "Billing Alerts").is_empty());
}

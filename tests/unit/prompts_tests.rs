/*!
 * Tests for prompt composition
 */

use synthdoc::app_config::CompanyConfig;
use synthdoc::catalog::{CompanyProfile, DocumentTypeSpec, OutputFormat, Platform, ProfileSection, SourceData, ThemeEntry};
use synthdoc::generation::GenerationRequest;
use synthdoc::generation::prompts::{PROFILE_EXCERPT_CHARS, ProfileExcerpt, PromptBuilder, theme_guidance};

use crate::common;

fn spec(platform: Platform, type_name: &str, output_format: OutputFormat) -> DocumentTypeSpec {
    DocumentTypeSpec {
        platform,
        type_name: type_name.to_string(),
        output_format,
    }
}

#[test]
fn test_build_withCodaDocument_shouldOrderBlocks() {
    let company = CompanyConfig::default();
    let profile = CompanyProfile::parse(&common::sample_profile_text()).unwrap();
    let spec = spec(Platform::Coda, "Product Requirements Document", OutputFormat::Markdown);
    let themes = vec![ThemeEntry::new("Product", "Feature Requests for telehealth")];

    let prompt = PromptBuilder::new(&company, &spec)
        .with_profile_sections(&profile, &[ProfileSection::Services])
        .with_themes(&themes)
        .build();

    assert!(prompt.starts_with("Generate a realistic Product Requirements Document for SonderMind in Markdown format."));

    let positions: Vec<usize> = [
        "About SonderMind:",
        "--- Relevant Info: SERVICES ---",
        "formatted as a realistic Coda document",
        "naturally incorporate the following 1 themes",
        "- Product: Feature Requests for telehealth",
        "Just give me the document content directly.",
    ]
    .iter()
    .map(|needle| prompt.find(needle).unwrap_or_else(|| panic!("missing block: {}", needle)))
    .collect();

    assert!(positions.windows(2).all(|w| w[0] < w[1]), "blocks out of order: {:?}", positions);
}

#[test]
fn test_build_withMatchingGuidance_shouldAddGuidanceLine() {
    let company = CompanyConfig::default();
    let spec = spec(Platform::Slack, "Weekly Status Report", OutputFormat::Text);
    let themes = vec![ThemeEntry::new("Sales", "Competitive pressure from other platforms")];

    let prompt = PromptBuilder::new(&company, &spec).with_themes(&themes).build();

    assert!(prompt.contains(
        "- Sales: Competitive pressure from other platforms\n  Incorporate messages mentioning competitors"
    ));
}

#[test]
fn test_build_withoutThemes_shouldOmitThemeBlock() {
    let company = CompanyConfig::default();
    let spec = spec(Platform::Coda, "Billing FAQ", OutputFormat::Text);

    let prompt = PromptBuilder::new(&company, &spec).build();

    assert!(!prompt.contains("naturally incorporate the following"));
    assert!(!prompt.contains("--- Relevant Info"));
    assert!(!prompt.contains("\n\n\n"));
}

#[test]
fn test_build_withDialpad_shouldEmbedJsonSchemaExample() {
    let company = CompanyConfig::default();
    let spec = spec(Platform::Dialpad, "Sales Call Logs", OutputFormat::Json);

    let prompt = PromptBuilder::new(&company, &spec).build();

    assert!(prompt.contains("\"call_id\""));
    assert!(prompt.contains("\"type\": \"transcript\""));
    assert!(prompt.contains("\"type\": \"moment\""));
    assert!(prompt.contains("Just give me the JSON content directly."));
    assert!(!prompt.contains("{example}"));
}

#[test]
fn test_build_withSlackFormats_shouldSwitchStructure() {
    let company = CompanyConfig::default();
    let json_spec = spec(Platform::Slack, "Incident Channel Export", OutputFormat::Json);
    let text_spec = spec(Platform::Slack, "Incident Channel Export", OutputFormat::Text);

    let json_prompt = PromptBuilder::new(&company, &json_spec).build();
    let text_prompt = PromptBuilder::new(&company, &text_spec).build();

    assert!(json_prompt.contains("JSON array of Slack messages"));
    assert!(json_prompt.contains("Just give me the JSON content directly."));
    assert!(text_prompt.contains("[Channel: #channel-name]"));
    assert!(text_prompt.contains("Just give me the Slack message content directly."));
}

#[test]
fn test_build_withSlackNonJsonFormats_shouldSayThisDataProvides() {
    let company = CompanyConfig::default();
    let json_spec = spec(Platform::Slack, "Incident Channel Export", OutputFormat::Json);
    let json_prompt = PromptBuilder::new(&company, &json_spec).build();
    assert!(json_prompt.contains("\"This JSON provides...\""));

    for format in [OutputFormat::Text, OutputFormat::Markdown] {
        let slack_spec = spec(Platform::Slack, "Weekly Status Report", format);
        let prompt = PromptBuilder::new(&company, &slack_spec).build();

        assert!(prompt.contains("\"This data provides...\""));
        assert!(!prompt.contains("This plain text provides"));
        assert!(!prompt.contains("This Markdown provides"));
    }
}

#[test]
fn test_profileExcerpt_withLongSection_shouldTruncateByCharacters() {
    let long_body = "é".repeat(PROFILE_EXCERPT_CHARS + 50);
    let text = common::sample_profile_text().replace("Details about users for the synthetic profile.", &long_body);
    let profile = CompanyProfile::parse(&text).unwrap();

    let excerpt = ProfileExcerpt::from_profile(&profile, ProfileSection::Users);
    assert_eq!(excerpt.text.chars().count(), PROFILE_EXCERPT_CHARS);
}

#[test]
fn test_themeGuidance_shouldMatchSubthemeSubstrings() {
    assert!(theme_guidance(Platform::Coda, "Pain Points with scheduling").is_some());
    assert!(theme_guidance(Platform::Dialpad, "UX/UI Issues in the client portal").is_some());
    assert!(theme_guidance(Platform::Slack, "Matching Efficiency").is_none());
}

#[test]
fn test_compose_shouldUseSelectedSectionsAndThemes() {
    let temp_dir = common::create_temp_dir().unwrap();
    let config = common::write_sample_sources(temp_dir.path()).unwrap();
    let sources = SourceData::load(&config.inputs).unwrap();
    let spec = sources.catalogue.types_for(Platform::Dialpad)[0].clone();

    let request = GenerationRequest::compose(&spec, &sources, &config.company, &mut common::seeded_rng(3));

    assert_eq!(request.selected_sections, vec![ProfileSection::Users, ProfileSection::Feedback]);
    assert!(request.prompt.contains("--- Relevant Info: USERS ---\nDetails about users"));
    for theme in &request.selected_themes {
        assert!(request.prompt.contains(&format!("- {}: {}", theme.category, theme.subtheme)));
    }
}

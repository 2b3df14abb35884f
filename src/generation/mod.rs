/*!
 * Document generation.
 *
 * This module provides:
 * - `selector`: relevance tables, theme sampling and profile section lookup
 * - `prompts`: prompt composition per platform
 * - `schema`: typed JSON output schemas used for prompt examples
 * - `client`: the generation client and its tagged outcome
 * - `sanitizer`: removal of conversational framing from responses
 */

use log::debug;
use rand::Rng;

use crate::app_config::CompanyConfig;
use crate::catalog::{DocumentTypeSpec, ProfileSection, SourceData, ThemeEntry};

pub mod client;
pub mod prompts;
pub mod sanitizer;
pub mod schema;
pub mod selector;

// Re-export main types
pub use client::{DegradedReason, GenerationClient, GenerationOutcome, PLACEHOLDER_TEXT, is_sentinel};
pub use prompts::PromptBuilder;
pub use sanitizer::sanitize;
pub use selector::{select_profile_sections, select_themes};

/// Everything decided for one document before the provider is called
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub spec: DocumentTypeSpec,
    pub selected_themes: Vec<ThemeEntry>,
    pub selected_sections: Vec<ProfileSection>,
    pub prompt: String,
}

impl GenerationRequest {
    /// Select themes and profile sections for a document and compose its prompt
    pub fn compose<R: Rng>(
        spec: &DocumentTypeSpec,
        sources: &SourceData,
        company: &CompanyConfig,
        rng: &mut R,
    ) -> Self {
        let selected_themes = select_themes(spec.platform, &spec.type_name, &sources.themes, rng);
        let selected_sections = select_profile_sections(spec.platform, &spec.type_name).to_vec();

        let prompt = PromptBuilder::new(company, spec)
            .with_profile_sections(&sources.profile, &selected_sections)
            .with_themes(&selected_themes)
            .build();

        debug!(
            "{}: {} theme(s) [{}], sections [{}], prompt {} chars",
            spec.type_name,
            selected_themes.len(),
            selected_themes
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
            selected_sections
                .iter()
                .map(|s| s.key())
                .collect::<Vec<_>>()
                .join(", "),
            prompt.len()
        );

        Self {
            spec: spec.clone(),
            selected_themes,
            selected_sections,
            prompt,
        }
    }
}

/*!
 * Configuration sources for document generation.
 *
 * This module loads the three inputs a run needs:
 * - `types`: the document type catalogue (JSON)
 * - `themes`: the theme table (CSV)
 * - `profile`: the company profile (Markdown), split into named sections
 */

use log::debug;

use crate::app_config::InputConfig;
use crate::errors::AppError;

pub mod profile;
pub mod themes;
pub mod types;

pub use profile::{CompanyProfile, ProfileSection, extract_section, load_company_profile};
pub use themes::{ThemeEntry, load_themes, parse_themes};
pub use types::{DocumentTypeSpec, OutputFormat, Platform, TypeCatalogue};

/// Everything loaded from disk before generation starts; read-only afterwards
#[derive(Debug, Clone)]
pub struct SourceData {
    pub catalogue: TypeCatalogue,
    pub themes: Vec<ThemeEntry>,
    pub profile: CompanyProfile,
}

impl SourceData {
    /// Load all three sources, failing on the first missing or malformed one
    pub fn load(inputs: &InputConfig) -> Result<Self, AppError> {
        let catalogue = TypeCatalogue::load(&inputs.type_catalogue)?;
        let themes = load_themes(&inputs.themes)?;
        let profile = load_company_profile(&inputs.company_profile)?;

        debug!(
            "Loaded {} document types, {} themes and the company profile",
            catalogue.len(),
            themes.len()
        );

        Ok(Self {
            catalogue,
            themes,
            profile,
        })
    }
}

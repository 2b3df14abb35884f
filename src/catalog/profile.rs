/*!
 * Company profile section extraction.
 *
 * The profile is a Markdown document whose sections are introduced by fixed
 * bold markers in a fixed order. Extraction scans forward for each marker in
 * turn and fails with a named error when one is absent or out of place.
 */

use std::path::Path;

use crate::errors::{AppError, ConfigError, ProfileError};
use crate::file_utils::FileManager;

/// Named sections of the company profile, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProfileSection {
    Overview,
    Users,
    Competitors,
    Services,
    Costs,
    Feedback,
    Outreach,
}

impl ProfileSection {
    /// All sections in the order their markers must appear
    pub const ALL: [ProfileSection; 7] = [
        ProfileSection::Overview,
        ProfileSection::Users,
        ProfileSection::Competitors,
        ProfileSection::Services,
        ProfileSection::Costs,
        ProfileSection::Feedback,
        ProfileSection::Outreach,
    ];

    // @returns: Short section name
    pub fn key(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Users => "users",
            Self::Competitors => "competitors",
            Self::Services => "services",
            Self::Costs => "costs",
            Self::Feedback => "feedback",
            Self::Outreach => "outreach",
        }
    }

    // @returns: Literal marker introducing the section
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Overview => "**Overview**",
            Self::Users => "**Users**",
            Self::Competitors => "**Competitors**",
            Self::Services => "**Services/Products**",
            Self::Costs => "**Service Cost Structure**",
            Self::Feedback => "**User Feedback on SonderMind: Direct Quotes**",
            Self::Outreach => "**Outreach and Onboarding**",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Company profile split into its seven sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyProfile {
    preamble: String,
    sections: [String; 7],
}

impl CompanyProfile {
    /// Split the profile text into sections
    pub fn parse(text: &str) -> Result<Self, ProfileError> {
        let bounds = locate_markers(text)?;

        let mut sections: [String; 7] = Default::default();
        for (i, &(_, body_start)) in bounds.iter().enumerate() {
            let body_end = bounds.get(i + 1).map_or(text.len(), |&(next_start, _)| next_start);
            sections[i] = text[body_start..body_end].trim().to_string();
        }

        Ok(Self {
            preamble: text[..bounds[0].0].trim().to_string(),
            sections,
        })
    }

    /// Text of a single section, already trimmed
    pub fn section(&self, section: ProfileSection) -> &str {
        &self.sections[section.index()]
    }

    /// Text preceding the first marker, usually the document title
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Iterate sections in document order
    pub fn sections(&self) -> impl Iterator<Item = (ProfileSection, &str)> {
        ProfileSection::ALL
            .iter()
            .map(move |&s| (s, self.sections[s.index()].as_str()))
    }
}

/// Extract a single section directly from profile text
pub fn extract_section(text: &str, section: ProfileSection) -> Result<String, ProfileError> {
    CompanyProfile::parse(text).map(|profile| profile.section(section).to_string())
}

/// Load and parse the company profile file
pub fn load_company_profile<P: AsRef<Path>>(path: P) -> Result<CompanyProfile, AppError> {
    let text = FileManager::read_config_source(path.as_ref())?;
    if text.trim().is_empty() {
        return Err(ConfigError::malformed(path.as_ref(), "company profile is empty").into());
    }
    Ok(CompanyProfile::parse(&text)?)
}

// @returns: (marker start, body start) byte offsets for every section
fn locate_markers(text: &str) -> Result<Vec<(usize, usize)>, ProfileError> {
    let mut bounds = Vec::with_capacity(ProfileSection::ALL.len());
    let mut cursor = 0;

    for section in ProfileSection::ALL {
        let marker = section.marker();
        match text[cursor..].find(marker) {
            Some(offset) => {
                let start = cursor + offset;
                cursor = start + marker.len();
                bounds.push((start, cursor));
            }
            None if text.contains(marker) => return Err(ProfileError::SectionOutOfOrder(section)),
            None => return Err(ProfileError::SectionMissing(section)),
        }
    }

    Ok(bounds)
}

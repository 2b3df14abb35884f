/*!
 * Theme and profile section selection.
 *
 * Relevance is driven by static per-platform tables keyed by substrings of
 * the document type name. The first rule whose trigger matches wins.
 */

use rand::Rng;
use rand::seq::index;
use std::collections::HashSet;

use crate::catalog::{Platform, ProfileSection, ThemeEntry};

/// Upper bound on themes carried by a single document
pub const MAX_THEMES: usize = 4;

/// Maps document types to theme keywords
#[derive(Debug, Clone, Copy)]
pub struct RelevanceRule {
    /// Substrings of the document type name that activate the rule
    pub triggers: &'static [&'static str],
    /// Keywords matched against theme category and sub-theme
    pub keywords: &'static [&'static str],
}

/// Maps document types to company profile sections
#[derive(Debug, Clone, Copy)]
pub struct SectionRule {
    pub triggers: &'static [&'static str],
    pub sections: &'static [ProfileSection],
}

trait Triggered {
    fn triggers(&self) -> &'static [&'static str];

    fn matches(&self, document_type: &str) -> bool {
        self.triggers().iter().any(|t| document_type.contains(t))
    }
}

impl Triggered for RelevanceRule {
    fn triggers(&self) -> &'static [&'static str] {
        self.triggers
    }
}

impl Triggered for SectionRule {
    fn triggers(&self) -> &'static [&'static str] {
        self.triggers
    }
}

const CODA_THEME_RULES: &[RelevanceRule] = &[
    RelevanceRule {
        triggers: &["Requirements", "Feature"],
        keywords: &["Feature Requests", "UI", "UX", "Usability", "Pain Points"],
    },
    RelevanceRule {
        triggers: &["Feedback"],
        keywords: &["Pain Points", "Objections", "Customer Testimonials", "Usability"],
    },
    RelevanceRule {
        triggers: &["Matching", "Intake"],
        keywords: &["Matching Efficiency", "Operational Efficiency", "Engagement", "Platform Stability"],
    },
    RelevanceRule {
        triggers: &["Tracking"],
        keywords: &["Operational Efficiency", "Competitive", "Engagement"],
    },
];

const DIALPAD_THEME_RULES: &[RelevanceRule] = &[
    RelevanceRule {
        triggers: &["Call Logs", "Outreach"],
        keywords: &["Sales", "Pain Points", "Objections", "Competitive"],
    },
    RelevanceRule {
        triggers: &["Objection"],
        keywords: &["Pain Points", "Objections", "Competitive", "Value Proposition"],
    },
    RelevanceRule {
        triggers: &["Support"],
        keywords: &["Support Ticket", "Usability", "Feature Requests"],
    },
    RelevanceRule {
        triggers: &["Quality"],
        keywords: &["Value Proposition", "Usability", "Operational Efficiency"],
    },
];

const SLACK_THEME_RULES: &[RelevanceRule] = &[
    RelevanceRule {
        triggers: &["Onboarding"],
        keywords: &["Engagement", "Drop-off", "Operational Efficiency"],
    },
    RelevanceRule {
        triggers: &["Matching"],
        keywords: &["Matching", "Efficiency", "Platform Stability"],
    },
    RelevanceRule {
        triggers: &["Billing"],
        keywords: &["Pain Points", "Objections", "Support Ticket"],
    },
    RelevanceRule {
        triggers: &["Support", "Incident"],
        keywords: &["Platform Stability", "Downtime", "Support Ticket", "UX/UI Issues"],
    },
    RelevanceRule {
        triggers: &["Release"],
        keywords: &["Feature Requests", "Competitive", "Usability"],
    },
];

use ProfileSection::{Competitors, Costs, Feedback, Outreach, Overview, Services, Users};

const CODA_SECTION_RULES: &[SectionRule] = &[
    SectionRule {
        triggers: &["Onboarding"],
        sections: &[Overview, Outreach],
    },
    SectionRule {
        triggers: &["Match"],
        sections: &[Users, Outreach],
    },
    SectionRule {
        triggers: &["Roadmap"],
        sections: &[Services, Competitors],
    },
    SectionRule {
        triggers: &["Billing"],
        sections: &[Costs],
    },
    SectionRule {
        triggers: &["Feedback"],
        sections: &[Feedback],
    },
];

const DIALPAD_SECTION_RULES: &[SectionRule] = &[
    SectionRule {
        triggers: &["Call Logs"],
        sections: &[Users, Feedback],
    },
    SectionRule {
        triggers: &["Conversation"],
        sections: &[Feedback, Users],
    },
    SectionRule {
        triggers: &["Support"],
        sections: &[Feedback, Services],
    },
    SectionRule {
        triggers: &["Quality"],
        sections: &[Outreach, Feedback],
    },
    SectionRule {
        triggers: &["Outreach"],
        sections: &[Outreach, Users],
    },
];

const SLACK_SECTION_RULES: &[SectionRule] = &[
    SectionRule {
        triggers: &["Onboarding"],
        sections: &[Outreach, Users],
    },
    SectionRule {
        triggers: &["Matching"],
        sections: &[Users, Services],
    },
    SectionRule {
        triggers: &["Billing"],
        sections: &[Costs, Feedback],
    },
    SectionRule {
        triggers: &["Support"],
        sections: &[Feedback, Services],
    },
    SectionRule {
        triggers: &["Release"],
        sections: &[Services, Competitors],
    },
];

/// Theme relevance table for a platform
pub fn theme_rules(platform: Platform) -> &'static [RelevanceRule] {
    match platform {
        Platform::Coda => CODA_THEME_RULES,
        Platform::Dialpad => DIALPAD_THEME_RULES,
        Platform::Slack => SLACK_THEME_RULES,
    }
}

/// Profile section table for a platform
pub fn section_rules(platform: Platform) -> &'static [SectionRule] {
    match platform {
        Platform::Coda => CODA_SECTION_RULES,
        Platform::Dialpad => DIALPAD_SECTION_RULES,
        Platform::Slack => SLACK_SECTION_RULES,
    }
}

fn first_match<T: Triggered>(rules: &'static [T], document_type: &str) -> Option<&'static T> {
    rules.iter().find(|rule| rule.matches(document_type))
}

/// Keywords that make a theme relevant to the document type (empty when no rule matches)
pub fn relevance_keywords(platform: Platform, document_type: &str) -> &'static [&'static str] {
    first_match(theme_rules(platform), document_type).map_or(&[], |rule| rule.keywords)
}

/// Profile sections to embed in the prompt for the document type
pub fn select_profile_sections(platform: Platform, document_type: &str) -> &'static [ProfileSection] {
    first_match(section_rules(platform), document_type).map_or(&[], |rule| rule.sections)
}

/// Distinct themes eligible for the document type, falling back to every theme
pub fn candidate_themes<'a>(
    platform: Platform,
    document_type: &str,
    themes: &'a [ThemeEntry],
) -> Vec<&'a ThemeEntry> {
    let keywords = relevance_keywords(platform, document_type);
    let relevant = distinct(
        themes
            .iter()
            .filter(|theme| keywords.iter().any(|k| theme.mentions(k))),
    );

    if relevant.is_empty() {
        distinct(themes.iter())
    } else {
        relevant
    }
}

/// Draw 0 to `MAX_THEMES` distinct themes for a document
pub fn select_themes<R: Rng>(
    platform: Platform,
    document_type: &str,
    themes: &[ThemeEntry],
    rng: &mut R,
) -> Vec<ThemeEntry> {
    let pool = candidate_themes(platform, document_type, themes);
    let wanted = rng.random_range(0..=MAX_THEMES);
    let amount = wanted.min(pool.len());

    index::sample(rng, pool.len(), amount)
        .into_iter()
        .map(|i| pool[i].clone())
        .collect()
}

fn distinct<'a>(themes: impl Iterator<Item = &'a ThemeEntry>) -> Vec<&'a ThemeEntry> {
    let mut seen = HashSet::new();
    themes.filter(|theme| seen.insert(*theme)).collect()
}

/*!
 * Prompt composition for synthetic documents.
 *
 * A prompt is assembled from six blocks in a fixed order: role preamble,
 * company context, profile excerpts, output structure, theme directives and
 * a closing directive. Each platform has its own wording for the structure,
 * theme and closing blocks.
 */

use crate::app_config::CompanyConfig;
use crate::catalog::{CompanyProfile, DocumentTypeSpec, OutputFormat, Platform, ProfileSection, ThemeEntry};
use crate::generation::schema::{DialpadCallExport, SlackMessage, render_example};

/// Characters of a profile section embedded in a prompt (hard cut, may split words)
pub const PROFILE_EXCERPT_CHARS: usize = 500;

/// Extra sentence added below a theme whose sub-theme contains `pattern`
#[derive(Debug, Clone, Copy)]
pub struct GuidanceRule {
    pub pattern: &'static str,
    pub guidance: &'static str,
}

const CODA_GUIDANCE: &[GuidanceRule] = &[
    GuidanceRule {
        pattern: "Pain Points",
        guidance: "Naturally include information about challenges therapists face and objections they raise.",
    },
    GuidanceRule {
        pattern: "Feature Requests",
        guidance: "Incorporate details about features users are requesting and their prioritization.",
    },
    GuidanceRule {
        pattern: "Upsell",
        guidance: "Include relevant information about premium services and renewal opportunities.",
    },
    GuidanceRule {
        pattern: "UX/UI Issues",
        guidance: "Address interface problems and improvement recommendations where relevant.",
    },
    GuidanceRule {
        pattern: "Competitive",
        guidance: "Weave in competitor analysis where it makes sense in the document.",
    },
];

const DIALPAD_GUIDANCE: &[GuidanceRule] = &[
    GuidanceRule {
        pattern: "Pain Points",
        guidance: "Include data about challenges therapists face in conversation content and summary fields.",
    },
    GuidanceRule {
        pattern: "Feature Requests",
        guidance: "Incorporate feature request mentions and indicators in the data where relevant.",
    },
    GuidanceRule {
        pattern: "Upsell",
        guidance: "Include data relating to renewal and premium service opportunities where appropriate.",
    },
    GuidanceRule {
        pattern: "UX/UI Issues",
        guidance: "Incorporate interface issues in conversation content where natural.",
    },
    GuidanceRule {
        pattern: "Competitive",
        guidance: "Include competitor mentions where they would naturally occur in conversations or data.",
    },
];

const SLACK_GUIDANCE: &[GuidanceRule] = &[
    GuidanceRule {
        pattern: "Pain Points",
        guidance: "Include messages that discuss challenges therapists face in a natural way.",
    },
    GuidanceRule {
        pattern: "Feature Requests",
        guidance: "Include mentions of feature requests and prioritization in the conversation.",
    },
    GuidanceRule {
        pattern: "Upsell",
        guidance: "Incorporate discussion of premium services or renewals where it fits naturally.",
    },
    GuidanceRule {
        pattern: "UX/UI Issues",
        guidance: "Include messages about interface issues where they would naturally come up.",
    },
    GuidanceRule {
        pattern: "Competitive",
        guidance: "Incorporate messages mentioning competitors where relevant to the conversation.",
    },
];

/// Theme guidance table for a platform
pub fn guidance_rules(platform: Platform) -> &'static [GuidanceRule] {
    match platform {
        Platform::Coda => CODA_GUIDANCE,
        Platform::Dialpad => DIALPAD_GUIDANCE,
        Platform::Slack => SLACK_GUIDANCE,
    }
}

/// Guidance line for a sub-theme, if any pattern matches
pub fn theme_guidance(platform: Platform, subtheme: &str) -> Option<&'static str> {
    guidance_rules(platform)
        .iter()
        .find(|rule| subtheme.contains(rule.pattern))
        .map(|rule| rule.guidance)
}

const CODA_STRUCTURE: &str = r#"This document should be formatted as a realistic Coda document.

Please make the content highly specific to {company}'s business model, using realistic metrics, dates, and terminology.
Include relevant tables, bullet points, and structured data as would be found in a real document."#;

const DIALPAD_STRUCTURE: &str = r#"This document should be formatted as a realistic Dialpad JSON export with the following EXACT structure:

{
  "call_id": "unique ID string",
  "lines": [ ...transcript and moment lines... ]
}

Each entry of "lines" is one of:
- a transcript line (spoken dialogue) with exactly the keys: contact_id, content, name, time, type = "transcript"
- a moment line (system events, action items, etc.) with exactly the keys: content, name, time, type = "moment", user_id

Field meanings:
- "call_id": unique identifier of the call
- "contact_id": identifier of the external party speaking
- "user_id": identifier of the internal user the moment belongs to
- "content": the spoken words, or the moment kind such as action_item
- "name": speaker name
- "time": ISO timestamp in YYYY-MM-DDThh:mm:ss.ssssss format (microsecond precision)

Example:
{example}

Caller/therapist exchanges should be realistic for a {company} conversation, using realistic dialog, dates, and context.
- FOLLOW THE EXACT JSON STRUCTURE DEFINED ABOVE
- Create a realistic mix of transcript and moment lines throughout
- Do not add any additional fields to the JSON structure
- Make sure all JSON is properly formatted and valid"#;

const SLACK_JSON_STRUCTURE: &str = r#"This document should be formatted as realistic Slack messages or notifications.

Please format the output as a JSON array of Slack messages. Each message has the keys:
- "user": user's name or bot name
- "timestamp": ISO timestamp
- "text": message content
- "channel": channel name
- "reactions": list of {"name": emoji name, "count": number of reactions, "users": [user names]}
- "thread_ts": thread timestamp if part of a thread
- "replies": list of {"user", "timestamp", "text"}

Example:
[
{example}
]

The message structure should follow realistic Slack conversation patterns."#;

const SLACK_TEXT_STRUCTURE: &str = r#"This document should be formatted as realistic Slack messages or notifications.

Please format the output as plain text Slack messages with the following structure:

[Channel: #channel-name]

[User Name] 10:15 AM
Message content

[Another User] 10:17 AM
Reply message

[Bot Name] 10:20 AM
Bot notification or message

The message structure should follow realistic Slack conversation patterns."#;

const CODA_THEMES_INTRO: &str = "As you create this document, naturally incorporate the following {count} themes without explicitly labeling them as themes. The content should naturally address these concepts in a way that feels organic to the document:";
const DIALPAD_THEMES_INTRO: &str = "As you create this JSON document, naturally incorporate the following {count} themes without explicitly labeling them. The data should naturally include information relevant to these concepts:";
const SLACK_THEMES_INTRO: &str = "As you create these Slack messages, naturally incorporate the following {count} themes without explicitly labeling them. The conversation should naturally touch on these topics:";

const CODA_CLOSING: &str = r#"IMPORTANT:
- The document should feel like a cohesive, realistic business document, not a collection of themes
- Don't use section headings that directly reference the themes unless it would naturally occur in this type of document
- Don't label or call out the themes explicitly - they should be naturally woven into the content
- The document's organization and structure should follow standard practices for this document type

IMPORTANT: Do not include any explanatory text like "Here's a realistic document" or "This document provides..."
Just give me the document content directly."#;

const DIALPAD_CLOSING: &str = r#"IMPORTANT:
- The conversation should flow naturally between {company} representatives and therapists/clients
- Ensure the themes are incorporated naturally in conversation content, not as artificial fields

IMPORTANT: Do not include any explanatory text like "Here's a realistic document" or "This JSON provides..."
Just give me the JSON content directly."#;

const SLACK_CLOSING: &str = r#"IMPORTANT:
- The conversation should feel natural and authentic, not contrived around themes
- Don't explicitly label or flag themes in the messages
- The selected themes should emerge organically through the conversation topics

IMPORTANT: Do not include any explanatory text like "Here's a realistic document" or "This {subject} provides..."
Just give me the {content} directly."#;

/// A truncated profile section embedded in a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileExcerpt {
    pub section: ProfileSection,
    pub text: String,
}

impl ProfileExcerpt {
    /// First `PROFILE_EXCERPT_CHARS` characters of a section
    pub fn from_profile(profile: &CompanyProfile, section: ProfileSection) -> Self {
        Self {
            section,
            text: profile.section(section).chars().take(PROFILE_EXCERPT_CHARS).collect(),
        }
    }
}

/// Builder for constructing generation prompts
#[derive(Debug, Clone)]
pub struct PromptBuilder<'a> {
    company: &'a CompanyConfig,
    spec: &'a DocumentTypeSpec,
    excerpts: Vec<ProfileExcerpt>,
    themes: Vec<ThemeEntry>,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder.
    pub fn new(company: &'a CompanyConfig, spec: &'a DocumentTypeSpec) -> Self {
        Self {
            company,
            spec,
            excerpts: Vec::new(),
            themes: Vec::new(),
        }
    }

    /// Embed excerpts of the given profile sections
    pub fn with_profile_sections(mut self, profile: &CompanyProfile, sections: &[ProfileSection]) -> Self {
        self.excerpts = sections
            .iter()
            .map(|&section| ProfileExcerpt::from_profile(profile, section))
            .collect();
        self
    }

    /// Themes to weave into the document
    pub fn with_themes(mut self, themes: &[ThemeEntry]) -> Self {
        self.themes = themes.to_vec();
        self
    }

    /// Build the complete prompt.
    pub fn build(&self) -> String {
        let blocks = [
            self.build_preamble(),
            self.build_context(),
            self.build_excerpts(),
            self.build_structure(),
            self.build_themes(),
            self.build_closing(),
        ];

        blocks
            .iter()
            .filter(|block| !block.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn render(&self, template: &str) -> String {
        template
            .replace("{company}", &self.company.name)
            .replace("{format}", self.spec.output_format.label())
    }

    fn build_preamble(&self) -> String {
        format!(
            "Generate a realistic {} for {} in {} format.",
            self.spec.type_name,
            self.company.name,
            self.spec.output_format.label()
        )
    }

    fn build_context(&self) -> String {
        format!("About {}:\n{}", self.company.name, self.company.description)
    }

    fn build_excerpts(&self) -> String {
        self.excerpts
            .iter()
            .map(|excerpt| {
                format!(
                    "--- Relevant Info: {} ---\n{}",
                    excerpt.section.key().to_uppercase(),
                    excerpt.text
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn build_structure(&self) -> String {
        match (self.spec.platform, self.spec.output_format) {
            (Platform::Coda, _) => self.render(CODA_STRUCTURE),
            (Platform::Dialpad, _) => self
                .render(DIALPAD_STRUCTURE)
                .replace("{example}", &render_example(&DialpadCallExport::example())),
            (Platform::Slack, OutputFormat::Json) => self
                .render(SLACK_JSON_STRUCTURE)
                .replace("{example}", &render_example(&SlackMessage::example())),
            (Platform::Slack, _) => self.render(SLACK_TEXT_STRUCTURE),
        }
    }

    fn build_themes(&self) -> String {
        if self.themes.is_empty() {
            return String::new();
        }

        let intro = match self.spec.platform {
            Platform::Coda => CODA_THEMES_INTRO,
            Platform::Dialpad => DIALPAD_THEMES_INTRO,
            Platform::Slack => SLACK_THEMES_INTRO,
        };

        let mut block = intro.replace("{count}", &self.themes.len().to_string());
        for theme in &self.themes {
            block.push_str(&format!("\n- {}: {}", theme.category, theme.subtheme));
            if let Some(guidance) = theme_guidance(self.spec.platform, &theme.subtheme) {
                block.push_str(&format!("\n  {}", guidance));
            }
        }
        block
    }

    fn build_closing(&self) -> String {
        match self.spec.platform {
            Platform::Coda => self.render(CODA_CLOSING),
            Platform::Dialpad => self.render(DIALPAD_CLOSING),
            Platform::Slack => {
                let (subject, content) = match self.spec.output_format {
                    OutputFormat::Json => ("JSON", "JSON content"),
                    _ => ("data", "Slack message content"),
                };
                self.render(SLACK_CLOSING)
                    .replace("{subject}", subject)
                    .replace("{content}", content)
            }
        }
    }
}

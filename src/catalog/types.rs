/*!
 * Document type catalogue.
 *
 * The catalogue lists, per platform, the document types that can be generated
 * together with the file format each one is written in.
 */

use log::warn;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::errors::ConfigError;
use crate::file_utils::FileManager;

/// Target system a document imitates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    Coda,
    Dialpad,
    Slack,
}

impl Platform {
    /// All platforms in generation order
    pub const ALL: [Platform; 3] = [Platform::Coda, Platform::Dialpad, Platform::Slack];

    // @returns: Name used in the catalogue and the output directory
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Coda => "Coda",
            Self::Dialpad => "Dialpad",
            Self::Slack => "Slack",
        }
    }

    /// Sort and deduplicate a platform selection into generation order
    pub fn normalize(selection: &[Platform]) -> Vec<Platform> {
        Self::ALL
            .iter()
            .copied()
            .filter(|p| selection.contains(p))
            .collect()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "coda" => Ok(Self::Coda),
            "dialpad" => Ok(Self::Dialpad),
            "slack" => Ok(Self::Slack),
            _ => Err(format!("Unknown platform: {}", s)),
        }
    }
}

/// File format a document is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
}

impl OutputFormat {
    // @returns: File extension including the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => ".json",
            Self::Markdown => ".md",
            Self::Text => ".txt",
        }
    }

    // @returns: Human readable name used inside prompts
    pub fn label(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Markdown => "Markdown",
            Self::Text => "plain text",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "md" | "markdown" => Ok(Self::Markdown),
            "txt" | "text" => Ok(Self::Text),
            _ => Err(format!("Unsupported output format: {}", s)),
        }
    }
}

/// One kind of document that can be generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTypeSpec {
    pub platform: Platform,
    pub type_name: String,
    pub output_format: OutputFormat,
}

#[derive(Debug, Deserialize)]
struct RawDocumentType {
    #[serde(rename = "type")]
    type_name: String,
    format: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCatalogue {
    Wrapped {
        #[serde(rename = "sondermind_platforms", alias = "platforms")]
        platforms: BTreeMap<String, serde_json::Value>,
    },
    Bare(BTreeMap<String, serde_json::Value>),
}

/// Document types grouped by platform, in catalogue order
#[derive(Debug, Clone, Default)]
pub struct TypeCatalogue {
    entries: BTreeMap<Platform, Vec<DocumentTypeSpec>>,
}

impl TypeCatalogue {
    /// Build a catalogue from already parsed specs
    pub fn from_specs(specs: impl IntoIterator<Item = DocumentTypeSpec>) -> Self {
        let mut entries: BTreeMap<Platform, Vec<DocumentTypeSpec>> = BTreeMap::new();
        for spec in specs {
            entries.entry(spec.platform).or_default().push(spec);
        }
        Self { entries }
    }

    /// Parse the JSON catalogue text; `source` is only used in error messages
    pub fn parse(json: &str, source: &Path) -> Result<Self, ConfigError> {
        let raw: RawCatalogue =
            serde_json::from_str(json).map_err(|e| ConfigError::malformed(source, e))?;
        let platforms = match raw {
            RawCatalogue::Wrapped { platforms } => platforms,
            RawCatalogue::Bare(platforms) => platforms,
        };

        let mut specs = Vec::new();
        for (platform_name, value) in platforms {
            let platform = match platform_name.parse::<Platform>() {
                Ok(platform) => platform,
                Err(_) => {
                    warn!("Ignoring unknown platform '{}' in {:?}", platform_name, source);
                    continue;
                }
            };

            let types: Vec<RawDocumentType> = serde_json::from_value(value).map_err(|e| {
                ConfigError::malformed(source, format!("{} (platform '{}')", e, platform_name))
            })?;

            for raw_type in types {
                let output_format = raw_type.format.parse::<OutputFormat>().map_err(|e| {
                    ConfigError::malformed(source, format!("{} (document type '{}')", e, raw_type.type_name))
                })?;
                specs.push(DocumentTypeSpec {
                    platform,
                    type_name: raw_type.type_name,
                    output_format,
                });
            }
        }

        Ok(Self::from_specs(specs))
    }

    /// Load the catalogue from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = FileManager::read_config_source(path)?;
        Self::parse(&json, path)
    }

    /// Document types for a platform (empty when the catalogue has none)
    pub fn types_for(&self, platform: Platform) -> &[DocumentTypeSpec] {
        self.entries.get(&platform).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

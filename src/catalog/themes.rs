/*!
 * Theme table loading.
 *
 * Themes are business topics (a category and a sub-theme) read from a CSV
 * file with `Theme Category` and `Sub-theme` columns. Other columns are ignored.
 */

use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::errors::ConfigError;
use crate::file_utils::FileManager;

/// A business topic to weave into generated content
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct ThemeEntry {
    #[serde(rename = "Theme Category")]
    pub category: String,
    #[serde(rename = "Sub-theme")]
    pub subtheme: String,
}

impl ThemeEntry {
    pub fn new(category: impl Into<String>, subtheme: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            subtheme: subtheme.into(),
        }
    }

    /// Whether the category or the sub-theme contains the keyword (case-sensitive)
    pub fn mentions(&self, keyword: &str) -> bool {
        self.category.contains(keyword) || self.subtheme.contains(keyword)
    }
}

impl fmt::Display for ThemeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.subtheme)
    }
}

/// Parse theme rows from CSV text; `source` is only used in error messages
pub fn parse_themes(csv_text: &str, source: &Path) -> Result<Vec<ThemeEntry>, ConfigError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let mut themes = Vec::new();
    for (row, record) in reader.deserialize::<ThemeEntry>().enumerate() {
        // Row numbers are 1-based and skip the header line
        let theme = record
            .map_err(|e| ConfigError::malformed(source, format!("row {}: {}", row + 2, e)))?;
        themes.push(theme);
    }

    Ok(themes)
}

/// Load the theme table from a CSV file
pub fn load_themes<P: AsRef<Path>>(path: P) -> Result<Vec<ThemeEntry>, ConfigError> {
    let path = path.as_ref();
    let csv_text = FileManager::read_config_source(path)?;
    parse_themes(&csv_text, path)
}

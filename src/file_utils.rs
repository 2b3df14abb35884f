use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::catalog::{OutputFormat, Platform};
use crate::errors::ConfigError;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: File stem for a document type ("Weekly Status Report" -> "weekly_status_report")
    pub fn document_slug(type_name: &str) -> String {
        type_name.replace(' ', "_").to_lowercase()
    }

    // @generates: Output path <output_dir>/<Platform>/<slug><ext>
    pub fn document_output_path<P: AsRef<Path>>(
        output_dir: P,
        platform: Platform,
        type_name: &str,
        format: OutputFormat,
    ) -> PathBuf {
        let mut filename = Self::document_slug(type_name);
        filename.push_str(format.extension());

        output_dir.as_ref().join(platform.display_name()).join(filename)
    }

    /// Read a configuration source, mapping failures to `ConfigError`
    pub fn read_config_source(path: &Path) -> std::result::Result<String, ConfigError> {
        fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
            _ => ConfigError::malformed(path, e),
        })
    }

    /// Write a string to a file, overwriting any previous content
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Write a generated document and return the path it landed at
    pub fn write_document<P: AsRef<Path>>(
        output_dir: P,
        platform: Platform,
        type_name: &str,
        format: OutputFormat,
        content: &str,
    ) -> Result<PathBuf> {
        let path = Self::document_output_path(output_dir, platform, type_name, format);
        Self::write_to_file(&path, content)?;
        Ok(path)
    }
}

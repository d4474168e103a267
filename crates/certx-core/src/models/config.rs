//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CertxError;
use crate::extraction::FieldSetVersion;

/// Main configuration for certx.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CertxConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Text source configuration.
    pub pdf: PdfConfig,

    /// Batch run configuration.
    pub batch: BatchConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Field set used when none is given on the command line.
    pub field_set: FieldSetVersion,
}

/// Text source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Drop whitespace-only lines before extraction.
    pub skip_blank_lines: bool,

    /// Minimum non-whitespace characters for a document to count as readable.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            skip_blank_lines: true,
            min_text_length: 1,
        }
    }
}

/// Batch run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Output table path.
    pub output: PathBuf,

    /// Number of documents processed in parallel.
    pub jobs: usize,

    /// Write an all-empty row for documents whose text could not be read.
    pub keep_unreadable: bool,

    /// Document extensions picked up in directory mode.
    pub extensions: Vec<String>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("extracted_data.csv"),
            jobs: 4,
            keep_unreadable: false,
            extensions: vec!["pdf".to_string(), "txt".to_string()],
        }
    }
}

impl CertxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| CertxError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| CertxError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

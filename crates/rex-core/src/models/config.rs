//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for rex.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RexConfig {
    /// Document loading configuration.
    pub document: DocumentConfig,

    /// Resume extraction configuration.
    pub extraction: ExtractionConfig,

    /// Upload server configuration.
    pub server: ServerConfig,
}

/// Document loading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Largest document accepted, in bytes (0 = unlimited).
    pub max_file_size: usize,

    /// Minimum text length for a PDF to count as text-based.
    pub min_text_length: usize,

    /// Try to open PDFs encrypted with an empty user password.
    pub decrypt_empty_password: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024,
            min_text_length: 50,
            decrypt_empty_password: true,
        }
    }
}

/// Resume extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of leading lines searched for the candidate name.
    pub name_scan_lines: usize,

    /// Minimum digit count for a phone number candidate.
    pub min_phone_digits: usize,

    /// Skill section items must be longer than this.
    pub min_skill_len: usize,

    /// Skill section items must be shorter than this.
    pub max_skill_len: usize,

    /// Additional skill keywords matched alongside the built-in vocabulary.
    pub extra_skills: Vec<String>,

    /// Year used for "present" in date ranges (defaults to the current year).
    pub reference_year: Option<i32>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            name_scan_lines: 5,
            min_phone_digits: 10,
            min_skill_len: 2,
            max_skill_len: 30,
            extra_skills: Vec::new(),
            reference_year: None,
        }
    }
}

/// Upload server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Largest upload accepted, in bytes.
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            max_upload_size: 10 * 1024 * 1024,
        }
    }
}

impl RexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: RexConfig =
            serde_json::from_str(r#"{"extraction": {"reference_year": 2024}}"#).unwrap();

        assert_eq!(config.extraction.reference_year, Some(2024));
        assert_eq!(config.extraction.name_scan_lines, 5);
        assert_eq!(config.extraction.min_phone_digits, 10);
        assert_eq!(config.server.port, 8501);
        assert!(config.document.decrypt_empty_password);
    }
}

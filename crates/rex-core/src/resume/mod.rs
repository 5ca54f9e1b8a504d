//! Resume field extraction module.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, ResumeParser, RuleResumeParser};

use std::path::Path;

use tracing::info;

use crate::document::{load_document, DocumentFormat};
use crate::error::ExtractionError;
use crate::models::config::RexConfig;
use crate::models::resume::SourceType;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Load a document and extract a resume from it.
pub fn extract_resume(
    data: &[u8],
    format: DocumentFormat,
    config: &RexConfig,
) -> crate::Result<ExtractionResult> {
    let document = load_document(data, format, &config.document)?;
    let parser = RuleResumeParser::from_config(&config.extraction)?;

    let mut result = parser.parse(&document.text)?;
    result.resume.metadata.source = format.source_type();

    Ok(result)
}

/// Extract a resume from text typed or pasted by the user.
pub fn extract_text(text: &str, config: &RexConfig) -> crate::Result<ExtractionResult> {
    let parser = RuleResumeParser::from_config(&config.extraction)?;

    let mut result = parser.parse(text)?;
    result.resume.metadata.source = SourceType::Pasted;

    Ok(result)
}

/// Read a file, work out its format, and extract a resume from it.
pub fn extract_file(path: &Path, config: &RexConfig) -> crate::Result<ExtractionResult> {
    let data = std::fs::read(path)?;
    let file_name = path.file_name().and_then(|n| n.to_str());
    let format = DocumentFormat::detect(file_name, None, &data)?;

    info!("Extracting {} as {:?}", path.display(), format);
    extract_resume(&data, format, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DocumentError, RexError};
    use crate::sample::SAMPLE_RESUME;

    fn config() -> RexConfig {
        let mut config = RexConfig::default();
        config.extraction.reference_year = Some(2026);
        config
    }

    #[test]
    fn test_extract_resume_from_text_bytes() {
        let result = extract_resume(SAMPLE_RESUME.as_bytes(), DocumentFormat::Text, &config()).unwrap();
        assert_eq!(result.resume.metadata.source, SourceType::Text);
        assert_eq!(result.resume.name.as_deref(), Some("John Doe"));
        assert_eq!(result.resume.total_experience_years, Some(7));
    }

    #[test]
    fn test_extract_text_marks_pasted() {
        let result = extract_text(SAMPLE_RESUME, &config()).unwrap();
        assert_eq!(result.resume.metadata.source, SourceType::Pasted);
    }

    #[test]
    fn test_extract_text_rejects_blank_input() {
        let result = extract_text("   ", &config());
        assert!(matches!(result, Err(RexError::Extraction(ExtractionError::NoText))));
    }

    #[test]
    fn test_extract_resume_surfaces_document_errors() {
        let result = extract_resume(b"PK\x03\x04 broken", DocumentFormat::Docx, &config());
        assert!(matches!(result, Err(RexError::Document(DocumentError::Docx(_)))));
    }

    #[test]
    fn test_extract_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, SAMPLE_RESUME).unwrap();

        let result = extract_file(&path, &config()).unwrap();
        assert_eq!(result.resume.email.as_deref(), Some("john.doe@email.com"));
        assert_eq!(result.resume.metadata.source, SourceType::Text);
    }
}

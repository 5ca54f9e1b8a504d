//! Document loading: PDF, DOCX and plain text to normalized text.

mod docx;
mod pdf;
mod text;

pub use docx::DocxLoader;
pub use pdf::{PdfContent, PdfExtractor, PdfLoader, PdfType};
pub use text::TextLoader;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::DocumentError;
use crate::models::config::DocumentConfig;
use crate::models::resume::SourceType;

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

const PDF_MAGIC: &[u8] = b"%PDF";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Text,
}

impl DocumentFormat {
    /// Format from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "txt" | "text" | "md" => Some(DocumentFormat::Text),
            _ => None,
        }
    }

    /// Format from a MIME type as sent by browsers.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_lowercase();
        match essence.as_str() {
            "application/pdf" => Some(DocumentFormat::Pdf),
            DOCX_MIME => Some(DocumentFormat::Docx),
            "text/plain" | "text/markdown" => Some(DocumentFormat::Text),
            _ => None,
        }
    }

    /// Guess the format from magic bytes.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(PDF_MAGIC) {
            return Some(DocumentFormat::Pdf);
        }
        if data.starts_with(ZIP_MAGIC) {
            return Some(DocumentFormat::Docx);
        }

        let prefix = &data[..data.len().min(4096)];
        let looks_textual = match std::str::from_utf8(prefix) {
            Ok(_) => true,
            // A multi-byte character cut off at the end of the prefix is fine.
            Err(e) => e.error_len().is_none(),
        };
        looks_textual.then_some(DocumentFormat::Text)
    }

    /// Work out the format from whatever the caller knows: MIME type first,
    /// then file extension, then magic bytes.
    pub fn detect(file_name: Option<&str>, mime: Option<&str>, data: &[u8]) -> Result<Self> {
        if let Some(format) = mime.and_then(Self::from_mime) {
            debug!("Detected {:?} from MIME type", format);
            return Ok(format);
        }

        let extension = file_name
            .and_then(|name| std::path::Path::new(name).extension())
            .and_then(|ext| ext.to_str());

        if let Some(ext) = extension {
            if let Some(format) = Self::from_extension(ext) {
                debug!("Detected {:?} from extension .{}", format, ext);
                return Ok(format);
            }
        }

        match Self::sniff(data) {
            // An unknown extension on a binary-looking file is not something we read.
            Some(DocumentFormat::Text) if extension.is_some() => Err(
                DocumentError::UnsupportedFormat(extension.unwrap_or_default().to_string()),
            ),
            Some(format) => {
                debug!("Detected {:?} from content", format);
                Ok(format)
            }
            None => Err(DocumentError::UnsupportedFormat(
                extension.unwrap_or("binary data").to_string(),
            )),
        }
    }

    /// Source type recorded in extraction metadata.
    pub fn source_type(&self) -> SourceType {
        match self {
            DocumentFormat::Pdf => SourceType::Pdf,
            DocumentFormat::Docx => SourceType::Docx,
            DocumentFormat::Text => SourceType::Text,
        }
    }
}

/// Text pulled out of a document.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// Format the text was read from.
    pub format: DocumentFormat,
    /// Normalized text.
    pub text: String,
    /// Page count, for paged formats.
    pub page_count: Option<u32>,
}

/// Trait for document-to-text loaders.
pub trait DocumentLoader {
    /// Format this loader reads.
    fn format(&self) -> DocumentFormat;

    /// Convert document bytes into text.
    fn load(&self, data: &[u8]) -> Result<LoadedDocument>;
}

/// Loader for a document format.
pub fn loader_for(format: DocumentFormat, config: &DocumentConfig) -> Box<dyn DocumentLoader> {
    match format {
        DocumentFormat::Pdf => Box::new(PdfLoader::new(config.clone())),
        DocumentFormat::Docx => Box::new(DocxLoader::new()),
        DocumentFormat::Text => Box::new(TextLoader),
    }
}

/// Load a document of a known format into normalized text.
pub fn load_document(
    data: &[u8],
    format: DocumentFormat,
    config: &DocumentConfig,
) -> Result<LoadedDocument> {
    if config.max_file_size > 0 && data.len() > config.max_file_size {
        return Err(DocumentError::TooLarge {
            size: data.len(),
            limit: config.max_file_size,
        });
    }

    let loader = loader_for(format, config);
    debug!("Loading {} bytes as {:?}", data.len(), loader.format());

    let mut document = loader.load(data)?;
    document.text = normalize_text(&document.text);
    if document.text.trim().is_empty() {
        return Err(DocumentError::Empty);
    }

    info!(
        "Loaded {:?} document: {} bytes -> {} chars of text",
        format,
        data.len(),
        document.text.len()
    );

    Ok(document)
}

/// Normalize line endings, strip trailing whitespace, and collapse runs of
/// blank lines to a single blank line.
pub fn normalize_text(text: &str) -> String {
    let unified = text
        .replace("\r\n", "\n")
        .replace(['\r', '\u{000C}'], "\n")
        .replace('\u{00A0}', " ");

    let mut output = String::with_capacity(unified.len());
    let mut blank_run = 0;

    for line in unified.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        output.push_str(line);
        output.push('\n');
    }

    output.trim_matches('\n').to_string()
}

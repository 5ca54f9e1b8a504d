//! Error types for the rex-core library.

use thiserror::Error;

/// Main error type for the rex library.
#[derive(Error, Debug)]
pub enum RexError {
    /// Document loading error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Resume extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to turning document bytes into text.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Pdf(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted with a non-empty password.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The PDF only contains images; there is no text layer to read.
    #[error("PDF appears to be scanned (no embedded text); OCR is not supported")]
    Scanned,

    /// The DOCX container could not be read.
    #[error("failed to read DOCX archive: {0}")]
    Docx(String),

    /// The DOCX XML could not be parsed.
    #[error("failed to parse DOCX XML: {0}")]
    Xml(String),

    /// Plain text was not valid UTF-8.
    #[error("text is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// The document is larger than the configured limit.
    #[error("document is {size} bytes, limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    /// The file type is not one we can read.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The document was read but contained no text.
    #[error("document contains no text")]
    Empty,
}

/// Errors related to resume field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The input text was empty or whitespace only.
    #[error("no resume text provided")]
    NoText,

    /// A configured skill or pattern could not be used.
    #[error("invalid extraction setting {field}: {reason}")]
    InvalidConfig { field: String, reason: String },
}

/// Errors related to exporting an extracted resume.
#[derive(Error, Debug)]
pub enum ExportError {
    /// JSON serialization failed.
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization failed.
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Unknown export format name.
    #[error("unknown export format: {0}")]
    UnknownFormat(String),

    /// The CSV writer produced bytes that are not UTF-8.
    #[error("CSV output is not valid UTF-8")]
    Utf8,
}

/// Result type for the rex library.
pub type Result<T> = std::result::Result<T, RexError>;

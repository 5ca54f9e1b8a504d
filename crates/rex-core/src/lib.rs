//! Core library for resume entity extraction.
//!
//! This crate provides:
//! - Document loading (PDF, DOCX and plain text to normalized text)
//! - Rule-based field extraction (name, contact details, links, skills,
//!   education, work history, total experience, highest education)
//! - Export as JSON, CSV and a plain text report

pub mod clock;
pub mod document;
pub mod error;
pub mod export;
pub mod models;
pub mod resume;
pub mod sample;

pub use document::{load_document, DocumentFormat, LoadedDocument};
pub use error::{RexError, Result};
pub use export::{export, ExportFormat};
pub use models::config::RexConfig;
pub use models::resume::{
    EducationEntry, EducationLevel, ExperienceEntry, Link, LinkKind, Resume, SkillCategory,
    SourceType,
};
pub use resume::{
    extract_file, extract_resume, extract_text, ExtractionResult, ResumeParser, RuleResumeParser,
};
pub use sample::SAMPLE_RESUME;

//! Rule-based field extractors for resumes.

pub mod contact;
pub mod education;
pub mod experience;
pub mod name;
pub mod patterns;
pub mod sections;
pub mod skills;
pub mod terms;

pub use contact::{extract_email, extract_links, extract_phone, EmailExtractor, LinkExtractor, PhoneExtractor};
pub use education::{detect_education_level, highest_education, EducationExtractor};
pub use experience::{total_experience_years, ExperienceExtractor};
pub use name::{NameRecognizer, RuleNameRecognizer};
pub use sections::{split_sections, Section, SectionKind};
pub use skills::{extract_skills, SkillExtractor, SKILL_VOCABULARY};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Extraction context with confidence scores.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

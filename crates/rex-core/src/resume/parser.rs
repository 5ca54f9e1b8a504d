//! Rule-based resume parser.

use tracing::{debug, info};

use crate::clock::{self, Stopwatch};
use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::resume::*;

use super::rules::{
    experience::experience_scope,
    highest_education, split_sections, total_experience_years, EducationExtractor, EmailExtractor,
    ExperienceExtractor, FieldExtractor, LinkExtractor, NameRecognizer, PhoneExtractor,
    RuleNameRecognizer, SkillExtractor,
};
use super::Result;

/// Result of resume extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted resume data.
    pub resume: Resume,
    /// Text the resume was extracted from.
    pub raw_text: String,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for resume parsing.
pub trait ResumeParser {
    /// Parse a resume from text.
    fn parse(&self, text: &str) -> Result<ExtractionResult>;
}

/// Resume parser built from the rule extractors.
pub struct RuleResumeParser {
    name: Box<dyn NameRecognizer>,
    email: EmailExtractor,
    phone: PhoneExtractor,
    links: LinkExtractor,
    skills: SkillExtractor,
    education: EducationExtractor,
    experience: ExperienceExtractor,
    /// Year "present" resolves to; the current year when unset.
    reference_year: Option<i32>,
}

impl RuleResumeParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self {
            name: Box::new(RuleNameRecognizer::new()),
            email: EmailExtractor::new(),
            phone: PhoneExtractor::new(),
            links: LinkExtractor::new(),
            skills: SkillExtractor::new(),
            education: EducationExtractor::new(),
            experience: ExperienceExtractor::new(),
            reference_year: None,
        }
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        if config.name_scan_lines == 0 {
            return Err(ExtractionError::InvalidConfig {
                field: "name_scan_lines".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if config.min_skill_len >= config.max_skill_len {
            return Err(ExtractionError::InvalidConfig {
                field: "max_skill_len".to_string(),
                reason: format!(
                    "must be greater than min_skill_len ({})",
                    config.min_skill_len
                ),
            });
        }
        if let Some(blank) = config.extra_skills.iter().position(|s| s.trim().is_empty()) {
            return Err(ExtractionError::InvalidConfig {
                field: format!("extra_skills[{}]", blank),
                reason: "skill names cannot be empty".to_string(),
            });
        }

        let mut parser = Self::new()
            .with_name_recognizer(RuleNameRecognizer::new().with_scan_lines(config.name_scan_lines))
            .with_min_phone_digits(config.min_phone_digits)
            .with_extra_skills(&config.extra_skills);
        parser.skills = parser
            .skills
            .with_length_bounds(config.min_skill_len, config.max_skill_len);
        parser.reference_year = config.reference_year;

        Ok(parser)
    }

    /// Set the year "present" resolves to.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// Add skills to the keyword vocabulary.
    pub fn with_extra_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.skills = self.skills.with_extra_skills(skills);
        self
    }

    /// Set the minimum digit count for phone numbers.
    pub fn with_min_phone_digits(mut self, digits: usize) -> Self {
        self.phone = self.phone.with_min_digits(digits);
        self
    }

    /// Replace the name recognizer.
    pub fn with_name_recognizer(mut self, recognizer: impl NameRecognizer + 'static) -> Self {
        self.name = Box::new(recognizer);
        self
    }

    fn reference_year(&self) -> i32 {
        self.reference_year
            .unwrap_or_else(clock::current_year)
    }
}

impl Default for RuleResumeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeParser for RuleResumeParser {
    fn parse(&self, text: &str) -> Result<ExtractionResult> {
        let watch = Stopwatch::start();

        if text.trim().is_empty() {
            return Err(ExtractionError::NoText);
        }

        info!("Parsing resume from {} characters of text", text.len());

        let sections = split_sections(text);

        let name = self.name.recognize(text).map(|m| m.value);
        let email = self.email.extract(text).map(|m| m.value);
        let phone = self.phone.extract(text).map(|m| m.value);
        let links = self
            .links
            .extract_all(text)
            .into_iter()
            .map(|m| m.value)
            .collect();

        let skills: Vec<String> = self
            .skills
            .extract_from_sections(text, &sections)
            .into_iter()
            .map(|m| m.value)
            .collect();

        let education: Vec<EducationEntry> = self
            .education
            .extract_from_sections(&sections)
            .into_iter()
            .map(|m| m.value)
            .collect();

        let experience: Vec<ExperienceEntry> = self
            .experience
            .extract_from_sections(&sections)
            .into_iter()
            .map(|m| m.value)
            .collect();

        let total_experience_years =
            total_experience_years(&experience_scope(text, &sections), self.reference_year());
        let highest_education = highest_education(text, &sections);

        let mut resume = Resume {
            name,
            email,
            phone,
            links,
            skills,
            education,
            experience,
            total_experience_years,
            highest_education,
            metadata: ExtractionMetadata::default(),
        };

        // Calculate overall confidence
        let mut confidence = 1.0f32;
        if resume.name.is_none() {
            confidence -= 0.2;
        }
        if resume.email.is_none() {
            confidence -= 0.15;
        }
        if resume.phone.is_none() {
            confidence -= 0.1;
        }
        if resume.skills.is_empty() {
            confidence -= 0.2;
        }
        if resume.experience.is_empty() {
            confidence -= 0.2;
        }
        if resume.education.is_empty() {
            confidence -= 0.15;
        }

        let warnings = resume.validate();
        let processing_time_ms = watch.elapsed_ms();

        resume.metadata = ExtractionMetadata {
            confidence: confidence.max(0.0),
            source: SourceType::Unknown,
            processing_time_ms: Some(processing_time_ms),
            warnings: warnings.clone(),
            missing_fields: resume.missing_fields(),
        };

        debug!(
            "Extracted resume for {} with confidence {:.2} ({} skills, {} jobs, {} degrees)",
            resume.name_or_placeholder(),
            resume.metadata.confidence,
            resume.skills.len(),
            resume.experience.len(),
            resume.education.len()
        );

        Ok(ExtractionResult {
            resume,
            raw_text: text.to_string(),
            warnings,
            processing_time_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::SAMPLE_RESUME;
    use pretty_assertions::assert_eq;

    fn parse_sample() -> Resume {
        RuleResumeParser::new()
            .with_reference_year(2026)
            .parse(SAMPLE_RESUME)
            .unwrap()
            .resume
    }

    #[test]
    fn test_parse_sample_contact() {
        let resume = parse_sample();

        assert_eq!(resume.name.as_deref(), Some("John Doe"));
        assert_eq!(resume.email.as_deref(), Some("john.doe@email.com"));
        assert_eq!(resume.phone.as_deref(), Some("+1-555-123-4567"));

        let links: Vec<(&str, LinkKind)> =
            resume.links.iter().map(|l| (l.url.as_str(), l.kind)).collect();
        assert_eq!(
            links,
            vec![
                ("linkedin.com/in/johndoe", LinkKind::LinkedIn),
                ("github.com/johndoe", LinkKind::GitHub),
            ]
        );
    }

    #[test]
    fn test_parse_sample_skills() {
        let resume = parse_sample();
        assert_eq!(
            resume.skills,
            vec![
                "AWS", "C++", "CI/CD", "Django", "Docker", "Flask", "Git", "Java", "JavaScript",
                "Jenkins", "Kubernetes", "Microservices", "MongoDB", "Node.js", "PostgreSQL",
                "Python", "React", "Redis", "Terraform",
            ]
        );
    }

    #[test]
    fn test_parse_sample_history() {
        let resume = parse_sample();

        let jobs: Vec<(&str, &str, &str)> = resume
            .experience
            .iter()
            .map(|e| (e.title.as_str(), e.company.as_str(), e.duration.as_str()))
            .collect();
        assert_eq!(
            jobs,
            vec![
                ("Senior Software Engineer", "Tech Corp", "2021 - Present"),
                ("Software Engineer", "StartupXYZ", "2019 - 2021"),
            ]
        );

        let schools: Vec<(&str, &str)> = resume
            .education
            .iter()
            .map(|e| (e.institution.as_str(), e.year.as_str()))
            .collect();
        assert_eq!(schools, vec![("Stanford University", "2019"), ("MIT", "2017")]);

        assert_eq!(resume.highest_education, EducationLevel::Masters);
        assert_eq!(resume.total_experience_years, Some(7));
        assert_eq!(resume.total_experience_display(), "7 years");
    }

    #[test]
    fn test_parse_sample_metadata() {
        let result = RuleResumeParser::new()
            .with_reference_year(2026)
            .parse(SAMPLE_RESUME)
            .unwrap();

        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        assert!(result.resume.metadata.missing_fields.is_empty());
        assert_eq!(result.resume.metadata.confidence, 1.0);
        assert_eq!(result.raw_text, SAMPLE_RESUME);
    }

    #[test]
    fn test_empty_text_is_an_error() {
        let parser = RuleResumeParser::new();
        assert!(matches!(parser.parse(""), Err(ExtractionError::NoText)));
        assert!(matches!(parser.parse("  \n\t "), Err(ExtractionError::NoText)));
    }

    #[test]
    fn test_sparse_resume_warnings_and_confidence() {
        let result = RuleResumeParser::new()
            .parse("reach me at someone@example.com for details about the role")
            .unwrap();

        let resume = &result.resume;
        assert_eq!(resume.email.as_deref(), Some("someone@example.com"));
        assert_eq!(resume.name, None);
        assert_eq!(
            resume.metadata.missing_fields,
            vec!["name", "phone", "skills", "experience", "education"]
        );
        assert!(result.warnings.contains(&"Missing candidate name".to_string()));
        assert!((resume.metadata.confidence - 0.15).abs() < 1e-6);
        assert_eq!(resume.total_experience_years, None);
        assert_eq!(resume.highest_education, EducationLevel::NotSpecified);
    }

    #[test]
    fn test_from_config() {
        let config = ExtractionConfig {
            extra_skills: vec!["Rust".to_string()],
            reference_year: Some(2030),
            ..ExtractionConfig::default()
        };
        let parser = RuleResumeParser::from_config(&config).unwrap();
        let resume = parser
            .parse("Jane Roe\nExperience\nEngineer | Ferrous | 2025 - Present\n- Rust services")
            .unwrap()
            .resume;

        assert_eq!(resume.skills, vec!["Rust"]);
        assert_eq!(resume.total_experience_years, Some(5));
    }

    #[test]
    fn test_from_config_rejects_bad_settings() {
        let config = ExtractionConfig {
            min_skill_len: 30,
            max_skill_len: 3,
            ..ExtractionConfig::default()
        };
        assert!(matches!(
            RuleResumeParser::from_config(&config),
            Err(ExtractionError::InvalidConfig { .. })
        ));

        let config = ExtractionConfig {
            extra_skills: vec!["  ".to_string()],
            ..ExtractionConfig::default()
        };
        assert!(matches!(
            RuleResumeParser::from_config(&config),
            Err(ExtractionError::InvalidConfig { field, .. }) if field == "extra_skills[0]"
        ));
    }

    struct FixedName(&'static str);

    impl NameRecognizer for FixedName {
        fn recognize(&self, _text: &str) -> Option<crate::resume::rules::ExtractionMatch<String>> {
            Some(crate::resume::rules::ExtractionMatch::new(self.0.to_string(), 1.0, self.0))
        }
    }

    #[test]
    fn test_custom_name_recognizer() {
        let resume = RuleResumeParser::new()
            .with_name_recognizer(FixedName("Grace Hopper"))
            .parse("COBOL, compilers")
            .unwrap()
            .resume;
        assert_eq!(resume.name.as_deref(), Some("Grace Hopper"));
    }
}

//! Resume data models produced by the extraction pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder shown for scalar fields that could not be extracted.
pub const NOT_FOUND: &str = "Not found";

/// A complete extracted resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    /// Candidate's full name.
    pub name: Option<String>,

    /// First email address in the document.
    pub email: Option<String>,

    /// First phone number in the document.
    pub phone: Option<String>,

    /// Web links (LinkedIn, GitHub, portfolio), in order of appearance.
    #[serde(default)]
    pub links: Vec<Link>,

    /// Technical skills, sorted case-insensitively.
    #[serde(default)]
    pub skills: Vec<String>,

    /// Education entries from the Education section.
    #[serde(default)]
    pub education: Vec<EducationEntry>,

    /// Work history from the Experience section.
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,

    /// Total years of experience summed over date ranges.
    pub total_experience_years: Option<u32>,

    /// Highest education level mentioned.
    #[serde(default)]
    pub highest_education: EducationLevel,

    /// Extraction metadata.
    #[serde(default)]
    pub metadata: ExtractionMetadata,
}

impl Resume {
    /// Name or the "Not found" placeholder.
    pub fn name_or_placeholder(&self) -> &str {
        self.name.as_deref().unwrap_or(NOT_FOUND)
    }

    /// Email or the "Not found" placeholder.
    pub fn email_or_placeholder(&self) -> &str {
        self.email.as_deref().unwrap_or(NOT_FOUND)
    }

    /// Phone or the "Not found" placeholder.
    pub fn phone_or_placeholder(&self) -> &str {
        self.phone.as_deref().unwrap_or(NOT_FOUND)
    }

    /// Total experience formatted as "N years", or "N/A".
    pub fn total_experience_display(&self) -> String {
        match self.total_experience_years {
            Some(years) => format!("{} years", years),
            None => "N/A".to_string(),
        }
    }

    /// Group skills into display categories, skipping empty ones.
    pub fn skill_categories(&self) -> Vec<(SkillCategory, Vec<String>)> {
        SkillCategory::ALL
            .iter()
            .filter_map(|category| {
                let skills: Vec<String> = self
                    .skills
                    .iter()
                    .filter(|s| SkillCategory::classify(s) == *category)
                    .cloned()
                    .collect();
                (!skills.is_empty()).then_some((*category, skills))
            })
            .collect()
    }

    /// Names of the fields that could not be extracted.
    pub fn missing_fields(&self) -> Vec<String> {
        let checks = [
            ("name", self.name.is_none()),
            ("email", self.email.is_none()),
            ("phone", self.phone.is_none()),
            ("skills", self.skills.is_empty()),
            ("experience", self.experience.is_empty()),
            ("education", self.education.is_empty()),
        ];

        checks
            .iter()
            .filter(|(_, missing)| *missing)
            .map(|(field, _)| field.to_string())
            .collect()
    }

    /// Check the extracted data and return any gaps found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.name.is_none() {
            issues.push("Missing candidate name".to_string());
        }
        if self.email.is_none() {
            issues.push("Missing email address".to_string());
        }
        if self.phone.is_none() {
            issues.push("Missing phone number".to_string());
        }
        if self.skills.is_empty() {
            issues.push("No skills detected".to_string());
        }
        if self.experience.is_empty() {
            issues.push("No experience entries".to_string());
        }
        if self.education.is_empty() {
            issues.push("No education entries".to_string());
        }

        issues
    }
}

/// A web link found in the resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Link as written in the document.
    pub url: String,
    /// What the link points at.
    pub kind: LinkKind,
}

impl Link {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let kind = LinkKind::classify(&url);
        Self { url, kind }
    }
}

/// Kind of web link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    LinkedIn,
    GitHub,
    Website,
}

impl LinkKind {
    /// Classify a link by its host.
    pub fn classify(url: &str) -> Self {
        let lower = url.to_lowercase();
        if lower.contains("linkedin.com") {
            LinkKind::LinkedIn
        } else if lower.contains("github.com") || lower.contains("github.io") {
            LinkKind::GitHub
        } else {
            LinkKind::Website
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LinkKind::LinkedIn => "LinkedIn",
            LinkKind::GitHub => "GitHub",
            LinkKind::Website => "Website",
        }
    }
}

/// One education entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    /// Degree line, e.g. "Master of Science in Computer Science".
    pub degree: String,
    /// Institution name, empty when not found.
    pub institution: String,
    /// Graduation year, empty when not found.
    pub year: String,
}

/// One work experience entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    /// Job title.
    pub title: String,
    /// Employer.
    pub company: String,
    /// Date range as written, e.g. "2021 - Present".
    pub duration: String,
    /// Remaining lines of the entry.
    pub description: String,
}

/// Education level, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    #[default]
    NotSpecified,
    Diploma,
    Bachelors,
    Masters,
    Phd,
}

impl EducationLevel {
    pub fn display(&self) -> &'static str {
        match self {
            EducationLevel::Phd => "PhD",
            EducationLevel::Masters => "Master's Degree",
            EducationLevel::Bachelors => "Bachelor's Degree",
            EducationLevel::Diploma => "Diploma",
            EducationLevel::NotSpecified => "Not specified",
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

/// Display category for a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Programming,
    Web,
    Database,
    Cloud,
    Other,
}

impl SkillCategory {
    /// All categories in display order.
    pub const ALL: [SkillCategory; 5] = [
        SkillCategory::Programming,
        SkillCategory::Web,
        SkillCategory::Database,
        SkillCategory::Cloud,
        SkillCategory::Other,
    ];

    /// Categorize a skill by substring, first matching category wins.
    pub fn classify(skill: &str) -> Self {
        const PROGRAMMING: &[&str] = &["python", "java", "javascript", "c++", "c#"];
        const WEB: &[&str] = &["react", "angular", "vue", "node", "django", "flask"];
        const DATABASE: &[&str] = &["sql", "mongodb", "postgres", "mysql", "redis"];
        const CLOUD: &[&str] = &["aws", "azure", "gcp", "docker", "kubernetes"];

        let lower = skill.to_lowercase();
        let hit = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

        if hit(PROGRAMMING) {
            SkillCategory::Programming
        } else if hit(WEB) {
            SkillCategory::Web
        } else if hit(DATABASE) {
            SkillCategory::Database
        } else if hit(CLOUD) {
            SkillCategory::Cloud
        } else {
            SkillCategory::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillCategory::Programming => "Programming",
            SkillCategory::Web => "Web",
            SkillCategory::Database => "Database",
            SkillCategory::Cloud => "Cloud",
            SkillCategory::Other => "Other",
        }
    }
}

/// Metadata about the extraction process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Overall extraction confidence (0.0 - 1.0).
    pub confidence: f32,

    /// Where the text came from.
    pub source: SourceType,

    /// Processing time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,

    /// Warnings or issues encountered during extraction.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    /// Fields that could not be extracted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,
}

/// Source document type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Pdf,
    Docx,
    Text,
    /// Text pasted directly rather than uploaded as a file.
    Pasted,
    #[default]
    Unknown,
}

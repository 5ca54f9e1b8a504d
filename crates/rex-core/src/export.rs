//! Export of extracted resumes as JSON, CSV and a plain text report.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::models::resume::Resume;

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Downloadable export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Json,
    Csv,
    Report,
}

impl ExportFormat {
    /// Suggested file name for a download.
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Json => "resume_data.json",
            ExportFormat::Csv => "resume_data.csv",
            ExportFormat::Report => "resume_report.txt",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Report => "text/plain",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "report" | "txt" => Ok(ExportFormat::Report),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Render a resume in the given format.
pub fn export(resume: &Resume, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => to_json(resume),
        ExportFormat::Csv => to_csv(resume),
        ExportFormat::Report => Ok(to_report(resume)),
    }
}

/// Pretty-printed JSON.
pub fn to_json(resume: &Resume) -> Result<String> {
    Ok(serde_json::to_string_pretty(resume)?)
}

/// One-row CSV summary.
pub fn to_csv(resume: &Resume) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["Name", "Email", "Phone", "Skills", "Experience", "Education"])?;
    wtr.write_record([
        resume.name.as_deref().unwrap_or_default(),
        resume.email.as_deref().unwrap_or_default(),
        resume.phone.as_deref().unwrap_or_default(),
        resume.skills.join(", ").as_str(),
        resume.total_experience_display().as_str(),
        resume.highest_education.display(),
    ])?;

    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))?;
    String::from_utf8(bytes).map_err(|_| ExportError::Utf8)
}

/// Plain text analysis report.
pub fn to_report(resume: &Resume) -> String {
    let mut output = String::new();

    output.push_str("RESUME ANALYSIS REPORT\n");
    output.push_str(&format!("{}\n\n", "=".repeat(50)));

    output.push_str("PERSONAL INFORMATION\n");
    output.push_str(&format!("Name: {}\n", resume.name_or_placeholder()));
    output.push_str(&format!("Email: {}\n", resume.email_or_placeholder()));
    output.push_str(&format!("Phone: {}\n", resume.phone_or_placeholder()));
    for link in &resume.links {
        output.push_str(&format!("{}: {}\n", link.kind.label(), link.url));
    }
    output.push('\n');

    output.push_str(&format!("SKILLS ({})\n", resume.skills.len()));
    for skill in &resume.skills {
        output.push_str(&format!("- {}\n", skill));
    }
    output.push('\n');

    output.push_str("EXPERIENCE\n");
    output.push_str(&format!("Total Experience: {}\n", resume.total_experience_display()));
    for job in &resume.experience {
        output.push_str(&format!("- {}", job.title));
        if !job.company.is_empty() {
            output.push_str(&format!(" at {}", job.company));
        }
        if !job.duration.is_empty() {
            output.push_str(&format!(" ({})", job.duration));
        }
        output.push('\n');
    }
    output.push('\n');

    output.push_str("EDUCATION\n");
    output.push_str(&format!("{}\n", resume.highest_education));
    for entry in &resume.education {
        output.push_str(&format!("- {}", entry.degree));
        if !entry.institution.is_empty() {
            output.push_str(&format!(", {}", entry.institution));
        }
        if !entry.year.is_empty() {
            output.push_str(&format!(" ({})", entry.year));
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{EducationEntry, EducationLevel, ExperienceEntry, Link};
    use pretty_assertions::assert_eq;

    fn resume() -> Resume {
        Resume {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            phone: None,
            links: vec![Link::new("github.com/jane")],
            skills: vec!["Python".to_string(), "Rust".to_string()],
            education: vec![EducationEntry {
                degree: "BSc Computer Science".to_string(),
                institution: "MIT".to_string(),
                year: "2015".to_string(),
            }],
            experience: vec![ExperienceEntry {
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                duration: "2015 - 2020".to_string(),
                description: String::new(),
            }],
            total_experience_years: Some(5),
            highest_education: EducationLevel::Bachelors,
            ..Resume::default()
        }
    }

    #[test]
    fn test_format_names() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Report);
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(ExportError::UnknownFormat(name)) if name == "xml"
        ));
        assert_eq!(ExportFormat::Csv.file_name(), "resume_data.csv");
        assert_eq!(ExportFormat::Report.mime_type(), "text/plain");
    }

    #[test]
    fn test_to_csv() {
        let csv = to_csv(&resume()).unwrap();
        assert_eq!(
            csv,
            "Name,Email,Phone,Skills,Experience,Education\n\
             Jane Doe,jane@example.com,,\"Python, Rust\",5 years,Bachelor's Degree\n"
        );
    }

    #[test]
    fn test_to_json_round_trips() {
        let json = to_json(&resume()).unwrap();
        let back: Resume = serde_json::from_str(&json).unwrap();
        assert_eq!(back, resume());
    }

    #[test]
    fn test_to_report() {
        let report = to_report(&resume());
        let expected = "RESUME ANALYSIS REPORT
==================================================

PERSONAL INFORMATION
Name: Jane Doe
Email: jane@example.com
Phone: Not found
GitHub: github.com/jane

SKILLS (2)
- Python
- Rust

EXPERIENCE
Total Experience: 5 years
- Engineer at Acme (2015 - 2020)

EDUCATION
Bachelor's Degree
- BSc Computer Science, MIT (2015)
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_empty_report_uses_placeholders() {
        let report = to_report(&Resume::default());
        assert!(report.contains("Name: Not found"));
        assert!(report.contains("SKILLS (0)"));
        assert!(report.contains("Total Experience: N/A"));
        assert!(report.contains("Not specified"));
    }
}

//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod extract;
pub mod sample;
pub mod serve;

use std::path::{Path, PathBuf};

use rex_core::models::resume::Resume;
use rex_core::{export, ExportFormat, RexConfig};
use tracing::debug;

/// Output format shared by the extraction commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text analysis report
    Report,
    /// Short plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Report | OutputFormat::Text => "txt",
        }
    }
}

/// Render a resume for terminal or file output.
pub fn format_resume(resume: &Resume, format: OutputFormat) -> anyhow::Result<String> {
    let output = match format {
        OutputFormat::Json => export(resume, ExportFormat::Json)?,
        OutputFormat::Csv => export(resume, ExportFormat::Csv)?,
        OutputFormat::Report => export(resume, ExportFormat::Report)?,
        OutputFormat::Text => format_resume_text(resume),
    };
    Ok(output)
}

/// Compact summary shown by `--format text`.
fn format_resume_text(resume: &Resume) -> String {
    let mut output = String::new();

    output.push_str(&format!("Name:       {}\n", resume.name_or_placeholder()));
    output.push_str(&format!("Email:      {}\n", resume.email_or_placeholder()));
    output.push_str(&format!("Phone:      {}\n", resume.phone_or_placeholder()));
    output.push_str(&format!("Experience: {}\n", resume.total_experience_display()));
    output.push_str(&format!("Education:  {}\n", resume.highest_education));

    if !resume.links.is_empty() {
        output.push_str("\nLinks:\n");
        for link in &resume.links {
            output.push_str(&format!("  {:<10} {}\n", link.kind.label(), link.url));
        }
    }

    if !resume.skills.is_empty() {
        output.push_str(&format!("\nSkills ({}):\n", resume.skills.len()));
        for (category, skills) in resume.skill_categories() {
            output.push_str(&format!("  {:<12} {}\n", category.label(), skills.join(", ")));
        }
    }

    if !resume.experience.is_empty() {
        output.push_str("\nWork history:\n");
        for job in &resume.experience {
            output.push_str(&format!("  {}", job.title));
            if !job.company.is_empty() {
                output.push_str(&format!(" at {}", job.company));
            }
            if !job.duration.is_empty() {
                output.push_str(&format!(" ({})", job.duration));
            }
            output.push('\n');
        }
    }

    if !resume.education.is_empty() {
        output.push_str("\nEducation history:\n");
        for entry in &resume.education {
            output.push_str(&format!("  {}", entry.degree));
            if !entry.institution.is_empty() {
                output.push_str(&format!(", {}", entry.institution));
            }
            if !entry.year.is_empty() {
                output.push_str(&format!(" ({})", entry.year));
            }
            output.push('\n');
        }
    }

    output
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rex")
        .join("config.json")
}

/// Path the commands read configuration from: `-c` when given, else the default.
pub fn config_file_path(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load configuration from `-c`, the default file if present, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RexConfig> {
    if let Some(path) = config_path {
        return read_config(Path::new(path));
    }

    let path = default_config_path();
    if path.exists() {
        read_config(&path)
    } else {
        debug!("No config file at {}, using defaults", path.display());
        Ok(RexConfig::default())
    }
}

fn read_config(path: &Path) -> anyhow::Result<RexConfig> {
    debug!("Loading config from {}", path.display());
    RexConfig::from_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))
}

//! Batch command - extract entities from many resumes.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use rex_core::models::resume::Resume;
use rex_core::{extract_file, DocumentFormat, RexConfig};

use super::{format_resume, load_config, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    resume: Option<Resume>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Expand glob pattern, keeping only document types we can read
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .and_then(DocumentFormat::from_extension)
                .is_some()
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = process_single_file(&path, &config);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(resume) => {
                results.push(ProcessResult {
                    path,
                    resume: Some(resume),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        resume: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing {} failed: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.resume.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        let mut used = HashSet::new();
        for result in &successful {
            if let Some(resume) = &result.resume {
                let output_name = output_file_name(&result.path, args.format.extension(), &mut used);
                let output_path = output_dir.join(output_name);

                fs::write(&output_path, format_resume(resume, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Output file name for an input: the full input file name plus the format
/// extension, so `jane.pdf` and `jane.docx` do not overwrite each other.
/// Inputs with the same name from different directories get a numeric suffix.
fn output_file_name(path: &Path, extension: &str, used: &mut HashSet<String>) -> String {
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("resume");

    let mut name = format!("{}.{}", base, extension);
    let mut n = 2;
    while !used.insert(name.clone()) {
        name = format!("{}-{}.{}", base, n, extension);
        n += 1;
    }
    name
}

fn process_single_file(path: &Path, config: &RexConfig) -> anyhow::Result<Resume> {
    let result = extract_file(path, config)?;
    Ok(result.resume)
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "name",
        "email",
        "phone",
        "skills_count",
        "experience",
        "education",
        "confidence",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(resume) = &result.resume {
            wtr.write_record([
                filename,
                "success",
                resume.name.as_deref().unwrap_or_default(),
                resume.email.as_deref().unwrap_or_default(),
                resume.phone.as_deref().unwrap_or_default(),
                resume.skills.len().to_string().as_str(),
                resume.total_experience_display().as_str(),
                resume.highest_education.display(),
                format!("{:.2}", resume.metadata.confidence).as_str(),
                result.processing_time_ms.to_string().as_str(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                result.processing_time_ms.to_string().as_str(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_output_names_keep_input_extension() {
        let mut used = HashSet::new();
        let names: Vec<String> = ["in/jane.pdf", "in/jane.docx", "in/jane.txt", "other/jane.pdf"]
            .iter()
            .map(|p| output_file_name(Path::new(p), "json", &mut used))
            .collect();

        assert_eq!(
            names,
            vec!["jane.pdf.json", "jane.docx.json", "jane.txt.json", "jane.pdf-2.json"]
        );
    }
}

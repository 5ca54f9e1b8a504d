//! Sample command - run the extractor on the built-in sample resume.

use clap::Args;
use console::style;

use rex_core::{extract_text, SAMPLE_RESUME};

use super::{format_resume, load_config, OutputFormat};

/// Arguments for the sample command.
#[derive(Args)]
pub struct SampleArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print the sample resume text instead of extracting from it
    #[arg(long)]
    print_text: bool,
}

pub async fn run(args: SampleArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    if args.print_text {
        print!("{}", SAMPLE_RESUME);
        return Ok(());
    }

    let config = load_config(config_path)?;
    let result = extract_text(SAMPLE_RESUME, &config)?;

    println!("{}", format_resume(&result.resume, args.format)?);

    if args.format == OutputFormat::Text {
        println!(
            "{} Extracted in {}ms with {:.0}% confidence",
            style("✓").green(),
            result.processing_time_ms,
            result.resume.metadata.confidence * 100.0
        );
    }

    Ok(())
}

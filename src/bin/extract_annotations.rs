//! Extract book annotations from a JSON export.
//!
//! Prints every annotation to the console, or with `--pdf` writes one PDF
//! report per book.
//!
//! Usage:
//!   extract_annotations export.json
//!   extract_annotations export.json --pdf --output-dir reports

use annotation_report::{extract_annotations, report, ReportConfig};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Extracts book annotations from a JSON file and optionally generates PDFs.
#[derive(Debug, Parser)]
#[command(name = "extract_annotations", version)]
struct Args {
    /// Path to the input JSON file.
    json_filepath: PathBuf,

    /// Generate a separate PDF for each book's annotations.
    #[arg(long)]
    pdf: bool,

    /// Directory the PDF reports are written to.
    #[arg(long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Compress PDF page content.
    #[arg(long)]
    compress: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let records = extract_annotations(&args.json_filepath);
    if records.is_empty() {
        println!("No annotations found or an error occurred while reading the JSON.");
        return ExitCode::SUCCESS;
    }

    let config = ReportConfig::new()
        .with_pdf(args.pdf)
        .with_output_dir(args.output_dir)
        .with_compress(args.compress);

    let mut stdout = std::io::stdout().lock();
    match report::run(&records, &config, &mut stdout) {
        Ok(summary) => {
            log::debug!(
                "{} reports written, {} failed",
                summary.written.len(),
                summary.failures.len()
            );
        },
        Err(e) => {
            log::error!("Could not write output: {}", e);
            eprintln!("Error: {}", e);
        },
    }
    ExitCode::SUCCESS
}

use anyhow::{Context, Result};
use clap::Parser;
use ragnarock_converter::{
    ConversionSummary, Converter, ConverterConfig, DEFAULT_LOOKAHEAD, DEFAULT_TIME_EPSILON,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert Beat Saber charts for Ragnarock", long_about = None)]
struct Args {
    /// Path to the song's Info.dat
    info: PathBuf,

    /// Notes closer than this many beats are considered too close
    #[arg(long, default_value_t = DEFAULT_TIME_EPSILON)]
    time_epsilon: f64,

    /// How many following notes to check for same-lane stacking
    #[arg(long, default_value_t = DEFAULT_LOOKAHEAD)]
    lookahead: usize,

    /// Level author written into Info.dat
    #[arg(long, default_value = ragnarock_converter::info::DEFAULT_LEVEL_AUTHOR)]
    level_author: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match run(&args) {
        Ok(summary) => {
            print_summary(&summary);
            if summary.is_complete() {
                println!("All processing completed successfully.");
                ExitCode::SUCCESS
            } else {
                eprintln!(
                    "ERROR: {} of {} charts could not be converted.",
                    summary.failed.len(),
                    summary.failed.len() + summary.converted.len()
                );
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!(
                "ERROR: Failed to process the provided file \"{}\": {:#}",
                args.info.display(),
                e
            );
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ConversionSummary> {
    let config = ConverterConfig {
        time_epsilon: args.time_epsilon,
        lookahead: args.lookahead,
        level_author: args.level_author.clone(),
        ..ConverterConfig::default()
    };

    let converter = Converter::new(config)?;

    log::info!("Starting conversion of {}", args.info.display());
    converter
        .process_info_file(&args.info)
        .with_context(|| format!("could not convert {}", args.info.display()))
}

fn print_summary(summary: &ConversionSummary) {
    println!("\n=== Conversion Summary ===");
    for report in &summary.converted {
        let name = report
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!(
            "{:<28} | {:>5} -> {:>5} notes ({} stacked removed)",
            name,
            report.original_notes,
            report.final_notes,
            report.original_notes - report.after_stacked
        );
    }
    for (path, e) in &summary.failed {
        println!("{:<28} | FAILED: {}", path.display(), e);
    }
    println!("=== End Summary ===\n");
}

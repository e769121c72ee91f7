//! prosefilter CLI - body prose recovery for extracted document text
//!
//! A command-line tool for cleaning pre-extracted thesis and article text.

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use prosefilter::batch::collect_inputs;
use prosefilter::render;
use prosefilter::{
    async_api, BatchOptions, BatchSummary, FilterOptions, Outcome, Pipeline, PlainTextExtractor,
    TaskStatus,
};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Body prose recovery for page-segmented extracted text
#[derive(Parser)]
#[command(
    name = "prosefilter",
    version,
    about = "Recover body prose from extracted document text",
    long_about = "prosefilter - Removes page numbers, running headers, footnotes, captions,\n\
                  tables, bibliographies and other non-prose from extracted text.\n\n\
                  Usage:\n  \
                  prosefilter clean <file>            Clean one file to stdout\n  \
                  prosefilter batch <dir> -o <dir>    Clean every .txt file in a directory\n  \
                  prosefilter inspect <file>          Print per-line audit records"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Filtering preset (ignored when --config is given)
    #[arg(long, global = true, default_value = "standard")]
    preset: Preset,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean one pre-extracted text file
    Clean {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write per-line audit records as JSON
        #[arg(long)]
        audit: Option<PathBuf>,

        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Clean every .txt file in a directory
    Batch {
        /// Input directory
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Documents processed concurrently (default: available cores)
        #[arg(short = 'j', long)]
        jobs: Option<usize>,

        /// Per-document timeout in seconds
        #[arg(long, default_value = "300")]
        timeout: u64,

        /// Skip inputs whose output file already exists
        #[arg(long)]
        skip_existing: bool,

        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the per-line audit records of a file as JSON
    Inspect {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// Show line, page and drop-reason counts for a file
    Info {
        /// Input file path
        input: PathBuf,
    },

    /// Print the default configuration as TOML
    Config,
}

/// Filtering preset
#[derive(Clone, ValueEnum)]
enum Preset {
    /// Keep more borderline lines
    Lenient,
    /// Default thresholds
    Standard,
    /// Drop more borderline lines
    Aggressive,
}

impl From<Preset> for FilterOptions {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Lenient => FilterOptions::lenient(),
            Preset::Standard => FilterOptions::default(),
            Preset::Aggressive => FilterOptions::aggressive(),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let preset = cli.preset;

    match cli.command {
        Commands::Clean {
            input,
            output,
            audit,
            config,
        } => {
            let options = load_options(config.as_deref(), preset)?;
            let pb = create_spinner("Cleaning document...");

            let outcome = prosefilter::clean_file_with_options(&input, &options)?;

            pb.finish_and_clear();

            if let Some(audit_path) = &audit {
                let json = serde_json::to_string_pretty(&outcome)?;
                fs::write(audit_path, json)?;
            }

            match &outcome {
                Outcome::Cleaned(doc) => match &output {
                    Some(path) => {
                        render::write_to_file(&outcome, path)?;
                        println!(
                            "{} Kept {} of {} lines: {}",
                            "✓".green().bold(),
                            doc.stats.lines - doc.stats.dropped,
                            doc.stats.lines,
                            path.display()
                        );
                    }
                    None => write_output(None, &doc.text)?,
                },
                Outcome::Skipped { reason, .. } => {
                    eprintln!("{} Document skipped: {}", "!".yellow().bold(), reason);
                }
            }
        }

        Commands::Batch {
            input,
            output,
            jobs,
            timeout,
            skip_existing,
            config,
        } => {
            let options = load_options(config.as_deref(), preset)?;
            run_batch(&input, &output, jobs, timeout, skip_existing, options).await?;
        }

        Commands::Inspect {
            input,
            output,
            compact,
        } => {
            let pb = create_spinner("Classifying lines...");
            let outcome = prosefilter::clean_file_with_options(&input, &preset.into())?;
            pb.finish_and_clear();

            let json = if compact {
                serde_json::to_string(outcome.records())?
            } else {
                serde_json::to_string_pretty(outcome.records())?
            };
            write_output(output.as_ref(), &json)?;
        }

        Commands::Info { input } => {
            let pb = create_spinner("Analyzing document...");
            let outcome = prosefilter::clean_file_with_options(&input, &preset.into())?;
            pb.finish_and_clear();

            println!("{}", "Document Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                input.file_name().unwrap_or_default().to_string_lossy()
            );

            match &outcome {
                Outcome::Cleaned(doc) => {
                    println!("{}: {}", "Status".bold(), "cleaned".green());
                    println!("{}: {}", "Lines".bold(), doc.stats.lines);
                    println!("{}: {}", "Dropped".bold(), doc.stats.dropped);
                    println!("{}: {}", "Pages".bold(), doc.stats.pages);
                    println!("{}: {}", "Pages kept".bold(), doc.stats.pages_kept);
                    println!("{}: {}", "Words".bold(), doc.text.split_whitespace().count());

                    if !doc.stats.reasons.is_empty() {
                        println!("\n{}", "Drop Reasons".cyan().bold());
                        println!("{}", "─".repeat(40));
                        for (reason, count) in &doc.stats.reasons {
                            println!("{}: {}", reason.to_string().bold(), count);
                        }
                    }
                }
                Outcome::Skipped { reason, records } => {
                    println!("{}: {} ({})", "Status".bold(), "skipped".yellow(), reason);
                    println!("{}: {}", "Lines".bold(), records.len());
                }
            }
        }

        Commands::Config => {
            print!("{}", FilterOptions::default().to_toml_string()?);
        }
    }

    Ok(())
}

async fn run_batch(
    input: &Path,
    output: &Path,
    jobs: Option<usize>,
    timeout: u64,
    skip_existing: bool,
    options: FilterOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output)?;

    let mut paths = collect_inputs(input, "txt")?;
    tracing::debug!(dir = %input.display(), inputs = paths.len(), "collected inputs");
    if skip_existing {
        let before = paths.len();
        paths.retain(|path| !output_path(output, path).exists());
        let skipped = before - paths.len();
        if skipped > 0 {
            println!("{} {} already cleaned, skipping", "!".yellow().bold(), skipped);
        }
    }
    if paths.is_empty() {
        println!("{} No input files to process", "!".yellow().bold());
        return Ok(());
    }

    let workers = jobs.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    });
    let batch = BatchOptions::default()
        .with_workers(workers)
        .with_timeout(Duration::from_secs(timeout));

    let pb = create_spinner(&format!("Cleaning {} documents...", paths.len()));

    let out_dir = output.to_path_buf();
    let reports = async_api::process_paths(
        Pipeline::new(options)?,
        Arc::new(PlainTextExtractor),
        paths,
        batch,
        move |path, doc| {
            fs::write(output_path(&out_dir, path), &doc.text)?;
            Ok(())
        },
    )
    .await?;

    pb.finish_and_clear();

    for report in &reports {
        let name = report.path.file_name().unwrap_or_default().to_string_lossy();
        match &report.status {
            TaskStatus::Cleaned(_) => {}
            TaskStatus::Skipped { reason } => {
                println!("  {} {} ({})", "-".yellow(), name, reason);
            }
            TaskStatus::Failed { error } => {
                println!("  {} {}: {}", "✗".red(), name, error);
            }
            TaskStatus::TimedOut => {
                println!("  {} {} (timed out)", "✗".red(), name);
            }
        }
    }

    let summary = BatchSummary::from_reports(&reports);
    println!("{}", "Batch Complete".green().bold());
    println!("{}", "─".repeat(40));
    println!("{}: {}", "Output".bold(), output.display());
    println!("{}: {}", "Documents".bold(), summary.total());
    println!("{}: {}", "Cleaned".bold(), summary.cleaned);
    println!("{}: {}", "Skipped".bold(), summary.skipped);
    println!("{}: {}", "Failed".bold(), summary.failed);
    println!("{}: {}", "Timed out".bold(), summary.timed_out);

    Ok(())
}

fn load_options(
    config: Option<&Path>,
    preset: Preset,
) -> Result<FilterOptions, Box<dyn std::error::Error>> {
    match config {
        Some(path) => Ok(FilterOptions::from_path(path)?),
        None => Ok(preset.into()),
    }
}

/// `<output>/<stem>.txt` for an input file.
fn output_path(output: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    output.join(format!("{}.txt", stem))
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}

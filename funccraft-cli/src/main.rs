//! funccraft CLI - Python function extraction for name-prediction datasets

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use clap::{Parser, Subcommand};
use funccraft_core::config::{self, ResolvedConfig};
use funccraft_core::dataset::atomic_write_lines;
use funccraft_core::prompt::{self, Task};
use funccraft_core::report::{render_extraction_json, render_extraction_text};
use funccraft_core::{
    check_extraction, extract_function_info, prepare_with_progress, render_json, render_text,
    DatasetStore, JsonlStore, ValidationOptions, ValidationReport,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "funccraft")]
#[command(about = "Extract Python functions into name-prediction rows and check the extraction")]
#[command(version)]
struct Cli {
    /// Only log warnings and errors
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the first function from a single Python source file
    Extract {
        /// Path to Python source file
        path: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Extract every row of a JSONL corpus, check the result, and save it
    Prepare {
        /// Input rows (JSONL with whole_func_string, func_name, func_documentation_string)
        input: PathBuf,

        /// Where to write the prepared rows (JSONL)
        output: PathBuf,

        /// Keep only the first N rows (overrides config file)
        #[arg(long)]
        limit: Option<usize>,

        /// Rows to report in detail (overrides config file)
        #[arg(long)]
        samples: Option<usize>,

        /// Worker threads (overrides config file)
        #[arg(long)]
        jobs: Option<usize>,

        /// Output format for the check report
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Check an already prepared dataset against its reference fields
    Check {
        /// Prepared rows (JSONL)
        dataset: PathBuf,

        /// Rows to report in detail (overrides config file)
        #[arg(long)]
        samples: Option<usize>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write masked-signature model inputs for a prepared dataset
    Prompts {
        /// Prepared rows (JSONL)
        dataset: PathBuf,

        /// Where to write the inputs (JSONL of {input, reference})
        output: PathBuf,

        /// 1 = body without comments, 2 = body with comments (overrides config file)
        #[arg(long)]
        task: Option<u8>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate a configuration file
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without running anything
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    match cli.command {
        Commands::Extract { path, format } => {
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            let extraction = extract_function_info(&source)
                .with_context(|| format!("Failed to parse: {}", path.display()))?;

            match format {
                OutputFormat::Text => print!("{}", render_extraction_text(&extraction)),
                OutputFormat::Json => println!("{}", render_extraction_json(&extraction)),
            }
        }
        Commands::Prepare {
            input,
            output,
            limit,
            samples,
            jobs,
            format,
            config: config_path,
        } => {
            let resolved = load_config(config_path.as_deref())?;

            // CLI flags override config file values
            let mut options = resolved.prepare_options();
            options.limit = limit.or(options.limit);
            let validation = validation_options(&resolved, samples);
            configure_threads(jobs.or(resolved.jobs))?;

            let rows = JsonlStore.load(&input)?;
            tracing::info!(path = %input.display(), rows = rows.len(), "loaded corpus");

            let total = options.limit.map_or(rows.len(), |l| l.min(rows.len()));
            let progress = progress_bar(total as u64, cli.quiet)?;
            let prepared = prepare_with_progress(rows, &options, || progress.inc(1));
            progress.finish_and_clear();

            let report = check_extraction(&prepared, &validation);
            print_report(&report, format);

            JsonlStore.save(&prepared, &output)?;
            tracing::info!(path = %output.display(), rows = prepared.len(), "saved prepared rows");
        }
        Commands::Check {
            dataset,
            samples,
            format,
            config: config_path,
        } => {
            let resolved = load_config(config_path.as_deref())?;
            let validation = validation_options(&resolved, samples);

            let rows = JsonlStore.load(&dataset)?;
            let report = check_extraction(&rows, &validation);
            print_report(&report, format);
        }
        Commands::Prompts {
            dataset,
            output,
            task,
            config: config_path,
        } => {
            let resolved = load_config(config_path.as_deref())?;
            let task = match task {
                Some(id) => Task::from_id(id)
                    .ok_or_else(|| anyhow::anyhow!("--task must be 1 or 2 (got {})", id))?,
                None => resolved.task,
            };

            let rows = JsonlStore.load(&dataset)?;
            let examples = prompt::build_examples(&rows, task);
            let blank = examples.iter().filter(|e| e.input.is_empty()).count();
            atomic_write_lines(&output, &examples)?;

            tracing::info!(
                path = %output.display(),
                examples = examples.len(),
                without_body = blank,
                "wrote model inputs"
            );
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref());

                match resolved {
                    Ok(config) => {
                        if let Some(ref p) = config.config_path {
                            println!("Config valid: {}", p.display());
                        } else {
                            println!("No config file found. Using defaults.");
                        }
                    }
                    Err(e) => {
                        eprintln!("Config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path } => {
                let resolved = load_config(path.as_deref())?;

                println!("Configuration:");
                if let Some(ref p) = resolved.config_path {
                    println!("  Source: {}", p.display());
                } else {
                    println!("  Source: defaults (no config file found)");
                }
                println!();
                println!("Preparation:");
                println!(
                    "  limit: {}",
                    resolved
                        .limit
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| "none".to_string())
                );
                println!(
                    "  jobs: {}",
                    resolved
                        .jobs
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| "auto".to_string())
                );
                println!();
                println!("Validation:");
                println!("  samples: {}", resolved.validation.samples);
                println!("  preview_chars: {}", resolved.validation.preview_chars);
                println!();
                println!("Prompts:");
                println!(
                    "  task: {}",
                    match resolved.task {
                        Task::BodyNoComments => "1 (body without comments)",
                        Task::BodyWithComments => "2 (body with comments)",
                    }
                );
            }
        },
    }

    Ok(())
}

/// Install the stderr log subscriber; RUST_LOG wins over the defaults
fn init_tracing(quiet: bool) {
    let default_directive = if quiet {
        "funccraft=warn,funccraft_core=warn"
    } else {
        "funccraft=info,funccraft_core=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolve config from an explicit path or the current directory
fn load_config(config_path: Option<&Path>) -> anyhow::Result<ResolvedConfig> {
    let project_root = std::env::current_dir()?;
    let resolved = config::load_and_resolve(&project_root, config_path)
        .context("failed to load configuration")?;

    if let Some(path) = &resolved.config_path {
        tracing::info!(path = %path.display(), "using config");
    }
    Ok(resolved)
}

fn validation_options(resolved: &ResolvedConfig, samples: Option<usize>) -> ValidationOptions {
    ValidationOptions {
        samples: samples.unwrap_or(resolved.validation.samples),
        preview_chars: resolved.validation.preview_chars,
    }
}

fn configure_threads(jobs: Option<usize>) -> anyhow::Result<()> {
    let Some(jobs) = jobs else {
        return Ok(());
    };
    if jobs == 0 {
        anyhow::bail!("--jobs must be positive (got 0)");
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build_global()
        .context("failed to configure worker threads")
}

fn progress_bar(len: u64, quiet: bool) -> anyhow::Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template("Parsing functions {bar:40} {pos}/{len} ({eta})")
            .context("invalid progress template")?,
    );
    Ok(bar)
}

fn print_report(report: &ValidationReport, format: OutputFormat) {
    match format {
        OutputFormat::Text => print!("{}", render_text(report)),
        OutputFormat::Json => println!("{}", render_json(report)),
    }
}

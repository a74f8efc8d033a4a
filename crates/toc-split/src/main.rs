//! toc-split - split agreements into titled sections
//!
//! Usage:
//!   toc-split split -i docs.jsonl -o sections.jsonl   Segment every document
//!   toc-split show T09123 -i docs.jsonl               Inspect one document
//!   toc-split completions bash                        Shell completions

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use toc_segmenter::{BatchStats, DocumentSections};
use toc_split::config::{default_config_path, load_config, Config};
use toc_split::records::{open_input, open_output, read_documents, write_sections};
use toc_split::render::render_document;

#[derive(Parser)]
#[command(name = "toc-split")]
#[command(about = "Split agreement documents into titled sections using their table of contents")]
#[command(version)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Segmentation options shared by `split` and `show`
#[derive(Parser, Clone)]
struct SegmentArgs {
    /// Input JSON Lines file (default: read from stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Merge spans shorter than this many characters with the next one
    #[arg(long, value_name = "CHARS")]
    merge_threshold: Option<usize>,

    /// Place boundaries at accent-insensitive matches instead of requiring
    /// the title to occur with its accents
    #[arg(long)]
    normalized_positions: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment every document and write one JSON line per section
    ///
    /// Input records: {"id": ..., "text": ..., "titles": [...]}
    /// Output records: {"doc_id", "seq", "title", "anchor", "content"}
    Split {
        #[command(flatten)]
        args: SegmentArgs,
        /// Output file (default: write to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Disable progress and summary output
        #[arg(short, long)]
        quiet: bool,
    },
    /// Show the sections of one document
    Show {
        /// Document identifier (case number)
        id: String,
        #[command(flatten)]
        args: SegmentArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    // Logs go to stderr so that stdout stays valid JSON Lines
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match cli.command {
        Commands::Split {
            args,
            output,
            quiet,
        } => {
            let config = resolve_config(cli.config.as_deref(), &args)?;
            cmd_split(&config, args.input.as_deref(), output.as_deref(), quiet)
        }
        Commands::Show { id, args, json } => {
            let config = resolve_config(cli.config.as_deref(), &args)?;
            cmd_show(&config, &id, args.input.as_deref(), json)
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "toc-split", &mut io::stdout());
            Ok(())
        }
    }
}

/// Load the config file and apply command-line overrides.
///
/// An explicit `--config` must load; a broken default config only warns.
fn resolve_config(explicit: Option<&Path>, args: &SegmentArgs) -> Result<Config> {
    let config = match explicit {
        Some(path) => load_config(path)?,
        None => match default_config_path().and_then(|path| load_config(&path)) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Failed to load default config: {:#}. Using defaults.", err);
                Config::default()
            }
        },
    };
    Ok(config.with_overrides(args.merge_threshold, args.normalized_positions))
}

fn cmd_split(
    config: &Config,
    input: Option<&Path>,
    output: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let documents = read_documents(open_input(input)?)?;

    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        let sp = ProgressBar::new_spinner();
        sp.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]")
                .context("Invalid progress template")?
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        sp.set_message(format!("Segmenting {} documents...", documents.len()));
        sp.enable_steady_tick(std::time::Duration::from_millis(80));
        sp
    };

    let segmenter = config.segmenter();
    tracing::info!(
        "Merging spans shorter than {} chars",
        segmenter.merge_threshold()
    );
    let results = segmenter.segment_documents(&documents);
    spinner.finish_and_clear();

    let rows = write_sections(open_output(output)?, &results)?;
    tracing::info!("Wrote {} sections", rows);

    if !quiet {
        print_summary(&BatchStats::from(results.as_slice()));
    }
    Ok(())
}

fn print_summary(stats: &BatchStats) {
    let fallbacks = if stats.fallbacks > 0 {
        stats.fallbacks.to_string().yellow()
    } else {
        stats.fallbacks.to_string().normal()
    };
    eprintln!(
        "{} {} documents, {} sections, {:.1}% of titles matched, {} without any match",
        "Done:".green().bold(),
        stats.documents,
        stats.sections,
        stats.match_rate() * 100.0,
        fallbacks
    );
}

fn cmd_show(config: &Config, id: &str, input: Option<&Path>, json: bool) -> Result<()> {
    let documents = read_documents(open_input(input)?)?;
    let Some(document) = documents.iter().find(|doc| doc.id == id) else {
        bail!("Document not found: {id}");
    };

    let report = config
        .segmenter()
        .segment_with_report(&document.text, &document.titles);
    let sections = DocumentSections::new(document.id.clone(), report);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &sections).context("Failed to serialize sections")?;
        writeln!(out)?;
    } else {
        render_document(&mut out, &sections)?;
    }
    Ok(())
}

//! Spellcast command line interface
//!
//! Offline tooling for spellbooks: list what is in one, and score recorded
//! gestures against it.
//!
//! # Usage
//!
//! ```bash
//! # List incantations
//! spellcast list --spellbook config/spellbook.yaml
//!
//! # Score a recorded path (JSON array of [x, y]) against one spell
//! spellcast score --spellbook config/spellbook.yaml --spell ignis --path caret.json
//!
//! # Rank every spell against a path
//! spellcast rank --spellbook config/spellbook.yaml --path caret.json --top 3
//! ```
//!
//! Set `RUST_LOG=gesture_core=trace` to dump every normalized point and
//! per-index distance.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde_json::json;
use spellcast::{CasterConfig, GestureMatcher, Point2, Spellbook};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spellcast")]
#[command(version = "0.1.0")]
#[command(about = "Inspect spellbooks and score gesture recordings")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,

    /// Caster configuration (threshold and matcher tunables)
    #[arg(long, global = true, env = "SPELLCAST_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// List the incantations in a spellbook
    List {
        #[arg(short, long)]
        spellbook: PathBuf,
    },

    /// Score a recorded path against one spell's gesture
    Score {
        #[arg(short, long)]
        spellbook: PathBuf,

        /// Incantation of the spell to compare against
        #[arg(long)]
        spell: String,

        /// JSON file holding an array of [x, y] points
        #[arg(short, long)]
        path: PathBuf,
    },

    /// Rank every spell in a spellbook against a recorded path
    Rank {
        #[arg(short, long)]
        spellbook: PathBuf,

        /// JSON file holding an array of [x, y] points
        #[arg(short, long)]
        path: PathBuf,

        /// Show only the best N spells
        #[arg(long)]
        top: Option<usize>,
    },
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::List { spellbook } => cmd_list(&spellbook, cli.format),
        Commands::Score {
            spellbook,
            spell,
            path,
        } => cmd_score(&spellbook, &spell, &path, &config, cli.format),
        Commands::Rank {
            spellbook,
            path,
            top,
        } => cmd_rank(&spellbook, &path, top, &config, cli.format),
    });

    match result {
        Ok(code) => code,
        Err(e) => {
            if cli.format == OutputFormat::Json {
                println!("{}", json!({ "error": format!("{:#}", e) }));
            } else {
                eprintln!("{} {:#}", "error:".red().bold(), e);
            }
            ExitCode::from(2)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<CasterConfig> {
    match path {
        Some(p) => CasterConfig::load(p)
            .with_context(|| format!("loading caster config {}", p.display())),
        None => Ok(CasterConfig::default()),
    }
}

fn load_spellbook(path: &Path) -> Result<Spellbook> {
    Spellbook::load(path).with_context(|| format!("loading spellbook {}", path.display()))
}

fn load_path(path: &Path) -> Result<Vec<Point2>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading gesture path {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing gesture path {}", path.display()))
}

// =============================================================================
// COMMANDS
// =============================================================================

fn cmd_list(spellbook: &Path, format: OutputFormat) -> Result<ExitCode> {
    let book = load_spellbook(spellbook)?;
    let names = book.incantations();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&names)?),
        OutputFormat::Pretty => {
            println!("{} spells", names.len().to_string().bold());
            for name in names {
                let points = book.get(name).map_or(0, |s| s.gesture.len());
                println!("  {} {}", name.cyan(), format!("({} points)", points).dimmed());
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_score(
    spellbook: &Path,
    spell: &str,
    path: &Path,
    config: &CasterConfig,
    format: OutputFormat,
) -> Result<ExitCode> {
    let book = load_spellbook(spellbook)?;
    let points = load_path(path)?;
    let matcher = GestureMatcher::with_config(config.matcher)?;

    let data = book
        .get(spell)
        .with_context(|| format!("no spell with incantation '{}'", spell))?;
    let score = matcher.recognize_2d(&points, &data.gesture);
    let accepted = score >= config.acceptance_threshold;

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "incantation": data.incantation,
                "score": score,
                "threshold": config.acceptance_threshold,
                "accepted": accepted,
            }))?
        ),
        OutputFormat::Pretty => {
            let verdict = if accepted {
                "match".green().bold()
            } else {
                "no match".red().bold()
            };
            println!(
                "{}: {:.3} (threshold {:.2}) {}",
                data.incantation, score, config.acceptance_threshold, verdict
            );
        }
    }

    Ok(if accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn cmd_rank(
    spellbook: &Path,
    path: &Path,
    top: Option<usize>,
    config: &CasterConfig,
    format: OutputFormat,
) -> Result<ExitCode> {
    let book = load_spellbook(spellbook)?;
    let points = load_path(path)?;
    let matcher = GestureMatcher::with_config(config.matcher)?;

    let mut ranked = book.rank(&matcher, &points);
    if let Some(n) = top {
        ranked.truncate(n);
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ranked)?),
        OutputFormat::Pretty => {
            for (i, r) in ranked.iter().enumerate() {
                let line = format!("{:>2}. {:<20} {:.3}", i + 1, r.incantation, r.score);
                if r.score >= config.acceptance_threshold {
                    println!("{}", line.green());
                } else {
                    println!("{}", line);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

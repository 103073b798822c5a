//! glass - command-line front end
//!
//! Runs the same preprocessing the viewer applies on load, and reads or
//! edits the viewer configuration.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use glass_core::RenderingIntent;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "glass", version, about = "Inspect and normalize images the way the viewer does")]
struct Cli {
    /// More logging (-v info, -vv debug, -vvv trace); overrides RUST_LOG
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file to use instead of the platform default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show dimensions, color profile and orientation of an image
    Info {
        file: PathBuf,
        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
    /// Apply EXIF orientation and color profile normalization, then save
    Normalize(NormalizeArgs),
    /// List the built-in color profiles
    Profiles,
    /// Read or change configuration values
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Args)]
pub struct NormalizeArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Target profile: a built-in name or an ICC file path
    #[arg(long)]
    pub profile: Option<String>,
    /// Convert tagged images too, not just untagged ones
    #[arg(long)]
    pub apply_to_all: bool,
    /// Rendering intent for profile conversion (perceptual, relative, saturation, absolute)
    #[arg(long)]
    pub intent: Option<RenderingIntent>,
    /// JPEG quality for the output
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print every effective setting
    Show,
    /// Print one setting
    Get { key: String },
    /// Store a setting in the config file
    Set { key: String, value: String },
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = commands::open_config(cli.config.as_deref())?;

    match cli.command {
        Command::Info { file, json } => commands::info(&config, &file, json),
        Command::Normalize(args) => commands::normalize(&config, &args),
        Command::Profiles => commands::profiles(&config),
        Command::Config { action } => commands::config(config, action),
    }
}

//! Hackathon Judging CLI
//!
//! Validate, score and rank judge evaluations from JSON files.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use hackathon_judging_cli::commands::{cohorts, evaluate, rank, CommandContext};
use hackathon_judging_cli::output::OutputFormat;
use hackathon_judging_common::{init_from_config, AppConfig};
use hackathon_judging_domain::PrizeCohortId;

/// Output format for CLI commands
#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum CliOutputFormat {
    /// JSON output
    Json,
    /// Table output (default)
    #[default]
    Table,
    /// Plain text output
    Plain,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Table => OutputFormat::Table,
            CliOutputFormat::Plain => OutputFormat::Plain,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "judging")]
#[command(author, version, about = "Hackathon judging CLI")]
#[command(long_about = "Command-line interface for hackathon judging.\n\n\
    Validate a judge's evaluation against its prize cohort, compute scores, \
    rank projects and check cohort configuration.")]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value = "table")]
    format: CliOutputFormat,

    /// Configuration file (defaults to config/default + config/$APP_ENV)
    #[arg(long, global = true, env = "JUDGING_CONFIG")]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate an evaluation against its selected prize cohort
    #[command(alias = "v")]
    Validate {
        /// Hackathon JSON file
        #[arg(long)]
        hackathon: PathBuf,

        /// Evaluation submission JSON file
        evaluation: PathBuf,
    },

    /// Validate and score an evaluation
    #[command(alias = "s")]
    Score {
        /// Hackathon JSON file
        #[arg(long)]
        hackathon: PathBuf,

        /// Evaluation submission JSON file
        evaluation: PathBuf,
    },

    /// Rank projects per prize cohort from submitted evaluations
    #[command(alias = "r")]
    Rank {
        /// Hackathon JSON file
        #[arg(long)]
        hackathon: PathBuf,

        /// JSON array of submitted evaluation payloads
        payloads: PathBuf,

        /// Only rank this prize cohort
        #[arg(short, long)]
        cohort: Option<PrizeCohortId>,
    },

    /// Check the prize cohorts of a hackathon
    #[command(alias = "c")]
    CheckCohorts {
        /// Hackathon JSON file
        hackathon: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    if cli.verbose {
        init_from_config(&config.telemetry.with_log_level("debug"))?;
    } else {
        init_from_config(&config.telemetry)?;
    }

    let ctx = CommandContext::new(config, cli.format.into());

    let result = match cli.command {
        Commands::Validate {
            hackathon,
            evaluation,
        } => evaluate::validate(&ctx, &hackathon, &evaluation),
        Commands::Score {
            hackathon,
            evaluation,
        } => evaluate::score(&ctx, &hackathon, &evaluation),
        Commands::Rank {
            hackathon,
            payloads,
            cohort,
        } => rank::rank(&ctx, &hackathon, &payloads, cohort),
        Commands::CheckCohorts { hackathon } => cohorts::check(&ctx, &hackathon),
    };

    if let Err(e) = result {
        use colored::Colorize;
        eprintln!("{} {}", "Error:".red().bold(), e);
        if cli.verbose {
            eprintln!("\n{}", "Details:".dimmed());
            eprintln!("{:?}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}

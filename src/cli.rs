//! CLI argument parsing for the planning workflow.
//!
//! The CLI is thin: it resolves config, then hands off to the workflow so the
//! same core can be driven from tests or other front ends.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "atlas",
    version,
    about = "Gap analysis and source routing for museum-collection enrichment",
    after_help = "Commands:\n  scan --seed-dir <dir>         Analyze a seed snapshot and write a ranked backlog\n  route --museum-id <id>        Print the acquisition plan for one museum\n  plan --run-dir <dir>          Route the head of a run's backlog into plans/\n  init-config --out <file>      Write the default planner config\n\nExamples:\n  atlas scan --seed-dir data/seed --focus-country Australia\n  atlas route --museum-id art-institute-of-chicago-us\n  atlas plan --run-dir runs/run_20260215_161030 --top 5",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Emit debug logging to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level workflow commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Scan(ScanArgs),
    Route(RouteArgs),
    Plan(PlanArgs),
    InitConfig(InitConfigArgs),
}

/// Scan command inputs.
#[derive(Parser, Debug)]
#[command(about = "Measure seed coverage and rank museums for enrichment")]
pub struct ScanArgs {
    /// Directory containing museums.csv, artworks.csv, artists.csv, exhibitions.csv
    #[arg(long, value_name = "DIR", default_value = "data/seed")]
    pub seed_dir: PathBuf,

    /// Directory that receives run folders
    #[arg(long, value_name = "DIR", default_value = crate::paths::DEFAULT_RUNS_DIR)]
    pub runs_dir: PathBuf,

    /// Run folder name (defaults to run_<UTC timestamp>)
    #[arg(long, value_name = "ID")]
    pub run_id: Option<String>,

    /// Planner config JSON
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Artwork quota per museum
    #[arg(long, value_name = "N")]
    pub target_artworks: Option<u32>,

    /// Exhibition quota per museum
    #[arg(long, value_name = "N")]
    pub target_exhibitions: Option<u32>,

    /// Restrict the backlog to this museum id (repeatable)
    #[arg(long = "focus-museum", value_name = "ID")]
    pub focus_museum_ids: Vec<String>,

    /// Restrict the backlog to this country (repeatable, case-insensitive)
    #[arg(long = "focus-country", value_name = "COUNTRY")]
    pub focus_countries: Vec<String>,

    /// Emit a machine-readable summary instead of the run path
    #[arg(long)]
    pub json: bool,
}

/// Route command inputs for a single museum.
#[derive(Parser, Debug)]
#[command(about = "Plan the data source for one museum")]
pub struct RouteArgs {
    #[arg(long, value_name = "ID")]
    pub museum_id: String,

    /// Free-text enrichment goal recorded in the plan
    #[arg(long, value_name = "TEXT")]
    pub goal: Option<String>,

    /// Field to prioritize (advisory, repeatable)
    #[arg(long = "priority-field", value_name = "FIELD")]
    pub priority_fields: Vec<String>,

    /// Also write the plan to this file
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// Plan command inputs used to route a finished run's backlog.
#[derive(Parser, Debug)]
#[command(about = "Route the top backlog entries of a scan run")]
pub struct PlanArgs {
    #[arg(long, value_name = "DIR")]
    pub run_dir: PathBuf,

    /// Number of backlog entries to route
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub top: usize,
}

#[derive(Parser, Debug)]
#[command(about = "Write the default planner config")]
pub struct InitConfigArgs {
    #[arg(long, value_name = "FILE")]
    pub out: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

use anyhow::{anyhow, Context, Result};
use atlas_planner::cli::{Command, InitConfigArgs, PlanArgs, RootArgs, RouteArgs, ScanArgs};
use atlas_planner::config::{self, ConfigOverrides};
use atlas_planner::router::{Router, RuleTable};
use atlas_planner::workflow::{self, ScanRequest};
use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Scan(args) => cmd_scan(args),
        Command::Route(args) => cmd_route(args),
        Command::Plan(args) => cmd_plan(args),
        Command::InitConfig(args) => cmd_init_config(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_scan(args: ScanArgs) -> Result<()> {
    let overrides = ConfigOverrides {
        target_artworks: args.target_artworks,
        target_exhibitions: args.target_exhibitions,
        focus_museum_ids: args.focus_museum_ids,
        focus_countries: args.focus_countries,
    };
    let config = config::resolve_config(args.config.as_deref(), &overrides)?;
    let request = ScanRequest {
        seed_dir: args.seed_dir,
        runs_dir: args.runs_dir,
        run_id: args.run_id,
        config,
    };
    let outcome = workflow::run_scan(&request)?;

    if args.json {
        let summary = json!({
            "run_id": outcome.backlog.run_id,
            "run_dir": outcome.paths.root().display().to_string(),
            "museums": outcome.tasks.len(),
            "limitations": outcome.report.limitations.len(),
            "top_museums_to_enrich": outcome.backlog.top_museums_to_enrich,
        });
        let text = serde_json::to_string_pretty(&summary).context("serialize scan summary")?;
        println!("{text}");
    } else {
        println!("Wrote: {}", outcome.paths.root().display());
    }
    Ok(())
}

fn cmd_route(args: RouteArgs) -> Result<()> {
    let router = Router::new(RuleTable::builtin());
    let plan = workflow::route_one(
        &router,
        &args.museum_id,
        args.goal.as_deref(),
        &args.priority_fields,
        args.out.as_deref(),
    )?;
    let text = serde_json::to_string_pretty(&plan).context("serialize routing plan")?;
    println!("{text}");
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> Result<()> {
    let router = Router::new(RuleTable::builtin());
    let outcome = workflow::run_plan(&args.run_dir, args.top, &router)?;
    for path in &outcome.written {
        println!("Wrote: {}", path.display());
    }
    if let Some(shortfall) = outcome.shortfall {
        println!(
            "Note: routed {} of {} requested; backlog.json stores {} of {} ranked museums",
            outcome.written.len(),
            shortfall.requested,
            shortfall.stored,
            shortfall.total_museums
        );
    }
    Ok(())
}

fn cmd_init_config(args: InitConfigArgs) -> Result<()> {
    if args.out.exists() && !args.force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            args.out.display()
        ));
    }
    let mut text = config::config_stub()?;
    text.push('\n');
    atlas_planner::report::write_text(&args.out, &text)?;
    println!("Wrote config to {}", args.out.display());
    Ok(())
}

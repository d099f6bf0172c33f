//! End-to-end scan and plan runs.
//!
//! `scan` is load -> snapshot -> analyze -> score -> rank -> write. `plan`
//! reads a finished scan's backlog and routes its head. Inputs are validated
//! before the run folder is created, so a fatal input error leaves nothing
//! behind.
use crate::backlog::{self, BacklogDocument, EnrichmentTask};
use crate::config::PlannerConfig;
use crate::coverage::{self, Limitation, LimitationKind};
use crate::paths::{default_run_id, RunPaths};
use crate::report::{self, GapReport, SummaryArgs};
use crate::router::{Router, RoutingPlan};
use crate::schema::{museums_from_table, TableKind};
use crate::seed;
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Inputs for one scan run.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub seed_dir: PathBuf,
    pub runs_dir: PathBuf,
    pub run_id: Option<String>,
    pub config: PlannerConfig,
}

#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub paths: RunPaths,
    pub report: GapReport,
    pub tasks: Vec<EnrichmentTask>,
    pub backlog: BacklogDocument,
}

pub fn run_scan(request: &ScanRequest) -> Result<ScanOutcome> {
    let tables = seed::load_seed(&request.seed_dir)?;
    let run_id = match request.run_id.as_deref().map(str::trim) {
        Some(run_id) if !run_id.is_empty() => run_id.to_string(),
        _ => default_run_id(chrono::Utc::now()),
    };
    let paths = RunPaths::for_run(&request.runs_dir, &run_id);
    seed::snapshot_seed(&request.seed_dir, &paths.copies_dir())
        .context("snapshot seed tables")?;

    let coverage = coverage::analyze(&tables)?;
    let (counts, mut limitations) = coverage::museum_counts(&tables)?;
    let rows = museums_from_table(tables.table(TableKind::Museums)?);
    if rows.skipped > 0 {
        limitations.push(Limitation {
            kind: LimitationKind::MissingKey,
            table: TableKind::Museums,
            column: "museum_id".to_string(),
            message: format!(
                "{} museums rows have no museum_id and were skipped",
                rows.skipped
            ),
        });
    }
    for museum_id in &rows.duplicates {
        tracing::warn!(museum_id = %museum_id, "duplicate museum row dropped");
        limitations.push(Limitation {
            kind: LimitationKind::DuplicateKey,
            table: TableKind::Museums,
            column: "museum_id".to_string(),
            message: format!("museum_id {museum_id} repeats; only its first row was kept"),
        });
    }
    let museums = rows.museums;

    let config = &request.config;
    let targets = config.targets();
    let focus = config.focus();
    let tasks = backlog::build(&museums, &counts, targets, &focus);
    let columns = coverage.high_missing_columns(config.high_missing_threshold_pct);

    let report = GapReport::new(&run_id, &coverage, &limitations);
    let backlog = BacklogDocument::new(
        &run_id,
        targets,
        focus,
        &tasks,
        &columns,
        config.backlog_top_n,
    );
    let summary = report::render_markdown(&SummaryArgs {
        report: &report,
        tasks: &tasks,
        columns: &columns,
        threshold_pct: config.high_missing_threshold_pct,
        top_n: config.report_top_n,
    });

    report::write_json(&paths.gap_report_json(), &report)?;
    report::write_json(&paths.backlog_path(), &backlog)?;
    report::write_text(&paths.gap_report_md(), &summary)?;
    tracing::info!(run_dir = %paths.root().display(), "scan complete");

    Ok(ScanOutcome {
        paths,
        report,
        tasks,
        backlog,
    })
}

/// Plans written by [`run_plan`].
#[derive(Debug, Clone, Default)]
pub struct PlanOutcome {
    pub written: Vec<PathBuf>,
    /// Set when `--top` asked for more entries than `backlog.json` stores
    /// while the scan ranked more museums than that.
    pub shortfall: Option<PlanShortfall>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanShortfall {
    pub requested: usize,
    pub stored: usize,
    pub total_museums: usize,
}

/// Route the first `top_n` backlog entries of a finished run into `plans/`.
pub fn run_plan(run_dir: &Path, top_n: usize, router: &Router) -> Result<PlanOutcome> {
    let paths = RunPaths::new(run_dir.to_path_buf());
    let backlog_path = paths.backlog_path();
    if !backlog_path.is_file() {
        return Err(anyhow!(
            "missing {}; run `atlas scan` first",
            backlog_path.display()
        ));
    }
    let backlog: BacklogDocument = report::read_json(&backlog_path)?;
    let stored = backlog.top_museums_to_enrich.len();
    let shortfall = (top_n > stored && backlog.total_museums > stored).then_some(PlanShortfall {
        requested: top_n,
        stored,
        total_museums: backlog.total_museums,
    });
    if let Some(shortfall) = shortfall {
        tracing::warn!(
            requested = shortfall.requested,
            stored = shortfall.stored,
            total_museums = shortfall.total_museums,
            "backlog.json stores fewer entries than requested; raise backlog_top_n and rescan"
        );
    }

    let plans = router.route_backlog(&backlog.top_museums_to_enrich, top_n, backlog.targets)?;
    let mut written = Vec::new();
    for plan in &plans {
        let path = paths.plan_path(&plan.museum_id);
        report::write_json(&path, plan)?;
        written.push(path);
    }
    tracing::info!(plans = written.len(), "routing plans written");
    Ok(PlanOutcome { written, shortfall })
}

/// Route one museum and optionally persist the plan.
pub fn route_one(
    router: &Router,
    museum_id: &str,
    goal: Option<&str>,
    priority_fields: &[String],
    out: Option<&Path>,
) -> Result<RoutingPlan> {
    let plan = router.route(museum_id, goal, priority_fields)?;
    if let Some(out) = out {
        report::write_json(out, &plan)?;
    }
    Ok(plan)
}

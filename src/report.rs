//! Report rendering and persistence for scan runs.
//!
//! Reports are snapshots derived from the core's return values; nothing here
//! feeds back into scoring or routing.
use crate::backlog::{EnrichmentTask, TaskStatus};
use crate::coverage::{
    ColumnTask, CoverageReport, GapStatistic, Limitation, MatchStatistic, TableSummary,
};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Current schema version for `gap_report.json`.
pub const GAP_REPORT_SCHEMA_VERSION: u32 = 1;

/// The machine-readable statistics document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapReport {
    pub schema_version: u32,
    pub run_id: String,
    pub tables: Vec<TableSummary>,
    pub gaps: Vec<GapStatistic>,
    pub matches: Vec<MatchStatistic>,
    pub limitations: Vec<Limitation>,
}

impl GapReport {
    pub fn new(run_id: &str, coverage: &CoverageReport, extra: &[Limitation]) -> Self {
        let mut limitations = coverage.limitations.clone();
        limitations.extend(extra.iter().cloned());
        Self {
            schema_version: GAP_REPORT_SCHEMA_VERSION,
            run_id: run_id.to_string(),
            tables: coverage.tables.clone(),
            gaps: coverage.gaps.clone(),
            matches: coverage.matches.clone(),
            limitations,
        }
    }
}

/// Write `value` as pretty JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let mut text = serde_json::to_string_pretty(value)
        .with_context(|| format!("serialize {}", path.display()))?;
    text.push('\n');
    fs::write(path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
}

pub fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(path, text.as_bytes()).with_context(|| format!("write {}", path.display()))
}

/// Inputs for the human-readable summary.
pub struct SummaryArgs<'a> {
    pub report: &'a GapReport,
    pub tasks: &'a [EnrichmentTask],
    pub columns: &'a [ColumnTask],
    pub threshold_pct: f64,
    pub top_n: usize,
}

/// Render `gap_report.md`.
pub fn render_markdown(args: &SummaryArgs<'_>) -> String {
    let report = args.report;
    let mut out = String::new();
    let _ = writeln!(out, "# Gap Report: {}\n", report.run_id);

    out.push_str("## Table Sizes\n\n");
    for table in &report.tables {
        let _ = writeln!(
            out,
            "- **{}**: {} rows, {} cols",
            table.table, table.rows, table.columns
        );
    }

    out.push_str("\n## Reference Coverage\n\n");
    for stat in &report.matches {
        match stat.match_rate {
            Some(rate) => {
                let _ = writeln!(
                    out,
                    "- {}: {}/{} matched ({:.2}%)",
                    stat.reference,
                    stat.matched_count,
                    stat.total_rows,
                    rate * 100.0
                );
            }
            None => {
                let _ = writeln!(out, "- {}: could not be computed", stat.reference);
            }
        }
    }

    out.push_str("\n## Top Museums to Enrich (by score)\n\n");
    if args.tasks.is_empty() {
        out.push_str("- no museums in scope\n");
    }
    for task in args.tasks.iter().take(args.top_n) {
        let _ = writeln!(
            out,
            "- {} | {} | artworks={} | exhibitions={} | score={}",
            task.museum_id,
            task.museum_name,
            count_text(task.artworks_count),
            count_text(task.exhibitions_count),
            score_text(task),
        );
    }

    let _ = writeln!(
        out,
        "\n## Highest Missing Columns (>={}%)\n",
        args.threshold_pct
    );
    if args.columns.is_empty() {
        out.push_str("- none\n");
    }
    for column in args.columns.iter().take(args.top_n) {
        let absent = if column.present { "" } else { " (column absent)" };
        let _ = writeln!(
            out,
            "- {}.{}: {:.1}%{absent}",
            column.table, column.column, column.missingness_pct
        );
    }

    if !report.limitations.is_empty() {
        out.push_str("\n## Limitations\n\n");
        for limitation in &report.limitations {
            let _ = writeln!(out, "- {}", limitation.message);
        }
    }
    out
}

fn count_text(count: Option<usize>) -> String {
    count.map_or_else(|| "n/a".to_string(), |count| count.to_string())
}

fn score_text(task: &EnrichmentTask) -> String {
    match (task.status, task.score) {
        (TaskStatus::Scored, Some(score)) => score.to_string(),
        _ => "insufficient data".to_string(),
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

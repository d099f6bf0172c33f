//! Ranked enrichment backlog.
//!
//! One task per museum, optionally narrowed by focus filters, sorted by score
//! descending then museum id ascending. Museums whose counts cannot be
//! computed stay in the backlog, marked `insufficient_data`, after every
//! scored task.
use crate::coverage::{ColumnTask, MuseumCounts};
use crate::priority::{score, shortfall, Targets};
use crate::schema::Museum;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Current schema version for `backlog.json`.
pub const BACKLOG_SCHEMA_VERSION: u32 = 1;

/// Optional restrictions applied before ranking. Empty sets do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Focus {
    #[serde(default)]
    pub focus_museum_ids: BTreeSet<String>,
    #[serde(default)]
    pub focus_countries: BTreeSet<String>,
}

impl Focus {
    pub fn is_empty(&self) -> bool {
        self.focus_museum_ids.is_empty() && self.focus_countries.is_empty()
    }

    /// Both filters must pass when both are set.
    pub fn admits(&self, museum: &Museum) -> bool {
        let id_ok = self.focus_museum_ids.is_empty()
            || self
                .focus_museum_ids
                .iter()
                .any(|id| id.trim() == museum.museum_id);
        let country_ok = self.focus_countries.is_empty()
            || self
                .focus_countries
                .iter()
                .any(|country| same_country(country, &museum.country));
        id_ok && country_ok
    }
}

fn same_country(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Scored,
    InsufficientData,
}

/// The inputs that produced a task's score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rationale {
    pub targets: Targets,
    pub artwork_shortfall: Option<u64>,
    pub exhibition_shortfall: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentTask {
    pub museum_id: String,
    pub museum_name: String,
    pub country: String,
    pub artworks_count: Option<usize>,
    pub exhibitions_count: Option<usize>,
    pub score: Option<u64>,
    pub status: TaskStatus,
    pub rationale: Rationale,
}

impl EnrichmentTask {
    fn for_museum(museum: &Museum, counts: Option<MuseumCounts>, targets: Targets) -> Self {
        let counts = counts.unwrap_or_default();
        let (score, status, note) = match (counts.artworks, counts.exhibitions) {
            (Some(artworks), Some(exhibitions)) => (
                Some(score(artworks, exhibitions, targets)),
                TaskStatus::Scored,
                None,
            ),
            (artworks, exhibitions) => {
                let mut absent = Vec::new();
                if artworks.is_none() {
                    absent.push("artworks");
                }
                if exhibitions.is_none() {
                    absent.push("exhibitions");
                }
                let note = format!("insufficient data: no {} count", absent.join(" or "));
                (None, TaskStatus::InsufficientData, Some(note))
            }
        };
        Self {
            museum_id: museum.museum_id.clone(),
            museum_name: museum.name.clone(),
            country: museum.country.clone(),
            artworks_count: counts.artworks,
            exhibitions_count: counts.exhibitions,
            score,
            status,
            rationale: Rationale {
                targets,
                artwork_shortfall: counts.artworks.map(|c| shortfall(targets.artworks, c)),
                exhibition_shortfall: counts
                    .exhibitions
                    .map(|c| shortfall(targets.exhibitions, c)),
                note,
            },
        }
    }
}

/// Ordering key: scored before insufficient, score desc, museum id asc.
pub fn task_order(a: &EnrichmentTask, b: &EnrichmentTask) -> Ordering {
    match (a.score, b.score) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.museum_id.cmp(&b.museum_id))
}

/// Build the ranked backlog. Inputs are only read.
pub fn build(
    museums: &[Museum],
    counts_by_museum: &BTreeMap<String, MuseumCounts>,
    targets: Targets,
    focus: &Focus,
) -> Vec<EnrichmentTask> {
    let mut tasks: Vec<EnrichmentTask> = museums
        .iter()
        .filter(|museum| focus.admits(museum))
        .map(|museum| {
            let counts = counts_by_museum.get(&museum.museum_id).copied();
            EnrichmentTask::for_museum(museum, counts, targets)
        })
        .collect();
    tasks.sort_by(task_order);
    tracing::info!(
        museums = museums.len(),
        tasks = tasks.len(),
        focused = !focus.is_empty(),
        "backlog built"
    );
    tasks
}

/// The machine-readable `backlog.json` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacklogDocument {
    pub schema_version: u32,
    pub run_id: String,
    pub targets: Targets,
    pub focus: Focus,
    pub total_museums: usize,
    pub top_museums_to_enrich: Vec<EnrichmentTask>,
    pub high_missing_columns: Vec<ColumnTask>,
}

impl BacklogDocument {
    pub fn new(
        run_id: &str,
        targets: Targets,
        focus: Focus,
        tasks: &[EnrichmentTask],
        columns: &[ColumnTask],
        top_n: usize,
    ) -> Self {
        Self {
            schema_version: BACKLOG_SCHEMA_VERSION,
            run_id: run_id.to_string(),
            targets,
            focus,
            total_museums: tasks.len(),
            top_museums_to_enrich: tasks.iter().take(top_n).cloned().collect(),
            high_missing_columns: columns.iter().take(top_n).cloned().collect(),
        }
    }
}

#[cfg(test)]
#[path = "backlog_tests.rs"]
mod tests;

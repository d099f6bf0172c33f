//! Coverage analysis over a seed snapshot.
//!
//! Produces per-column missingness, cross-reference match rates, and
//! per-museum entity counts. Absent columns never abort the analysis; they
//! degrade to fully-missing statistics plus a recorded [`Limitation`].
use crate::error::PlannerResult;
use crate::schema::{EntityTable, Reference, SeedTables, TableKind, REFERENCES};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Missingness of one column in one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapStatistic {
    pub table: TableKind,
    pub column: String,
    /// Part of the seed schema (false for extra CSV columns).
    pub declared: bool,
    /// Present in the CSV header.
    pub present: bool,
    pub total_rows: usize,
    pub missing_count: usize,
    /// `None` when the table has no rows.
    pub missing_ratio: Option<f64>,
}

impl GapStatistic {
    pub fn missing_pct(&self) -> Option<f64> {
        self.missing_ratio.map(|ratio| ratio * 100.0)
    }
}

/// Resolution rate of one declared reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStatistic {
    pub reference: String,
    pub total_rows: usize,
    pub matched_count: usize,
    /// `None` when the reference could not be evaluated or the table is empty.
    pub match_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    pub table: TableKind,
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitationKind {
    MissingColumn,
    MissingReference,
    MissingKey,
    DuplicateKey,
}

/// A schema gap that was recovered from locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limitation {
    pub kind: LimitationKind,
    pub table: TableKind,
    pub column: String,
    pub message: String,
}

impl Limitation {
    fn missing_column(table: TableKind, column: &str) -> Self {
        Self {
            kind: LimitationKind::MissingColumn,
            table,
            column: column.to_string(),
            message: format!("{table}.{column} is absent; counted as 100% missing"),
        }
    }
}

/// Everything the analyzer derives from a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub tables: Vec<TableSummary>,
    pub gaps: Vec<GapStatistic>,
    pub matches: Vec<MatchStatistic>,
    pub limitations: Vec<Limitation>,
}

impl CoverageReport {
    pub fn match_for(&self, reference: &Reference) -> Option<&MatchStatistic> {
        let label = reference.label();
        self.matches.iter().find(|stat| stat.reference == label)
    }

    /// Column-fill candidates at or above `threshold_pct` missingness.
    pub fn high_missing_columns(&self, threshold_pct: f64) -> Vec<ColumnTask> {
        let mut tasks: Vec<ColumnTask> = self
            .gaps
            .iter()
            .filter_map(|gap| {
                let pct = gap.missing_pct()?;
                (pct >= threshold_pct).then(|| ColumnTask {
                    table: gap.table,
                    column: gap.column.clone(),
                    missingness_pct: pct,
                    present: gap.present,
                })
            })
            .collect();
        tasks.sort_by(|a, b| {
            b.missingness_pct
                .partial_cmp(&a.missingness_pct)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.table.cmp(&b.table))
                .then_with(|| a.column.cmp(&b.column))
        });
        tasks
    }
}

/// A column whose missingness warrants a fill strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTask {
    pub table: TableKind,
    pub column: String,
    pub missingness_pct: f64,
    pub present: bool,
}

/// Analyze every seed table. Fails only when a table is absent.
pub fn analyze(tables: &SeedTables) -> PlannerResult<CoverageReport> {
    tables.require_all()?;
    let mut report = CoverageReport::default();
    for kind in TableKind::ALL {
        let table = tables.table(kind)?;
        report.tables.push(TableSummary {
            table: kind,
            rows: table.len(),
            columns: table.headers.len(),
        });
        let (gaps, limitations) = column_gaps(kind, table);
        report.gaps.extend(gaps);
        report.limitations.extend(limitations);
    }
    for reference in &REFERENCES {
        let (stat, limitation) = match_reference(tables, reference)?;
        report.matches.push(stat);
        report.limitations.extend(limitation);
    }
    for limitation in &report.limitations {
        tracing::warn!(
            table = limitation.table.as_str(),
            column = %limitation.column,
            "{}",
            limitation.message
        );
    }
    tracing::info!(
        gaps = report.gaps.len(),
        matches = report.matches.len(),
        limitations = report.limitations.len(),
        "coverage analyzed"
    );
    Ok(report)
}

/// Gap statistics for declared plus extra columns of one table.
pub fn column_gaps(kind: TableKind, table: &EntityTable) -> (Vec<GapStatistic>, Vec<Limitation>) {
    let declared = kind.declared_columns();
    let mut columns: Vec<(String, bool)> = declared
        .iter()
        .map(|column| (column.to_string(), true))
        .collect();
    for header in &table.headers {
        if !declared.contains(&header.as_str()) && !columns.iter().any(|(c, _)| c == header) {
            columns.push((header.clone(), false));
        }
    }

    let total_rows = table.len();
    let mut gaps = Vec::new();
    let mut limitations = Vec::new();
    for (column, is_declared) in columns {
        let present = table.has_column(&column);
        let missing_count = if present {
            table
                .rows
                .iter()
                .filter(|row| EntityTable::value(row, &column).is_none())
                .count()
        } else {
            limitations.push(Limitation::missing_column(kind, &column));
            total_rows
        };
        gaps.push(GapStatistic {
            table: kind,
            column,
            declared: is_declared,
            present,
            total_rows,
            missing_count,
            missing_ratio: ratio(missing_count, total_rows),
        });
    }
    gaps.sort_by(|a, b| {
        b.missing_ratio
            .unwrap_or(0.0)
            .partial_cmp(&a.missing_ratio.unwrap_or(0.0))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.column.cmp(&b.column))
    });
    (gaps, limitations)
}

/// Match statistic for one reference; non-empty values that resolve count.
pub fn match_reference(
    tables: &SeedTables,
    reference: &Reference,
) -> PlannerResult<(MatchStatistic, Option<Limitation>)> {
    let from = tables.table(reference.from_table)?;
    let to = tables.table(reference.to_table)?;
    let label = reference.label();

    let absent = if !from.has_column(reference.from_column) {
        Some((reference.from_table, reference.from_column))
    } else if !to.has_column(reference.to_column) {
        Some((reference.to_table, reference.to_column))
    } else {
        None
    };
    if let Some((table, column)) = absent {
        let limitation = Limitation {
            kind: LimitationKind::MissingReference,
            table,
            column: column.to_string(),
            message: format!("{label} could not be evaluated: {table}.{column} is absent"),
        };
        let stat = MatchStatistic {
            reference: label,
            total_rows: from.len(),
            matched_count: 0,
            match_rate: None,
        };
        return Ok((stat, Some(limitation)));
    }

    let known: BTreeSet<&str> = to
        .rows
        .iter()
        .filter_map(|row| EntityTable::value(row, reference.to_column))
        .collect();
    let matched_count = from
        .rows
        .iter()
        .filter_map(|row| EntityTable::value(row, reference.from_column))
        .filter(|value| known.contains(value))
        .count();
    let stat = MatchStatistic {
        reference: label,
        total_rows: from.len(),
        matched_count,
        match_rate: ratio(matched_count, from.len()),
    };
    Ok((stat, None))
}

/// Artwork and exhibition counts for one museum; `None` when uncountable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuseumCounts {
    pub artworks: Option<usize>,
    pub exhibitions: Option<usize>,
}

/// Count artworks and exhibitions per museum id.
///
/// Every id in the museums table gets an entry. A table lacking `museum_id`
/// leaves its counts as `None` for every museum and records a limitation.
pub fn museum_counts(
    tables: &SeedTables,
) -> PlannerResult<(BTreeMap<String, MuseumCounts>, Vec<Limitation>)> {
    let museums = tables.table(TableKind::Museums)?;
    let mut limitations = Vec::new();
    let artworks = counts_by_museum(
        tables.table(TableKind::Artworks)?,
        TableKind::Artworks,
        &mut limitations,
    );
    let exhibitions = counts_by_museum(
        tables.table(TableKind::Exhibitions)?,
        TableKind::Exhibitions,
        &mut limitations,
    );

    let mut counts = BTreeMap::new();
    for row in &museums.rows {
        let Some(museum_id) = EntityTable::value(row, "museum_id") else {
            continue;
        };
        counts.insert(
            museum_id.to_string(),
            MuseumCounts {
                artworks: count_for(artworks.as_ref(), museum_id),
                exhibitions: count_for(exhibitions.as_ref(), museum_id),
            },
        );
    }
    Ok((counts, limitations))
}

fn counts_by_museum<'a>(
    table: &'a EntityTable,
    kind: TableKind,
    limitations: &mut Vec<Limitation>,
) -> Option<BTreeMap<&'a str, usize>> {
    if !table.has_column("museum_id") {
        limitations.push(Limitation {
            kind: LimitationKind::MissingKey,
            table: kind,
            column: "museum_id".to_string(),
            message: format!("{kind}.museum_id is absent; per-museum {kind} counts unavailable"),
        });
        return None;
    }
    let mut by_museum = BTreeMap::new();
    for row in &table.rows {
        if let Some(museum_id) = EntityTable::value(row, "museum_id") {
            *by_museum.entry(museum_id).or_insert(0) += 1;
        }
    }
    Some(by_museum)
}

fn count_for(by_museum: Option<&BTreeMap<&str, usize>>, museum_id: &str) -> Option<usize> {
    by_museum.map(|by_museum| by_museum.get(museum_id).copied().unwrap_or(0))
}

fn ratio(part: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(part as f64 / total as f64)
}

#[cfg(test)]
#[path = "coverage_tests.rs"]
mod tests;

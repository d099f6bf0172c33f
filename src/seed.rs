//! Seed snapshot loading.
//!
//! Reads the four seed CSVs into [`SeedTables`] and copies them into a run
//! folder so every artifact can be traced back to the exact inputs.
use crate::error::{PlannerError, PlannerResult};
use crate::schema::{EntityTable, Row, SeedTables, TableKind};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve the seed file paths, failing on the first absent one.
pub fn seed_paths(seed_dir: &Path) -> PlannerResult<Vec<(TableKind, PathBuf)>> {
    let mut paths = Vec::new();
    for kind in TableKind::ALL {
        let path = seed_dir.join(kind.file_name());
        if !path.is_file() {
            return Err(PlannerError::InputMissing { table: kind, path });
        }
        paths.push((kind, path));
    }
    Ok(paths)
}

/// Load all four seed tables. Every file is checked before any is read.
pub fn load_seed(seed_dir: &Path) -> PlannerResult<SeedTables> {
    let paths = seed_paths(seed_dir)?;
    let mut tables = SeedTables::new(seed_dir.to_path_buf());
    for (kind, path) in paths {
        let table = read_table(&path)?;
        tracing::info!(
            table = kind.as_str(),
            rows = table.len(),
            columns = table.headers.len(),
            "loaded seed table"
        );
        tables.insert(kind, table);
    }
    Ok(tables)
}

/// Read one CSV file into an [`EntityTable`].
pub fn read_table(path: &Path) -> PlannerResult<EntityTable> {
    let csv_err = |source: csv::Error| PlannerError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|header| header.to_string())
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), value.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(EntityTable::new(headers, rows))
}

/// Copy the seed files into `copies_dir`.
pub fn snapshot_seed(seed_dir: &Path, copies_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(copies_dir)
        .with_context(|| format!("create {}", copies_dir.display()))?;
    let mut copied = Vec::new();
    for (kind, source) in seed_paths(seed_dir)? {
        let dest = copies_dir.join(kind.file_name());
        fs::copy(&source, &dest)
            .with_context(|| format!("copy {} to {}", source.display(), dest.display()))?;
        copied.push(dest);
    }
    Ok(copied)
}

#[cfg(test)]
#[path = "seed_tests.rs"]
mod tests;

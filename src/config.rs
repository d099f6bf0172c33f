//! Planner configuration.
//!
//! A JSON document with every field defaulted, so an empty `{}` is a valid
//! config. CLI flags are layered over the loaded file by the caller.
use crate::backlog::Focus;
use crate::priority::{Targets, DEFAULT_TARGET_ARTWORKS, DEFAULT_TARGET_EXHIBITIONS};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Current schema version for planner config files.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_HIGH_MISSING_THRESHOLD_PCT: f64 = 20.0;
pub const DEFAULT_BACKLOG_TOP_N: usize = 25;
pub const DEFAULT_REPORT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub schema_version: u32,
    pub target_artworks_per_museum: u32,
    pub target_exhibitions_per_museum: u32,
    pub focus_museum_ids: BTreeSet<String>,
    pub focus_countries: BTreeSet<String>,
    /// Columns at or above this missingness are listed as fill candidates.
    pub high_missing_threshold_pct: f64,
    /// Entries kept in `backlog.json`.
    pub backlog_top_n: usize,
    /// Entries shown in `gap_report.md`.
    pub report_top_n: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION,
            target_artworks_per_museum: DEFAULT_TARGET_ARTWORKS,
            target_exhibitions_per_museum: DEFAULT_TARGET_EXHIBITIONS,
            focus_museum_ids: BTreeSet::new(),
            focus_countries: BTreeSet::new(),
            high_missing_threshold_pct: DEFAULT_HIGH_MISSING_THRESHOLD_PCT,
            backlog_top_n: DEFAULT_BACKLOG_TOP_N,
            report_top_n: DEFAULT_REPORT_TOP_N,
        }
    }
}

impl PlannerConfig {
    pub fn targets(&self) -> Targets {
        Targets {
            artworks: self.target_artworks_per_museum,
            exhibitions: self.target_exhibitions_per_museum,
        }
    }

    /// Focus sets with blank entries removed and values trimmed.
    pub fn focus(&self) -> Focus {
        let clean = |values: &BTreeSet<String>| -> BTreeSet<String> {
            values
                .iter()
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .collect()
        };
        Focus {
            focus_museum_ids: clean(&self.focus_museum_ids),
            focus_countries: clean(&self.focus_countries),
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub target_artworks: Option<u32>,
    pub target_exhibitions: Option<u32>,
    pub focus_museum_ids: Vec<String>,
    pub focus_countries: Vec<String>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut PlannerConfig) {
        if let Some(target) = self.target_artworks {
            config.target_artworks_per_museum = target;
        }
        if let Some(target) = self.target_exhibitions {
            config.target_exhibitions_per_museum = target;
        }
        if !self.focus_museum_ids.is_empty() {
            config.focus_museum_ids = self.focus_museum_ids.iter().cloned().collect();
        }
        if !self.focus_countries.is_empty() {
            config.focus_countries = self.focus_countries.iter().cloned().collect();
        }
    }
}

/// Render a pretty JSON config stub.
pub fn config_stub() -> Result<String> {
    serde_json::to_string_pretty(&PlannerConfig::default()).context("serialize config stub")
}

pub fn load_config(path: &Path) -> Result<PlannerConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: PlannerConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    Ok(config)
}

/// Load `path` when given, otherwise defaults; then apply overrides and validate.
pub fn resolve_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<PlannerConfig> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => PlannerConfig::default(),
    };
    overrides.apply(&mut config);
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &PlannerConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported config schema_version {}",
            config.schema_version
        ));
    }
    let threshold = config.high_missing_threshold_pct;
    if !(0.0..=100.0).contains(&threshold) {
        return Err(anyhow!(
            "high_missing_threshold_pct must be within 0..=100 (got {threshold})"
        ));
    }
    if config.backlog_top_n == 0 || config.report_top_n == 0 {
        return Err(anyhow!("backlog_top_n and report_top_n must be positive"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

//! Typed paths into a run folder.
//!
//! Centralizing path construction keeps artifact locations consistent
//! between the commands that write them and the ones that read them back.
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

pub const DEFAULT_RUNS_DIR: &str = "runs";

/// Default run id, e.g. `run_20260215_161030`.
pub fn default_run_id(now: DateTime<Utc>) -> String {
    format!("run_{}", now.format("%Y%m%d_%H%M%S"))
}

/// Convenience wrapper for locating run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    root: PathBuf,
}

impl RunPaths {
    /// Create a path helper rooted at an existing or future run folder.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Run folder for `run_id` under `runs_dir`.
    pub fn for_run(runs_dir: &Path, run_id: &str) -> Self {
        Self::new(runs_dir.join(run_id))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return the run id (the folder name).
    pub fn run_id(&self) -> String {
        self.root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Return the `copies/` directory holding the seed snapshot.
    pub fn copies_dir(&self) -> PathBuf {
        self.root.join("copies")
    }

    /// Return the `gap_report.json` path.
    pub fn gap_report_json(&self) -> PathBuf {
        self.root.join("gap_report.json")
    }

    /// Return the `gap_report.md` path.
    pub fn gap_report_md(&self) -> PathBuf {
        self.root.join("gap_report.md")
    }

    /// Return the `backlog.json` path.
    pub fn backlog_path(&self) -> PathBuf {
        self.root.join("backlog.json")
    }

    pub fn plans_dir(&self) -> PathBuf {
        self.root.join("plans")
    }

    /// Return the routing plan path for one museum.
    pub fn plan_path(&self, museum_id: &str) -> PathBuf {
        self.plans_dir().join(format!("{}.json", file_stem(museum_id)))
    }
}

/// Museum ids are slugs, but anything else is made path-safe.
fn file_stem(museum_id: &str) -> String {
    museum_id
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn run_id_uses_utc_timestamp() {
        let now = Utc.with_ymd_and_hms(2026, 2, 15, 16, 10, 30).unwrap();
        assert_eq!(default_run_id(now), "run_20260215_161030");
    }

    #[test]
    fn artifacts_live_under_run_root() {
        let paths = RunPaths::for_run(Path::new("runs"), "run_1");
        assert_eq!(paths.run_id(), "run_1");
        assert_eq!(paths.backlog_path(), PathBuf::from("runs/run_1/backlog.json"));
        assert_eq!(
            paths.plan_path("art-institute-of-chicago-us"),
            PathBuf::from("runs/run_1/plans/art-institute-of-chicago-us.json")
        );
        assert_eq!(
            paths.plan_path("../odd id"),
            PathBuf::from("runs/run_1/plans/___odd_id.json")
        );
    }
}

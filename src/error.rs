//! Error taxonomy for the planning core.
//!
//! Only conditions that abort a run are errors. Schema gaps (absent columns or
//! references) are recorded as [`crate::coverage::Limitation`] values instead.
use crate::schema::TableKind;
use std::path::PathBuf;
use thiserror::Error;

pub type PlannerResult<T> = std::result::Result<T, PlannerError>;

#[derive(Error, Debug)]
pub enum PlannerError {
    /// A required seed table is absent.
    #[error("required input missing: {table} ({})", .path.display())]
    InputMissing { table: TableKind, path: PathBuf },

    /// Caller-supplied value rejected before any processing.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A routing rule table failed validation at construction.
    #[error("invalid routing rules: {0}")]
    InvalidRules(String),

    #[error("read {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

//! Coverage scoring and source routing for museum-collection enrichment.
//!
//! The core is pure: [`coverage`], [`priority`], [`backlog`] and [`router`]
//! only read their inputs. File I/O lives in [`seed`], [`report`] and
//! [`workflow`].
pub mod backlog;
pub mod cli;
pub mod config;
pub mod coverage;
pub mod error;
pub mod paths;
pub mod priority;
pub mod report;
pub mod router;
pub mod schema;
pub mod seed;
pub mod workflow;

//! Enrichment priority scoring.
//!
//! Exhibition shortfall weighs twice artwork shortfall: exhibition data is
//! scarcer and costlier to obtain.
use serde::{Deserialize, Serialize};

pub const ARTWORK_WEIGHT: u64 = 1;
pub const EXHIBITION_WEIGHT: u64 = 2;

pub const DEFAULT_TARGET_ARTWORKS: u32 = 100;
pub const DEFAULT_TARGET_EXHIBITIONS: u32 = 30;

/// Per-museum quotas the score is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Targets {
    pub artworks: u32,
    pub exhibitions: u32,
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            artworks: DEFAULT_TARGET_ARTWORKS,
            exhibitions: DEFAULT_TARGET_EXHIBITIONS,
        }
    }
}

/// How far below a quota a count sits; zero once the quota is met.
pub fn shortfall(target: u32, count: usize) -> u64 {
    u64::from(target).saturating_sub(count as u64)
}

/// Weighted shortfall score. Pure; never negative.
pub fn score(artwork_count: usize, exhibition_count: usize, targets: Targets) -> u64 {
    shortfall(targets.artworks, artwork_count) * ARTWORK_WEIGHT
        + shortfall(targets.exhibitions, exhibition_count) * EXHIBITION_WEIGHT
}

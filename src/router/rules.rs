//! Static routing rule tables.
//!
//! A [`RuleTable`] is built once, validated, and then only read. Lookup walks
//! the exact-id rules in declaration order and falls through to the fallback,
//! so every well-formed id matches something.
use super::apis::KnownApi;
use super::EntityKind;
use crate::error::{PlannerError, PlannerResult};
use std::collections::BTreeSet;

pub const AIC_MUSEUM_ID: &str = "art-institute-of-chicago-us";
pub const MET_MUSEUM_ID: &str = "the-metropolitan-museum-of-art-new-york-city-us";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Reliable,
    /// The API exists but cannot be trusted for this entity type.
    Unreliable,
}

/// Maps one museum id to the API that serves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactRule {
    pub museum_id: String,
    pub api: KnownApi,
    pub artworks: Availability,
    pub exhibitions: Availability,
}

impl ExactRule {
    pub fn new(museum_id: &str, api: KnownApi) -> Self {
        Self {
            museum_id: museum_id.to_string(),
            api,
            artworks: Availability::Reliable,
            exhibitions: Availability::Reliable,
        }
    }

    pub fn unreliable(mut self, entity: EntityKind) -> Self {
        match entity {
            EntityKind::Artworks => self.artworks = Availability::Unreliable,
            EntityKind::Exhibitions => self.exhibitions = Availability::Unreliable,
        }
        self
    }

    pub fn availability(&self, entity: EntityKind) -> Availability {
        match entity {
            EntityKind::Artworks => self.artworks,
            EntityKind::Exhibitions => self.exhibitions,
        }
    }

    /// Marked reliable and backed by a plan of the rule's API.
    pub fn serves(&self, entity: EntityKind) -> bool {
        self.availability(entity) == Availability::Reliable && self.api.plan(entity).is_some()
    }
}

/// Outcome of matching a museum id against the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleMatch<'a> {
    Exact(&'a ExactRule),
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<ExactRule>,
}

impl RuleTable {
    /// Validate and freeze a rule list.
    pub fn new(rules: Vec<ExactRule>) -> PlannerResult<Self> {
        let mut seen = BTreeSet::new();
        for rule in &rules {
            let id = rule.museum_id.trim();
            if id.is_empty() || id != rule.museum_id {
                return Err(PlannerError::InvalidRules(format!(
                    "rule museum_id must be a non-empty trimmed id (got {:?})",
                    rule.museum_id
                )));
            }
            if !seen.insert(id) {
                return Err(PlannerError::InvalidRules(format!(
                    "duplicate rule for {id}"
                )));
            }
            if !rule.serves(EntityKind::Artworks) && !rule.serves(EntityKind::Exhibitions) {
                return Err(PlannerError::InvalidRules(format!(
                    "rule for {id} serves no entity type"
                )));
            }
        }
        Ok(Self { rules })
    }

    /// A table with only the fallback rule.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Production rules.
    pub fn builtin() -> Self {
        Self {
            rules: vec![
                ExactRule::new(AIC_MUSEUM_ID, KnownApi::Aic).unreliable(EntityKind::Exhibitions),
                ExactRule::new(MET_MUSEUM_ID, KnownApi::Met).unreliable(EntityKind::Exhibitions),
            ],
        }
    }

    pub fn rules(&self) -> &[ExactRule] {
        &self.rules
    }

    /// First exact rule for `museum_id`, else the fallback.
    pub fn lookup(&self, museum_id: &str) -> RuleMatch<'_> {
        self.rules
            .iter()
            .find(|rule| rule.museum_id == museum_id)
            .map_or(RuleMatch::Fallback, RuleMatch::Exact)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

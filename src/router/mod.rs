//! Source routing: museum id in, acquisition plan out.
//!
//! Routing is pure planning over a [`RuleTable`] fixed at construction. It
//! never touches the network, and the same id always yields the same plan.
mod apis;
mod rules;

pub use apis::KnownApi;
pub use rules::{Availability, ExactRule, RuleMatch, RuleTable, AIC_MUSEUM_ID, MET_MUSEUM_ID};

use crate::backlog::EnrichmentTask;
use crate::error::{PlannerError, PlannerResult};
use crate::priority::Targets;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub const DEFAULT_ENRICHMENT_GOAL: &str = "100 artworks + 30 exhibitions";

/// Where a plan sends the enrichment executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    AicApi,
    MetApi,
    FallbackManual,
}

impl SourceTag {
    /// Return the stable string identifier used in JSON artifacts.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::AicApi => "aic_api",
            SourceTag::MetApi => "met_api",
            SourceTag::FallbackManual => "fallback_manual",
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity types an acquisition plan covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Artworks,
    Exhibitions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub source_field: String,
    pub seed_column: String,
}

/// How to acquire one entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPlan {
    pub source: SourceTag,
    pub method: String,
    pub endpoints: Vec<String>,
    pub notes: String,
    pub field_map: Vec<FieldMapping>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingPlan {
    pub museum_id: String,
    pub enrichment_goal: String,
    pub source: SourceTag,
    pub artworks_plan: EntityPlan,
    pub exhibitions_plan: EntityPlan,
    pub mapping_notes: Vec<String>,
    pub provenance: Vec<String>,
}

/// Enrichment goal phrased from quotas, e.g. `100 artworks + 30 exhibitions`.
pub fn goal_for(targets: Targets) -> String {
    format!(
        "{} artworks + {} exhibitions",
        targets.artworks, targets.exhibitions
    )
}

#[derive(Debug, Clone, Default)]
pub struct Router {
    rules: RuleTable,
}

impl Router {
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Build the acquisition plan for one museum.
    ///
    /// `priority_fields` only adds an advisory note; provenance obligations
    /// are never affected by it.
    pub fn route(
        &self,
        museum_id: &str,
        enrichment_goal: Option<&str>,
        priority_fields: &[String],
    ) -> PlannerResult<RoutingPlan> {
        let museum_id = museum_id.trim();
        if museum_id.is_empty() {
            return Err(PlannerError::InvalidInput(
                "museum_id must be non-empty".to_string(),
            ));
        }
        let enrichment_goal = enrichment_goal
            .map(str::trim)
            .filter(|goal| !goal.is_empty())
            .unwrap_or(DEFAULT_ENRICHMENT_GOAL)
            .to_string();

        let mut plan = match self.rules.lookup(museum_id) {
            RuleMatch::Exact(rule) => exact_plan(museum_id, enrichment_goal, rule),
            RuleMatch::Fallback => fallback_plan(museum_id, enrichment_goal),
        };
        if let Some(note) = priority_note(priority_fields) {
            plan.mapping_notes.push(note);
        }
        tracing::debug!(
            museum_id,
            source = plan.source.as_str(),
            artworks = plan.artworks_plan.source.as_str(),
            exhibitions = plan.exhibitions_plan.source.as_str(),
            "routed museum"
        );
        Ok(plan)
    }

    /// Route the first `top_n` backlog tasks, in backlog order.
    pub fn route_backlog(
        &self,
        tasks: &[EnrichmentTask],
        top_n: usize,
        targets: Targets,
    ) -> PlannerResult<Vec<RoutingPlan>> {
        let goal = goal_for(targets);
        tasks
            .iter()
            .take(top_n)
            .map(|task| self.route(&task.museum_id, Some(&goal), &[]))
            .collect()
    }
}

fn exact_plan(museum_id: &str, enrichment_goal: String, rule: &ExactRule) -> RoutingPlan {
    let entity_plan = |entity| match (rule.availability(entity), rule.api.plan(entity)) {
        (Availability::Reliable, Some(plan)) => plan,
        _ => apis::degraded_plan(rule.api, entity),
    };
    let mut provenance = apis::base_provenance();
    provenance.extend(rule.api.provenance());
    RoutingPlan {
        museum_id: museum_id.to_string(),
        enrichment_goal,
        source: rule.api.source_tag(),
        artworks_plan: entity_plan(EntityKind::Artworks),
        exhibitions_plan: entity_plan(EntityKind::Exhibitions),
        mapping_notes: rule.api.mapping_notes(),
        provenance,
    }
}

fn fallback_plan(museum_id: &str, enrichment_goal: String) -> RoutingPlan {
    RoutingPlan {
        museum_id: museum_id.to_string(),
        enrichment_goal,
        source: SourceTag::FallbackManual,
        artworks_plan: apis::fallback_plan(EntityKind::Artworks),
        exhibitions_plan: apis::fallback_plan(EntityKind::Exhibitions),
        mapping_notes: apis::fallback_mapping_notes(),
        provenance: apis::base_provenance(),
    }
}

fn priority_note(priority_fields: &[String]) -> Option<String> {
    let mut seen = BTreeSet::new();
    let fields: Vec<&str> = priority_fields
        .iter()
        .map(|field| field.trim())
        .filter(|field| !field.is_empty() && seen.insert(*field))
        .collect();
    if fields.is_empty() {
        return None;
    }
    Some(format!(
        "Priority fields (advisory): {}. Fill these first; provenance is still required for each.",
        fields.join(", ")
    ))
}

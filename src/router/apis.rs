//! Acquisition plans for each known collection API and for the fallback.
//!
//! Endpoint templates and field names follow the public APIs of the Art
//! Institute of Chicago (`api.artic.edu`) and The Met
//! (`collectionapi.metmuseum.org`).
use super::{EntityKind, EntityPlan, FieldMapping, SourceTag};
use serde::{Deserialize, Serialize};

/// Collection APIs with a dedicated routing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnownApi {
    Aic,
    Met,
}

const AIC_IIIF_IMAGE: &str = "https://www.artic.edu/iiif/2/{image_id}/full/843,/0/default.jpg";
const AIC_ARTWORK_PAGE: &str = "https://www.artic.edu/artworks/{id}";

impl KnownApi {
    pub fn source_tag(&self) -> SourceTag {
        match self {
            KnownApi::Aic => SourceTag::AicApi,
            KnownApi::Met => SourceTag::MetApi,
        }
    }

    /// Plan for `entity`, or `None` when this API has no records of that type.
    pub fn plan(&self, entity: EntityKind) -> Option<EntityPlan> {
        let plan = match (self, entity) {
            (KnownApi::Aic, EntityKind::Artworks) => EntityPlan {
                source: self.source_tag(),
                method: "AIC public API search + IIIF image fetch".to_string(),
                endpoints: vec![
                    "https://api.artic.edu/api/v1/artworks/search".to_string(),
                    "https://api.artic.edu/api/v1/artworks/{id}".to_string(),
                ],
                notes: format!(
                    "Use fields= to request needed columns. For images use {AIC_IIIF_IMAGE}"
                ),
                field_map: fields(&[
                    ("id", "artwork_id (as aic-{id})"),
                    ("title", "title"),
                    ("artist_id", "artist_id (as aic-artist-{artist_id})"),
                    ("artist_title", "artists.name"),
                    ("classification_title", "art_type"),
                    ("date_start", "year"),
                    ("image_id", "image_url (IIIF pattern)"),
                    ("thumbnail.alt_text", "description"),
                    ("medium_display", "medium"),
                    ("dimensions", "dimensions"),
                    ("is_on_view", "on_view (TRUE/FALSE)"),
                ]),
            },
            (KnownApi::Aic, EntityKind::Exhibitions) => EntityPlan {
                source: self.source_tag(),
                method: "AIC public API exhibitions listing".to_string(),
                endpoints: vec![
                    "https://api.artic.edu/api/v1/exhibitions/search".to_string(),
                    "https://api.artic.edu/api/v1/exhibitions/{id}".to_string(),
                ],
                notes: "Request title, aic_start_at, aic_end_at, web_url.".to_string(),
                field_map: fields(&[
                    ("id", "exhibition_id (as aic-exh-{id})"),
                    ("title", "title"),
                    ("aic_start_at", "start_date"),
                    ("aic_end_at", "end_date"),
                    ("web_url", "exhibition_url"),
                ]),
            },
            (KnownApi::Met, EntityKind::Artworks) => EntityPlan {
                source: self.source_tag(),
                method: "MET Collection API objects list + object detail".to_string(),
                endpoints: vec![
                    "https://collectionapi.metmuseum.org/public/collection/v1/objects".to_string(),
                    "https://collectionapi.metmuseum.org/public/collection/v1/objects/{objectID}"
                        .to_string(),
                ],
                notes: "Use primaryImageSmall, artistDisplayName, title, objectDate, medium, \
                        culture, department, objectURL."
                    .to_string(),
                field_map: fields(&[
                    ("objectID", "artwork_id (as met-{objectID})"),
                    ("title", "title"),
                    ("artistDisplayName", "artist_id (as met-artist-{slug}) and artists.name"),
                    ("objectName", "art_type"),
                    ("objectDate", "year (first four-digit year)"),
                    ("primaryImageSmall", "image_url"),
                    ("creditLine", "description"),
                    ("medium", "medium"),
                    ("dimensions", "dimensions"),
                    ("objectURL", "museum_page_url"),
                    ("isOnView", "on_view (TRUE/FALSE)"),
                ]),
            },
            (KnownApi::Met, EntityKind::Exhibitions) => return None,
        };
        Some(plan)
    }

    /// Why `entity` is routed to the fallback even though the museum matched.
    pub fn unavailable_reason(&self, entity: EntityKind) -> &'static str {
        match (self, entity) {
            (KnownApi::Aic, EntityKind::Exhibitions) => {
                "AIC API coverage for exhibitions may be incomplete; use museum exhibition pages if needed."
            }
            (KnownApi::Met, EntityKind::Exhibitions) => {
                "MET API is collection-focused; exhibitions typically require museum exhibition pages or another dataset."
            }
            (KnownApi::Aic, EntityKind::Artworks) => {
                "AIC artwork records are not served for this museum; use collection pages."
            }
            (KnownApi::Met, EntityKind::Artworks) => {
                "MET object records are not served for this museum; use collection pages."
            }
        }
    }

    /// Field-mapping and provenance notes specific to this API.
    pub fn mapping_notes(&self) -> Vec<String> {
        let notes: &[&str] = match self {
            KnownApi::Aic => &[
                "Store provenance_url for each artwork (AIC artwork page or API record).",
                "Map image_id -> image_url using IIIF pattern.",
                "Normalize dates into your artworks.csv / exhibitions.csv schema.",
            ],
            KnownApi::Met => &[
                "Store objectURL as provenance_url.",
                "Use primaryImageSmall for image_url when present.",
                "Normalize dates and artists into your schema.",
            ],
        };
        notes.iter().map(|note| note.to_string()).collect()
    }

    /// Provenance obligations beyond the ones every plan carries.
    pub fn provenance(&self) -> Vec<String> {
        match self {
            KnownApi::Aic => vec![format!("Set museum_page_url to {AIC_ARTWORK_PAGE}.")],
            KnownApi::Met => vec!["Set museum_page_url to the object's objectURL.".to_string()],
        }
    }
}

/// Secondary strategy for any entity not served by a matched API.
pub fn fallback_plan(entity: EntityKind) -> EntityPlan {
    match entity {
        EntityKind::Artworks => EntityPlan {
            source: SourceTag::FallbackManual,
            method: "wikidata + official museum collection pages".to_string(),
            endpoints: vec!["https://query.wikidata.org/sparql".to_string()],
            notes: "Prefer official sources; only scrape if allowed by robots/terms.".to_string(),
            field_map: fields(&[
                ("wikidata item label", "title"),
                ("P170 (creator)", "artist_id / artists.name"),
                ("P571 (inception)", "year"),
                ("P186 (made from material)", "medium"),
                ("collection page URL", "museum_page_url"),
            ]),
        },
        EntityKind::Exhibitions => EntityPlan {
            source: SourceTag::FallbackManual,
            method: "official museum exhibition pages".to_string(),
            endpoints: Vec::new(),
            notes: "Collect title, date range, link, and relate to artworks when possible."
                .to_string(),
            field_map: fields(&[
                ("exhibition title", "title"),
                ("opening date", "start_date"),
                ("closing date", "end_date"),
                ("exhibition page URL", "exhibition_url"),
            ]),
        },
    }
}

/// Fallback plan carrying the API-specific reason it was chosen.
pub fn degraded_plan(api: KnownApi, entity: EntityKind) -> EntityPlan {
    let mut plan = fallback_plan(entity);
    plan.notes = format!("{} {}", api.unavailable_reason(entity), plan.notes);
    plan
}

pub fn fallback_mapping_notes() -> Vec<String> {
    vec![
        "Always store provenance URLs for any enriched record.".to_string(),
        "Do not fabricate missing fields; leave blank if unknown.".to_string(),
    ]
}

/// Obligations every plan carries regardless of source.
pub fn base_provenance() -> Vec<String> {
    vec![
        "Record provenance_url (source page or API record URL) for every enriched value."
            .to_string(),
        "Record the source tag and retrieval method alongside each enriched record.".to_string(),
        "Do not fabricate missing fields; leave blank if unknown.".to_string(),
    ]
}

fn fields(pairs: &[(&str, &str)]) -> Vec<FieldMapping> {
    pairs
        .iter()
        .map(|(source_field, seed_column)| FieldMapping {
            source_field: source_field.to_string(),
            seed_column: seed_column.to_string(),
        })
        .collect()
}

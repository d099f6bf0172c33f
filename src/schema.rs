//! Schema types for the seed dataset.
//!
//! The seed snapshot is four tables of string cells. Absence of a value is
//! meaningful, so cells stay as raw strings and "missing" is decided here.
use crate::error::{PlannerError, PlannerResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// The four seed entities.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Museums,
    Artworks,
    Artists,
    Exhibitions,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Museums,
        TableKind::Artworks,
        TableKind::Artists,
        TableKind::Exhibitions,
    ];

    /// Return the stable string identifier used in JSON artifacts.
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Museums => "museums",
            TableKind::Artworks => "artworks",
            TableKind::Artists => "artists",
            TableKind::Exhibitions => "exhibitions",
        }
    }

    /// Conventional seed file name.
    pub fn file_name(&self) -> &'static str {
        match self {
            TableKind::Museums => "museums.csv",
            TableKind::Artworks => "artworks.csv",
            TableKind::Artists => "artists.csv",
            TableKind::Exhibitions => "exhibitions.csv",
        }
    }

    /// Columns the seed schema expects for this table, in schema order.
    pub fn declared_columns(&self) -> &'static [&'static str] {
        match self {
            TableKind::Museums => &[
                "museum_id",
                "museum_name",
                "city",
                "country",
                "website_url",
                "collection_api",
            ],
            TableKind::Artworks => &[
                "artwork_id",
                "title",
                "artist_id",
                "art_type",
                "year",
                "image_url",
                "description",
                "museum_id",
                "medium",
                "dimensions",
                "museum_page_url",
                "on_view",
                "highlight",
            ],
            TableKind::Artists => &["artist_id", "name", "nationality", "birth_year", "death_year"],
            TableKind::Exhibitions => &[
                "exhibition_id",
                "museum_id",
                "title",
                "start_date",
                "end_date",
                "exhibition_url",
            ],
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared foreign-key relationship between two seed tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub from_table: TableKind,
    pub from_column: &'static str,
    pub to_table: TableKind,
    pub to_column: &'static str,
}

impl Reference {
    /// Stable label, e.g. `artworks.artist_id -> artists.artist_id`.
    pub fn label(&self) -> String {
        format!(
            "{}.{} -> {}.{}",
            self.from_table, self.from_column, self.to_table, self.to_column
        )
    }
}

pub const REFERENCES: [Reference; 3] = [
    Reference {
        from_table: TableKind::Artworks,
        from_column: "artist_id",
        to_table: TableKind::Artists,
        to_column: "artist_id",
    },
    Reference {
        from_table: TableKind::Artworks,
        from_column: "museum_id",
        to_table: TableKind::Museums,
        to_column: "museum_id",
    },
    Reference {
        from_table: TableKind::Exhibitions,
        from_column: "museum_id",
        to_table: TableKind::Museums,
        to_column: "museum_id",
    },
];

pub type Row = BTreeMap<String, String>;

/// Ordered rows of one seed table plus the header it was read with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityTable {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl EntityTable {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|header| header == column)
    }

    /// Trimmed, non-blank value of `column` in `row`.
    pub fn value<'a>(row: &'a Row, column: &str) -> Option<&'a str> {
        row.get(column)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

/// One museum as loaded from the seed snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Museum {
    pub museum_id: String,
    pub name: String,
    pub country: String,
    pub city: String,
    pub api_endpoints: Vec<String>,
}

/// All four seed tables of one snapshot.
#[derive(Debug, Clone, Default)]
pub struct SeedTables {
    root: PathBuf,
    tables: BTreeMap<TableKind, EntityTable>,
}

impl SeedTables {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            tables: BTreeMap::new(),
        }
    }

    pub fn with_table(mut self, kind: TableKind, table: EntityTable) -> Self {
        self.tables.insert(kind, table);
        self
    }

    pub fn insert(&mut self, kind: TableKind, table: EntityTable) {
        self.tables.insert(kind, table);
    }

    /// Look up a table; absence is fatal for every consumer.
    pub fn table(&self, kind: TableKind) -> PlannerResult<&EntityTable> {
        self.tables
            .get(&kind)
            .ok_or_else(|| PlannerError::InputMissing {
                table: kind,
                path: self.root.join(kind.file_name()),
            })
    }

    /// Fail unless every seed table is present.
    pub fn require_all(&self) -> PlannerResult<()> {
        for kind in TableKind::ALL {
            self.table(kind)?;
        }
        Ok(())
    }
}

/// Split a `collection_api` cell into endpoints.
pub fn parse_endpoints(cell: &str) -> Vec<String> {
    cell.split([';', '|'])
        .map(str::trim)
        .filter(|endpoint| !endpoint.is_empty())
        .map(str::to_string)
        .collect()
}

/// Museums derived from the museums table plus what was dropped on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MuseumRows {
    pub museums: Vec<Museum>,
    /// Rows without a museum id.
    pub skipped: usize,
    /// Ids seen again after their first row, in table order.
    pub duplicates: Vec<String>,
}

/// Derive museums from the museums table.
///
/// Rows without an id are skipped. The first row for an id wins; later rows
/// with the same id are dropped and listed in `duplicates`.
pub fn museums_from_table(table: &EntityTable) -> MuseumRows {
    let mut out = MuseumRows::default();
    let mut seen = BTreeSet::new();
    for row in &table.rows {
        let Some(museum_id) = EntityTable::value(row, "museum_id") else {
            out.skipped += 1;
            continue;
        };
        if !seen.insert(museum_id) {
            out.duplicates.push(museum_id.to_string());
            continue;
        }
        let text = |column: &str| EntityTable::value(row, column).unwrap_or("").to_string();
        out.museums.push(Museum {
            museum_id: museum_id.to_string(),
            name: text("museum_name"),
            country: text("country"),
            city: text("city"),
            api_endpoints: EntityTable::value(row, "collection_api")
                .map(parse_endpoints)
                .unwrap_or_default(),
        });
    }
    out
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

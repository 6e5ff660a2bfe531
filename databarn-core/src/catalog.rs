//! Partition catalog — the dimensions and slices every leaderboard is cut by.
//!
//! Four dimensions are declared:
//! - **All time**: a single slice over every win
//! - **Surface**: Turf, Polytrack
//! - **Race type**: maiden, claim, allowance, stakes (each a set of type codes)
//! - **Distance**: sprint (≤ 7 furlongs), route (> 7 furlongs)
//!
//! The catalog pairs each slice with a [`SlicePredicate`] that is handed to the
//! fact source untouched. The aggregator and ranker never look at the catalog's
//! size or contents beyond iterating it, so adding a slice is one entry here.
//!
//! The maiden and claim sets both contain "MCL". The overlap is kept as
//! declared: a maiden-claiming win counts toward both slices.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Sprint/route cutoff in furlongs. A race of exactly this distance is a sprint.
pub const SPRINT_MAX_FURLONGS: f64 = 7.0;

/// A partitioning dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    AllTime,
    Surface,
    RaceType,
    Distance,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::AllTime,
        Dimension::Surface,
        Dimension::RaceType,
        Dimension::Distance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllTime => "all_time",
            Self::Surface => "surface",
            Self::RaceType => "race_type",
            Self::Distance => "distance",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One partition of the fact set along one dimension, e.g. `surface/Turf`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slice {
    pub dimension: Dimension,
    pub label: String,
}

impl Slice {
    pub fn new(dimension: Dimension, label: impl Into<String>) -> Self {
        Self {
            dimension,
            label: label.into(),
        }
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.dimension, self.label)
    }
}

/// Distance class of a race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceClass {
    /// Distance ≤ [`SPRINT_MAX_FURLONGS`].
    Sprint,
    /// Distance > [`SPRINT_MAX_FURLONGS`].
    Route,
}

impl DistanceClass {
    pub fn contains(&self, furlongs: f64) -> bool {
        match self {
            Self::Sprint => furlongs <= SPRINT_MAX_FURLONGS,
            Self::Route => furlongs > SPRINT_MAX_FURLONGS,
        }
    }
}

/// Filter description for a slice, interpreted only by the fact source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlicePredicate {
    /// No filter.
    All,
    /// Race surface equals the label.
    SurfaceIs { surface: String },
    /// Race-type code is one of the listed codes.
    RaceTypeIn { codes: Vec<String> },
    /// Race distance falls in the class.
    Distance { class: DistanceClass },
}

impl SlicePredicate {
    pub fn surface_is(surface: impl Into<String>) -> Self {
        Self::SurfaceIs {
            surface: surface.into(),
        }
    }

    pub fn race_type_in<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::RaceTypeIn {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn distance(class: DistanceClass) -> Self {
        Self::Distance { class }
    }
}

/// A slice and the predicate that selects its facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub slice: Slice,
    pub predicate: SlicePredicate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("slice '{0}' is declared twice")]
    DuplicateSlice(Slice),
}

/// Ordered, immutable set of declared slices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionCatalog {
    entries: Vec<CatalogEntry>,
}

impl PartitionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog every dashboard uses.
    pub fn standard() -> Self {
        let entries = vec![
            entry(Dimension::AllTime, "all_time", SlicePredicate::All),
            entry(Dimension::Surface, "Turf", SlicePredicate::surface_is("Turf")),
            entry(
                Dimension::Surface,
                "Polytrack",
                SlicePredicate::surface_is("Polytrack"),
            ),
            entry(
                Dimension::RaceType,
                "maiden",
                SlicePredicate::race_type_in(["MSW", "MCL"]),
            ),
            entry(
                Dimension::RaceType,
                "claim",
                SlicePredicate::race_type_in(["MCL", "CLM"]),
            ),
            entry(
                Dimension::RaceType,
                "allowance",
                SlicePredicate::race_type_in(["ALW"]),
            ),
            entry(
                Dimension::RaceType,
                "stakes",
                SlicePredicate::race_type_in(["STK", "STR"]),
            ),
            entry(
                Dimension::Distance,
                "sprint",
                SlicePredicate::distance(DistanceClass::Sprint),
            ),
            entry(
                Dimension::Distance,
                "route",
                SlicePredicate::distance(DistanceClass::Route),
            ),
        ];
        Self { entries }
    }

    /// Append a slice. Slices are unique within a catalog.
    pub fn with_entry(
        mut self,
        slice: Slice,
        predicate: SlicePredicate,
    ) -> Result<Self, CatalogError> {
        if self.entries.iter().any(|e| e.slice == slice) {
            return Err(CatalogError::DuplicateSlice(slice));
        }
        self.entries.push(CatalogEntry { slice, predicate });
        Ok(self)
    }

    /// Declared slices in declaration order.
    pub fn list_slices(&self) -> impl Iterator<Item = &Slice> {
        self.entries.iter().map(|e| &e.slice)
    }

    /// Slices of one dimension, in declaration order.
    pub fn slices_in(&self, dimension: Dimension) -> impl Iterator<Item = &Slice> {
        self.list_slices().filter(move |s| s.dimension == dimension)
    }

    /// Predicate for a declared slice; `None` if the slice is not in the catalog.
    pub fn predicate_for(&self, slice: &Slice) -> Option<&SlicePredicate> {
        self.entries
            .iter()
            .find(|e| &e.slice == slice)
            .map(|e| &e.predicate)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn entry(dimension: Dimension, label: &str, predicate: SlicePredicate) -> CatalogEntry {
    CatalogEntry {
        slice: Slice::new(dimension, label),
        predicate,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

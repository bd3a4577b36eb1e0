pub mod category;

use std::collections::BTreeSet;

use foundation::math::Vec3;
use serde::{Deserialize, Serialize};

pub use category::Category;

/// Opaque content identifier supplied by the external content store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(pub String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Depth used when a record omits `z`.
pub const DEFAULT_DEPTH: f64 = 0.5;

/// One addressable content item placed in normalized space `[0, 1]^3`.
///
/// Read-only input to every filter and render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentPoint {
    pub id: ContentId,
    pub position: Vec3,
    pub category: Category,
    pub title: String,
}

impl ContentPoint {
    pub fn new(
        id: impl Into<String>,
        position: Vec3,
        category: Category,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: ContentId::new(id),
            position,
            category,
            title: title.into(),
        }
    }
}

/// Wire shape of a catalog record, as produced by the content store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: Option<f64>,
    pub category: Category,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    Parse(String),
    DuplicateId(String),
    InvalidPosition { id: String, axis: char, value: f64 },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Parse(msg) => write!(f, "catalog parse error: {msg}"),
            CatalogError::DuplicateId(id) => write!(f, "duplicate content id: {id}"),
            CatalogError::InvalidPosition { id, axis, value } => {
                write!(f, "content {id}: {axis}={value} is outside [0, 1]")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Validated, ordered content catalog.
///
/// Ordering contract:
/// - `points()` preserves input order. Hit-test tie-breaks and depth-sort ties
///   both depend on it, so it is never re-sorted here.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Catalog {
    points: Vec<ContentPoint>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<ContentRecord>) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        let mut points = Vec::with_capacity(records.len());

        for r in records {
            if !seen.insert(r.id.clone()) {
                return Err(CatalogError::DuplicateId(r.id));
            }
            let z = r.z.unwrap_or(DEFAULT_DEPTH);
            for (axis, value) in [('x', r.x), ('y', r.y), ('z', z)] {
                if !(0.0..=1.0).contains(&value) {
                    return Err(CatalogError::InvalidPosition {
                        id: r.id,
                        axis,
                        value,
                    });
                }
            }
            points.push(ContentPoint {
                id: ContentId(r.id),
                position: Vec3::new(r.x, r.y, z),
                category: r.category,
                title: r.title,
            });
        }

        Ok(Self { points })
    }

    /// Parses a JSON array of [`ContentRecord`]s.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<ContentRecord> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_records(records)
    }

    pub fn from_points(points: Vec<ContentPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ContentPoint] {
        &self.points
    }

    pub fn get(&self, id: &ContentId) -> Option<&ContentPoint> {
        self.points.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

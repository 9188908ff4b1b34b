use crate::error::{RouteError, RouteResult};
use crate::search::FxIndexMap;
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexSet;
use log::debug;

/// A structure standing on a grid cell, tagged with a numeric category. Unnamed structures can
/// not be looked up by name but still count as waypoints of their category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Structure {
    pub name: Option<String>,
    pub category: u32,
    pub point: Point,
}

impl Structure {
    pub fn new(name: impl Into<String>, category: u32, point: Point) -> Structure {
        Structure {
            name: Some(name.into()),
            category,
            point,
        }
    }
    pub fn unnamed(category: u32, point: Point) -> Structure {
        Structure {
            name: None,
            category,
            point,
        }
    }
}

/// Lookup of structures by name or category, the bridge between map data and routing queries.
/// Structures keep the order in which they were added; several structures may share a name, in
/// which case the first one wins.
#[derive(Clone, Debug, Default)]
pub struct StructureIndex {
    structures: Vec<Structure>,
    by_name: FxIndexMap<String, usize>,
}

impl StructureIndex {
    pub fn new() -> StructureIndex {
        StructureIndex::default()
    }

    /// Adds a structure. Its trimmed name becomes searchable unless it is blank or already taken.
    pub fn insert(&mut self, structure: Structure) {
        let ix = self.structures.len();
        match structure.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                self.by_name.entry(name.to_owned()).or_insert(ix);
            }
            _ => {}
        }
        self.structures.push(structure);
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }
    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Structure> {
        self.structures.iter()
    }

    /// Resolves a structure name, ignoring surrounding whitespace.
    pub fn find_point(&self, name: &str) -> RouteResult<Point> {
        self.by_name
            .get(name.trim())
            .map(|&ix| self.structures[ix].point)
            .ok_or_else(|| RouteError::PointNotFound(name.trim().to_owned()))
    }

    /// Distinct points of all structures in the given categories, named or not, in insertion
    /// order.
    pub fn waypoints(&self, categories: &[u32]) -> Vec<Point> {
        let points: IndexSet<Point, FxBuildHasher> = self
            .structures
            .iter()
            .filter(|s| categories.contains(&s.category))
            .map(|s| s.point)
            .collect();
        debug!(
            "{} waypoints in categories {:?}",
            points.len(),
            categories
        );
        points.into_iter().collect()
    }
}

impl FromIterator<Structure> for StructureIndex {
    fn from_iter<T: IntoIterator<Item = Structure>>(iter: T) -> Self {
        let mut index = StructureIndex::new();
        for structure in iter {
            index.insert(structure);
        }
        index
    }
}

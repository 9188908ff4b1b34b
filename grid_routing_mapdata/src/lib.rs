//! Loads tabular map data for [grid_routing] and writes computed paths back out.
//!
//! A map is a CSV file with one row per grid cell:
//!
//! ```text
//! x,y,category,struct,ConstructionSite
//! 1,1,3,MyHome,0
//! 2,1,0,,1
//! ```
//!
//! `struct` names the structure on the cell (empty if none) and `ConstructionSite` is 1 for
//! cells that cannot be walked through.
use csv::{ReaderBuilder, Writer};
use grid_routing::{Cell, RouteError, Structure, StructureIndex};
use grid_util::point::Point;
use log::debug;
use serde::Deserialize;
use std::io::{Read, Write};
use thiserror::Error;

pub const APARTMENT: u32 = 1;
pub const BUILDING: u32 = 2;
pub const HOME: u32 = 3;
pub const CAFE: u32 = 4;
pub const CONSTRUCTION_SITE: u32 = 5;

/// Categories that count as structures worth visiting.
pub const STRUCTURE_CATEGORIES: [u32; 4] = [APARTMENT, BUILDING, HOME, CAFE];

#[derive(Error, Debug)]
pub enum MapDataError {
    #[error("Could not parse map record: {0}")]
    Csv(#[from] csv::Error),

    #[error("Could not write path: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid map cell: {0}")]
    Cell(#[from] RouteError),
}

#[derive(Debug, Deserialize)]
pub struct MapRecord {
    pub x: usize,
    pub y: usize,
    #[serde(default)]
    pub category: u32,
    #[serde(rename = "struct", default)]
    pub structure: Option<String>,
    #[serde(rename = "ConstructionSite", default)]
    pub construction_site: u8,
}

/// Grid cells and named structures read from one map file.
#[derive(Clone, Debug, Default)]
pub struct MapData {
    pub cells: Vec<Cell>,
    pub structures: StructureIndex,
}

/// Parses a map with a header row. Rows that carry a structure name or a structure category are
/// added to the structure index, so the tour visits categorized cells even when they are unnamed.
pub fn load_map<R: Read>(reader: R) -> Result<MapData, MapDataError> {
    let mut csv_reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut map = MapData::default();
    for result in csv_reader.deserialize() {
        let record: MapRecord = result?;
        let cell = Cell::new(record.x, record.y, record.construction_site == 1);
        let point = cell.point()?;
        map.cells.push(cell);
        let name = record.structure.filter(|s| !s.trim().is_empty());
        if name.is_some() || STRUCTURE_CATEGORIES.contains(&record.category) {
            map.structures.insert(Structure {
                name,
                category: record.category,
                point,
            });
        }
    }
    debug!(
        "Loaded {} cells and {} structures",
        map.cells.len(),
        map.structures.len()
    );
    Ok(map)
}

/// Writes a path as CSV with an `x,y` header.
pub fn save_path<W: Write>(writer: W, path: &[Point]) -> Result<(), MapDataError> {
    let mut w = Writer::from_writer(writer);
    w.write_record(["x", "y"])?;
    for p in path {
        w.write_record([p.x.to_string(), p.y.to_string()])?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_routing::{GridSolver, RouteError, RoutingGrid};

    const MAP: &str = "\
x,y,category,struct,ConstructionSite
0,0,3,MyHome,0
1,0,0,,1
2,0,4,BandalgomCoffee,0
0,1,0,,0
1,1,1,Apartment,0
2,1,0,,0
";

    #[test]
    fn load_cells_and_structures() {
        let map = load_map(MAP.as_bytes()).unwrap();
        assert_eq!(map.cells.len(), 6);
        assert!(map.cells.contains(&Cell::blocked(1, 0)));
        assert_eq!(map.structures.len(), 3);
        assert_eq!(map.structures.find_point("MyHome").unwrap(), Point::new(0, 0));
        assert!(matches!(
            map.structures.find_point("Library"),
            Err(RouteError::PointNotFound(_))
        ));
        assert_eq!(
            map.structures.waypoints(&STRUCTURE_CATEGORIES),
            vec![Point::new(0, 0), Point::new(2, 0), Point::new(1, 1)]
        );
    }

    #[test]
    fn unnamed_categorized_rows_are_waypoints() {
        let csv = "x,y,category,struct,ConstructionSite\n0,0,3,MyHome,0\n1,0,0,,0\n2,0,1,,0\n";
        let map = load_map(csv.as_bytes()).unwrap();
        assert_eq!(map.structures.len(), 2);
        assert_eq!(
            map.structures.waypoints(&STRUCTURE_CATEGORIES),
            vec![Point::new(0, 0), Point::new(2, 0)]
        );
        assert_eq!(map.structures.find_point("MyHome").unwrap(), Point::new(0, 0));
    }

    #[test]
    fn route_home_to_cafe() {
        let map = load_map(MAP.as_bytes()).unwrap();
        let grid = RoutingGrid::from_cells(&map.cells).unwrap();
        let home = map.structures.find_point("MyHome").unwrap();
        let cafe = map.structures.find_point("BandalgomCoffee").unwrap();
        let path = grid_routing::BfsSolver.find_path(&grid, home, cafe);
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn malformed_row() {
        let result = load_map("x,y,category,struct,ConstructionSite\n-1,0,0,,0\n".as_bytes());
        assert!(matches!(result, Err(MapDataError::Csv(_))));
    }

    #[test]
    fn oversized_coordinate() {
        let csv = format!("x,y,category,struct,ConstructionSite\n{},0,0,,0\n", u64::MAX);
        let result = load_map(csv.as_bytes());
        assert!(matches!(
            result,
            Err(MapDataError::Cell(RouteError::CoordinateOverflow { .. }))
        ));
    }

    #[test]
    fn write_path() {
        let mut out = Vec::new();
        save_path(&mut out, &[Point::new(0, 0), Point::new(0, 1)]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "x,y\n0,0\n0,1\n");
    }
}

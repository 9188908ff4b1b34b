use grid_routing::path::is_valid_path;
use grid_routing::{BfsSolver, GridSolver, RouteError, RouteOptimizer, RoutingGrid};
use grid_routing_mapdata::{load_map, save_path, MapData, STRUCTURE_CATEGORIES};
use grid_util::point::Point;

// |H . # . . . |
// |. . # . A . |
// |. . # . . . |
// |. B . . # # |
// |. . . . # C |
// |A . . . . . |
// H: MyHome, C: BandalgomCoffee, A: Apartment, B: Building, #: construction site
const LAYOUT: [&str; 6] = ["H.#...", "..#.A.", "..#...", ".B..##", "....#C", "A....."];

fn map_csv() -> String {
    let mut csv = String::from("x,y,category,struct,ConstructionSite\n");
    for (y, row) in LAYOUT.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            let (category, name, site) = match c {
                'H' => (3, "MyHome", 0),
                'C' => (4, "BandalgomCoffee", 0),
                'A' => (1, "Apartment", 0),
                'B' => (2, "Building", 0),
                '#' => (5, "", 1),
                _ => (0, "", 0),
            };
            csv.push_str(&format!("{x},{y},{category},{name},{site}\n"));
        }
    }
    csv
}

fn load() -> (MapData, RoutingGrid) {
    let map = load_map(map_csv().as_bytes()).unwrap();
    let grid = RoutingGrid::from_cells(&map.cells).unwrap();
    (map, grid)
}

#[test]
fn home_to_cafe() {
    let (map, grid) = load();
    assert_eq!((grid.width(), grid.height()), (6, 6));
    let home = map.structures.find_point("MyHome").unwrap();
    let cafe = map.structures.find_point("BandalgomCoffee").unwrap();
    assert_eq!(cafe, Point::new(5, 4));
    let path = BfsSolver.find_path(&grid, home, cafe);
    assert!(is_valid_path(&grid, home, cafe, &path));
    // The cafe can only be entered from below
    assert_eq!(path.len(), 12);

    let mut out = Vec::new();
    save_path(&mut out, &path).unwrap();
    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("x,y"));
    assert_eq!(lines.next(), Some("0,0"));
    assert_eq!(lines.last(), Some("5,4"));
    assert_eq!(text.lines().count(), path.len() + 1);
}

#[test]
fn unknown_structure() {
    let (map, _) = load();
    assert_eq!(
        map.structures.find_point("Library"),
        Err(RouteError::PointNotFound("Library".to_owned()))
    );
}

#[test]
fn visit_all_structures() {
    let (map, grid) = load();
    let waypoints = map.structures.waypoints(&STRUCTURE_CATEGORIES);
    assert_eq!(waypoints.len(), 5);
    let route = RouteOptimizer::default().optimize(&grid, &waypoints).unwrap();
    assert!(is_valid_path(
        &grid,
        route.order[0],
        *route.order.last().unwrap(),
        &route.path
    ));
    for w in &waypoints {
        assert!(route.path.contains(w));
    }
    // Apartment, Building, MyHome, Apartment, BandalgomCoffee or the reverse: 5 + 4 + 5 + 6 steps
    assert_eq!(route.len(), 21);
    let cafe = map.structures.find_point("BandalgomCoffee").unwrap();
    assert!(route.order[0] == cafe || *route.order.last().unwrap() == cafe);
}

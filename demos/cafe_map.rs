use grid_routing::{BfsSolver, GridSolver, RouteOptimizer, RoutingGrid};
use grid_routing_mapdata::{load_map, save_path, STRUCTURE_CATEGORIES};
use std::fs::File;
use std::io::BufWriter;

// Reads a map CSV (x,y,category,struct,ConstructionSite), writes the shortest path from home to
// the cafe to home_to_cafe.csv and the shortest tour of all structures to
// bonus_home_to_cafe.csv.
//
// Usage: cargo run --example cafe_map -- <map.csv>

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let map_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sorted_raw_map.csv".to_owned());
    let map = load_map(File::open(map_path)?)?;
    let grid = RoutingGrid::from_cells(&map.cells)?;
    println!("{}", grid);

    let home = map.structures.find_point("MyHome")?;
    let cafe = map.structures.find_point("BandalgomCoffee")?;
    let path = BfsSolver.find_path(&grid, home, cafe);
    if path.is_empty() {
        println!("No path from home to the cafe");
        return Ok(());
    }
    save_path(BufWriter::new(File::create("home_to_cafe.csv")?), &path)?;
    println!("Home to cafe: {} steps", path.len() - 1);

    let waypoints = map.structures.waypoints(&STRUCTURE_CATEGORIES);
    let route = RouteOptimizer::default().optimize(&grid, &waypoints)?;
    save_path(
        BufWriter::new(File::create("bonus_home_to_cafe.csv")?),
        &route.path,
    )?;
    println!(
        "Tour of {} structures: {} steps",
        waypoints.len(),
        route.steps()
    );
    Ok(())
}

use crate::{HexGrid, TileIndex, TileMap, TileState};
use svg::{
    node::{
        element::{Circle, Group, Polygon, Polyline},
        Comment,
    },
    Document,
};

const ROUTE_COLOR: &str = "#e8413e";
const OBSTACLE_COLOR: &str = "#2f6b3a";

/// Render a grid and a route across it as an SVG, top-down in pixel space.
/// If a map is given, each tile is colored by its state and obstacles are
/// marked. The route is drawn as a line through tile centers, with a dot on
/// each waypoint.
pub fn route_to_svg(
    grid: &HexGrid,
    map: Option<&TileMap>,
    route: &[TileIndex],
    waypoints: &[TileIndex],
) -> Document {
    let mut document = Document::new()
        .set(
            "viewBox",
            (0.0, 0.0, grid.pixel_width(), grid.pixel_height()),
        )
        .add(Comment::new(format!("\n{:#?}\n", grid.config())));

    for index in grid.indices() {
        if let Some(group) = draw_tile(grid, map, index) {
            document = document.add(group);
        }
    }

    let points: Vec<(f64, f64)> = route
        .iter()
        .filter_map(|&index| grid.index_to_pixel(index))
        .map(|pixel| (pixel.x(), pixel.y()))
        .collect();
    if !points.is_empty() {
        document = document.add(
            Polyline::new()
                .set("points", points)
                .set("fill", "none")
                .set("stroke", ROUTE_COLOR)
                .set("stroke-width", grid.cell_size() * 0.1),
        );
    }

    let waypoints = waypoints
        .iter()
        .filter_map(|&index| grid.index_to_pixel(index));
    for pixel in waypoints {
        document = document.add(
            Circle::new()
                .set("cx", pixel.x())
                .set("cy", pixel.y())
                .set("r", grid.cell_size() * 0.15)
                .set("fill", ROUTE_COLOR),
        );
    }

    document
}

/// Generate an SVG hexagon for a single tile
fn draw_tile(
    grid: &HexGrid,
    map: Option<&TileMap>,
    index: TileIndex,
) -> Option<Group> {
    let center = grid.index_to_pixel(index)?;
    let radius = grid.cell_size() / 2.0;
    let state = map.and_then(|map| map.state(index));

    // Flat-topped, so the corners are at multiples of 60 degrees
    let corners: Vec<(f64, f64)> = (0..6)
        .map(|i| {
            let angle = (60.0 * i as f64).to_radians();
            (radius * angle.cos(), radius * angle.sin())
        })
        .collect();

    let mut group = Group::new()
        .set(
            "transform",
            format!("translate({} {})", center.x(), center.y()),
        )
        .add(Comment::new(index.to_string())) // Readability!
        .add(
            Polygon::new()
                .set("points", corners)
                .set("fill", state_color(state))
                .set("stroke", "#ffffff")
                .set("stroke-width", radius * 0.05),
        );

    if map.and_then(|map| map.obstacle(index)).is_some() {
        group = group.add(
            Circle::new()
                .set("r", radius * 0.4)
                .set("fill", OBSTACLE_COLOR),
        );
    }

    Some(group)
}

fn state_color(state: Option<TileState>) -> &'static str {
    match state {
        None | Some(TileState::Visible) => "#dbe9f4",
        Some(TileState::Hidden) => "#16324f",
        Some(TileState::Highlighted) => "#fff3a3",
        Some(TileState::Shaking) => "#c9a0dc",
        Some(TileState::Sinking) => "#5b6c7d",
        Some(TileState::Raised) => "#ffffff",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AllPassable, MapConfig, OffsetDistance};

    #[test]
    fn test_route_to_svg() {
        let grid = HexGrid::new(5, 5, 10.0);
        let route = grid
            .path(TileIndex(0), TileIndex(24), &AllPassable, &OffsetDistance)
            .unwrap();
        let waypoints = grid
            .waypoints(TileIndex(0), TileIndex(24), &AllPassable, &OffsetDistance)
            .unwrap();
        let map = TileMap::generate(&grid, &MapConfig::default()).unwrap();

        let svg = route_to_svg(&grid, Some(&map), &route, &waypoints).to_string();
        assert_eq!(svg.matches("<polygon").count(), grid.len());
        assert_eq!(svg.matches("<polyline").count(), 1);
        assert!(svg.matches("<circle").count() >= waypoints.len());
    }

    #[test]
    fn test_empty_route() {
        let grid = HexGrid::new(2, 2, 10.0);
        let svg = route_to_svg(&grid, None, &[], &[]).to_string();
        assert_eq!(svg.matches("<polygon").count(), 4);
        assert_eq!(svg.matches("<polyline").count(), 0);
    }
}

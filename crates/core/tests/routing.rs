use snowgrid::{
    AllPassable, CubeTile, HexGrid, OffsetDistance, PathError, SearchConfig,
    TileDirection, TileIndex,
};
use std::collections::HashSet;

fn blocking(
    blocked: &[usize],
) -> impl Fn(&HexGrid, TileIndex) -> bool + '_ {
    move |_: &HexGrid, index: TileIndex| !blocked.contains(&index.0)
}

/// Corner to opposite corner on an open 5x5 grid
#[test]
fn test_corner_to_corner() {
    let grid = HexGrid::new(5, 5, 10.0);
    let from = TileIndex(0);
    let to = TileIndex(24);
    let route = grid.path(from, to, &AllPassable, &OffsetDistance).unwrap();

    assert_eq!(route.first(), Some(&from));
    assert_eq!(route.last(), Some(&to));
    for pair in route.windows(2) {
        assert!(grid.neighbors(pair[0]).any(|index| index == pair[1]));
    }
    let steps = grid
        .index_to_cube(from)
        .unwrap()
        .distance_to(grid.index_to_cube(to).unwrap());
    assert!(route.len() > steps as usize);
}

/// (4, 4) only touches (4, 3), (3, 3) and (3, 4). Block two of them and the
/// third becomes the only way in; block that too and there's no way in.
#[test]
fn test_sole_connector_to_destination() {
    let grid = HexGrid::new(5, 5, 10.0);
    let mut neighbors: Vec<usize> =
        grid.neighbors(TileIndex(24)).map(usize::from).collect();
    neighbors.sort_unstable();
    assert_eq!(neighbors, vec![18, 19, 23]);

    let route = grid
        .path(TileIndex(0), TileIndex(24), &blocking(&[18, 23]), &OffsetDistance)
        .unwrap();
    assert_eq!(route[route.len() - 2], TileIndex(19));

    assert_eq!(
        grid.path(
            TileIndex(0),
            TileIndex(24),
            &blocking(&[18, 19, 23]),
            &OffsetDistance
        ),
        Err(PathError::NoPath)
    );
}

/// A straight run of 5 tiles heading south-east, with everything else
/// blocked off
#[test]
fn test_straight_run_waypoints() {
    let grid = HexGrid::new(5, 5, 10.0);
    let start = CubeTile::ORIGIN;
    let run: Vec<TileIndex> = (0..5)
        .map(|i| {
            grid.cube_to_index(start + TileDirection::SE.offset() * i)
                .unwrap()
        })
        .collect();
    assert_eq!(
        run,
        vec![
            TileIndex(0),
            TileIndex(5),
            TileIndex(11),
            TileIndex(16),
            TileIndex(22)
        ]
    );

    let allowed: HashSet<TileIndex> = run.iter().copied().collect();
    let passable = |_: &HexGrid, index: TileIndex| allowed.contains(&index);
    assert_eq!(
        grid.path(run[0], run[4], &passable, &OffsetDistance),
        Ok(run.clone())
    );
    assert_eq!(
        grid.waypoints(run[0], run[4], &passable, &OffsetDistance),
        Ok(vec![run[0], run[4]])
    );
}

#[test]
fn test_unreachable_destination() {
    let grid = HexGrid::new(5, 5, 10.0);
    let passable = blocking(&[12]);
    for from in grid.indices() {
        assert_eq!(
            grid.waypoints(from, TileIndex(12), &passable, &OffsetDistance),
            Err(PathError::DestinationImpassable)
        );
    }
}

#[test]
fn test_default_grid_with_cap() {
    let grid = HexGrid::new(32, 32, 32.0);
    let to = TileIndex(grid.len() - 1);
    let unbounded = grid
        .waypoints(TileIndex(0), to, &AllPassable, &OffsetDistance)
        .unwrap();
    assert_eq!(unbounded.first(), Some(&TileIndex(0)));
    assert_eq!(unbounded.last(), Some(&to));

    let capped = SearchConfig {
        max_expansions: Some(10),
    };
    assert_eq!(
        grid.waypoints_with(
            TileIndex(0),
            to,
            &AllPassable,
            &OffsetDistance,
            &capped
        ),
        Err(PathError::SearchAborted { expanded: 10 })
    );
}

use snowgrid::{GridConfig, HexGrid, MapConfig, TileMap};
use validator::ValidationErrors;

fn error_fields(err: anyhow::Error) -> Vec<&'static str> {
    let validation_errors = err.downcast::<ValidationErrors>().unwrap();
    let mut error_fields = validation_errors
        .errors()
        .keys()
        .copied()
        .collect::<Vec<&str>>();
    error_fields.sort_unstable();
    error_fields
}

#[test]
fn test_grid_config_validation() {
    let config = GridConfig {
        width: 5000,     // invalid (too big)
        height: 0,       // valid (but empty)
        cell_size: -1.0, // invalid
    };

    // This is a bit of a lazy check but it works well enough
    let err = HexGrid::from_config(&config).unwrap_err();
    assert_eq!(error_fields(err), vec!["cell_size", "width"]);
}

#[test]
fn test_map_config_validation() {
    let grid = HexGrid::from_config(&GridConfig::default()).unwrap();
    let config = MapConfig {
        seed: 0,
        erosion_fraction: 1.1, // invalid
        obstacle_chance: -0.5, // invalid
        obstacle_kinds: 0,     // invalid
    };

    let err = TileMap::generate(&grid, &config).unwrap_err();
    assert_eq!(
        error_fields(err),
        vec!["erosion_fraction", "obstacle_chance", "obstacle_kinds"]
    );
}

#[test]
fn test_config_from_toml() {
    let config: GridConfig = toml::from_str(
        r#"
        width = 12
        cell_size = 4.5
        "#,
    )
    .unwrap();
    let grid = HexGrid::from_config(&config).unwrap();
    assert_eq!(grid.width(), 12);
    assert_eq!(grid.height(), 32);
    assert_eq!(grid.len(), 12 * 32);
}

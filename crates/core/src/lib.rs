//! Snowgrid is a hex grid toolkit for tile-based games. It maps between the
//! different coordinate systems a hex map needs (pixels, odd-q offset, cube,
//! axial, and a flat linear index) and finds walkable routes across the grid.
//!
//! ```
//! use snowgrid::{AllPassable, HexGrid, OffsetDistance, TileIndex};
//!
//! let grid = HexGrid::new(5, 5, 10.0);
//! let route = grid
//!     .waypoints(TileIndex(0), TileIndex(24), &AllPassable, &OffsetDistance)
//!     .unwrap();
//! assert_eq!(route.first(), Some(&TileIndex(0)));
//! assert_eq!(route.last(), Some(&TileIndex(24)));
//! ```
//!
//! The grid never stores anything about the tiles themselves. Passability is
//! supplied by the caller through the [Passable] trait, typically backed by a
//! flat array indexed by [TileIndex] (see [TileMap] for one such array).

mod config;
mod grid;
pub mod hex;
mod map;
mod path;
#[cfg(feature = "svg")]
mod render;
mod util;

pub use crate::{
    config::{GridConfig, MapConfig, SearchConfig},
    grid::{HexGrid, MAX_SIDE},
    hex::{
        Axial, AxialTile, Cube, CubeTile, HexCoord, OddQ, OffsetTile, Pixel,
        Position, TileDirection, TileIndex,
    },
    map::{TileMap, TileState},
    path::{
        compress_waypoints, AllPassable, EdgeCost, OffsetDistance, Passable,
        PathError, Route,
    },
    util::cmp_unwrap,
};
#[cfg(feature = "svg")]
pub use crate::render::route_to_svg;

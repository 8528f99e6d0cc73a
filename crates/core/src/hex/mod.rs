//! This module holds the basic types for the hex coordinate systems.
//!
//! ## Coordinate Systems
//!
//! A hex map needs several different ways of addressing the same tile, each
//! convenient for a different job. The excellent
//! [hexagon guide by Amit Patel](https://www.redblobgames.com/grids/hexagons/)
//! describes all of them in depth; here's the short version of the ones we
//! use:
//!
//! ### Odd-q Offset
//!
//! The grid's storage coordinate. Tiles are laid out in flat-topped columns
//! (`q`) and rows (`r`), with every odd column shoved down by half a tile.
//! This maps naturally onto a rectangular map, so it's what the linear
//! [TileIndex] is derived from: `index = q * height + r`.
//!
//! ### Cube
//!
//! Three components (`x`, `y`, `z`) with the invariant **`x + y + z = 0`**.
//! Neighbor math, distances and rounding are all trivial in cube space, so
//! most algorithms convert to cube, do their thing, then convert back.
//!
//! ### Axial
//!
//! Cube coordinates with the redundant third component dropped. `q` is cube
//! `x` and `r` is cube `z`.
//!
//! ### Pixel and Position
//!
//! Pixel coordinates are measured in screen units from the top-left corner of
//! the map, with `y` pointing down. Position coordinates are centered on the
//! middle of the map, with `y` pointing up.
//!
//! ## Fractional vs. Tile Coordinates
//!
//! [HexCoord] holds fractional values and is tagged with the coordinate space
//! it lives in, so a cube coordinate can't be handed to something expecting an
//! odd-q one. Whole tiles are represented by the integer types [CubeTile],
//! [AxialTile] and [OffsetTile]. The only way to get from fractional to tile
//! is rounding, which means the parity-sensitive odd-q formulas only ever see
//! integers.

mod coord;
mod tile;

pub use self::{coord::*, tile::*};

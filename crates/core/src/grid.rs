use crate::{
    hex::{
        Axial, AxialTile, CubeTile, HexCoord, OffsetTile, Pixel, Position,
        TileIndex,
    },
    GridConfig,
};
use anyhow::{ensure, Context};
use log::debug;
use validator::Validate;

const SQRT_THREE: f64 = 1.732_050_807_568_877_2;

/// Longest side a grid can have. Tile coordinates are `i32`, and neighbor and
/// cube math needs some headroom past the last column.
pub const MAX_SIDE: u32 = i32::MAX as u32 / 2;

/// Fractional axial coordinates past this are far off any grid, and too big
/// to round into tile coordinates
const MAX_FRACTIONAL: f64 = (i32::MAX / 4) as f64;

/// A fixed-size rectangular grid of flat-topped hexagons, laid out in odd-q
/// columns. The grid knows how to convert between every coordinate system
/// (pixel, position, odd-q, cube, axial, linear index) and how tiles connect
/// to each other, but holds no per-tile data. Anything like terrain or
/// passability lives in the caller's own storage, keyed by [TileIndex].
///
/// Grids are immutable. If the map changes size, build a new grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HexGrid {
    width: u32,
    height: u32,
    cell_size: f64,
    /// Height of a single flat-topped hexagon, `√3/2 * cell_size`
    cell_height: f64,
    /// Width of the whole grid in pixels. Columns overlap by a quarter of a
    /// cell, plus one extra quarter for the last column's far edge.
    pixel_width: f64,
    /// Height of the whole grid in pixels, including the half-cell shift of
    /// the odd columns
    pixel_height: f64,
}

impl HexGrid {
    /// Create a new grid. The cell size isn't checked here; use
    /// [HexGrid::from_config] when the dimensions come from outside.
    ///
    /// # Panics
    ///
    /// If either side is longer than [MAX_SIDE].
    pub fn new(width: u32, height: u32, cell_size: f64) -> Self {
        assert!(
            width <= MAX_SIDE && height <= MAX_SIDE,
            "grid {}x{} is too large, sides are limited to {}",
            width,
            height,
            MAX_SIDE
        );
        let cell_height = SQRT_THREE / 2.0 * cell_size;
        Self {
            width,
            height,
            cell_size,
            cell_height,
            pixel_width: width as f64 * cell_size * 0.75 + 0.25 * cell_size,
            pixel_height: height as f64 * cell_height + cell_height * 0.5,
        }
    }

    /// Create a new grid from a config, validating it first
    pub fn from_config(config: &GridConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid grid config")?;
        ensure!(!config.cell_size.is_nan(), "cell_size cannot be NaN");
        let grid = Self::new(config.width, config.height, config.cell_size);
        debug!("Created grid {:?}", grid);
        Ok(grid)
    }

    /// The config that would produce this grid
    pub fn config(&self) -> GridConfig {
        GridConfig {
            width: self.width,
            height: self.height,
            cell_size: self.cell_size,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    pub fn pixel_width(&self) -> f64 {
        self.pixel_width
    }

    pub fn pixel_height(&self) -> f64 {
        self.pixel_height
    }

    /// Total number of tiles in the grid, `width * height`
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Does this index refer to a tile on the grid?
    pub fn contains(&self, index: TileIndex) -> bool {
        index.0 < self.len()
    }

    /// Iterate over every tile index, in order
    pub fn indices(&self) -> impl Iterator<Item = TileIndex> {
        (0..self.len()).map(TileIndex)
    }

    // Pixel conversions

    /// Project a pixel onto the grid without rounding. The result is in axial
    /// space and generally falls somewhere between tile centers.
    pub fn pixel_to_fractional(
        &self,
        pixel: HexCoord<Pixel>,
    ) -> HexCoord<Axial> {
        let size = self.cell_size / 2.0;
        let (x, y) = (pixel.x(), pixel.y());

        let q = x * 2.0 / 3.0 / size;
        let r = (-x / 3.0 + SQRT_THREE / 3.0 * y) / size;
        HexCoord::new(q, r, 0.0)
    }

    /// Get the axial coordinates of the tile containing a pixel. The tile may
    /// be off the grid. `None` if the pixel isn't finite, or is so far away
    /// that no tile coordinate could hold it.
    pub fn pixel_to_axial(&self, pixel: HexCoord<Pixel>) -> Option<AxialTile> {
        let fractional = self.pixel_to_fractional(pixel);
        // Also false for NaN
        let in_range = |value: f64| value.abs() <= MAX_FRACTIONAL;
        if in_range(fractional.q()) && in_range(fractional.r()) {
            Some(fractional.round())
        } else {
            None
        }
    }

    /// Get the odd-q coordinates of the tile containing a pixel. The tile may
    /// be off the grid. See [HexGrid::pixel_to_axial] for when this is `None`.
    pub fn pixel_to_offset(
        &self,
        pixel: HexCoord<Pixel>,
    ) -> Option<OffsetTile> {
        self.pixel_to_axial(pixel).map(AxialTile::to_offset)
    }

    /// Get the index of the tile containing a pixel, or `None` if the pixel
    /// is off the grid
    pub fn pixel_to_index(&self, pixel: HexCoord<Pixel>) -> Option<TileIndex> {
        self.pixel_to_offset(pixel)
            .and_then(|offset| self.offset_to_index(offset))
    }

    // UV conversions

    /// Convert a texture coordinate on the map surface (`0..1` on both axes,
    /// `v` pointing up) into pixel space
    pub fn uv_to_pixel(&self, u: f64, v: f64) -> HexCoord<Pixel> {
        let x = (u - 0.5 / self.width as f64) * self.pixel_width;
        let y = ((1.0 - v) - 0.5 / self.height as f64) * self.pixel_height;
        HexCoord::new(x, y, 0.0)
    }

    pub fn uv_to_index(&self, u: f64, v: f64) -> Option<TileIndex> {
        self.pixel_to_index(self.uv_to_pixel(u, v))
    }

    // Position conversions

    /// Get the index of the tile under a world position, or `None` if the
    /// position is off the grid
    pub fn position_to_index(
        &self,
        position: HexCoord<Position>,
    ) -> Option<TileIndex> {
        let u = (position.x() + self.pixel_width / 2.0) / self.pixel_width;
        let v = (position.y() + self.pixel_height / 2.0) / self.pixel_height;
        self.uv_to_index(u, v)
    }

    // Index conversions

    /// Get the odd-q coordinates for an index, or `None` if the index is off
    /// the grid
    pub fn index_to_offset(&self, index: TileIndex) -> Option<OffsetTile> {
        if !self.contains(index) {
            return None;
        }
        let height = self.height as usize;
        // Sides are capped at MAX_SIDE, so both fit in i32
        Some(OffsetTile::new(
            (index.0 / height) as i32,
            (index.0 % height) as i32,
        ))
    }

    pub fn index_to_cube(&self, index: TileIndex) -> Option<CubeTile> {
        self.index_to_offset(index).map(OffsetTile::to_cube)
    }

    pub fn index_to_axial(&self, index: TileIndex) -> Option<AxialTile> {
        self.index_to_offset(index).map(OffsetTile::to_axial)
    }

    /// Get the indices of the six tiles around a tile, in
    /// [TileDirection::ALL](crate::TileDirection::ALL) order. Slots for
    /// neighbors that fall off the grid are `None`, as are all slots if the
    /// index itself is off the grid.
    pub fn index_to_neighbor_indices(
        &self,
        index: TileIndex,
    ) -> [Option<TileIndex>; 6] {
        match self.index_to_cube(index) {
            Some(cube) => self.cube_to_neighbor_indices(cube),
            None => [None; 6],
        }
    }

    /// Iterate over the on-grid neighbors of a tile
    pub fn neighbors(
        &self,
        index: TileIndex,
    ) -> impl Iterator<Item = TileIndex> {
        self.index_to_neighbor_indices(index).into_iter().flatten()
    }

    /// Get the indices of every tile exactly `radius` steps from a tile. See
    /// [CubeTile::ring] for the walk order. Off-grid tiles are `None`. If the
    /// center itself is off the grid, the result is empty.
    pub fn index_to_ring_indices(
        &self,
        index: TileIndex,
        radius: u32,
    ) -> Vec<Option<TileIndex>> {
        self.index_to_cube(index)
            .map(|cube| self.cube_to_ring_indices(cube, radius))
            .unwrap_or_default()
    }

    /// Get the pixel location of a tile's center
    pub fn index_to_pixel(&self, index: TileIndex) -> Option<HexCoord<Pixel>> {
        self.index_to_cube(index)
            .map(|cube| self.cube_to_layout(cube) * self.cell_size)
    }

    /// Get the world position of a tile's center. This is the pixel location
    /// shifted so the grid is centered on the origin, with `y` flipped to point
    /// up.
    pub fn index_to_position(
        &self,
        index: TileIndex,
    ) -> Option<HexCoord<Position>> {
        self.index_to_pixel(index).map(|pixel| {
            HexCoord::new(
                pixel.x() - self.pixel_width / 2.0,
                -pixel.y() + self.pixel_height / 2.0,
                0.0,
            )
        })
    }

    // Cube conversions

    pub fn cube_to_index(&self, cube: CubeTile) -> Option<TileIndex> {
        self.offset_to_index(cube.to_offset())
    }

    pub fn cube_to_neighbor_cubes(&self, cube: CubeTile) -> [CubeTile; 6] {
        cube.neighbors()
    }

    pub fn cube_to_neighbor_indices(
        &self,
        cube: CubeTile,
    ) -> [Option<TileIndex>; 6] {
        self.cube_to_neighbor_cubes(cube)
            .map(|neighbor| self.cube_to_index(neighbor))
    }

    pub fn cube_to_ring_indices(
        &self,
        cube: CubeTile,
        radius: u32,
    ) -> Vec<Option<TileIndex>> {
        cube.ring(radius)
            .into_iter()
            .map(|tile| self.cube_to_index(tile))
            .collect()
    }

    /// Get a tile's center in units of cells, measured from the top-left
    /// corner of the grid. Multiply by the cell size to get pixels.
    pub fn cube_to_layout(&self, cube: CubeTile) -> HexCoord<Pixel> {
        let scale = 0.5;
        let x = cube.x() as f64;
        let z = cube.z() as f64;
        HexCoord::new(
            0.5 + 1.5 * x * scale,
            0.5 + (SQRT_THREE / 2.0 * x + SQRT_THREE * z) * scale,
            0.0,
        )
    }

    // Odd-q conversions

    /// Get the linear index for a tile, or `None` if it's off the grid
    pub fn offset_to_index(&self, offset: OffsetTile) -> Option<TileIndex> {
        let OffsetTile { q, r } = offset;
        if q >= 0
            && (q as u32) < self.width
            && r >= 0
            && (r as u32) < self.height
        {
            Some(TileIndex(q as usize * self.height as usize + r as usize))
        } else {
            None
        }
    }
}

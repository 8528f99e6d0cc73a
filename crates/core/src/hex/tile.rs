//! Integer coordinates that refer to whole tiles, plus the six neighbor
//! directions. See the parent module documentation for more info on the
//! coordinate systems.

use crate::hex::{Axial, Cube, HexCoord, OddQ};
use anyhow::anyhow;
use derive_more::{Add, AddAssign, Display, From, Into, Mul, Sub, SubAssign};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// A tile in cube coordinates. The three components always satisfy
/// `x + y + z = 0`, so only `x` and `y` are stored and `z` is derived. That
/// makes it impossible to construct a cube tile that is off the plane.
///
/// Differences between two cube tiles are also valid cube tiles (the plane
/// passes through the origin), which is how directions and step deltas are
/// represented.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Mul,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {}, {})", "self.x", "self.y", "self.z()")]
pub struct CubeTile {
    x: i32,
    y: i32,
}

impl CubeTile {
    pub const ORIGIN: Self = Self::new_xy(0, 0);

    /// Construct a new cube tile with the given x and y. Since x+y+z=0 for all
    /// tiles, we can derive z from x & y.
    pub const fn new_xy(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Construct a new cube tile with the given x and z. Since x+y+z=0 for all
    /// tiles, we can derive y from x & z.
    pub const fn new_xz(x: i32, z: i32) -> Self {
        Self::new_xy(x, -x - z)
    }

    /// Construct a new cube tile with the given y and z. Since x+y+z=0 for all
    /// tiles, we can derive x from y & z.
    pub const fn new_yz(y: i32, z: i32) -> Self {
        Self::new_xy(-y - z, y)
    }

    /// Construct a cube tile from all three components, checking that they
    /// fall on the plane `x + y + z = 0`.
    pub fn new(x: i32, y: i32, z: i32) -> anyhow::Result<Self> {
        if x + y + z != 0 {
            Err(anyhow!(
                "Invalid cube tile ({}, {}, {}); must be on the plane x+y+z=0",
                x,
                y,
                z
            ))
        } else {
            Ok(Self::new_xy(x, y))
        }
    }

    pub fn x(self) -> i32 {
        self.x
    }

    pub fn y(self) -> i32 {
        self.y
    }

    pub fn z(self) -> i32 {
        -(self.x + self.y)
    }

    /// Get the tile adjacent to this one in a particular direction
    pub fn neighbor(self, direction: TileDirection) -> Self {
        self + direction.offset()
    }

    /// Get all six neighboring tiles, in [TileDirection::ALL] order
    pub fn neighbors(self) -> [Self; 6] {
        TileDirection::ALL.map(|dir| self.neighbor(dir))
    }

    /// Calculate the path distance between two tiles, meaning the number of
    /// steps it takes to get from one to the other. 0 if the tiles are equal,
    /// 1 if they are adjacent, etc.
    pub fn distance_to(self, other: Self) -> u32 {
        let delta = self - other;
        (delta.x().unsigned_abs()
            + delta.y().unsigned_abs()
            + delta.z().unsigned_abs())
            / 2
    }

    /// Get every tile that is exactly `radius` steps away from this one. A
    /// radius of 0 is just this tile. Otherwise the walk starts at the
    /// [TileDirection::SW] corner and goes around counter-clockwise (in pixel
    /// space), producing `6 * radius` tiles.
    pub fn ring(self, radius: u32) -> Vec<Self> {
        if radius == 0 {
            return vec![self];
        }

        let steps = radius as i32;
        let mut ring = Vec::with_capacity(6 * radius as usize);
        let mut cursor = self + TileDirection::SW.offset() * steps;
        for direction in TileDirection::iter() {
            for _ in 0..radius {
                ring.push(cursor);
                cursor += direction.offset();
            }
        }
        ring
    }

    pub fn to_axial(self) -> AxialTile {
        AxialTile::new(self.x(), self.z())
    }

    /// Convert to odd-q offset coordinates. The `x & 1` parity term is why
    /// this only exists for whole tiles.
    pub fn to_offset(self) -> OffsetTile {
        let x = self.x();
        OffsetTile::new(x, self.z() + (x - (x & 1)) / 2)
    }
}

/// A tile in axial coordinates: cube `x` as `q` and cube `z` as `r`.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", "self.q", "self.r")]
pub struct AxialTile {
    pub q: i32,
    pub r: i32,
}

impl AxialTile {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub fn to_cube(self) -> CubeTile {
        CubeTile::new_xz(self.q, self.r)
    }

    pub fn to_offset(self) -> OffsetTile {
        self.to_cube().to_offset()
    }
}

/// A tile in odd-q offset coordinates. `q` is the column and `r` is the row;
/// odd columns sit half a tile lower than even ones. This is the grid's
/// storage coordinate, see [crate::HexGrid::offset_to_index].
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", "self.q", "self.r")]
pub struct OffsetTile {
    pub q: i32,
    pub r: i32,
}

impl OffsetTile {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub fn to_cube(self) -> CubeTile {
        let Self { q, r } = self;
        CubeTile::new_xz(q, r - (q - (q & 1)) / 2)
    }

    pub fn to_axial(self) -> AxialTile {
        self.to_cube().to_axial()
    }
}

/// The position of a tile within a bounded grid, `q * height + r`. Indices
/// are only meaningful for the grid that produced them, and line up with any
/// flat per-tile array of length `width * height` (see [crate::TileMap]).
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[display(fmt = "{}", "self.0")]
#[serde(transparent)]
pub struct TileIndex(pub usize);

/// The 6 directions in which hexes can line up side-to-side. Names describe
/// the direction on screen (pixel space, `y` pointing down) for flat-topped
/// tiles.
#[derive(
    Copy, Clone, Debug, EnumIter, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TileDirection {
    /// South-east, cube offset `(1, -1, 0)`
    SE,
    /// North-east, cube offset `(1, 0, -1)`
    NE,
    /// North, cube offset `(0, 1, -1)`
    N,
    /// North-west, cube offset `(-1, 1, 0)`
    NW,
    /// South-west, cube offset `(-1, 0, 1)`
    SW,
    /// South, cube offset `(0, -1, 1)`
    S,
}

impl TileDirection {
    /// All directions, each one 60 degrees counter-clockwise from the last.
    /// This order is load-bearing: neighbor arrays and ring walks use it.
    pub const ALL: [Self; 6] =
        [Self::SE, Self::NE, Self::N, Self::NW, Self::SW, Self::S];

    /// Get the cube offset that moves a tile one step in this direction
    pub const fn offset(self) -> CubeTile {
        match self {
            Self::SE => CubeTile::new_xy(1, -1),
            Self::NE => CubeTile::new_xy(1, 0),
            Self::N => CubeTile::new_xy(0, 1),
            Self::NW => CubeTile::new_xy(-1, 1),
            Self::SW => CubeTile::new_xy(-1, 0),
            Self::S => CubeTile::new_xy(0, -1),
        }
    }

    /// Get the direction pointing the opposite way
    pub fn opposite(self) -> Self {
        let index = Self::ALL
            .iter()
            .position(|dir| *dir == self)
            .unwrap_or_default();
        Self::ALL[(index + 3) % Self::ALL.len()]
    }

    /// Find the direction matching a single-step cube delta, if there is one
    pub fn from_offset(offset: CubeTile) -> Option<Self> {
        Self::iter().find(|dir| dir.offset() == offset)
    }
}

impl From<CubeTile> for HexCoord<Cube> {
    fn from(tile: CubeTile) -> Self {
        HexCoord::new(tile.x().into(), tile.y().into(), tile.z().into())
    }
}

impl From<AxialTile> for HexCoord<Axial> {
    fn from(tile: AxialTile) -> Self {
        HexCoord::new(tile.q.into(), tile.r.into(), 0.0)
    }
}

impl From<OffsetTile> for HexCoord<OddQ> {
    fn from(tile: OffsetTile) -> Self {
        HexCoord::new(tile.q.into(), tile.r.into(), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_cube_new_validates() {
        assert_eq!(CubeTile::new(1, -1, 0).unwrap(), CubeTile::new_xy(1, -1));
        assert!(CubeTile::new(1, 1, 0).is_err());
        assert_eq!(CubeTile::new_xz(2, -3), CubeTile::new_xy(2, 1));
        assert_eq!(CubeTile::new_yz(2, -3), CubeTile::new_xy(1, 2));
        assert_eq!(CubeTile::new_xy(3, -1).to_string(), "(3, -1, -2)");
    }

    #[test]
    fn test_direction_offsets() {
        let offsets: Vec<(i32, i32, i32)> = TileDirection::iter()
            .map(|dir| {
                let offset = dir.offset();
                (offset.x(), offset.y(), offset.z())
            })
            .collect();
        assert_eq!(
            offsets,
            vec![
                (1, -1, 0),
                (1, 0, -1),
                (0, 1, -1),
                (-1, 1, 0),
                (-1, 0, 1),
                (0, -1, 1)
            ]
        );
        assert_eq!(TileDirection::iter().collect::<Vec<_>>(), TileDirection::ALL);
    }

    #[test]
    fn test_opposite() {
        for dir in TileDirection::iter() {
            assert_eq!(
                dir.offset() + dir.opposite().offset(),
                CubeTile::ORIGIN
            );
            assert_eq!(dir.opposite().opposite(), dir);
        }
        assert_eq!(
            TileDirection::from_offset(CubeTile::new_xy(0, 1)),
            Some(TileDirection::N)
        );
        assert_eq!(TileDirection::from_offset(CubeTile::new_xy(2, -2)), None);
    }

    #[test]
    fn test_distance_to() {
        let p0 = CubeTile::ORIGIN;
        let p1 = CubeTile::new_xy(-1, 1);
        let p2 = CubeTile::new_xy(2, -1);
        let p3 = CubeTile::new_xy(2, -3);

        assert_eq!(p0.distance_to(p0), 0);
        assert_eq!(p3.distance_to(p3), 0);

        assert_eq!(p0.distance_to(p1), 1);
        assert_eq!(p0.distance_to(p2), 2);
        assert_eq!(p0.distance_to(p3), 3);

        assert_eq!(p1.distance_to(p2), 3);
        assert_eq!(p1.distance_to(p3), 4);
        assert_eq!(p2.distance_to(p3), 2);
    }

    #[test]
    fn test_neighbors() {
        let center = CubeTile::new_xy(3, -5);
        for neighbor in center.neighbors() {
            assert_eq!(center.distance_to(neighbor), 1);
            assert!(neighbor.neighbors().contains(&center));
        }
    }

    #[test]
    fn test_ring() {
        let center = CubeTile::new_xy(1, 2);
        assert_eq!(center.ring(0), vec![center]);

        for radius in 1..5 {
            let ring = center.ring(radius);
            assert_eq!(ring.len(), 6 * radius as usize);
            assert!(ring.iter().all(|tile| center.distance_to(*tile) == radius));
            let unique: HashSet<_> = ring.iter().copied().collect();
            assert_eq!(unique.len(), ring.len());
            // Consecutive tiles in the walk are adjacent
            for pair in ring.windows(2) {
                assert_eq!(pair[0].distance_to(pair[1]), 1);
            }
        }

        // The walk starts in the south-west corner
        assert_eq!(
            CubeTile::ORIGIN.ring(2)[0],
            TileDirection::SW.offset() * 2
        );
    }

    #[test]
    fn test_offset_conversion() {
        // Even column: no shift
        assert_eq!(OffsetTile::new(0, 3).to_cube(), CubeTile::new_xz(0, 3));
        assert_eq!(OffsetTile::new(2, 3).to_cube(), CubeTile::new_xz(2, 2));
        // Odd column
        assert_eq!(OffsetTile::new(1, 3).to_cube(), CubeTile::new_xz(1, 3));
        assert_eq!(OffsetTile::new(3, 3).to_cube(), CubeTile::new_xz(3, 2));
        // Negative odd column, parity still holds in two's complement
        assert_eq!(OffsetTile::new(-1, 0).to_cube(), CubeTile::new_xz(-1, 1));

        for q in -10..10 {
            for r in -10..10 {
                let offset = OffsetTile::new(q, r);
                assert_eq!(offset.to_cube().to_offset(), offset);
                assert_eq!(offset.to_axial().to_offset(), offset);
            }
        }
    }

    #[test]
    fn test_axial_conversion() {
        let cube = CubeTile::new_xy(4, -1);
        assert_eq!(cube.to_axial(), AxialTile::new(4, -3));
        assert_eq!(cube.to_axial().to_cube(), cube);
    }

    #[test]
    fn test_into_fractional() {
        let cube: HexCoord<Cube> = CubeTile::new_xy(2, -5).into();
        assert_eq!(cube, HexCoord::new(2.0, -5.0, 3.0));
        assert_eq!(cube.round(), CubeTile::new_xy(2, -5));

        let oddq: HexCoord<OddQ> = OffsetTile::new(3, 4).into();
        assert_eq!(oddq, HexCoord::new(3.0, 4.0, 0.0));

        let axial: HexCoord<Axial> = AxialTile::new(-1, 2).into();
        assert_eq!(axial.round(), AxialTile::new(-1, 2));
    }

    #[test]
    fn test_tile_index_serde() {
        let index = TileIndex(42);
        assert_eq!(serde_json::to_string(&index).unwrap(), "42");
        assert_eq!(index.to_string(), "42");
        assert_eq!(usize::from(index), 42);
    }
}

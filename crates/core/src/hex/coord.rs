//! Fractional coordinates, tagged by the coordinate space they belong to. See
//! the parent module documentation for a description of each space.

use crate::hex::{AxialTile, CubeTile};
use nalgebra::Vector3;
use std::{
    fmt::{self, Debug, Display},
    marker::PhantomData,
    ops,
};

/// A marker for one of the coordinate spaces a [HexCoord] can live in. These
/// are zero-sized; they exist purely so the compiler can tell a cube
/// coordinate apart from an odd-q one.
pub trait CoordSpace: 'static + Copy + Debug + Default + PartialEq {
    /// Human-readable name of the space, used in debug output
    const NAME: &'static str;
}

/// Cube space. Valid tile centers satisfy `x + y + z = 0`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Cube;

/// Axial space. `q` is cube `x`, `r` is cube `z`, `s` is always `0`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Axial;

/// Odd-q offset space. `q` is the column, `r` the row, `s` is unused.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct OddQ;

/// Pixel space, measured from the top-left of the map with `y` pointing down.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Pixel;

/// World position space, centered on the map with `y` pointing up.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Position;

impl CoordSpace for Cube {
    const NAME: &'static str = "cube";
}

impl CoordSpace for Axial {
    const NAME: &'static str = "axial";
}

impl CoordSpace for OddQ {
    const NAME: &'static str = "oddq";
}

impl CoordSpace for Pixel {
    const NAME: &'static str = "pixel";
}

impl CoordSpace for Position {
    const NAME: &'static str = "position";
}

/// A three-component coordinate with floating point values. The same storage
/// can be read as `x`/`y`/`z` or `q`/`r`/`s`, whichever reads better for the
/// space at hand.
///
/// Nothing here is validated. In particular a fractional cube coordinate may
/// drift off the `x + y + z = 0` plane; use [HexCoord::round] to snap it back
/// to a tile. All arithmetic is total, so division by zero upstream shows up
/// as `NaN`/`inf` components rather than an error.
#[derive(Copy, Clone, PartialEq)]
pub struct HexCoord<S: CoordSpace> {
    vector: Vector3<f64>,
    space: PhantomData<S>,
}

impl<S: CoordSpace> HexCoord<S> {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            vector: Vector3::new(x, y, z),
            space: PhantomData,
        }
    }

    pub fn x(&self) -> f64 {
        self.vector.x
    }

    pub fn y(&self) -> f64 {
        self.vector.y
    }

    pub fn z(&self) -> f64 {
        self.vector.z
    }

    /// Alias for [Self::x]
    pub fn q(&self) -> f64 {
        self.vector.x
    }

    /// Alias for [Self::y]
    pub fn r(&self) -> f64 {
        self.vector.y
    }

    /// Alias for [Self::z]
    pub fn s(&self) -> f64 {
        self.vector.z
    }

    pub fn set_x(&mut self, x: f64) {
        self.vector.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.vector.y = y;
    }

    pub fn set_z(&mut self, z: f64) {
        self.vector.z = z;
    }

    /// Alias for [Self::set_x]
    pub fn set_q(&mut self, q: f64) {
        self.set_x(q);
    }

    /// Alias for [Self::set_y]
    pub fn set_r(&mut self, r: f64) {
        self.set_y(r);
    }

    /// Alias for [Self::set_z]
    pub fn set_s(&mut self, s: f64) {
        self.set_z(s);
    }

    /// Overwrite all three components at once
    pub fn set(&mut self, x: f64, y: f64, z: f64) {
        self.vector = Vector3::new(x, y, z);
    }

    /// The underlying vector
    pub fn as_vector(&self) -> &Vector3<f64> {
        &self.vector
    }

    /// Euclidean length of the coordinate, treated as a vector from the origin
    pub fn length(&self) -> f64 {
        self.vector.norm()
    }

    /// Euclidean (straight line) distance between two coordinates in the same
    /// space. Note this is **not** the hex step distance; for that, see
    /// [CubeTile::distance_to].
    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.vector - other.vector).norm()
    }
}

impl HexCoord<Cube> {
    /// Snap a fractional cube coordinate to the nearest tile. Each component
    /// is rounded on its own, which can knock the point off the `x + y + z = 0`
    /// plane, so the component that moved the most is then recomputed from
    /// the other two.
    pub fn round(self) -> CubeTile {
        let (x, y, z) = (self.x(), self.y(), self.z());
        let rx = x.round();
        let ry = y.round();
        let rz = z.round();

        let dx = (rx - x).abs();
        let dy = (ry - y).abs();
        let dz = (rz - z).abs();

        if dx > dy && dx > dz {
            CubeTile::new_yz(ry as i32, rz as i32)
        } else if dy > dz {
            CubeTile::new_xz(rx as i32, rz as i32)
        } else {
            CubeTile::new_xy(rx as i32, ry as i32)
        }
    }

    pub fn to_axial(self) -> HexCoord<Axial> {
        HexCoord::new(self.x(), self.z(), 0.0)
    }
}

impl HexCoord<Axial> {
    /// Snap a fractional axial coordinate to the nearest tile, by way of cube
    /// rounding
    pub fn round(self) -> AxialTile {
        self.to_cube().round().to_axial()
    }

    pub fn to_cube(self) -> HexCoord<Cube> {
        let x = self.q();
        let z = self.r();
        HexCoord::new(x, -x - z, z)
    }
}

impl<S: CoordSpace> Default for HexCoord<S> {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl<S: CoordSpace> Debug for HexCoord<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {}, {})", S::NAME, self.x(), self.y(), self.z())
    }
}

impl<S: CoordSpace> Display for HexCoord<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x(), self.y(), self.z())
    }
}

impl<S: CoordSpace> From<Vector3<f64>> for HexCoord<S> {
    fn from(vector: Vector3<f64>) -> Self {
        Self {
            vector,
            space: PhantomData,
        }
    }
}

impl<S: CoordSpace> ops::Add for HexCoord<S> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        (self.vector + rhs.vector).into()
    }
}

impl<S: CoordSpace> ops::Sub for HexCoord<S> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        (self.vector - rhs.vector).into()
    }
}

impl<S: CoordSpace> ops::AddAssign for HexCoord<S> {
    fn add_assign(&mut self, rhs: Self) {
        self.vector += rhs.vector;
    }
}

impl<S: CoordSpace> ops::SubAssign for HexCoord<S> {
    fn sub_assign(&mut self, rhs: Self) {
        self.vector -= rhs.vector;
    }
}

impl<S: CoordSpace> ops::Mul<f64> for HexCoord<S> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        (self.vector * rhs).into()
    }
}

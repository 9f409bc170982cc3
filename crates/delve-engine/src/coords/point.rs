use core::fmt;
use core::ops::{Add, Index, IndexMut, Neg, Sub};

use super::Axis;

/// Integer lattice point in world space.
///
/// Besides plain `(x, y, z)` access, a point can be built and read as
/// `(row, col, depth)` relative to any cardinal [`Axis`]. Depth runs along the
/// axis itself; row and column span the perpendicular plane. The slot
/// assignments come from [`PR`](super::PR), [`PC`](super::PC) and
/// [`PD`](super::PD) and are relied on by world geometry code, so they must not
/// be swapped for another equivalent rotation.
///
/// Z is the identity orientation: `Point::from_axis(Axis::Z, r, c, d)` equals
/// `Point::new(r, c, d)`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0, y: 0, z: 0 }
    }

    /// Builds a point from row/column/depth oriented on `axis`.
    pub fn from_axis(axis: Axis, row: i32, col: i32, depth: i32) -> Self {
        let mut p = Point::zero();
        p[axis.row_slot()] = row;
        p[axis.col_slot()] = col;
        p[axis.depth_slot()] = depth;
        p
    }

    /// Like [`from_axis`](Self::from_axis) with the axis given as `0`, `1` or `2`.
    ///
    /// Panics when `axis` is not one of the three cardinal indices.
    pub fn from_axis_index(axis: usize, row: i32, col: i32, depth: i32) -> Self {
        let Some(axis) = Axis::from_index(axis) else {
            panic!("Point::from_axis_index: axis {axis} is out of range (expected 0..3)");
        };
        Self::from_axis(axis, row, col, depth)
    }

    /// Row component when viewed along `axis`.
    #[inline]
    pub fn row(self, axis: Axis) -> i32 {
        self[axis.row_slot()]
    }

    #[inline]
    pub fn col(self, axis: Axis) -> i32 {
        self[axis.col_slot()]
    }

    #[inline]
    pub fn depth(self, axis: Axis) -> i32 {
        self[axis.depth_slot()]
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0 && self.z == 0
    }
}

impl Index<usize> for Point {
    type Output = i32;

    fn index(&self, index: usize) -> &i32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Point index {index} is out of range (expected 0..3)"),
        }
    }
}

impl IndexMut<usize> for Point {
    fn index_mut(&mut self, index: usize) -> &mut i32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Point index {index} is out of range (expected 0..3)"),
        }
    }
}

impl From<[i32; 3]> for Point {
    #[inline]
    fn from(v: [i32; 3]) -> Self {
        Point::new(v[0], v[1], v[2])
    }
}

impl From<Point> for [i32; 3] {
    #[inline]
    fn from(p: Point) -> Self {
        [p.x, p.y, p.z]
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
